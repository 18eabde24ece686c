// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#[cfg(test)]
mod tests;

use crate::{
    error::{Error, Result},
    gate::GateRecord,
    layout::CircuitLayout,
    symbols,
    toolchain::{self, Image},
};
use log::debug;
use std::{fmt::Write, time::Duration};
use tempfile::TempDir;

const IDLE: &str = r"\qw";

/// Options for the typeset document renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentOptions {
    /// Resolution of the rasterized image.
    pub dpi: u32,
    /// Factor the whole circuit is scaled by.
    pub scale: f64,
    /// Limit for each external tool run.
    pub tool_timeout: Duration,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            dpi: 150,
            scale: 1.0,
            tool_timeout: Duration::from_secs(60),
        }
    }
}

/// Builds the qcircuit markup for a laid out circuit.
pub struct DocumentSourceBuilder<'a> {
    layout: &'a CircuitLayout,
    scale: f64,
}

impl<'a> DocumentSourceBuilder<'a> {
    #[must_use]
    pub fn new(layout: &'a CircuitLayout) -> Self {
        Self { layout, scale: 1.0 }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// The qcircuit command of every wire at every layer, indexed
    /// `[wire][layer]`.
    pub fn cells(&self) -> Result<Vec<Vec<String>>> {
        if self.layout.is_empty() {
            return Err(Error::EmptyCircuit);
        }

        let qubit_count = self.layout.qubit_count();
        let mut rows = vec![Vec::with_capacity(self.layout.layer_count()); qubit_count];
        for layer in 0..self.layout.layer_count() {
            let mut column = vec![IDLE.to_string(); qubit_count];
            for id in self.layout.gates_in_layer(layer) {
                write_gate(&mut column, self.layout.gate(id))?;
            }
            for (row, cell) in rows.iter_mut().zip(column) {
                row.push(cell);
            }
        }
        Ok(rows)
    }

    /// The body of the `\Qcircuit` environment: one line per wire with its
    /// labels, its cells and a trailing wire.
    pub fn circuit_body(&self) -> Result<String> {
        let rows: Vec<String> = self
            .cells()?
            .into_iter()
            .enumerate()
            .map(|(wire, cells)| {
                let mut row = format!(r"\nghost{{ q_{{{wire}}} : }} & \lstick{{ q_{{{wire}}} : }}");
                for cell in cells {
                    let _ = write!(row, " & {cell}");
                }
                row.push_str(r" & \qw");
                row
            })
            .collect();
        Ok(rows.join(" \\\\\n"))
    }

    /// A standalone document typesetting the circuit.
    pub fn build(&self) -> Result<String> {
        let body = self.circuit_body()?;
        Ok(format!(
            r"\documentclass[border=2px]{{standalone}}
\usepackage[braket, qm]{{qcircuit}}
\usepackage{{graphicx}}

\begin{{document}}
\scalebox{{{scale:?}}}{{
\Qcircuit @C=1.0em @R=0.2em @!R {{ \\
{body}
\\ }}}}
\end{{document}}
",
            scale = self.scale,
        ))
    }
}

fn write_gate(column: &mut [String], gate: &GateRecord) -> Result<()> {
    match gate.name() {
        "CNOT" => {
            gate.require_controls()?;
            for &target in gate.targets() {
                column[target] = r"\targ".to_string();
            }
        }
        "SWAP" => {
            let (first, last) = gate.target_span();
            column[first] = format!(r"\qswap \qwx[{}]", last - first);
            column[last] = r"\qswap".to_string();
        }
        name => {
            let symbol = symbols::lookup(name)?.latex;
            if gate.targets().len() == 1 {
                column[gate.primary()] = format!(r"\gate{{{symbol}}}");
            } else {
                write_target_runs(column, gate, symbol);
            }
        }
    }

    let primary = gate.primary();
    for control in gate.controls() {
        // Signed row offset from the control down to the primary target.
        let distance = if primary >= control.index {
            (primary - control.index).to_string()
        } else {
            format!("-{}", control.index - primary)
        };
        column[control.index] = if control.value == 0 {
            format!(r"\ctrlo{{{distance}}}")
        } else {
            format!(r"\ctrl{{{distance}}}")
        };
    }
    Ok(())
}

/// One `\multigate` per run of adjacent targets, its other wires
/// `\ghost`ed, and each run wired to the next.
fn write_target_runs(column: &mut [String], gate: &GateRecord, symbol: &str) {
    let runs = gate.target_groups();
    for (i, run) in runs.iter().enumerate() {
        let top = run[0];
        column[top] = format!(r"\multigate{{{}}}{{{symbol}}}", run.len() - 1);
        for &wire in &run[1..] {
            column[wire] = format!(r"\ghost{{{symbol}}}");
        }
        if let Some(next) = runs.get(i + 1) {
            let _ = write!(column[top], r" \qwx[{}]", next[0] - top);
        }
    }
}

/// Compiles the document with `pdflatex` and converts its single page to
/// a PNG with `pdftocairo`. Intermediate files live in a temporary
/// directory that is removed afterwards.
pub fn render_image(source: &str, options: &DocumentOptions) -> Result<Image> {
    let dir = TempDir::new()?;
    let output_dir = format!("-output-directory={}", dir.path().display());
    std::fs::write(dir.path().join("circuit.tex"), source)?;

    toolchain::run_tool(
        "pdflatex",
        &["-halt-on-error", "-interaction=nonstopmode", &output_dir, "circuit.tex"],
        dir.path(),
        options.tool_timeout,
    )?;

    let dpi = options.dpi.to_string();
    toolchain::run_tool(
        "pdftocairo",
        &["-png", "-singlefile", "-r", &dpi, "circuit.pdf", "circuit"],
        dir.path(),
        options.tool_timeout,
    )?;

    let bytes = std::fs::read(dir.path().join("circuit.png"))?;
    debug!("document rendered to {} bytes of PNG", bytes.len());
    Ok(Image::from_png(bytes))
}
