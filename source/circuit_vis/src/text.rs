// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Monospace rendering of a circuit.
//!
//! The text renderer does its own placement on a character canvas instead of
//! reading a [`crate::CircuitLayout`]: every gate is stamped as a block of
//! ASCII art seven columns wide, so the canvas packs whole glyph blocks into
//! coarse logical layers, growing by one layer whenever a gate does not fit.

mod glyph;

use crate::{
    error::{Error, Result},
    gate::{GateRecord, ParsedCircuit},
};
use glyph::{GLYPH_WIDTH, GlyphRow, WIRE_HEIGHT};
use log::{debug, trace};
use std::{fmt::Display, str::FromStr};

/// Columns taken by one logical layer: a glyph plus one wire column.
const LAYER_WIDTH: usize = GLYPH_WIDTH + 1;

const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Character used to mark a control wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlDotStyle {
    #[default]
    Large,
    Small,
}

impl ControlDotStyle {
    #[must_use]
    pub fn glyph(self) -> char {
        match self {
            ControlDotStyle::Large => '●',
            ControlDotStyle::Small => '･',
        }
    }
}

impl FromStr for ControlDotStyle {
    type Err = std::convert::Infallible;

    /// Unrecognized style names fall back to [`ControlDotStyle::Large`].
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "small" => ControlDotStyle::Small,
            _ => ControlDotStyle::Large,
        })
    }
}

/// Options for [`render`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextOptions {
    /// Print each gate's position in the circuit inside its box.
    pub verbose: bool,
    pub control_dot: ControlDotStyle,
    /// Usable width of one page, in characters. `None` detects it from
    /// the `COLUMNS` environment variable.
    pub page_width: Option<usize>,
}

impl TextOptions {
    /// The page width to paginate at. A detected terminal keeps its last
    /// column free.
    #[must_use]
    pub fn resolved_page_width(&self) -> usize {
        let width = self.page_width.unwrap_or_else(|| terminal_width().saturating_sub(1));
        width.max(1)
    }
}

fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|columns| columns.trim().parse().ok())
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
}

/// Draws `circuit` on a character canvas.
///
/// # Errors
///
/// [`Error::EmptyCircuit`] when there is nothing to draw, and
/// [`Error::UnknownGateName`] for a gate without a text symbol.
pub fn render(circuit: &ParsedCircuit, options: &TextOptions) -> Result<TextDiagram> {
    if circuit.is_empty() || circuit.qubit_count() == 0 {
        return Err(Error::EmptyCircuit);
    }

    let depth = dependency_depth(circuit.gates(), circuit.qubit_count());
    let mut canvas = TextCanvas::new(circuit.qubit_count(), depth, options.control_dot.glyph());
    for (position, gate) in circuit.iter_with_positions() {
        canvas.place(gate, options.verbose.then_some(position))?;
    }
    canvas.connect_wires();

    Ok(canvas.into_diagram(options.resolved_page_width()))
}

/// Number of steps the circuit needs when each gate follows directly after
/// the latest gate on any of its wires.
fn dependency_depth(gates: &[GateRecord], qubit_count: usize) -> usize {
    let mut filled = vec![0; qubit_count];
    for gate in gates {
        let step = gate.wires().map(|wire| filled[wire]).max().unwrap_or(0) + 1;
        for wire in gate.wires() {
            filled[wire] = step;
        }
    }
    filled.into_iter().max().unwrap_or(0)
}

/// Row of the canvas a wire's horizontal line runs along.
fn rest_row(wire: usize) -> usize {
    (wire + 1) * WIRE_HEIGHT - 2
}

/// The character canvas plus the availability of every wire at every
/// logical layer.
#[derive(Debug)]
pub struct TextCanvas {
    qubit_count: usize,
    depth: usize,
    /// `available[wire][layer]`: nothing has claimed the slot, nor any
    /// slot to its right.
    available: Vec<Vec<bool>>,
    picture: Vec<Vec<char>>,
    dot: char,
    /// Gates placed so far.
    placed: usize,
}

impl TextCanvas {
    #[must_use]
    pub fn new(qubit_count: usize, depth: usize, dot: char) -> Self {
        let width = depth * LAYER_WIDTH + 1;
        let mut picture = vec![vec![' '; width]; qubit_count * WIRE_HEIGHT];
        for wire in 0..qubit_count {
            let row = &mut picture[rest_row(wire)];
            row[0] = '-';
            row[width - 1] = '-';
        }
        Self {
            qubit_count,
            depth,
            available: vec![vec![true; depth]; qubit_count],
            picture,
            dot,
            placed: 0,
        }
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.depth * LAYER_WIDTH + 1
    }

    /// Stamps the glyph of `gate` into the first logical layer whose whole
    /// span is still free, growing the canvas when there is none.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGate`] or [`Error::WireOutOfRange`] for a record
    /// that does not fit on the canvas, [`Error::UnknownGateName`] for a
    /// gate without a text symbol.
    pub fn place(&mut self, gate: &GateRecord, index: Option<usize>) -> Result<()> {
        gate.validate(index.unwrap_or(self.placed), self.qubit_count)?;
        let glyph = glyph::gate_glyph(gate, index, self.dot)?;
        let (min_wire, max_wire) = gate.span();
        let layer = self.reserve(min_wire, max_wire);
        trace!("text: `{}` on wires {min_wire}..={max_wire} in layer {layer}", gate.name());
        self.stamp(&glyph, min_wire * WIRE_HEIGHT, layer * LAYER_WIDTH + 1);
        self.placed += 1;
        Ok(())
    }

    /// Claims the first layer free on all of `min_wire..=max_wire`, along
    /// with every layer to its left.
    fn reserve(&mut self, min_wire: usize, max_wire: usize) -> usize {
        let free = (0..self.depth).find(|&layer| {
            self.available[min_wire..=max_wire]
                .iter()
                .all(|slots| slots[layer])
        });
        let layer = match free {
            Some(layer) => layer,
            None => {
                self.grow();
                self.depth - 1
            }
        };

        for slots in &mut self.available[min_wire..=max_wire] {
            slots[..=layer].fill(false);
        }
        layer
    }

    /// Adds one logical layer on the right.
    fn grow(&mut self) {
        for slots in &mut self.available {
            slots.push(true);
        }
        for row in &mut self.picture {
            row.extend([' '; LAYER_WIDTH]);
        }
        for wire in 0..self.qubit_count {
            let row = &mut self.picture[rest_row(wire)];
            if let Some(last) = row.last_mut() {
                *last = '-';
            }
        }
        self.depth += 1;
        debug!("text: canvas grew to {} layers", self.depth);
    }

    /// Copies `glyph` onto the canvas with its top left corner at
    /// `(row, column)`. Rows below the canvas are dropped.
    fn stamp(&mut self, glyph: &[GlyphRow], row: usize, column: usize) {
        for (target, line) in self.picture.iter_mut().skip(row).zip(glyph) {
            target[column..column + GLYPH_WIDTH].copy_from_slice(line);
        }
    }

    /// Closes the gaps each wire's rest row has between glyphs.
    ///
    /// The scan walks left to right. A `|` right after a wire segment is
    /// either a box wall, which is skipped whole (five columns for a wide
    /// wall, three for a narrow one), or a connector crossing the wire,
    /// after which the wire resumes.
    pub fn connect_wires(&mut self) {
        let width = self.width();
        let dot = self.dot;
        for wire in 0..self.qubit_count {
            let row = &mut self.picture[rest_row(wire)];
            let mut p = 0;
            while p + 1 < width {
                let current = row[p];
                if current == dot {
                    row[p + 1] = '-';
                } else if current == '-' {
                    match row[p + 1] {
                        ' ' => row[p + 1] = '-',
                        '|' => {
                            if row.get(p + 5) == Some(&'|') {
                                p += 5;
                            } else if row.get(p + 3) == Some(&'|') {
                                p += 3;
                            } else {
                                if let Some(next) = row.get_mut(p + 2) {
                                    *next = '-';
                                }
                                p += 1;
                            }
                        }
                        _ => {}
                    }
                }
                p += 1;
            }
        }
    }

    #[must_use]
    pub fn into_diagram(self, page_width: usize) -> TextDiagram {
        TextDiagram {
            width: self.width(),
            rows: self.picture,
            page_width,
        }
    }
}

/// A finished text diagram. Its [`Display`] output is what text mode
/// prints: the whole canvas when it fits the page width, otherwise the
/// canvas cut into numbered pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextDiagram {
    rows: Vec<Vec<char>>,
    width: usize,
    page_width: usize,
}

impl TextDiagram {
    /// Total width of the canvas in characters.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.width.div_ceil(self.page_width)
    }

    /// The canvas rows, each trimmed of trailing blanks.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|row| trimmed(row))
    }
}

fn trimmed(chars: &[char]) -> String {
    chars.iter().collect::<String>().trim_end().to_string()
}

impl Display for TextDiagram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.width <= self.page_width {
            for line in self.lines() {
                writeln!(f, "{line}")?;
            }
            return Ok(());
        }

        let delimiter = "#".repeat(self.page_width);
        writeln!(f)?;
        writeln!(f, "{delimiter}")?;
        for page in 0..self.page_count() {
            let start = page * self.page_width;
            let end = (start + self.page_width).min(self.width);
            writeln!(f, ">> {page}")?;
            for row in &self.rows {
                writeln!(f, "{}", trimmed(&row[start..end]))?;
            }
            writeln!(f)?;
            writeln!(f, "{delimiter}")?;
        }
        Ok(())
    }
}
