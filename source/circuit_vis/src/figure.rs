// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Vector figure rendering of a laid out circuit.
//!
//! Geometry is computed in abstract units: a plain gate box is 0.65 units
//! square, and wires and layers are separated by half a unit. Drawing goes
//! through the [`Canvas`] trait; [`SvgCanvas`] turns it into an SVG
//! document, which can then be rasterized.

mod svg;

pub use svg::SvgCanvas;

use crate::{
    error::{Error, Result},
    gate::GateRecord,
    layout::{CircuitLayout, GateId, LayoutCell},
    symbols,
    toolchain::{self, Image},
};
use log::debug;
use std::time::Duration;
use tempfile::TempDir;

pub const GATE_WIDTH: f64 = 0.65;
pub const GATE_HEIGHT: f64 = 0.65;
/// Space between neighbouring wires and between neighbouring layers.
pub const GAP: f64 = 0.5;

const MARGIN: f64 = 0.25;
/// Room left of the first layer for the wire labels.
const LABEL_SPACE: f64 = 0.75;
const WIRE_START: f64 = MARGIN + LABEL_SPACE - GAP / 2.0;

const LABEL_FONT_SIZE: f64 = 0.3;
const SUB_LABEL_FONT_SIZE: f64 = 0.15;
const WIRE_LABEL_FONT_SIZE: f64 = 0.2;
const LABEL_PADDING: f64 = 0.1;

const CONTROL_RADIUS: f64 = 0.1;
const TARGET_RADIUS: f64 = 0.2;
const SWAP_ARM: f64 = 0.12;

/// Font size the character widths below were measured at.
const METRIC_FONT_SIZE: f64 = 0.2;

/// Widths of the printable ASCII characters `' '..='}'`.
#[rustfmt::skip]
const CHAR_WIDTHS: [f64; 94] = [
    0.0583, 0.0729, 0.0875, 0.1562, 0.1167, 0.1771, 0.1458, 0.0521,
    0.0729, 0.0729, 0.0938, 0.1562, 0.0583, 0.0667, 0.0604, 0.0625,
    0.1167, 0.1167, 0.1188, 0.1167, 0.1188, 0.1167, 0.1167, 0.1188,
    0.1188, 0.1188, 0.0604, 0.0604, 0.1542, 0.1562, 0.1542, 0.0979,
    0.1854, 0.1271, 0.1271, 0.1292, 0.1417, 0.1167, 0.1062, 0.1438,
    0.1396, 0.0542, 0.0542, 0.1208, 0.1042, 0.1604, 0.1396, 0.1458,
    0.1125, 0.1458, 0.1292, 0.1188, 0.1125, 0.1354, 0.1271, 0.1833,
    0.1271, 0.1125, 0.1271, 0.075, 0.0625, 0.0729, 0.1562, 0.0938,
    0.0938, 0.1146, 0.1167, 0.1021, 0.1188, 0.1146, 0.0667, 0.1188,
    0.1188, 0.0521, 0.0521, 0.1083, 0.0521, 0.1812, 0.1188, 0.1125,
    0.1167, 0.1188, 0.0771, 0.0958, 0.0729, 0.1188, 0.1104, 0.1521,
    0.1104, 0.1104, 0.0979, 0.1188, 0.0604, 0.1188,
];

/// Width of decorations such as `†` and `√`, and of characters outside the
/// table.
const DECORATION_WIDTH: f64 = 0.0583;

/// Options for the figure renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct FigureOptions {
    /// Resolution of the rasterized image.
    pub dpi: u32,
    /// Factor the whole figure is scaled by.
    pub scale: f64,
    /// Limit for the rasterizer run.
    pub tool_timeout: Duration,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            dpi: 150,
            scale: 1.0,
            tool_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    Solid,
    Hollow,
}

/// Drawing primitives the figure is made of. Coordinates are in figure
/// units, with `y` growing downwards.
pub trait Canvas {
    fn line(&mut self, from: Point, to: Point);
    fn rect(&mut self, top_left: Point, width: f64, height: f64);
    fn circle(&mut self, center: Point, radius: f64, fill: Fill);
    /// Text centred on `at`.
    fn text(&mut self, at: Point, text: &str, size: f64);
}

/// Width of `label` when drawn at `font_size`.
#[must_use]
pub fn text_width(label: &str, font_size: f64) -> f64 {
    let width: f64 = label
        .chars()
        .map(|c| {
            (c as usize)
                .checked_sub(' ' as usize)
                .and_then(|i| CHAR_WIDTHS.get(i))
                .copied()
                .unwrap_or(DECORATION_WIDTH)
        })
        .sum();
    width * font_size / METRIC_FONT_SIZE
}

/// Computes where every layer and wire of a layout goes, and draws it.
#[derive(Debug)]
pub struct FigureRenderer<'a> {
    layout: &'a CircuitLayout,
    /// Width of each layer, the widest of its cells.
    layer_widths: Vec<f64>,
    /// Left edge of each layer.
    layer_lefts: Vec<f64>,
}

impl<'a> FigureRenderer<'a> {
    pub fn new(layout: &'a CircuitLayout) -> Result<Self> {
        if layout.is_empty() {
            return Err(Error::EmptyCircuit);
        }

        let mut layer_widths = Vec::with_capacity(layout.layer_count());
        for layer in 0..layout.layer_count() {
            let mut width = GATE_WIDTH;
            for wire in 0..layout.qubit_count() {
                width = width.max(cell_width(layout, layout.cell(wire, layer))?);
            }
            layer_widths.push(width);
        }

        let mut layer_lefts = Vec::with_capacity(layer_widths.len());
        let mut left = MARGIN + LABEL_SPACE;
        for width in &layer_widths {
            layer_lefts.push(left);
            left += width + GAP;
        }

        Ok(Self {
            layout,
            layer_widths,
            layer_lefts,
        })
    }

    #[must_use]
    pub fn layer_width(&self, layer: usize) -> f64 {
        self.layer_widths[layer]
    }

    /// Horizontal centre of `layer`.
    #[must_use]
    pub fn layer_x(&self, layer: usize) -> f64 {
        self.layer_lefts[layer] + self.layer_widths[layer] / 2.0
    }

    /// Height of the line `wire` runs along.
    #[must_use]
    pub fn wire_y(&self, wire: usize) -> f64 {
        MARGIN + GATE_HEIGHT / 2.0 + wire as f64 * (GATE_HEIGHT + GAP)
    }

    fn wire_end(&self) -> f64 {
        let last = self.layer_widths.len() - 1;
        self.layer_lefts[last] + self.layer_widths[last] + GAP / 2.0
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.wire_end() + MARGIN
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        let wires = self.layout.qubit_count() as f64;
        2.0 * MARGIN + wires * GATE_HEIGHT + (wires - 1.0) * GAP
    }

    /// Draws the wires, then each layer's gates from left to right.
    pub fn draw(&self, canvas: &mut impl Canvas) -> Result<()> {
        let (start, end) = (WIRE_START, self.wire_end());
        let label_x = MARGIN + (LABEL_SPACE - GAP / 2.0) / 2.0;
        for wire in 0..self.layout.qubit_count() {
            let y = self.wire_y(wire);
            canvas.line(Point::new(start, y), Point::new(end, y));
            canvas.text(Point::new(label_x, y), &format!("q_{wire}"), WIRE_LABEL_FONT_SIZE);
        }

        for layer in 0..self.layout.layer_count() {
            for id in self.layout.gates_in_layer(layer) {
                self.draw_gate(canvas, id, layer)?;
            }
        }
        Ok(())
    }

    fn draw_gate(&self, canvas: &mut impl Canvas, id: GateId, layer: usize) -> Result<()> {
        let gate = self.layout.gate(id);
        let x = self.layer_x(layer);

        // Control connectors go first so the target shapes cover their ends.
        let primary_y = self.wire_y(gate.primary());
        for control in gate.controls() {
            let y = self.wire_y(control.index);
            canvas.line(Point::new(x, primary_y), Point::new(x, y));
            let fill = if control.value == 0 {
                Fill::Hollow
            } else {
                Fill::Solid
            };
            canvas.circle(Point::new(x, y), CONTROL_RADIUS, fill);
        }

        match gate.name() {
            "CNOT" => {
                gate.require_controls()?;
                for &target in gate.targets() {
                    draw_plus(canvas, x, self.wire_y(target));
                }
            }
            "SWAP" => {
                let (first, last) = gate.target_span();
                let (top, bottom) = (self.wire_y(first), self.wire_y(last));
                canvas.line(Point::new(x, top), Point::new(x, bottom));
                for &target in gate.targets() {
                    draw_cross(canvas, x, self.wire_y(target));
                }
            }
            name => {
                let label = symbols::lookup(name)?.label;
                self.draw_boxes(canvas, gate, label, x);
            }
        }
        Ok(())
    }

    /// One box per run of adjacent targets, the runs joined by a line.
    /// Targets of a multi-target gate are numbered in their given order.
    fn draw_boxes(&self, canvas: &mut impl Canvas, gate: &GateRecord, label: &str, x: f64) {
        let width = GATE_WIDTH.max(text_width(label, LABEL_FONT_SIZE) + LABEL_PADDING);
        let left = x - width / 2.0;
        let runs = gate.target_groups();

        for pair in runs.windows(2) {
            let bottom = self.wire_y(pair[0][pair[0].len() - 1]) + GATE_HEIGHT / 2.0;
            let top = self.wire_y(pair[1][0]) - GATE_HEIGHT / 2.0;
            canvas.line(Point::new(x, bottom), Point::new(x, top));
        }

        for (i, run) in runs.iter().enumerate() {
            let top = self.wire_y(run[0]) - GATE_HEIGHT / 2.0;
            let bottom = self.wire_y(run[run.len() - 1]) + GATE_HEIGHT / 2.0;
            canvas.rect(Point::new(left, top), width, bottom - top);
            if i == 0 {
                canvas.text(Point::new(x, (top + bottom) / 2.0), label, LABEL_FONT_SIZE);
            }
        }

        if gate.targets().len() > 1 {
            for (ordinal, &target) in gate.targets().iter().enumerate() {
                let at = Point::new(left + SUB_LABEL_FONT_SIZE / 2.0 + 0.02, self.wire_y(target));
                canvas.text(at, &ordinal.to_string(), SUB_LABEL_FONT_SIZE);
            }
        }
    }
}

/// A circled plus, the controlled-NOT target.
fn draw_plus(canvas: &mut impl Canvas, x: f64, y: f64) {
    canvas.circle(Point::new(x, y), TARGET_RADIUS, Fill::Hollow);
    canvas.line(Point::new(x - TARGET_RADIUS, y), Point::new(x + TARGET_RADIUS, y));
    canvas.line(Point::new(x, y - TARGET_RADIUS), Point::new(x, y + TARGET_RADIUS));
}

fn draw_cross(canvas: &mut impl Canvas, x: f64, y: f64) {
    canvas.line(
        Point::new(x - SWAP_ARM, y - SWAP_ARM),
        Point::new(x + SWAP_ARM, y + SWAP_ARM),
    );
    canvas.line(
        Point::new(x - SWAP_ARM, y + SWAP_ARM),
        Point::new(x + SWAP_ARM, y - SWAP_ARM),
    );
}

/// Width a cell needs: boxed gates grow with their label.
fn cell_width(layout: &CircuitLayout, cell: LayoutCell) -> Result<f64> {
    let Some(id) = cell.gate_id() else {
        return Ok(GATE_WIDTH);
    };
    let name = layout.gate(id).name();
    if matches!(name, "CNOT" | "SWAP") {
        return Ok(GATE_WIDTH);
    }
    let label = symbols::lookup(name)?.label;
    Ok(GATE_WIDTH.max(text_width(label, LABEL_FONT_SIZE) + LABEL_PADDING))
}

/// The SVG document of a laid out circuit.
pub fn figure_source(layout: &CircuitLayout, scale: f64) -> Result<String> {
    let renderer = FigureRenderer::new(layout)?;
    let mut canvas = SvgCanvas::new(renderer.width(), renderer.height(), scale);
    renderer.draw(&mut canvas)?;
    Ok(canvas.finish())
}

/// Rasterizes an SVG document to PNG with `rsvg-convert`.
pub fn render_image(svg: &str, options: &FigureOptions) -> Result<Image> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("circuit.svg"), svg)?;

    let dpi = options.dpi.to_string();
    toolchain::run_tool(
        "rsvg-convert",
        &[
            "--format=png",
            "--dpi-x",
            &dpi,
            "--dpi-y",
            &dpi,
            "--output=circuit.png",
            "circuit.svg",
        ],
        dir.path(),
        options.tool_timeout,
    )?;

    let bytes = std::fs::read(dir.path().join("circuit.png"))?;
    debug!("figure rendered to {} bytes of PNG", bytes.len());
    Ok(Image::from_png(bytes))
}
