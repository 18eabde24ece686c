// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! ASCII art for a single gate.
//!
//! A glyph is seven columns wide and four rows tall per wire, starting at
//! the topmost wire the gate touches. Taking a controlled gate as an
//! example:
//!
//! ```text
//!   0123456
//! 0             control wire, blank above the rest row
//! 1
//! 2    ●        control dot on the control wire's rest row
//! 3    |        connector down to the target box
//! 4   _|_       box top, entered by the connector
//! 5  | X |      gate name
//! 6 -|   |-     target wire's rest row
//! 7  |___|      box bottom
//! ```

use crate::{
    error::Result,
    gate::GateRecord,
    symbols::{self, GateSymbol},
};

pub(super) const GLYPH_WIDTH: usize = 7;
pub(super) const WIRE_HEIGHT: usize = 4;

pub(super) type GlyphRow = [char; GLYPH_WIDTH];

const BLANK: &str = "       ";
const VERTICAL: &str = "   |   ";

const HEAD: &str = "  ___  ";
const HEAD_WITH_CONTROL: &str = "  _|_  ";
const BODY: &str = " |   | ";
const BODY_WITH_WIRE: &str = "-|   |-";
const NARROWING: &str = " |_ _| ";
const WIDENING: &str = " _| |_ ";
const NARROW_BODY: &str = "  | |  ";
const NARROW_BODY_WITH_WIRE: &str = "--| |--";
const BOTTOM: &str = " |___| ";

const SWAP_END: &str = "---x---";
const SWAP_CROSSING: &str = "---|---";

fn row(s: &str) -> GlyphRow {
    let mut row = [' '; GLYPH_WIDTH];
    for (slot, ch) in row.iter_mut().zip(s.chars()) {
        *slot = ch;
    }
    row
}

/// Draws `gate`. When `index` is given its last three digits are printed
/// inside the box, zero-padded, so position 1234 shows as `234`.
pub(super) fn gate_glyph(gate: &GateRecord, index: Option<usize>, dot: char) -> Result<Vec<GlyphRow>> {
    let symbol = symbols::lookup(gate.name())?;

    let mut targets = gate.targets().to_vec();
    targets.sort_unstable();
    let mut controls: Vec<usize> = gate.controls().iter().map(|c| c.index).collect();
    controls.sort_unstable();

    let index = match index {
        Some(index) => format!("{:03}", index % 1000),
        None => "   ".to_string(),
    };

    let min_target = targets[0];
    let max_target = targets[targets.len() - 1];
    let has_upper_controls = controls.first().is_some_and(|&c| c < min_target);
    let has_lower_controls = controls.last().is_some_and(|&c| c > max_target);

    let mut glyph = Glyph {
        dot,
        rows: vec![],
    };
    if has_upper_controls {
        glyph.upper_controls(min_target, &controls);
    }
    glyph.targets(symbol, &targets, &index, has_upper_controls);

    let top_wire = controls.first().map_or(min_target, |&c| c.min(min_target));
    glyph.inner_controls(min_target, max_target, &controls, top_wire);

    if has_lower_controls {
        glyph.lower_controls(max_target, &controls);
    }
    Ok(glyph.rows)
}

struct Glyph {
    dot: char,
    rows: Vec<GlyphRow>,
}

impl Glyph {
    fn push(&mut self, s: &str) {
        self.rows.push(row(s));
    }

    fn dot_row(&self) -> GlyphRow {
        let mut row = row(BLANK);
        row[GLYPH_WIDTH / 2] = self.dot;
        row
    }

    /// Controls above the topmost target: a dot on each, joined by a
    /// connector running down into the box.
    fn upper_controls(&mut self, min_target: usize, controls: &[usize]) {
        let upper: Vec<usize> = controls.iter().copied().filter(|&c| c < min_target).collect();

        self.push(BLANK);
        self.push(BLANK);
        self.rows.push(self.dot_row());
        let distance = min_target - upper[0];
        for _ in 0..distance * WIRE_HEIGHT - 3 {
            self.push(VERTICAL);
        }

        for &control in &upper[1..] {
            let from_end = (min_target - control) * WIRE_HEIGHT - 2;
            let at = self.rows.len() - from_end;
            self.rows[at] = self.dot_row();
        }
    }

    fn targets(&mut self, symbol: &GateSymbol, targets: &[usize], index: &str, has_upper_controls: bool) {
        let min_target = targets[0];
        let gate_size = targets[targets.len() - 1] - min_target + 1;

        if symbol.name == "SWAP" {
            self.swap(gate_size, index);
            return;
        }

        self.push(if has_upper_controls {
            HEAD_WITH_CONTROL
        } else {
            HEAD
        });
        self.push(&format!(" |{}| ", symbol.text_label()));
        self.push(&format!("-|{index}|-"));

        for i in 1..gate_size * WIRE_HEIGHT - 3 {
            let wire = (i + 2) / WIRE_HEIGHT + min_target;
            let part = if targets.contains(&wire) {
                match i % WIRE_HEIGHT {
                    0 => BODY_WITH_WIRE,
                    1 if targets.contains(&(wire + 1)) => BODY,
                    1 => NARROWING,
                    2 if wire > 0 && targets.contains(&(wire - 1)) => BODY,
                    2 => WIDENING,
                    _ => BODY,
                }
            } else if i % WIRE_HEIGHT == 0 {
                NARROW_BODY_WITH_WIRE
            } else {
                NARROW_BODY
            };
            self.push(part);
        }
        self.push(BOTTOM);
    }

    /// Crosses on both swapped wires, joined by a connector.
    fn swap(&mut self, gate_size: usize, index: &str) {
        self.push(BLANK);
        self.push(&format!("  {index}  "));
        self.push(SWAP_END);
        for i in 1..(gate_size * WIRE_HEIGHT).saturating_sub(4) {
            self.push(if i % WIRE_HEIGHT == 0 {
                SWAP_CROSSING
            } else {
                VERTICAL
            });
        }
        self.push(SWAP_END);
        self.push(BLANK);
    }

    /// Controls strictly between two targets mark the middle of their rest
    /// row inside the box.
    fn inner_controls(&mut self, min_target: usize, max_target: usize, controls: &[usize], top_wire: usize) {
        for &control in controls.iter().filter(|&&c| c > min_target && c < max_target) {
            let at = (control - top_wire) * WIRE_HEIGHT + 2;
            if let Some(row) = self.rows.get_mut(at) {
                row[GLYPH_WIDTH / 2] = self.dot;
            }
        }
    }

    /// Controls below the bottom target: a connector hanging from the box
    /// down to the lowest control, with a dot on each control's rest row.
    fn lower_controls(&mut self, max_target: usize, controls: &[usize]) {
        let lower: Vec<usize> = controls.iter().copied().filter(|&c| c > max_target).collect();
        let distance = lower[lower.len() - 1] - max_target;

        for _ in 0..distance * WIRE_HEIGHT - 1 {
            self.push(VERTICAL);
        }
        for &control in &lower {
            let at = self.rows.len() - 1 - (distance - (control - max_target)) * WIRE_HEIGHT;
            self.rows[at] = self.dot_row();
        }
    }
}
