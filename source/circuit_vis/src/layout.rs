// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::{
    error::Result,
    gate::{GateRecord, ParsedCircuit},
};
use log::debug;
use std::fmt::{Display, Write};

/// Index of a gate in [`CircuitLayout::gates`].
pub type GateId = usize;

/// What a wire shows at one layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutCell {
    /// The wire is the primary target of the gate and carries its label.
    Occupied(GateId),
    /// The wire is a further target of the gate.
    Ghost(GateId),
    /// Plain wire. Control wires and wires crossed by a gate's connector
    /// are idle too; ask [`CircuitLayout::owner`] for the gate.
    Idle,
}

impl LayoutCell {
    #[must_use]
    pub fn gate_id(self) -> Option<GateId> {
        match self {
            LayoutCell::Occupied(id) | LayoutCell::Ghost(id) => Some(id),
            LayoutCell::Idle => None,
        }
    }
}

/// Gates arranged into layers, one row of cells per wire.
///
/// Every row has the same length, the layer count. Gates are packed to the
/// left: each one lands in the first layer after everything already placed
/// on the wires of its span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CircuitLayout {
    qubit_count: usize,
    gates: Vec<GateRecord>,
    cells: Vec<Vec<LayoutCell>>,
}

impl CircuitLayout {
    /// Arranges `gates` into layers.
    ///
    /// # Arguments
    ///
    /// * `gates` - The gate records, in circuit order.
    /// * `qubit_count` - The number of wires.
    ///
    /// # Returns
    ///
    /// The layout, [`crate::Error::InvalidGate`] for a gate without targets
    /// or with a repeated wire, or [`crate::Error::WireOutOfRange`] if a gate
    /// touches a wire outside `0..qubit_count`.
    pub fn build(gates: Vec<GateRecord>, qubit_count: usize) -> Result<Self> {
        for (position, gate) in gates.iter().enumerate() {
            gate.validate(position, qubit_count)?;
        }

        let mut lines: Vec<Vec<LayoutCell>> = vec![vec![]; qubit_count];
        for (id, gate) in gates.iter().enumerate() {
            let (min_wire, max_wire) = gate.span();

            // The gate's cells have to share one column across its span.
            align_layers(&mut lines, min_wire, max_wire);

            for (wire, line) in lines
                .iter_mut()
                .enumerate()
                .take(max_wire + 1)
                .skip(min_wire)
            {
                let cell = if wire == gate.primary() {
                    LayoutCell::Occupied(id)
                } else if gate.targets().contains(&wire) {
                    LayoutCell::Ghost(id)
                } else {
                    LayoutCell::Idle
                };
                line.push(cell);
            }
        }

        // Wires that fell behind, or never saw a gate, run to the end.
        if qubit_count > 0 {
            align_layers(&mut lines, 0, qubit_count - 1);
        }

        let layout = Self {
            qubit_count,
            gates,
            cells: lines,
        };
        debug!(
            "laid out {} gates on {} wires in {} layers",
            layout.gates.len(),
            layout.qubit_count,
            layout.layer_count()
        );
        Ok(layout)
    }

    /// Arranges the gates of an already parsed circuit.
    pub fn from_parsed(circuit: &ParsedCircuit) -> Result<Self> {
        Self::build(circuit.gates().to_vec(), circuit.qubit_count())
    }

    #[must_use]
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Number of layers; zero for a layout without wires or gates.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layer_count() == 0
    }

    #[must_use]
    pub fn gates(&self) -> &[GateRecord] {
        &self.gates
    }

    #[must_use]
    pub fn gate(&self, id: GateId) -> &GateRecord {
        &self.gates[id]
    }

    #[must_use]
    pub fn cell(&self, wire: usize, layer: usize) -> LayoutCell {
        self.cells[wire][layer]
    }

    /// The cells of one wire, left to right.
    #[must_use]
    pub fn row(&self, wire: usize) -> &[LayoutCell] {
        &self.cells[wire]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[LayoutCell]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Gates placed in `layer`, ordered by their primary wire.
    #[must_use]
    pub fn gates_in_layer(&self, layer: usize) -> Vec<GateId> {
        self.cells
            .iter()
            .filter_map(|row| match row[layer] {
                LayoutCell::Occupied(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    /// The gate whose span covers `wire` in `layer`, if any.
    #[must_use]
    pub fn owner(&self, wire: usize, layer: usize) -> Option<GateId> {
        self.gates_in_layer(layer).into_iter().find(|&id| {
            let (min, max) = self.gates[id].span();
            (min..=max).contains(&wire)
        })
    }

    /// The gate controlled by `wire` in `layer`, with the control value.
    #[must_use]
    pub fn control_at(&self, wire: usize, layer: usize) -> Option<(GateId, u8)> {
        self.owner(wire, layer)
            .and_then(|id| self.gates[id].control_value(wire).map(|value| (id, value)))
    }

    fn fmt_cell(&self, wire: usize, layer: usize) -> String {
        match self.cell(wire, layer) {
            LayoutCell::Occupied(id) => self.gates[id].name().to_string(),
            LayoutCell::Ghost(_) => "ghost".to_string(),
            LayoutCell::Idle => match self.control_at(wire, layer) {
                Some((_, 0)) => "○".to_string(),
                Some(_) => "●".to_string(),
                None if self.owner(wire, layer).is_some() => "│".to_string(),
                None => "─".to_string(),
            },
        }
    }
}

impl Display for CircuitLayout {
    /// One line per wire, cells padded to the widest cell of their layer.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let columns: Vec<Vec<String>> = (0..self.layer_count())
            .map(|layer| {
                (0..self.qubit_count)
                    .map(|wire| self.fmt_cell(wire, layer))
                    .collect()
            })
            .collect();
        let widths: Vec<usize> = columns
            .iter()
            .map(|col| col.iter().map(|s| s.chars().count()).max().unwrap_or(1))
            .collect();

        for wire in 0..self.qubit_count {
            let mut s = format!("q_{wire}");
            for (column, &width) in columns.iter().zip(&widths) {
                let _ = write!(&mut s, "  {:<width$}", column[wire]);
            }
            writeln!(f, "{}", s.trim_end())?;
        }
        Ok(())
    }
}

/// Pads the wires `min_wire..=max_wire` with idle cells until they are all
/// as long as the longest of them. Reversed bounds are swapped.
///
/// # Arguments
///
/// * `lines` - The cells of every wire so far.
/// * `min_wire` - First wire to align.
/// * `max_wire` - Last wire to align (inclusive).
fn align_layers(lines: &mut [Vec<LayoutCell>], min_wire: usize, max_wire: usize) {
    let (min_wire, max_wire) = if min_wire > max_wire {
        (max_wire, min_wire)
    } else {
        (min_wire, max_wire)
    };
    let lines = &mut lines[min_wire..=max_wire];
    let max_layer_count = lines.iter().map(Vec::len).max().unwrap_or(0);

    for line in lines {
        line.resize(max_layer_count, LayoutCell::Idle);
    }
}
