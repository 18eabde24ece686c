// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#[cfg(test)]
mod tests;

use crate::{
    circuit::{Circuit, ControlQubit},
    error::{Error, Result},
};
use log::warn;
use rustc_hash::FxHashSet;

/// A single gate application: its name, the wires it acts on and the
/// wires that control it.
///
/// The first target is the primary wire, which carries the gate's label.
/// Targets are never empty, and no wire appears twice across targets and
/// controls; [`ParsedCircuit::parse`] enforces both before a record reaches
/// the layout or any renderer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GateRecord {
    name: String,
    targets: Vec<usize>,
    controls: Vec<ControlQubit>,
}

impl GateRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, targets: Vec<usize>, controls: Vec<ControlQubit>) -> Self {
        Self {
            name: name.into(),
            targets,
            controls,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    #[must_use]
    pub fn controls(&self) -> &[ControlQubit] {
        &self.controls
    }

    #[must_use]
    pub fn primary(&self) -> usize {
        self.targets[0]
    }

    #[must_use]
    pub fn is_controlled(&self) -> bool {
        !self.controls.is_empty()
    }

    /// Returns the required value if `wire` is one of this gate's controls.
    #[must_use]
    pub fn control_value(&self, wire: usize) -> Option<u8> {
        self.controls
            .iter()
            .find(|c| c.index == wire)
            .map(|c| c.value)
    }

    /// All wires the gate touches, targets first.
    pub fn wires(&self) -> impl Iterator<Item = usize> + '_ {
        self.targets
            .iter()
            .copied()
            .chain(self.controls.iter().map(|c| c.index))
    }

    /// The inclusive wire range `(min, max)` covered by the gate's targets
    /// and controls, including untouched wires in between.
    #[must_use]
    pub fn span(&self) -> (usize, usize) {
        self.wires()
            .fold(None, |acc, x| match acc {
                None => Some((x, x)),
                Some((min, max)) => Some((min.min(x), max.max(x))),
            })
            .unwrap_or((0, 0))
    }

    /// The inclusive range `(min, max)` covered by the targets alone.
    #[must_use]
    pub fn target_span(&self) -> (usize, usize) {
        let min = self.targets.iter().copied().min().unwrap_or(0);
        let max = self.targets.iter().copied().max().unwrap_or(0);
        (min, max)
    }

    /// Splits the sorted targets into runs of adjacent wires.
    /// `[3, 0, 1, 5, 4]` becomes `[[0, 1], [3, 4, 5]]`.
    #[must_use]
    pub fn target_groups(&self) -> Vec<Vec<usize>> {
        let mut sorted = self.targets.clone();
        sorted.sort_unstable();

        let mut groups: Vec<Vec<usize>> = vec![];
        for wire in sorted {
            match groups.last_mut() {
                Some(group) if group.last().is_some_and(|&last| last + 1 == wire) => {
                    group.push(wire);
                }
                _ => groups.push(vec![wire]),
            }
        }
        groups
    }

    /// Fails with [`Error::MissingControlData`] for a gate that can only be
    /// drawn with its controls, such as the controlled-NOT target glyph.
    pub fn require_controls(&self) -> Result<&[ControlQubit]> {
        if self.controls.is_empty() {
            return Err(Error::MissingControlData {
                gate: self.name.clone(),
            });
        }
        Ok(&self.controls)
    }

    fn check_wires(&self, qubit_count: usize) -> Result<()> {
        match self.wires().find(|&wire| wire >= qubit_count) {
            Some(wire) => Err(Error::WireOutOfRange {
                gate: self.name.clone(),
                wire,
                qubit_count,
            }),
            None => Ok(()),
        }
    }

    /// Checks the record invariants and that every wire is below
    /// `qubit_count`. `position` names the gate in [`Error::InvalidGate`].
    pub(crate) fn validate(&self, position: usize, qubit_count: usize) -> Result<()> {
        if let Some(reason) = self.invalid_reason() {
            return Err(Error::InvalidGate { position, reason });
        }
        self.check_wires(qubit_count)
    }

    fn invalid_reason(&self) -> Option<String> {
        if self.targets.is_empty() {
            return Some("gate has no target qubits".to_string());
        }
        if self.name == "SWAP" && self.targets.len() != 2 {
            return Some(format!(
                "SWAP needs exactly 2 target qubits, got {}",
                self.targets.len()
            ));
        }
        let mut seen = FxHashSet::default();
        for wire in self.wires() {
            if !seen.insert(wire) {
                return Some(format!("qubit {wire} is used more than once"));
            }
        }
        self.controls
            .iter()
            .find(|c| c.value > 1)
            .map(|c| format!("control value {} on qubit {} is not 0 or 1", c.value, c.index))
    }
}

/// The gate records of a circuit, ready for layout and rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedCircuit {
    qubit_count: usize,
    gates: Vec<GateRecord>,
    /// Position of each record in the original gate sequence.
    positions: Vec<usize>,
}

impl ParsedCircuit {
    /// Translates the SDK circuit into gate records, in insertion order.
    ///
    /// Gates without target qubits (e.g. probabilistic instruments) cannot be
    /// drawn; they are skipped with a warning and the rest of the circuit is
    /// processed unaffected.
    pub fn parse(circuit: &Circuit) -> Result<Self> {
        let mut gates = vec![];
        let mut positions = vec![];

        for (position, gate) in circuit.gates.iter().enumerate() {
            if gate.targets.is_empty() {
                warn!(
                    "gate {position} (`{}`) is skipped because it has no target qubits",
                    gate.name
                );
                continue;
            }

            let record = GateRecord::new(
                gate.name.clone(),
                gate.targets.clone(),
                gate.controls.clone(),
            );
            record.validate(position, circuit.qubit_count)?;

            gates.push(record);
            positions.push(position);
        }

        Ok(Self {
            qubit_count: circuit.qubit_count,
            gates,
            positions,
        })
    }

    #[must_use]
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    #[must_use]
    pub fn gates(&self) -> &[GateRecord] {
        &self.gates
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Gate records paired with their position in the original sequence.
    pub fn iter_with_positions(&self) -> impl Iterator<Item = (usize, &GateRecord)> {
        self.positions.iter().copied().zip(self.gates.iter())
    }

    #[must_use]
    pub fn into_gates(self) -> Vec<GateRecord> {
        self.gates
    }
}
