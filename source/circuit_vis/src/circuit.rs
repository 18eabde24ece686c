// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#[cfg(test)]
mod tests;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Representation of a quantum circuit as handed over by the SDK:
/// a qubit count and the gates in insertion order.
#[derive(Clone, Serialize, Deserialize, Default, Debug, PartialEq, Eq)]
pub struct Circuit {
    #[serde(rename = "qubitCount")]
    pub qubit_count: usize,
    #[serde(default)]
    pub gates: Vec<GateDescription>,
}

/// One gate application, exactly as reported by the SDK.
/// Nothing is validated here; see [`crate::ParsedCircuit`].
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct GateDescription {
    pub name: String,
    #[serde(default)]
    pub targets: Vec<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub controls: Vec<ControlQubit>,
}

/// A control qubit and the value it must hold for the gate to act.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct ControlQubit {
    pub index: usize,
    #[serde(rename = "controlValue")]
    #[serde(default = "ControlQubit::default_value")]
    pub value: u8,
}

impl ControlQubit {
    #[must_use]
    pub fn new(index: usize, value: u8) -> Self {
        Self { index, value }
    }

    fn default_value() -> u8 {
        1
    }
}

impl Circuit {
    #[must_use]
    pub fn new(qubit_count: usize) -> Self {
        Self {
            qubit_count,
            gates: vec![],
        }
    }

    /// Reads a circuit from its JSON form, e.g.
    /// `{"qubitCount": 2, "gates": [{"name": "H", "targets": [0]}]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::InvalidCircuitJson)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::CircuitSerialization)
    }

    pub fn add_gate(&mut self, name: &str, targets: &[usize], controls: &[ControlQubit]) {
        self.gates.push(GateDescription {
            name: name.to_string(),
            targets: targets.to_vec(),
            controls: controls.to_vec(),
        });
    }

    pub fn add_x(&mut self, target: usize) {
        self.add_gate("X", &[target], &[]);
    }

    pub fn add_y(&mut self, target: usize) {
        self.add_gate("Y", &[target], &[]);
    }

    pub fn add_z(&mut self, target: usize) {
        self.add_gate("Z", &[target], &[]);
    }

    pub fn add_h(&mut self, target: usize) {
        self.add_gate("H", &[target], &[]);
    }

    pub fn add_cnot(&mut self, control: usize, target: usize) {
        self.add_gate("CNOT", &[target], &[ControlQubit::new(control, 1)]);
    }

    pub fn add_cz(&mut self, control: usize, target: usize) {
        self.add_gate("CZ", &[target], &[ControlQubit::new(control, 1)]);
    }

    pub fn add_swap(&mut self, first: usize, second: usize) {
        self.add_gate("SWAP", &[first, second], &[]);
    }

    /// The SDK reports a Toffoli gate as a controlled dense matrix gate.
    pub fn add_toffoli(&mut self, first_control: usize, second_control: usize, target: usize) {
        self.add_gate(
            "DenseMatrix",
            &[target],
            &[
                ControlQubit::new(first_control, 1),
                ControlQubit::new(second_control, 1),
            ],
        );
    }

    pub fn add_dense_matrix(&mut self, targets: &[usize]) {
        self.add_gate("DenseMatrix", targets, &[]);
    }
}
