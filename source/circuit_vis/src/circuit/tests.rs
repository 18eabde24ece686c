// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::*;
use indoc::indoc;

#[test]
fn json_fills_in_defaults() {
    let circuit = Circuit::from_json(indoc! {r#"
        {
            "qubitCount": 3,
            "gates": [
                { "name": "X", "targets": [2], "controls": [{ "index": 0 }] },
                { "name": "Z", "targets": [1], "controls": [{ "index": 2, "controlValue": 0 }] },
                { "name": "Instrument" }
            ]
        }
    "#})
    .expect("json should parse");

    assert_eq!(circuit.qubit_count, 3);
    assert_eq!(circuit.gates.len(), 3);
    assert_eq!(circuit.gates[0].controls, vec![ControlQubit::new(0, 1)]);
    assert_eq!(circuit.gates[1].controls, vec![ControlQubit::new(2, 0)]);
    assert!(circuit.gates[2].targets.is_empty());
    assert!(circuit.gates[2].controls.is_empty());
}

#[test]
fn json_without_gates_is_an_empty_circuit() {
    let circuit = Circuit::from_json(r#"{"qubitCount": 4}"#).expect("json should parse");
    assert_eq!(circuit, Circuit::new(4));
}

#[test]
fn malformed_json_is_reported() {
    let err = Circuit::from_json(r#"{"gates": []}"#).expect_err("qubitCount is required");
    assert!(matches!(err, Error::InvalidCircuitJson(_)));
}

#[test]
fn json_round_trip() {
    let mut circuit = Circuit::new(3);
    circuit.add_h(0);
    circuit.add_cnot(0, 1);
    circuit.add_gate("Z", &[2], &[ControlQubit::new(1, 0)]);

    let json = circuit.to_json().expect("circuit should serialize");
    assert_eq!(Circuit::from_json(&json).expect("json should parse"), circuit);
}

#[test]
fn uncontrolled_gates_serialize_without_controls() {
    let mut circuit = Circuit::new(1);
    circuit.add_x(0);
    let json = circuit.to_json().expect("circuit should serialize");
    assert!(!json.contains("controls"), "{json}");
    assert!(json.contains(r#""qubitCount": 1"#), "{json}");
}

#[test]
fn builder_helpers_use_sdk_names() {
    let mut circuit = Circuit::new(3);
    circuit.add_x(0);
    circuit.add_y(1);
    circuit.add_z(2);
    circuit.add_cz(0, 1);
    circuit.add_swap(1, 2);
    circuit.add_dense_matrix(&[0, 2]);

    let names: Vec<&str> = circuit.gates.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["X", "Y", "Z", "CZ", "SWAP", "DenseMatrix"]);
    assert_eq!(circuit.gates[3].targets, vec![1]);
    assert_eq!(circuit.gates[3].controls, vec![ControlQubit::new(0, 1)]);
    assert_eq!(circuit.gates[4].targets, vec![1, 2]);
    assert_eq!(circuit.gates[5].targets, vec![0, 2]);
}

#[test]
fn toffoli_is_a_doubly_controlled_dense_matrix() {
    let mut circuit = Circuit::new(3);
    circuit.add_toffoli(0, 1, 2);

    let gate = &circuit.gates[0];
    assert_eq!(gate.name, "DenseMatrix");
    assert_eq!(gate.targets, vec![2]);
    assert_eq!(
        gate.controls,
        vec![ControlQubit::new(0, 1), ControlQubit::new(1, 1)]
    );
}

#[test]
fn reading_and_writing_errors_are_told_apart() {
    let source = || serde_json::from_str::<u8>("x").expect_err("x is not a number");
    let reading = Error::InvalidCircuitJson(source()).to_string();
    let writing = Error::CircuitSerialization(source()).to_string();
    assert_eq!(writing, "circuit could not be written as JSON");
    assert_ne!(reading, writing);
}
