// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::*;

fn record(targets: &[usize], controls: &[(usize, u8)]) -> GateRecord {
    GateRecord::new(
        "DenseMatrix",
        targets.to_vec(),
        controls
            .iter()
            .map(|&(index, value)| ControlQubit::new(index, value))
            .collect(),
    )
}

#[test]
fn span_covers_targets_and_controls() {
    let gate = record(&[3], &[(0, 1), (5, 0)]);
    assert_eq!(gate.span(), (0, 5));
    assert_eq!(gate.target_span(), (3, 3));
    assert_eq!(gate.primary(), 3);
}

#[test]
fn span_of_uncontrolled_gate_is_target_span() {
    let gate = record(&[4, 1, 2], &[]);
    assert_eq!(gate.span(), (1, 4));
    assert_eq!(gate.target_span(), (1, 4));
    assert_eq!(gate.primary(), 4);
}

#[test]
fn targets_split_into_adjacent_runs() {
    let gate = record(&[3, 0, 1, 5, 4], &[]);
    assert_eq!(gate.target_groups(), vec![vec![0, 1], vec![3, 4, 5]]);
    assert_eq!(record(&[2], &[]).target_groups(), vec![vec![2]]);
    assert_eq!(record(&[0, 2, 4], &[]).target_groups(), vec![vec![0], vec![2], vec![4]]);
}

#[test]
fn control_values_are_looked_up_by_wire() {
    let gate = record(&[0], &[(1, 1), (2, 0)]);
    assert!(gate.is_controlled());
    assert_eq!(gate.control_value(1), Some(1));
    assert_eq!(gate.control_value(2), Some(0));
    assert_eq!(gate.control_value(0), None);
    assert_eq!(gate.wires().collect::<Vec<_>>(), vec![0, 1, 2]);
}

#[test]
fn require_controls_fails_without_controls() {
    let gate = GateRecord::new("CNOT", vec![1], vec![]);
    let err = gate.require_controls().expect_err("CNOT needs a control");
    assert!(matches!(err, Error::MissingControlData { gate } if gate == "CNOT"));

    let gate = GateRecord::new("CNOT", vec![1], vec![ControlQubit::new(0, 1)]);
    assert_eq!(gate.require_controls().expect("has a control").len(), 1);
}

#[test]
fn parse_skips_gates_without_targets() {
    let mut circuit = Circuit::new(2);
    circuit.add_h(0);
    circuit.add_gate("Instrument", &[], &[]);
    circuit.add_cnot(0, 1);

    let parsed = ParsedCircuit::parse(&circuit).expect("circuit should parse");
    assert_eq!(parsed.qubit_count(), 2);
    assert_eq!(parsed.gates().len(), 2);
    let positions: Vec<(usize, &str)> = parsed
        .iter_with_positions()
        .map(|(position, gate)| (position, gate.name()))
        .collect();
    assert_eq!(positions, vec![(0, "H"), (2, "CNOT")]);
}

#[test]
fn parse_of_untargeted_circuit_is_empty() {
    let mut circuit = Circuit::new(1);
    circuit.add_gate("Instrument", &[], &[]);
    let parsed = ParsedCircuit::parse(&circuit).expect("circuit should parse");
    assert!(parsed.is_empty());
    assert!(parsed.into_gates().is_empty());
}

#[test]
fn parse_rejects_repeated_wire() {
    let mut circuit = Circuit::new(3);
    circuit.add_x(0);
    circuit.add_gate("X", &[1], &[ControlQubit::new(1, 1)]);

    let err = ParsedCircuit::parse(&circuit).expect_err("qubit 1 is used twice");
    assert!(
        matches!(&err, Error::InvalidGate { position: 1, reason } if reason.contains("qubit 1")),
        "{err:?}"
    );
}

#[test]
fn parse_rejects_bad_control_value() {
    let mut circuit = Circuit::new(2);
    circuit.add_gate("X", &[0], &[ControlQubit::new(1, 2)]);

    let err = ParsedCircuit::parse(&circuit).expect_err("control value 2 is invalid");
    assert!(matches!(err, Error::InvalidGate { position: 0, .. }), "{err:?}");
}

#[test]
fn parse_rejects_wire_outside_circuit() {
    let mut circuit = Circuit::new(2);
    circuit.add_cnot(3, 1);

    let err = ParsedCircuit::parse(&circuit).expect_err("qubit 3 does not exist");
    assert!(
        matches!(
            &err,
            Error::WireOutOfRange { gate, wire: 3, qubit_count: 2 } if gate == "CNOT"
        ),
        "{err:?}"
    );
}

#[test]
fn swap_needs_two_targets() {
    let mut circuit = Circuit::new(3);
    circuit.add_x(1);
    circuit.add_gate("SWAP", &[0], &[]);
    let err = ParsedCircuit::parse(&circuit).expect_err("one target cannot be swapped");
    assert!(
        matches!(&err, Error::InvalidGate { position: 1, reason } if reason.contains("SWAP")),
        "{err:?}"
    );

    let mut circuit = Circuit::new(3);
    circuit.add_gate("SWAP", &[0, 1, 2], &[]);
    let err = ParsedCircuit::parse(&circuit).expect_err("three targets cannot be swapped");
    assert!(matches!(err, Error::InvalidGate { position: 0, .. }), "{err:?}");

    let mut circuit = Circuit::new(3);
    circuit.add_swap(0, 2);
    assert_eq!(ParsedCircuit::parse(&circuit).expect("swap of two wires").gates().len(), 1);
}
