// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::*;
use crate::circuit::ControlQubit;
use expect_test::expect;

fn gate(name: &str, targets: &[usize], controls: &[(usize, u8)]) -> GateRecord {
    GateRecord::new(
        name,
        targets.to_vec(),
        controls
            .iter()
            .map(|&(index, value)| ControlQubit::new(index, value))
            .collect(),
    )
}

fn layout(gates: Vec<GateRecord>, qubit_count: usize) -> CircuitLayout {
    CircuitLayout::build(gates, qubit_count).expect("layout should build")
}

#[test]
fn bell_circuit_document() {
    let layout = layout(vec![gate("H", &[0], &[]), gate("CNOT", &[1], &[(0, 1)])], 2);
    let source = DocumentSourceBuilder::new(&layout)
        .build()
        .expect("source should build");

    expect![[r#"
        \documentclass[border=2px]{standalone}
        \usepackage[braket, qm]{qcircuit}
        \usepackage{graphicx}

        \begin{document}
        \scalebox{1.0}{
        \Qcircuit @C=1.0em @R=0.2em @!R { \\
        \nghost{ q_{0} : } & \lstick{ q_{0} : } & \gate{H} & \ctrl{1} & \qw \\
        \nghost{ q_{1} : } & \lstick{ q_{1} : } & \qw & \targ & \qw
        \\ }}
        \end{document}
    "#]]
    .assert_eq(&source);
}

#[test]
fn scale_is_written_into_the_scalebox() {
    let layout = layout(vec![gate("X", &[0], &[])], 1);
    let source = DocumentSourceBuilder::new(&layout)
        .with_scale(0.5)
        .build()
        .expect("source should build");
    assert!(source.contains(r"\scalebox{0.5}{"), "{source}");
}

#[test]
fn separated_target_runs_are_joined() {
    let layout = layout(vec![gate("DenseMatrix", &[0, 3, 4], &[(1, 1)])], 5);
    let body = DocumentSourceBuilder::new(&layout)
        .circuit_body()
        .expect("body should build");

    expect![[r#"
        \nghost{ q_{0} : } & \lstick{ q_{0} : } & \multigate{0}{DeM} \qwx[3] & \qw \\
        \nghost{ q_{1} : } & \lstick{ q_{1} : } & \ctrl{-1} & \qw \\
        \nghost{ q_{2} : } & \lstick{ q_{2} : } & \qw & \qw \\
        \nghost{ q_{3} : } & \lstick{ q_{3} : } & \multigate{1}{DeM} & \qw \\
        \nghost{ q_{4} : } & \lstick{ q_{4} : } & \ghost{DeM} & \qw"#]]
    .assert_eq(&body);
}

#[test]
fn swap_and_open_control() {
    let layout = layout(
        vec![gate("SWAP", &[2, 0], &[]), gate("Sdag", &[0], &[(1, 0)])],
        3,
    );
    let cells = DocumentSourceBuilder::new(&layout)
        .cells()
        .expect("cells should build");

    assert_eq!(
        cells,
        vec![
            vec![r"\qswap \qwx[2]".to_string(), r"\gate{S^\dag}".to_string()],
            vec![r"\qw".to_string(), r"\ctrlo{-1}".to_string()],
            vec![r"\qswap".to_string(), r"\qw".to_string()],
        ]
    );
}

#[test]
fn every_wire_has_one_cell_per_layer() {
    let layout = layout(
        vec![
            gate("X", &[1], &[]),
            gate("CZ", &[2], &[(0, 1)]),
            gate("X", &[1], &[]),
            gate("CNOT", &[2], &[(0, 1)]),
            gate("X", &[1], &[]),
            gate("SWAP", &[0, 1], &[]),
        ],
        3,
    );
    let cells = DocumentSourceBuilder::new(&layout)
        .cells()
        .expect("cells should build");

    assert_eq!(cells.len(), 3);
    for row in &cells {
        assert_eq!(row.len(), layout.layer_count());
    }
}

#[test]
fn uncontrolled_cnot_is_missing_control_data() {
    let layout = layout(vec![gate("CNOT", &[0], &[])], 1);
    let err = DocumentSourceBuilder::new(&layout)
        .build()
        .expect_err("CNOT without controls cannot be drawn");
    assert!(matches!(err, Error::MissingControlData { gate } if gate == "CNOT"));
}

#[test]
fn unknown_gate_name_is_reported() {
    let layout = layout(vec![gate("Mystery", &[0], &[])], 1);
    let err = DocumentSourceBuilder::new(&layout)
        .build()
        .expect_err("Mystery has no symbol");
    assert!(matches!(err, Error::UnknownGateName(name) if name == "Mystery"));
}

#[test]
fn empty_layout_is_empty_circuit() {
    let layout = layout(vec![], 2);
    let err = DocumentSourceBuilder::new(&layout)
        .build()
        .expect_err("nothing to draw");
    assert!(matches!(err, Error::EmptyCircuit));
}
