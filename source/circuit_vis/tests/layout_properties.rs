// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use circuit_vis::{
    CircuitLayout, ControlQubit, DocumentSourceBuilder, GateRecord, LayoutCell,
    figure::FigureRenderer,
};
use proptest::prelude::*;

const MAX_QUBITS: usize = 6;

proptest! {
    #[test]
    fn rows_have_equal_length((qubit_count, gates) in arbitrary_circuit()) {
        let layout = CircuitLayout::build(gates, qubit_count).expect("wires are in range");
        for row in layout.rows() {
            prop_assert_eq!(row.len(), layout.layer_count());
        }
    }

    #[test]
    fn every_gate_is_placed_once_in_one_layer((qubit_count, gates) in arbitrary_circuit()) {
        let layout = CircuitLayout::build(gates, qubit_count).expect("wires are in range");
        for (id, gate) in layout.gates().iter().enumerate() {
            let layers: Vec<usize> = (0..layout.layer_count())
                .filter(|&layer| layout.cell(gate.primary(), layer) == LayoutCell::Occupied(id))
                .collect();
            prop_assert_eq!(layers.len(), 1);
            let layer = layers[0];

            let occupied = (0..qubit_count)
                .flat_map(|wire| (0..layout.layer_count()).map(move |layer| (wire, layer)))
                .filter(|&(wire, layer)| layout.cell(wire, layer) == LayoutCell::Occupied(id))
                .count();
            prop_assert_eq!(occupied, 1);

            let ghosts: Vec<usize> = (0..qubit_count)
                .filter(|&wire| layout.cell(wire, layer) == LayoutCell::Ghost(id))
                .collect();
            prop_assert_eq!(ghosts.len(), gate.targets().len() - 1);

            // Nothing else shares the gate's span in its layer.
            let (min, max) = gate.span();
            for wire in min..=max {
                let cell = layout.cell(wire, layer);
                prop_assert!(cell.gate_id().is_none_or(|other| other == id));
                prop_assert_eq!(layout.owner(wire, layer), Some(id));
            }
        }
    }

    #[test]
    fn gates_on_shared_wires_keep_their_order((qubit_count, gates) in arbitrary_circuit()) {
        let layout = CircuitLayout::build(gates, qubit_count).expect("wires are in range");
        let layer_of = |id: usize| {
            (0..layout.layer_count())
                .find(|&layer| layout.gates_in_layer(layer).contains(&id))
                .expect("every gate is placed")
        };
        for (later, gate) in layout.gates().iter().enumerate() {
            let (min, max) = gate.span();
            for (earlier, other) in layout.gates()[..later].iter().enumerate() {
                let (other_min, other_max) = other.span();
                if other_min <= max && min <= other_max {
                    prop_assert!(layer_of(earlier) < layer_of(later));
                }
            }
        }
    }

    #[test]
    fn no_layer_is_empty((qubit_count, gates) in arbitrary_circuit()) {
        let layout = CircuitLayout::build(gates, qubit_count).expect("wires are in range");
        for layer in 0..layout.layer_count() {
            prop_assert!(!layout.gates_in_layer(layer).is_empty());
        }
    }

    #[test]
    fn layout_is_deterministic((qubit_count, gates) in arbitrary_circuit()) {
        let first = CircuitLayout::build(gates.clone(), qubit_count).expect("wires are in range");
        let second = CircuitLayout::build(gates, qubit_count).expect("wires are in range");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn document_has_a_cell_per_wire_and_layer((qubit_count, gates) in arbitrary_circuit()) {
        prop_assume!(!gates.is_empty());
        let layout = CircuitLayout::build(gates, qubit_count).expect("wires are in range");
        let cells = DocumentSourceBuilder::new(&layout).cells().expect("gates are drawable");
        prop_assert_eq!(cells.len(), qubit_count);
        for row in cells {
            prop_assert_eq!(row.len(), layout.layer_count());
        }
    }

    #[test]
    fn figure_layers_advance_left_to_right((qubit_count, gates) in arbitrary_circuit()) {
        prop_assume!(!gates.is_empty());
        let layout = CircuitLayout::build(gates, qubit_count).expect("wires are in range");
        let renderer = FigureRenderer::new(&layout).expect("gates are drawable");
        for layer in 1..layout.layer_count() {
            prop_assert!(renderer.layer_x(layer - 1) < renderer.layer_x(layer));
        }
        prop_assert!(renderer.width() > renderer.layer_x(layout.layer_count() - 1));
    }
}

fn arbitrary_circuit() -> impl Strategy<Value = (usize, Vec<GateRecord>)> {
    (1..=MAX_QUBITS).prop_flat_map(|qubit_count| {
        (
            Just(qubit_count),
            proptest::collection::vec(arbitrary_gate(qubit_count), 0..12),
        )
    })
}

/// A gate on distinct wires: at least one target, the rest of the chosen
/// wires as controls.
fn arbitrary_gate(qubit_count: usize) -> impl Strategy<Value = GateRecord> {
    (
        Just((0..qubit_count).collect::<Vec<_>>()).prop_shuffle(),
        1..=qubit_count,
        any::<usize>(),
        proptest::collection::vec(0u8..=1, qubit_count),
        proptest::sample::select(vec!["H", "X", "Z", "DenseMatrix"]),
    )
        .prop_map(|(wires, used, split, values, name)| {
            let wires = &wires[..used];
            let target_count = 1 + split % used;
            let controls = wires[target_count..]
                .iter()
                .zip(values)
                .map(|(&index, value)| ControlQubit::new(index, value))
                .collect();
            GateRecord::new(name, wires[..target_count].to_vec(), controls)
        })
}
