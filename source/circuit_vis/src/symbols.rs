// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::error::{Error, Result};
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

/// How a gate kind is drawn by each renderer.
#[derive(Debug, PartialEq, Eq)]
pub struct GateSymbol {
    /// Gate name as reported by the SDK.
    pub name: &'static str,
    /// Abbreviation of at most three characters for the text renderer.
    pub text: &'static str,
    /// Symbol used inside qcircuit commands.
    pub latex: &'static str,
    /// Label drawn inside figure boxes.
    pub label: &'static str,
}

impl GateSymbol {
    /// The abbreviation centred in the three columns of a text gate box.
    #[must_use]
    pub fn text_label(&self) -> String {
        format!("{:^3}", self.text)
    }
}

macro_rules! symbol {
    ($name:literal, $text:literal) => {
        symbol!($name, $text, $text, $text)
    };
    ($name:literal, $text:literal, $latex:literal, $label:literal) => {
        GateSymbol {
            name: $name,
            text: $text,
            latex: $latex,
            label: $label,
        }
    };
}

static GATE_SYMBOLS: &[GateSymbol] = &[
    symbol!("I", "I"),
    symbol!("X", "X"),
    symbol!("Y", "Y"),
    symbol!("Z", "Z"),
    symbol!("H", "H"),
    symbol!("S", "S"),
    symbol!("Sdag", "Sdg", r"S^\dag", "S†"),
    symbol!("T", "T"),
    symbol!("Tdag", "Tdg", r"T^\dag", "T†"),
    symbol!("sqrtX", "sqX", r"\sqrt{X}", "√X"),
    symbol!("sqrtXdag", "sXd", r"\sqrt{X^\dag}", "√X†"),
    symbol!("sqrtY", "sqY", r"\sqrt{Y}", "√Y"),
    symbol!("sqrtYdag", "sYd", r"\sqrt{Y^\dag}", "√Y†"),
    symbol!("Projection-0", "P0"),
    symbol!("Projection-1", "P1"),
    symbol!("U1", "U1"),
    symbol!("U2", "U2"),
    symbol!("U3", "U3"),
    symbol!("X-rotation", "RX"),
    symbol!("Y-rotation", "RY"),
    symbol!("Z-rotation", "RZ"),
    symbol!("Pauli", "Pau", "Pauli", "Pauli"),
    symbol!("Pauli-rotation", "PR"),
    symbol!("CZ", "CZ"),
    symbol!("CNOT", "CX", r"\targ", "X"),
    symbol!("SWAP", "SWP", "SWAP", "SWAP"),
    symbol!("Reflection", "Ref"),
    symbol!("ReversibleBoolean", "ReB"),
    symbol!("DenseMatrix", "DeM"),
    symbol!("DiagonalMatrix", "DiM"),
    symbol!("SparseMatrix", "SpM"),
    symbol!("Generic gate", "GeG"),
    symbol!("ParametricRX", "pRX"),
    symbol!("ParametricRY", "pRY"),
    symbol!("ParametricRZ", "pRZ"),
    symbol!("ParametricPauliRotation", "pPR"),
];

static SYMBOL_TABLE: LazyLock<FxHashMap<&'static str, &'static GateSymbol>> =
    LazyLock::new(|| GATE_SYMBOLS.iter().map(|s| (s.name, s)).collect());

/// Looks up how the gate `name` is drawn.
pub fn lookup(name: &str) -> Result<&'static GateSymbol> {
    SYMBOL_TABLE
        .get(name)
        .copied()
        .ok_or_else(|| Error::UnknownGateName(name.to_string()))
}

/// All known gate symbols, in table order.
#[must_use]
pub fn all() -> &'static [GateSymbol] {
    GATE_SYMBOLS
}
