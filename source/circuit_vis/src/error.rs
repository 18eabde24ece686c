// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use miette::Diagnostic;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    #[error("unknown gate name `{0}`")]
    #[diagnostic(code("CircuitVis.UnknownGateName"))]
    #[diagnostic(help("only the gates listed in the gate symbol table can be drawn"))]
    UnknownGateName(String),

    #[error("gate `{gate}` has no control qubits to draw")]
    #[diagnostic(code("CircuitVis.MissingControlData"))]
    MissingControlData { gate: String },

    #[error("circuit has no gates to draw")]
    #[diagnostic(code("CircuitVis.EmptyCircuit"))]
    #[diagnostic(help("add at least one gate with a target qubit before drawing"))]
    EmptyCircuit,

    #[error("gate at position {position} is invalid: {reason}")]
    #[diagnostic(code("CircuitVis.InvalidGate"))]
    InvalidGate { position: usize, reason: String },

    #[error("gate `{gate}` acts on qubit {wire}, but the circuit only has {qubit_count} qubits")]
    #[diagnostic(code("CircuitVis.WireOutOfRange"))]
    WireOutOfRange {
        gate: String,
        wire: usize,
        qubit_count: usize,
    },

    #[error("`{tool}` was not found")]
    #[diagnostic(code("CircuitVis.ToolNotFound"))]
    #[diagnostic(help("install `{tool}` and make sure it is on PATH"))]
    ToolNotFound { tool: String },

    #[error("`{tool}` failed")]
    #[diagnostic(code("CircuitVis.ToolFailed"))]
    ToolFailed { tool: String, output: String },

    #[error("`{tool}` did not finish within {timeout:?}")]
    #[diagnostic(code("CircuitVis.ToolTimedOut"))]
    ToolTimedOut { tool: String, timeout: Duration },

    #[error("unsupported output mode `{0}`")]
    #[diagnostic(code("CircuitVis.UnsupportedOutputMode"))]
    #[diagnostic(help(
        "use one of `text`, `latex`, `latex_source`, `figure` or `svg`"
    ))]
    UnsupportedOutputMode(String),

    #[error("circuit description is not valid JSON")]
    #[diagnostic(code("CircuitVis.InvalidCircuitJson"))]
    InvalidCircuitJson(#[source] serde_json::Error),

    #[error("circuit could not be written as JSON")]
    #[diagnostic(code("CircuitVis.CircuitSerialization"))]
    CircuitSerialization(#[source] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code("CircuitVis.Io"))]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the captured output of a failed external tool, if any.
    #[must_use]
    pub fn tool_output(&self) -> Option<&str> {
        match self {
            Error::ToolFailed { output, .. } => Some(output.as_str()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
