// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Quantum circuit diagrams.
//!
//! A [`Circuit`] is parsed into [`GateRecord`]s, arranged into layers by
//! [`CircuitLayout`], and drawn as monospace text, as a qcircuit LaTeX
//! document, or as a vector figure. [`circuit_drawer`] picks the renderer
//! from an [`OutputMode`].

mod circuit;
mod drawer;
mod error;
pub mod figure;
mod gate;
pub mod latex;
mod layout;
pub mod symbols;
pub mod text;
pub mod toolchain;

pub use circuit::{Circuit, ControlQubit, GateDescription};
pub use drawer::{
    DrawOptions, DrawOutput, OutputMode, circuit_drawer, document_source, draw_text,
    figure_source, render_document, render_figure,
};
pub use error::{Error, Result};
pub use figure::FigureOptions;
pub use gate::{GateRecord, ParsedCircuit};
pub use latex::{DocumentOptions, DocumentSourceBuilder};
pub use layout::{CircuitLayout, GateId, LayoutCell};
pub use text::{ControlDotStyle, TextDiagram, TextOptions};
pub use toolchain::Image;
