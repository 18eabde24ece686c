// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.


use crate::{
    circuit::Circuit,
    error::{Error, Result},
    figure::{self, FigureOptions},
    gate::ParsedCircuit,
    latex::{self, DocumentOptions, DocumentSourceBuilder},
    layout::CircuitLayout,
    text::{self, TextDiagram, TextOptions},
    toolchain::Image,
};
use log::debug;
use std::{fmt::Display, str::FromStr};

/// What [`circuit_drawer`] produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputMode {
    /// Monospace diagram printed to standard output.
    #[default]
    Text,
    /// Typeset qcircuit document, compiled to a PNG image.
    Document,
    /// The qcircuit document source.
    DocumentSource,
    /// Vector figure rasterized to a PNG image.
    Figure,
    /// The SVG source of the figure.
    FigureSource,
}

impl OutputMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::Text => "text",
            OutputMode::Document => "latex",
            OutputMode::DocumentSource => "latex_source",
            OutputMode::Figure => "figure",
            OutputMode::FigureSource => "svg",
        }
    }
}

impl FromStr for OutputMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputMode::Text),
            "latex" | "document" => Ok(OutputMode::Document),
            "latex_source" | "document_source" => Ok(OutputMode::DocumentSource),
            "mpl" | "figure" => Ok(OutputMode::Figure),
            "svg" | "figure_source" => Ok(OutputMode::FigureSource),
            _ => Err(Error::UnsupportedOutputMode(s.to_string())),
        }
    }
}

impl Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for every output mode; each mode reads its own part.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawOptions {
    pub text: TextOptions,
    pub document: DocumentOptions,
    pub figure: FigureOptions,
}

/// The result of [`circuit_drawer`].
#[derive(Debug, PartialEq)]
pub enum DrawOutput {
    /// The diagram went to standard output.
    Printed,
    /// Markup, for the source modes.
    Source(String),
    Image(Image),
}

/// Draws `circuit` in the requested `mode`.
///
/// Text mode prints the diagram and returns [`DrawOutput::Printed`]; the
/// source modes return the generated markup, and the image modes run the
/// external tools and return the resulting image.
pub fn circuit_drawer(circuit: &Circuit, mode: OutputMode, options: &DrawOptions) -> Result<DrawOutput> {
    debug!("drawing a {}-qubit circuit as {mode}", circuit.qubit_count);
    match mode {
        OutputMode::Text => {
            print!("{}", draw_text(circuit, &options.text)?);
            Ok(DrawOutput::Printed)
        }
        OutputMode::Document => render_document(circuit, &options.document).map(DrawOutput::Image),
        OutputMode::DocumentSource => {
            document_source(circuit, &options.document).map(DrawOutput::Source)
        }
        OutputMode::Figure => render_figure(circuit, &options.figure).map(DrawOutput::Image),
        OutputMode::FigureSource => figure_source(circuit, &options.figure).map(DrawOutput::Source),
    }
}

/// Parses the circuit, refusing one that has nothing to draw.
fn parse(circuit: &Circuit) -> Result<ParsedCircuit> {
    let parsed = ParsedCircuit::parse(circuit)?;
    if parsed.is_empty() || parsed.qubit_count() == 0 {
        return Err(Error::EmptyCircuit);
    }
    Ok(parsed)
}

fn layout(circuit: &Circuit) -> Result<CircuitLayout> {
    CircuitLayout::from_parsed(&parse(circuit)?)
}

/// The monospace diagram of `circuit`, ready to be printed.
pub fn draw_text(circuit: &Circuit, options: &TextOptions) -> Result<TextDiagram> {
    text::render(&parse(circuit)?, options)
}

pub fn document_source(circuit: &Circuit, options: &DocumentOptions) -> Result<String> {
    let layout = layout(circuit)?;
    DocumentSourceBuilder::new(&layout)
        .with_scale(options.scale)
        .build()
}

pub fn render_document(circuit: &Circuit, options: &DocumentOptions) -> Result<Image> {
    latex::render_image(&document_source(circuit, options)?, options)
}

pub fn figure_source(circuit: &Circuit, options: &FigureOptions) -> Result<String> {
    figure::figure_source(&layout(circuit)?, options.scale)
}

pub fn render_figure(circuit: &Circuit, options: &FigureOptions) -> Result<Image> {
    figure::render_image(&figure_source(circuit, options)?, options)
}
