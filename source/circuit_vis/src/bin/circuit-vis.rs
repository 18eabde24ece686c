// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Draws a circuit described in JSON.
//!
//! ```bash
//! circuit-vis bell.json
//! circuit-vis bell.json --output latex_source --out bell.tex
//! circuit-vis bell.json --output figure --dpi 300 --out bell.png
//! ```

use circuit_vis::{
    Circuit, ControlDotStyle, DrawOptions, DrawOutput, Error, OutputMode, circuit_drawer,
};
use clap::Parser;
use log::info;
use std::{
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

/// Image written when no `--out` path is given.
const DEFAULT_IMAGE_PATH: &str = "circuit.png";

#[derive(Parser)]
#[command(name = "circuit-vis")]
#[command(about = "Draw a quantum circuit as text, a qcircuit document or a figure")]
#[command(version)]
struct Cli {
    /// Circuit description in JSON, e.g. `{"qubitCount": 1, "gates": [{"name": "H", "targets": [0]}]}`
    input: PathBuf,

    /// One of `text`, `latex`, `latex_source`, `figure` or `svg`
    #[arg(short, long, default_value = "text")]
    output: OutputMode,

    /// Where sources and images are written; sources go to stdout by default
    #[arg(long)]
    out: Option<PathBuf>,

    /// Show each gate's position in the text diagram
    #[arg(short, long)]
    verbose: bool,

    /// Control dot for the text diagram, `large` or `small`
    #[arg(long, default_value = "large")]
    dot: ControlDotStyle,

    /// Page width of the text diagram; detected from `COLUMNS` when omitted
    #[arg(long)]
    page_width: Option<usize>,

    /// Resolution of rendered images
    #[arg(long, default_value = "150")]
    dpi: u32,

    /// Scale factor for documents and figures
    #[arg(long, default_value = "1.0")]
    scale: f64,

    /// Seconds each external tool may run
    #[arg(long, default_value = "60")]
    timeout: u64,
}

impl Cli {
    fn draw_options(&self) -> DrawOptions {
        let mut options = DrawOptions::default();
        options.text.verbose = self.verbose;
        options.text.control_dot = self.dot;
        options.text.page_width = self.page_width;
        options.document.dpi = self.dpi;
        options.document.scale = self.scale;
        options.document.tool_timeout = Duration::from_secs(self.timeout);
        options.figure.dpi = self.dpi;
        options.figure.scale = self.scale;
        options.figure.tool_timeout = Duration::from_secs(self.timeout);
        options
    }
}

fn main() -> miette::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let json = std::fs::read_to_string(&cli.input).map_err(Error::Io)?;
    let circuit = Circuit::from_json(&json)?;

    match circuit_drawer(&circuit, cli.output, &cli.draw_options())? {
        DrawOutput::Printed => {}
        DrawOutput::Source(source) => match &cli.out {
            Some(path) => write_file(path, source.as_bytes())?,
            None => std::io::stdout()
                .write_all(source.as_bytes())
                .map_err(Error::Io)?,
        },
        DrawOutput::Image(image) => {
            let path = cli
                .out
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_PATH));
            image.save(&path)?;
            match image.dimensions() {
                Some((width, height)) => {
                    info!("wrote {width}x{height} image to {}", path.display());
                }
                None => info!("wrote image to {}", path.display()),
            }
        }
    }
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), Error> {
    std::fs::write(path, contents)?;
    info!("wrote {}", path.display());
    Ok(())
}
