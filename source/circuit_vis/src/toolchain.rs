// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Running the external programs that turn markup into images.


use crate::error::{Error, Result};
use log::{debug, trace};
use std::{
    fs::File,
    io::ErrorKind,
    path::Path,
    process::{Command, ExitStatus, Stdio},
    thread,
    time::{Duration, Instant},
};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// An encoded raster image produced by an external tool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    bytes: Vec<u8>,
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

impl Image {
    #[must_use]
    pub fn from_png(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Pixel width and height read from the PNG header, if the bytes are a
    /// PNG image.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        // Signature, then the IHDR chunk: length, type, width, height.
        let header = self.bytes.get(..24)?;
        if header[..8] != PNG_SIGNATURE || &header[12..16] != b"IHDR" {
            return None;
        }
        let width = u32::from_be_bytes(header[16..20].try_into().ok()?);
        let height = u32::from_be_bytes(header[20..24].try_into().ok()?);
        Some((width, height))
    }

    /// Writes the encoded image to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Runs `program` in `working_dir` and waits for it to exit.
///
/// The program's stdout and stderr are collected in files next to its
/// inputs and attached to [`Error::ToolFailed`] when it exits unsuccessfully.
/// A program still running after `timeout` is killed.
pub fn run_tool(program: &str, args: &[&str], working_dir: &Path, timeout: Duration) -> Result<()> {
    let stdout_path = working_dir.join(format!("{program}.stdout"));
    let stderr_path = working_dir.join(format!("{program}.stderr"));

    debug!("running `{program}` with {args:?} in {}", working_dir.display());
    let mut child = Command::new(program)
        .args(args)
        .current_dir(working_dir)
        .stdin(Stdio::null())
        .stdout(File::create(&stdout_path)?)
        .stderr(File::create(&stderr_path)?)
        .spawn()
        .map_err(|err| match err.kind() {
            ErrorKind::NotFound => Error::ToolNotFound {
                tool: program.to_string(),
            },
            _ => Error::Io(err),
        })?;

    let started = Instant::now();
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if started.elapsed() >= timeout {
            // The process may exit between the poll and the kill.
            let _ = child.kill();
            let _ = child.wait();
            return Err(Error::ToolTimedOut {
                tool: program.to_string(),
                timeout,
            });
        }
        thread::sleep(POLL_INTERVAL);
    };
    trace!("`{program}` exited with {status} after {:?}", started.elapsed());

    if status.success() {
        return Ok(());
    }
    Err(Error::ToolFailed {
        tool: program.to_string(),
        output: captured_output(status, &stdout_path, &stderr_path),
    })
}

fn captured_output(status: ExitStatus, stdout_path: &Path, stderr_path: &Path) -> String {
    let stdout = std::fs::read_to_string(stdout_path).unwrap_or_default();
    let stderr = std::fs::read_to_string(stderr_path).unwrap_or_default();

    let mut output = format!("{status}\n");
    for stream in [stdout.trim_end(), stderr.trim_end()] {
        if !stream.is_empty() {
            output.push_str(stream);
            output.push('\n');
        }
    }
    output
}
