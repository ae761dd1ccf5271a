//! External super-resolution adapter.
//!
//! Invokes the configured upscaler as `<exe> -i <input> -o <output>` with an
//! argument vector — no shell, so paths never need quoting or escaping. The
//! tool's stdio is discarded. Its exit code is not trusted: several popular
//! upscalers exit zero on failure, so the existence of the output file is the
//! only success signal. There are no retries and no timeout; a hung
//! subprocess blocks the run (known limitation).

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpscaleError {
    #[error("failed to run upscaler {exe}: {source}")]
    Spawn {
        exe: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("upscaler produced no output at {0}")]
    MissingOutput(PathBuf),
}

/// Run the upscaler once, blocking until it exits.
pub fn upscale(input: &Path, output: &Path, exe: &Path) -> Result<(), UpscaleError> {
    let status = Command::new(exe)
        .arg("-i")
        .arg(input)
        .arg("-o")
        .arg(output)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|source| UpscaleError::Spawn {
            exe: exe.to_path_buf(),
            source,
        })?;

    // Exit code recorded for nothing; the output file decides.
    let _ = status;
    if output.is_file() {
        Ok(())
    } else {
        Err(UpscaleError::MissingOutput(output.to_path_buf()))
    }
}
