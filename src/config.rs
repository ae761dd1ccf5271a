//! Per-run processing configuration.
//!
//! A [`ProcessingConfig`] is built once from CLI arguments and read-only for
//! the rest of the run. [`ProcessingConfig::validate`] is the single place
//! where configuration errors surface; they are the only errors that abort
//! the whole run instead of a single file.

use clap::ValueEnum;
use image::ImageFormat;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("input root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("upscaler executable not found: {0}")]
    UpscalerNotFound(PathBuf),
}

/// Target container format for normalized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Jpeg,
    Png,
}

impl OutputFormat {
    /// The extension written to disk, and the one a file must already carry
    /// to count as normalized.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Png => ImageFormat::Png,
        }
    }
}

/// Quality setting for lossy image encoding (0-100). Clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// When an on-disk file counts as already normalized.
///
/// Both policies additionally require the target format, extension and
/// true-color mode; they differ only in the dimension test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SkipPolicy {
    /// Skip once both dimensions fit within the bound.
    #[default]
    Bounded,
    /// Skip only once one dimension sits exactly on the bound, i.e. the
    /// file has been resized (or upscaled) to touch it.
    Exact,
}

/// Immutable per-run configuration for the transform pipeline.
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    /// Bounding dimension in pixels, applied to the longer edge.
    pub max_size: u32,
    pub format: OutputFormat,
    pub quality: Quality,
    /// External super-resolution executable. When set, images smaller than
    /// the bound on both edges are enlarged before the final resize.
    pub upscaler: Option<PathBuf>,
    pub skip_policy: SkipPolicy,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            max_size: 1024,
            format: OutputFormat::Jpeg,
            quality: Quality::default(),
            upscaler: None,
            skip_policy: SkipPolicy::Bounded,
        }
    }
}

impl ProcessingConfig {
    /// Check the run can start at all: the root must be a directory and a
    /// configured upscaler must exist on disk.
    pub fn validate(&self, root: &Path) -> Result<(), ConfigError> {
        if !root.is_dir() {
            return Err(ConfigError::NotADirectory(root.to_path_buf()));
        }
        if let Some(exe) = &self.upscaler
            && !exe.is_file()
        {
            return Err(ConfigError::UpscalerNotFound(exe.clone()));
        }
        Ok(())
    }
}
