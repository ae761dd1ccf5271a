//! Recursive directory traversal.
//!
//! One file at a time, strictly sequential, in filesystem enumeration
//! order. The walker classifies each regular file with the prober and hands
//! recognized images to the pipeline. Every per-file problem — unreadable
//! entry, non-image, pipeline failure — becomes an [`Outcome`] in the
//! report stream; nothing aborts the walk.

use crate::config::ProcessingConfig;
use crate::pipeline::{self, Outcome};
use crate::probe;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One walked file and what happened to it.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Lazily walk `root`, yielding one report per regular file.
pub fn walk<'a>(
    root: &Path,
    config: &'a ProcessingConfig,
) -> impl Iterator<Item = FileReport> + 'a {
    let root = root.to_path_buf();
    WalkDir::new(root.clone()).into_iter().filter_map(move |entry| {
        match entry {
            Ok(entry) if entry.file_type().is_file() => {
                let path = entry.into_path();
                let outcome = match probe::classify(&path) {
                    Ok(Some(_)) => pipeline::process(&path, config),
                    Ok(None) => Outcome::SkippedNonImage,
                    Err(e) => Outcome::SkippedUnreadable(e.to_string()),
                };
                Some(FileReport { path, outcome })
            }
            Ok(_) => None,
            // Unreadable directory entries are reported, not fatal.
            Err(e) => {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.clone());
                Some(FileReport {
                    path,
                    outcome: Outcome::SkippedUnreadable(e.to_string()),
                })
            }
        }
    })
}
