//! # imgfit
//!
//! Batch image normalizer. Walks a directory tree and rewrites every image
//! in place: true-color RGB, a single container format, and both dimensions
//! within a bounding size on the longer edge. Images smaller than the bound
//! can optionally be grown first through an external super-resolution tool.
//!
//! # Pipeline
//!
//! ```text
//! walk  →  probe (header bytes)  →  process per file:
//!            skip test → [upscale] → flatten RGB → resize → encode → replace
//! ```
//!
//! Processing is strictly sequential and stateless across files: each file
//! is read fresh from disk, decided on, and replaced (or skipped) before the
//! next one is looked at. A failure on one file is reported and the walk
//! continues; only configuration errors (bad root, missing upscaler
//! executable) abort the run.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`probe`] | classifies files as images from their header bytes |
//! | [`pipeline`] | per-file decision engine: skip / upscale / resize / convert / replace |
//! | [`upscale`] | subprocess adapter for the external super-resolution tool |
//! | [`walk`] | recursive sequential traversal with per-file failure isolation |
//! | [`config`] | per-run configuration and startup validation |
//! | [`output`] | per-file status lines and the run summary |
//!
//! # Replacement Safety
//!
//! Superseded files (the original when the extension changes, the upscale
//! intermediate) are deleted only after the replacement is confirmed
//! written. An interrupted run can therefore lose at most the single file
//! being written at that moment.

pub mod config;
pub mod output;
pub mod pipeline;
pub mod probe;
pub mod upscale;
pub mod walk;
