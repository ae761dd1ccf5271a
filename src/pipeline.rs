//! The per-image transform pipeline.
//!
//! One call to [`process`] takes one file from its on-disk state to its
//! normalized state, or leaves it alone. The decision sequence:
//!
//! 1. Decode and inspect (dimensions, color mode, container format).
//! 2. Skip test per [`SkipPolicy`] — a normalized file is untouched.
//! 3. Optional upscale: images smaller than the bound on both edges are
//!    enlarged through the external tool into a lossless PNG intermediate,
//!    so the final lossy encode happens only once.
//! 4. Flatten to 8-bit RGB (alpha composited over white).
//! 5. Aspect-preserving resize against the bound on the longer edge
//!    (Lanczos3).
//! 6. Encode to the target format and delete superseded files, strictly
//!    after the new file is written.
//!
//! Every failure is caught and folded into [`Outcome::Failed`]; nothing a
//! single file does can abort the walk.

use crate::config::{OutputFormat, ProcessingConfig, SkipPolicy};
use crate::upscale::{self, UpscaleError};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageFormat, ImageReader, Rgb, RgbImage};
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("unreadable file: {0}")]
    Unreadable(std::io::Error),
    #[error("unsupported or corrupt image: {0}")]
    Decode(String),
    #[error(transparent)]
    Upscale(#[from] UpscaleError),
    #[error("encode or write failed: {0}")]
    Write(String),
}

/// What happened to a single file.
#[derive(Debug)]
pub enum Outcome {
    /// Already normalized; the file was not touched.
    Skipped,
    /// Not a recognized image; the file was not touched.
    SkippedNonImage,
    /// Could not be read for classification; the file was not touched.
    SkippedUnreadable(String),
    Processed { width: u32, height: u32 },
    UpscaledProcessed { width: u32, height: u32 },
    Failed(PipelineError),
}

/// Normalize one image file in place.
pub fn process(path: &Path, config: &ProcessingConfig) -> Outcome {
    match run(path, config) {
        Ok(outcome) => outcome,
        Err(e) => Outcome::Failed(e),
    }
}

fn run(path: &Path, config: &ProcessingConfig) -> Result<Outcome, PipelineError> {
    let (img, format) = open(path)?;

    if satisfies_target(&img, format, path, config) {
        return Ok(Outcome::Skipped);
    }

    let mut img = img;
    let mut working = path.to_path_buf();
    let mut upscaled = false;

    if let Some(exe) = &config.upscaler
        && img.width() < config.max_size
        && img.height() < config.max_size
    {
        let enlarged = intermediate_path(path);
        upscale::upscale(path, &enlarged, exe)?;
        // The enlarged copy supersedes the original from here on.
        fs::remove_file(path)
            .map_err(|e| PipelineError::Write(format!("removing {}: {e}", path.display())))?;
        img = open(&enlarged)?.0;
        working = enlarged;
        upscaled = true;
    }

    let (new_w, new_h) = fit_dimensions(img.width(), img.height(), config.max_size);
    let rgb = flatten_to_rgb(img);
    let rgb = if (rgb.width(), rgb.height()) != (new_w, new_h) {
        image::imageops::resize(&rgb, new_w, new_h, FilterType::Lanczos3)
    } else {
        rgb
    };

    let output = path.with_extension(config.format.extension());
    encode(&rgb, &output, config)?;

    // Delete only after the replacement is confirmed on disk, so an
    // interrupted run loses at most the file being written.
    if working != output {
        fs::remove_file(&working)
            .map_err(|e| PipelineError::Write(format!("removing {}: {e}", working.display())))?;
    }

    Ok(if upscaled {
        Outcome::UpscaledProcessed {
            width: new_w,
            height: new_h,
        }
    } else {
        Outcome::Processed {
            width: new_w,
            height: new_h,
        }
    })
}

/// Decode an image, guessing the container format from content.
fn open(path: &Path) -> Result<(DynamicImage, Option<ImageFormat>), PipelineError> {
    let reader = ImageReader::open(path)
        .map_err(PipelineError::Unreadable)?
        .with_guessed_format()
        .map_err(PipelineError::Unreadable)?;
    let format = reader.format();
    let img = reader
        .decode()
        .map_err(|e| PipelineError::Decode(format!("{}: {e}", path.display())))?;
    Ok((img, format))
}

/// The skip test: format, extension and color mode must all match the
/// target, and dimensions must satisfy the configured policy.
fn satisfies_target(
    img: &DynamicImage,
    format: Option<ImageFormat>,
    path: &Path,
    config: &ProcessingConfig,
) -> bool {
    let bound = config.max_size;
    let size_done = match config.skip_policy {
        SkipPolicy::Bounded => img.width() <= bound && img.height() <= bound,
        SkipPolicy::Exact => img.width() == bound || img.height() == bound,
    };
    size_done
        && format == Some(config.format.image_format())
        && extension_of(path) == config.format.extension()
        && img.color() == ColorType::Rgb8
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Where the upscaler writes its lossless intermediate.
fn intermediate_path(path: &Path) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("image");
    path.with_file_name(format!("{stem}-upscaled.png"))
}

/// Aspect-preserving fit against the bound on the longer edge.
///
/// Never grows: a dimension already within the bound stays put. The shorter
/// edge rounds to the nearest pixel, clamped to at least 1.
pub fn fit_dimensions(width: u32, height: u32, bound: u32) -> (u32, u32) {
    let ratio = width as f64 / height as f64;
    if ratio >= 1.0 {
        let new_w = bound.min(width);
        let new_h = ((new_w as f64 / ratio).round() as u32).max(1);
        (new_w, new_h)
    } else {
        let new_h = bound.min(height);
        let new_w = ((new_h as f64 * ratio).round() as u32).max(1);
        (new_w, new_h)
    }
}

/// Flatten any color mode to 8-bit RGB, exactly once per asset.
///
/// Transparent pixels are composited over white. Dropping the alpha channel
/// instead would expose whatever color the encoder stored under transparent
/// areas, which is usually black.
fn flatten_to_rgb(img: DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }
    let rgba = img.to_rgba8();
    let mut rgb = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, px) in rgba.enumerate_pixels() {
        let a = px[3] as u32;
        let blend = |c: u8| ((c as u32 * a + 255 * (255 - a)) / 255) as u8;
        rgb.put_pixel(x, y, Rgb([blend(px[0]), blend(px[1]), blend(px[2])]));
    }
    rgb
}

fn encode(img: &RgbImage, path: &Path, config: &ProcessingConfig) -> Result<(), PipelineError> {
    let file = fs::File::create(path)
        .map_err(|e| PipelineError::Write(format!("creating {}: {e}", path.display())))?;
    let writer = BufWriter::new(file);
    let result = match config.format {
        OutputFormat::Jpeg => {
            img.write_with_encoder(JpegEncoder::new_with_quality(writer, config.quality.value()))
        }
        OutputFormat::Png => img.write_with_encoder(PngEncoder::new(writer)),
    };
    result.map_err(|e| PipelineError::Write(format!("encoding {}: {e}", path.display())))
}
