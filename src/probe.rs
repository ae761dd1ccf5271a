//! Image format sniffing.
//!
//! Classification reads the file's leading bytes, never its extension, so a
//! mislabelled `.txt` holding JPEG data is still processed and a `.jpg`
//! holding HTML is not.

use image::ImageFormat;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes read from the head of a file for detection. Every magic number the
/// `image` crate recognizes sits well within this window.
const SNIFF_LEN: usize = 64;

/// Classify a file by its header bytes.
///
/// Returns `Ok(None)` for readable files that are not a recognized image
/// format. I/O errors (missing file, permission denied) propagate to the
/// caller, which treats them as a skip rather than a fatal condition.
pub fn classify(path: &Path) -> std::io::Result<Option<ImageFormat>> {
    let mut file = File::open(path)?;
    let mut header = [0u8; SNIFF_LEN];
    let mut filled = 0;
    while filled < SNIFF_LEN {
        let n = file.read(&mut header[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(image::guess_format(&header[..filled]).ok())
}
