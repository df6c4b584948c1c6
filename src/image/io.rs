//! Loading captures and dumping glyphs via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::binary::BinaryImage;
use crate::segment::Glyph;
use crate::util::{OcrError, OcrResult};
use image::{GrayImage, RgbaImage};
use std::path::{Path, PathBuf};

fn io_error(err: impl std::fmt::Display) -> OcrError {
    OcrError::ImageIo {
        reason: err.to_string(),
    }
}

/// Loads an image from disk as RGBA.
pub fn load_rgba_image<P: AsRef<Path>>(path: P) -> OcrResult<RgbaImage> {
    let img = image::open(path).map_err(io_error)?;
    Ok(img.to_rgba8())
}

/// Converts a binary image to an 8-bit grayscale buffer (ink is black).
pub fn to_gray_image(img: &BinaryImage) -> OcrResult<GrayImage> {
    GrayImage::from_raw(img.width() as u32, img.height() as u32, img.data().to_vec()).ok_or(
        OcrError::BufferTooSmall {
            needed: img.width() * img.height(),
            got: img.data().len(),
        },
    )
}

/// Writes each glyph to `dir/glyph_<index>.png` and returns the paths.
pub fn save_glyphs<P: AsRef<Path>>(dir: P, glyphs: &[Glyph]) -> OcrResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(io_error)?;
    glyphs
        .iter()
        .enumerate()
        .map(|(idx, glyph)| {
            let path = dir.join(format!("glyph_{idx:02}.png"));
            to_gray_image(&glyph.image)?.save(&path).map_err(io_error)?;
            Ok(path)
        })
        .collect()
}
