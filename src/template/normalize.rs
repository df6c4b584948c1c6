//! Fixed-size glyph normalization.

use crate::image::binary::BinaryImage;
use crate::util::OcrResult;

/// Fraction of the target box a normalized glyph may fill.
const FILL_RATIO: f64 = 0.85;

/// Scales `glyph` into a `size x size` canvas, preserving aspect ratio.
///
/// The scale is `min(size/w, size/h) * 0.85`, the result is centered, and
/// sampling is nearest-neighbor with source coordinates clamped to the
/// glyph bounds. Uncovered pixels are background.
pub fn normalize_glyph(glyph: &BinaryImage, size: usize) -> OcrResult<BinaryImage> {
    let (width, height) = (glyph.width(), glyph.height());
    let scale = (size as f64 / width as f64).min(size as f64 / height as f64) * FILL_RATIO;
    let new_w = ((width as f64 * scale).floor() as usize).clamp(1, size);
    let new_h = ((height as f64 * scale).floor() as usize).clamp(1, size);
    let off_x = (size - new_w) / 2;
    let off_y = (size - new_h) / 2;

    let mut out = BinaryImage::blank(size, size)?;
    for y in 0..new_h {
        let src_y = ((y as f64 / scale).floor() as usize).min(height - 1);
        for x in 0..new_w {
            let src_x = ((x as f64 / scale).floor() as usize).min(width - 1);
            if glyph.is_ink(src_x, src_y) {
                out.set_ink(x + off_x, y + off_y, true);
            }
        }
    }
    Ok(out)
}
