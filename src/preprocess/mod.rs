//! Binarization of color captures.
//!
//! The pipeline is: luma conversion, a global Otsu threshold used as a floor,
//! a local mean threshold from a summed-area table, polarity normalization so
//! ink is always the minority class, isolated-pixel removal, and a radius-1
//! opening.

use crate::image::binary::{BinaryImage, BACKGROUND, INK};
use crate::image::gray::LumaImage;
use crate::image::integral::IntegralImage;
use crate::trace::{trace_event, trace_span};
use crate::util::{OcrError, OcrResult};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::borrow::Cow;

/// Fraction of the Otsu threshold used as a floor for the local threshold.
const GLOBAL_FLOOR_RATIO: f64 = 0.6;
/// Offset subtracted from the local mean.
const LOCAL_OFFSET: f64 = 10.0;
const MIN_WINDOW: usize = 15;
const MAX_WINDOW: usize = 45;

/// Configuration for recognition-time preprocessing.
#[derive(Clone, Debug)]
pub struct PreprocessConfig {
    /// Nearest-neighbor upscale applied to captures before binarization.
    /// Values at or below 1.0 disable it.
    pub upscale: f32,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self { upscale: 1.5 }
    }
}

/// Otsu's threshold: the intensity maximizing between-class variance.
///
/// Pixels `<= t` form the dark class. Ties keep the lowest `t`; a histogram
/// without two populated classes yields 128.
pub fn otsu_threshold(histogram: &[u32; 256]) -> u8 {
    let total: f64 = histogram.iter().map(|&c| f64::from(c)).sum();
    let sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * f64::from(c))
        .sum();

    let mut sum_b = 0.0;
    let mut w_b = 0.0;
    let mut max_var = 0.0;
    let mut threshold = 128u8;
    for (i, &count) in histogram.iter().enumerate() {
        let count = f64::from(count);
        w_b += count;
        if w_b == 0.0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f == 0.0 {
            break;
        }
        sum_b += i as f64 * count;
        let m_b = sum_b / w_b;
        let m_f = (sum - sum_b) / w_f;
        let variance = w_b * w_f * (m_b - m_f) * (m_b - m_f);
        if variance > max_var {
            max_var = variance;
            threshold = i as u8;
        }
    }
    threshold
}

/// Odd local window size of roughly a tenth of the shorter side, in `[15, 45]`.
pub fn adaptive_window_size(width: usize, height: usize) -> usize {
    let base = (width.min(height) as f64 / 10.0).round() as usize;
    let window = base.clamp(MIN_WINDOW, MAX_WINDOW);
    if window % 2 == 0 {
        window + 1
    } else {
        window
    }
}

/// Marks a pixel as ink when it is at most
/// `max(global * 0.6, local_mean - 10)`; the window is clamped at the edges.
pub fn adaptive_threshold(gray: &LumaImage, window: usize, global: u8) -> OcrResult<BinaryImage> {
    let (width, height) = (gray.width(), gray.height());
    let integral = IntegralImage::from_view(gray.view());
    let half = window / 2;
    let floor = f64::from(global) * GLOBAL_FLOOR_RATIO;

    let mut out = Vec::with_capacity(width * height);
    for (y, row) in gray.view().rows().enumerate() {
        let y1 = y.saturating_sub(half);
        let y2 = (y + half).min(height - 1);
        for (x, &value) in row.iter().enumerate() {
            let x1 = x.saturating_sub(half);
            let x2 = (x + half).min(width - 1);
            let count = ((x2 - x1 + 1) * (y2 - y1 + 1)) as f64;
            let mean = integral.rect_sum(x1, y1, x2, y2) as f64 / count;
            let limit = floor.max(mean - LOCAL_OFFSET);
            out.push(if f64::from(value) <= limit { INK } else { BACKGROUND });
        }
    }
    BinaryImage::from_luma(out, width, height)
}

/// Binarizes a capture at its native resolution.
pub fn binarize(rgba: &RgbaImage) -> OcrResult<BinaryImage> {
    let _span = trace_span!("preprocess", width = rgba.width(), height = rgba.height()).entered();

    let gray = LumaImage::from_rgba(rgba)?;
    binarize_luma(&gray)
}

/// Binarizes an already converted grayscale image.
pub fn binarize_luma(gray: &LumaImage) -> OcrResult<BinaryImage> {
    let global = otsu_threshold(gray.histogram());
    let window = adaptive_window_size(gray.width(), gray.height());
    let mut binary = adaptive_threshold(gray, window, global)?;

    let total = binary.width() * binary.height();
    let inverted = binary.ink_count() * 2 > total;
    if inverted {
        binary.invert();
    }
    trace_event!(
        "binarized",
        otsu = global,
        window = window,
        inverted = inverted
    );

    Ok(binary.remove_isolated_pixels().open(1))
}

/// Applies the configured nearest-neighbor upscale.
pub fn upscale<'a>(rgba: &'a RgbaImage, cfg: &PreprocessConfig) -> OcrResult<Cow<'a, RgbaImage>> {
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(OcrError::InvalidDimensions {
            width: rgba.width() as usize,
            height: rgba.height() as usize,
        });
    }
    if cfg.upscale <= 1.0 {
        return Ok(Cow::Borrowed(rgba));
    }
    let width = (rgba.width() as f32 * cfg.upscale) as u32;
    let height = (rgba.height() as f32 * cfg.upscale) as u32;
    Ok(Cow::Owned(imageops::resize(
        rgba,
        width.max(1),
        height.max(1),
        FilterType::Nearest,
    )))
}
