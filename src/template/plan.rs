//! Precomputed glyph features for matching.

use crate::image::binary::BinaryImage;
use crate::template::normalize::normalize_glyph;
use crate::template::GLYPH_SIZE;
use crate::util::{OcrError, OcrResult};

/// A normalized glyph together with the features the matcher compares.
///
/// Both templates and captured glyphs are reduced to this form, so the
/// matcher only ever compares like with like.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphPlan {
    pattern: BinaryImage,
    density: f32,
    h_profile: [f32; GLYPH_SIZE],
    v_profile: [f32; GLYPH_SIZE],
    holes: usize,
}

impl GlyphPlan {
    /// Normalizes a cropped glyph and extracts its features.
    pub fn from_glyph(glyph: &BinaryImage) -> OcrResult<Self> {
        let normalized = normalize_glyph(glyph, GLYPH_SIZE)?;
        Self::from_normalized(normalized)
    }

    /// Extracts features from an already normalized `GLYPH_SIZE` square.
    pub fn from_normalized(pattern: BinaryImage) -> OcrResult<Self> {
        if pattern.width() != GLYPH_SIZE || pattern.height() != GLYPH_SIZE {
            return Err(OcrError::InvalidDimensions {
                width: pattern.width(),
                height: pattern.height(),
            });
        }

        let size = GLYPH_SIZE as f32;
        let mut h_profile = [0.0f32; GLYPH_SIZE];
        let mut v_profile = [0.0f32; GLYPH_SIZE];
        for y in 0..GLYPH_SIZE {
            for x in 0..GLYPH_SIZE {
                if pattern.is_ink(x, y) {
                    h_profile[y] += 1.0;
                    v_profile[x] += 1.0;
                }
            }
        }
        h_profile.iter_mut().for_each(|v| *v /= size);
        v_profile.iter_mut().for_each(|v| *v /= size);

        let density = pattern.ink_count() as f32 / (size * size);
        let holes = pattern.close(1).count_holes();
        Ok(Self {
            pattern,
            density,
            h_profile,
            v_profile,
            holes,
        })
    }

    /// The normalized `GLYPH_SIZE x GLYPH_SIZE` pattern.
    pub fn pattern(&self) -> &BinaryImage {
        &self.pattern
    }

    /// Fraction of ink pixels.
    pub fn density(&self) -> f32 {
        self.density
    }

    /// Per-row ink fraction.
    pub fn h_profile(&self) -> &[f32; GLYPH_SIZE] {
        &self.h_profile
    }

    /// Per-column ink fraction.
    pub fn v_profile(&self) -> &[f32; GLYPH_SIZE] {
        &self.v_profile
    }

    /// Enclosed background regions after a radius-1 closing.
    pub fn holes(&self) -> usize {
        self.holes
    }
}
