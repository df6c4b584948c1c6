//! End-to-end recognition.

use crate::bank::TemplateLibrary;
use crate::preprocess::{binarize, upscale, PreprocessConfig};
use crate::search::{CandidateSet, MatchConfig, Matcher};
use crate::segment::{crop_glyphs, segment_robust, Glyph, SegmentStrategy};
use crate::text::{postprocess, similarity};
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::OcrResult;
use image::RgbaImage;
use std::sync::Arc;

/// Returned when no glyph was found.
pub const EMPTY_RESULT: &str = " ";
/// Returned when the pipeline failed.
pub const FAULT_RESULT: &str = "?";

/// Recognition settings.
#[derive(Clone, Debug)]
pub struct RecognizerConfig {
    pub preprocess: PreprocessConfig,
    pub matching: MatchConfig,
    /// Fixed-format card to retry against when the glyph count matches its
    /// length. `None` disables the retry.
    pub test_card: Option<String>,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            preprocess: PreprocessConfig::default(),
            matching: MatchConfig::default(),
            test_card: Some("ABCD".to_string()),
        }
    }
}

/// Result of one recognition with the glyphs it was read from.
#[derive(Clone, Debug)]
pub struct RecognitionOutput {
    /// Final string.
    pub text: String,
    /// Concatenated per-glyph matches before postprocessing.
    pub raw: String,
    /// Segmented glyphs, left to right, in upscaled capture coordinates.
    pub glyphs: Vec<Glyph>,
    /// Segmentation strategy that produced `glyphs`.
    pub strategy: SegmentStrategy,
}

/// Reads short alphanumeric strings from captures.
///
/// Holds the template library behind an [`Arc`]; clones are cheap and may be
/// used from several threads at once.
#[derive(Clone, Debug)]
pub struct Recognizer {
    matcher: Matcher,
    cfg: RecognizerConfig,
}

impl Recognizer {
    /// Creates a recognizer with default settings.
    pub fn new(library: Arc<TemplateLibrary>) -> Self {
        Self {
            matcher: Matcher::new(library),
            cfg: RecognizerConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: RecognizerConfig) -> Self {
        self.matcher = self.matcher.with_config(cfg.matching.clone());
        self.cfg = cfg;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &RecognizerConfig {
        &self.cfg
    }

    /// Template library in use.
    pub fn library(&self) -> &TemplateLibrary {
        self.matcher.library()
    }

    /// Recognizes `rgba`, returning `" "` when nothing was found and `"?"`
    /// when the pipeline failed.
    pub fn recognize(&self, rgba: &RgbaImage) -> String {
        match self.try_recognize(rgba) {
            Ok(out) => out.text,
            Err(err) => {
                trace_warn!("recognize_failed", error = err.to_string().as_str());
                FAULT_RESULT.to_string()
            }
        }
    }

    /// Fallible recognition with diagnostics.
    pub fn try_recognize(&self, rgba: &RgbaImage) -> OcrResult<RecognitionOutput> {
        let _span = trace_span!("recognize", width = rgba.width(), height = rgba.height()).entered();

        let (strategy, glyphs) = self.segment(rgba)?;
        let full = CandidateSet::full();
        let mut raw = self.read_glyphs(&glyphs, &full)?;

        if let Some(card) = self.cfg.test_card.as_deref() {
            if !glyphs.is_empty() && glyphs.len() == card.chars().count() {
                let subset = CandidateSet::from_chars(card)?;
                let constrained = self.read_glyphs(&glyphs, &subset)?;
                let constrained_score = similarity(&constrained, card);
                let free_score = similarity(&raw.to_uppercase(), card);
                trace_event!(
                    "test_card",
                    constrained = constrained_score,
                    unconstrained = free_score
                );
                if constrained_score >= free_score {
                    raw = constrained;
                }
            }
        }

        let mut text = postprocess(&raw);
        if text.is_empty() {
            text = EMPTY_RESULT.to_string();
        }
        trace_event!(
            "recognized",
            glyphs = glyphs.len(),
            strategy = strategy.as_str(),
            text = text.as_str()
        );
        Ok(RecognitionOutput {
            text,
            raw,
            glyphs,
            strategy,
        })
    }

    /// Recognizes using only `candidates`, returning `"?"` on failure.
    ///
    /// The result is not postprocessed and keeps the case of `candidates`, so
    /// every character is either a candidate or `?`.
    pub fn recognize_constrained(&self, rgba: &RgbaImage, candidates: &str) -> String {
        match self.try_recognize_constrained(rgba, candidates) {
            Ok(out) => out.text,
            Err(err) => {
                trace_warn!("recognize_failed", error = err.to_string().as_str());
                FAULT_RESULT.to_string()
            }
        }
    }

    /// Fallible constrained recognition.
    pub fn try_recognize_constrained(
        &self,
        rgba: &RgbaImage,
        candidates: &str,
    ) -> OcrResult<RecognitionOutput> {
        let _span = trace_span!("recognize", width = rgba.width(), height = rgba.height()).entered();

        let subset = CandidateSet::from_chars(candidates)?;
        let (strategy, glyphs) = self.segment(rgba)?;
        let raw = self.read_glyphs(&glyphs, &subset)?;
        let text = if raw.is_empty() {
            EMPTY_RESULT.to_string()
        } else {
            raw.clone()
        };
        Ok(RecognitionOutput {
            text,
            raw,
            glyphs,
            strategy,
        })
    }

    fn segment(&self, rgba: &RgbaImage) -> OcrResult<(SegmentStrategy, Vec<Glyph>)> {
        let scaled = upscale(rgba, &self.cfg.preprocess)?;
        let binary = binarize(&scaled)?;
        let segmentation = segment_robust(&binary);
        let glyphs = crop_glyphs(&binary, &segmentation.segments)?;
        Ok((segmentation.strategy, glyphs))
    }

    fn read_glyphs(&self, glyphs: &[Glyph], candidates: &CandidateSet) -> OcrResult<String> {
        glyphs
            .iter()
            .map(|glyph| self.matcher.classify(&glyph.image, candidates))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Recognizer, RecognizerConfig, EMPTY_RESULT, FAULT_RESULT};
    use crate::bank::{BitmapFont, GlyphRasterizer, LibraryConfig, TemplateLibrary};
    use image::{Rgba, RgbaImage};
    use std::sync::Arc;

    /// Draws lowercase letters with the uppercase bitmap shapes.
    struct LowercaseBitmap(BitmapFont);

    impl GlyphRasterizer for LowercaseBitmap {
        fn name(&self) -> &str {
            "lowercase-bitmap"
        }

        fn render(&self, ch: char, canvas: u32) -> Option<RgbaImage> {
            if !ch.is_ascii_lowercase() {
                return None;
            }
            self.0.render(ch.to_ascii_uppercase(), canvas)
        }
    }

    fn recognizer() -> Recognizer {
        Recognizer::new(Arc::new(TemplateLibrary::builtin()))
    }

    #[test]
    fn blank_capture_reads_as_space() {
        let rgba = RgbaImage::from_pixel(60, 30, Rgba([255, 255, 255, 255]));
        assert_eq!(recognizer().recognize(&rgba), EMPTY_RESULT);
    }

    #[test]
    fn empty_capture_reads_as_fault() {
        let rgba = RgbaImage::new(0, 0);
        assert_eq!(recognizer().recognize(&rgba), FAULT_RESULT);
        assert_eq!(recognizer().recognize_constrained(&rgba, "AB"), FAULT_RESULT);
    }

    #[test]
    fn empty_candidates_read_as_fault() {
        let rgba = BitmapFont::new(4).render_text("AB", 4, 8).unwrap();
        assert_eq!(recognizer().recognize_constrained(&rgba, ""), FAULT_RESULT);
    }

    #[test]
    fn bitmap_text_is_read_back() {
        let rgba = BitmapFont::new(4).render_text("K4XPH", 4, 8).unwrap();
        let out = recognizer().try_recognize(&rgba).unwrap();
        assert_eq!(out.glyphs.len(), 5);
        assert_eq!(out.raw, "K4XPH");
        assert_eq!(out.text, "K4XPH");
    }

    #[test]
    fn test_card_retry_can_be_disabled() {
        let cfg = RecognizerConfig {
            test_card: None,
            ..RecognizerConfig::default()
        };
        let rgba = BitmapFont::new(4).render_text("ABCD", 4, 8).unwrap();
        let out = recognizer().with_config(cfg).try_recognize(&rgba).unwrap();
        assert_eq!(out.text, "ABCD");
        // Two holes with an 8 runner-up: the resolver reads B as 8 and the
        // alpha context maps it back.
        assert_eq!(out.raw, "A8CD");
    }

    #[test]
    fn constrained_output_keeps_candidate_case() {
        let sources: Vec<Box<dyn GlyphRasterizer>> =
            vec![Box::new(LowercaseBitmap(BitmapFont::default()))];
        let cfg = LibraryConfig {
            charset: "abcd".to_string(),
            ..LibraryConfig::default()
        };
        let recognizer = Recognizer::new(Arc::new(TemplateLibrary::build(&sources, &cfg)));
        let rgba = BitmapFont::new(4).render_text("DCBA", 4, 8).unwrap();
        let out = recognizer.try_recognize_constrained(&rgba, "abcd").unwrap();
        assert_eq!(out.text, "dcba");
        assert!(out.text.chars().all(|c| "abcd?".contains(c)));
    }
}
