//! Low-level building blocks for custom recognition pipelines.
//!
//! These expose the individual stages behind [`Recognizer`](crate::Recognizer):
//! thresholding, segmentation strategies, glyph features, scoring and text
//! cleanup. Most users should prefer the top-level `Recognizer`.

pub use crate::candidate::top2::{Scored, Top2};
pub use crate::image::gray::{luma, LumaImage};
pub use crate::image::integral::IntegralImage;
pub use crate::kernel::{alignment_mismatch, profile_distance, score_template, ScoreWeights};
pub use crate::preprocess::{
    adaptive_threshold, adaptive_window_size, binarize, binarize_luma, otsu_threshold,
};
pub use crate::search::{resolve_ambiguity, scan_candidates};
pub use crate::segment::{
    choose_strategy, crop_glyphs, segment_components, segment_forced_cuts, segment_projection,
    segment_robust,
};
pub use crate::template::{normalize_glyph, GlyphPlan, GLYPH_SIZE};
pub use crate::text::{edit_distance, lcs_len, order_similarity, postprocess, similarity};
