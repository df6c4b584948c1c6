//! Character templates and glyph normalization.

mod normalize;
mod plan;

pub use normalize::normalize_glyph;
pub use plan::GlyphPlan;

/// Side of the square every glyph is normalized to before matching.
pub const GLYPH_SIZE: usize = 32;

/// One rendered variant of a character.
#[derive(Clone, Debug, PartialEq)]
pub struct CharacterTemplate {
    /// The character this template stands for.
    pub ch: char,
    /// Name of the source (font or bitmap face) it was rendered from.
    pub source: String,
    /// Precomputed features.
    pub plan: GlyphPlan,
}
