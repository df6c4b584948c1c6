//! Reference template library.
//!
//! Every supported character is rendered once per glyph source, pushed
//! through the same binarization and segmentation as a capture, and reduced
//! to a [`GlyphPlan`]. The finished library is immutable and is shared
//! read-only by every matcher that holds it.

mod bitmap;
mod render;

pub use bitmap::BitmapFont;
pub use render::{FontRasterizer, GlyphRasterizer};

use crate::preprocess::binarize;
use crate::segment::{segment_projection, Segment};
use crate::template::{CharacterTemplate, GlyphPlan};
use crate::trace::{trace_event, trace_span};
use crate::util::OcrResult;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Characters recognized by default: digits, then upper and lower case.
pub const DEFAULT_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Configuration for building a template library.
#[derive(Clone, Debug)]
pub struct LibraryConfig {
    /// Characters to build templates for, in matching order.
    pub charset: String,
    /// Side of the square canvas each character is rendered on.
    pub canvas: u32,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            charset: DEFAULT_CHARSET.to_string(),
            canvas: 64,
        }
    }
}

/// Templates for every character across all glyph sources.
#[derive(Clone, Debug)]
pub struct TemplateLibrary {
    charset: Vec<char>,
    templates: Vec<Vec<CharacterTemplate>>,
}

impl TemplateLibrary {
    /// Renders and plans templates for `cfg.charset` from each source.
    ///
    /// A (character, source) pair that does not render or segment is
    /// skipped; characters may end up with no templates at all.
    pub fn build(sources: &[Box<dyn GlyphRasterizer>], cfg: &LibraryConfig) -> Self {
        let _span = trace_span!("build_library", sources = sources.len()).entered();

        let mut charset: Vec<char> = Vec::new();
        for ch in cfg.charset.chars() {
            if !charset.contains(&ch) {
                charset.push(ch);
            }
        }

        #[cfg(feature = "rayon")]
        let templates: Vec<Vec<CharacterTemplate>> = charset
            .par_iter()
            .map(|&ch| templates_for_char(ch, sources, cfg.canvas))
            .collect();
        #[cfg(not(feature = "rayon"))]
        let templates: Vec<Vec<CharacterTemplate>> = charset
            .iter()
            .map(|&ch| templates_for_char(ch, sources, cfg.canvas))
            .collect();

        let library = Self { charset, templates };
        trace_event!(
            "library_built",
            characters = library.characters().count(),
            templates = library.len()
        );
        library
    }

    /// Library rendered from the built-in bitmap font only.
    pub fn builtin() -> Self {
        let sources: Vec<Box<dyn GlyphRasterizer>> = vec![Box::new(BitmapFont::default())];
        Self::build(&sources, &LibraryConfig::default())
    }

    /// Library rendered from the bitmap font plus every system font found.
    pub fn with_system_fonts() -> Self {
        let mut sources: Vec<Box<dyn GlyphRasterizer>> = vec![Box::new(BitmapFont::default())];
        for font in FontRasterizer::system_fonts() {
            sources.push(Box::new(font));
        }
        Self::build(&sources, &LibraryConfig::default())
    }

    /// Templates for `ch`; empty when the character is unsupported.
    pub fn templates_for(&self, ch: char) -> &[CharacterTemplate] {
        self.charset
            .iter()
            .position(|&c| c == ch)
            .map(|idx| self.templates[idx].as_slice())
            .unwrap_or(&[])
    }

    /// Characters with at least one template, in charset order.
    pub fn characters(&self) -> impl Iterator<Item = char> + '_ {
        self.charset
            .iter()
            .zip(&self.templates)
            .filter(|(_, t)| !t.is_empty())
            .map(|(&c, _)| c)
    }

    /// Total number of templates.
    pub fn len(&self) -> usize {
        self.templates.iter().map(Vec::len).sum()
    }

    /// True when no template could be built.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn templates_for_char(
    ch: char,
    sources: &[Box<dyn GlyphRasterizer>],
    canvas: u32,
) -> Vec<CharacterTemplate> {
    sources
        .iter()
        .filter_map(|source| {
            let plan = render_plan(source.as_ref(), ch, canvas).ok().flatten()?;
            Some(CharacterTemplate {
                ch,
                source: source.name().to_string(),
                plan,
            })
        })
        .collect()
}

/// Renders `ch` and plans its largest segment.
fn render_plan(source: &dyn GlyphRasterizer, ch: char, canvas: u32) -> OcrResult<Option<GlyphPlan>> {
    let Some(rgba) = source.render(ch, canvas) else {
        return Ok(None);
    };
    let binary = binarize(&rgba)?;
    let mut largest: Option<Segment> = None;
    for seg in segment_projection(&binary) {
        if largest.map_or(true, |best| seg.area() > best.area()) {
            largest = Some(seg);
        }
    }
    let Some(seg) = largest else {
        return Ok(None);
    };
    let glyph = binary.crop(seg.left, seg.top, seg.right, seg.bottom)?;
    GlyphPlan::from_glyph(&glyph).map(Some)
}
