//! Glyph matching against the template library.
//!
//! [`Matcher`] normalizes a cropped glyph, scores it against the candidate
//! characters ([`scan`]), settles near-ties with hole topology ([`resolve`])
//! and applies the acceptance threshold.

pub mod resolve;
pub mod scan;

use crate::bank::TemplateLibrary;
use crate::candidate::top2::Scored;
use crate::image::binary::BinaryImage;
use crate::kernel::ScoreWeights;
use crate::template::GlyphPlan;
use crate::trace::trace_debug;
use crate::util::{OcrError, OcrResult};
use std::sync::Arc;

pub use resolve::resolve_ambiguity;
pub use scan::scan_candidates;

/// Character emitted for a glyph that matched nothing well enough.
pub const UNKNOWN: char = '?';

/// Matching thresholds and weights.
#[derive(Clone, Debug)]
pub struct MatchConfig {
    /// Best score must be below this to accept an unconstrained match.
    pub accept: f32,
    /// Best score must be below this to accept a constrained match.
    pub accept_constrained: f32,
    /// Near-ties within this margin go through hole disambiguation.
    pub ambiguity_margin: f32,
    /// Templates whose ink density differs by more than this are skipped.
    pub density_gate: f32,
    /// Score term weights.
    pub weights: ScoreWeights,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            accept: 0.48,
            accept_constrained: 0.65,
            ambiguity_margin: 0.08,
            density_gate: 0.45,
            weights: ScoreWeights::default(),
        }
    }
}

/// Characters a glyph may be matched against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CandidateSet {
    /// Every character in the library.
    Full,
    /// A caller-chosen subset, in matching order.
    Subset(Vec<char>),
}

impl CandidateSet {
    /// Unrestricted matching.
    pub fn full() -> Self {
        CandidateSet::Full
    }

    /// Restricts matching to the distinct characters of `chars`.
    pub fn from_chars(chars: &str) -> OcrResult<Self> {
        let mut set = Vec::new();
        for ch in chars.chars() {
            if !set.contains(&ch) {
                set.push(ch);
            }
        }
        if set.is_empty() {
            return Err(OcrError::EmptyCandidateSet);
        }
        Ok(CandidateSet::Subset(set))
    }

    /// True for a caller-chosen subset.
    pub fn is_constrained(&self) -> bool {
        matches!(self, CandidateSet::Subset(_))
    }

    /// Whether `ch` may be produced.
    pub fn contains(&self, ch: char) -> bool {
        match self {
            CandidateSet::Full => true,
            CandidateSet::Subset(chars) => chars.contains(&ch),
        }
    }
}

/// Best and runner-up hypotheses for one glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphMatch {
    pub best: Option<Scored>,
    pub second: Option<Scored>,
    /// Hole count of the input glyph.
    pub holes: usize,
}

impl GlyphMatch {
    /// Score gap between runner-up and best; infinite if either is missing.
    pub fn margin(&self) -> f32 {
        match (self.best, self.second) {
            (Some(best), Some(second)) => second.score - best.score,
            _ => f32::INFINITY,
        }
    }

    /// Best score, or infinity when nothing matched.
    pub fn best_score(&self) -> f32 {
        self.best.map_or(f32::INFINITY, |s| s.score)
    }
}

/// Matches cropped glyphs against a shared template library.
#[derive(Clone, Debug)]
pub struct Matcher {
    library: Arc<TemplateLibrary>,
    cfg: MatchConfig,
}

impl Matcher {
    /// Creates a matcher with default thresholds.
    pub fn new(library: Arc<TemplateLibrary>) -> Self {
        Self {
            library,
            cfg: MatchConfig::default(),
        }
    }

    /// Replaces the matching configuration.
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Template library in use.
    pub fn library(&self) -> &TemplateLibrary {
        &self.library
    }

    /// Scores a glyph and returns the two best hypotheses.
    pub fn match_glyph(&self, glyph: &BinaryImage, candidates: &CandidateSet) -> OcrResult<GlyphMatch> {
        let input = GlyphPlan::from_glyph(glyph)?;
        let top = scan_candidates(&self.library, &input, candidates, &self.cfg);
        Ok(GlyphMatch {
            best: top.best(),
            second: top.second(),
            holes: input.holes(),
        })
    }

    /// Final character for a match: disambiguated, restricted to the
    /// candidates, and [`UNKNOWN`] when the best score is not good enough.
    pub fn decide(&self, m: &GlyphMatch, candidates: &CandidateSet) -> char {
        let limit = if candidates.is_constrained() {
            self.cfg.accept_constrained
        } else {
            self.cfg.accept
        };
        if m.best_score() >= limit {
            return UNKNOWN;
        }
        match (resolve_ambiguity(m, self.cfg.ambiguity_margin), m.best) {
            (Some(ch), _) if candidates.contains(ch) => ch,
            (_, Some(best)) => best.ch,
            _ => UNKNOWN,
        }
    }

    /// Matches and decides in one step.
    pub fn classify(&self, glyph: &BinaryImage, candidates: &CandidateSet) -> OcrResult<char> {
        let m = self.match_glyph(glyph, candidates)?;
        let ch = self.decide(&m, candidates);
        let label = |s: Option<Scored>| s.map_or(UNKNOWN, |s| s.ch).to_string();
        trace_debug!(
            "glyph_match",
            best = label(m.best).as_str(),
            score = m.best_score(),
            second = label(m.second).as_str(),
            holes = m.holes,
            chosen = ch.to_string().as_str()
        );
        Ok(ch)
    }
}
