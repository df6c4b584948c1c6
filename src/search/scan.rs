//! Exhaustive scoring of a glyph against candidate templates.

use crate::bank::TemplateLibrary;
use crate::candidate::top2::{Scored, Top2};
use crate::kernel::score_template;
use crate::search::{CandidateSet, MatchConfig};
use crate::template::GlyphPlan;

/// Scores `input` against every template of every candidate character and
/// returns the two best.
///
/// Characters are visited in candidate order and templates in library order,
/// so ties resolve to the earliest template.
pub fn scan_candidates(
    library: &TemplateLibrary,
    input: &GlyphPlan,
    candidates: &CandidateSet,
    cfg: &MatchConfig,
) -> Top2 {
    let mut top = Top2::new();
    let mut visit = |ch: char| {
        for template in library.templates_for(ch) {
            if let Some(score) =
                score_template(input, &template.plan, &cfg.weights, cfg.density_gate)
            {
                top.push(Scored { ch, score });
            }
        }
    };
    match candidates {
        CandidateSet::Full => library.characters().for_each(&mut visit),
        CandidateSet::Subset(chars) => chars.iter().copied().for_each(&mut visit),
    }
    top
}
