//! Glyph dissimilarity kernel.
//!
//! A score blends four terms: shifted pixel disagreement, row and column
//! profile distances, and the difference in hole count. Lower is better.

use crate::template::{GlyphPlan, GLYPH_SIZE};

/// Shifts tried for alignment, in evaluation order.
const SHIFTS: [isize; 5] = [0, -1, 1, -2, 2];
/// Alignment search stops once a shift disagrees on fewer pixels than this.
const EARLY_EXIT: f32 = 0.05;

/// Weights of the score terms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreWeights {
    pub alignment: f32,
    pub h_profile: f32,
    pub v_profile: f32,
    pub holes: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            alignment: 0.30,
            h_profile: 0.24,
            v_profile: 0.24,
            holes: 0.22,
        }
    }
}

/// Lowest fraction of disagreeing pixels over small translations of the
/// template.
///
/// For shift `(dx, dy)` input pixel `(x, y)` is compared with template pixel
/// `(x + dx, y + dy)`; only overlapping pixels count.
pub fn alignment_mismatch(input: &GlyphPlan, template: &GlyphPlan) -> f32 {
    let a = input.pattern();
    let b = template.pattern();
    let size = GLYPH_SIZE as isize;

    let mut best = f32::INFINITY;
    for dy in SHIFTS {
        for dx in SHIFTS {
            let mut diff = 0u32;
            let mut overlap = 0u32;
            for y in 0..size {
                let ty = y + dy;
                if !(0..size).contains(&ty) {
                    continue;
                }
                for x in 0..size {
                    let tx = x + dx;
                    if !(0..size).contains(&tx) {
                        continue;
                    }
                    overlap += 1;
                    if a.is_ink(x as usize, y as usize) != b.is_ink(tx as usize, ty as usize) {
                        diff += 1;
                    }
                }
            }
            let mismatch = if overlap > 0 {
                diff as f32 / overlap as f32
            } else {
                1.0
            };
            best = best.min(mismatch);
            if best < EARLY_EXIT {
                return best;
            }
        }
    }
    best
}

/// Mean absolute difference between two profiles.
pub fn profile_distance(a: &[f32; GLYPH_SIZE], b: &[f32; GLYPH_SIZE]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum::<f32>() / GLYPH_SIZE as f32
}

/// Scores `input` against `template`, or `None` when their ink densities
/// differ by more than `density_gate`.
pub fn score_template(
    input: &GlyphPlan,
    template: &GlyphPlan,
    weights: &ScoreWeights,
    density_gate: f32,
) -> Option<f32> {
    if (input.density() - template.density()).abs() > density_gate {
        return None;
    }
    let align = alignment_mismatch(input, template);
    let h = profile_distance(input.h_profile(), template.h_profile());
    let v = profile_distance(input.v_profile(), template.v_profile());
    let holes = input.holes().abs_diff(template.holes()) as f32;
    Some(
        align * weights.alignment
            + h * weights.h_profile
            + v * weights.v_profile
            + holes * weights.holes,
    )
}
