//! Hole-topology disambiguation of `8`, `3`, `B` and `0`.

use crate::search::GlyphMatch;

/// Picks the final character for a match.
///
/// Only near-ties (second minus best within `margin`) are reconsidered. The
/// enclosed-hole count of the input then decides between the usual
/// confusions: two holes means `8`, one hole turns an `8` into its `0`/`B`
/// runner-up, and no hole turns an `8` into a `3` runner-up.
pub fn resolve_ambiguity(m: &GlyphMatch, margin: f32) -> Option<char> {
    let best = m.best?;
    let gap = m.margin();
    if !gap.is_finite() || gap > margin {
        return Some(best.ch);
    }
    let second = m.second.map(|s| s.ch);

    let resolved = match (m.holes, best.ch) {
        (h, '3' | 'B' | '0') if h >= 2 && (second == Some('8') || best.ch == '3') => '8',
        (1, '8') => match second {
            Some(c @ ('0' | 'B')) => c,
            _ => '8',
        },
        (0, '8') if second == Some('3') => '3',
        _ => best.ch,
    };
    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::resolve_ambiguity;
    use crate::candidate::top2::Scored;
    use crate::search::GlyphMatch;

    fn m(best: char, second: char, gap: f32, holes: usize) -> GlyphMatch {
        GlyphMatch {
            best: Some(Scored { ch: best, score: 0.2 }),
            second: Some(Scored {
                ch: second,
                score: 0.2 + gap,
            }),
            holes,
        }
    }

    #[test]
    fn clear_winner_is_kept() {
        assert_eq!(resolve_ambiguity(&m('3', '8', 0.2, 2), 0.08), Some('3'));
    }

    #[test]
    fn two_holes_promote_to_eight() {
        assert_eq!(resolve_ambiguity(&m('3', 'E', 0.01, 2), 0.08), Some('8'));
        assert_eq!(resolve_ambiguity(&m('B', '8', 0.01, 2), 0.08), Some('8'));
        assert_eq!(resolve_ambiguity(&m('0', '8', 0.05, 3), 0.08), Some('8'));
        assert_eq!(resolve_ambiguity(&m('B', 'R', 0.01, 2), 0.08), Some('B'));
    }

    #[test]
    fn one_hole_demotes_eight() {
        assert_eq!(resolve_ambiguity(&m('8', '0', 0.01, 1), 0.08), Some('0'));
        assert_eq!(resolve_ambiguity(&m('8', 'B', 0.01, 1), 0.08), Some('B'));
        assert_eq!(resolve_ambiguity(&m('8', 'S', 0.01, 1), 0.08), Some('8'));
    }

    #[test]
    fn no_hole_turns_eight_into_three() {
        assert_eq!(resolve_ambiguity(&m('8', '3', 0.01, 0), 0.08), Some('3'));
        assert_eq!(resolve_ambiguity(&m('8', '5', 0.01, 0), 0.08), Some('8'));
    }

    #[test]
    fn missing_runner_up_keeps_best() {
        let single = GlyphMatch {
            best: Some(Scored { ch: '8', score: 0.1 }),
            second: None,
            holes: 0,
        };
        assert_eq!(resolve_ambiguity(&single, 0.08), Some('8'));
        let empty = GlyphMatch {
            best: None,
            second: None,
            holes: 0,
        };
        assert_eq!(resolve_ambiguity(&empty, 0.08), None);
    }
}
