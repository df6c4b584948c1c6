//! Best/second-best tracking for match scores (lower is better).

/// A character together with its dissimilarity score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scored {
    /// Candidate character.
    pub ch: char,
    /// Dissimilarity; lower is a better match.
    pub score: f32,
}

/// Keeps the two lowest-scoring candidates seen so far.
///
/// A new best demotes the old best to second place; equal scores never
/// displace an earlier candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Top2 {
    best: Option<Scored>,
    second: Option<Scored>,
}

impl Top2 {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a candidate.
    pub fn push(&mut self, candidate: Scored) {
        let beats = |slot: Option<Scored>| slot.map_or(true, |s| candidate.score < s.score);
        if beats(self.best) {
            self.second = self.best;
            self.best = Some(candidate);
        } else if beats(self.second) {
            self.second = Some(candidate);
        }
    }

    /// Lowest-scoring candidate.
    pub fn best(&self) -> Option<Scored> {
        self.best
    }

    /// Runner-up.
    pub fn second(&self) -> Option<Scored> {
        self.second
    }

    /// Gap between second and best, or infinity when either is missing.
    pub fn margin(&self) -> f32 {
        match (self.best, self.second) {
            (Some(best), Some(second)) => second.score - best.score,
            _ => f32::INFINITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Scored, Top2};

    fn s(ch: char, score: f32) -> Scored {
        Scored { ch, score }
    }

    #[test]
    fn keeps_two_lowest() {
        let mut top = Top2::new();
        for c in [s('A', 0.5), s('B', 0.2), s('C', 0.9), s('D', 0.3)] {
            top.push(c);
        }
        assert_eq!(top.best(), Some(s('B', 0.2)));
        assert_eq!(top.second(), Some(s('D', 0.3)));
        assert!((top.margin() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn ties_keep_the_earlier_candidate() {
        let mut top = Top2::new();
        top.push(s('X', 0.4));
        top.push(s('Y', 0.4));
        top.push(s('Z', 0.4));
        assert_eq!(top.best().map(|c| c.ch), Some('X'));
        assert_eq!(top.second().map(|c| c.ch), Some('Y'));
    }

    #[test]
    fn margin_is_infinite_with_one_candidate() {
        let mut top = Top2::new();
        assert!(top.margin().is_infinite());
        top.push(s('Q', 0.1));
        assert!(top.margin().is_infinite());
        assert!(top.second().is_none());
    }
}
