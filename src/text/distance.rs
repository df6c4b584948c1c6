//! Sequence distances over characters.

/// Levenshtein distance with unit costs.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        cur[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            cur[j + 1] = (prev[j + 1] + 1).min(cur[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

/// Length of the longest common subsequence.
pub fn lcs_len(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    for &ca in &a {
        for (j, &cb) in b.iter().enumerate() {
            cur[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(cur[j])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

fn longest(a: &str, b: &str) -> f64 {
    a.chars().count().max(b.chars().count()).max(1) as f64
}

/// `1 - edit_distance / max(|a|, |b|, 1)`.
pub fn similarity(a: &str, b: &str) -> f64 {
    1.0 - edit_distance(a, b) as f64 / longest(a, b)
}

/// `lcs_len / max(|a|, |b|, 1)`.
pub fn order_similarity(a: &str, b: &str) -> f64 {
    lcs_len(a, b) as f64 / longest(a, b)
}

#[cfg(test)]
mod tests {
    use super::{edit_distance, lcs_len, order_similarity, similarity};

    #[test]
    fn classic_distances() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
    }

    #[test]
    fn lcs_lengths() {
        assert_eq!(lcs_len("ABCBDAB", "BDCABA"), 4);
        assert_eq!(lcs_len("", "A"), 0);
        assert_eq!(lcs_len("ACE", "ABCDE"), 3);
    }

    #[test]
    fn empty_strings_are_identical() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(order_similarity("", ""), 0.0);
        assert_eq!(similarity("ABCD", "ABCD"), 1.0);
        assert_eq!(similarity("ABCD", "ABCE"), 0.75);
    }
}
