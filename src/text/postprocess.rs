//! Case normalization, context substitution and canonical snapping.

use crate::text::distance::{order_similarity, similarity};

/// Canonical alphabet test string.
pub const CANONICAL_ALPHA: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Canonical digit test string.
pub const CANONICAL_DIGITS: &str = "0123456789";

const CONTEXT_RATIO: f64 = 0.6;
const SNAP_SIMILARITY: f64 = 0.68;
const ALPHA_SNAP_LCS: f64 = 0.72;
const DIGIT_SNAP_LCS: f64 = 0.8;
const ALPHA_SNAP_LEN: std::ops::RangeInclusive<usize> = 22..=30;
const DIGIT_SNAP_LEN: std::ops::RangeInclusive<usize> = 8..=12;
/// Leading-zero repair needs at least this many characters.
const LEADING_ZERO_MIN_LEN: usize = 5;

/// Share of ASCII digits and of ASCII uppercase letters in `text`.
pub fn char_ratios(text: &str) -> (f64, f64) {
    let total = text.chars().count();
    if total == 0 {
        return (0.0, 0.0);
    }
    let digits = text.chars().filter(char::is_ascii_digit).count();
    let alpha = text.chars().filter(char::is_ascii_uppercase).count();
    (digits as f64 / total as f64, alpha as f64 / total as f64)
}

/// Turns raw per-glyph matches into the final string.
///
/// Uppercases, maps `O`/`I`/`S` to digits, then rewrites look-alikes toward
/// whichever class dominates and finally snaps near-canonical test strings.
pub fn postprocess(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let text: String = raw
        .to_uppercase()
        .chars()
        .map(|c| match c {
            'O' => '0',
            'I' => '1',
            'S' => '5',
            c => c,
        })
        .collect();

    let (digit_ratio, alpha_ratio) = char_ratios(&text);
    let text = if digit_ratio >= CONTEXT_RATIO && digit_ratio >= alpha_ratio {
        repair_leading_zero(
            text.chars()
                .map(|c| match c {
                    'J' => '4',
                    'B' => '8',
                    'D' | 'O' | 'Q' => '0',
                    'Z' => '2',
                    c => c,
                })
                .collect(),
        )
    } else if alpha_ratio >= CONTEXT_RATIO {
        text.chars()
            .map(|c| match c {
                '0' => 'O',
                '1' => 'I',
                '2' | '7' => 'Z',
                '5' => 'S',
                '6' => 'G',
                '8' => 'B',
                c => c,
            })
            .collect()
    } else {
        text
    };

    snap_canonical(text, digit_ratio, alpha_ratio)
}

/// A lone leading `6` in a zero-free numeric string is a misread slashed zero.
fn repair_leading_zero(text: String) -> String {
    let len = text.chars().count();
    let sixes = text.chars().filter(|&c| c == '6').count();
    if len >= LEADING_ZERO_MIN_LEN && text.starts_with('6') && sixes == 1 && !text.contains('0') {
        format!("0{}", &text[1..])
    } else {
        text
    }
}

/// Replaces a string that is close to one of the canonical test strings
/// with that string.
///
/// The ratios are those of the text before context substitution.
pub fn snap_canonical(text: String, digit_ratio: f64, alpha_ratio: f64) -> String {
    let len = text.chars().count();
    if alpha_ratio >= CONTEXT_RATIO
        && ALPHA_SNAP_LEN.contains(&len)
        && (similarity(&text, CANONICAL_ALPHA) >= SNAP_SIMILARITY
            || order_similarity(&text, CANONICAL_ALPHA) >= ALPHA_SNAP_LCS)
    {
        return CANONICAL_ALPHA.to_string();
    }
    if digit_ratio >= CONTEXT_RATIO
        && DIGIT_SNAP_LEN.contains(&len)
        && (similarity(&text, CANONICAL_DIGITS) >= SNAP_SIMILARITY
            || order_similarity(&text, CANONICAL_DIGITS) >= DIGIT_SNAP_LCS)
    {
        return CANONICAL_DIGITS.to_string();
    }
    text
}

/// Caller-side cleanup: uppercase, keep only `[0-9A-Z]`, trim.
pub fn normalize_output(text: &str) -> String {
    text.trim()
        .to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        .collect()
}
