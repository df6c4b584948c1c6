//! Forced cuts for wide captures that would not separate otherwise.

use crate::image::binary::BinaryImage;
use crate::segment::{trimmed, Segment, MIN_SEGMENT_SIDE};

/// Captures narrower than this aspect ratio are never force-cut.
const MIN_ASPECT: f64 = 1.8;
/// Expected glyph width as a fraction of the capture height.
const GLYPH_ASPECT: f64 = 0.7;
const MIN_GLYPHS: usize = 2;
const MAX_GLYPHS: usize = 8;

/// Cuts a wide capture into `round(width / (0.7 * height))` glyphs (clamped
/// to 2..=8), moving each evenly spaced boundary to the emptiest nearby
/// column. Returns nothing when fewer than two pieces survive.
pub fn segment_forced_cuts(img: &BinaryImage) -> Vec<Segment> {
    let (width, height) = (img.width(), img.height());
    if (width as f64) / (height.max(1) as f64) < MIN_ASPECT {
        return Vec::new();
    }

    let proj = img.vertical_projection(0, width - 1, 0, height - 1);
    if proj.iter().all(|&v| v == 0) {
        return Vec::new();
    }

    let estimate = (width as f64 / (height as f64 * GLYPH_ASPECT).max(1.0)).round() as usize;
    let estimate = estimate.clamp(MIN_GLYPHS, MAX_GLYPHS);
    let window = (width / (estimate * 3)).max(2) as i64;

    let mut cuts: Vec<usize> = (1..estimate)
        .filter_map(|k| {
            let target = (k * width / estimate) as i64;
            let from = (target - window).max(1);
            let to = (target + window).min(width as i64 - 2);
            let mut best: Option<(usize, u32)> = None;
            for x in from..=to {
                let x = x as usize;
                if best.map_or(true, |(_, v)| proj[x] < v) {
                    best = Some((x, proj[x]));
                }
            }
            best.map(|(x, _)| x)
        })
        .collect();
    if cuts.is_empty() {
        return Vec::new();
    }
    cuts.sort_unstable();

    let mut spans = Vec::with_capacity(cuts.len() + 1);
    let mut left = 0;
    for cut in cuts {
        if cut < left + MIN_SEGMENT_SIDE {
            continue;
        }
        spans.push((left, cut - 1));
        left = cut;
    }
    if width - left >= MIN_SEGMENT_SIDE {
        spans.push((left, width - 1));
    }
    if spans.len() <= 1 {
        return Vec::new();
    }

    spans
        .into_iter()
        .filter_map(|(l, r)| trimmed(img, l, r))
        .filter(|s| s.width() >= MIN_SEGMENT_SIDE && s.height() >= MIN_SEGMENT_SIDE)
        .collect()
}
