//! Splitting of touching glyphs and re-merging of slivers.

use crate::image::binary::BinaryImage;
use crate::segment::Segment;

const MAX_SPLIT_DEPTH: usize = 6;
/// A block is split when at least this many mean widths wide (and at least
/// as wide as it is tall).
const WIDE_RATIO: f64 = 1.35;
/// Neither side of a cut may be narrower than this fraction of the mean width.
const MIN_PIECE_RATIO: f64 = 0.35;
/// Weight of the left/right width imbalance in the cut score.
const BALANCE_WEIGHT: f64 = 5.0;

/// Recursively splits `segment` at low-ink columns until every piece is
/// narrower than `max(1.35 * avg_width, piece height)`.
pub(crate) fn split_touching(img: &BinaryImage, segment: Segment, avg_width: f64) -> Vec<Segment> {
    let mut out = Vec::new();
    split_recursive(img, segment, avg_width, 0, &mut out);
    out
}

fn split_recursive(
    img: &BinaryImage,
    segment: Segment,
    avg_width: f64,
    depth: usize,
    out: &mut Vec<Segment>,
) {
    let seg_width = segment.width() as f64;
    let seg_height = segment.height() as f64;
    let wide_threshold = (avg_width * WIDE_RATIO).max(seg_height);
    if depth >= MAX_SPLIT_DEPTH || seg_width < wide_threshold {
        out.push(segment);
        return;
    }

    match find_cut(img, segment, avg_width) {
        Some((left, right)) => {
            split_recursive(img, left, avg_width, depth + 1, out);
            split_recursive(img, right, avg_width, depth + 1, out);
        }
        None => out.push(segment),
    }
}

fn find_cut(img: &BinaryImage, segment: Segment, avg_width: f64) -> Option<(Segment, Segment)> {
    let proj = img.vertical_projection(segment.left, segment.right, segment.top, segment.bottom);
    let len = proj.len();
    let min_piece = ((avg_width * MIN_PIECE_RATIO).floor() as usize).max(2);
    let local_mean = proj.iter().map(|&v| f64::from(v)).sum::<f64>() / len.max(1) as f64;
    let low = ((segment.height() as f64 * 0.08).min(local_mean * 0.55).floor() as u32).max(1);

    let mut best_cut = 0usize;
    let mut best_score = f64::INFINITY;
    for (i, &ink) in proj
        .iter()
        .enumerate()
        .take(len.saturating_sub(min_piece))
        .skip(min_piece)
    {
        if ink > low {
            continue;
        }
        let balance = (i as f64 - (len - i) as f64).abs() / len as f64;
        let score = f64::from(ink) + balance * BALANCE_WEIGHT;
        if score < best_score {
            best_score = score;
            best_cut = i;
        }
    }
    if best_cut == 0 {
        return None;
    }

    let cut = segment.left + best_cut;
    let (left_top, left_bottom) = img.ink_rows(segment.left, cut - 1)?;
    let (right_top, right_bottom) = img.ink_rows(cut, segment.right)?;
    let left = Segment::new(segment.left, cut - 1, left_top, left_bottom);
    let right = Segment::new(cut, segment.right, right_top, right_bottom);
    if left.width() < 2 || right.width() < 2 {
        return None;
    }
    Some((left, right))
}

/// Re-joins neighboring pieces that are both too narrow to be a glyph on
/// their own. `segments` must be sorted by `left`.
pub(crate) fn merge_broken(segments: &[Segment], avg_width: f64) -> Vec<Segment> {
    let min_piece = ((avg_width * 0.4).floor() as usize).max(2);
    let max_gap = ((avg_width * 0.15).floor() as i64).max(1);

    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());
    for &cur in segments {
        let Some(last) = merged.last_mut() else {
            merged.push(cur);
            continue;
        };
        let gap = cur.left as i64 - last.right as i64 - 1;
        let merged_width = (cur.right + 1).saturating_sub(last.left) as f64;
        let widest = last.width().max(cur.width()) as f64;
        let should_merge = gap <= max_gap
            && last.width() <= min_piece
            && cur.width() <= min_piece
            && merged_width <= (avg_width * 1.2).max(widest * 1.6);
        if should_merge {
            *last = Segment::new(
                last.left,
                cur.right.max(last.right),
                last.top.min(cur.top),
                last.bottom.max(cur.bottom),
            );
        } else {
            merged.push(cur);
        }
    }
    merged
}
