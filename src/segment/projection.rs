//! Column-projection segmentation.

use crate::image::binary::BinaryImage;
use crate::segment::split::{merge_broken, split_touching};
use crate::segment::{retain_usable, trimmed, Segment};

/// Blocks separated by at most this many empty columns are joined.
const MERGE_GAP: i64 = 0;

/// Segments by runs of non-empty columns, splitting over-wide runs and
/// re-merging slivers. Output is ordered left to right.
pub fn segment_projection(img: &BinaryImage) -> Vec<Segment> {
    let proj = img.vertical_projection(0, img.width() - 1, 0, img.height() - 1);
    let blocks = merge_close_blocks(projection_runs(&proj), MERGE_GAP);

    let prepared: Vec<Segment> = blocks
        .into_iter()
        .filter_map(|(left, right)| trimmed(img, left, right))
        .collect();
    if prepared.is_empty() {
        return Vec::new();
    }

    let avg_width =
        prepared.iter().map(|s| s.width() as f64).sum::<f64>() / prepared.len() as f64;
    let mut pieces: Vec<Segment> = prepared
        .into_iter()
        .flat_map(|seg| split_touching(img, seg, avg_width))
        .collect();
    pieces.sort_by_key(|s| s.left);

    retain_usable(merge_broken(&pieces, avg_width))
}

/// Maximal runs of columns with non-zero ink, as inclusive `(left, right)`.
pub(crate) fn projection_runs(proj: &[u32]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (x, &ink) in proj.iter().enumerate() {
        match (start, ink > 0) {
            (None, true) => start = Some(x),
            (Some(s), false) => {
                runs.push((s, x - 1));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, proj.len() - 1));
    }
    runs
}

fn merge_close_blocks(blocks: Vec<(usize, usize)>, max_gap: i64) -> Vec<(usize, usize)> {
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(blocks.len());
    for (left, right) in blocks {
        match merged.last_mut() {
            Some(last) if left as i64 - last.1 as i64 - 1 <= max_gap => last.1 = right,
            _ => merged.push((left, right)),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::{merge_close_blocks, projection_runs, segment_projection};
    use crate::image::binary::BinaryImage;

    #[test]
    fn runs_cover_non_empty_columns() {
        let proj = [0, 2, 3, 0, 0, 1, 0, 4];
        assert_eq!(projection_runs(&proj), vec![(1, 2), (5, 5), (7, 7)]);
    }

    #[test]
    fn zero_gap_merge_keeps_separated_runs() {
        let blocks = vec![(1, 2), (4, 6)];
        assert_eq!(merge_close_blocks(blocks.clone(), 0), blocks);
        assert_eq!(merge_close_blocks(blocks, 1), vec![(1, 6)]);
    }

    #[test]
    fn bars_become_trimmed_segments() {
        let img = BinaryImage::from_fn(30, 20, |x, y| {
            (2..8).contains(&x) && (3..15).contains(&y)
                || (12..18).contains(&x) && (5..17).contains(&y)
        })
        .unwrap();
        let segs = segment_projection(&img);
        assert_eq!(segs.len(), 2);
        assert_eq!((segs[0].left, segs[0].right, segs[0].top, segs[0].bottom), (2, 7, 3, 14));
        assert_eq!((segs[1].top, segs[1].bottom), (5, 16));
    }
}
