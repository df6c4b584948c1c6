//! Connected-component segmentation.

use crate::image::binary::BinaryImage;
use crate::segment::split::split_touching;
use crate::segment::{retain_usable, Segment};
use std::collections::VecDeque;

/// Components below this fraction of the largest component are noise.
const RELATIVE_AREA: f64 = 0.12;
/// Minimum vertical overlap (relative to the shorter box) for fragments to merge.
const MERGE_OVERLAP: f64 = 0.35;
/// Fragments at or below this pixel count merge regardless of overlap.
const TINY_AREA: usize = 24;

/// One 8-connected ink component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Component {
    pub(crate) bounds: Segment,
    pub(crate) area: usize,
}

/// Labels 8-connected ink components with a breadth-first flood fill.
///
/// Components are returned in raster order of their first pixel.
pub(crate) fn label_components(img: &BinaryImage) -> Vec<Component> {
    let (width, height) = (img.width(), img.height());
    let mut visited = vec![false; width * height];
    let mut queue = VecDeque::new();
    let mut components = Vec::new();

    for seed in 0..width * height {
        if visited[seed] || !img.is_ink(seed % width, seed / width) {
            continue;
        }
        let (sx, sy) = (seed % width, seed / width);
        visited[seed] = true;
        queue.push_back((sx, sy));
        let mut bounds = Segment::new(sx, sx, sy, sy);
        let mut area = 0;

        while let Some((cx, cy)) = queue.pop_front() {
            area += 1;
            bounds = bounds.union(&Segment::new(cx, cx, cy, cy));
            for ny in cy.saturating_sub(1)..=(cy + 1).min(height - 1) {
                for nx in cx.saturating_sub(1)..=(cx + 1).min(width - 1) {
                    let idx = ny * width + nx;
                    if !visited[idx] && img.is_ink(nx, ny) {
                        visited[idx] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }
        }
        components.push(Component { bounds, area });
    }
    components
}

/// Segments by connected components, reattaching broken strokes and
/// splitting components that span several touching glyphs.
pub fn segment_components(img: &BinaryImage) -> Vec<Segment> {
    let min_area = ((img.width() * img.height()) as f64 * 0.0002).floor() as usize;
    let min_area = min_area.max(4);

    let mut components: Vec<Component> = label_components(img)
        .into_iter()
        .filter(|c| c.area >= min_area && c.bounds.width() > 1 && c.bounds.height() > 1)
        .collect();
    if components.is_empty() {
        return Vec::new();
    }
    components.sort_by_key(|c| c.bounds.left);

    let max_area = components.iter().map(|c| c.area).max().unwrap_or(0);
    let threshold = ((max_area as f64 * RELATIVE_AREA).floor() as usize).max(min_area);
    let filtered: Vec<Component> = components
        .iter()
        .copied()
        .filter(|c| c.area >= threshold)
        .collect();
    let filtered = if filtered.is_empty() {
        components
    } else {
        filtered
    };

    let mut out = Vec::new();
    for comp in merge_fragments(&filtered) {
        let bounds = comp.bounds;
        let wide = bounds.width() as f64 > (bounds.height() as f64 * 1.35).max(10.0);
        if !wide {
            out.push(bounds);
            continue;
        }
        let avg_width = ((bounds.height() as f64 * 0.6).floor()).max(2.0);
        let pieces = split_touching(img, bounds, avg_width);
        if pieces.len() > 1 {
            out.extend(pieces);
        } else {
            out.push(bounds);
        }
    }
    retain_usable(out)
}

/// Joins left-to-right neighbors that touch horizontally and overlap
/// vertically, or where one side is a tiny fragment.
pub(crate) fn merge_fragments(components: &[Component]) -> Vec<Component> {
    let mut merged: Vec<Component> = Vec::with_capacity(components.len());
    for &cur in components {
        let Some(last) = merged.last_mut() else {
            merged.push(cur);
            continue;
        };
        let gap = cur.bounds.left as i64 - last.bounds.right as i64 - 1;
        let overlap_top = last.bounds.top.max(cur.bounds.top) as i64;
        let overlap_bottom = last.bounds.bottom.min(cur.bounds.bottom) as i64;
        let overlap = (overlap_bottom - overlap_top + 1).max(0) as f64;
        let min_height = last.bounds.height().min(cur.bounds.height()).max(1) as f64;
        let tiny = cur.area <= TINY_AREA || last.area <= TINY_AREA;

        if gap <= 1 && (overlap / min_height >= MERGE_OVERLAP || tiny) {
            last.bounds = last.bounds.union(&cur.bounds);
            last.area += cur.area;
        } else {
            merged.push(cur);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::{label_components, merge_fragments, segment_components, Component};
    use crate::image::binary::BinaryImage;
    use crate::segment::Segment;

    #[test]
    fn diagonal_pixels_are_one_component() {
        let img = BinaryImage::from_fn(6, 6, |x, y| x == y).unwrap();
        let comps = label_components(&img);
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].area, 6);
        assert_eq!(comps[0].bounds, Segment::new(0, 5, 0, 5));
    }

    #[test]
    fn speckles_are_dropped_relative_to_largest() {
        let img = BinaryImage::from_fn(60, 30, |x, y| {
            (5..15).contains(&x) && (5..25).contains(&y)
                || (30..32).contains(&x) && (10..12).contains(&y)
                || (40..50).contains(&x) && (5..25).contains(&y)
        })
        .unwrap();
        let segs = segment_components(&img);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].left, 5);
        assert_eq!(segs[1].left, 40);
    }

    #[test]
    fn adjacent_fragments_with_overlap_merge() {
        let a = Component {
            bounds: Segment::new(0, 5, 0, 19),
            area: 80,
        };
        let b = Component {
            bounds: Segment::new(7, 10, 4, 16),
            area: 40,
        };
        let c = Component {
            bounds: Segment::new(20, 25, 0, 19),
            area: 80,
        };
        let merged = merge_fragments(&[a, b, c]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].bounds, Segment::new(0, 10, 0, 19));
        assert_eq!(merged[0].area, 120);
    }

    #[test]
    fn wide_component_is_split() {
        // Two 10x20 bars joined by a thin strip along the bottom.
        let img = BinaryImage::from_fn(40, 24, |x, y| {
            (2..12).contains(&x) && (2..22).contains(&y)
                || (20..30).contains(&x) && (2..22).contains(&y)
                || (2..30).contains(&x) && y == 21
        })
        .unwrap();
        assert_eq!(label_components(&img).len(), 1);
        let segs = segment_components(&img);
        assert_eq!(segs.len(), 2);
        assert!(segs[0].right >= 11 && segs[0].right < 20);
        assert_eq!(segs[1].left, segs[0].right + 1);
        assert_eq!(segs[1].right, 29);
    }
}
