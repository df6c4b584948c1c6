//! Segmentation of synthetic captures.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snapocr::lowlevel::{binarize, segment_components, segment_projection, segment_robust};
use snapocr::{BitmapFont, BinaryImage, SegmentStrategy};

const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[test]
fn separated_glyphs_segment_one_to_one() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..12 {
        let len = rng.random_range(2..=10usize);
        let text: String = (0..len)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        // Strokes thinner than three pixels do not survive the opening.
        let scale = rng.random_range(3..=5u32);
        let gap = rng.random_range(3..=8u32);
        let rgba = BitmapFont::new(scale).render_text(&text, gap, 6).unwrap();
        let binary = binarize(&rgba).unwrap();

        let segmentation = segment_robust(&binary);
        assert_eq!(segmentation.segments.len(), len, "text {text} scale {scale} gap {gap}");
        for pair in segmentation.segments.windows(2) {
            assert!(pair[0].right < pair[1].left, "out of order for {text}");
        }
    }
}

#[test]
fn uniform_bars_agree_across_strategies() {
    for n in 2..=8usize {
        let width = 6 + n * 10;
        let img = BinaryImage::from_fn(width, 30, |x, y| {
            x >= 6 && (x - 6) % 10 < 6 && (4..26).contains(&y)
        })
        .unwrap();
        let projection = segment_projection(&img);
        let components = segment_components(&img);
        assert_eq!(projection.len(), n);
        assert_eq!(projection, components);
        assert_eq!(segment_robust(&img).strategy, SegmentStrategy::Projection);
    }
}

#[test]
fn bridged_projection_falls_back_to_components() {
    // A speck above the gap joins the two blocks in the column projection.
    let img = BinaryImage::from_fn(40, 30, |x, y| {
        let block = ((4..14).contains(&x) || (16..26).contains(&x)) && (5..25).contains(&y);
        let speck = (14..16).contains(&x) && y < 2;
        block || speck
    })
    .unwrap();
    assert_eq!(segment_projection(&img).len(), 1);
    let seg = segment_robust(&img);
    assert_eq!(seg.strategy, SegmentStrategy::Components);
    assert_eq!(seg.segments.len(), 2);
}

#[test]
fn wide_blob_is_force_cut() {
    let img = BinaryImage::from_fn(80, 20, |_, y| (2..18).contains(&y)).unwrap();
    let seg = segment_robust(&img);
    assert_eq!(seg.strategy, SegmentStrategy::ForcedCuts);
    assert!(seg.segments.len() >= 2);
}
