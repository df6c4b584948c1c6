//! Randomized properties of thresholding and the summed-area table.

use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snapocr::image::gray::LumaImage;
use snapocr::lowlevel::{binarize, otsu_threshold, IntegralImage};
use snapocr::ImageView;

#[test]
fn otsu_separates_bimodal_histograms() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        // Two equally wide clusters separated by at least three widths.
        let spread = rng.random_range(0..16u32);
        let dark_lo = rng.random_range(0..40u32);
        let dark_hi = dark_lo + spread;
        let bright_lo = dark_hi + rng.random_range(3 * spread + 3..3 * spread + 40);
        let bright_hi = bright_lo + spread;

        let mut hist = [0u32; 256];
        for v in (dark_lo..=dark_hi).chain(bright_lo..=bright_hi) {
            hist[v as usize] = rng.random_range(50..=100);
        }

        let t = u32::from(otsu_threshold(&hist));
        assert!(
            t >= dark_hi && t < bright_lo,
            "threshold {t} not between {dark_lo}..={dark_hi} and {bright_lo}..={bright_hi}"
        );
    }
}

#[test]
fn integral_sums_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..8 {
        let width = rng.random_range(1..12usize);
        let height = rng.random_range(1..12usize);
        let data: Vec<u8> = (0..width * height).map(|_| rng.random()).collect();
        let view = ImageView::from_slice(&data, width, height).unwrap();
        let integral = IntegralImage::from_view(view);

        for y1 in 0..height {
            for y2 in y1..height {
                for x1 in 0..width {
                    for x2 in x1..width {
                        let mut expected = 0u64;
                        for y in y1..=y2 {
                            for x in x1..=x2 {
                                expected += u64::from(data[y * width + x]);
                            }
                        }
                        assert_eq!(
                            integral.rect_sum(x1, y1, x2, y2),
                            expected,
                            "rect ({x1},{y1})-({x2},{y2}) on {width}x{height}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn luma_histogram_counts_every_pixel() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut rgba = RgbaImage::new(17, 9);
    for px in rgba.pixels_mut() {
        *px = Rgba([rng.random(), rng.random(), rng.random(), 255]);
    }
    let gray = LumaImage::from_rgba(&rgba).unwrap();
    let total: u32 = gray.histogram().iter().sum();
    assert_eq!(total, 17 * 9);
    for (i, &v) in gray.data().iter().enumerate() {
        let px = rgba.get_pixel((i % 17) as u32, (i / 17) as u32).0;
        let expected = (0.299 * f64::from(px[0]) + 0.587 * f64::from(px[1]) + 0.114 * f64::from(px[2]))
            .round() as u8;
        assert_eq!(v, expected);
    }
}

#[test]
fn dark_blocks_on_light_paper_become_ink() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..10 {
        let shade: u8 = rng.random_range(0..60);
        let paper: u8 = rng.random_range(190..=255);
        let ink = [shade, shade, shade, 255];
        let paper = [paper, paper, paper, 255];
        let mut rgba = RgbaImage::from_pixel(48, 32, Rgba(paper));
        let x0 = rng.random_range(4..20u32);
        for y in 8..24 {
            for x in x0..x0 + 12 {
                rgba.put_pixel(x, y, Rgba(ink));
            }
        }
        let binary = binarize(&rgba).unwrap();
        assert!(binary.ink_count() * 2 <= binary.width() * binary.height());
        assert!(binary.is_ink(x0 as usize + 6, 16));
        assert!(!binary.is_ink(1, 1));
    }
}
