use ab_glyph::{Font, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use snapocr::{BitmapFont, Recognizer, RecognizerConfig, TemplateLibrary};
use std::sync::Arc;

fn builtin_recognizer() -> Recognizer {
    Recognizer::new(Arc::new(TemplateLibrary::builtin()))
}

fn render(text: &str) -> RgbaImage {
    BitmapFont::new(4).render_text(text, 4, 8).unwrap()
}

#[test]
fn test_card_is_recognized() {
    assert_eq!(builtin_recognizer().recognize(&render("ABCD")), "ABCD");
}

#[test]
fn digit_run_is_recognized() {
    assert_eq!(builtin_recognizer().recognize(&render("0123456789")), "0123456789");
}

#[test]
fn serial_with_mixed_classes_is_recognized() {
    let out = builtin_recognizer().try_recognize(&render("7K4W9")).unwrap();
    assert_eq!(out.glyphs.len(), 5);
    assert_eq!(out.raw, "7K4W9");
    assert_eq!(out.text, "7K4W9");
}

#[test]
fn blank_capture_yields_space() {
    let blank = RgbaImage::from_pixel(90, 40, Rgba([250, 250, 250, 255]));
    assert_eq!(builtin_recognizer().recognize(&blank), " ");
}

#[test]
fn zero_sized_capture_yields_fault_marker() {
    assert_eq!(builtin_recognizer().recognize(&RgbaImage::new(0, 10)), "?");
}

#[test]
fn constrained_mode_stays_inside_the_subset() {
    let recognizer = builtin_recognizer();
    for text in ["ABCD", "XYZ7Q", "DCBA", "8080"] {
        let out = recognizer.recognize_constrained(&render(text), "ABCD");
        assert!(
            out.chars().all(|c| "ABCD?".contains(c)),
            "{text} produced {out}"
        );
    }
    assert_eq!(recognizer.recognize_constrained(&render("DCBA"), "ABCD"), "DCBA");
}

#[test]
fn card_retry_only_runs_for_matching_lengths() {
    let recognizer = builtin_recognizer().with_config(RecognizerConfig {
        test_card: Some("ABCDE".to_string()),
        ..RecognizerConfig::default()
    });
    let out = recognizer.try_recognize(&render("K4WH")).unwrap();
    assert_eq!(out.raw, "K4WH");
}

#[test]
#[ignore = "needs DejaVu Sans, Liberation Sans or Arial installed"]
fn system_font_test_card_is_recognized() {
    let path = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
    ]
    .into_iter()
    .find(|p| std::path::Path::new(p).is_file())
    .expect("no sans-serif system font found");
    let data = std::fs::read(path).unwrap();
    let face = ab_glyph::FontVec::try_from_vec(data).unwrap();

    // Draw each letter separately with generous spacing at 32 px.
    let scale = PxScale::from(32.0);
    let mut img = RgbaImage::from_pixel(200, 60, Rgba([255, 255, 255, 255]));
    let mut x = 12.0f32;
    for ch in "ABCD".chars() {
        draw_text_mut(&mut img, Rgba([0, 0, 0, 255]), x as i32, 12, scale, &face, &ch.to_string());
        x += face.as_scaled(scale).h_advance(face.glyph_id(ch)) + 8.0;
    }

    let recognizer = Recognizer::new(Arc::new(TemplateLibrary::with_system_fonts()));
    assert_eq!(recognizer.recognize(&img), "ABCD");
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn recognizer_is_shared_across_threads() {
    assert_send_sync::<Recognizer>();
    assert_send_sync::<TemplateLibrary>();

    let recognizer = builtin_recognizer();
    let captures: Vec<RgbaImage> = ["7K4W9", "0123456789", "K4XPH", "ABCD", "Z8Q2M"]
        .iter()
        .map(|text| render(text))
        .collect();
    let sequential: Vec<String> = captures.iter().map(|c| recognizer.recognize(c)).collect();

    let parallel: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = captures
            .iter()
            .map(|capture| {
                let recognizer = &recognizer;
                scope.spawn(move || recognizer.recognize(capture))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(parallel, sequential);
    assert_eq!(sequential[0], "7K4W9");
    assert_eq!(sequential[3], "ABCD");
}
