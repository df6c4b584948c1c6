//! Glyph sources for template construction.

use crate::trace::trace_debug;
use crate::util::{OcrError, OcrResult};
use ab_glyph::{FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::Path;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Renders single characters as black ink on a white square canvas.
pub trait GlyphRasterizer: Send + Sync {
    /// Identifies the source in logs and templates.
    fn name(&self) -> &str;

    /// Draws `ch` centered on a `canvas x canvas` white image, or returns
    /// `None` when the source has no glyph for it.
    fn render(&self, ch: char, canvas: u32) -> Option<RgbaImage>;
}

/// Font file locations tried by [`FontRasterizer::system_fonts`], regular
/// and bold faces of common UI fonts.
const SYSTEM_FONT_PATHS: &[&str] = &[
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "C:\\Windows\\Fonts\\segoeuib.ttf",
    "C:\\Windows\\Fonts\\verdana.ttf",
    "C:\\Windows\\Fonts\\verdanab.ttf",
    "C:\\Windows\\Fonts\\cour.ttf",
    "C:\\Windows\\Fonts\\courbd.ttf",
    "C:\\Windows\\Fonts\\times.ttf",
    "C:\\Windows\\Fonts\\timesbd.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/System/Library/Fonts/Supplemental/Verdana.ttf",
    "/System/Library/Fonts/Supplemental/Verdana Bold.ttf",
    "/System/Library/Fonts/Supplemental/Courier New.ttf",
    "/System/Library/Fonts/Supplemental/Courier New Bold.ttf",
    "/System/Library/Fonts/Supplemental/Times New Roman.ttf",
    "/System/Library/Fonts/Supplemental/Times New Roman Bold.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Arial_Bold.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Verdana.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Verdana_Bold.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Courier_New.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Courier_New_Bold.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Times_New_Roman.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Times_New_Roman_Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
];

/// Rasterizes characters from a TrueType/OpenType font.
pub struct FontRasterizer {
    name: String,
    font: FontVec,
}

impl FontRasterizer {
    /// Pixel size glyphs are drawn at, half of the default template canvas.
    pub const DEFAULT_PX: f32 = 32.0;

    /// Parses font data held in memory.
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> OcrResult<Self> {
        let name = name.into();
        let font = FontVec::try_from_vec(data).map_err(|err| OcrError::FontLoad {
            name: name.clone(),
            reason: err.to_string(),
        })?;
        Ok(Self { name, font })
    }

    /// Reads and parses a font file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> OcrResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let data = std::fs::read(path).map_err(|err| OcrError::FontLoad {
            name: name.clone(),
            reason: err.to_string(),
        })?;
        Self::from_bytes(name, data)
    }

    /// Loads every readable font from the usual system locations.
    ///
    /// Missing or unparsable files are skipped; the result may be empty.
    pub fn system_fonts() -> Vec<FontRasterizer> {
        SYSTEM_FONT_PATHS
            .iter()
            .filter(|path| Path::new(path).is_file())
            .filter_map(|path| match Self::from_path(path) {
                Ok(font) => {
                    trace_debug!("loaded_font", path = *path);
                    Some(font)
                }
                Err(_) => None,
            })
            .collect()
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, ch: char, canvas: u32) -> Option<RgbaImage> {
        let mut img = RgbaImage::from_pixel(canvas, canvas, WHITE);
        let text = ch.to_string();
        let scale = PxScale::from(Self::DEFAULT_PX);
        let (w, h) = text_size(scale, &self.font, &text);
        if w == 0 || h == 0 {
            return None;
        }
        let x = (canvas as i32 - w as i32) / 2;
        let y = (canvas as i32 - h as i32) / 2;
        draw_text_mut(&mut img, BLACK, x, y, scale, &self.font, &text);
        Some(img)
    }
}
