//! Built-in 5x7 dot-matrix font.

use crate::bank::render::GlyphRasterizer;
use crate::util::{OcrError, OcrResult};
use image::{Rgba, RgbaImage};

const CELL_W: usize = 5;
const CELL_H: usize = 7;

/// Rows of each glyph, `#` for ink. Every glyph's ink columns are contiguous
/// so a rendered glyph is one projection block.
const GLYPHS: &[(char, [&str; CELL_H])] = &[
    ('0', [".##..", "#..#.", "#..#.", "#..#.", "#..#.", "#..#.", ".##.."]),
    ('1', ["..#..", ".##..", "..#..", "..#..", "..#..", "..#..", ".###."]),
    ('2', [".###.", "#...#", "....#", "...#.", "..#..", ".#...", "#####"]),
    ('3', ["#####", "...#.", "..#..", "...#.", "....#", "#...#", ".###."]),
    ('4', ["...#.", "..##.", ".#.#.", "#..#.", "#####", "...#.", "...#."]),
    ('5', ["#####", "#....", "####.", "....#", "....#", "#...#", ".###."]),
    ('6', ["..##.", ".#...", "#....", "####.", "#...#", "#...#", ".###."]),
    ('7', ["#####", "....#", "...#.", "..#..", ".#...", ".#...", ".#..."]),
    ('8', [".###.", "#...#", "#...#", ".###.", "#...#", "#...#", ".###."]),
    ('9', [".###.", "#...#", "#...#", ".####", "....#", "...#.", ".##.."]),
    ('A', [".###.", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"]),
    ('B', ["####.", "#...#", "#...#", "####.", "#...#", "#...#", "####."]),
    ('C', [".###.", "#...#", "#....", "#....", "#....", "#...#", ".###."]),
    ('D', ["###..", "#..#.", "#...#", "#...#", "#...#", "#..#.", "###.."]),
    ('E', ["#####", "#....", "#....", "####.", "#....", "#....", "#####"]),
    ('F', ["#####", "#....", "#....", "####.", "#....", "#....", "#...."]),
    ('G', [".###.", "#...#", "#....", "#.###", "#...#", "#...#", ".####"]),
    ('H', ["#...#", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"]),
    ('I', [".###.", "..#..", "..#..", "..#..", "..#..", "..#..", ".###."]),
    ('J', ["..###", "...#.", "...#.", "...#.", "...#.", "#..#.", ".##.."]),
    ('K', ["#...#", "#..#.", "#.#..", "##...", "#.#..", "#..#.", "#...#"]),
    ('L', ["#....", "#....", "#....", "#....", "#....", "#....", "#####"]),
    ('M', ["#...#", "##.##", "#.#.#", "#.#.#", "#...#", "#...#", "#...#"]),
    ('N', ["#...#", "#...#", "##..#", "#.#.#", "#..##", "#...#", "#...#"]),
    ('O', [".###.", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."]),
    ('P', ["####.", "#...#", "#...#", "####.", "#....", "#....", "#...."]),
    ('Q', [".###.", "#...#", "#...#", "#...#", "#.#.#", "#..#.", ".##.#"]),
    ('R', ["####.", "#...#", "#...#", "####.", "#.#..", "#..#.", "#...#"]),
    ('S', [".####", "#....", "#....", ".###.", "....#", "....#", "####."]),
    ('T', ["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "..#.."]),
    ('U', ["#...#", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."]),
    ('V', ["#...#", "#...#", "#...#", "#...#", "#...#", ".#.#.", "..#.."]),
    ('W', ["#...#", "#...#", "#...#", "#.#.#", "#.#.#", "#.#.#", ".#.#."]),
    ('X', ["#...#", "#...#", ".#.#.", "..#..", ".#.#.", "#...#", "#...#"]),
    ('Y', ["#...#", "#...#", ".#.#.", "..#..", "..#..", "..#..", "..#.."]),
    ('Z', ["#####", "....#", "...#.", "..#..", ".#...", "#....", "#####"]),
];

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Deterministic dot-matrix face covering `0-9` and `A-Z`.
///
/// Each cell of the 5x7 grid becomes a `scale x scale` block. Useful when no
/// system font is installed and for reproducible synthetic captures.
#[derive(Clone, Copy, Debug)]
pub struct BitmapFont {
    scale: u32,
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self { scale: 6 }
    }
}

impl BitmapFont {
    /// Creates a face drawing each grid cell as a `scale`-pixel block.
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
        }
    }

    /// Block size in pixels.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// The 5x7 grid for `ch`, case-insensitive for letters.
    pub fn glyph(ch: char) -> Option<&'static [&'static str; CELL_H]> {
        let ch = ch.to_ascii_uppercase();
        GLYPHS.iter().find(|(c, _)| *c == ch).map(|(_, rows)| rows)
    }

    /// Width and height of one rendered glyph.
    pub fn cell_size(&self) -> (u32, u32) {
        (CELL_W as u32 * self.scale, CELL_H as u32 * self.scale)
    }

    fn draw(&self, img: &mut RgbaImage, rows: &[&str; CELL_H], x0: u32, y0: u32) {
        for (gy, row) in rows.iter().enumerate() {
            for (gx, cell) in row.bytes().enumerate() {
                if cell != b'#' {
                    continue;
                }
                let bx = x0 + gx as u32 * self.scale;
                let by = y0 + gy as u32 * self.scale;
                for y in by..by + self.scale {
                    for x in bx..bx + self.scale {
                        img.put_pixel(x, y, BLACK);
                    }
                }
            }
        }
    }

    /// Renders a line of text with `gap` pixels between cells and a white
    /// `margin` around the line. Spaces leave an empty cell.
    pub fn render_text(&self, text: &str, gap: u32, margin: u32) -> OcrResult<RgbaImage> {
        let (cell_w, cell_h) = self.cell_size();
        let count = text.chars().count() as u32;
        let width = 2 * margin + count * cell_w + count.saturating_sub(1) * gap;
        let height = 2 * margin + cell_h;
        if width == 0 || height == 0 {
            return Err(OcrError::InvalidDimensions {
                width: width as usize,
                height: height as usize,
            });
        }

        let mut img = RgbaImage::from_pixel(width, height, WHITE);
        for (i, ch) in text.chars().enumerate() {
            if let Some(rows) = Self::glyph(ch) {
                let x0 = margin + i as u32 * (cell_w + gap);
                self.draw(&mut img, rows, x0, margin);
            }
        }
        Ok(img)
    }
}

impl GlyphRasterizer for BitmapFont {
    fn name(&self) -> &str {
        "bitmap-5x7"
    }

    fn render(&self, ch: char, canvas: u32) -> Option<RgbaImage> {
        // Lowercase letters are left to real fonts.
        if !ch.is_ascii_digit() && !ch.is_ascii_uppercase() {
            return None;
        }
        let rows = Self::glyph(ch)?;
        let (cell_w, cell_h) = self.cell_size();
        if cell_w > canvas || cell_h > canvas {
            return None;
        }
        let mut img = RgbaImage::from_pixel(canvas, canvas, WHITE);
        self.draw(&mut img, rows, (canvas - cell_w) / 2, (canvas - cell_h) / 2);
        Some(img)
    }
}

#[cfg(test)]
mod tests {
    use super::{BitmapFont, CELL_W, GLYPHS};
    use crate::bank::render::GlyphRasterizer;

    #[test]
    fn table_covers_digits_and_uppercase() {
        assert_eq!(GLYPHS.len(), 36);
        for ch in ('0'..='9').chain('A'..='Z') {
            assert!(BitmapFont::glyph(ch).is_some(), "missing glyph {ch}");
        }
    }

    #[test]
    fn glyph_rows_have_contiguous_ink_columns() {
        for (ch, rows) in GLYPHS {
            let used: Vec<bool> = (0..CELL_W)
                .map(|x| rows.iter().any(|r| r.as_bytes()[x] == b'#'))
                .collect();
            let first = used.iter().position(|&u| u).unwrap();
            let last = used.iter().rposition(|&u| u).unwrap();
            assert!(used[first..=last].iter().all(|&u| u), "gap in {ch}");
        }
    }

    #[test]
    fn scale_is_at_least_one() {
        assert_eq!(BitmapFont::new(0).scale(), 1);
        assert_eq!(BitmapFont::default().scale(), 6);
        assert_eq!(BitmapFont::new(3).cell_size(), (15, 21));
    }

    #[test]
    fn render_text_lays_out_cells() {
        let font = BitmapFont::new(2);
        let img = font.render_text("AB", 3, 4).unwrap();
        assert_eq!(img.dimensions(), (4 * 2 + 2 * 10 + 3, 4 * 2 + 14));
        // Top-left of 'A' is blank, its second column is ink.
        assert_eq!(img.get_pixel(4, 4).0[0], 255);
        assert_eq!(img.get_pixel(6, 4).0[0], 0);
    }

    #[test]
    fn lowercase_is_not_rendered() {
        assert!(BitmapFont::default().render('a', 64).is_none());
        assert!(BitmapFont::default().render('Q', 64).is_some());
        assert!(BitmapFont::new(20).render('Q', 64).is_none());
    }
}
