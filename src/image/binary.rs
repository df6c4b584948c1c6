//! Two-level images with a fixed ink polarity.
//!
//! Pixels are either [`INK`] (0) or [`BACKGROUND`] (255). Everything
//! downstream of the preprocessor relies on that encoding, so constructors
//! normalize their input to exactly these two values.

use crate::image::{ImageView, OwnedImage};
use crate::util::OcrResult;
use std::collections::VecDeque;

/// Pixel value for foreground strokes.
pub const INK: u8 = 0;
/// Pixel value for everything else.
pub const BACKGROUND: u8 = 255;

/// Binary image with `INK`/`BACKGROUND` pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryImage {
    img: OwnedImage,
}

impl BinaryImage {
    /// Creates an all-background image.
    pub fn blank(width: usize, height: usize) -> OcrResult<Self> {
        Ok(Self {
            img: OwnedImage::filled(width, height, BACKGROUND)?,
        })
    }

    /// Creates an image where `is_ink(x, y)` selects the ink pixels.
    pub fn from_fn<F>(width: usize, height: usize, mut is_ink: F) -> OcrResult<Self>
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut out = Self::blank(width, height)?;
        for y in 0..height {
            for x in 0..width {
                if is_ink(x, y) {
                    out.set_ink(x, y, true);
                }
            }
        }
        Ok(out)
    }

    /// Thresholds an arbitrary 8-bit buffer: values below 128 become ink.
    pub fn from_luma(data: Vec<u8>, width: usize, height: usize) -> OcrResult<Self> {
        let mut img = OwnedImage::new(data, width, height)?;
        for v in img.data_mut() {
            *v = if *v < 128 { INK } else { BACKGROUND };
        }
        Ok(Self { img })
    }

    /// Copies a binary ROI; the caller guarantees the view only holds
    /// `INK`/`BACKGROUND` values.
    pub(crate) fn from_view(view: ImageView<'_, u8>) -> OcrResult<Self> {
        Ok(Self {
            img: OwnedImage::from_view(view)?,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.img.width()
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Returns the pixels in row-major order.
    pub fn data(&self) -> &[u8] {
        self.img.data()
    }

    /// Returns a borrowed view of the pixels.
    pub fn view(&self) -> ImageView<'_, u8> {
        self.img.view()
    }

    /// Returns true when `(x, y)` is ink. Panics when out of bounds.
    #[inline]
    pub fn is_ink(&self, x: usize, y: usize) -> bool {
        self.img.data()[y * self.width() + x] == INK
    }

    /// Sets or clears ink at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn set_ink(&mut self, x: usize, y: usize, ink: bool) {
        let idx = y * self.width() + x;
        self.img.data_mut()[idx] = if ink { INK } else { BACKGROUND };
    }

    /// Number of ink pixels.
    pub fn ink_count(&self) -> usize {
        self.data().iter().filter(|&&v| v == INK).count()
    }

    /// Swaps ink and background in place.
    pub fn invert(&mut self) {
        for v in self.img.data_mut() {
            *v = if *v == INK { BACKGROUND } else { INK };
        }
    }

    /// Clears interior ink pixels that have at most one ink 8-neighbor.
    pub fn remove_isolated_pixels(&self) -> Self {
        let mut out = self.clone();
        let (width, height) = (self.width(), self.height());
        for y in 1..height.saturating_sub(1) {
            for x in 1..width.saturating_sub(1) {
                if !self.is_ink(x, y) {
                    continue;
                }
                let mut neighbors = 0;
                for ny in y - 1..=y + 1 {
                    for nx in x - 1..=x + 1 {
                        if (nx, ny) != (x, y) && self.is_ink(nx, ny) {
                            neighbors += 1;
                        }
                    }
                }
                if neighbors <= 1 {
                    out.set_ink(x, y, false);
                }
            }
        }
        out
    }

    /// Ink erosion with a square `(2r+1)^2` element; pixels outside the
    /// image count as background.
    pub fn erode(&self, radius: usize) -> Self {
        self.morph(radius, |window_all_ink, _| window_all_ink)
    }

    /// Ink dilation with a square `(2r+1)^2` element.
    pub fn dilate(&self, radius: usize) -> Self {
        self.morph(radius, |_, window_any_ink| window_any_ink)
    }

    /// Erosion followed by dilation; removes spurs thinner than the element.
    pub fn open(&self, radius: usize) -> Self {
        self.erode(radius).dilate(radius)
    }

    /// Dilation followed by erosion; bridges gaps narrower than the element.
    pub fn close(&self, radius: usize) -> Self {
        self.dilate(radius).erode(radius)
    }

    fn morph<F>(&self, radius: usize, keep: F) -> Self
    where
        F: Fn(bool, bool) -> bool,
    {
        let (width, height) = (self.width(), self.height());
        let mut out = self.clone();
        for y in 0..height {
            for x in 0..width {
                let mut all_ink = true;
                let mut any_ink = false;
                for dy in -(radius as isize)..=radius as isize {
                    for dx in -(radius as isize)..=radius as isize {
                        let nx = x as isize + dx;
                        let ny = y as isize + dy;
                        if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                            all_ink = false;
                            continue;
                        }
                        if self.is_ink(nx as usize, ny as usize) {
                            any_ink = true;
                        } else {
                            all_ink = false;
                        }
                    }
                }
                out.set_ink(x, y, keep(all_ink, any_ink));
            }
        }
        out
    }

    /// Ink count of column `x` between rows `top..=bottom`.
    pub fn column_ink(&self, x: usize, top: usize, bottom: usize) -> u32 {
        (top..=bottom).filter(|&y| self.is_ink(x, y)).count() as u32
    }

    /// Per-column ink counts over the inclusive box.
    pub fn vertical_projection(
        &self,
        left: usize,
        right: usize,
        top: usize,
        bottom: usize,
    ) -> Vec<u32> {
        (left..=right)
            .map(|x| self.column_ink(x, top, bottom))
            .collect()
    }

    /// First and last rows holding ink within columns `left..=right`.
    pub fn ink_rows(&self, left: usize, right: usize) -> Option<(usize, usize)> {
        let has_ink = |y: usize| (left..=right).any(|x| self.is_ink(x, y));
        let top = (0..self.height()).find(|&y| has_ink(y))?;
        let bottom = (top..self.height()).rev().find(|&y| has_ink(y))?;
        Some((top, bottom))
    }

    /// Copies the inclusive box `[left, right] x [top, bottom]`.
    pub fn crop(&self, left: usize, top: usize, right: usize, bottom: usize) -> OcrResult<Self> {
        let view = self.view().roi(
            left,
            top,
            right.saturating_sub(left) + 1,
            bottom.saturating_sub(top) + 1,
        )?;
        Self::from_view(view)
    }

    /// Counts background regions (4-connected) that do not touch the border.
    pub fn count_holes(&self) -> usize {
        let (width, height) = (self.width(), self.height());
        let mut visited = vec![false; width * height];
        let mut queue = VecDeque::new();
        let mut holes = 0;

        for start in 0..width * height {
            if visited[start] || self.data()[start] == INK {
                continue;
            }
            visited[start] = true;
            queue.push_back(start);
            let mut touches_border = false;

            while let Some(idx) = queue.pop_front() {
                let (x, y) = (idx % width, idx / width);
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    touches_border = true;
                }
                let neighbors = [
                    (x + 1 < width).then(|| idx + 1),
                    (x > 0).then(|| idx - 1),
                    (y + 1 < height).then(|| idx + width),
                    (y > 0).then(|| idx - width),
                ];
                for next in neighbors.into_iter().flatten() {
                    if !visited[next] && self.data()[next] != INK {
                        visited[next] = true;
                        queue.push_back(next);
                    }
                }
            }

            if !touches_border {
                holes += 1;
            }
        }
        holes
    }

    /// Renders the image as text, `##` for ink and `..` for background.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width() * 2 + 1) * self.height());
        for row in self.view().rows() {
            for &v in row {
                out.push_str(if v == INK { "##" } else { ".." });
            }
            out.push('\n');
        }
        out
    }
}
