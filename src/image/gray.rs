//! Luma conversion from RGBA captures.

use crate::image::{ImageView, OwnedImage};
use crate::util::OcrResult;
use image::RgbaImage;

/// Converts one RGB triple to luma with BT.601 weights, rounded to nearest.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let value = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    value.round().min(255.0) as u8
}

/// Grayscale image together with its 256-bucket intensity histogram.
#[derive(Clone, Debug)]
pub struct LumaImage {
    img: OwnedImage,
    histogram: [u32; 256],
}

impl LumaImage {
    /// Converts an RGBA bitmap, ignoring alpha.
    pub fn from_rgba(rgba: &RgbaImage) -> OcrResult<Self> {
        let mut histogram = [0u32; 256];
        let data: Vec<u8> = rgba
            .pixels()
            .map(|px| {
                let [r, g, b, _] = px.0;
                let v = luma(r, g, b);
                histogram[v as usize] += 1;
                v
            })
            .collect();
        let img = OwnedImage::new(data, rgba.width() as usize, rgba.height() as usize)?;
        Ok(Self { img, histogram })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.img.width()
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Returns the intensities in row-major order.
    pub fn data(&self) -> &[u8] {
        self.img.data()
    }

    /// Returns a borrowed view of the intensities.
    pub fn view(&self) -> ImageView<'_, u8> {
        self.img.view()
    }

    /// Returns the intensity histogram.
    pub fn histogram(&self) -> &[u32; 256] {
        &self.histogram
    }
}
