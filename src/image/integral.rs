//! Summed-area table for constant-time rectangle sums.

use crate::image::ImageView;

/// Integral image with a zero row and column of padding.
///
/// Entry `(x, y)` of the padded table holds the sum of all pixels strictly
/// above and to the left of pixel `(x, y)` of the source.
#[derive(Clone, Debug)]
pub struct IntegralImage {
    width: usize,
    height: usize,
    sums: Vec<u64>,
}

impl IntegralImage {
    /// Builds the table from a grayscale view.
    pub fn from_view(view: ImageView<'_, u8>) -> Self {
        let width = view.width();
        let height = view.height();
        let stride = width + 1;
        let mut sums = vec![0u64; stride * (height + 1)];
        for (y, row) in view.rows().enumerate() {
            let mut row_sum = 0u64;
            for (x, &value) in row.iter().enumerate() {
                row_sum += u64::from(value);
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + row_sum;
            }
        }
        Self {
            width,
            height,
            sums,
        }
    }

    /// Returns the source width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the source height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sum over the inclusive rectangle `[x1, x2] x [y1, y2]`.
    ///
    /// Coordinates must satisfy `x1 <= x2 < width` and `y1 <= y2 < height`.
    pub fn rect_sum(&self, x1: usize, y1: usize, x2: usize, y2: usize) -> u64 {
        debug_assert!(x1 <= x2 && x2 < self.width);
        debug_assert!(y1 <= y2 && y2 < self.height);
        let stride = self.width + 1;
        let a = self.sums[y1 * stride + x1];
        let b = self.sums[y1 * stride + x2 + 1];
        let c = self.sums[(y2 + 1) * stride + x1];
        let d = self.sums[(y2 + 1) * stride + x2 + 1];
        d + a - b - c
    }
}
