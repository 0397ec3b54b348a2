//! Integral tables for constant-time window statistics.

use crate::image::ImageView;

/// A target image prepared for correlation.
///
/// Holds summed-area tables of intensities and squared intensities so the
/// mean and variance of any window can be read in constant time. The tables
/// use exact integer arithmetic, which keeps window variances free of
/// cancellation error. Built once per target and shared read-only by every
/// (template, scale) pass.
pub struct SearchImage<'a> {
    view: ImageView<'a, u8>,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

impl<'a> SearchImage<'a> {
    /// Builds the integral tables for `view`.
    pub fn new(view: ImageView<'a, u8>) -> Self {
        let width = view.width();
        let height = view.height();
        let stride = width + 1;
        let mut sum = vec![0u64; stride * (height + 1)];
        let mut sum_sq = vec![0u64; stride * (height + 1)];

        for y in 0..height {
            let row = view.row(y).expect("row within bounds of a validated view");
            let mut row_sum = 0u64;
            let mut row_sum_sq = 0u64;
            for (x, &value) in row.iter().enumerate() {
                let v = u64::from(value);
                row_sum += v;
                row_sum_sq += v * v;
                let idx = (y + 1) * stride + x + 1;
                sum[idx] = sum[idx - stride] + row_sum;
                sum_sq[idx] = sum_sq[idx - stride] + row_sum_sq;
            }
        }

        Self { view, sum, sum_sq }
    }

    /// Returns the underlying image view.
    pub fn view(&self) -> ImageView<'a, u8> {
        self.view
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.view.width()
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.view.height()
    }

    /// Returns `(Σ I, Σ I²)` over the `width x height` window at `(x, y)`.
    pub fn window_sums(&self, x: usize, y: usize, width: usize, height: usize) -> (u64, u64) {
        let stride = self.width() + 1;
        let a = y * stride + x;
        let b = y * stride + x + width;
        let c = (y + height) * stride + x;
        let d = (y + height) * stride + x + width;
        let s = self.sum[d] + self.sum[a] - self.sum[b] - self.sum[c];
        let s2 = self.sum_sq[d] + self.sum_sq[a] - self.sum_sq[b] - self.sum_sq[c];
        (s, s2)
    }

    /// Returns `Σ (I - Ī)²` over the window at `(x, y)`.
    pub fn window_variance(&self, x: usize, y: usize, width: usize, height: usize) -> f64 {
        let (s, s2) = self.window_sums(x, y, width, height);
        let n = (width * height) as u128;
        let numer = n * u128::from(s2) - u128::from(s) * u128::from(s);
        numer as f64 / n as f64
    }
}
