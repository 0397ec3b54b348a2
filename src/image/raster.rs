//! Owned grayscale raster buffers.

use crate::image::ImageView;
use crate::util::{SymMatchError, SymMatchResult};

/// BT.601 luma weights applied to interleaved R, G, B samples.
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// Owned contiguous grayscale image with intensities in `0..=255`.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl RasterImage {
    /// Creates a raster from a row-major buffer of exactly `width * height` samples.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> SymMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(SymMatchError::invalid_dimensions(width, height));
        }
        let needed = width
            .checked_mul(height)
            .ok_or_else(|| SymMatchError::invalid_dimensions(width, height))?;
        if data.len() != needed {
            return Err(SymMatchError::buffer_mismatch(needed, data.len()));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Converts an interleaved 1-4 channel buffer to grayscale.
    ///
    /// One channel is copied as-is, two channels are treated as luma + alpha,
    /// three and four channels as RGB(A) weighted with BT.601 luma
    /// coefficients. Alpha is ignored.
    pub fn from_interleaved(
        data: &[u8],
        width: usize,
        height: usize,
        channels: usize,
    ) -> SymMatchResult<Self> {
        if !(1..=4).contains(&channels) {
            return Err(SymMatchError::invalid_image(format!(
                "unsupported channel count {channels}"
            )));
        }
        let pixels = width
            .checked_mul(height)
            .ok_or_else(|| SymMatchError::invalid_dimensions(width, height))?;
        let needed = pixels
            .checked_mul(channels)
            .ok_or_else(|| SymMatchError::invalid_dimensions(width, height))?;
        if data.len() != needed {
            return Err(SymMatchError::buffer_mismatch(needed, data.len()));
        }

        let gray = match channels {
            1 => data.to_vec(),
            2 => data.chunks_exact(2).map(|px| px[0]).collect(),
            _ => data
                .chunks_exact(channels)
                .map(|px| {
                    let luma = LUMA_R * f32::from(px[0])
                        + LUMA_G * f32::from(px[1])
                        + LUMA_B * f32::from(px[2]);
                    luma.round().clamp(0.0, 255.0) as u8
                })
                .collect(),
        };
        Self::new(gray, width, height)
    }

    /// Copies a (possibly strided) view into a contiguous raster.
    pub fn from_view(view: ImageView<'_, u8>) -> SymMatchResult<Self> {
        let mut data = Vec::with_capacity(view.width() * view.height());
        for y in 0..view.height() {
            let row = view.row(y).ok_or_else(|| {
                SymMatchError::buffer_mismatch((y + 1) * view.stride(), view.as_slice().len())
            })?;
            data.extend_from_slice(row);
        }
        Self::new(data, view.width(), view.height())
    }

    /// Returns a borrowed view of the raster.
    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns the intensity at `(x, y)`.
    ///
    /// # Panics
    /// Panics when `(x, y)` lies outside the raster.
    pub fn at(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.data[y * self.width + x]
    }

    /// Returns the raster width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the raster height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major sample buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::RasterImage;

    #[test]
    fn rgb_to_gray_uses_luma_weights() {
        let rgb = [255u8, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let gray = RasterImage::from_interleaved(&rgb, 4, 1, 3).unwrap();
        assert_eq!(gray.data(), &[76, 150, 29, 255]);
    }

    #[test]
    fn rgba_ignores_alpha() {
        let rgba = [10u8, 10, 10, 0, 200, 200, 200, 255];
        let gray = RasterImage::from_interleaved(&rgba, 2, 1, 4).unwrap();
        assert_eq!(gray.data(), &[10, 200]);
    }

    #[test]
    fn unsupported_channel_count_is_rejected() {
        assert!(RasterImage::from_interleaved(&[0u8; 5], 1, 1, 5).is_err());
    }
}
