//! Bilinear resampling for building the template scale space.

use crate::image::{ImageView, RasterImage};
use crate::util::{SymMatchError, SymMatchResult};

/// Resizes a grayscale view to `width x height` using bilinear sampling.
///
/// Destination pixel centres map to source coordinates with
/// `src = (dst + 0.5) * (src_len / dst_len) - 0.5`, clamped to the valid
/// range, so both up- and down-sampling keep the image centred. Results are
/// rounded to the nearest integer and clamped to `[0, 255]`. A request for the
/// source size returns an exact copy.
pub fn resize_u8_bilinear(
    src: ImageView<'_, u8>,
    width: usize,
    height: usize,
) -> SymMatchResult<RasterImage> {
    if width == 0 || height == 0 {
        return Err(SymMatchError::invalid_dimensions(width, height));
    }
    if width == src.width() && height == src.height() {
        return RasterImage::from_view(src);
    }

    let src_width = src.width();
    let src_height = src.height();
    let scale_x = src_width as f32 / width as f32;
    let scale_y = src_height as f32 / height as f32;
    let max_x = (src_width - 1) as f32;
    let max_y = (src_height - 1) as f32;

    let columns: Vec<(usize, usize, f32)> = (0..width)
        .map(|x| {
            let sx = ((x as f32 + 0.5) * scale_x - 0.5).clamp(0.0, max_x);
            let x0 = sx.floor() as usize;
            let x1 = (x0 + 1).min(src_width - 1);
            (x0, x1, sx - x0 as f32)
        })
        .collect();

    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        let sy = ((y as f32 + 0.5) * scale_y - 0.5).clamp(0.0, max_y);
        let y0 = sy.floor() as usize;
        let y1 = (y0 + 1).min(src_height - 1);
        let fy = sy - y0 as f32;

        let row0 = src
            .row(y0)
            .ok_or_else(|| SymMatchError::buffer_mismatch(y0 + 1, src.as_slice().len()))?;
        let row1 = src
            .row(y1)
            .ok_or_else(|| SymMatchError::buffer_mismatch(y1 + 1, src.as_slice().len()))?;

        for &(x0, x1, fx) in &columns {
            let top = f32::from(row0[x0]) * (1.0 - fx) + f32::from(row0[x1]) * fx;
            let bottom = f32::from(row1[x0]) * (1.0 - fx) + f32::from(row1[x1]) * fx;
            let value = top * (1.0 - fy) + bottom * fy;
            out.push(value.round().clamp(0.0, 255.0) as u8);
        }
    }

    RasterImage::new(out, width, height)
}

#[cfg(test)]
mod tests {
    use super::resize_u8_bilinear;
    use crate::image::RasterImage;

    #[test]
    fn same_size_is_identity() {
        let data: Vec<u8> = (0..12).collect();
        let src = RasterImage::new(data.clone(), 4, 3).unwrap();
        let out = resize_u8_bilinear(src.view(), 4, 3).unwrap();
        assert_eq!(out.data(), data.as_slice());
    }

    #[test]
    fn constant_image_stays_constant() {
        let src = RasterImage::new(vec![77u8; 20 * 10], 20, 10).unwrap();
        let down = resize_u8_bilinear(src.view(), 7, 3).unwrap();
        assert!(down.data().iter().all(|&v| v == 77));
        let up = resize_u8_bilinear(src.view(), 45, 31).unwrap();
        assert!(up.data().iter().all(|&v| v == 77));
    }

    #[test]
    fn halving_averages_pixel_pairs() {
        let src = RasterImage::new(vec![0, 100, 200, 40], 4, 1).unwrap();
        let out = resize_u8_bilinear(src.view(), 2, 1).unwrap();
        assert_eq!(out.data(), &[50, 120]);
    }

    #[test]
    fn zero_target_size_is_invalid() {
        let src = RasterImage::new(vec![0u8; 4], 2, 2).unwrap();
        assert!(resize_u8_bilinear(src.view(), 0, 2).is_err());
    }
}
