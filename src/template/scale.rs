//! Scale-space generation for a single template.

use crate::image::resize::resize_u8_bilinear;
use crate::image::RasterImage;
use crate::template::Template;
use crate::util::math::linspace;
use crate::util::SymMatchResult;

/// Resized templates narrower or shorter than this are not searched.
pub const MIN_TEMPLATE_SIZE: usize = 10;

/// Returns `steps` linearly spaced scale factors over `[min_scale, max_scale]`.
///
/// A single step tests `min_scale` only. Repeated factors are collapsed, so
/// `min_scale == max_scale` yields a single scale whatever `steps` is.
pub fn scale_factors(min_scale: f32, max_scale: f32, steps: usize) -> Vec<f32> {
    let mut factors = linspace(min_scale, max_scale, steps);
    factors.dedup();
    factors
}

/// A template resampled to one scale of the sweep.
///
/// Built on demand for each search and dropped once its score map has been
/// thresholded.
pub struct ScaleCandidate<'t> {
    template: &'t Template,
    scale: f32,
    img: RasterImage,
}

impl<'t> ScaleCandidate<'t> {
    /// Returns the resized `(width, height)` for `scale`, truncating toward zero.
    pub fn scaled_size(template: &Template, scale: f32) -> (usize, usize) {
        // Absorbs the f32 rounding of scales such as 0.7 so `10 * 0.7` stays 7.
        const EPS: f64 = 1e-4;
        let scale = f64::from(scale);
        let width = (template.raster().width() as f64 * scale + EPS).floor() as usize;
        let height = (template.raster().height() as f64 * scale + EPS).floor() as usize;
        (width, height)
    }

    /// Resizes `template` to `scale`.
    ///
    /// Returns `Ok(None)` when either resized dimension falls below
    /// [`MIN_TEMPLATE_SIZE`].
    pub fn build(template: &'t Template, scale: f32) -> SymMatchResult<Option<Self>> {
        let (width, height) = Self::scaled_size(template, scale);
        if width < MIN_TEMPLATE_SIZE || height < MIN_TEMPLATE_SIZE {
            return Ok(None);
        }
        let img = resize_u8_bilinear(template.view(), width, height)?;
        Ok(Some(Self {
            template,
            scale,
            img,
        }))
    }

    /// Returns the template this view was generated from.
    pub fn template(&self) -> &'t Template {
        self.template
    }

    /// Returns the scale factor.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Returns the resized width in pixels.
    pub fn width(&self) -> usize {
        self.img.width()
    }

    /// Returns the resized height in pixels.
    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Returns the resized samples.
    pub fn raster(&self) -> &RasterImage {
        &self.img
    }
}
