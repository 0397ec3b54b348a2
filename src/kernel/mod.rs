//! Normalized cross-correlation kernels.
//!
//! A kernel only has to supply the correlation dot product `Σ T'·I` for one
//! placement; window statistics come from the integral tables held by
//! [`SearchImage`], so every kernel produces the same score for the same
//! placement up to float summation order.

use crate::template::TemplatePlan;
use crate::util::{SymMatchError, SymMatchResult};

mod integral;
pub mod scalar;
mod score_map;

#[cfg(feature = "simd")]
pub mod simd;

#[cfg(feature = "rayon")]
pub mod rayon;

pub use integral::SearchImage;
pub use score_map::ScoreMap;

#[cfg(not(feature = "simd"))]
pub(crate) use scalar::NccScalar as Ncc;
#[cfg(feature = "simd")]
pub(crate) use simd::NccSimd as Ncc;

/// Kernel trait for scoring and scan operations.
pub trait Kernel {
    /// Computes `Σ T'(i, j) · I(x + i, y + j)` for the placement at `(x, y)`.
    ///
    /// The caller guarantees that the template fits at `(x, y)`.
    fn dot_at(image: &SearchImage<'_>, plan: &TemplatePlan, x: usize, y: usize) -> f64;

    /// Computes the correlation coefficient at a single placement (top-left coordinates).
    ///
    /// Returns 0 when the template or the window under it has (near) zero
    /// variance, and `f32::NEG_INFINITY` when the template does not fit at
    /// `(x, y)`.
    fn score_at(
        image: &SearchImage<'_>,
        plan: &TemplatePlan,
        x: usize,
        y: usize,
        min_var_i: f32,
    ) -> f32 {
        let (tpl_width, tpl_height) = (plan.width(), plan.height());
        if image.width() < tpl_width || image.height() < tpl_height {
            return f32::NEG_INFINITY;
        }
        if x > image.width() - tpl_width || y > image.height() - tpl_height {
            return f32::NEG_INFINITY;
        }
        if plan.is_flat() {
            return 0.0;
        }
        let var_i = image.window_variance(x, y, tpl_width, tpl_height);
        if var_i <= f64::from(min_var_i) {
            return 0.0;
        }
        let dot = Self::dot_at(image, plan, x, y);
        ncc_score(dot, plan.var_t(), var_i)
    }

    /// Scores every valid placement and returns the full score map.
    fn score_map(
        image: &SearchImage<'_>,
        plan: &TemplatePlan,
        min_var_i: f32,
    ) -> SymMatchResult<ScoreMap> {
        let (map_width, map_height) = score_map_size(image, plan)?;
        let mut scores = Vec::with_capacity(map_width * map_height);
        for y in 0..map_height {
            for x in 0..map_width {
                scores.push(Self::score_at(image, plan, x, y, min_var_i));
            }
        }
        Ok(ScoreMap::new(map_width, map_height, scores))
    }
}

/// Returns the score map dimensions, or `TemplateTooLarge` when no placement exists.
pub(crate) fn score_map_size(
    image: &SearchImage<'_>,
    plan: &TemplatePlan,
) -> SymMatchResult<(usize, usize)> {
    let (img_width, img_height) = (image.width(), image.height());
    let (tpl_width, tpl_height) = (plan.width(), plan.height());
    if img_width < tpl_width || img_height < tpl_height {
        return Err(SymMatchError::TemplateTooLarge {
            tpl_width,
            tpl_height,
            img_width,
            img_height,
        });
    }
    Ok((img_width - tpl_width + 1, img_height - tpl_height + 1))
}

fn ncc_score(dot: f64, var_t: f64, var_i: f64) -> f32 {
    let score = dot / (var_t * var_i).sqrt();
    if score.is_finite() {
        score.clamp(-1.0, 1.0) as f32
    } else {
        0.0
    }
}
