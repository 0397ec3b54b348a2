//! Template plan precomputation for normalized cross-correlation.

use crate::image::ImageView;
use crate::util::{SymMatchError, SymMatchResult};

/// Template variance at or below this is treated as a flat template.
pub(crate) const MIN_VAR_T: f64 = 1e-8;

/// Precomputed statistics and zero-mean buffer for template matching.
///
/// Constant templates are accepted: their `var_t` is zero and every score
/// computed against them is zero.
pub struct TemplatePlan {
    width: usize,
    height: usize,
    var_t: f64,
    t_prime: Vec<f64>,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    pub fn from_view(tpl: ImageView<'_, u8>) -> SymMatchResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let count = width
            .checked_mul(height)
            .ok_or_else(|| SymMatchError::invalid_dimensions(width, height))?;

        let mut sum = 0u64;
        for y in 0..height {
            let row = tpl.row(y).ok_or_else(|| {
                SymMatchError::buffer_mismatch((y + 1) * tpl.stride(), tpl.as_slice().len())
            })?;
            sum += row.iter().map(|&v| u64::from(v)).sum::<u64>();
        }
        let mean = sum as f64 / count as f64;

        let mut t_prime = Vec::with_capacity(count);
        let mut var_t = 0.0f64;
        for y in 0..height {
            let row = tpl.row(y).ok_or_else(|| {
                SymMatchError::buffer_mismatch((y + 1) * tpl.stride(), tpl.as_slice().len())
            })?;
            for &value in row {
                let centered = f64::from(value) - mean;
                var_t += centered * centered;
                t_prime.push(centered);
            }
        }

        Ok(Self {
            width,
            height,
            var_t,
            t_prime,
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `Σ (T - mean)²` over all template pixels.
    pub fn var_t(&self) -> f64 {
        self.var_t
    }

    /// Returns the zero-mean template buffer in row-major order.
    pub fn t_prime(&self) -> &[f64] {
        &self.t_prime
    }

    /// Returns `true` when the template has no intensity variation.
    pub fn is_flat(&self) -> bool {
        self.var_t <= MIN_VAR_T
    }
}

#[cfg(test)]
mod tests {
    use super::TemplatePlan;
    use crate::image::ImageView;

    #[test]
    fn zero_mean_buffer_and_variance() {
        let data = [10u8, 20, 30, 40];
        let plan = TemplatePlan::from_view(ImageView::from_slice(&data, 2, 2).unwrap()).unwrap();
        assert_eq!(plan.t_prime(), &[-15.0, -5.0, 5.0, 15.0]);
        assert_eq!(plan.var_t(), 500.0);
        assert!(!plan.is_flat());
    }

    #[test]
    fn constant_template_is_flat() {
        let data = vec![90u8; 12 * 12];
        let plan = TemplatePlan::from_view(ImageView::from_slice(&data, 12, 12).unwrap()).unwrap();
        assert!(plan.is_flat());
        assert!(plan.t_prime().iter().all(|&v| v == 0.0));
    }
}
