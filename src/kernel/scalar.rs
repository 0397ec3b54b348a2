//! Scalar reference kernel.

use crate::kernel::{Kernel, SearchImage};
use crate::template::TemplatePlan;

/// Scalar normalized cross-correlation kernel.
pub struct NccScalar;

impl Kernel for NccScalar {
    fn dot_at(image: &SearchImage<'_>, plan: &TemplatePlan, x: usize, y: usize) -> f64 {
        let view = image.view();
        let tpl_width = plan.width();
        let t_prime = plan.t_prime();

        let mut dot = 0.0f64;
        for ty in 0..plan.height() {
            let img_row = view.row(y + ty).expect("row within bounds for scan");
            let tpl_row = &t_prime[ty * tpl_width..(ty + 1) * tpl_width];
            for (t, &value) in tpl_row.iter().zip(&img_row[x..x + tpl_width]) {
                dot += t * f64::from(value);
            }
        }
        dot
    }
}
