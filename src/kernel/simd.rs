//! SIMD-accelerated kernel using the `wide` crate.
//!
//! The inner template pixel loop is vectorized to process 4 pixels at a time
//! using `f64x4`; the row remainder falls back to scalar code.

use crate::kernel::{Kernel, SearchImage};
use crate::template::TemplatePlan;
use wide::f64x4;

const LANES: usize = 4;

/// Load 4 u8 values and convert to f64x4.
#[inline]
fn load_u8x4_as_f64x4(slice: &[u8]) -> f64x4 {
    f64x4::from([
        f64::from(slice[0]),
        f64::from(slice[1]),
        f64::from(slice[2]),
        f64::from(slice[3]),
    ])
}

/// Load 4 f64 values into f64x4.
#[inline]
fn load_f64x4(slice: &[f64]) -> f64x4 {
    f64x4::from([slice[0], slice[1], slice[2], slice[3]])
}

/// Horizontal sum of f64x4.
#[inline]
fn hsum(v: f64x4) -> f64 {
    let arr = v.to_array();
    arr[0] + arr[1] + arr[2] + arr[3]
}

/// SIMD-accelerated normalized cross-correlation kernel.
pub struct NccSimd;

impl Kernel for NccSimd {
    fn dot_at(image: &SearchImage<'_>, plan: &TemplatePlan, x: usize, y: usize) -> f64 {
        let view = image.view();
        let tpl_width = plan.width();
        let t_prime = plan.t_prime();
        let simd_end = tpl_width / LANES * LANES;

        let mut dot_vec = f64x4::ZERO;
        let mut dot_s = 0.0f64;

        for ty in 0..plan.height() {
            let img_row = view.row(y + ty).expect("row within bounds for scan");
            let base = ty * tpl_width;

            let mut tx = 0;
            while tx < simd_end {
                let img_vals = load_u8x4_as_f64x4(&img_row[x + tx..]);
                let tpl_vals = load_f64x4(&t_prime[base + tx..]);
                dot_vec += tpl_vals * img_vals;
                tx += LANES;
            }

            while tx < tpl_width {
                dot_s += t_prime[base + tx] * f64::from(img_row[x + tx]);
                tx += 1;
            }
        }

        hsum(dot_vec) + dot_s
    }
}
