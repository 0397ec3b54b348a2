//! Numeric helpers for the scale sweep and box geometry.

/// Returns `steps` evenly spaced values over `[start, end]` inclusive.
///
/// A single step yields only `start`; zero steps yield an empty vector.
pub(crate) fn linspace(start: f32, end: f32, steps: usize) -> Vec<f32> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let span = f64::from(end) - f64::from(start);
            let denom = (steps - 1) as f64;
            (0..steps)
                .map(|i| {
                    if i == steps - 1 {
                        end
                    } else {
                        (f64::from(start) + span * i as f64 / denom) as f32
                    }
                })
                .collect()
        }
    }
}

/// Length of the overlap between `[a0, a1)` and `[b0, b1)`, zero when disjoint.
pub(crate) fn overlap_1d(a0: usize, a1: usize, b0: usize, b1: usize) -> usize {
    let lo = a0.max(b0);
    let hi = a1.min(b1);
    hi.saturating_sub(lo)
}
