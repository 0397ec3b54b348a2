//! Rayon-parallel score maps (feature-gated).
//!
//! Parallelizes a single (template, scale) pass over rows. The detector
//! parallelizes across (template, scale) pairs instead; this entry point
//! serves callers that match one large template at a time.

use crate::kernel::{score_map_size, Kernel, Ncc, ScoreMap, SearchImage};
use crate::template::TemplatePlan;
use crate::util::SymMatchResult;
use rayon::prelude::*;

/// Row-parallel full score map.
///
/// Produces exactly the same map as the sequential kernel.
pub fn ncc_score_map_par(
    image: &SearchImage<'_>,
    plan: &TemplatePlan,
    min_var_i: f32,
) -> SymMatchResult<ScoreMap> {
    let (map_width, map_height) = score_map_size(image, plan)?;

    let rows: Vec<Vec<f32>> = (0..map_height)
        .into_par_iter()
        .map(|y| {
            (0..map_width)
                .map(|x| <Ncc as Kernel>::score_at(image, plan, x, y, min_var_i))
                .collect()
        })
        .collect();

    let scores = rows.into_iter().flatten().collect();
    Ok(ScoreMap::new(map_width, map_height, scores))
}
