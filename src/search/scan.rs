//! Dense correlation over one (template, scale) pair.

use crate::candidate::detection::Detection;
use crate::image::ImageView;
use crate::kernel::{Kernel, Ncc, ScoreMap, SearchImage};
use crate::template::{ScaleCandidate, TemplatePlan};
use crate::util::SymMatchResult;

/// Window variance floor used by [`match_template`].
const DEFAULT_MIN_VAR_I: f32 = 1e-8;

/// Scores `template` at every placement inside `target`.
///
/// The map is `(W - w + 1) x (H - h + 1)` with scores in `[-1, 1]`. Flat
/// templates and flat windows score 0. Fails with `TemplateTooLarge` when the
/// template exceeds the target in either axis.
pub fn match_template(
    target: ImageView<'_, u8>,
    template: ImageView<'_, u8>,
) -> SymMatchResult<ScoreMap> {
    let image = SearchImage::new(target);
    let plan = TemplatePlan::from_view(template)?;
    <Ncc as Kernel>::score_map(&image, &plan, DEFAULT_MIN_VAR_I)
}

/// Row-parallel variant of [`match_template`]; returns the same map.
#[cfg(feature = "rayon")]
pub fn match_template_par(
    target: ImageView<'_, u8>,
    template: ImageView<'_, u8>,
) -> SymMatchResult<ScoreMap> {
    let image = SearchImage::new(target);
    let plan = TemplatePlan::from_view(template)?;
    crate::kernel::rayon::ncc_score_map_par(&image, &plan, DEFAULT_MIN_VAR_I)
}

/// Correlates one resized template against the target and keeps every
/// placement scoring at least `threshold`, in row-major order.
pub(crate) fn scan_scale(
    image: &SearchImage<'_>,
    candidate: &ScaleCandidate<'_>,
    threshold: f32,
    min_var_i: f32,
) -> SymMatchResult<Vec<Detection>> {
    let plan = TemplatePlan::from_view(candidate.raster().view())?;
    let map = <Ncc as Kernel>::score_map(image, &plan, min_var_i)?;

    let symbol = candidate.template().name();
    Ok(map
        .positions_at_least(threshold)
        .map(|(x, y, score)| Detection {
            x,
            y,
            width: candidate.width(),
            height: candidate.height(),
            score,
            symbol: symbol.to_string(),
            scale: candidate.scale(),
        })
        .collect())
}
