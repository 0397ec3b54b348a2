//! Multi-scale symbol search.
//!
//! [`SymbolDetector`] sweeps every template over a range of scales, keeps
//! each placement whose correlation clears the match threshold, suppresses
//! overlapping candidates, and reports the survivors together with the set of
//! matched symbol names.

pub(crate) mod cancel;
pub(crate) mod scan;
mod sweep;

use crate::candidate::assemble::assemble;
use crate::candidate::detection::Detection;
use crate::candidate::nms::{suppress_with_mode, SuppressionMode};
use crate::image::ImageView;
use crate::kernel::SearchImage;
use crate::template::Template;
use crate::trace::{trace_event, trace_span};
use crate::util::{SymMatchError, SymMatchResult};
use cancel::CancelToken;
use std::collections::BTreeSet;

/// Configuration for a detection run.
#[derive(Clone, Debug)]
pub struct DetectConfig {
    /// Smallest scale factor applied to each template.
    pub min_scale: f32,
    /// Largest scale factor applied to each template.
    pub max_scale: f32,
    /// Number of linearly spaced scales in `[min_scale, max_scale]`.
    pub scale_steps: usize,
    /// Minimum correlation score for a placement to become a candidate.
    pub match_threshold: f32,
    /// Overlap ratio at or above which the weaker candidate is suppressed.
    pub iou_threshold: f32,
    /// Which candidates may suppress one another.
    pub suppression: SuppressionMode,
    /// Run (template, scale) passes on the rayon pool (requires `rayon`).
    pub parallel: bool,
    /// Window variance at or below which a window counts as flat and scores 0.
    pub min_var_i: f32,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 1.0,
            scale_steps: 20,
            match_threshold: 0.5,
            iou_threshold: 0.3,
            suppression: SuppressionMode::Global,
            parallel: false,
            min_var_i: 1e-8,
        }
    }
}

impl DetectConfig {
    /// Checks ranges before any matching work starts.
    pub fn validate(&self) -> SymMatchResult<()> {
        if self.scale_steps == 0 {
            return Err(SymMatchError::InvalidConfig {
                reason: "scale_steps must be at least 1",
            });
        }
        if !self.min_scale.is_finite() || !self.max_scale.is_finite() {
            return Err(SymMatchError::InvalidConfig {
                reason: "scales must be finite",
            });
        }
        if self.min_scale <= 0.0 {
            return Err(SymMatchError::InvalidConfig {
                reason: "min_scale must be positive",
            });
        }
        if self.min_scale > self.max_scale {
            return Err(SymMatchError::InvalidConfig {
                reason: "min_scale must not exceed max_scale",
            });
        }
        if !(0.0..=1.0).contains(&self.match_threshold) {
            return Err(SymMatchError::InvalidConfig {
                reason: "match_threshold must lie in [0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(SymMatchError::InvalidConfig {
                reason: "iou_threshold must lie in [0, 1]",
            });
        }
        if !self.min_var_i.is_finite() || self.min_var_i < 0.0 {
            return Err(SymMatchError::InvalidConfig {
                reason: "min_var_i must be finite and non-negative",
            });
        }
        Ok(())
    }
}

/// A (template, scale) pass that contributed no candidates because it failed.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedScale {
    /// Template name.
    pub symbol: String,
    /// Scale factor of the skipped pass.
    pub scale: f32,
    /// Why the pass was skipped, typically `TemplateTooLarge`.
    pub error: SymMatchError,
}

/// Everything a detection run produces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectionReport {
    /// Surviving detections in descending score order.
    pub detections: Vec<Detection>,
    /// Unique base names of the detected symbols.
    pub symbols: BTreeSet<String>,
    /// Passes skipped without aborting the run.
    pub skipped: Vec<SkippedScale>,
}

/// Multi-scale detector over a fixed set of templates.
pub struct SymbolDetector {
    templates: Vec<Template>,
    cfg: DetectConfig,
}

impl SymbolDetector {
    /// Creates a detector with the default configuration.
    pub fn new(templates: Vec<Template>) -> Self {
        Self {
            templates,
            cfg: DetectConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: DetectConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DetectConfig {
        &self.cfg
    }

    /// Returns the templates searched for.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Detects symbols and returns the surviving detections.
    pub fn detect(&self, image: ImageView<'_, u8>) -> SymMatchResult<Vec<Detection>> {
        Ok(self.detect_report(image)?.detections)
    }

    /// Detects symbols and returns the full report.
    pub fn detect_report(&self, image: ImageView<'_, u8>) -> SymMatchResult<DetectionReport> {
        self.detect_with_cancel(image, &CancelToken::new())
    }

    /// Detects symbols, giving up with `Cancelled` once `cancel` is raised.
    pub fn detect_with_cancel(
        &self,
        image: ImageView<'_, u8>,
        cancel: &CancelToken,
    ) -> SymMatchResult<DetectionReport> {
        run_detection(image, &self.templates, &self.cfg, cancel)
    }
}

fn run_detection(
    image: ImageView<'_, u8>,
    templates: &[Template],
    cfg: &DetectConfig,
    cancel: &CancelToken,
) -> SymMatchResult<DetectionReport> {
    cfg.validate()?;
    let _span = trace_span!(
        "detect_symbols",
        templates = templates.len(),
        scales = cfg.scale_steps
    )
    .entered();

    let search_image = SearchImage::new(image);
    let swept = sweep::sweep(&search_image, templates, cfg, cancel)?;
    if cancel.is_cancelled() {
        return Err(SymMatchError::Cancelled);
    }

    let suppressed = {
        let _span = trace_span!("suppress", candidates = swept.candidates.len()).entered();
        suppress_with_mode(swept.candidates, cfg.iou_threshold, cfg.suppression)
    };
    let (detections, symbols) = assemble(suppressed);
    trace_event!(
        "detections",
        count = detections.len(),
        symbols = symbols.len()
    );

    Ok(DetectionReport {
        detections,
        symbols,
        skipped: swept.skipped,
    })
}

/// Searches `image` for every template and returns the surviving detections.
pub fn detect_symbols(
    image: ImageView<'_, u8>,
    templates: &[Template],
    cfg: &DetectConfig,
) -> SymMatchResult<Vec<Detection>> {
    Ok(run_detection(image, templates, cfg, &CancelToken::new())?.detections)
}
