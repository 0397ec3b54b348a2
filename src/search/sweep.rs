//! Multi-scale sweep over every (template, scale) pair.
//!
//! Each pair is an independent pass against the shared, read-only target.
//! Passes produce candidate batches that are merged in pair order once all of
//! them have finished; nothing is accumulated through shared state.

use crate::candidate::collect::collect_candidates;
use crate::candidate::detection::Detection;
use crate::kernel::SearchImage;
use crate::search::cancel::CancelToken;
use crate::search::scan::scan_scale;
use crate::search::{DetectConfig, SkippedScale};
use crate::template::{scale_factors, ScaleCandidate, Template};
use crate::trace::{trace_event, trace_skip, trace_span};
use crate::util::{SymMatchError, SymMatchResult};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// One (template, scale) unit of work.
#[derive(Clone, Copy, Debug)]
struct ScaleTask {
    template_idx: usize,
    scale: f32,
}

enum TaskOutcome {
    Candidates(Vec<Detection>),
    Skipped(SkippedScale),
}

/// Candidates gathered from every pass, plus the passes that were skipped.
pub(crate) struct SweepOutput {
    pub(crate) candidates: Vec<Detection>,
    pub(crate) skipped: Vec<SkippedScale>,
}

pub(crate) fn sweep(
    image: &SearchImage<'_>,
    templates: &[Template],
    cfg: &DetectConfig,
    cancel: &CancelToken,
) -> SymMatchResult<SweepOutput> {
    let scales = scale_factors(cfg.min_scale, cfg.max_scale, cfg.scale_steps);
    let tasks: Vec<ScaleTask> = (0..templates.len())
        .flat_map(|template_idx| {
            scales.iter().map(move |&scale| ScaleTask {
                template_idx,
                scale,
            })
        })
        .collect();

    let outcomes = run_tasks(image, templates, &tasks, cfg, cancel)?;

    let mut batches = Vec::with_capacity(outcomes.len());
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            TaskOutcome::Candidates(batch) => batches.push(batch),
            TaskOutcome::Skipped(skip) => skipped.push(skip),
        }
    }
    let candidates = collect_candidates(batches);
    trace_event!(
        "sweep_candidates",
        count = candidates.len(),
        skipped = skipped.len()
    );
    Ok(SweepOutput {
        candidates,
        skipped,
    })
}

#[cfg(feature = "rayon")]
fn run_tasks(
    image: &SearchImage<'_>,
    templates: &[Template],
    tasks: &[ScaleTask],
    cfg: &DetectConfig,
    cancel: &CancelToken,
) -> SymMatchResult<Vec<TaskOutcome>> {
    if !cfg.parallel {
        return run_tasks_seq(image, templates, tasks, cfg, cancel);
    }
    let _span = trace_span!("sweep", tasks = tasks.len(), parallel = true).entered();
    // Indexed collect keeps task order, so the merge matches the sequential run.
    let results: Vec<SymMatchResult<TaskOutcome>> = tasks
        .par_iter()
        .map(|task| run_task(image, &templates[task.template_idx], task.scale, cfg, cancel))
        .collect();
    results.into_iter().collect()
}

#[cfg(not(feature = "rayon"))]
fn run_tasks(
    image: &SearchImage<'_>,
    templates: &[Template],
    tasks: &[ScaleTask],
    cfg: &DetectConfig,
    cancel: &CancelToken,
) -> SymMatchResult<Vec<TaskOutcome>> {
    run_tasks_seq(image, templates, tasks, cfg, cancel)
}

fn run_tasks_seq(
    image: &SearchImage<'_>,
    templates: &[Template],
    tasks: &[ScaleTask],
    cfg: &DetectConfig,
    cancel: &CancelToken,
) -> SymMatchResult<Vec<TaskOutcome>> {
    let _span = trace_span!("sweep", tasks = tasks.len(), parallel = false).entered();
    let mut outcomes = Vec::with_capacity(tasks.len());
    for task in tasks {
        outcomes.push(run_task(
            image,
            &templates[task.template_idx],
            task.scale,
            cfg,
            cancel,
        )?);
    }
    Ok(outcomes)
}

fn run_task(
    image: &SearchImage<'_>,
    template: &Template,
    scale: f32,
    cfg: &DetectConfig,
    cancel: &CancelToken,
) -> SymMatchResult<TaskOutcome> {
    if cancel.is_cancelled() {
        return Err(SymMatchError::Cancelled);
    }

    let candidate = match ScaleCandidate::build(template, scale) {
        Ok(Some(candidate)) => candidate,
        Ok(None) => return Ok(TaskOutcome::Candidates(Vec::new())),
        Err(err) => return Ok(skip(template, scale, err)),
    };

    let _span = trace_span!(
        "match_scale",
        symbol = template.name(),
        scale = scale,
        width = candidate.width(),
        height = candidate.height()
    )
    .entered();

    if cancel.is_cancelled() {
        return Err(SymMatchError::Cancelled);
    }

    match scan_scale(image, &candidate, cfg.match_threshold, cfg.min_var_i) {
        Ok(batch) => {
            trace_event!("scale_candidates", count = batch.len());
            Ok(TaskOutcome::Candidates(batch))
        }
        Err(SymMatchError::Cancelled) => Err(SymMatchError::Cancelled),
        Err(err) => Ok(skip(template, scale, err)),
    }
}

fn skip(template: &Template, scale: f32, error: SymMatchError) -> TaskOutcome {
    let reason = error.to_string();
    trace_skip!(
        "scale_skipped",
        symbol = template.name(),
        scale = scale,
        reason = reason.as_str()
    );
    TaskOutcome::Skipped(SkippedScale {
        symbol: template.name().to_string(),
        scale,
        error,
    })
}
