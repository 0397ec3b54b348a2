//! Merging per-pass candidate batches.

use crate::candidate::detection::Detection;

/// Flattens per-(template, scale) batches into one candidate list.
///
/// Batches are concatenated in the order given, which is the discovery order
/// the suppressor's stable tie-break relies on. Nothing is deduplicated here.
pub fn collect_candidates<I>(batches: I) -> Vec<Detection>
where
    I: IntoIterator<Item = Vec<Detection>>,
{
    batches.into_iter().flatten().collect()
}
