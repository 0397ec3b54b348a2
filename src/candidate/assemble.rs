//! Final assembly of suppressed detections.

use crate::candidate::detection::Detection;
use std::collections::BTreeSet;

/// Returns the detections unchanged together with their unique base symbol names.
pub fn assemble(suppressed: Vec<Detection>) -> (Vec<Detection>, BTreeSet<String>) {
    let symbols = suppressed
        .iter()
        .map(|det| det.base_symbol().to_string())
        .collect();
    (suppressed, symbols)
}
