//! Greedy IoU-based non-maximum suppression.

use crate::candidate::detection::Detection;

/// Which detections may suppress one another.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SuppressionMode {
    /// Any detection suppresses any overlapping weaker detection, whatever its symbol.
    #[default]
    Global,
    /// Only detections sharing a base symbol name suppress one another.
    PerSymbol,
}

impl SuppressionMode {
    fn competes(self, kept: &Detection, other: &Detection) -> bool {
        match self {
            SuppressionMode::Global => true,
            SuppressionMode::PerSymbol => kept.base_symbol() == other.base_symbol(),
        }
    }
}

/// Applies identity-agnostic suppression; see [`suppress_with_mode`].
pub fn suppress(candidates: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    suppress_with_mode(candidates, iou_threshold, SuppressionMode::Global)
}

/// Greedily keeps the strongest candidate and drops everything overlapping it.
///
/// Candidates are stably sorted by descending score, so equal scores keep
/// their discovery order. Each kept detection removes every remaining
/// candidate whose IoU with it is at least `iou_threshold`. The output is in
/// emission order.
pub fn suppress_with_mode(
    mut candidates: Vec<Detection>,
    iou_threshold: f32,
    mode: SuppressionMode,
) -> Vec<Detection> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut alive = vec![true; candidates.len()];
    for i in 0..candidates.len() {
        if !alive[i] {
            continue;
        }
        let best = &candidates[i];
        for j in (i + 1)..candidates.len() {
            if alive[j]
                && mode.competes(best, &candidates[j])
                && best.iou(&candidates[j]) >= iou_threshold
            {
                alive[j] = false;
            }
        }
    }

    candidates
        .into_iter()
        .zip(alive)
        .filter_map(|(det, keep)| keep.then_some(det))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{suppress, suppress_with_mode, SuppressionMode};
    use crate::candidate::detection::Detection;

    fn det(x: usize, score: f32, symbol: &str) -> Detection {
        Detection {
            x,
            y: 0,
            width: 10,
            height: 10,
            score,
            symbol: symbol.to_string(),
            scale: 1.0,
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(suppress(Vec::new(), 0.3).is_empty());
    }

    #[test]
    fn weaker_overlap_is_removed() {
        let out = suppress(vec![det(0, 0.6, "a"), det(2, 0.9, "a"), det(50, 0.7, "a")], 0.3);
        let xs: Vec<_> = out.iter().map(|d| d.x).collect();
        assert_eq!(xs, vec![2, 50]);
    }

    #[test]
    fn removed_candidates_do_not_suppress() {
        // 0 and 8 overlap only through 4, which is dropped by 0.
        let out = suppress(vec![det(0, 0.9, "a"), det(4, 0.8, "a"), det(8, 0.7, "a")], 0.3);
        let xs: Vec<_> = out.iter().map(|d| d.x).collect();
        assert_eq!(xs, vec![0, 8]);
    }

    #[test]
    fn per_symbol_mode_keeps_other_identities() {
        let input = vec![det(0, 0.9, "a.png"), det(1, 0.8, "b.png"), det(2, 0.7, "a.jpg")];
        let global = suppress(input.clone(), 0.3);
        assert_eq!(global.len(), 1);
        let per_symbol = suppress_with_mode(input, 0.3, SuppressionMode::PerSymbol);
        let names: Vec<_> = per_symbol.iter().map(|d| d.symbol.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
    }
}
