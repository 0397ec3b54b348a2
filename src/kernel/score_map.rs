//! Dense correlation score maps.

/// Correlation scores for every valid template placement.
///
/// A map for a `W x H` target and a `w x h` template is
/// `(W - w + 1) x (H - h + 1)`; entry `(x, y)` scores the placement whose
/// top-left corner is at `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreMap {
    width: usize,
    height: usize,
    scores: Vec<f32>,
}

impl ScoreMap {
    pub(crate) fn new(width: usize, height: usize, scores: Vec<f32>) -> Self {
        debug_assert_eq!(scores.len(), width * height);
        Self {
            width,
            height,
            scores,
        }
    }

    /// Returns the number of placements along x.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of placements along y.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major score buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.scores
    }

    /// Returns the score at placement `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.scores.get(y * self.width + x).copied()
    }

    /// Returns the best `(x, y, score)`; the first in row-major order wins ties.
    pub fn max(&self) -> Option<(usize, usize, f32)> {
        let mut best: Option<(usize, usize, f32)> = None;
        for (x, y, score) in self.iter() {
            if best.map_or(true, |(_, _, b)| score > b) {
                best = Some((x, y, score));
            }
        }
        best
    }

    /// Iterates over every placement that scores at least `threshold`, row by row.
    pub fn positions_at_least(
        &self,
        threshold: f32,
    ) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        self.iter().filter(move |&(_, _, score)| score >= threshold)
    }

    fn iter(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let width = self.width;
        self.scores
            .iter()
            .enumerate()
            .map(move |(idx, &score)| (idx % width, idx / width, score))
    }
}
