//! Scoring utilities shared by all query strategies.
//!
//! Pure functions: entropy of a class-probability vector, pairing of
//! identifiers with scores, deterministic score sorting, and the
//! feature-space geometry kernels the distance-based strategies build on.
use rayon::prelude::*;

use crate::config::SortDirection;
use crate::error::ActiveLearningError;
use crate::math::{Array1, Array2};

/// Shannon entropy (nats) of a probability vector over classes.
///
/// Zero-probability entries contribute nothing, so a one-hot distribution
/// has entropy 0 and a uniform distribution over `k` classes has `ln(k)`.
pub fn entropy(dist: &[f64]) -> f64 {
    -dist
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| p * p.ln())
        .sum::<f64>()
}

/// Zip identifiers with scores into `(id, score)` pairs.
pub fn pair(
    ids: &[usize],
    scores: &[f64],
) -> Result<Vec<(usize, f64)>, ActiveLearningError> {
    if ids.len() != scores.len() {
        return Err(ActiveLearningError::LengthMismatch {
            left: ids.len(),
            right: scores.len(),
        });
    }
    Ok(ids.iter().copied().zip(scores.iter().copied()).collect())
}

/// Sort `(id, score)` pairs by score, ascending (`Min`) or descending
/// (`Max`). Ties are broken by ascending identifier so results are
/// reproducible.
pub fn sort_by_score(
    mut pairs: Vec<(usize, f64)>,
    direction: SortDirection,
) -> Vec<(usize, f64)> {
    pairs.sort_by(|a, b| {
        let by_score = match direction {
            SortDirection::Min => a.1.partial_cmp(&b.1),
            SortDirection::Max => b.1.partial_cmp(&a.1),
        };
        by_score
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    pairs
}

/// Euclidean distance between two feature vectors.
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Per-column mean of a feature matrix.
pub fn centroid(x: &Array2<f64>) -> Array1<f64> {
    let (nrows, ncols) = x.shape();
    assert!(nrows > 0, "centroid requires a non-empty matrix");
    let mut mean = vec![0.0f64; ncols];
    for r in 0..nrows {
        for (c, m) in mean.iter_mut().enumerate() {
            *m += x[(r, c)];
        }
    }
    let nrows_f = nrows as f64;
    for m in mean.iter_mut() {
        *m /= nrows_f;
    }
    Array1::from_vec(mean)
}

/// Row-wise (squared) Euclidean norms.
pub fn row_norms(x: &Array2<f64>, squared: bool) -> Vec<f64> {
    (0..x.nrows())
        .map(|r| {
            let sum_of_squares: f64 = x.row_slice(r).iter().map(|&v| v * v).sum();
            if squared {
                sum_of_squares
            } else {
                sum_of_squares.sqrt()
            }
        })
        .collect()
}

/// For each row of `from`, the mean Euclidean distance to the rows of `to`.
/// Returns zeros when `to` is empty.
pub fn mean_distances(from: &Array2<f64>, to: &Array2<f64>) -> Vec<f64> {
    if to.nrows() == 0 {
        return vec![0.0; from.nrows()];
    }
    (0..from.nrows())
        .into_par_iter()
        .map(|i| {
            let row = from.row_slice(i);
            let total: f64 = (0..to.nrows()).map(|j| euclidean(row, to.row_slice(j))).sum();
            total / to.nrows() as f64
        })
        .collect()
}

/// For each row of `from`, the distance to its nearest row of `to`.
/// Returns zeros when `to` is empty.
pub fn nearest_distances(from: &Array2<f64>, to: &Array2<f64>) -> Vec<f64> {
    if to.nrows() == 0 {
        return vec![0.0; from.nrows()];
    }
    (0..from.nrows())
        .into_par_iter()
        .map(|i| {
            let row = from.row_slice(i);
            (0..to.nrows())
                .map(|j| euclidean(row, to.row_slice(j)))
                .fold(f64::INFINITY, f64::min)
        })
        .collect()
}

/// Density of each row within the pool: mean similarity `1 / (1 + d)` to
/// every other row. A single-row pool gets density 0.
pub fn densities(x: &Array2<f64>) -> Vec<f64> {
    let n = x.nrows();
    if n <= 1 {
        return vec![0.0; n];
    }
    (0..n)
        .into_par_iter()
        .map(|i| {
            let row = x.row_slice(i);
            let total: f64 = (0..n)
                .filter(|&j| j != i)
                .map(|j| 1.0 / (1.0 + euclidean(row, x.row_slice(j))))
                .sum();
            total / (n - 1) as f64
        })
        .collect()
}
