//! Seeded k-means used by cluster-margin sampling.
//!
//! Lloyd's algorithm with k-means++ initialization. The caller supplies the
//! seed, so a fixed pool always produces the same centroids.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::math::Array2;
use crate::utils::euclidean;

pub struct KMeansFit {
    pub centroids: Array2<f64>,
    pub assignments: Vec<usize>,
}

/// Cluster the rows of `x` into `k` groups.
///
/// `k` is clamped to the number of rows. Empty clusters keep their previous
/// centroid.
pub fn kmeans(x: &Array2<f64>, k: usize, max_iter: usize, seed: u64) -> KMeansFit {
    let n = x.nrows();
    let d = x.ncols();
    assert!(n > 0, "kmeans requires a non-empty matrix");
    let k = k.max(1).min(n);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids = init_plus_plus(x, k, &mut rng);
    let mut assignments = vec![0usize; n];

    for _ in 0..max_iter {
        // Assignment step
        let mut changed = false;
        for i in 0..n {
            let row = x.row_slice(i);
            let mut best = 0usize;
            let mut best_dist = f64::INFINITY;
            for c in 0..k {
                let dist = euclidean(row, centroids.row_slice(c));
                if dist < best_dist {
                    best_dist = dist;
                    best = c;
                }
            }
            if assignments[i] != best {
                assignments[i] = best;
                changed = true;
            }
        }

        // Update step
        let mut sums = vec![0.0f64; k * d];
        let mut counts = vec![0usize; k];
        for i in 0..n {
            let c = assignments[i];
            counts[c] += 1;
            for (j, &v) in x.row_slice(i).iter().enumerate() {
                sums[c * d + j] += v;
            }
        }
        for c in 0..k {
            if counts[c] == 0 {
                continue;
            }
            for j in 0..d {
                centroids[(c, j)] = sums[c * d + j] / counts[c] as f64;
            }
        }

        if !changed {
            break;
        }
    }

    KMeansFit {
        centroids,
        assignments,
    }
}

/// k-means++ seeding: first centroid uniform, the rest sampled proportional
/// to squared distance from the nearest chosen centroid.
fn init_plus_plus(x: &Array2<f64>, k: usize, rng: &mut StdRng) -> Array2<f64> {
    let n = x.nrows();
    let mut centroids = Array2::with_cols(x.ncols());
    let first = rng.gen_range(0..n);
    centroids.push_row(x.row_slice(first));

    while centroids.nrows() < k {
        let weights: Vec<f64> = (0..n)
            .map(|i| {
                let row = x.row_slice(i);
                (0..centroids.nrows())
                    .map(|c| {
                        let d = euclidean(row, centroids.row_slice(c));
                        d * d
                    })
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        let total: f64 = weights.iter().sum();
        let next = if total > 0.0 {
            let mut draw = rng.gen::<f64>() * total;
            let mut chosen = n - 1;
            for (i, &w) in weights.iter().enumerate() {
                draw -= w;
                if draw <= 0.0 {
                    chosen = i;
                    break;
                }
            }
            chosen
        } else {
            // All remaining points coincide with a centroid
            rng.gen_range(0..n)
        };
        centroids.push_row(x.row_slice(next));
    }

    centroids
}
