//! Cluster-margin sampling: query near cluster boundaries.
use crate::cluster::kmeans;
use crate::config::SortDirection;
use crate::dataset::DatasetRef;
use crate::error::ActiveLearningError;
use crate::strategies::{check_query_size, QueryStrategy};
use crate::utils::{euclidean, pair, sort_by_score};

const KMEANS_MAX_ITER: usize = 100;

/// Cluster the unlabeled pool with seeded k-means and score each sample by
/// the distance margin between its second-nearest and nearest centroid.
/// Small margins sit on cluster boundaries, where class structure is most
/// ambiguous, and are queried first.
///
/// `n_clusters` defaults to the labeled class count (at least 2). The
/// k-means seed is fixed per strategy, so an unchanged pool always yields
/// the same clustering.
pub struct ClusterMarginSampling {
    dataset: DatasetRef,
    n_clusters: Option<usize>,
    seed: u64,
}

impl ClusterMarginSampling {
    pub fn new(
        dataset: DatasetRef,
        n_clusters: Option<usize>,
        seed: u64,
    ) -> Result<Self, ActiveLearningError> {
        if let Some(k) = n_clusters {
            if k < 2 {
                return Err(ActiveLearningError::Configuration(format!(
                    "cluster-margin sampling needs at least 2 clusters, got {}",
                    k
                )));
            }
        }
        Ok(ClusterMarginSampling {
            dataset,
            n_clusters,
            seed,
        })
    }
}

impl QueryStrategy for ClusterMarginSampling {
    fn make_query(&mut self, size: usize) -> Result<Vec<usize>, ActiveLearningError> {
        let d = self.dataset.borrow();
        let (ids, samples) = d.get_unlabeled_entries();
        check_query_size(size, ids.len())?;
        if size == 0 {
            return Ok(Vec::new());
        }

        let k = self.n_clusters.unwrap_or_else(|| d.get_num_of_labels().max(2));
        let fit = kmeans(&samples, k, KMEANS_MAX_ITER, self.seed);

        let scores: Vec<f64> = (0..samples.nrows())
            .map(|i| {
                let row = samples.row_slice(i);
                let mut nearest = f64::INFINITY;
                let mut second = f64::INFINITY;
                for c in 0..fit.centroids.nrows() {
                    let dist = euclidean(row, fit.centroids.row_slice(c));
                    if dist < nearest {
                        second = nearest;
                        nearest = dist;
                    } else if dist < second {
                        second = dist;
                    }
                }
                // A single-cluster fit (tiny pool) has no boundary; fall
                // back to the distance itself.
                if second.is_infinite() {
                    nearest
                } else {
                    second - nearest
                }
            })
            .collect();

        let sorted = sort_by_score(pair(&ids, &scores)?, SortDirection::Min);
        Ok(sorted.into_iter().take(size).map(|(id, _)| id).collect())
    }
}
