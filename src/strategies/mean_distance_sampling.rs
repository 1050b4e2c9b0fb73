//! Mean-distance sampling: query far from what is already labeled.
use crate::config::SortDirection;
use crate::dataset::DatasetRef;
use crate::error::ActiveLearningError;
use crate::strategies::{check_query_size, QueryStrategy};
use crate::utils::{centroid, euclidean, pair, sort_by_score};

/// Score each unlabeled sample by its Euclidean distance to the centroid of
/// the labeled entries and query the farthest first.
///
/// Purely geometric; no model involved. Sensitive to feature scale, so
/// standardize the pool (see `preprocessing`) when features live on
/// different ranges.
pub struct MeanDistanceSampling {
    dataset: DatasetRef,
}

impl MeanDistanceSampling {
    pub fn new(dataset: DatasetRef) -> Self {
        MeanDistanceSampling { dataset }
    }
}

impl QueryStrategy for MeanDistanceSampling {
    fn make_query(&mut self, size: usize) -> Result<Vec<usize>, ActiveLearningError> {
        let d = self.dataset.borrow();
        let (ids, samples) = d.get_unlabeled_entries();
        check_query_size(size, ids.len())?;

        let (labeled, _) = d.get_labeled_entries();
        if labeled.nrows() == 0 {
            return Err(ActiveLearningError::Configuration(
                "mean-distance sampling needs at least one labeled sample".to_string(),
            ));
        }
        let center = centroid(&labeled);

        let scores: Vec<f64> = (0..samples.nrows())
            .map(|i| euclidean(samples.row_slice(i), center.as_slice()))
            .collect();

        let sorted = sort_by_score(pair(&ids, &scores)?, SortDirection::Max);
        Ok(sorted.into_iter().take(size).map(|(id, _)| id).collect())
    }
}
