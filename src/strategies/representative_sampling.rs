//! Representative sampling: query density peaks of the unlabeled pool.
use crate::config::SortDirection;
use crate::dataset::DatasetRef;
use crate::error::ActiveLearningError;
use crate::strategies::{check_query_size, QueryStrategy};
use crate::utils::{densities, pair, sort_by_score};

/// Score each unlabeled sample by its mean similarity `1 / (1 + d)` to the
/// rest of the unlabeled pool and query the densest first. Outliers score
/// low; samples that stand in for many others score high.
pub struct RepresentativeSampling {
    dataset: DatasetRef,
}

impl RepresentativeSampling {
    pub fn new(dataset: DatasetRef) -> Self {
        RepresentativeSampling { dataset }
    }
}

impl QueryStrategy for RepresentativeSampling {
    fn make_query(&mut self, size: usize) -> Result<Vec<usize>, ActiveLearningError> {
        let d = self.dataset.borrow();
        let (ids, samples) = d.get_unlabeled_entries();
        check_query_size(size, ids.len())?;

        let scores = densities(&samples);
        let sorted = sort_by_score(pair(&ids, &scores)?, SortDirection::Max);
        Ok(sorted.into_iter().take(size).map(|(id, _)| id).collect())
    }
}
