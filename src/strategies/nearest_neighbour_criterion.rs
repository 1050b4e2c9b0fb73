//! Nearest-neighbour criterion: query where no labeled neighbour is close.
use crate::config::SortDirection;
use crate::dataset::DatasetRef;
use crate::error::ActiveLearningError;
use crate::strategies::{check_query_size, QueryStrategy};
use crate::utils::{nearest_distances, pair, sort_by_score};

/// Score each unlabeled sample by the distance to its nearest labeled
/// neighbour and query the farthest first, filling the regions the labeled
/// set has not reached yet.
pub struct NearestNeighbourCriterion {
    dataset: DatasetRef,
}

impl NearestNeighbourCriterion {
    pub fn new(dataset: DatasetRef) -> Self {
        NearestNeighbourCriterion { dataset }
    }
}

impl QueryStrategy for NearestNeighbourCriterion {
    fn make_query(&mut self, size: usize) -> Result<Vec<usize>, ActiveLearningError> {
        let d = self.dataset.borrow();
        let (ids, samples) = d.get_unlabeled_entries();
        check_query_size(size, ids.len())?;

        let (labeled, _) = d.get_labeled_entries();
        if labeled.nrows() == 0 {
            return Err(ActiveLearningError::Configuration(
                "nearest-neighbour criterion needs at least one labeled sample".to_string(),
            ));
        }

        let scores = nearest_distances(&samples, &labeled);
        let sorted = sort_by_score(pair(&ids, &scores)?, SortDirection::Max);
        Ok(sorted.into_iter().take(size).map(|(id, _)| id).collect())
    }
}
