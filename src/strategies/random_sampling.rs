//! Uniform-random baseline.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dataset::DatasetRef;
use crate::error::ActiveLearningError;
use crate::strategies::{check_query_size, QueryStrategy};
use crate::utils::{pair, sort_by_score};
use crate::config::SortDirection;

/// Query uniformly at random from the unlabeled pool.
///
/// No model, no retraining. Useful as a baseline and for null-hypothesis
/// comparisons against the informed strategies.
pub struct RandomSampling {
    dataset: DatasetRef,
    rng: StdRng,
}

impl RandomSampling {
    pub fn new(dataset: DatasetRef, seed: u64) -> Self {
        RandomSampling {
            dataset,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl QueryStrategy for RandomSampling {
    fn make_query(&mut self, size: usize) -> Result<Vec<usize>, ActiveLearningError> {
        let ids = self.dataset.borrow().unlabeled_ids();
        check_query_size(size, ids.len())?;

        let scores: Vec<f64> = ids.iter().map(|_| self.rng.gen::<f64>()).collect();
        let sorted = sort_by_score(pair(&ids, &scores)?, SortDirection::Max);
        Ok(sorted.into_iter().take(size).map(|(id, _)| id).collect())
    }
}
