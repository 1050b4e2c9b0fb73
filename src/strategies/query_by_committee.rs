//! Query-by-committee: query where an ensemble disagrees.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SortDirection;
use crate::dataset::{Dataset, DatasetRef};
use crate::error::ActiveLearningError;
use crate::models::Model;
use crate::strategies::{check_query_size, QueryStrategy};
use crate::utils::{entropy, pair, sort_by_score};

/// Train each committee member on a bootstrap resample of the labeled
/// entries, then score each unlabeled sample by the vote entropy of the
/// members' hard predictions. Samples the committee splits on are queried
/// first.
///
/// The bootstrap RNG is reseeded from the configured seed on every call, so
/// an unchanged labeled set always produces the same committee and the same
/// query.
pub struct QueryByCommittee {
    dataset: DatasetRef,
    committee: Vec<Box<dyn Model>>,
    seed: u64,
}

impl QueryByCommittee {
    pub fn new(
        dataset: DatasetRef,
        committee: Vec<Box<dyn Model>>,
        seed: u64,
    ) -> Result<Self, ActiveLearningError> {
        if committee.len() < 2 {
            return Err(ActiveLearningError::Configuration(format!(
                "query-by-committee needs at least 2 models, got {}",
                committee.len()
            )));
        }
        Ok(QueryByCommittee {
            dataset,
            committee,
            seed,
        })
    }
}

impl QueryStrategy for QueryByCommittee {
    fn make_query(&mut self, size: usize) -> Result<Vec<usize>, ActiveLearningError> {
        let d = self.dataset.borrow();
        let (ids, samples) = d.get_unlabeled_entries();
        check_query_size(size, ids.len())?;

        let (lx, ly) = d.get_labeled_entries();
        if ly.is_empty() {
            return Err(ActiveLearningError::Configuration(
                "query-by-committee needs at least one labeled sample".to_string(),
            ));
        }
        let classes = d.label_set();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut votes = vec![0usize; ids.len() * classes.len()];

        for model in self.committee.iter_mut() {
            let boot: Vec<usize> = (0..ly.len())
                .map(|_| rng.gen_range(0..ly.len()))
                .collect();
            let x_boot = lx.select_rows(&boot);
            let y_boot: Vec<Option<i32>> = boot.iter().map(|&i| Some(ly[i])).collect();
            // Lengths match by construction
            let resampled = Dataset::new(x_boot, y_boot).expect("bootstrap shape mismatch");

            model.train(&resampled)?;
            let predicted = model.predict(&samples)?;
            for (i, label) in predicted.iter().enumerate() {
                if let Some(c) = classes.iter().position(|cl| cl == label) {
                    votes[i * classes.len() + c] += 1;
                }
            }
        }

        let committee_size = self.committee.len() as f64;
        let scores: Vec<f64> = (0..ids.len())
            .map(|i| {
                let fractions: Vec<f64> = votes[i * classes.len()..(i + 1) * classes.len()]
                    .iter()
                    .map(|&v| v as f64 / committee_size)
                    .collect();
                entropy(&fractions)
            })
            .collect();

        let sorted = sort_by_score(pair(&ids, &scores)?, SortDirection::Max);
        Ok(sorted.into_iter().take(size).map(|(id, _)| id).collect())
    }
}
