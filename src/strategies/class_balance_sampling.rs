//! Class-balance sampling: counteract label imbalance in the labeled set.
use crate::config::SortDirection;
use crate::dataset::DatasetRef;
use crate::error::ActiveLearningError;
use crate::models::Model;
use crate::strategies::{check_query_size, QueryStrategy};
use crate::utils::{pair, sort_by_score};

/// Re-weight the model's class probabilities by inverse class frequency in
/// the currently labeled set and query the samples most likely to belong to
/// under-represented classes.
///
/// The weight of class `c` is `n_labeled / (n_classes * count_c)` (the
/// "balanced" weighting); the score of a sample is the weighted sum of its
/// class probabilities.
pub struct ClassBalanceSampling {
    dataset: DatasetRef,
    model: Box<dyn Model>,
}

impl ClassBalanceSampling {
    pub fn new(dataset: DatasetRef, model: Box<dyn Model>) -> Result<Self, ActiveLearningError> {
        if !model.supports_proba() {
            return Err(ActiveLearningError::Configuration(
                "class-balance sampling requires a model with predict_proba support".to_string(),
            ));
        }
        Ok(ClassBalanceSampling { dataset, model })
    }
}

impl QueryStrategy for ClassBalanceSampling {
    fn make_query(&mut self, size: usize) -> Result<Vec<usize>, ActiveLearningError> {
        let d = self.dataset.borrow();
        let (ids, samples) = d.get_unlabeled_entries();
        check_query_size(size, ids.len())?;

        self.model.train(&d)?;
        let proba = self.model.predict_proba(&samples)?;

        let classes = d.label_set();
        let (_, labels) = d.get_labeled_entries();
        let n_labeled = labels.len() as f64;
        let weights: Vec<f64> = classes
            .iter()
            .map(|&c| {
                let count = labels.iter().filter(|&&l| l == c).count();
                n_labeled / (classes.len() as f64 * count as f64)
            })
            .collect();

        let scores: Vec<f64> = (0..proba.nrows())
            .map(|i| {
                proba
                    .row_slice(i)
                    .iter()
                    .zip(weights.iter())
                    .map(|(p, w)| p * w)
                    .sum()
            })
            .collect();

        let sorted = sort_by_score(pair(&ids, &scores)?, SortDirection::Max);
        Ok(sorted.into_iter().take(size).map(|(id, _)| id).collect())
    }
}
