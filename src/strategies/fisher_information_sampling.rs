//! Fisher-information sampling: variance-reduction flavoured scoring.
use crate::config::SortDirection;
use crate::dataset::DatasetRef;
use crate::error::ActiveLearningError;
use crate::models::Model;
use crate::strategies::{check_query_size, QueryStrategy};
use crate::utils::{pair, row_norms, sort_by_score};

/// Score each unlabeled sample by the trace of its per-sample Fisher
/// information under a logistic observation model,
/// `sum_c p_c * (1 - p_c) * ||x||^2`, and query the highest first. Samples
/// that pin down the model parameters the most are preferred.
pub struct FisherInformationSampling {
    dataset: DatasetRef,
    model: Box<dyn Model>,
}

impl FisherInformationSampling {
    pub fn new(dataset: DatasetRef, model: Box<dyn Model>) -> Result<Self, ActiveLearningError> {
        if !model.supports_proba() {
            return Err(ActiveLearningError::Configuration(
                "fisher-information sampling requires a model with predict_proba support"
                    .to_string(),
            ));
        }
        Ok(FisherInformationSampling { dataset, model })
    }
}

impl QueryStrategy for FisherInformationSampling {
    fn make_query(&mut self, size: usize) -> Result<Vec<usize>, ActiveLearningError> {
        let d = self.dataset.borrow();
        let (ids, samples) = d.get_unlabeled_entries();
        check_query_size(size, ids.len())?;

        self.model.train(&d)?;
        let proba = self.model.predict_proba(&samples)?;
        let norms = row_norms(&samples, true);

        let scores: Vec<f64> = (0..proba.nrows())
            .map(|i| {
                let variance: f64 = proba
                    .row_slice(i)
                    .iter()
                    .map(|&p| p * (1.0 - p))
                    .sum();
                variance * norms[i]
            })
            .collect();

        let sorted = sort_by_score(pair(&ids, &scores)?, SortDirection::Max);
        Ok(sorted.into_iter().take(size).map(|(id, _)| id).collect())
    }
}
