//! Density-weighted uncertainty sampling.
use crate::config::SortDirection;
use crate::dataset::DatasetRef;
use crate::error::ActiveLearningError;
use crate::models::Model;
use crate::strategies::{check_query_size, QueryStrategy};
use crate::utils::{densities, entropy, pair, sort_by_score};

/// Multiply the model's entropy uncertainty by a density weight so that
/// uncertain-but-isolated outliers are down-ranked in favour of uncertain
/// samples that represent a dense region of the pool.
///
/// The score is `entropy(p) * density^beta`; `beta` controls how strongly
/// density discounts uncertainty (0 recovers plain entropy sampling).
pub struct DensityWeightedUncertaintySampling {
    dataset: DatasetRef,
    model: Box<dyn Model>,
    beta: f64,
}

impl DensityWeightedUncertaintySampling {
    pub fn new(
        dataset: DatasetRef,
        model: Box<dyn Model>,
        beta: f64,
    ) -> Result<Self, ActiveLearningError> {
        if !model.supports_proba() {
            return Err(ActiveLearningError::Configuration(
                "density-weighted uncertainty sampling requires a model with predict_proba support"
                    .to_string(),
            ));
        }
        if beta < 0.0 {
            return Err(ActiveLearningError::Configuration(format!(
                "beta must be non-negative, got {}",
                beta
            )));
        }
        Ok(DensityWeightedUncertaintySampling {
            dataset,
            model,
            beta,
        })
    }
}

impl QueryStrategy for DensityWeightedUncertaintySampling {
    fn make_query(&mut self, size: usize) -> Result<Vec<usize>, ActiveLearningError> {
        let d = self.dataset.borrow();
        let (ids, samples) = d.get_unlabeled_entries();
        check_query_size(size, ids.len())?;

        self.model.train(&d)?;
        let proba = self.model.predict_proba(&samples)?;
        let density = densities(&samples);

        let scores: Vec<f64> = (0..proba.nrows())
            .map(|i| entropy(proba.row_slice(i)) * density[i].powf(self.beta))
            .collect();

        let sorted = sort_by_score(pair(&ids, &scores)?, SortDirection::Max);
        Ok(sorted.into_iter().take(size).map(|(id, _)| id).collect())
    }
}
