//! Rank sampling: Borda aggregation of uncertainty and representativeness.
use crate::config::SortDirection;
use crate::dataset::DatasetRef;
use crate::error::ActiveLearningError;
use crate::models::Model;
use crate::strategies::{check_query_size, QueryStrategy};
use crate::utils::{densities, entropy, pair, sort_by_score};

/// Rank the unlabeled pool once by entropy uncertainty and once by pool
/// density, then query the samples with the best (lowest) summed rank.
///
/// Aggregating ranks instead of raw scores sidesteps the different scales of
/// the two criteria; a sample must do well on both to be queried early.
pub struct RankSampling {
    dataset: DatasetRef,
    model: Box<dyn Model>,
}

impl RankSampling {
    pub fn new(dataset: DatasetRef, model: Box<dyn Model>) -> Result<Self, ActiveLearningError> {
        if !model.supports_proba() {
            return Err(ActiveLearningError::Configuration(
                "rank sampling requires a model with predict_proba support".to_string(),
            ));
        }
        Ok(RankSampling { dataset, model })
    }
}

/// Positional ranks (0 = best) per identifier from a best-first score sort.
fn ranks_of(pairs: Vec<(usize, f64)>, direction: SortDirection) -> Vec<(usize, f64)> {
    sort_by_score(pairs, direction)
        .into_iter()
        .enumerate()
        .map(|(rank, (id, _))| (id, rank as f64))
        .collect()
}

impl QueryStrategy for RankSampling {
    fn make_query(&mut self, size: usize) -> Result<Vec<usize>, ActiveLearningError> {
        let d = self.dataset.borrow();
        let (ids, samples) = d.get_unlabeled_entries();
        check_query_size(size, ids.len())?;

        self.model.train(&d)?;
        let proba = self.model.predict_proba(&samples)?;

        let uncertainty: Vec<f64> = (0..proba.nrows())
            .map(|i| entropy(proba.row_slice(i)))
            .collect();
        let density = densities(&samples);

        let by_uncertainty = ranks_of(pair(&ids, &uncertainty)?, SortDirection::Max);
        let by_density = ranks_of(pair(&ids, &density)?, SortDirection::Max);

        // Both rank lists hold every id exactly once; sum ranks per id.
        let mut total: std::collections::HashMap<usize, f64> = std::collections::HashMap::new();
        for (id, rank) in by_uncertainty.into_iter().chain(by_density) {
            *total.entry(id).or_insert(0.0) += rank;
        }
        let summed: Vec<(usize, f64)> = ids.iter().map(|&id| (id, total[&id])).collect();

        let sorted = sort_by_score(summed, SortDirection::Min);
        Ok(sorted.into_iter().take(size).map(|(id, _)| id).collect())
    }
}
