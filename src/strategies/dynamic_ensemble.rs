//! Dynamic ensemble: trust the base strategy that has been paying off.
use crate::dataset::DatasetRef;
use crate::error::ActiveLearningError;
use crate::models::Model;
use crate::strategies::bandit::{argmax, exponential_update};
use crate::strategies::{check_query_size, QueryStrategy};

/// Meta-strategy over a pool of base strategies.
///
/// Each round the held-out accuracy delta since the previous round is taken
/// as the reward of the strategy that was delegated to last time, its weight
/// gets an exponential update, and the round's query is delegated to the
/// currently heaviest strategy (lowest index on ties).
///
/// State machine: weights start uniform at construction, are updated on
/// every round, and are never reset during a run.
pub struct DynamicEnsembleActiveLearning {
    dataset: DatasetRef,
    strategies: Vec<Box<dyn QueryStrategy>>,
    model: Box<dyn Model>,
    test_dataset: DatasetRef,
    eta: f64,
    weights: Vec<f64>,
    // (delegated strategy, held-out score when it was chosen)
    previous: Option<(usize, f64)>,
}

impl DynamicEnsembleActiveLearning {
    /// `model` and `test_dataset` are only used to compute the held-out
    /// reward signal; `eta` scales the exponential weight updates.
    pub fn new(
        dataset: DatasetRef,
        strategies: Vec<Box<dyn QueryStrategy>>,
        model: Box<dyn Model>,
        test_dataset: DatasetRef,
        eta: f64,
    ) -> Result<Self, ActiveLearningError> {
        if strategies.len() < 2 {
            return Err(ActiveLearningError::Configuration(format!(
                "dynamic ensemble needs at least 2 base strategies, got {}",
                strategies.len()
            )));
        }
        if eta <= 0.0 {
            return Err(ActiveLearningError::Configuration(format!(
                "eta must be positive, got {}",
                eta
            )));
        }
        let weights = vec![1.0; strategies.len()];
        Ok(DynamicEnsembleActiveLearning {
            dataset,
            strategies,
            model,
            test_dataset,
            eta,
            weights,
            previous: None,
        })
    }

    /// Current per-strategy weights, in construction order.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    fn held_out_score(&mut self) -> Result<f64, ActiveLearningError> {
        let d = self.dataset.borrow();
        self.model.train(&d)?;
        Ok(self.model.score(&self.test_dataset.borrow())?)
    }
}

impl QueryStrategy for DynamicEnsembleActiveLearning {
    fn make_query(&mut self, size: usize) -> Result<Vec<usize>, ActiveLearningError> {
        check_query_size(size, self.dataset.borrow().len_unlabeled())?;

        let score = self.held_out_score()?;
        if let Some((chosen, score_then)) = self.previous {
            let reward = score - score_then;
            exponential_update(&mut self.weights, chosen, reward, self.eta);
            log::debug!(
                "dynamic ensemble: strategy {} rewarded {:+.4}, weights {:?}",
                chosen,
                reward,
                self.weights
            );
        }

        let chosen = argmax(&self.weights);
        let query = self.strategies[chosen].make_query(size)?;
        self.previous = Some((chosen, score));
        Ok(query)
    }
}
