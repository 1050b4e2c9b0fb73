//! Active learning by learning: a bandit over query strategies.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dataset::DatasetRef;
use crate::error::ActiveLearningError;
use crate::models::Model;
use crate::strategies::bandit::{exp3_probabilities, exp3_update, sample_arm};
use crate::strategies::{check_query_size, QueryStrategy};

/// EXP3-style meta-strategy: each round samples a base strategy from a
/// probability vector that mixes the learned weights with uniform
/// exploration `gamma`, delegates the query to it, and afterwards feeds the
/// held-out score delta back as an importance-weighted reward.
///
/// Unlike [`DynamicEnsembleActiveLearning`](super::DynamicEnsembleActiveLearning),
/// which always trusts the heaviest strategy, this one keeps exploring: even
/// a poorly performing strategy is played with probability at least
/// `gamma / k`, so a late bloomer can still be discovered.
pub struct ActiveLearningByLearning {
    dataset: DatasetRef,
    strategies: Vec<Box<dyn QueryStrategy>>,
    model: Box<dyn Model>,
    test_dataset: DatasetRef,
    gamma: f64,
    seed: u64,
    weights: Vec<f64>,
    rounds: u64,
    // (sampled strategy, its selection probability, held-out score then)
    previous: Option<(usize, f64, f64)>,
}

impl ActiveLearningByLearning {
    pub fn new(
        dataset: DatasetRef,
        strategies: Vec<Box<dyn QueryStrategy>>,
        model: Box<dyn Model>,
        test_dataset: DatasetRef,
        gamma: f64,
        seed: u64,
    ) -> Result<Self, ActiveLearningError> {
        if strategies.len() < 2 {
            return Err(ActiveLearningError::Configuration(format!(
                "active learning by learning needs at least 2 base strategies, got {}",
                strategies.len()
            )));
        }
        if !(0.0 < gamma && gamma <= 1.0) {
            return Err(ActiveLearningError::Configuration(format!(
                "gamma must be in (0, 1], got {}",
                gamma
            )));
        }
        let weights = vec![1.0; strategies.len()];
        Ok(ActiveLearningByLearning {
            dataset,
            strategies,
            model,
            test_dataset,
            gamma,
            seed,
            weights,
            rounds: 0,
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

impl QueryStrategy for ActiveLearningByLearning {
    fn make_query(&mut self, size: usize) -> Result<Vec<usize>, ActiveLearningError> {
        check_query_size(size, self.dataset.borrow().len_unlabeled())?;

        let score = self.held_out_score()?;
        if let Some((chosen, probability, score_then)) = self.previous {
            let reward = score - score_then;
            exp3_update(
                &mut self.weights,
                chosen,
                reward,
                probability,
                self.gamma,
            );
            log::debug!(
                "albl: strategy {} rewarded {:+.4} at p={:.3}, weights {:?}",
                chosen,
                reward,
                probability,
                self.weights
            );
        }

        let probabilities = exp3_probabilities(&self.weights, self.gamma);
        // Salt the seed with the round counter so successive rounds draw
        // fresh arms while a fixed seed keeps whole runs reproducible.
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(self.rounds));
        let chosen = sample_arm(&probabilities, rng.gen());

        let query = self.strategies[chosen].make_query(size)?;
        self.previous = Some((chosen, probabilities[chosen], score));
        self.rounds += 1;
        Ok(query)
    }
}
