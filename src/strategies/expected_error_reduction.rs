//! Expected error reduction: one-step lookahead retrain simulation.
use crate::config::SortDirection;
use crate::dataset::{Dataset, DatasetRef};
use crate::error::ActiveLearningError;
use crate::models::Model;
use crate::strategies::{check_query_size, QueryStrategy};
use crate::utils::{pair, sort_by_score};

/// For every unlabeled candidate `x` and every known class `y`, retrain the
/// model on `labeled + {(x, y)}` and accumulate the expected residual
/// uncertainty `sum (1 - max p)` over the rest of the pool, weighted by the
/// current model's `p(y | x)`. The candidate whose labeling leaves the least
/// expected error is queried first.
///
/// This is by far the most expensive strategy in the crate: one
/// `make_query` costs `O(|unlabeled| * |classes|)` full retrains plus a
/// pool-sized prediction for each. Bound it on large pools by sub-sampling
/// the unlabeled candidates into a smaller working dataset before querying.
pub struct ExpectedErrorReduction {
    dataset: DatasetRef,
    model: Box<dyn Model>,
}

impl ExpectedErrorReduction {
    pub fn new(dataset: DatasetRef, model: Box<dyn Model>) -> Result<Self, ActiveLearningError> {
        if !model.supports_proba() {
            return Err(ActiveLearningError::Configuration(
                "expected error reduction requires a model with predict_proba support".to_string(),
            ));
        }
        Ok(ExpectedErrorReduction { dataset, model })
    }
}

impl QueryStrategy for ExpectedErrorReduction {
    fn make_query(&mut self, size: usize) -> Result<Vec<usize>, ActiveLearningError> {
        let d = self.dataset.borrow();
        let (ids, samples) = d.get_unlabeled_entries();
        check_query_size(size, ids.len())?;

        self.model.train(&d)?;
        let current = self.model.predict_proba(&samples)?;
        let classes = d.label_set();
        let (lx, ly) = d.get_labeled_entries();

        let mut scores = Vec::with_capacity(ids.len());
        for i in 0..ids.len() {
            let rest: Vec<usize> = (0..ids.len()).filter(|&j| j != i).collect();
            let rest_samples = samples.select_rows(&rest);

            let mut expected = 0.0;
            for (c, &label) in classes.iter().enumerate() {
                let p_y = current[(i, c)];
                if p_y <= 0.0 {
                    continue;
                }

                let mut x_hypo = lx.clone();
                x_hypo.push_row(samples.row_slice(i));
                let mut y_hypo: Vec<Option<i32>> = ly.iter().map(|&l| Some(l)).collect();
                y_hypo.push(Some(label));
                let hypo = Dataset::new(x_hypo, y_hypo).expect("lookahead shape mismatch");

                self.model.train(&hypo)?;
                let proba = self.model.predict_proba(&rest_samples)?;
                let residual: f64 = (0..proba.nrows())
                    .map(|r| {
                        1.0 - proba
                            .row_slice(r)
                            .iter()
                            .copied()
                            .fold(f64::NEG_INFINITY, f64::max)
                    })
                    .sum();

                expected += p_y * residual;
            }
            scores.push(expected);
        }
        log::debug!(
            "expected error reduction: scored {} candidates with {} lookahead retrains",
            ids.len(),
            ids.len() * classes.len()
        );

        // Leave the model trained on the real labeled set
        self.model.train(&d)?;

        let sorted = sort_by_score(pair(&ids, &scores)?, SortDirection::Min);
        Ok(sorted.into_iter().take(size).map(|(id, _)| id).collect())
    }
}
