//! Uncertainty sampling: query the samples the model is least sure about.
use crate::config::{SortDirection, UncertaintyMethod};
use crate::dataset::DatasetRef;
use crate::error::ActiveLearningError;
use crate::math::{Array1, Array2};
use crate::models::Model;
use crate::strategies::{check_query_size, QueryStrategy};
use crate::utils::{entropy, pair, sort_by_score};

/// A simple heterogeneity query: rank unlabeled samples by how uncertain the
/// model is about them.
///
/// With `p` the class-probability vector of a sample, the method scores
/// - `Lc`: `1 - max(p)`, queried highest first,
/// - `Entropy`: Shannon entropy of `p`, queried highest first,
/// - `Margin`: highest minus second-highest probability, queried lowest
///   first.
///
/// When the model does not support `predict_proba`, scoring falls back to
/// `decision_function` and `Entropy` is rejected at construction. For binary
/// problems the decision scores are taken as absolute values (distance from
/// the separating boundary).
pub struct UncertaintySampling {
    dataset: DatasetRef,
    model: Box<dyn Model>,
    method: UncertaintyMethod,
    supports_prob: bool,
    test_dataset: Option<DatasetRef>,
    current_scores: Vec<(usize, f64)>,
}

impl UncertaintySampling {
    /// Build the strategy. The model must support either probabilities or
    /// decision scores; `Entropy` additionally requires probabilities.
    pub fn new(
        dataset: DatasetRef,
        model: Box<dyn Model>,
        method: UncertaintyMethod,
    ) -> Result<Self, ActiveLearningError> {
        Self::build(dataset, model, method, None)
    }

    /// Like [`new`](Self::new), but additionally records a
    /// `(labeled_count, held_out_score)` snapshot per query round, evaluated
    /// on `test_dataset`.
    pub fn with_score_recording(
        dataset: DatasetRef,
        model: Box<dyn Model>,
        method: UncertaintyMethod,
        test_dataset: DatasetRef,
    ) -> Result<Self, ActiveLearningError> {
        Self::build(dataset, model, method, Some(test_dataset))
    }

    fn build(
        dataset: DatasetRef,
        model: Box<dyn Model>,
        method: UncertaintyMethod,
        test_dataset: Option<DatasetRef>,
    ) -> Result<Self, ActiveLearningError> {
        let supports_prob = model.supports_proba();

        if method == UncertaintyMethod::Entropy && !supports_prob {
            return Err(ActiveLearningError::Configuration(
                "the entropy method requires a model that supports predict_proba".to_string(),
            ));
        }
        if !supports_prob && !model.supports_decision_function() {
            return Err(ActiveLearningError::Capability {
                model: model.name().to_string(),
                method: "predict_proba or decision_function",
            });
        }

        Ok(UncertaintySampling {
            dataset,
            model,
            method,
            supports_prob,
            test_dataset,
            current_scores: Vec::new(),
        })
    }

    /// Recorded `(labeled_count, held_out_score)` snapshots, one per query
    /// round, in query order. Empty unless score recording is enabled.
    pub fn recorded_scores(&self) -> &[(usize, f64)] {
        &self.current_scores
    }

    fn get_scores(
        &mut self,
        grid: Option<&Array2<f64>>,
    ) -> Result<Vec<(usize, f64)>, ActiveLearningError> {
        let d = self.dataset.borrow();
        self.model.train(&d)?;

        let (ids, samples) = match grid {
            None => d.get_unlabeled_entries(),
            Some(grid) => ((0..grid.nrows()).collect(), grid.clone()),
        };

        let scores = if self.supports_prob {
            let pred = self.model.predict_proba(&samples)?;
            (0..pred.nrows())
                .map(|i| {
                    let row = pred.row_slice(i);
                    match self.method {
                        UncertaintyMethod::Lc => {
                            1.0 - row.iter().copied().fold(f64::NEG_INFINITY, f64::max)
                        }
                        UncertaintyMethod::Entropy => entropy(row),
                        UncertaintyMethod::Margin => top_two_gap(row),
                    }
                })
                .collect::<Vec<f64>>()
        } else {
            let mut dist = self.model.decision_function(&samples)?;
            // Take absolute value if binary
            if d.get_num_of_labels() == 2 {
                dist = dist.mapv(|v| v.abs());
            }
            (0..dist.nrows())
                .map(|i| {
                    let row = dist.row_slice(i);
                    match self.method {
                        UncertaintyMethod::Lc => {
                            row.iter().copied().fold(f64::NEG_INFINITY, f64::max)
                        }
                        // A one-column decision matrix has no second-highest
                        // value; the absolute boundary distance is the margin.
                        UncertaintyMethod::Margin if row.len() < 2 => row[0],
                        UncertaintyMethod::Margin => top_two_gap(row),
                        // Rejected at construction
                        UncertaintyMethod::Entropy => unreachable!(),
                    }
                })
                .collect::<Vec<f64>>()
        };

        pair(&ids, &scores)
    }

    fn sort_direction(&self) -> SortDirection {
        if self.supports_prob {
            match self.method {
                UncertaintyMethod::Margin => SortDirection::Min,
                _ => SortDirection::Max,
            }
        } else {
            // Decision-function scores always sort ascending, including Lc:
            // the probability branch queries the highest 1 - max(p) while
            // this branch queries the lowest raw max. Kept as observed.
            SortDirection::Min
        }
    }

    /// Raw uncertainty scores over the current unlabeled pool. Does not
    /// consume a query or record a snapshot.
    pub fn confidence(&mut self) -> Result<Array1<f64>, ActiveLearningError> {
        let scores = self.get_scores(None)?;
        Ok(scores.into_iter().map(|(_, s)| s).collect())
    }

    /// Raw uncertainty scores over an arbitrary point set, e.g. a plotting
    /// grid. Does not consume a query or record a snapshot.
    pub fn confidence_grid(
        &mut self,
        grid: &Array2<f64>,
    ) -> Result<Array1<f64>, ActiveLearningError> {
        let scores = self.get_scores(Some(grid))?;
        Ok(scores.into_iter().map(|(_, s)| s).collect())
    }
}

/// Highest minus second-highest value of a score row. Degenerates to the
/// single value when the row has one column.
fn top_two_gap(row: &[f64]) -> f64 {
    let mut sorted = row.to_vec();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    if sorted.len() < 2 {
        sorted[0]
    } else {
        sorted[0] - sorted[1]
    }
}

impl QueryStrategy for UncertaintySampling {
    fn make_query(&mut self, size: usize) -> Result<Vec<usize>, ActiveLearningError> {
        check_query_size(size, self.dataset.borrow().len_unlabeled())?;

        let scores = self.get_scores(None)?;

        if let Some(test_dataset) = &self.test_dataset {
            let labeled = self.dataset.borrow().len_labeled();
            let score = self.model.score(&test_dataset.borrow())?;
            log::debug!(
                "uncertainty snapshot: {} labeled, held-out score {:.4}",
                labeled,
                score
            );
            self.current_scores.push((labeled, score));
        }

        let sorted = sort_by_score(scores, self.sort_direction());
        Ok(sorted.into_iter().take(size).map(|(id, _)| id).collect())
    }
}
