//! Integration tests for uncertainty sampling.

use anyhow::Result;
use poolal::config::UncertaintyMethod;
use poolal::dataset::{Dataset, DatasetRef};
use poolal::error::ActiveLearningError;
use poolal::math::Array2;
use poolal::models::logistic::LogisticRegression;
use poolal::models::Model;
use poolal::strategies::{QueryStrategy, UncertaintySampling};

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// Returns a fixed probability matrix regardless of training; lets a test
/// pin down the exact ordering behavior of a scoring method.
struct FixedProba {
    proba: Array2<f64>,
    classes: Vec<i32>,
}

impl Model for FixedProba {
    fn train(&mut self, _dataset: &Dataset) -> Result<()> {
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>> {
        assert_eq!(x.nrows(), self.proba.nrows());
        Ok((0..self.proba.nrows())
            .map(|i| {
                let row = self.proba.row_slice(i);
                let mut best = 0usize;
                for c in 1..row.len() {
                    if row[c] > row[best] {
                        best = c;
                    }
                }
                self.classes[best]
            })
            .collect())
    }

    fn supports_proba(&self) -> bool {
        true
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        assert_eq!(x.nrows(), self.proba.nrows());
        Ok(self.proba.clone())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Logistic regression with the probability capability masked off, leaving
/// only the decision-function branch.
struct DecisionOnly(LogisticRegression);

impl Model for DecisionOnly {
    fn train(&mut self, dataset: &Dataset) -> Result<()> {
        self.0.train(dataset)
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>> {
        self.0.predict(x)
    }

    fn supports_decision_function(&self) -> bool {
        true
    }

    fn decision_function(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.0.decision_function(x)
    }

    fn name(&self) -> &str {
        "decision-only"
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// 1-D pool: two labeled blobs around 0 and 5, one unlabeled sample on the
/// boundary (id 4) and one deep inside the first blob (id 5).
fn boundary_dataset() -> DatasetRef {
    let x = Array2::from_shape_vec(
        (6, 1),
        vec![
            0.0, // class 0
            0.3, // class 0
            4.7, // class 1
            5.0, // class 1
            2.5, // unlabeled, on the boundary
            0.1, // unlabeled, deep in the class-0 blob
        ],
    )
    .unwrap();
    let y = vec![Some(0), Some(0), Some(1), Some(1), None, None];
    Dataset::new(x, y).unwrap().into_shared()
}

fn logistic() -> Box<dyn Model> {
    Box::new(LogisticRegression::with_defaults())
}

// ---------------------------------------------------------------------------
// Construction-time validation
// ---------------------------------------------------------------------------

#[test]
fn entropy_without_proba_is_rejected() {
    let dataset = boundary_dataset();
    let model = Box::new(DecisionOnly(LogisticRegression::with_defaults()));
    let result = UncertaintySampling::new(dataset, model, UncertaintyMethod::Entropy);
    assert!(matches!(
        result,
        Err(ActiveLearningError::Configuration(_))
    ));
}

// ---------------------------------------------------------------------------
// Query behavior
// ---------------------------------------------------------------------------

#[test]
fn query_returns_distinct_unlabeled_ids() {
    let dataset = boundary_dataset();
    let mut strategy =
        UncertaintySampling::new(dataset.clone(), logistic(), UncertaintyMethod::Entropy).unwrap();

    let query = strategy.make_query(2).unwrap();
    assert_eq!(query.len(), 2);
    assert_ne!(query[0], query[1]);
    for id in &query {
        assert!(dataset.borrow().label(*id).is_none());
    }
}

#[test]
fn entropy_prefers_the_boundary_sample() {
    let dataset = boundary_dataset();
    let mut strategy =
        UncertaintySampling::new(dataset, logistic(), UncertaintyMethod::Entropy).unwrap();
    assert_eq!(strategy.make_query(1).unwrap(), vec![4]);
}

#[test]
fn margin_prefers_the_smallest_gap() {
    // Three labeled classes plus two unlabeled candidates with pinned
    // probabilities: margins 0.3 (id 3) and 0.05 (id 4).
    let x = Array2::from_shape_vec((5, 1), vec![0.0, 1.0, 2.0, 0.4, 1.6]).unwrap();
    let y = vec![Some(0), Some(1), Some(2), None, None];
    let dataset = Dataset::new(x, y).unwrap().into_shared();

    let proba = Array2::from_shape_vec((2, 3), vec![0.6, 0.3, 0.1, 0.4, 0.35, 0.25]).unwrap();
    let model = Box::new(FixedProba {
        proba,
        classes: vec![0, 1, 2],
    });

    let mut strategy =
        UncertaintySampling::new(dataset, model, UncertaintyMethod::Margin).unwrap();
    assert_eq!(strategy.make_query(2).unwrap(), vec![4, 3]);
}

#[test]
fn repeated_queries_without_label_changes_are_identical() {
    let dataset = boundary_dataset();
    let mut strategy =
        UncertaintySampling::new(dataset, logistic(), UncertaintyMethod::Lc).unwrap();

    let first = strategy.make_query(2).unwrap();
    let second = strategy.make_query(2).unwrap();
    assert_eq!(first, second);
}

#[test]
fn oversized_query_errors_and_leaves_dataset_untouched() {
    let dataset = boundary_dataset();
    let mut strategy =
        UncertaintySampling::new(dataset.clone(), logistic(), UncertaintyMethod::Entropy)
            .unwrap();

    let result = strategy.make_query(3);
    assert!(matches!(
        result,
        Err(ActiveLearningError::QuerySize {
            requested: 3,
            available: 2
        })
    ));
    assert_eq!(dataset.borrow().len_labeled(), 4);
    assert_eq!(dataset.borrow().unlabeled_ids(), vec![4, 5]);
}

#[test]
fn decision_function_branch_queries_near_the_boundary_first() {
    let dataset = boundary_dataset();
    let model = Box::new(DecisionOnly(LogisticRegression::with_defaults()));
    let mut strategy =
        UncertaintySampling::new(dataset, model, UncertaintyMethod::Lc).unwrap();

    // Binary problem: absolute decision scores, ascending sort, so the
    // boundary sample wins over the one deep inside a blob.
    assert_eq!(strategy.make_query(1).unwrap(), vec![4]);
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

#[test]
fn confidence_covers_the_unlabeled_pool() {
    let dataset = boundary_dataset();
    let mut strategy =
        UncertaintySampling::new(dataset, logistic(), UncertaintyMethod::Entropy).unwrap();

    let scores = strategy.confidence().unwrap();
    assert_eq!(scores.len(), 2);
    // Boundary sample (first in pool order) is the more uncertain one
    assert!(scores[0] > scores[1]);
}

#[test]
fn confidence_grid_scores_arbitrary_points() {
    let dataset = boundary_dataset();
    let mut strategy =
        UncertaintySampling::new(dataset, logistic(), UncertaintyMethod::Entropy).unwrap();

    let grid = Array2::from_shape_vec((3, 1), vec![0.0, 2.5, 5.0]).unwrap();
    let scores = strategy.confidence_grid(&grid).unwrap();
    assert_eq!(scores.len(), 3);
    assert!(scores[1] > scores[0]);
    assert!(scores[1] > scores[2]);
}

#[test]
fn score_recording_appends_one_snapshot_per_round() {
    let dataset = boundary_dataset();

    // Fully labeled held-out pool for the evaluation score
    let test_x = Array2::from_shape_vec((2, 1), vec![0.2, 4.8]).unwrap();
    let test_dataset = Dataset::new(test_x, vec![Some(0), Some(1)])
        .unwrap()
        .into_shared();

    let mut strategy = UncertaintySampling::with_score_recording(
        dataset.clone(),
        logistic(),
        UncertaintyMethod::Entropy,
        test_dataset,
    )
    .unwrap();

    let queried = strategy.make_query(1).unwrap();
    dataset.borrow_mut().update(queried[0], 1).unwrap();
    strategy.make_query(1).unwrap();

    let snapshots = strategy.recorded_scores();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].0, 4);
    assert_eq!(snapshots[1].0, 5);
    for (_, score) in snapshots {
        assert!((0.0..=1.0).contains(score));
    }
}
