use anyhow::Result;

use crate::dataset::Dataset;
use crate::math::Array2;

/// A small trait abstraction for the classifiers query strategies are built
/// on. Strategies only ever see this contract; the concrete model (built-in
/// logistic regression, the optional linfa SVM wrapper, or anything a caller
/// brings) lives behind a `Box<dyn Model>`.
///
/// `predict_proba` and `decision_function` are capability-optional: the
/// matching `supports_*` flag tells a strategy at construction time whether
/// the method is usable, so capability problems surface as configuration
/// errors instead of query-time surprises.
pub trait Model {
    /// Fit the model on the dataset's current labeled entries.
    fn train(&mut self, dataset: &Dataset) -> Result<()>;

    /// Predict a class label per row of `x`.
    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>>;

    /// Whether `predict_proba` is usable on this model.
    fn supports_proba(&self) -> bool {
        false
    }

    /// Class-probability matrix, one row per sample; columns follow the
    /// training dataset's ascending label set.
    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let _ = x;
        anyhow::bail!("model '{}' does not support predict_proba", self.name())
    }

    /// Whether `decision_function` is usable on this model.
    fn supports_decision_function(&self) -> bool {
        false
    }

    /// Raw per-class decision scores, one row per sample.
    fn decision_function(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let _ = x;
        anyhow::bail!(
            "model '{}' does not support decision_function",
            self.name()
        )
    }

    /// Mean accuracy over the dataset's labeled entries.
    fn score(&self, dataset: &Dataset) -> Result<f64> {
        let (x, y) = dataset.get_labeled_entries();
        if y.is_empty() {
            anyhow::bail!("cannot score against a dataset with no labeled entries");
        }
        let predicted = self.predict(&x)?;
        let correct = predicted
            .iter()
            .zip(y.iter())
            .filter(|(p, t)| p == t)
            .count();
        Ok(correct as f64 / y.len() as f64)
    }

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}
