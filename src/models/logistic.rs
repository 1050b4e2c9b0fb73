use anyhow::{bail, Result};

use crate::config::{ModelConfig, ModelType};
use crate::dataset::Dataset;
use crate::math::Array2;
use crate::models::model_trait::Model;

/// Multinomial logistic regression trained by batch gradient descent.
///
/// The default model of the crate: supports both probabilities and raw
/// decision scores, and is fully deterministic (weights start at zero, no
/// sampling anywhere), which keeps repeated queries on an unchanged dataset
/// identical.
pub struct LogisticRegression {
    config: ModelConfig,
    // (n_classes, n_features + 1); last column is the bias
    weights: Option<Array2<f64>>,
    classes: Vec<i32>,
}

impl LogisticRegression {
    pub fn new(config: ModelConfig) -> Self {
        LogisticRegression {
            config,
            weights: None,
            classes: Vec::new(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ModelConfig::default())
    }

    fn raw_scores(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let weights = match &self.weights {
            Some(w) => w,
            None => bail!("logistic regression has not been trained"),
        };
        let d = weights.ncols() - 1;
        if x.ncols() != d {
            bail!(
                "expected {} features, got {} (model was trained on a different pool)",
                d,
                x.ncols()
            );
        }
        let k = weights.nrows();
        let mut out = Vec::with_capacity(x.nrows() * k);
        for i in 0..x.nrows() {
            let row = x.row_slice(i);
            for c in 0..k {
                let wc = weights.row_slice(c);
                let mut z = wc[d];
                for j in 0..d {
                    z += wc[j] * row[j];
                }
                out.push(z);
            }
        }
        Ok(Array2::from_shape_vec((x.nrows(), k), out)?)
    }
}

fn softmax(z: &[f64]) -> Vec<f64> {
    let max = z.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = z.iter().map(|&v| (v - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

impl Model for LogisticRegression {
    fn train(&mut self, dataset: &Dataset) -> Result<()> {
        let (x, y) = dataset.get_labeled_entries();
        if y.is_empty() {
            bail!("cannot train on a dataset with no labeled entries");
        }

        let (max_iter, l2) = match self.config.model_type {
            ModelType::Logistic { max_iter, l2 } => (max_iter, l2),
            #[cfg(feature = "linfa")]
            _ => bail!("expected ModelType::Logistic parameters"),
        };
        let lr = self.config.learning_rate;

        let classes = dataset.label_set();
        let class_idx = |label: i32| classes.iter().position(|&c| c == label).unwrap();
        let n = x.nrows();
        let d = x.ncols();
        let k = classes.len();

        let mut weights = vec![0.0f64; k * (d + 1)];
        for _ in 0..max_iter {
            let mut grad = vec![0.0f64; k * (d + 1)];
            for i in 0..n {
                let row = x.row_slice(i);
                let z: Vec<f64> = (0..k)
                    .map(|c| {
                        let wc = &weights[c * (d + 1)..(c + 1) * (d + 1)];
                        wc[d] + row.iter().zip(&wc[..d]).map(|(a, b)| a * b).sum::<f64>()
                    })
                    .collect();
                let p = softmax(&z);
                let target = class_idx(y[i]);
                for c in 0..k {
                    let g = p[c] - if c == target { 1.0 } else { 0.0 };
                    let gc = &mut grad[c * (d + 1)..(c + 1) * (d + 1)];
                    for j in 0..d {
                        gc[j] += g * row[j];
                    }
                    gc[d] += g;
                }
            }
            let n_f = n as f64;
            for (w, g) in weights.iter_mut().zip(grad.iter()) {
                *w -= lr * (g / n_f + l2 * *w);
            }
        }

        self.weights = Some(Array2::from_shape_vec((k, d + 1), weights)?);
        self.classes = classes;
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>> {
        let scores = self.raw_scores(x)?;
        let k = scores.ncols();
        let mut labels = Vec::with_capacity(x.nrows());
        for i in 0..scores.nrows() {
            let row = scores.row_slice(i);
            let mut best = 0usize;
            for c in 1..k {
                if row[c] > row[best] {
                    best = c;
                }
            }
            labels.push(self.classes[best]);
        }
        Ok(labels)
    }

    fn supports_proba(&self) -> bool {
        true
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let scores = self.raw_scores(x)?;
        let k = scores.ncols();
        let mut out = Vec::with_capacity(x.nrows() * k);
        for i in 0..scores.nrows() {
            out.extend(softmax(scores.row_slice(i)));
        }
        Ok(Array2::from_shape_vec((x.nrows(), k), out)?)
    }

    fn supports_decision_function(&self) -> bool {
        true
    }

    fn decision_function(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.raw_scores(x)
    }

    fn name(&self) -> &str {
        "logistic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_dataset() -> Dataset {
        // Two well-separated blobs on the first feature
        let x = Array2::from_shape_vec(
            (6, 2),
            vec![
                0.0, 0.1, //
                0.2, -0.1, //
                0.1, 0.0, //
                5.0, 0.1, //
                5.2, -0.2, //
                4.9, 0.0,
            ],
        )
        .unwrap();
        let y = vec![Some(0), Some(0), Some(0), Some(1), Some(1), Some(1)];
        Dataset::new(x, y).unwrap()
    }

    #[test]
    fn separable_blobs_are_classified() {
        let dataset = toy_dataset();
        let mut model = LogisticRegression::with_defaults();
        model.train(&dataset).unwrap();

        let (x, y) = dataset.get_labeled_entries();
        let predicted = model.predict(&x).unwrap();
        assert_eq!(predicted, y.to_vec());
        assert!((model.score(&dataset).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let dataset = toy_dataset();
        let mut model = LogisticRegression::with_defaults();
        model.train(&dataset).unwrap();

        let (x, _) = dataset.get_labeled_entries();
        let proba = model.predict_proba(&x).unwrap();
        assert_eq!(proba.shape(), (6, 2));
        for i in 0..proba.nrows() {
            let total: f64 = proba.row_slice(i).iter().sum();
            assert!((total - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn predict_before_train_errors() {
        let model = LogisticRegression::with_defaults();
        let x = Array2::from_shape_vec((1, 2), vec![0.0, 0.0]).unwrap();
        assert!(model.predict(&x).is_err());
    }
}
