use anyhow::{anyhow, bail, Result};
use linfa::dataset::Pr;
use linfa::traits::Predict;
use linfa_svm::{Svm, SvmParams};

use crate::config::{ModelConfig, ModelType};
use crate::dataset::Dataset;
use crate::math::Array2;
use crate::models::model_trait::Model;

/// Binary SVM wrapper over linfa-svm with Platt-style probability output.
///
/// The dataset's two class labels are mapped onto the negative/positive
/// sides of the separating boundary; `predict_proba` reports the positive
/// probability `p` as `[1 - p, p]` columns in ascending label order.
pub struct SvmClassifier {
    config: ModelConfig,
    model: Option<Svm<f64, Pr>>,
    // [negative, positive] in ascending label order
    classes: Vec<i32>,
}

impl SvmClassifier {
    pub fn new(config: ModelConfig) -> Self {
        SvmClassifier {
            config,
            model: None,
            classes: Vec::new(),
        }
    }

    fn positive_proba(&self, x: &Array2<f64>) -> Result<Vec<f64>> {
        let model = match &self.model {
            Some(m) => m,
            None => bail!("svm has not been trained"),
        };
        let x_nd = ndarray::Array2::from_shape_vec((x.nrows(), x.ncols()), x.to_vec())?;
        let predictions = model.predict(x_nd);
        Ok(predictions.targets().iter().map(|&p| *p as f64).collect())
    }
}

impl Model for SvmClassifier {
    fn train(&mut self, dataset: &Dataset) -> Result<()> {
        let (x, y) = dataset.get_labeled_entries();
        if y.is_empty() {
            bail!("cannot train on a dataset with no labeled entries");
        }
        let classes = dataset.label_set();
        if classes.len() != 2 {
            bail!(
                "svm classifier is binary, got {} classes",
                classes.len()
            );
        }

        let (eps, c, kernel, gauss_eps, poly_c, poly_d) = match &self.config.model_type {
            ModelType::Svm {
                eps,
                c,
                kernel,
                gaussian_kernel_eps,
                polynomial_kernel_constant,
                polynomial_kernel_degree,
            } => (
                *eps,
                *c,
                kernel.clone(),
                *gaussian_kernel_eps,
                *polynomial_kernel_constant,
                *polynomial_kernel_degree,
            ),
            _ => bail!("expected ModelType::Svm parameters"),
        };

        let positive = classes[1];
        let targets =
            ndarray::Array1::from_vec(y.iter().map(|&l| l == positive).collect::<Vec<bool>>());
        let x_nd = ndarray::Array2::from_shape_vec((x.nrows(), x.ncols()), x.to_vec())?;
        let train = linfa::Dataset::new(x_nd, targets);

        let mut params: SvmParams<f64, Pr> = Svm::<f64, Pr>::params()
            .eps(eps)
            .pos_neg_weights(c.0, c.1);
        params = match kernel.as_str() {
            "linear" => params.linear_kernel(),
            "gauss" => params.gaussian_kernel(gauss_eps),
            "poly" => params.polynomial_kernel(poly_c, poly_d),
            other => bail!(
                "unsupported kernel type: {}. Valid options are: linear, gauss, poly",
                other
            ),
        };

        let fitted = <SvmParams<f64, Pr> as linfa::traits::Fit<_, _, _>>::fit(&params, &train)
            .map_err(|e| anyhow!("svm training failed: {}", e))?;
        self.model = Some(fitted);
        self.classes = classes;
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Vec<i32>> {
        let proba = self.positive_proba(x)?;
        Ok(proba
            .iter()
            .map(|&p| {
                if p > 0.5 {
                    self.classes[1]
                } else {
                    self.classes[0]
                }
            })
            .collect())
    }

    fn supports_proba(&self) -> bool {
        true
    }

    fn predict_proba(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let proba = self.positive_proba(x)?;
        let mut out = Vec::with_capacity(proba.len() * 2);
        for p in proba {
            out.push(1.0 - p);
            out.push(p);
        }
        Ok(Array2::from_shape_vec((x.nrows(), 2), out)?)
    }

    fn name(&self) -> &str {
        "svm"
    }
}
