use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Scoring mode for uncertainty sampling.
///
/// With `p` the class-probability vector of one sample:
/// - `Lc` scores `1 - max(p)` (query the highest),
/// - `Entropy` scores the Shannon entropy of `p` (query the highest),
/// - `Margin` scores `max_1(p) - max_2(p)` (query the lowest).
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UncertaintyMethod {
    Lc,
    Entropy,
    Margin,
}

impl Default for UncertaintyMethod {
    fn default() -> Self {
        UncertaintyMethod::Entropy
    }
}

impl FromStr for UncertaintyMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lc" => Ok(UncertaintyMethod::Lc),
            "entropy" => Ok(UncertaintyMethod::Entropy),
            "margin" => Ok(UncertaintyMethod::Margin),
            _ => Err(format!(
                "Unknown uncertainty method: {}. Supported methods are [lc, entropy, margin]",
                s
            )),
        }
    }
}

/// Sort direction for score pairs.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Min,
    Max,
}

/// Central configuration for models in the crate.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ModelConfig {
    pub learning_rate: f64,

    #[serde(flatten)]
    pub model_type: ModelType,
}

/// Supported model types and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub enum ModelType {
    Logistic {
        max_iter: u32,
        l2: f64,
    },
    #[cfg(feature = "linfa")]
    Svm {
        eps: f64,
        c: (f64, f64),
        kernel: String,
        gaussian_kernel_eps: f64,
        polynomial_kernel_constant: f64,
        polynomial_kernel_degree: f64,
    },
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::Logistic {
            max_iter: 200,
            l2: 1e-4,
        }
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logistic" => Ok(ModelType::Logistic {
                max_iter: 200,
                l2: 1e-4,
            }),
            #[cfg(feature = "linfa")]
            "svm" => Ok(ModelType::Svm {
                eps: 0.1,
                c: (1.0, 1.0),
                kernel: "linear".to_string(),
                gaussian_kernel_eps: 0.1,
                polynomial_kernel_constant: 1.0,
                polynomial_kernel_degree: 3.0,
            }),
            _ => Err(format!(
                "Unknown model type: {}. To use svm, please compile with `--features linfa`",
                s
            )),
        }
    }
}

impl ModelConfig {
    pub fn new(learning_rate: f64, model_type: ModelType) -> Self {
        Self {
            learning_rate,
            model_type,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            model_type: ModelType::default(),
        }
    }
}
