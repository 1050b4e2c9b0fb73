use std::error::Error;
use std::fmt;

/// Errors raised by query strategies and their configuration.
///
/// Construction problems surface as `Configuration` or `Capability` before a
/// single query is made; `QuerySize` is the only error a correctly
/// constructed strategy raises at query time.
#[derive(Debug)]
pub enum ActiveLearningError {
    /// Invalid constructor arguments (unknown method, missing model, ...).
    Configuration(String),
    /// The model lacks a method the strategy needs.
    Capability {
        model: String,
        method: &'static str,
    },
    /// Requested batch exceeds the current unlabeled pool.
    QuerySize {
        requested: usize,
        available: usize,
    },
    LengthMismatch {
        left: usize,
        right: usize,
    },
    /// Failure inside a model's train/predict/score call.
    Model(anyhow::Error),
}

impl fmt::Display for ActiveLearningError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ActiveLearningError::Configuration(msg) => {
                write!(f, "invalid strategy configuration: {}", msg)
            }
            ActiveLearningError::Capability { model, method } => {
                write!(f, "model '{}' does not support {}", model, method)
            }
            ActiveLearningError::QuerySize {
                requested,
                available,
            } => write!(
                f,
                "requested {} samples but only {} are unlabeled",
                requested, available
            ),
            ActiveLearningError::LengthMismatch { left, right } => {
                write!(
                    f,
                    "sequences must have equal length, got {} and {}",
                    left, right
                )
            }
            ActiveLearningError::Model(err) => write!(f, "model error: {}", err),
        }
    }
}

impl Error for ActiveLearningError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ActiveLearningError::Model(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for ActiveLearningError {
    fn from(err: anyhow::Error) -> Self {
        ActiveLearningError::Model(err)
    }
}
