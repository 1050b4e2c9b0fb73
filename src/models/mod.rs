pub mod logistic;
#[cfg(feature = "linfa")]
pub mod svm;

pub mod factory;
pub mod model_trait;

pub use model_trait::Model;
