use crate::config::ModelConfig;
use crate::models::model_trait::Model;

/// Build a boxed model from a `ModelConfig`.
/// Currently this is a thin factory implemented as a single function.
pub fn build_model(params: ModelConfig) -> Box<dyn Model> {
    match params.model_type {
        crate::config::ModelType::Logistic { .. } => {
            Box::new(crate::models::logistic::LogisticRegression::new(params))
        }

        #[cfg(feature = "linfa")]
        crate::config::ModelType::Svm { .. } => {
            Box::new(crate::models::svm::SvmClassifier::new(params))
        } // When compiled, `ModelType` only contains the variants enabled by
          // features. The above arms are exhaustive for the compiled enum, so
          // no catch-all arm is necessary.
    }
}
