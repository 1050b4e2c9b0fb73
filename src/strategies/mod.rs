//! The query-strategy family.
//!
//! Every strategy implements [`QueryStrategy`]: rank the dataset's current
//! unlabeled partition by an informativeness criterion and return the
//! top-`size` sample identifiers, most informative first. Strategies never
//! mutate the dataset; the driving loop labels the returned identifiers and
//! queries again.
pub mod albl;
pub mod bandit;
pub mod class_balance_sampling;
pub mod cluster_margin_sampling;
pub mod density_weighted_uncertainty_sampling;
pub mod dynamic_ensemble;
pub mod expected_error_reduction;
pub mod fisher_information_sampling;
pub mod mean_distance_sampling;
pub mod nearest_neighbour_criterion;
pub mod query_by_committee;
pub mod random_sampling;
pub mod rank_sampling;
pub mod representative_sampling;
pub mod uncertainty_sampling;

pub use albl::ActiveLearningByLearning;
pub use class_balance_sampling::ClassBalanceSampling;
pub use cluster_margin_sampling::ClusterMarginSampling;
pub use density_weighted_uncertainty_sampling::DensityWeightedUncertaintySampling;
pub use dynamic_ensemble::DynamicEnsembleActiveLearning;
pub use expected_error_reduction::ExpectedErrorReduction;
pub use fisher_information_sampling::FisherInformationSampling;
pub use mean_distance_sampling::MeanDistanceSampling;
pub use nearest_neighbour_criterion::NearestNeighbourCriterion;
pub use query_by_committee::QueryByCommittee;
pub use random_sampling::RandomSampling;
pub use rank_sampling::RankSampling;
pub use representative_sampling::RepresentativeSampling;
pub use uncertainty_sampling::UncertaintySampling;

use crate::error::ActiveLearningError;

/// The common contract of all query strategies.
pub trait QueryStrategy {
    /// Return `size` distinct identifiers drawn from the dataset's current
    /// unlabeled partition, ordered from most- to least-informative.
    ///
    /// Fails with [`ActiveLearningError::QuerySize`] when `size` exceeds the
    /// unlabeled pool; the dataset is left untouched on error.
    fn make_query(&mut self, size: usize) -> Result<Vec<usize>, ActiveLearningError>;
}

/// Shared query-size guard.
pub(crate) fn check_query_size(
    requested: usize,
    available: usize,
) -> Result<(), ActiveLearningError> {
    if requested > available {
        return Err(ActiveLearningError::QuerySize {
            requested,
            available,
        });
    }
    Ok(())
}
