//! Integration tests for the scoring utilities and config types.

use poolal::config::{ModelConfig, ModelType, SortDirection, UncertaintyMethod};
use poolal::math::Array2;
use poolal::preprocessing::{fit_scaler, fit_transform};
use poolal::utils::{entropy, pair, sort_by_score};

// ---------------------------------------------------------------------------
// Entropy
// ---------------------------------------------------------------------------

#[test]
fn entropy_of_one_hot_is_zero() {
    assert_eq!(entropy(&[1.0, 0.0, 0.0]), 0.0);
}

#[test]
fn entropy_of_uniform_is_log_k() {
    let k = 4;
    let uniform = vec![1.0 / k as f64; k];
    assert!((entropy(&uniform) - (k as f64).ln()).abs() < 1e-12);
}

#[test]
fn entropy_is_higher_for_flatter_distributions() {
    assert!(entropy(&[0.5, 0.5]) > entropy(&[0.9, 0.1]));
}

// ---------------------------------------------------------------------------
// pair / sort_by_score
// ---------------------------------------------------------------------------

#[test]
fn pair_zips_ids_with_scores() {
    let pairs = pair(&[3, 1, 4], &[0.1, 0.2, 0.3]).unwrap();
    assert_eq!(pairs, vec![(3, 0.1), (1, 0.2), (4, 0.3)]);
}

#[test]
fn pair_rejects_mismatched_lengths() {
    let result = pair(&[1, 2, 3], &[0.5, 0.5]);
    assert!(result.is_err());
}

#[test]
fn sort_by_score_ascending_and_descending() {
    let pairs = vec![(0, 0.3), (1, 0.1), (2, 0.2)];
    let ascending = sort_by_score(pairs.clone(), SortDirection::Min);
    assert_eq!(ascending, vec![(1, 0.1), (2, 0.2), (0, 0.3)]);

    let descending = sort_by_score(pairs, SortDirection::Max);
    assert_eq!(descending, vec![(0, 0.3), (2, 0.2), (1, 0.1)]);
}

#[test]
fn sort_by_score_breaks_ties_by_identifier() {
    let tied = vec![(2, 0.5), (1, 0.5)];
    assert_eq!(
        sort_by_score(tied.clone(), SortDirection::Max),
        vec![(1, 0.5), (2, 0.5)]
    );
    assert_eq!(
        sort_by_score(tied, SortDirection::Min),
        vec![(1, 0.5), (2, 0.5)]
    );
}

// ---------------------------------------------------------------------------
// Config enums
// ---------------------------------------------------------------------------

#[test]
fn uncertainty_method_default_is_entropy() {
    assert_eq!(UncertaintyMethod::default(), UncertaintyMethod::Entropy);
}

#[test]
fn uncertainty_method_from_str() {
    let method: UncertaintyMethod = "margin".parse().unwrap();
    assert_eq!(method, UncertaintyMethod::Margin);
    let result: Result<UncertaintyMethod, _> = "softmax".parse();
    assert!(result.is_err());
}

#[test]
fn model_type_from_str_logistic() {
    let mt: ModelType = "logistic".parse().unwrap();
    match mt {
        ModelType::Logistic { max_iter, .. } => assert_eq!(max_iter, 200),
        #[allow(unreachable_patterns)]
        _ => panic!("expected Logistic"),
    }
}

#[test]
fn model_type_from_str_unknown_errors() {
    let result: Result<ModelType, _> = "random_forest".parse();
    assert!(result.is_err());
}

#[test]
fn model_config_round_trips_json() {
    let cfg = ModelConfig::default();
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("learning_rate"));
    let cfg2: ModelConfig = serde_json::from_str(&json).unwrap();
    assert!((cfg.learning_rate - cfg2.learning_rate).abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// Preprocessing
// ---------------------------------------------------------------------------

#[test]
fn scaler_standardizes_columns() {
    let x = Array2::from_shape_vec((4, 1), vec![0.0, 2.0, 4.0, 6.0]).unwrap();
    let sc = fit_scaler(&x);
    assert!((sc.mean[0] - 3.0).abs() < 1e-12);

    let z = fit_transform(&x);
    let mean: f64 = (0..4).map(|r| z[(r, 0)]).sum::<f64>() / 4.0;
    assert!(mean.abs() < 1e-12);
}
