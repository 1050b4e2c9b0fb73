//! Integration tests for the dataset partition bookkeeping and the model
//! layer.

use poolal::config::{ModelConfig, ModelType};
use poolal::dataset::Dataset;
use poolal::math::Array2;
use poolal::models::{factory, Model};

fn partial_dataset() -> Dataset {
    // Two labeled blobs on the first feature plus two unlabeled samples
    let x = Array2::from_shape_vec(
        (6, 2),
        vec![
            0.0, 0.1, // class 0
            0.2, -0.1, // class 0
            5.0, 0.1, // class 1
            5.2, -0.2, // class 1
            0.1, 0.0, // unlabeled
            4.9, 0.0, // unlabeled
        ],
    )
    .unwrap();
    let y = vec![Some(0), Some(0), Some(1), Some(1), None, None];
    Dataset::new(x, y).unwrap()
}

// ---------------------------------------------------------------------------
// Dataset partitions
// ---------------------------------------------------------------------------

#[test]
fn partitions_are_tracked() {
    let dataset = partial_dataset();
    assert_eq!(dataset.len(), 6);
    assert_eq!(dataset.len_labeled(), 4);
    assert_eq!(dataset.len_unlabeled(), 2);
    assert_eq!(dataset.unlabeled_ids(), vec![4, 5]);
    assert_eq!(dataset.get_num_of_labels(), 2);
    assert_eq!(dataset.label_set(), vec![0, 1]);
}

#[test]
fn labeled_entries_are_row_aligned() {
    let dataset = partial_dataset();
    let (x, y) = dataset.get_labeled_entries();
    assert_eq!(x.nrows(), 4);
    assert_eq!(y.to_vec(), vec![0, 0, 1, 1]);
}

#[test]
fn update_moves_sample_between_partitions() {
    let mut dataset = partial_dataset();
    dataset.update(4, 0).unwrap();
    assert_eq!(dataset.len_labeled(), 5);
    assert_eq!(dataset.unlabeled_ids(), vec![5]);
    assert_eq!(dataset.label(4), Some(0));
}

#[test]
fn update_out_of_range_errors() {
    let mut dataset = partial_dataset();
    assert!(dataset.update(99, 0).is_err());
}

#[test]
fn mismatched_label_vector_is_rejected() {
    let x = Array2::from_shape_vec((2, 1), vec![0.0, 1.0]).unwrap();
    assert!(Dataset::new(x, vec![Some(0)]).is_err());
}

// ---------------------------------------------------------------------------
// Models
// ---------------------------------------------------------------------------

#[test]
fn factory_builds_and_predicts() {
    let dataset = partial_dataset();

    let params = ModelConfig {
        learning_rate: 0.1,
        model_type: ModelType::Logistic {
            max_iter: 200,
            l2: 1e-4,
        },
    };

    let mut model = factory::build_model(params);
    model.train(&dataset).unwrap();

    let (ids, unlabeled) = dataset.get_unlabeled_entries();
    let predicted = model.predict(&unlabeled).unwrap();
    assert_eq!(predicted.len(), ids.len());
    // The unlabeled samples sit inside the blobs, so the separable problem
    // should classify them with their neighbours.
    assert_eq!(predicted, vec![0, 1]);
}

#[test]
fn logistic_capabilities_are_flagged() {
    let model = factory::build_model(ModelConfig::default());
    assert!(model.supports_proba());
    assert!(model.supports_decision_function());
}

#[test]
fn score_is_accuracy_on_labeled_entries() {
    let dataset = partial_dataset();
    let mut model = factory::build_model(ModelConfig::default());
    model.train(&dataset).unwrap();
    let score = model.score(&dataset).unwrap();
    assert!((score - 1.0).abs() < 1e-12);
}

#[test]
fn proba_columns_follow_ascending_label_set() {
    let dataset = partial_dataset();
    let mut model = factory::build_model(ModelConfig::default());
    model.train(&dataset).unwrap();

    let (_, unlabeled) = dataset.get_unlabeled_entries();
    let proba = model.predict_proba(&unlabeled).unwrap();
    assert_eq!(proba.shape(), (2, 2));
    // First unlabeled sample is near the class-0 blob: column 0 dominates
    assert!(proba[(0, 0)] > proba[(0, 1)]);
    assert!(proba[(1, 1)] > proba[(1, 0)]);
}
