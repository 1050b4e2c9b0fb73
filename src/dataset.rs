//! Sample pool with a partial label assignment.
//!
//! `Dataset` owns the feature matrix and one `Option<i32>` label slot per
//! row. The driving loop labels entries with `update` between query rounds;
//! strategies read the labeled/unlabeled partitions fresh on every scoring
//! pass and never cache them.
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use crate::error::ActiveLearningError;
use crate::math::{Array1, Array2};

/// Shared handle to a dataset.
///
/// The crate is single-threaded: one driving loop mutates labels while any
/// number of strategies hold a handle, so `Rc<RefCell<_>>` is the ownership
/// model. Label updates are immediately visible to every holder.
pub type DatasetRef = Rc<RefCell<Dataset>>;

#[derive(Debug, Clone)]
pub struct Dataset {
    x: Array2<f64>,
    y: Vec<Option<i32>>,
}

impl Dataset {
    /// Build a dataset from a feature matrix and one label slot per row.
    /// `None` marks an unlabeled sample.
    pub fn new(x: Array2<f64>, y: Vec<Option<i32>>) -> Result<Self, ActiveLearningError> {
        if x.nrows() != y.len() {
            return Err(ActiveLearningError::LengthMismatch {
                left: x.nrows(),
                right: y.len(),
            });
        }
        Ok(Dataset { x, y })
    }

    pub fn into_shared(self) -> DatasetRef {
        Rc::new(RefCell::new(self))
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    pub fn len_labeled(&self) -> usize {
        self.y.iter().filter(|l| l.is_some()).count()
    }

    pub fn len_unlabeled(&self) -> usize {
        self.y.iter().filter(|l| l.is_none()).count()
    }

    /// Feature vector of one sample.
    pub fn feature(&self, id: usize) -> &[f64] {
        self.x.row_slice(id)
    }

    pub fn label(&self, id: usize) -> Option<i32> {
        self.y[id]
    }

    /// Features and labels of the currently labeled entries, row-aligned.
    pub fn get_labeled_entries(&self) -> (Array2<f64>, Array1<i32>) {
        let ids: Vec<usize> = self
            .y
            .iter()
            .enumerate()
            .filter_map(|(i, l)| l.map(|_| i))
            .collect();
        let labels = ids.iter().map(|&i| self.y[i].unwrap()).collect();
        (self.x.select_rows(&ids), labels)
    }

    /// Identifiers and features of the currently unlabeled entries.
    pub fn get_unlabeled_entries(&self) -> (Vec<usize>, Array2<f64>) {
        let ids = self.unlabeled_ids();
        let features = self.x.select_rows(&ids);
        (ids, features)
    }

    pub fn unlabeled_ids(&self) -> Vec<usize> {
        self.y
            .iter()
            .enumerate()
            .filter_map(|(i, l)| if l.is_none() { Some(i) } else { None })
            .collect()
    }

    /// Assign a label to a sample, typically after the oracle answered a
    /// query.
    pub fn update(&mut self, id: usize, label: i32) -> Result<(), ActiveLearningError> {
        if id >= self.y.len() {
            return Err(ActiveLearningError::Configuration(format!(
                "sample id {} out of range for dataset of {} entries",
                id,
                self.y.len()
            )));
        }
        if let Some(old) = self.y[id] {
            log::warn!("relabeling sample {} ({} -> {})", id, old, label);
        }
        self.y[id] = Some(label);
        log::trace!(
            "labeled sample {}: {} labeled / {} unlabeled",
            id,
            self.len_labeled(),
            self.len_unlabeled()
        );
        Ok(())
    }

    /// Number of distinct classes among the labeled entries.
    pub fn get_num_of_labels(&self) -> usize {
        self.label_set().len()
    }

    /// Sorted distinct class labels of the labeled entries. Probability
    /// matrices produced by models order their columns by this set.
    pub fn label_set(&self) -> Vec<i32> {
        let set: BTreeSet<i32> = self.y.iter().flatten().copied().collect();
        set.into_iter().collect()
    }

    pub fn log_summary(&self) {
        log::info!(
            "dataset: {} samples ({} labeled, {} unlabeled), {} features, {} classes",
            self.len(),
            self.len_labeled(),
            self.len_unlabeled(),
            self.n_features(),
            self.get_num_of_labels()
        );
    }
}
