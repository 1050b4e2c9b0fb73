//! poolal: pool-based active learning.
//!
//! Given a partially labeled [`dataset::Dataset`] and a trainable
//! [`models::Model`], the strategies in [`strategies`] decide which unlabeled
//! samples are worth sending to an oracle next: every strategy ranks the
//! current unlabeled pool by an informativeness criterion and
//! `make_query(size)` returns the top `size` sample identifiers.
//!
//! The crate ships uncertainty sampling, committee disagreement, expected
//! error reduction, several feature-space geometry criteria, and two
//! bandit-style meta-strategies that learn which base strategy to trust.
//! Models are pluggable behind a small trait with capability flags; a
//! deterministic logistic regression is built in and an SVM wrapper is
//! available behind the `linfa` feature.
pub mod cluster;
pub mod config;
pub mod dataset;
pub mod error;
pub mod math;
pub mod models;
pub mod preprocessing;
pub mod strategies;
pub mod utils;
