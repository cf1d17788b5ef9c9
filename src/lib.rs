//! crossval: model-evaluation helpers for classical ML estimators.
//!
//! This crate provides resampling splitters (k-fold, stratified, shuffle
//! split), scoring metrics, an estimator seam with a few small models and
//! wrappers, and the evaluation protocols built on top: cross-validation,
//! learning curves, grid search, nested cross-validation, and permutation
//! tests. Reporting/plotting helpers feed the demo binaries.
//!
//! The design favors small, testable modules with feature flags to avoid
//! requiring extra native dependencies (e.g., linfa's BLAS-backed SVM)
//! unless explicitly enabled.
pub mod config;
pub mod data;
pub mod datasets;
pub mod error;
pub mod evaluation;
pub mod feature_selection;
pub mod io;
pub mod models;
pub mod preprocessing;
pub mod report;
pub mod scoring;
pub mod splits;
pub mod stats;
