//! The model-evaluation engine.
//!
//! Everything here follows the same recipe: clone a fresh estimator per
//! fold, fit it on the training indices, score it on the held-out indices,
//! and aggregate. The submodules layer the classic protocols on top of that
//! loop: plain cross-validation, learning curves, grid search, nested
//! cross-validation, and permutation testing.
pub mod cross_validate;
pub mod grid_search;
pub mod learning_curve;
pub mod nested;
pub mod permutation;

pub use cross_validate::{cross_val_score, cross_validate, CvOptions, CvResult};
pub use grid_search::{GridSearch, GridSearchResult};
pub use learning_curve::{learning_curve, LearningCurve};
pub use nested::{nested_cross_validate, NestedCvResult};
pub use permutation::{permutation_test_score, PermutationTest};
