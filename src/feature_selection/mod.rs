//! Feature selection utilities.
//!
//! Univariate selection routines (a la scikit-learn) for scoring and
//! ranking features, model-based selection from estimator importances, and
//! a wrapper estimator that performs selection inside each training fold,
//! which is the only place selection belongs when cross-validating.
pub mod model_based;
pub mod pipeline;
pub mod univariate;

pub use model_based::SelectFromModel;
pub use pipeline::SelectedEstimator;
pub use univariate::{f_classif, f_regression, r_regression, ScoreFunction, SelectKBest};
