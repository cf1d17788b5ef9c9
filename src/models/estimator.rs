use ndarray::{Array1, Array2};

use crate::error::EvalError;

/// The estimator abstraction the evaluation routines are written against.
///
/// Implementations wrap external model crates or small in-crate learners;
/// the evaluation engine only ever sees this trait. `clone_box` hands each
/// cross-validation fold a fresh, unfitted copy of the estimator so folds
/// never share fitted state.
pub trait Estimator: Send + Sync {
    /// Fit the estimator on a feature matrix and target vector.
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), EvalError>;

    /// Predict targets for new rows. Errors with `NotFitted` before `fit`.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, EvalError>;

    /// Per-input-feature importances, when the model exposes them.
    fn feature_importances(&self) -> Option<Array1<f64>> {
        None
    }

    /// A fresh, unfitted copy of this estimator with the same configuration.
    fn clone_box(&self) -> Box<dyn Estimator>;

    /// Optional human readable name for the estimator
    fn name(&self) -> &str {
        "estimator"
    }
}

impl Clone for Box<dyn Estimator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
