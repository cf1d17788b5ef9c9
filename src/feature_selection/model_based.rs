//! Selection from a fitted model's feature importances.
use ndarray::{Array1, Array2};

use crate::error::EvalError;
use crate::models::estimator::Estimator;

/// Keep the features a fitted estimator considers important.
///
/// The estimator is fitted on the data and its `feature_importances` are
/// compared against a threshold; features at or above it are kept. Without
/// an explicit threshold the mean importance is used, matching
/// scikit-learn's `SelectFromModel` default.
#[derive(Debug, Clone)]
pub struct SelectFromModel {
    pub threshold: Option<f64>,
}

impl SelectFromModel {
    pub fn new() -> Self {
        SelectFromModel { threshold: None }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Fit a fresh clone of `estimator` and return the kept feature
    /// indices in ascending order.
    pub fn fit(
        &self,
        estimator: &dyn Estimator,
        x: &Array2<f64>,
        y: &Array1<f64>,
    ) -> Result<Vec<usize>, EvalError> {
        let mut model = estimator.clone_box();
        model.fit(x, y)?;

        let importances = model.feature_importances().ok_or_else(|| {
            EvalError::InvalidParam(format!(
                "estimator '{}' does not expose feature importances",
                model.name()
            ))
        })?;

        if importances.len() != x.ncols() {
            return Err(EvalError::LengthMismatch {
                expected: x.ncols(),
                got: importances.len(),
            });
        }

        let threshold = match self.threshold {
            Some(t) => t,
            None => importances.sum() / importances.len() as f64,
        };

        let selected: Vec<usize> = importances
            .iter()
            .enumerate()
            .filter_map(|(i, &imp)| if imp >= threshold { Some(i) } else { None })
            .collect();

        if selected.is_empty() {
            return Err(EvalError::InvalidParam(format!(
                "threshold {} removed every feature",
                threshold
            )));
        }

        Ok(selected)
    }
}

impl Default for SelectFromModel {
    fn default() -> Self {
        Self::new()
    }
}
