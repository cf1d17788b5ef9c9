//! Feature selection as part of the fitted model.
use ndarray::{Array1, Array2, Axis};

use crate::error::EvalError;
use crate::feature_selection::univariate::SelectKBest;
use crate::models::estimator::Estimator;

/// An estimator that performs univariate selection inside `fit`.
///
/// The selector sees only the training data each time `fit` runs, so
/// cross-validating a `SelectedEstimator` keeps the selection honest: the
/// held-out fold never influences which features are kept. Selecting on the
/// full dataset before cross-validating leaks the test folds into the
/// selection and inflates scores.
pub struct SelectedEstimator {
    selector: SelectKBest,
    base: Box<dyn Estimator>,
    selected: Option<Vec<usize>>,
}

impl SelectedEstimator {
    pub fn new(selector: SelectKBest, base: Box<dyn Estimator>) -> Self {
        SelectedEstimator {
            selector,
            base,
            selected: None,
        }
    }

    /// The feature indices chosen during the last `fit`.
    pub fn selected_features(&self) -> Option<&[usize]> {
        self.selected.as_deref()
    }
}

impl Estimator for SelectedEstimator {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), EvalError> {
        let selected = self.selector.fit(x, y);
        if selected.is_empty() {
            return Err(EvalError::InvalidParam(
                "selector kept no features".to_string(),
            ));
        }
        let x_selected = x.select(Axis(1), &selected);
        self.base.fit(&x_selected, y)?;
        self.selected = Some(selected);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, EvalError> {
        let selected = self.selected.as_ref().ok_or(EvalError::NotFitted)?;
        let x_selected = x.select(Axis(1), selected);
        self.base.predict(&x_selected)
    }

    fn clone_box(&self) -> Box<dyn Estimator> {
        Box::new(SelectedEstimator::new(
            self.selector.clone(),
            self.base.clone_box(),
        ))
    }

    fn name(&self) -> &str {
        "selected_estimator"
    }
}
