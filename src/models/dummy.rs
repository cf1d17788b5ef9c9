//! Trivial baseline estimators.
//!
//! A dummy predictor gives the chance-level reference every real model has
//! to beat; the comparison helpers in `stats` and the permutation test lean
//! on these.
use ndarray::{Array1, Array2};

use crate::config::{ClassifierStrategy, DummyStrategy};
use crate::error::EvalError;
use crate::models::estimator::Estimator;

/// Predicts a constant derived from the training targets.
#[derive(Debug, Clone)]
pub struct DummyRegressor {
    strategy: DummyStrategy,
    constant: Option<f64>,
}

impl DummyRegressor {
    pub fn new(strategy: DummyStrategy) -> Self {
        DummyRegressor {
            strategy,
            constant: None,
        }
    }
}

impl Estimator for DummyRegressor {
    fn fit(&mut self, _x: &Array2<f64>, y: &Array1<f64>) -> Result<(), EvalError> {
        if y.is_empty() {
            return Err(EvalError::EmptyData);
        }
        let constant = match self.strategy {
            DummyStrategy::Mean => y.sum() / y.len() as f64,
            DummyStrategy::Median => median(y.to_vec()),
        };
        self.constant = Some(constant);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, EvalError> {
        let constant = self.constant.ok_or(EvalError::NotFitted)?;
        Ok(Array1::from_elem(x.nrows(), constant))
    }

    fn clone_box(&self) -> Box<dyn Estimator> {
        Box::new(DummyRegressor::new(self.strategy))
    }

    fn name(&self) -> &str {
        match self.strategy {
            DummyStrategy::Mean => "dummy_mean",
            DummyStrategy::Median => "dummy_median",
        }
    }
}

/// Predicts from the training label distribution, ignoring the features.
#[derive(Debug, Clone)]
pub struct DummyClassifier {
    strategy: ClassifierStrategy,
    prediction: Option<f64>,
}

impl DummyClassifier {
    pub fn new(strategy: ClassifierStrategy) -> Self {
        DummyClassifier {
            strategy,
            prediction: None,
        }
    }
}

impl Estimator for DummyClassifier {
    fn fit(&mut self, _x: &Array2<f64>, y: &Array1<f64>) -> Result<(), EvalError> {
        if y.is_empty() {
            return Err(EvalError::EmptyData);
        }
        let positives = y.iter().filter(|&&v| v.round() >= 1.0).count() as f64;
        let prior = positives / y.len() as f64;

        self.prediction = Some(match self.strategy {
            ClassifierStrategy::MostFrequent => {
                if prior >= 0.5 {
                    1.0
                } else {
                    0.0
                }
            }
            ClassifierStrategy::Prior => prior,
        });
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, EvalError> {
        let prediction = self.prediction.ok_or(EvalError::NotFitted)?;
        Ok(Array1::from_elem(x.nrows(), prediction))
    }

    fn clone_box(&self) -> Box<dyn Estimator> {
        Box::new(DummyClassifier::new(self.strategy))
    }

    fn name(&self) -> &str {
        match self.strategy {
            ClassifierStrategy::MostFrequent => "dummy_most_frequent",
            ClassifierStrategy::Prior => "dummy_prior",
        }
    }
}

fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn mean_regressor_predicts_training_mean() {
        let x = Array2::zeros((4, 2));
        let y = array![1.0, 2.0, 3.0, 4.0];

        let mut model = DummyRegressor::new(DummyStrategy::Mean);
        model.fit(&x, &y).unwrap();
        let preds = model.predict(&x).unwrap();
        for p in preds.iter() {
            assert!((p - 2.5).abs() < 1e-12);
        }
    }

    #[test]
    fn most_frequent_picks_majority_label() {
        let x = Array2::zeros((5, 1));
        let y = array![1.0, 1.0, 1.0, 0.0, 0.0];

        let mut model = DummyClassifier::new(ClassifierStrategy::MostFrequent);
        model.fit(&x, &y).unwrap();
        let preds = model.predict(&x).unwrap();
        assert!(preds.iter().all(|&p| p == 1.0));
    }

    #[test]
    fn predict_before_fit_errors() {
        let model = DummyRegressor::new(DummyStrategy::Median);
        let x = Array2::zeros((2, 1));
        assert!(model.predict(&x).is_err());
    }
}
