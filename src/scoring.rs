//! Scoring metrics for fitted estimators.
use std::fmt;
use std::str::FromStr;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// Supported evaluation metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scoring {
    Mse,
    Rmse,
    Mae,
    R2,
    Accuracy,
}

impl Scoring {
    /// Compute the metric for a prediction against the ground truth.
    pub fn score(&self, y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64, EvalError> {
        if y_true.len() != y_pred.len() {
            return Err(EvalError::LengthMismatch {
                expected: y_true.len(),
                got: y_pred.len(),
            });
        }
        if y_true.is_empty() {
            return Err(EvalError::EmptyData);
        }
        let n = y_true.len() as f64;

        let value = match self {
            Scoring::Mse => squared_error_sum(y_true, y_pred) / n,
            Scoring::Rmse => (squared_error_sum(y_true, y_pred) / n).sqrt(),
            Scoring::Mae => {
                y_true
                    .iter()
                    .zip(y_pred.iter())
                    .map(|(t, p)| (t - p).abs())
                    .sum::<f64>()
                    / n
            }
            Scoring::R2 => {
                let mean = y_true.sum() / n;
                let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();
                if ss_tot == 0.0 {
                    // Constant target: R2 is undefined, report no skill.
                    0.0
                } else {
                    1.0 - squared_error_sum(y_true, y_pred) / ss_tot
                }
            }
            Scoring::Accuracy => {
                let correct = y_true
                    .iter()
                    .zip(y_pred.iter())
                    .filter(|(t, p)| t.round() == p.round())
                    .count();
                correct as f64 / n
            }
        };

        Ok(value)
    }

    /// Whether larger metric values indicate a better model.
    pub fn greater_is_better(&self) -> bool {
        matches!(self, Scoring::R2 | Scoring::Accuracy)
    }

    /// Compare two scores under this metric's direction.
    pub fn is_improvement(&self, candidate: f64, incumbent: f64) -> bool {
        if self.greater_is_better() {
            candidate > incumbent
        } else {
            candidate < incumbent
        }
    }
}

fn squared_error_sum(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum()
}

impl fmt::Display for Scoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scoring::Mse => "mse",
            Scoring::Rmse => "rmse",
            Scoring::Mae => "mae",
            Scoring::R2 => "r2",
            Scoring::Accuracy => "accuracy",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Scoring {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mse" => Ok(Scoring::Mse),
            "rmse" => Ok(Scoring::Rmse),
            "mae" => Ok(Scoring::Mae),
            "r2" => Ok(Scoring::R2),
            "accuracy" | "acc" => Ok(Scoring::Accuracy),
            _ => Err(format!(
                "Unknown scoring '{}'. Valid options are: mse, rmse, mae, r2, accuracy",
                s
            )),
        }
    }
}
