use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Baseline strategies for the dummy regressor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DummyStrategy {
    Mean,
    Median,
}

/// Baseline strategies for the dummy classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierStrategy {
    /// Always predict the most frequent training label.
    MostFrequent,
    /// Predict the empirical probability of the positive class.
    Prior,
}

/// Supported estimators and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum EstimatorConfig {
    DummyRegressor {
        strategy: DummyStrategy,
    },
    DummyClassifier {
        strategy: ClassifierStrategy,
    },
    Ridge {
        alpha: f64,
        degree: usize,
    },
    GradientBoosting {
        max_depth: u32,
        num_boost_round: u32,
        learning_rate: f32,
        loss_type: String,
    },
    #[cfg(feature = "svm")]
    Svm {
        eps: f64,
        c: (f64, f64),
        kernel: String,
        gaussian_kernel_eps: f64,
        polynomial_kernel_constant: f64,
        polynomial_kernel_degree: f64,
    },
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        EstimatorConfig::Ridge {
            alpha: 1.0,
            degree: 1,
        }
    }
}

impl EstimatorConfig {
    /// Ridge with a given regularization strength and polynomial degree.
    pub fn ridge(alpha: f64, degree: usize) -> Self {
        EstimatorConfig::Ridge { alpha, degree }
    }

    /// The mean-predicting baseline.
    pub fn dummy_mean() -> Self {
        EstimatorConfig::DummyRegressor {
            strategy: DummyStrategy::Mean,
        }
    }

    /// The most-frequent-label baseline.
    pub fn dummy_most_frequent() -> Self {
        EstimatorConfig::DummyClassifier {
            strategy: ClassifierStrategy::MostFrequent,
        }
    }
}

impl fmt::Display for EstimatorConfig {
    /// Short label used by grid-search tables and plot axes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimatorConfig::DummyRegressor { strategy } => {
                write!(f, "dummy({:?})", strategy)
            }
            EstimatorConfig::DummyClassifier { strategy } => {
                write!(f, "dummy({:?})", strategy)
            }
            EstimatorConfig::Ridge { alpha, degree } => {
                write!(f, "ridge(alpha={}, degree={})", alpha, degree)
            }
            EstimatorConfig::GradientBoosting {
                max_depth,
                num_boost_round,
                ..
            } => write!(f, "gbdt(depth={}, rounds={})", max_depth, num_boost_round),
            #[cfg(feature = "svm")]
            EstimatorConfig::Svm { kernel, .. } => write!(f, "svm({})", kernel),
        }
    }
}

impl FromStr for EstimatorConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ridge" => Ok(EstimatorConfig::Ridge {
                alpha: 1.0,
                degree: 1,
            }),
            "linear" => Ok(EstimatorConfig::Ridge {
                alpha: 0.0,
                degree: 1,
            }),
            "dummy_mean" => Ok(EstimatorConfig::DummyRegressor {
                strategy: DummyStrategy::Mean,
            }),
            "dummy_median" => Ok(EstimatorConfig::DummyRegressor {
                strategy: DummyStrategy::Median,
            }),
            "dummy_most_frequent" => Ok(EstimatorConfig::DummyClassifier {
                strategy: ClassifierStrategy::MostFrequent,
            }),
            "dummy_prior" => Ok(EstimatorConfig::DummyClassifier {
                strategy: ClassifierStrategy::Prior,
            }),
            "gbdt" => Ok(EstimatorConfig::GradientBoosting {
                max_depth: 6,
                num_boost_round: 50,
                learning_rate: 0.1,
                loss_type: "SquaredError".to_string(),
            }),
            #[cfg(feature = "svm")]
            "svm" => Ok(EstimatorConfig::Svm {
                eps: 0.1,
                c: (1.0, 1.0),
                kernel: "linear".to_string(),
                gaussian_kernel_eps: 0.1,
                polynomial_kernel_constant: 1.0,
                polynomial_kernel_degree: 3.0,
            }),
            _ => Err(format!(
                "Unknown estimator type: {}. To use svm, please compile with `--features svm`",
                s
            )),
        }
    }
}
