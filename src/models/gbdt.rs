use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use ndarray::{Array1, Array2};

use crate::config::EstimatorConfig;
use crate::error::EvalError;
use crate::models::estimator::Estimator;

/// Gradient Boosting Decision Tree estimator wrapping the `gbdt` crate.
///
/// With the `SquaredError` loss this is a regressor; with `LogLikelyhood`
/// (the crate's spelling) it is a binary classifier trained on +/-1 labels.
/// The wrapped crate applies the logistic link itself, so classification
/// predictions come back as probabilities in [0, 1].
pub struct GradientBoosting {
    model: Option<GBDT>,
    config: EstimatorConfig,
}

impl GradientBoosting {
    pub fn new(config: EstimatorConfig) -> Self {
        GradientBoosting {
            model: None,
            config,
        }
    }
}

impl Estimator for GradientBoosting {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), EvalError> {
        if x.nrows() != y.len() {
            return Err(EvalError::LengthMismatch {
                expected: x.nrows(),
                got: y.len(),
            });
        }
        if x.nrows() == 0 {
            return Err(EvalError::EmptyData);
        }

        let EstimatorConfig::GradientBoosting {
            max_depth,
            num_boost_round,
            learning_rate,
            loss_type,
        } = &self.config
        else {
            return Err(EvalError::InvalidParam(
                "GradientBoosting requires a GradientBoosting config".to_string(),
            ));
        };

        let mut config = Config::new();
        config.set_feature_size(x.ncols());
        config.set_shrinkage(*learning_rate);
        config.set_max_depth(*max_depth);
        config.set_iterations(*num_boost_round as usize);
        config.set_loss(loss_type);

        let classification = loss_type == "LogLikelyhood";

        let mut gbdt = GBDT::new(&config);

        let mut train_dv = DataVec::new();
        for (i, row) in x.rows().into_iter().enumerate() {
            let features: Vec<f32> = row.iter().map(|&v| v as f32).collect();
            // The LogLikelyhood loss expects +/-1 labels.
            let label = if classification {
                if y[i].round() >= 1.0 {
                    1.0
                } else {
                    -1.0
                }
            } else {
                y[i] as f32
            };
            train_dv.push(Data::new_training_data(features, 1.0, label, None));
        }

        gbdt.fit(&mut train_dv);
        self.model = Some(gbdt);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, EvalError> {
        let model = self.model.as_ref().ok_or(EvalError::NotFitted)?;

        let mut test_dv = DataVec::new();
        for row in x.rows() {
            let features: Vec<f32> = row.iter().map(|&v| v as f32).collect();
            test_dv.push(Data::new_test_data(features, None));
        }

        let raw = model.predict(&test_dv);
        Ok(raw.into_iter().map(|v| v as f64).collect())
    }

    fn clone_box(&self) -> Box<dyn Estimator> {
        Box::new(GradientBoosting::new(self.config.clone()))
    }

    fn name(&self) -> &str {
        "gradient_boosting"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_and_predicts_regression() {
        // Target tracks the first feature; second feature is constant noise.
        let x = Array2::from_shape_vec(
            (10, 2),
            vec![
                0.1, 5.0, 0.4, 5.0, 0.6, 5.0, 0.9, 5.0, 1.2, 5.0, 1.5, 5.0, 1.8, 5.0, 2.1, 5.0,
                2.4, 5.0, 2.7, 5.0,
            ],
        )
        .unwrap();
        let y: Array1<f64> = x.column(0).mapv(|v| 3.0 * v);

        let config = EstimatorConfig::GradientBoosting {
            max_depth: 3,
            num_boost_round: 10,
            learning_rate: 0.3,
            loss_type: "SquaredError".to_string(),
        };
        let mut model = GradientBoosting::new(config);
        model.fit(&x, &y).unwrap();

        let preds = model.predict(&x).unwrap();
        assert_eq!(preds.len(), x.nrows());
        assert!(preds.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn classification_outputs_probabilities() {
        let x = Array2::from_shape_vec(
            (8, 1),
            vec![-2.0, -1.5, -1.2, -1.0, 1.0, 1.2, 1.5, 2.0],
        )
        .unwrap();
        let y = Array1::from_vec(vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);

        let config = EstimatorConfig::GradientBoosting {
            max_depth: 2,
            num_boost_round: 10,
            learning_rate: 0.3,
            loss_type: "LogLikelyhood".to_string(),
        };
        let mut model = GradientBoosting::new(config);
        model.fit(&x, &y).unwrap();

        let preds = model.predict(&x).unwrap();
        assert_eq!(preds.len(), x.nrows());
        assert!(preds.iter().all(|p| p.is_finite()));
    }
}
