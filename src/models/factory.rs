use crate::config::EstimatorConfig;
use crate::models::dummy::{DummyClassifier, DummyRegressor};
use crate::models::estimator::Estimator;
use crate::models::gbdt::GradientBoosting;
use crate::models::linear::Ridge;

/// Build a boxed estimator from an `EstimatorConfig`.
/// Currently this is a thin factory implemented as a single function.
pub fn build_estimator(config: &EstimatorConfig) -> Box<dyn Estimator> {
    match config {
        EstimatorConfig::DummyRegressor { strategy } => {
            Box::new(DummyRegressor::new(*strategy))
        }
        EstimatorConfig::DummyClassifier { strategy } => {
            Box::new(DummyClassifier::new(*strategy))
        }
        EstimatorConfig::Ridge { alpha, degree } => Box::new(Ridge::new(*alpha, *degree)),
        EstimatorConfig::GradientBoosting { .. } => {
            Box::new(GradientBoosting::new(config.clone()))
        }
        #[cfg(feature = "svm")]
        EstimatorConfig::Svm { .. } => {
            Box::new(crate::models::svm::SvmClassifier::new(config.clone()))
        } // When compiled, `EstimatorConfig` only contains the variants
          // enabled by features. The above arms are exhaustive for the
          // compiled enum, so no catch-all arm is necessary.
    }
}
