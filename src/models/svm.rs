use linfa::dataset::Pr;
use linfa::traits::{Fit, Predict};
use linfa::Dataset as LinfaDataset;
use linfa_svm::{Svm, SvmParams};
use ndarray::{Array1, Array2};

use crate::config::EstimatorConfig;
use crate::error::EvalError;
use crate::models::estimator::Estimator;

/// Binary SVM classifier wrapping `linfa-svm`.
///
/// Labels are 0.0/1.0 on the crate side and converted to booleans for
/// linfa; predictions come back as positive-class probabilities.
pub struct SvmClassifier {
    model: Option<Svm<f64, Pr>>,
    config: EstimatorConfig,
}

impl SvmClassifier {
    pub fn new(config: EstimatorConfig) -> Self {
        SvmClassifier {
            model: None,
            config,
        }
    }
}

impl Estimator for SvmClassifier {
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

        let EstimatorConfig::Svm {
            eps,
            c,
            kernel,
            gaussian_kernel_eps,
            polynomial_kernel_constant,
            polynomial_kernel_degree,
        } = &self.config
        else {
            return Err(EvalError::InvalidParam(
                "SvmClassifier requires an Svm config".to_string(),
            ));
        };

        let labels: Array1<bool> = y.mapv(|v| v.round() >= 1.0);
        let dataset = LinfaDataset::new(x.to_owned(), labels);

        let (c1, c2) = *c;
        let mut params: SvmParams<f64, Pr> = Svm::<f64, Pr>::params()
            .eps(*eps)
            .pos_neg_weights(c1, c2);

        params = match kernel.as_str() {
            "linear" => params.linear_kernel(),
            "gauss" => params.gaussian_kernel(*gaussian_kernel_eps),
            "poly" => params.polynomial_kernel(
                *polynomial_kernel_constant,
                *polynomial_kernel_degree,
            ),
            other => {
                return Err(EvalError::InvalidParam(format!(
                    "Unsupported kernel type: {}. Valid options are: linear, gauss, poly",
                    other
                )))
            }
        };

        let model = params
            .fit(&dataset)
            .map_err(|e| EvalError::InvalidParam(e.to_string()))?;
        self.model = Some(model);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, EvalError> {
        let model = self.model.as_ref().ok_or(EvalError::NotFitted)?;
        let probs: Array1<Pr> = model.predict(x);
        Ok(probs.mapv(|p| *p as f64))
    }

    fn clone_box(&self) -> Box<dyn Estimator> {
        Box::new(SvmClassifier::new(self.config.clone()))
    }

    fn name(&self) -> &str {
        "svm"
    }
}
