//! Ridge regression with optional polynomial feature expansion.
//!
//! Fitting solves the normal equations on standardized (expanded) features
//! with an in-crate Cholesky decomposition. The `degree` hyperparameter
//! expands each input column into its first `degree` powers before fitting,
//! which is what the under/overfitting learning-curve demos sweep over.
use ndarray::{Array1, Array2};

use crate::error::EvalError;
use crate::models::estimator::Estimator;
use crate::preprocessing::{fit_scaler, transform_all, PolynomialFeatures, Scaler};

#[derive(Debug, Clone)]
pub struct Ridge {
    alpha: f64,
    expansion: PolynomialFeatures,
    fitted: Option<FittedRidge>,
}

#[derive(Debug, Clone)]
struct FittedRidge {
    scaler: Scaler,
    weights: Array1<f64>,
    intercept: f64,
}

impl Ridge {
    /// # Arguments
    ///
    /// * `alpha` - L2 penalty strength; 0 gives plain least squares
    /// * `degree` - Polynomial expansion degree (1 = linear features)
    pub fn new(alpha: f64, degree: usize) -> Self {
        Ridge {
            alpha,
            expansion: PolynomialFeatures::new(degree.max(1)),
            fitted: None,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn degree(&self) -> usize {
        self.expansion.degree
    }

    /// Fitted weights on the standardized expanded features.
    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.fitted.as_ref().map(|f| &f.weights)
    }
}

impl Estimator for Ridge {
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
        if self.alpha < 0.0 {
            return Err(EvalError::InvalidParam(format!(
                "alpha must be non-negative, got {}",
                self.alpha
            )));
        }

        let z = self.expansion.transform(x);
        let scaler = fit_scaler(&z);
        let zs = transform_all(&z, &scaler);

        let n = zs.nrows() as f64;
        let k = zs.ncols();

        let y_mean = y.sum() / n;
        let yc = y.mapv(|v| v - y_mean);

        // Normal equations on the covariance scale: (Z'Z / n + aI) w = Z'y / n.
        // The columns of `zs` are standardized, so the intercept is just the
        // target mean.
        let mut gram = zs.t().dot(&zs);
        gram.mapv_inplace(|v| v / n);
        for i in 0..k {
            gram[(i, i)] += self.alpha;
        }

        let mut rhs = zs.t().dot(&yc);
        rhs.mapv_inplace(|v| v / n);

        let weights = cholesky_solve(&gram, &rhs)?;

        self.fitted = Some(FittedRidge {
            scaler,
            weights,
            intercept: y_mean,
        });
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, EvalError> {
        let fitted = self.fitted.as_ref().ok_or(EvalError::NotFitted)?;
        let z = self.expansion.transform(x);
        let zs = transform_all(&z, &fitted.scaler);
        Ok(zs.dot(&fitted.weights) + fitted.intercept)
    }

    fn feature_importances(&self) -> Option<Array1<f64>> {
        let fitted = self.fitted.as_ref()?;
        let degree = self.expansion.degree;
        let n_input = fitted.weights.len() / degree;

        // Sum |weight| over the powers belonging to each input feature.
        let mut importances = Array1::zeros(n_input);
        for (idx, w) in fitted.weights.iter().enumerate() {
            importances[idx / degree] += w.abs();
        }
        Some(importances)
    }

    fn clone_box(&self) -> Box<dyn Estimator> {
        Box::new(Ridge::new(self.alpha, self.expansion.degree))
    }

    fn name(&self) -> &str {
        "ridge"
    }
}

/// Solve `a * x = b` for a symmetric positive-definite `a`.
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, EvalError> {
    let k = a.nrows();
    let mut lower = Array2::<f64>::zeros((k, k));

    for i in 0..k {
        for j in 0..=i {
            let mut sum = a[(i, j)];
            for m in 0..j {
                sum -= lower[(i, m)] * lower[(j, m)];
            }
            if i == j {
                if sum <= 0.0 {
                    return Err(EvalError::SingularMatrix);
                }
                lower[(i, j)] = sum.sqrt();
            } else {
                lower[(i, j)] = sum / lower[(j, j)];
            }
        }
    }

    // Forward substitution: L v = b
    let mut v = Array1::<f64>::zeros(k);
    for i in 0..k {
        let mut sum = b[i];
        for m in 0..i {
            sum -= lower[(i, m)] * v[m];
        }
        v[i] = sum / lower[(i, i)];
    }

    // Backward substitution: L' x = v
    let mut x = Array1::<f64>::zeros(k);
    for i in (0..k).rev() {
        let mut sum = v[i];
        for m in (i + 1)..k {
            sum -= lower[(m, i)] * x[m];
        }
        x[i] = sum / lower[(i, i)];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn recovers_linear_relationship() {
        // y = 2 x + 1, no noise
        let x = Array2::from_shape_vec((6, 1), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let y = x.column(0).mapv(|v| 2.0 * v + 1.0);

        let mut model = Ridge::new(1e-9, 1);
        model.fit(&x, &y).unwrap();
        let preds = model.predict(&x).unwrap();

        for (p, t) in preds.iter().zip(y.iter()) {
            assert!((p - t).abs() < 1e-4, "pred {} vs truth {}", p, t);
        }
    }

    #[test]
    fn polynomial_degree_fits_quadratic() {
        let x = Array2::from_shape_vec((8, 1), vec![-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0])
            .unwrap();
        let y = x.column(0).mapv(|v| v * v);

        let mut linear = Ridge::new(1e-9, 1);
        linear.fit(&x, &y).unwrap();
        let mut quadratic = Ridge::new(1e-9, 2);
        quadratic.fit(&x, &y).unwrap();

        let lin_err: f64 = linear
            .predict(&x)
            .unwrap()
            .iter()
            .zip(y.iter())
            .map(|(p, t)| (p - t).powi(2))
            .sum();
        let quad_err: f64 = quadratic
            .predict(&x)
            .unwrap()
            .iter()
            .zip(y.iter())
            .map(|(p, t)| (p - t).powi(2))
            .sum();

        assert!(quad_err < lin_err / 10.0, "quadratic should fit far better");
    }

    #[test]
    fn cholesky_solves_identity() {
        let a = array![[1.0, 0.0], [0.0, 1.0]];
        let b = array![3.0, -2.0];
        let x = cholesky_solve(&a, &b).unwrap();
        assert!((x[0] - 3.0).abs() < 1e-12);
        assert!((x[1] + 2.0).abs() < 1e-12);
    }
}
