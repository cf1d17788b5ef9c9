//! Small preprocessing utilities shared by estimators and demos.
//!
//! Provides a simple Scaler for mean/std standardization and a polynomial
//! feature expansion. Transformers are fitted on training folds only and
//! applied to held-out folds, so their state is a plain struct the caller
//! owns.

use ndarray::{Array1, Array2};

/// Simple standard scaler (per-column mean/std).
#[derive(Clone, Debug)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

impl Scaler {
    /// Minimum stddev to avoid division by zero when transforming.
    const MIN_STD: f64 = 1e-9;
}

/// Fit a `Scaler` from an `Array2<f64>` where rows are samples and
/// columns are features.
pub fn fit_scaler(x: &Array2<f64>) -> Scaler {
    let (nrows, ncols) = x.dim();
    assert!(nrows > 0 && ncols > 0, "fit_scaler requires non-empty matrix");

    let mut mean = vec![0.0f64; ncols];
    for r in 0..nrows {
        for c in 0..ncols {
            mean[c] += x[(r, c)];
        }
    }
    let nrows_f = nrows as f64;
    for v in mean.iter_mut() {
        *v /= nrows_f;
    }

    let mut var = vec![0.0f64; ncols];
    for r in 0..nrows {
        for c in 0..ncols {
            let d = x[(r, c)] - mean[c];
            var[c] += d * d;
        }
    }
    for v in var.iter_mut() {
        *v = (*v / nrows_f).sqrt().max(Scaler::MIN_STD);
    }

    Scaler { mean, std: var }
}

/// Transform all rows using the provided `Scaler` and return a new matrix.
pub fn transform_all(x: &Array2<f64>, sc: &Scaler) -> Array2<f64> {
    let (nrows, ncols) = x.dim();
    let mut out = Vec::with_capacity(nrows * ncols);

    for r in 0..nrows {
        for c in 0..ncols {
            out.push((x[(r, c)] - sc.mean[c]) / sc.std[c]);
        }
    }

    Array2::from_shape_vec((nrows, ncols), out).expect("transform_all: shape mismatch")
}

/// Fit scaler and return transformed matrix in one call.
pub fn fit_transform(x: &Array2<f64>) -> Array2<f64> {
    let sc = fit_scaler(x);
    transform_all(x, &sc)
}

/// Per-feature polynomial expansion.
///
/// Each input column `x` is expanded into `x, x^2, ..., x^degree` (no cross
/// terms), optionally preceded by a single bias column of ones. This is the
/// expansion the ridge estimator uses for its `degree` hyperparameter.
#[derive(Clone, Debug)]
pub struct PolynomialFeatures {
    pub degree: usize,
    pub include_bias: bool,
}

impl PolynomialFeatures {
    pub fn new(degree: usize) -> Self {
        assert!(degree >= 1, "degree must be at least 1");
        PolynomialFeatures {
            degree,
            include_bias: false,
        }
    }

    pub fn with_bias(mut self) -> Self {
        self.include_bias = true;
        self
    }

    /// Number of output columns for `n_features` input columns.
    pub fn n_output_features(&self, n_features: usize) -> usize {
        n_features * self.degree + usize::from(self.include_bias)
    }

    /// Expand a feature matrix.
    pub fn transform(&self, x: &Array2<f64>) -> Array2<f64> {
        let (nrows, ncols) = x.dim();
        let out_cols = self.n_output_features(ncols);
        let mut out = Vec::with_capacity(nrows * out_cols);

        for r in 0..nrows {
            if self.include_bias {
                out.push(1.0);
            }
            for c in 0..ncols {
                let base = x[(r, c)];
                let mut power = base;
                for _ in 0..self.degree {
                    out.push(power);
                    power *= base;
                }
            }
        }

        Array2::from_shape_vec((nrows, out_cols), out)
            .expect("PolynomialFeatures::transform: shape mismatch")
    }

    /// Expand a single row (used at prediction time).
    pub fn transform_row(&self, row: &Array1<f64>) -> Array1<f64> {
        let mut out = Vec::with_capacity(self.n_output_features(row.len()));
        if self.include_bias {
            out.push(1.0);
        }
        for &base in row.iter() {
            let mut power = base;
            for _ in 0..self.degree {
                out.push(power);
                power *= base;
            }
        }
        Array1::from_vec(out)
    }
}
