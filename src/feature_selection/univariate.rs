//! Univariate feature selection methods following scikit-learn's API.
//!
//! See: https://scikit-learn.org/stable/modules/feature_selection.html#univariate-feature-selection

use std::collections::BTreeMap;

use ndarray::{Array1, Array2};
use statrs::distribution::{ContinuousCDF, FisherSnedecor};

use crate::data::Dataset;

/// Compute Pearson's r for each feature and the target.
///
/// Pearson's r is also known as the Pearson correlation coefficient.
/// This function tests the individual effect of each regressor on the
/// target variable; it is the scoring function behind `f_regression`.
///
/// # Parameters
///
/// * `x` - A 2D array of shape (n_samples, n_features) representing the
///   data matrix (features).
/// * `y` - A 1D array of shape (n_samples,) representing the target vector.
/// * `center` - Whether to center both `x` and `y` by their means.
/// * `force_finite` - Whether to replace non-finite coefficients with 0.0
///   (constant features or a constant target produce NaNs otherwise).
///
/// # Returns
///
/// An array of shape (n_features,) containing the correlation coefficient
/// for each feature.
pub fn r_regression(
    x: &Array2<f64>,
    y: &Array1<f64>,
    center: bool,
    force_finite: bool,
) -> Array1<f64> {
    let n_samples = x.nrows() as f64;
    let n_features = x.ncols();

    let y_mean = if center { y.sum() / n_samples } else { 0.0 };
    let y_centered = y.mapv(|v| v - y_mean);
    let y_norm = y_centered.dot(&y_centered).sqrt();

    let mut correlation_coefficient = Array1::zeros(n_features);
    for (i, col) in x.columns().into_iter().enumerate() {
        let col_mean = if center { col.sum() / n_samples } else { 0.0 };
        let centered_col = col.mapv(|v| v - col_mean);
        let col_norm = centered_col.dot(&centered_col).sqrt();

        correlation_coefficient[i] = centered_col.dot(&y_centered) / (col_norm * y_norm);
    }

    if force_finite {
        for val in correlation_coefficient.iter_mut() {
            if !val.is_finite() {
                *val = 0.0;
            }
        }
    }

    correlation_coefficient
}

/// Univariate linear regression tests returning F-statistics and p-values.
///
/// This is a quick linear model test for assessing the effect of a single
/// regressor on the target, sequentially for many regressors.
///
/// # Returns
///
/// A tuple containing:
/// - An array of shape (n_features,) with F-statistics for each feature.
/// - An array of shape (n_features,) with p-values for each F-statistic.
pub fn f_regression(
    x: &Array2<f64>,
    y: &Array1<f64>,
    center: bool,
    force_finite: bool,
) -> (Array1<f64>, Array1<f64>) {
    let correlation_coefficient = r_regression(x, y, center, force_finite);
    let deg_of_freedom = y.len() as f64 - if center { 2.0 } else { 1.0 };

    let corr_coef_squared = correlation_coefficient.mapv(|v| v.powi(2));

    let mut f_statistic = &corr_coef_squared / (1.0 - &corr_coef_squared) * deg_of_freedom;
    let mut p_values = Array1::zeros(f_statistic.len());

    let f_dist = FisherSnedecor::new(1.0, deg_of_freedom).unwrap();
    for (i, &f) in f_statistic.iter().enumerate() {
        p_values[i] = if f.is_finite() {
            1.0 - f_dist.cdf(f)
        } else {
            f64::NAN
        };
    }

    if force_finite {
        for i in 0..f_statistic.len() {
            if f_statistic[i].is_infinite() {
                f_statistic[i] = f64::MAX;
                p_values[i] = 0.0;
            } else if f_statistic[i].is_nan() {
                f_statistic[i] = 0.0;
                p_values[i] = 1.0;
            }
        }
    }

    (f_statistic, p_values)
}

/// One-way ANOVA F-test for classification targets.
///
/// For each feature, tests whether the per-class means differ. Class
/// membership is derived from the distinct values of `y`.
///
/// # Returns
///
/// (F-statistics, p-values), both of shape (n_features,).
pub fn f_classif(x: &Array2<f64>, y: &Array1<f64>) -> (Array1<f64>, Array1<f64>) {
    let n_samples = x.nrows();
    let n_features = x.ncols();

    let mut classes: BTreeMap<u64, Vec<usize>> = BTreeMap::new();
    for (i, &label) in y.iter().enumerate() {
        classes.entry(label.to_bits()).or_default().push(i);
    }
    let n_classes = classes.len();

    let mut f_statistic = Array1::zeros(n_features);
    let mut p_values = Array1::ones(n_features);

    if n_classes < 2 || n_samples <= n_classes {
        return (f_statistic, p_values);
    }

    let df_between = (n_classes - 1) as f64;
    let df_within = (n_samples - n_classes) as f64;
    let f_dist = FisherSnedecor::new(df_between, df_within).unwrap();

    for (feat, col) in x.columns().into_iter().enumerate() {
        let grand_mean = col.sum() / n_samples as f64;

        let mut ss_between = 0.0;
        let mut ss_within = 0.0;
        for members in classes.values() {
            let group_mean =
                members.iter().map(|&i| col[i]).sum::<f64>() / members.len() as f64;
            ss_between += members.len() as f64 * (group_mean - grand_mean).powi(2);
            ss_within += members
                .iter()
                .map(|&i| (col[i] - group_mean).powi(2))
                .sum::<f64>();
        }

        if ss_within <= 0.0 {
            // Perfectly separated (or constant) feature.
            f_statistic[feat] = if ss_between > 0.0 { f64::MAX } else { 0.0 };
            p_values[feat] = if ss_between > 0.0 { 0.0 } else { 1.0 };
            continue;
        }

        let f = (ss_between / df_between) / (ss_within / df_within);
        f_statistic[feat] = f;
        p_values[feat] = 1.0 - f_dist.cdf(f);
    }

    (f_statistic, p_values)
}

/// Scoring functions usable by `SelectKBest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreFunction {
    /// Univariate linear regression F-test (regression targets).
    FRegression,
    /// One-way ANOVA F-test (classification targets).
    FClassif,
}

/// Select the k best features by univariate F-score.
///
/// This mirrors scikit-learn's SelectKBest with `f_regression` or
/// `f_classif` as the scoring function.
#[derive(Debug, Clone)]
pub struct SelectKBest {
    pub k: usize,
    pub score_function: ScoreFunction,
}

impl SelectKBest {
    /// Creates a new selector keeping the top `k` features under the
    /// regression F-test.
    pub fn new(k: usize) -> Self {
        SelectKBest {
            k,
            score_function: ScoreFunction::FRegression,
        }
    }

    pub fn with_score_function(mut self, score_function: ScoreFunction) -> Self {
        self.score_function = score_function;
        self
    }

    /// Fit the selector and return the indices of the k best features,
    /// in ascending column order.
    pub fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Vec<usize> {
        let (f_scores, _) = match self.score_function {
            ScoreFunction::FRegression => f_regression(x, y, true, true),
            ScoreFunction::FClassif => f_classif(x, y),
        };

        let mut indices: Vec<usize> = (0..f_scores.len()).collect();
        indices.sort_by(|&i, &j| {
            f_scores[j]
                .partial_cmp(&f_scores[i])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let k = self.k.min(indices.len());
        let mut selected: Vec<usize> = indices.into_iter().take(k).collect();
        selected.sort_unstable();
        selected
    }

    /// Fit on a dataset and return the reduced dataset plus the kept
    /// feature indices.
    pub fn fit_transform(&self, dataset: &Dataset) -> (Dataset, Vec<usize>) {
        let selected = self.fit(&dataset.x, &dataset.y);
        (dataset.select_features(&selected), selected)
    }
}
