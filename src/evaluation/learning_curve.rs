//! Learning curves: score as a function of training-set size.
use crate::data::Dataset;
use crate::error::EvalError;
use crate::models::estimator::Estimator;
use crate::scoring::Scoring;
use crate::splits::KFold;

/// Scores collected over a sweep of training-set sizes.
///
/// `train_scores[s][f]` and `test_scores[s][f]` hold the score for size
/// index `s` on fold `f`.
#[derive(Debug, Clone)]
pub struct LearningCurve {
    pub train_sizes: Vec<usize>,
    pub train_scores: Vec<Vec<f64>>,
    pub test_scores: Vec<Vec<f64>>,
    pub scoring: Scoring,
}

impl LearningCurve {
    pub fn mean_train(&self) -> Vec<f64> {
        self.train_scores.iter().map(|row| mean(row)).collect()
    }

    pub fn mean_test(&self) -> Vec<f64> {
        self.test_scores.iter().map(|row| mean(row)).collect()
    }

    pub fn std_train(&self) -> Vec<f64> {
        self.train_scores.iter().map(|row| std(row)).collect()
    }

    pub fn std_test(&self) -> Vec<f64> {
        self.test_scores.iter().map(|row| std(row)).collect()
    }
}

/// Compute a learning curve.
///
/// For every fold and every fraction, the estimator is fitted on the first
/// `fraction * train_len` indices of the fold's training half and scored on
/// both that subset and the untouched test half. Use a shuffled `KFold`
/// when the dataset rows are ordered, otherwise the size-`k` prefixes are
/// not representative subsamples.
///
/// # Arguments
///
/// * `estimator` - Prototype estimator; a fresh clone is fitted per cell
/// * `dataset` - The full dataset
/// * `kfold` - Fold layout shared by all training-set sizes
/// * `train_fractions` - Fractions of each training fold to use, in (0, 1]
/// * `scoring` - Metric for both train and test scores
pub fn learning_curve(
    estimator: &dyn Estimator,
    dataset: &Dataset,
    kfold: &KFold,
    train_fractions: &[f64],
    scoring: Scoring,
) -> Result<LearningCurve, EvalError> {
    if train_fractions.is_empty() {
        return Err(EvalError::InvalidParam(
            "learning_curve requires at least one train fraction".to_string(),
        ));
    }
    for &fraction in train_fractions {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(EvalError::InvalidParam(format!(
                "train fractions must be in (0, 1], got {}",
                fraction
            )));
        }
    }

    let splits = kfold.split(dataset.n_samples())?;
    let min_train_len = splits
        .iter()
        .map(|(train, _)| train.len())
        .min()
        .unwrap_or(0);
    if min_train_len < 2 {
        return Err(EvalError::EmptyData);
    }

    // Resolve fractions against the smallest training fold so every fold
    // contributes a score at every size.
    let train_sizes: Vec<usize> = train_fractions
        .iter()
        .map(|&f| ((min_train_len as f64) * f).round() as usize)
        .map(|k| k.clamp(2, min_train_len))
        .collect();

    let mut train_scores = vec![Vec::with_capacity(splits.len()); train_sizes.len()];
    let mut test_scores = vec![Vec::with_capacity(splits.len()); train_sizes.len()];

    for (fold, (train_idx, test_idx)) in splits.iter().enumerate() {
        let test = dataset.select(test_idx);

        for (size_idx, &size) in train_sizes.iter().enumerate() {
            let subset = dataset.select(&train_idx[..size]);

            let mut model = estimator.clone_box();
            model.fit(&subset.x, &subset.y)?;

            let train_pred = model.predict(&subset.x)?;
            let test_pred = model.predict(&test.x)?;

            train_scores[size_idx].push(scoring.score(&subset.y, &train_pred)?);
            test_scores[size_idx].push(scoring.score(&test.y, &test_pred)?);
        }

        log::debug!(
            "Learning curve fold {} done ({} sizes)",
            fold,
            train_sizes.len()
        );
    }

    Ok(LearningCurve {
        train_sizes,
        train_scores,
        test_scores,
        scoring,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn std(values: &[f64]) -> f64 {
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}
