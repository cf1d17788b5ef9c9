//! Plain k-fold cross-validation.
use rayon::prelude::*;

use crate::data::Dataset;
use crate::error::EvalError;
use crate::models::estimator::Estimator;
use crate::scoring::Scoring;
use crate::splits::{KFold, SplitIndices};
use crate::stats::{summarize_scores, ScoreSummary};

/// Options controlling a cross-validation run.
#[derive(Debug, Clone)]
pub struct CvOptions {
    /// Also score each fitted model on its own training fold.
    pub return_train_scores: bool,
    /// Evaluate folds on the rayon thread pool.
    pub parallel: bool,
}

impl Default for CvOptions {
    fn default() -> Self {
        CvOptions {
            return_train_scores: false,
            parallel: false,
        }
    }
}

/// Per-fold scores from a cross-validation run.
#[derive(Debug, Clone)]
pub struct CvResult {
    pub test_scores: Vec<f64>,
    pub train_scores: Option<Vec<f64>>,
    pub scoring: Scoring,
}

impl CvResult {
    pub fn mean_test(&self) -> f64 {
        self.test_scores.iter().sum::<f64>() / self.test_scores.len() as f64
    }

    pub fn std_test(&self) -> f64 {
        let mean = self.mean_test();
        let n = self.test_scores.len() as f64;
        (self
            .test_scores
            .iter()
            .map(|s| (s - mean).powi(2))
            .sum::<f64>()
            / n)
            .sqrt()
    }

    /// Student-t summary of the test scores.
    pub fn summary(&self, confidence: f64) -> Result<ScoreSummary, EvalError> {
        summarize_scores(&self.test_scores, confidence)
    }
}

/// Cross-validate an estimator over precomputed split indices.
///
/// The estimator argument is a prototype: each fold fits a fresh clone, so
/// the caller's instance is never mutated.
pub fn cross_validate(
    estimator: &dyn Estimator,
    dataset: &Dataset,
    splits: &[SplitIndices],
    scoring: Scoring,
    options: &CvOptions,
) -> Result<CvResult, EvalError> {
    if splits.is_empty() {
        return Err(EvalError::InvalidParam(
            "cross_validate requires at least one split".to_string(),
        ));
    }

    let evaluate = |(fold, (train_idx, test_idx)): (usize, &SplitIndices)| {
        log::debug!(
            "Evaluating fold {} with {} training and {} testing samples",
            fold,
            train_idx.len(),
            test_idx.len()
        );
        eval_fold(
            estimator,
            dataset,
            train_idx,
            test_idx,
            scoring,
            options.return_train_scores,
        )
    };

    let fold_results: Result<Vec<FoldScore>, EvalError> = if options.parallel {
        splits.par_iter().enumerate().map(evaluate).collect()
    } else {
        splits.iter().enumerate().map(evaluate).collect()
    };
    let fold_results = fold_results?;

    let test_scores = fold_results.iter().map(|f| f.test).collect();
    let train_scores = if options.return_train_scores {
        Some(fold_results.iter().filter_map(|f| f.train).collect())
    } else {
        None
    };

    Ok(CvResult {
        test_scores,
        train_scores,
        scoring,
    })
}

/// Convenience wrapper: k-fold cross-validation of an estimator.
pub fn cross_val_score(
    estimator: &dyn Estimator,
    dataset: &Dataset,
    kfold: &KFold,
    scoring: Scoring,
) -> Result<CvResult, EvalError> {
    let splits = kfold.split(dataset.n_samples())?;
    cross_validate(estimator, dataset, &splits, scoring, &CvOptions::default())
}

struct FoldScore {
    test: f64,
    train: Option<f64>,
}

fn eval_fold(
    estimator: &dyn Estimator,
    dataset: &Dataset,
    train_idx: &[usize],
    test_idx: &[usize],
    scoring: Scoring,
    want_train_score: bool,
) -> Result<FoldScore, EvalError> {
    if train_idx.is_empty() || test_idx.is_empty() {
        return Err(EvalError::EmptyData);
    }

    let train = dataset.select(train_idx);
    let test = dataset.select(test_idx);

    let mut model = estimator.clone_box();
    model.fit(&train.x, &train.y)?;

    let predictions = model.predict(&test.x)?;
    let test_score = scoring.score(&test.y, &predictions)?;

    let train_score = if want_train_score {
        let train_predictions = model.predict(&train.x)?;
        Some(scoring.score(&train.y, &train_predictions)?)
    } else {
        None
    };

    Ok(FoldScore {
        test: test_score,
        train: train_score,
    })
}
