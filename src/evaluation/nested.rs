//! Nested cross-validation.
//!
//! The outer loop estimates generalization performance; the inner loop
//! (a grid search per outer fold) selects hyperparameters. Every outer test
//! fold is untouched by its fold's model selection, so the outer scores are
//! unbiased by the search.
use crate::config::EstimatorConfig;
use crate::data::Dataset;
use crate::error::EvalError;
use crate::evaluation::grid_search::GridSearch;
use crate::scoring::Scoring;
use crate::splits::KFold;

/// Outcome of a nested cross-validation run.
#[derive(Debug, Clone)]
pub struct NestedCvResult {
    /// One unbiased score per outer fold.
    pub outer_scores: Vec<f64>,
    /// The configuration the inner search chose on each outer fold.
    pub chosen_configs: Vec<EstimatorConfig>,
    pub scoring: Scoring,
}

impl NestedCvResult {
    pub fn mean_score(&self) -> f64 {
        self.outer_scores.iter().sum::<f64>() / self.outer_scores.len() as f64
    }
}

/// Run nested cross-validation over a candidate list.
pub fn nested_cross_validate(
    candidates: &[EstimatorConfig],
    dataset: &Dataset,
    outer: &KFold,
    inner: &KFold,
    scoring: Scoring,
) -> Result<NestedCvResult, EvalError> {
    if candidates.is_empty() {
        return Err(EvalError::InvalidParam(
            "nested cross-validation requires at least one candidate".to_string(),
        ));
    }

    let outer_splits = outer.split(dataset.n_samples())?;
    let mut outer_scores = Vec::with_capacity(outer_splits.len());
    let mut chosen_configs = Vec::with_capacity(outer_splits.len());

    for (fold, (train_idx, test_idx)) in outer_splits.iter().enumerate() {
        log::info!(
            "Nested CV outer fold {} ({} train / {} test samples)",
            fold,
            train_idx.len(),
            test_idx.len()
        );

        let outer_train = dataset.select(train_idx);
        let outer_test = dataset.select(test_idx);

        let search = GridSearch::new(candidates.to_vec(), inner.clone(), scoring);
        let result = search.fit(&outer_train)?;

        let predictions = result.best_estimator.predict(&outer_test.x)?;
        let score = scoring.score(&outer_test.y, &predictions)?;

        log::debug!(
            "Outer fold {} chose {} with test {} = {:.4}",
            fold,
            result.best_config,
            scoring,
            score
        );

        outer_scores.push(score);
        chosen_configs.push(result.best_config);
    }

    Ok(NestedCvResult {
        outer_scores,
        chosen_configs,
        scoring,
    })
}
