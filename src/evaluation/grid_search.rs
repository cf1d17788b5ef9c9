//! Hyperparameter search over an explicit candidate list.
use rayon::prelude::*;

use crate::config::EstimatorConfig;
use crate::data::Dataset;
use crate::error::EvalError;
use crate::evaluation::cross_validate::{cross_validate, CvOptions};
use crate::models::estimator::Estimator;
use crate::models::factory::build_estimator;
use crate::scoring::Scoring;
use crate::splits::KFold;

/// Exhaustive search over a list of candidate configurations.
///
/// Candidates are explicit `EstimatorConfig` values rather than a parameter
/// grid: the type system already enumerates each estimator's
/// hyperparameters, so the caller builds the product it cares about.
#[derive(Debug, Clone)]
pub struct GridSearch {
    pub candidates: Vec<EstimatorConfig>,
    pub splitter: KFold,
    pub scoring: Scoring,
    pub parallel: bool,
}

impl GridSearch {
    pub fn new(candidates: Vec<EstimatorConfig>, splitter: KFold, scoring: Scoring) -> Self {
        GridSearch {
            candidates,
            splitter,
            scoring,
            parallel: false,
        }
    }

    pub fn with_parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    /// Cross-validate every candidate, pick the best mean score, and refit
    /// the winner on the full dataset.
    pub fn fit(&self, dataset: &Dataset) -> Result<GridSearchResult, EvalError> {
        if self.candidates.is_empty() {
            return Err(EvalError::InvalidParam(
                "grid search requires at least one candidate".to_string(),
            ));
        }

        let splits = self.splitter.split(dataset.n_samples())?;
        let options = CvOptions::default();

        let evaluate = |config: &EstimatorConfig| -> Result<Vec<f64>, EvalError> {
            let estimator = build_estimator(config);
            let result = cross_validate(estimator.as_ref(), dataset, &splits, self.scoring, &options)?;
            log::info!(
                "Candidate {}: mean {} = {:.4} (+/- {:.4})",
                config,
                self.scoring,
                result.mean_test(),
                result.std_test()
            );
            Ok(result.test_scores)
        };

        let fold_scores: Result<Vec<Vec<f64>>, EvalError> = if self.parallel {
            self.candidates.par_iter().map(evaluate).collect()
        } else {
            self.candidates.iter().map(evaluate).collect()
        };
        let fold_scores = fold_scores?;

        let mean_scores: Vec<f64> = fold_scores
            .iter()
            .map(|scores| scores.iter().sum::<f64>() / scores.len() as f64)
            .collect();
        let std_scores: Vec<f64> = fold_scores
            .iter()
            .zip(mean_scores.iter())
            .map(|(scores, &m)| {
                (scores.iter().map(|s| (s - m).powi(2)).sum::<f64>() / scores.len() as f64).sqrt()
            })
            .collect();

        let mut best_index = 0;
        for (i, &score) in mean_scores.iter().enumerate().skip(1) {
            if self.scoring.is_improvement(score, mean_scores[best_index]) {
                best_index = i;
            }
        }

        let best_config = self.candidates[best_index].clone();
        log::info!("Best candidate: {}", best_config);

        let mut best_estimator = build_estimator(&best_config);
        best_estimator.fit(&dataset.x, &dataset.y)?;

        Ok(GridSearchResult {
            candidates: self.candidates.clone(),
            fold_scores,
            mean_scores,
            std_scores,
            best_index,
            best_config,
            best_estimator,
        })
    }
}

/// Outcome of a grid search.
pub struct GridSearchResult {
    pub candidates: Vec<EstimatorConfig>,
    /// Per-candidate, per-fold test scores.
    pub fold_scores: Vec<Vec<f64>>,
    pub mean_scores: Vec<f64>,
    pub std_scores: Vec<f64>,
    pub best_index: usize,
    pub best_config: EstimatorConfig,
    /// The best candidate refitted on the full dataset.
    pub best_estimator: Box<dyn Estimator>,
}

impl GridSearchResult {
    /// Candidate labels for tables and validation-curve axes.
    pub fn candidate_labels(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.to_string()).collect()
    }
}
