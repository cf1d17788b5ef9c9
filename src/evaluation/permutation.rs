//! Permutation testing: is a score better than chance?
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::data::Dataset;
use crate::error::EvalError;
use crate::evaluation::cross_validate::{cross_validate, CvOptions};
use crate::models::estimator::Estimator;
use crate::scoring::Scoring;
use crate::splits::KFold;

/// Outcome of a permutation test.
#[derive(Debug, Clone)]
pub struct PermutationTest {
    /// Mean cross-validated score on the true labels.
    pub score: f64,
    /// Mean cross-validated score on each permuted copy of the labels.
    pub permutation_scores: Vec<f64>,
    /// `(1 + #permutations at least as good) / (n_permutations + 1)`.
    pub p_value: f64,
    pub scoring: Scoring,
}

/// Estimate how likely the estimator's cross-validated score is under the
/// null hypothesis that features and target are independent.
///
/// The target vector is shuffled `n_permutations` times; each shuffle is
/// evaluated with exactly the same fold layout as the true labels.
/// Permutations are scored on the rayon thread pool, with one RNG per
/// permutation derived from the base seed so the run is reproducible.
pub fn permutation_test_score(
    estimator: &dyn Estimator,
    dataset: &Dataset,
    kfold: &KFold,
    scoring: Scoring,
    n_permutations: usize,
    seed: Option<u64>,
) -> Result<PermutationTest, EvalError> {
    if n_permutations == 0 {
        return Err(EvalError::InvalidParam(
            "n_permutations must be at least 1".to_string(),
        ));
    }

    let splits = kfold.split(dataset.n_samples())?;
    let options = CvOptions::default();

    let true_result = cross_validate(estimator, dataset, &splits, scoring, &options)?;
    let score = true_result.mean_test();

    let base_seed = seed.unwrap_or_else(|| rand::thread_rng().gen());

    let permutation_scores: Result<Vec<f64>, EvalError> = (0..n_permutations)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
            let permuted = dataset.with_permuted_target(&mut rng);
            let result = cross_validate(estimator, &permuted, &splits, scoring, &options)?;
            Ok(result.mean_test())
        })
        .collect();
    let permutation_scores = permutation_scores?;

    let at_least_as_good = permutation_scores
        .iter()
        .filter(|&&perm| {
            if scoring.greater_is_better() {
                perm >= score
            } else {
                perm <= score
            }
        })
        .count();
    let p_value = (1 + at_least_as_good) as f64 / (n_permutations + 1) as f64;

    log::info!(
        "Permutation test: true {} = {:.4}, chance level {:.4}, p = {:.4}",
        scoring,
        score,
        permutation_scores.iter().sum::<f64>() / permutation_scores.len() as f64,
        p_value
    );

    Ok(PermutationTest {
        score,
        permutation_scores,
        p_value,
        scoring,
    })
}
