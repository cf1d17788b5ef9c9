use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::error::EvalError;

/// Summary statistics for a set of per-fold scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    pub mean: f64,
    pub std: f64,
    pub sem: f64,
    pub ci_low: f64,
    pub ci_high: f64,
}

/// Summarize a score vector with a Student-t confidence interval.
///
/// The interval is `mean +/- t * sem` with `t` the two-sided quantile of a
/// Student-t distribution with `n - 1` degrees of freedom.
///
/// # Arguments
///
/// * `scores` - Per-fold (or per-repetition) scores
/// * `confidence` - Interval coverage, e.g. 0.95
pub fn summarize_scores(scores: &[f64], confidence: f64) -> Result<ScoreSummary, EvalError> {
    if scores.len() < 2 {
        return Err(EvalError::InvalidParam(format!(
            "summary requires at least 2 scores, got {}",
            scores.len()
        )));
    }
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(EvalError::InvalidParam(format!(
            "confidence must be in (0, 1), got {}",
            confidence
        )));
    }

    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    // Sample standard deviation (n - 1 denominator).
    let var = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std = var.sqrt();
    let sem = std / n.sqrt();

    let dist = StudentsT::new(0.0, 1.0, n - 1.0)
        .map_err(|e| EvalError::InvalidParam(e.to_string()))?;
    let t = dist.inverse_cdf(0.5 + confidence / 2.0);

    Ok(ScoreSummary {
        mean,
        std,
        sem,
        ci_low: mean - t * sem,
        ci_high: mean + t * sem,
    })
}

/// Result of a paired two-sided t-test.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedTTest {
    pub statistic: f64,
    pub p_value: f64,
    pub mean_diff: f64,
}

/// Paired two-sided t-test between two score vectors.
///
/// The canonical use here is comparing a model's per-fold scores against a
/// baseline's scores on the same folds: pairing by fold removes the
/// between-fold variance from the comparison.
pub fn paired_ttest(a: &[f64], b: &[f64]) -> Result<PairedTTest, EvalError> {
    if a.len() != b.len() {
        return Err(EvalError::LengthMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }
    if a.len() < 2 {
        return Err(EvalError::InvalidParam(format!(
            "paired t-test requires at least 2 pairs, got {}",
            a.len()
        )));
    }

    let n = a.len() as f64;
    let diffs: Vec<f64> = a.iter().zip(b.iter()).map(|(x, y)| x - y).collect();
    let mean_diff = diffs.iter().sum::<f64>() / n;
    let var = diffs.iter().map(|d| (d - mean_diff).powi(2)).sum::<f64>() / (n - 1.0);

    if var == 0.0 {
        return Err(EvalError::InvalidParam(
            "paired t-test is undefined when all score differences are identical".to_string(),
        ));
    }

    let statistic = mean_diff / (var / n).sqrt();

    let dist = StudentsT::new(0.0, 1.0, n - 1.0)
        .map_err(|e| EvalError::InvalidParam(e.to_string()))?;
    let p_value = 2.0 * (1.0 - dist.cdf(statistic.abs()));

    Ok(PairedTTest {
        statistic,
        p_value,
        mean_diff,
    })
}
