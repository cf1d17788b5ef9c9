//! Integration tests for scoring metrics, score statistics, and config types.

use ndarray::array;

use crossval::config::{DummyStrategy, EstimatorConfig};
use crossval::scoring::Scoring;
use crossval::stats::{paired_ttest, summarize_scores};

// ---------------------------------------------------------------------------
// Scoring metrics
// ---------------------------------------------------------------------------

#[test]
fn mse_of_perfect_prediction_is_zero() {
    let y = array![1.0, 2.0, 3.0];
    let score = Scoring::Mse.score(&y, &y).unwrap();
    assert!(score.abs() < 1e-12);
}

#[test]
fn rmse_is_sqrt_of_mse() {
    let y_true = array![0.0, 0.0, 0.0, 0.0];
    let y_pred = array![2.0, 2.0, 2.0, 2.0];
    let mse = Scoring::Mse.score(&y_true, &y_pred).unwrap();
    let rmse = Scoring::Rmse.score(&y_true, &y_pred).unwrap();
    assert!((mse - 4.0).abs() < 1e-12);
    assert!((rmse - 2.0).abs() < 1e-12);
}

#[test]
fn mae_averages_absolute_errors() {
    let y_true = array![1.0, -1.0];
    let y_pred = array![2.0, 1.0];
    let mae = Scoring::Mae.score(&y_true, &y_pred).unwrap();
    assert!((mae - 1.5).abs() < 1e-12);
}

#[test]
fn r2_of_mean_prediction_is_zero() {
    let y_true = array![1.0, 2.0, 3.0, 4.0];
    let y_pred = array![2.5, 2.5, 2.5, 2.5];
    let r2 = Scoring::R2.score(&y_true, &y_pred).unwrap();
    assert!(r2.abs() < 1e-12);
}

#[test]
fn r2_constant_target_reports_no_skill() {
    let y_true = array![5.0, 5.0, 5.0];
    let y_pred = array![5.0, 5.0, 5.0];
    let r2 = Scoring::R2.score(&y_true, &y_pred).unwrap();
    assert_eq!(r2, 0.0);
}

#[test]
fn accuracy_rounds_predictions() {
    let y_true = array![0.0, 1.0, 1.0, 0.0];
    let y_pred = array![0.2, 0.8, 0.4, 0.1];
    let acc = Scoring::Accuracy.score(&y_true, &y_pred).unwrap();
    assert!((acc - 0.75).abs() < 1e-12);
}

#[test]
fn score_length_mismatch_errors() {
    let y_true = array![1.0, 2.0];
    let y_pred = array![1.0];
    assert!(Scoring::Mse.score(&y_true, &y_pred).is_err());
}

#[test]
fn scoring_direction_is_correct() {
    assert!(Scoring::R2.greater_is_better());
    assert!(Scoring::Accuracy.greater_is_better());
    assert!(!Scoring::Mse.greater_is_better());
    assert!(Scoring::Mse.is_improvement(0.5, 1.0));
    assert!(Scoring::R2.is_improvement(0.9, 0.5));
}

#[test]
fn scoring_parses_from_str() {
    let s: Scoring = "rmse".parse().unwrap();
    assert_eq!(s, Scoring::Rmse);
    assert!("banana".parse::<Scoring>().is_err());
}

// ---------------------------------------------------------------------------
// Score statistics
// ---------------------------------------------------------------------------

#[test]
fn summary_brackets_the_mean() {
    let scores = [0.8, 0.82, 0.78, 0.81, 0.79];
    let summary = summarize_scores(&scores, 0.95).unwrap();
    assert!((summary.mean - 0.8).abs() < 1e-9);
    assert!(summary.ci_low < summary.mean);
    assert!(summary.ci_high > summary.mean);
    assert!(summary.std > 0.0);
}

#[test]
fn summary_requires_two_scores() {
    assert!(summarize_scores(&[0.5], 0.95).is_err());
}

#[test]
fn paired_ttest_detects_consistent_difference() {
    let model = [0.90, 0.91, 0.89, 0.92, 0.90];
    let baseline = [0.50, 0.52, 0.49, 0.51, 0.50];
    let result = paired_ttest(&model, &baseline).unwrap();
    assert!(result.mean_diff > 0.3);
    assert!(result.p_value < 0.01, "p = {}", result.p_value);
}

#[test]
fn paired_ttest_on_identical_scores_errors() {
    let a = [0.5, 0.6, 0.7];
    assert!(paired_ttest(&a, &a).is_err());
}

// ---------------------------------------------------------------------------
// Config / EstimatorConfig
// ---------------------------------------------------------------------------

#[test]
fn estimator_config_default_is_ridge() {
    let config = EstimatorConfig::default();
    match config {
        EstimatorConfig::Ridge { alpha, degree } => {
            assert!(alpha > 0.0);
            assert_eq!(degree, 1);
        }
        _ => panic!("default EstimatorConfig should be Ridge"),
    }
}

#[test]
fn estimator_config_from_str_ridge() {
    let config: EstimatorConfig = "ridge".parse().unwrap();
    match config {
        EstimatorConfig::Ridge { degree, .. } => assert_eq!(degree, 1),
        _ => panic!("expected Ridge"),
    }
}

#[test]
fn estimator_config_from_str_dummy() {
    let config: EstimatorConfig = "dummy_median".parse().unwrap();
    match config {
        EstimatorConfig::DummyRegressor { strategy } => {
            assert_eq!(strategy, DummyStrategy::Median)
        }
        _ => panic!("expected DummyRegressor"),
    }
}

#[test]
fn estimator_config_from_str_unknown_errors() {
    let result: Result<EstimatorConfig, _> = "random_forest".parse();
    assert!(result.is_err());
}

#[test]
fn estimator_config_serializes_to_json() {
    let config = EstimatorConfig::ridge(0.5, 3);
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("Ridge"));
    assert!(json.contains("alpha"));
}

#[test]
fn estimator_config_round_trips_json() {
    let config = EstimatorConfig::GradientBoosting {
        max_depth: 4,
        num_boost_round: 20,
        learning_rate: 0.05,
        loss_type: "SquaredError".to_string(),
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: EstimatorConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, back);
}

#[test]
fn estimator_config_display_labels() {
    let label = EstimatorConfig::ridge(1.0, 4).to_string();
    assert!(label.contains("ridge"));
    assert!(label.contains("degree=4"));
}
