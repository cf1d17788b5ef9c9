//! Integration tests for the evaluation engine: cross-validation, learning
//! curves, grid search, nested cross-validation, and permutation tests.

use crossval::config::EstimatorConfig;
use crossval::datasets::{make_regression, make_sine};
use crossval::evaluation::{
    cross_val_score, cross_validate, learning_curve, nested_cross_validate,
    permutation_test_score, CvOptions, GridSearch,
};
use crossval::models::factory::build_estimator;
use crossval::scoring::Scoring;
use crossval::splits::KFold;
use crossval::stats::paired_ttest;

// ---------------------------------------------------------------------------
// cross_validate / cross_val_score
// ---------------------------------------------------------------------------

#[test]
fn cross_val_score_recovers_linear_signal() {
    let dataset = make_regression(80, 5, 3, 0.5, Some(42));
    let kfold = KFold::new(4).with_shuffle(Some(42));
    let ridge = build_estimator(&EstimatorConfig::ridge(1e-3, 1));

    let result = cross_val_score(ridge.as_ref(), &dataset, &kfold, Scoring::R2).unwrap();
    assert_eq!(result.test_scores.len(), 4);
    assert!(
        result.mean_test() > 0.8,
        "strong linear signal should give high R2, got {}",
        result.mean_test()
    );
}

#[test]
fn model_beats_dummy_baseline() {
    let dataset = make_regression(100, 4, 4, 1.0, Some(7));
    let kfold = KFold::new(5).with_shuffle(Some(7));

    let ridge = build_estimator(&EstimatorConfig::ridge(1e-3, 1));
    let dummy = build_estimator(&EstimatorConfig::dummy_mean());

    let ridge_scores = cross_val_score(ridge.as_ref(), &dataset, &kfold, Scoring::Mse).unwrap();
    let dummy_scores = cross_val_score(dummy.as_ref(), &dataset, &kfold, Scoring::Mse).unwrap();

    assert!(
        ridge_scores.mean_test() < dummy_scores.mean_test(),
        "ridge MSE {} should beat dummy MSE {}",
        ridge_scores.mean_test(),
        dummy_scores.mean_test()
    );

    // Same fold layout on both sides, so a paired comparison is valid.
    let ttest = paired_ttest(&dummy_scores.test_scores, &ridge_scores.test_scores).unwrap();
    assert!(ttest.p_value < 0.05, "p = {}", ttest.p_value);
}

#[test]
fn parallel_and_sequential_agree() {
    let dataset = make_regression(60, 3, 3, 0.5, Some(3));
    let kfold = KFold::new(3).with_shuffle(Some(3));
    let splits = kfold.split(dataset.n_samples()).unwrap();
    let ridge = build_estimator(&EstimatorConfig::ridge(0.1, 1));

    let sequential = cross_validate(
        ridge.as_ref(),
        &dataset,
        &splits,
        Scoring::Mse,
        &CvOptions {
            return_train_scores: true,
            parallel: false,
        },
    )
    .unwrap();
    let parallel = cross_validate(
        ridge.as_ref(),
        &dataset,
        &splits,
        Scoring::Mse,
        &CvOptions {
            return_train_scores: true,
            parallel: true,
        },
    )
    .unwrap();

    for (s, p) in sequential.test_scores.iter().zip(parallel.test_scores.iter()) {
        assert!((s - p).abs() < 1e-12);
    }
    let train_seq = sequential.train_scores.unwrap();
    let train_par = parallel.train_scores.unwrap();
    assert_eq!(train_seq.len(), 3);
    assert_eq!(train_par.len(), 3);
}

#[test]
fn cross_validate_rejects_empty_splits() {
    let dataset = make_regression(10, 2, 2, 0.1, Some(1));
    let ridge = build_estimator(&EstimatorConfig::default());
    let result = cross_validate(
        ridge.as_ref(),
        &dataset,
        &[],
        Scoring::Mse,
        &CvOptions::default(),
    );
    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// learning_curve
// ---------------------------------------------------------------------------

#[test]
fn learning_curve_shapes_and_trend() {
    let dataset = make_regression(150, 5, 5, 1.0, Some(11));
    let kfold = KFold::new(5).with_shuffle(Some(11));
    let ridge = build_estimator(&EstimatorConfig::ridge(1e-2, 1));

    let curve = learning_curve(
        ridge.as_ref(),
        &dataset,
        &kfold,
        &[0.2, 0.5, 1.0],
        Scoring::Mse,
    )
    .unwrap();

    assert_eq!(curve.train_sizes.len(), 3);
    assert!(curve.train_sizes.windows(2).all(|w| w[0] < w[1]));
    for row in curve.train_scores.iter().chain(curve.test_scores.iter()) {
        assert_eq!(row.len(), 5);
        assert!(row.iter().all(|s| s.is_finite()));
    }

    // More training data should not make the model substantially worse.
    let mean_test = curve.mean_test();
    assert!(
        mean_test[2] <= mean_test[0] * 1.5,
        "test MSE grew with data: {:?}",
        mean_test
    );
}

#[test]
fn learning_curve_rejects_bad_fractions() {
    let dataset = make_regression(30, 2, 2, 0.1, Some(2));
    let ridge = build_estimator(&EstimatorConfig::default());
    let kfold = KFold::new(3);

    assert!(learning_curve(ridge.as_ref(), &dataset, &kfold, &[], Scoring::Mse).is_err());
    assert!(learning_curve(ridge.as_ref(), &dataset, &kfold, &[1.2], Scoring::Mse).is_err());
    assert!(learning_curve(ridge.as_ref(), &dataset, &kfold, &[0.0], Scoring::Mse).is_err());
}

// ---------------------------------------------------------------------------
// GridSearch
// ---------------------------------------------------------------------------

#[test]
fn grid_search_prefers_the_flexible_model_on_a_sinusoid() {
    let dataset = make_sine(60, 0.1, Some(5));
    let kfold = KFold::new(5).with_shuffle(Some(5));

    let candidates = vec![
        EstimatorConfig::ridge(1e-3, 1),
        EstimatorConfig::ridge(1e-3, 5),
    ];
    let search = GridSearch::new(candidates, kfold, Scoring::Mse);
    let result = search.fit(&dataset).unwrap();

    assert_eq!(result.mean_scores.len(), 2);
    assert_eq!(result.best_index, 1, "degree-5 ridge should win on a sine");
    match result.best_config {
        EstimatorConfig::Ridge { degree, .. } => assert_eq!(degree, 5),
        _ => panic!("expected a ridge winner"),
    }

    // The winner is refit on the full dataset and ready to predict.
    let preds = result.best_estimator.predict(&dataset.x).unwrap();
    assert_eq!(preds.len(), dataset.n_samples());
}

#[test]
fn grid_search_requires_candidates() {
    let dataset = make_regression(20, 2, 2, 0.1, Some(4));
    let search = GridSearch::new(vec![], KFold::new(2), Scoring::Mse);
    assert!(search.fit(&dataset).is_err());
}

// ---------------------------------------------------------------------------
// Nested cross-validation
// ---------------------------------------------------------------------------

#[test]
fn nested_cv_produces_one_score_per_outer_fold() {
    let dataset = make_sine(80, 0.15, Some(9));
    let outer = KFold::new(4).with_shuffle(Some(9));
    let inner = KFold::new(3).with_shuffle(Some(10));

    let candidates = vec![
        EstimatorConfig::ridge(1e-3, 1),
        EstimatorConfig::ridge(1e-3, 3),
        EstimatorConfig::ridge(1e-3, 5),
    ];

    let result =
        nested_cross_validate(&candidates, &dataset, &outer, &inner, Scoring::Mse).unwrap();

    assert_eq!(result.outer_scores.len(), 4);
    assert_eq!(result.chosen_configs.len(), 4);
    assert!(result.outer_scores.iter().all(|s| s.is_finite()));
    for chosen in &result.chosen_configs {
        assert!(candidates.contains(chosen), "chosen {:?} not a candidate", chosen);
    }
    // A polynomial candidate should fit the sinusoid far better than noise
    // level alone would suggest a linear one could.
    assert!(result.mean_score() < 0.3, "mean MSE = {}", result.mean_score());
}

// ---------------------------------------------------------------------------
// Permutation test
// ---------------------------------------------------------------------------

#[test]
fn permutation_test_flags_real_signal() {
    let dataset = make_regression(100, 4, 4, 0.2, Some(21));
    let kfold = KFold::new(4).with_shuffle(Some(21));
    let ridge = build_estimator(&EstimatorConfig::ridge(1e-3, 1));

    let test = permutation_test_score(
        ridge.as_ref(),
        &dataset,
        &kfold,
        Scoring::R2,
        24,
        Some(21),
    )
    .unwrap();

    assert_eq!(test.permutation_scores.len(), 24);
    assert!(
        test.p_value <= 0.08,
        "real signal should be significant, p = {}",
        test.p_value
    );
    let chance = test.permutation_scores.iter().sum::<f64>() / 24.0;
    assert!(
        test.score > chance + 0.5,
        "true R2 {} should clear chance level {}",
        test.score,
        chance
    );
}

#[test]
fn permutation_test_is_reproducible() {
    let dataset = make_regression(40, 3, 3, 0.5, Some(13));
    let kfold = KFold::new(4).with_shuffle(Some(13));
    let ridge = build_estimator(&EstimatorConfig::ridge(0.1, 1));

    let a = permutation_test_score(ridge.as_ref(), &dataset, &kfold, Scoring::R2, 10, Some(13))
        .unwrap();
    let b = permutation_test_score(ridge.as_ref(), &dataset, &kfold, Scoring::R2, 10, Some(13))
        .unwrap();

    assert_eq!(a.permutation_scores, b.permutation_scores);
    assert_eq!(a.p_value, b.p_value);
}
