//! Integration tests for feature selection, including the classic
//! selection-outside-cross-validation pitfall.

use ndarray::{Array1, Array2};

use crossval::config::EstimatorConfig;
use crossval::datasets::make_regression;
use crossval::evaluation::cross_val_score;
use crossval::feature_selection::{
    f_regression, SelectFromModel, SelectKBest, SelectedEstimator,
};
use crossval::models::factory::build_estimator;
use crossval::models::Estimator;
use crossval::scoring::Scoring;
use crossval::splits::KFold;

// ---------------------------------------------------------------------------
// Univariate selection
// ---------------------------------------------------------------------------

#[test]
fn f_regression_ranks_informative_feature_first() {
    // Feature 0 is the target up to noise; feature 1 is pure noise.
    let x = Array2::from_shape_vec(
        (8, 2),
        vec![
            1.0, 0.3, 2.0, -0.4, 3.0, 0.1, 4.0, -0.2, //
            5.0, 0.5, 6.0, -0.1, 7.0, 0.2, 8.0, 0.0,
        ],
    )
    .unwrap();
    let y = Array1::from_vec(vec![1.1, 2.0, 2.9, 4.2, 4.8, 6.1, 7.0, 7.9]);

    let (f, p) = f_regression(&x, &y, true, true);
    assert!(f[0] > f[1]);
    assert!(p[0] < 0.001);
}

#[test]
fn select_k_best_transform_keeps_names_aligned() {
    let dataset = make_regression(50, 6, 2, 0.1, Some(17));
    let (reduced, selected) = SelectKBest::new(3).fit_transform(&dataset);

    assert_eq!(reduced.n_features(), 3);
    assert_eq!(selected.len(), 3);
    for (i, &col) in selected.iter().enumerate() {
        assert_eq!(reduced.feature_names[i], dataset.feature_names[col]);
    }
    // Indices come back in ascending column order
    assert!(selected.windows(2).all(|w| w[0] < w[1]));
}

// ---------------------------------------------------------------------------
// Model-based selection
// ---------------------------------------------------------------------------

#[test]
fn select_from_model_keeps_the_informative_feature() {
    let dataset = make_regression(60, 6, 1, 0.1, Some(23));
    let ridge = build_estimator(&EstimatorConfig::ridge(1e-2, 1));

    let selected = SelectFromModel::new()
        .fit(ridge.as_ref(), &dataset.x, &dataset.y)
        .unwrap();

    assert!(selected.contains(&0), "informative feature must survive");
    assert!(selected.len() <= 2, "noise features should be dropped: {:?}", selected);
}

#[test]
fn select_from_model_requires_importances() {
    let dataset = make_regression(30, 3, 1, 0.1, Some(2));
    let dummy = build_estimator(&EstimatorConfig::dummy_mean());
    let result = SelectFromModel::new().fit(dummy.as_ref(), &dataset.x, &dataset.y);
    assert!(result.is_err(), "dummy exposes no importances");
}

// ---------------------------------------------------------------------------
// The selection pitfall
// ---------------------------------------------------------------------------

#[test]
fn selection_outside_cv_inflates_scores_on_noise() {
    // Pure noise: 40 samples, 100 candidate features, no signal at all.
    let dataset = make_regression(40, 100, 0, 1.0, Some(31));
    let kfold = KFold::new(5).with_shuffle(Some(31));

    // WRONG: select on the full dataset, then cross-validate the reduced
    // data. The held-out folds leaked into the selection.
    let (reduced, _) = SelectKBest::new(5).fit_transform(&dataset);
    let ridge = build_estimator(&EstimatorConfig::ridge(1e-2, 1));
    let leaky = cross_val_score(ridge.as_ref(), &reduced, &kfold, Scoring::R2).unwrap();

    // RIGHT: selection happens inside each training fold.
    let honest_estimator = SelectedEstimator::new(
        SelectKBest::new(5),
        build_estimator(&EstimatorConfig::ridge(1e-2, 1)),
    );
    let honest = cross_val_score(&honest_estimator, &dataset, &kfold, Scoring::R2).unwrap();

    assert!(
        leaky.mean_test() > honest.mean_test(),
        "leaky selection should look better than honest selection: {} vs {}",
        leaky.mean_test(),
        honest.mean_test()
    );
    assert!(
        honest.mean_test() < 0.5,
        "honest evaluation of pure noise should not look skilled, got {}",
        honest.mean_test()
    );
}

#[test]
fn selected_estimator_records_its_choice() {
    let dataset = make_regression(50, 8, 2, 0.2, Some(19));
    let mut estimator = SelectedEstimator::new(
        SelectKBest::new(4),
        build_estimator(&EstimatorConfig::ridge(1e-2, 1)),
    );

    assert!(estimator.selected_features().is_none());
    estimator.fit(&dataset.x, &dataset.y).unwrap();

    let selected = estimator.selected_features().unwrap();
    assert_eq!(selected.len(), 4);

    let preds = estimator.predict(&dataset.x).unwrap();
    assert_eq!(preds.len(), 50);
}
