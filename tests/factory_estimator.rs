use ndarray::{Array1, Array2};

use crossval::config::EstimatorConfig;
use crossval::models::factory;

#[test]
fn test_factory_builds_and_predicts() {
    // tiny dataset
    let x = Array2::from_shape_vec(
        (6, 2),
        vec![
            1.0, 0.0, // class 1
            0.0, 1.0, // class 0
            1.0, 0.1, // class 1
            0.0, 0.9, // class 0
            1.1, 0.0, // class 1
            0.0, 1.2, // class 0
        ],
    )
    .expect("failed to create feature matrix");

    let y = Array1::from_vec(vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);

    let config = EstimatorConfig::ridge(0.1, 1);
    let mut model = factory::build_estimator(&config);
    model.fit(&x, &y).expect("fit failed");
    let preds = model.predict(&x).expect("predict failed");
    assert_eq!(preds.len(), x.nrows());
}

#[test]
fn factory_builds_every_default_config() {
    let names = ["ridge", "linear", "dummy_mean", "dummy_median", "dummy_most_frequent", "gbdt"];
    for name in names {
        let config: EstimatorConfig = name.parse().unwrap();
        let model = factory::build_estimator(&config);
        assert!(!model.name().is_empty());
    }
}

#[test]
fn cloned_estimator_is_unfitted() {
    let x = Array2::from_shape_vec((4, 1), vec![0.0, 1.0, 2.0, 3.0]).unwrap();
    let y = Array1::from_vec(vec![0.0, 1.0, 2.0, 3.0]);

    let mut model = factory::build_estimator(&EstimatorConfig::default());
    model.fit(&x, &y).unwrap();

    // clone_box hands back a fresh configuration, not the fitted state
    let fresh = model.clone_box();
    assert!(fresh.predict(&x).is_err());
}
