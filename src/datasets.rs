//! Synthetic dataset generators.
//!
//! Small seeded generators covering the shapes the evaluation routines are
//! exercised against: a sparse linear problem, the Friedman #1 nonlinear
//! benchmark, a two-blob classification problem, and a one-feature sinusoid
//! for polynomial under/overfitting demos. All generators are deterministic
//! for a given seed.
use itertools_num::linspace;
use ndarray::{Array1, Array2};
use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::Normal;

use crate::data::{seeded_rng, Dataset};

/// Generate a regression problem with a sparse linear ground truth.
///
/// The first `n_informative` features carry signal; the rest are noise
/// columns. Targets are `x . w` plus Gaussian noise with standard deviation
/// `noise`.
///
/// # Arguments
///
/// * `n_samples` - Number of rows
/// * `n_features` - Total number of feature columns
/// * `n_informative` - Number of leading features with non-zero weight
/// * `noise` - Standard deviation of the additive Gaussian noise
/// * `seed` - Optional seed for reproducibility
pub fn make_regression(
    n_samples: usize,
    n_features: usize,
    n_informative: usize,
    noise: f64,
    seed: Option<u64>,
) -> Dataset {
    let mut rng = seeded_rng(seed);
    let standard = Normal::new(0.0, 1.0).unwrap();

    let n_informative = n_informative.min(n_features);
    let weights: Vec<f64> = (0..n_informative)
        .map(|_| rng.gen_range(1.0..10.0) * if rng.gen_bool(0.5) { 1.0 } else { -1.0 })
        .collect();

    let mut data = Vec::with_capacity(n_samples * n_features);
    let mut targets = Vec::with_capacity(n_samples);

    for _ in 0..n_samples {
        let row: Vec<f64> = (0..n_features).map(|_| standard.sample(&mut rng)).collect();
        let mut y: f64 = row
            .iter()
            .zip(weights.iter())
            .map(|(x, w)| x * w)
            .sum();
        if noise > 0.0 {
            y += Normal::new(0.0, noise).unwrap().sample(&mut rng);
        }
        data.extend_from_slice(&row);
        targets.push(y);
    }

    let x = Array2::from_shape_vec((n_samples, n_features), data)
        .expect("make_regression: shape mismatch");
    Dataset::from_arrays(x, Array1::from_vec(targets)).expect("make_regression: invalid shapes")
}

/// Generate the Friedman #1 benchmark.
///
/// `y = 10 sin(pi x0 x1) + 20 (x2 - 0.5)^2 + 10 x3 + 5 x4 + noise`, with all
/// features uniform on [0, 1]. Only the first five features are informative,
/// so `n_features` must be at least 5.
pub fn make_friedman1(
    n_samples: usize,
    n_features: usize,
    noise: f64,
    seed: Option<u64>,
) -> Dataset {
    assert!(n_features >= 5, "make_friedman1 requires n_features >= 5");

    let mut rng = seeded_rng(seed);
    let mut data = Vec::with_capacity(n_samples * n_features);
    let mut targets = Vec::with_capacity(n_samples);

    for _ in 0..n_samples {
        let row: Vec<f64> = (0..n_features).map(|_| rng.gen_range(0.0..1.0)).collect();
        let mut y = 10.0 * (std::f64::consts::PI * row[0] * row[1]).sin()
            + 20.0 * (row[2] - 0.5).powi(2)
            + 10.0 * row[3]
            + 5.0 * row[4];
        if noise > 0.0 {
            y += Normal::new(0.0, noise).unwrap().sample(&mut rng);
        }
        data.extend_from_slice(&row);
        targets.push(y);
    }

    let x = Array2::from_shape_vec((n_samples, n_features), data)
        .expect("make_friedman1: shape mismatch");
    Dataset::from_arrays(x, Array1::from_vec(targets)).expect("make_friedman1: invalid shapes")
}

/// Generate a binary classification problem from two Gaussian blobs.
///
/// Class centers sit at `-class_sep / 2` and `+class_sep / 2` along every
/// feature axis; labels are 0.0 and 1.0 with balanced classes.
pub fn make_classification(
    n_samples: usize,
    n_features: usize,
    class_sep: f64,
    seed: Option<u64>,
) -> Dataset {
    let mut rng = seeded_rng(seed);
    let standard = Normal::new(0.0, 1.0).unwrap();

    let mut data = Vec::with_capacity(n_samples * n_features);
    let mut targets = Vec::with_capacity(n_samples);

    for i in 0..n_samples {
        // Alternate classes so every prefix of the dataset stays balanced.
        let label = (i % 2) as f64;
        let center = if label > 0.5 {
            class_sep / 2.0
        } else {
            -class_sep / 2.0
        };
        for _ in 0..n_features {
            data.push(center + standard.sample(&mut rng));
        }
        targets.push(label);
    }

    let x = Array2::from_shape_vec((n_samples, n_features), data)
        .expect("make_classification: shape mismatch");
    let mut ds = Dataset::from_arrays(x, Array1::from_vec(targets))
        .expect("make_classification: invalid shapes");
    ds.target_name = "class".to_string();
    ds.shuffled(seed)
}

/// Generate a one-feature sinusoid on an evenly spaced grid.
pub fn make_sine(n_samples: usize, noise: f64, seed: Option<u64>) -> Dataset {
    let mut rng = seeded_rng(seed);

    let xs: Vec<f64> = linspace(0.0, std::f64::consts::TAU, n_samples).collect();
    let targets: Vec<f64> = xs
        .iter()
        .map(|&x| {
            let mut y = x.sin();
            if noise > 0.0 {
                y += Normal::new(0.0, noise).unwrap().sample(&mut rng);
            }
            y
        })
        .collect();

    let x = Array2::from_shape_vec((n_samples, 1), xs).expect("make_sine: shape mismatch");
    Dataset::from_arrays(x, Array1::from_vec(targets)).expect("make_sine: invalid shapes")
}
