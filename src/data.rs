//! Data structures and helpers for holding and manipulating datasets.
//!
//! This module defines `Dataset` and contains helpers for taking row and
//! column subsets, shuffling, permuting the target, and creating the
//! train/test splits used by the evaluation routines.
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::error::EvalError;

/// A dataset held in memory: a feature matrix, a target vector, and names.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Array2<f64>,
    pub y: Array1<f64>,
    pub feature_names: Vec<String>,
    pub target_name: String,
}

impl Dataset {
    /// Create a new `Dataset`, validating that all row-aligned fields agree.
    pub fn new(
        x: Array2<f64>,
        y: Array1<f64>,
        feature_names: Vec<String>,
        target_name: impl Into<String>,
    ) -> Result<Self, EvalError> {
        if x.nrows() != y.len() {
            return Err(EvalError::LengthMismatch {
                expected: x.nrows(),
                got: y.len(),
            });
        }
        if feature_names.len() != x.ncols() {
            return Err(EvalError::LengthMismatch {
                expected: x.ncols(),
                got: feature_names.len(),
            });
        }
        Ok(Dataset {
            x,
            y,
            feature_names,
            target_name: target_name.into(),
        })
    }

    /// Create a dataset with generated feature names (`x0`, `x1`, ...).
    pub fn from_arrays(x: Array2<f64>, y: Array1<f64>) -> Result<Self, EvalError> {
        let names = (0..x.ncols()).map(|i| format!("x{}", i)).collect();
        Dataset::new(x, y, names, "y")
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    pub fn log_summary(&self) {
        log::info!(
            "Dataset '{}': {} samples, {} features",
            self.target_name,
            self.n_samples(),
            self.n_features()
        );
    }

    /// Take a row subset by index. Indices may repeat (bootstrap-style).
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            x: self.x.select(Axis(0), indices),
            y: self.y.select(Axis(0), indices),
            feature_names: self.feature_names.clone(),
            target_name: self.target_name.clone(),
        }
    }

    /// Take a row subset by boolean mask.
    ///
    /// # Arguments
    ///
    /// * `mask` - A boolean mask of the same length as the number of samples
    pub fn filter(&self, mask: &Array1<bool>) -> Dataset {
        let selected: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &m)| if m { Some(i) } else { None })
            .collect();
        self.select(&selected)
    }

    /// Take a column subset by feature index, keeping names aligned.
    pub fn select_features(&self, indices: &[usize]) -> Dataset {
        Dataset {
            x: self.x.select(Axis(1), indices),
            y: self.y.clone(),
            feature_names: indices
                .iter()
                .map(|&i| self.feature_names[i].clone())
                .collect(),
            target_name: self.target_name.clone(),
        }
    }

    /// Return a copy with rows shuffled. Deterministic for a given seed.
    pub fn shuffled(&self, seed: Option<u64>) -> Dataset {
        let mut rng = seeded_rng(seed);
        let mut indices: Vec<usize> = (0..self.n_samples()).collect();
        indices.shuffle(&mut rng);
        self.select(&indices)
    }

    /// Return a copy with the target values shuffled against the features.
    ///
    /// This breaks any real feature/target association while preserving the
    /// marginal distribution of the target, which is exactly what a
    /// permutation test needs.
    pub fn with_permuted_target(&self, rng: &mut StdRng) -> Dataset {
        let mut values = self.y.to_vec();
        values.shuffle(rng);
        Dataset {
            x: self.x.clone(),
            y: Array1::from_vec(values),
            feature_names: self.feature_names.clone(),
            target_name: self.target_name.clone(),
        }
    }

    /// Split into (train, test) with `test_fraction` of samples held out.
    ///
    /// # Arguments
    ///
    /// * `test_fraction` - Fraction of samples for the test half, in (0, 1)
    /// * `seed` - Optional seed for the shuffle before splitting
    pub fn train_test_split(
        &self,
        test_fraction: f64,
        seed: Option<u64>,
    ) -> Result<(Dataset, Dataset), EvalError> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(EvalError::InvalidParam(format!(
                "test_fraction must be in (0, 1), got {}",
                test_fraction
            )));
        }
        let n = self.n_samples();
        if n < 2 {
            return Err(EvalError::EmptyData);
        }

        let mut rng = seeded_rng(seed);
        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(&mut rng);

        let n_test = ((n as f64) * test_fraction).round() as usize;
        let n_test = n_test.clamp(1, n - 1);

        let test_idx = &indices[..n_test];
        let train_idx = &indices[n_test..];

        Ok((self.select(train_idx), self.select(test_idx)))
    }
}

/// Build a `StdRng` from an optional seed, drawing one from the thread RNG
/// when no seed is given so runs can still be logged and reproduced.
pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    StdRng::seed_from_u64(seed)
}
