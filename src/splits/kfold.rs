//! K-fold and stratified k-fold splitters.
use std::collections::BTreeMap;

use ndarray::Array1;
use rand::seq::SliceRandom;

use crate::data::seeded_rng;
use crate::error::EvalError;
use crate::splits::SplitIndices;

/// Standard k-fold cross-validation splitter.
///
/// Folds are contiguous blocks of the (optionally shuffled) sample order.
/// The first `n_samples % n_splits` folds receive one extra sample so the
/// folds are as even as possible.
#[derive(Debug, Clone)]
pub struct KFold {
    pub n_splits: usize,
    pub shuffle: bool,
    pub seed: Option<u64>,
}

impl KFold {
    pub fn new(n_splits: usize) -> Self {
        KFold {
            n_splits,
            shuffle: false,
            seed: None,
        }
    }

    /// Enable shuffling before folding. Deterministic for a given seed.
    pub fn with_shuffle(mut self, seed: Option<u64>) -> Self {
        self.shuffle = true;
        self.seed = seed;
        self
    }

    /// Produce the `(train, test)` index pairs for `n_samples` rows.
    pub fn split(&self, n_samples: usize) -> Result<Vec<SplitIndices>, EvalError> {
        validate_splits(self.n_splits, n_samples)?;

        let mut order: Vec<usize> = (0..n_samples).collect();
        if self.shuffle {
            let mut rng = seeded_rng(self.seed);
            order.shuffle(&mut rng);
        }

        Ok(assign_folds(&order, self.n_splits))
    }
}

/// Stratified k-fold splitter for classification targets.
///
/// Each distinct label value is distributed across the folds so every fold
/// approximately preserves the class proportions of the full dataset.
#[derive(Debug, Clone)]
pub struct StratifiedKFold {
    pub n_splits: usize,
    pub seed: Option<u64>,
}

impl StratifiedKFold {
    pub fn new(n_splits: usize) -> Self {
        StratifiedKFold {
            n_splits,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Produce the `(train, test)` index pairs for the given label vector.
    pub fn split(&self, y: &Array1<f64>) -> Result<Vec<SplitIndices>, EvalError> {
        validate_splits(self.n_splits, y.len())?;

        // Group sample indices by label. Labels are bucketed by their bit
        // pattern, which is exact for the 0.0/1.0/2.0-style class encodings
        // this splitter is meant for.
        let mut classes: BTreeMap<u64, Vec<usize>> = BTreeMap::new();
        for (i, &label) in y.iter().enumerate() {
            classes.entry(label.to_bits()).or_default().push(i);
        }

        for members in classes.values() {
            if members.len() < self.n_splits {
                return Err(EvalError::InvalidParam(format!(
                    "a class has only {} members but {} splits were requested",
                    members.len(),
                    self.n_splits
                )));
            }
        }

        let mut rng = seeded_rng(self.seed);
        let mut test_folds: Vec<Vec<usize>> = vec![Vec::new(); self.n_splits];

        for members in classes.values() {
            let mut members = members.clone();
            members.shuffle(&mut rng);
            // Deal the class members round-robin across the folds.
            for (i, idx) in members.into_iter().enumerate() {
                test_folds[i % self.n_splits].push(idx);
            }
        }

        let n_samples = y.len();
        let splits = test_folds
            .into_iter()
            .map(|mut test| {
                test.sort_unstable();
                let in_test: Vec<bool> = {
                    let mut mask = vec![false; n_samples];
                    for &i in &test {
                        mask[i] = true;
                    }
                    mask
                };
                let train: Vec<usize> = (0..n_samples).filter(|&i| !in_test[i]).collect();
                (train, test)
            })
            .collect();

        Ok(splits)
    }
}

fn validate_splits(n_splits: usize, n_samples: usize) -> Result<(), EvalError> {
    if n_splits < 2 {
        return Err(EvalError::InvalidParam(format!(
            "n_splits must be at least 2, got {}",
            n_splits
        )));
    }
    if n_samples == 0 {
        return Err(EvalError::EmptyData);
    }
    if n_splits > n_samples {
        return Err(EvalError::InvalidParam(format!(
            "cannot split {} samples into {} folds",
            n_samples, n_splits
        )));
    }
    Ok(())
}

fn assign_folds(order: &[usize], n_splits: usize) -> Vec<SplitIndices> {
    let n_samples = order.len();
    let base = n_samples / n_splits;
    let remainder = n_samples % n_splits;

    let mut splits = Vec::with_capacity(n_splits);
    let mut start = 0usize;
    for fold in 0..n_splits {
        let size = base + usize::from(fold < remainder);
        let end = start + size;

        let test: Vec<usize> = order[start..end].to_vec();
        let train: Vec<usize> = order[..start]
            .iter()
            .chain(order[end..].iter())
            .copied()
            .collect();

        log::trace!(
            "Fold {}: {} training samples, {} testing samples",
            fold,
            train.len(),
            test.len()
        );

        splits.push((train, test));
        start = end;
    }
    splits
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    #[test]
    fn kfold_covers_all_samples_exactly_once() {
        let splits = KFold::new(4).split(10).unwrap();
        assert_eq!(splits.len(), 4);

        let mut seen = vec![0usize; 10];
        for (train, test) in &splits {
            assert_eq!(train.len() + test.len(), 10);
            for &i in test {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&c| c == 1), "each sample in exactly one test fold");
    }

    #[test]
    fn kfold_shuffled_is_deterministic_for_seed() {
        let a = KFold::new(3).with_shuffle(Some(7)).split(12).unwrap();
        let b = KFold::new(3).with_shuffle(Some(7)).split(12).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn stratified_preserves_class_balance() {
        // 8 zeros and 8 ones -> every fold of 4 should hold 2 of each
        let y: Array1<f64> = (0..16).map(|i| (i % 2) as f64).collect();
        let splits = StratifiedKFold::new(4).with_seed(Some(1)).split(&y).unwrap();
        for (_, test) in &splits {
            let ones = test.iter().filter(|&&i| y[i] > 0.5).count();
            assert_eq!(test.len(), 4);
            assert_eq!(ones, 2);
        }
    }

    #[test]
    fn too_many_splits_errors() {
        assert!(KFold::new(5).split(3).is_err());
    }
}
