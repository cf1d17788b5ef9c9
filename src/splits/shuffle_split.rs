//! Repeated random train/test partitioning.
use rand::seq::SliceRandom;

use crate::data::seeded_rng;
use crate::error::EvalError;
use crate::splits::SplitIndices;

/// Random permutation splitter.
///
/// Unlike `KFold`, the test sets of different iterations may overlap; the
/// test size is controlled directly via `test_fraction` rather than by the
/// number of splits.
#[derive(Debug, Clone)]
pub struct ShuffleSplit {
    pub n_splits: usize,
    pub test_fraction: f64,
    pub seed: Option<u64>,
}

impl ShuffleSplit {
    pub fn new(n_splits: usize, test_fraction: f64) -> Self {
        ShuffleSplit {
            n_splits,
            test_fraction,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn split(&self, n_samples: usize) -> Result<Vec<SplitIndices>, EvalError> {
        if self.n_splits == 0 {
            return Err(EvalError::InvalidParam(
                "n_splits must be at least 1".to_string(),
            ));
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(EvalError::InvalidParam(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        if n_samples < 2 {
            return Err(EvalError::EmptyData);
        }

        let n_test = ((n_samples as f64) * self.test_fraction).round() as usize;
        let n_test = n_test.clamp(1, n_samples - 1);

        let mut rng = seeded_rng(self.seed);
        let mut splits = Vec::with_capacity(self.n_splits);
        for _ in 0..self.n_splits {
            let mut order: Vec<usize> = (0..n_samples).collect();
            order.shuffle(&mut rng);
            let test = order[..n_test].to_vec();
            let train = order[n_test..].to_vec();
            splits.push((train, test));
        }
        Ok(splits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_split_sizes() {
        let splits = ShuffleSplit::new(5, 0.25).with_seed(Some(3)).split(20).unwrap();
        assert_eq!(splits.len(), 5);
        for (train, test) in &splits {
            assert_eq!(test.len(), 5);
            assert_eq!(train.len(), 15);
        }
    }

    #[test]
    fn invalid_fraction_errors() {
        assert!(ShuffleSplit::new(3, 1.5).split(10).is_err());
        assert!(ShuffleSplit::new(3, 0.0).split(10).is_err());
    }
}
