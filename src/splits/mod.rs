//! Resampling strategies.
//!
//! Splitters turn a sample count (or a label vector, for the stratified
//! variant) into `(train, test)` index pairs consumed by the evaluation
//! routines.
pub mod kfold;
pub mod shuffle_split;

pub use kfold::{KFold, StratifiedKFold};
pub use shuffle_split::ShuffleSplit;

/// A single train/test partition expressed as row indices.
pub type SplitIndices = (Vec<usize>, Vec<usize>);
