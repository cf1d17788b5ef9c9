use std::error::Error;
use std::fmt;

/// Custom error type for evaluation failures
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Two row-aligned arrays disagree in length
    LengthMismatch { expected: usize, got: usize },
    /// A dataset or fold ended up with no samples
    EmptyData,
    /// `predict` was called before `fit`
    NotFitted,
    /// A parameter is outside its valid range
    InvalidParam(String),
    /// The normal-equation system could not be solved
    SingularMatrix,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalError::LengthMismatch { expected, got } => {
                write!(f, "Arrays must have equal length: expected {}, got {}", expected, got)
            }
            EvalError::EmptyData => write!(f, "Operation requires at least one sample"),
            EvalError::NotFitted => write!(f, "Estimator must be fitted before calling predict"),
            EvalError::InvalidParam(msg) => write!(f, "Invalid parameter: {}", msg),
            EvalError::SingularMatrix => write!(f, "Linear system is singular and cannot be solved"),
        }
    }
}

impl Error for EvalError {}
