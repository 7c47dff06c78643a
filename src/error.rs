//! Error taxonomy for tree construction.
//!
//! Two families are kept apart:
//! - [`InputError`]: the caller handed us something unusable. Reported immediately.
//! - [`InvariantViolation`]: the algorithm itself went wrong. Unreachable for valid input,
//!   so tests assert these never happen rather than that they are handled.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClusteringError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ClusteringError {
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, ClusteringError::Invariant(_))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ClusteringError::InvalidInput(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("instance contains no points")]
    EmptyInstance,
    #[error("k = {k} must satisfy 1 <= k <= {points}")]
    InvalidK { k: usize, points: usize },
    #[error("expected dimension {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },
    #[error("center {index} has a non-finite coordinate")]
    NonFiniteCenter { index: usize },
    #[error("{quantity} overflows f64; rescale the coordinates")]
    NumericOverflow { quantity: &'static str },
    #[error("instance point {index} is not assigned to any center")]
    UncoveredPoint { index: usize },
    #[error("clustering has no centers")]
    EmptyClustering,
    #[error("cannot seed {k} centers from {distinct} distinct points")]
    TooFewDistinctPoints { k: usize, distinct: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("node holds zero centers")]
    EmptyNode,
    #[error("split x[{dimension}] <= {threshold} leaves one side without centers")]
    EmptySplitSide { dimension: usize, threshold: f64 },
    #[error("{strategy}: no split candidates for a non-homogeneous node")]
    NoSplitCandidates { strategy: &'static str },
    #[error("{strategy}: no valid split after {attempts} attempts")]
    RetriesExhausted { strategy: &'static str, attempts: usize },
    #[error("attempted to split a homogeneous node")]
    SplitOfHomogeneousNode,
}

pub type Result<T> = std::result::Result<T, ClusteringError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_families_are_distinct() {
        let input: ClusteringError = InputError::EmptyInstance.into();
        let logic: ClusteringError = InvariantViolation::EmptyNode.into();

        assert!(input.is_invalid_input());
        assert!(!input.is_invariant_violation());
        assert!(logic.is_invariant_violation());
        assert!(!logic.is_invalid_input());
    }

    #[test]
    fn test_error_messages() {
        let err: ClusteringError = InvariantViolation::EmptySplitSide {
            dimension: 1,
            threshold: 2.5,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invariant violated: split x[1] <= 2.5 leaves one side without centers"
        );
    }
}
