use glam::DVec3;
use thiserror::Error;

/// Error types for the Procrustes alignment.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProcrustesError {
    /// Source and target point sets must have the same length
    #[error("Mismatched point set lengths: source ({source_len}) != target ({target_len})")]
    MismatchedInputLengths {
        /// Number of source points
        source_len: usize,
        /// Number of target points
        target_len: usize,
    },

    /// The mean of an empty point set is undefined
    #[error("Point sets must contain at least one point")]
    EmptyPointSet,

    /// A point coordinate is NaN or infinite
    #[error("Non-finite coordinate in {set} point {index}")]
    NonFiniteInput {
        /// Which point set holds the point, `"source"`, `"target"` or `"points"`
        set: &'static str,
        /// Index of the offending point
        index: usize,
    },

    /// An aligner parameter is out of range
    #[error("Invalid parameter: {0}")]
    InvalidParams(&'static str),

    /// The cross-covariance does not determine a unique rotation
    #[error("Degenerate point configuration: cross-covariance has rank {rank}, need at least 2")]
    DegenerateInput {
        /// Numerical rank of the cross-covariance matrix
        rank: usize,
    },

    /// The matrix is not a rigid homogeneous transform
    #[error("Invalid pose: {0}")]
    InvalidPose(&'static str),
}

/// Checks that every coordinate of a point set is finite.
pub(crate) fn check_finite(points: &[DVec3], set: &'static str) -> Result<(), ProcrustesError> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(ProcrustesError::NonFiniteInput { set, index }),
        None => Ok(()),
    }
}

/// Checks the index pairing of two point sets and the finiteness of their points.
pub(crate) fn check_pairing(source: &[DVec3], target: &[DVec3]) -> Result<(), ProcrustesError> {
    if source.len() != target.len() {
        return Err(ProcrustesError::MismatchedInputLengths {
            source_len: source.len(),
            target_len: target.len(),
        });
    }
    if source.is_empty() {
        return Err(ProcrustesError::EmptyPointSet);
    }
    check_finite(source, "source")?;
    check_finite(target, "target")
}
