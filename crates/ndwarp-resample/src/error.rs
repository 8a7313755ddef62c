use ndwarp_tensor::TensorError;

use crate::parallel::ParallelError;

/// An error type for the resampling operations.
///
/// Every variant is reported before the destination buffer is touched.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ResampleError {
    /// An argument does not have the length the rank of the transform requires.
    #[error("{what} has {actual} components, expected {expected}")]
    DimensionMismatch {
        /// Name of the offending argument
        what: String,
        /// Length required by the rank
        expected: usize,
        /// Length that was given
        actual: usize,
    },

    /// A destination does not have the shape the operation produces.
    #[error("destination shape {actual:?} does not match expected shape {expected:?}")]
    ShapeMismatch {
        /// Shape the operation produces
        expected: Vec<usize>,
        /// Shape of the given destination
        actual: Vec<usize>,
    },

    /// The rank is outside the range the engine is compiled for.
    #[error("unsupported rank {0}, expected 1 to 5 dimensions")]
    UnsupportedRank(usize),

    /// The linear part of a forward transform cannot be inverted.
    #[error("linear transformation is singular")]
    SingularMatrix,

    /// A buffer and its shape disagree.
    #[error(transparent)]
    Tensor(#[from] TensorError),

    /// The worker pool could not run the transform.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}

impl ResampleError {
    /// Creates a DimensionMismatch error with clear context.
    pub fn dimension_mismatch(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }
}
