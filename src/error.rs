//! Error types for numr-batched
//!
//! Only invocation-level failures are errors. Numerical failures of individual
//! batch members (a leading minor that is not positive-definite) are reported
//! through [`InfoArray`](crate::batch::InfoArray) and never surface here.

use crate::batch::Uplo;
use thiserror::Error;

/// Result type alias using numr-batched's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when dispatching a batched operation
#[derive(Error, Debug)]
pub enum Error {
    /// The requested triangle is recognized but not implemented by this engine
    #[error("Unsupported triangular mode {uplo:?} for operation '{op}'")]
    UnsupportedUplo {
        /// The rejected mode
        uplo: Uplo,
        /// The operation name
        op: &'static str,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Per-member arrays of a batch descriptor disagree in length
    #[error("Batch mismatch: {views} matrix views vs {sizes} sizes")]
    BatchMismatch {
        /// Number of matrix views
        views: usize,
        /// Number of per-member sizes
        sizes: usize,
    },

    /// Out of memory
    #[error("Out of memory: failed to allocate {size} bytes")]
    OutOfMemory {
        /// Requested size in bytes
        size: usize,
    },

    /// Backend-specific error
    #[error("Backend error: {0}")]
    Backend(String),

    /// Feature not yet implemented
    #[error("Not implemented: {feature}")]
    NotImplemented {
        /// Description of the unimplemented feature
        feature: &'static str,
    },
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create a batch mismatch error
    pub fn batch_mismatch(views: usize, sizes: usize) -> Self {
        Self::BatchMismatch { views, sizes }
    }

    /// Create an unsupported triangular mode error
    pub fn unsupported_uplo(uplo: Uplo, op: &'static str) -> Self {
        Self::UnsupportedUplo { uplo, op }
    }
}
