//! Batch descriptors for variable-size batched operations
//!
//! A batched call sees its input as a [`VBatch`]: one [`MatrixView`] per
//! member plus the per-member orders and their maximum. Per-member numerical
//! outcomes are written to an [`InfoArray`]. Neither type owns matrix memory;
//! [`BatchStorage`] is the optional owner for callers that want the library to
//! allocate a batch.

mod descriptor;
mod info;
mod storage;
mod view;

pub use descriptor::VBatch;
pub use info::{InfoArray, MemberStatus};
pub(crate) use info::record_failure;
pub use storage::BatchStorage;
pub use view::MatrixView;

/// Which triangle of a Hermitian matrix holds the data and the factor
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Uplo {
    /// Upper triangle (recognized, not supported by the batched engine)
    Upper,
    /// Lower triangle
    Lower,
}

impl Uplo {
    /// LAPACK character code
    pub const fn as_char(self) -> char {
        match self {
            Uplo::Upper => 'U',
            Uplo::Lower => 'L',
        }
    }
}
