//! # numr-batched
//!
//! **Variable-size batched Cholesky factorization for numr runtimes.**
//!
//! numr-batched factorizes large batches of small-to-medium Hermitian
//! positive-definite matrices of *differing* orders in one call. A single
//! uniform control flow drives every member through the same sequence of
//! batch-wide phases, so thousands of heterogeneous problems are processed
//! without per-member host intervention.
//!
//! ## Features
//!
//! - **Variable-size batches**: members of any order, including 0, in one call
//! - **Per-member outcomes**: LAPACK-style info codes, first failure wins
//! - **Recursive and blocked drivers**: bit-identical results for every panel threshold
//! - **Multiple dtypes**: f32, f64, Complex64, Complex128
//! - **Parallel phases**: members of a phase run concurrently with rayon
//!
//! ## Quick Start
//!
//! ```rust
//! # #[cfg(feature = "cpu")] {
//! use numr_batched::prelude::*;
//!
//! let client = CpuClient::new(CpuDevice::new());
//!
//! // Two members: a 2x2 SPD matrix and a 1x1 that is not positive-definite
//! let mut a = vec![4.0f64, 12.0, 0.0, 37.0];
//! let mut b = vec![-1.0f64];
//! let mut batch = VBatch::from_matrices([(a.as_mut_slice(), 2, 2), (b.as_mut_slice(), 1, 1)])?;
//! let mut info = InfoArray::new(batch.len());
//!
//! client.potrf_vbatched(Uplo::Lower, &mut batch, &mut info, 0, &PotrfOptions::default())?;
//! drop(batch);
//!
//! assert_eq!(info.as_slice(), &[0, 1]);
//! assert_eq!(a, vec![2.0, 6.0, 0.0, 1.0]);
//! # }
//! # Ok::<(), numr_batched::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cpu` (default): CPU backend
//! - `rayon` (default): Multi-threaded batch phases

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithm;
pub mod batch;
pub mod dtype;
pub mod error;
pub mod ops;
pub mod runtime;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithm::{BatchedCholeskyAlgorithms, CholeskyAlgorithm, PotrfOptions};
    pub use crate::batch::{BatchStorage, InfoArray, MatrixView, MemberStatus, Uplo, VBatch};
    pub use crate::dtype::{Complex64, Complex128, DType, Element, LinalgScalar};
    pub use crate::error::{Error, Result};
    pub use crate::ops::BatchedBlasOps;
    pub use crate::runtime::{Device, Runtime, RuntimeClient};

    #[cfg(feature = "cpu")]
    pub use crate::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime, ParallelismConfig};
}

/// Default runtime based on enabled features
#[cfg(feature = "cpu")]
pub type DefaultRuntime = runtime::cpu::CpuRuntime;
