//! Batched BLAS operations
//!
//! The building blocks the batched factorization delegates to between panels.
//! Operations are defined as traits implemented by a runtime's client:
//!
//! ```text
//! RuntimeClient<R>
//!   └── implements BatchedBlasOps<R>
//!         ├── trsm_vbatched (triangular solve, right/lower/conj-transpose)
//!         └── herk_vbatched (Hermitian rank-k update, lower)
//! ```
//!
//! Every batched operation takes the batch's [`InfoArray`](crate::batch::InfoArray)
//! and skips members whose entry is non-zero.

pub mod traits;

pub use traits::BatchedBlasOps;
