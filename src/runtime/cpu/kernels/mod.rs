//! CPU kernel implementations
//!
//! Per-member kernels of the batched factorization. Each kernel works on one
//! member's views; the batch-wide dispatch lives in `lapack`.
//!
//! All kernels share one arithmetic ordering: an element `a[i][j]` receives
//! the updates `a[i][k] * conj(a[j][k])` for increasing `k`, then the division
//! by the real diagonal. This keeps the unblocked, recursive and blocked paths
//! bit-identical.

#![allow(unsafe_op_in_unsafe_fn)] // Kernels are already marked unsafe, inner unsafe is redundant

pub mod herk;
pub mod potf2;
pub mod trsm;

pub use herk::herk_lower_kernel;
pub use potf2::potf2_lower_kernel;
pub use trsm::trsm_right_lower_conj_kernel;
