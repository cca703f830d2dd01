//! Algorithm contracts for runtime backends
//!
//! Every algorithm is defined as a trait first, then implemented per backend.
//! A backend that lacks an implementation inherits the trait's default
//! methods, which return [`Error::NotImplemented`](crate::error::Error::NotImplemented).
//!
//! # Available Algorithm Contracts
//!
//! - [`BatchedCholeskyAlgorithms`] - variable-size batched Cholesky (`potrf_vbatched`)

pub mod cholesky;

pub use cholesky::{
    BatchedCholeskyAlgorithms, CholeskyAlgorithm, PotrfOptions, DEFAULT_BLOCK_SIZE,
    DEFAULT_CROSSOVER, DEFAULT_PANEL_THRESHOLD,
};
