//! Batched Cholesky algorithm contracts
//!
//! Defines the variable-size batched Cholesky factorization that every
//! backend implements, together with the tuning options and the validation
//! helpers shared by the backends.
//!
//! # Module Structure
//!
//! - `options`: `PotrfOptions` and driver selection
//! - `traits`: `BatchedCholeskyAlgorithms` trait
//! - `helpers`: Validation and recursion split utilities

pub mod helpers;
pub mod options;
pub mod traits;

pub use helpers::*;
pub use options::*;
pub use traits::*;
