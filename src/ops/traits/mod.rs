//! Operation traits implemented by runtime clients

mod blas;

pub use blas::BatchedBlasOps;
pub(crate) use blas::validate_batch_arrays;
