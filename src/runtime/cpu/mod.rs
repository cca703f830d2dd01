//! CPU runtime implementation
//!
//! Device memory is host heap memory, so matrix views built on CPU storage are
//! directly addressable. A batch-wide phase is one parallel iteration over the
//! members of the batch (rayon when the `rayon` feature is enabled, a plain
//! loop otherwise).

mod blas;
mod client;
mod device;
pub(crate) mod kernels;
mod lapack;
mod runtime;

pub use client::{CpuAllocator, CpuClient, ParallelismConfig};
pub use device::CpuDevice;
pub use runtime::CpuRuntime;
