//! CPU client, allocator and batch dispatch

use super::device::CpuDevice;
use super::runtime::CpuRuntime;
use crate::error::{Error, Result};
use crate::runtime::{RuntimeClient, TrackingAllocator};
use std::alloc::{Layout as AllocLayout, alloc_zeroed, dealloc};
#[cfg(feature = "rayon")]
use std::sync::Arc;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// AVX-512 friendly alignment for matrix buffers
const CPU_ALIGNMENT: usize = 64;

/// CPU-specific allocator type alias
pub type CpuAllocator = TrackingAllocator<CpuDevice>;

/// Parallel execution settings for batch-wide phases
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelismConfig {
    /// Worker threads for a dedicated pool; `None` uses the global rayon pool
    pub num_threads: Option<usize>,
    /// Minimum number of batch members handled by one task
    pub min_members_per_task: usize,
}

impl Default for ParallelismConfig {
    fn default() -> Self {
        Self {
            num_threads: None,
            min_members_per_task: 1,
        }
    }
}

impl ParallelismConfig {
    /// Run every phase on the calling thread
    pub fn sequential() -> Self {
        Self {
            num_threads: Some(1),
            min_members_per_task: usize::MAX,
        }
    }
}

/// CPU client for operation dispatch
///
/// The client is the execution queue of the CPU runtime: batched operations
/// enqueue their phases on it in program order, and each phase completes for
/// every member before the call returns from that phase.
#[derive(Clone, Debug)]
pub struct CpuClient {
    pub(crate) device: CpuDevice,
    allocator: CpuAllocator,
    parallelism: ParallelismConfig,
    #[cfg(feature = "rayon")]
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl CpuClient {
    /// Create a new CPU client
    pub fn new(device: CpuDevice) -> Self {
        let allocator = create_cpu_allocator(device.clone());
        Self {
            device,
            allocator,
            parallelism: ParallelismConfig::default(),
            #[cfg(feature = "rayon")]
            pool: None,
        }
    }

    /// Replace the parallelism settings, building a dedicated thread pool
    /// when `num_threads` is set.
    pub fn with_parallelism(mut self, config: ParallelismConfig) -> Result<Self> {
        if config.min_members_per_task == 0 {
            return Err(Error::invalid_argument(
                "min_members_per_task",
                "must be at least 1",
            ));
        }

        #[cfg(feature = "rayon")]
        {
            self.pool = match config.num_threads {
                Some(0) => {
                    return Err(Error::invalid_argument("num_threads", "must be at least 1"));
                }
                Some(n) => {
                    let pool = rayon::ThreadPoolBuilder::new()
                        .num_threads(n)
                        .build()
                        .map_err(|e| Error::Backend(format!("thread pool: {e}")))?;
                    Some(Arc::new(pool))
                }
                None => None,
            };
        }

        self.parallelism = config;
        Ok(self)
    }

    /// Current parallelism settings
    pub fn parallelism(&self) -> &ParallelismConfig {
        &self.parallelism
    }

    /// Dispatch one batch-wide phase.
    ///
    /// `kernel` runs once per member with the member index and that member's
    /// info entry. Members are processed in no particular order; the call
    /// returns once every member has finished the phase.
    pub(crate) fn dispatch_batch<F>(&self, status: &mut [i32], kernel: F)
    where
        F: Fn(usize, &mut i32) + Send + Sync,
    {
        #[cfg(feature = "rayon")]
        {
            if status.len() > 1 {
                let min_len = self.parallelism.min_members_per_task;
                let mut run = || {
                    status
                        .par_iter_mut()
                        .enumerate()
                        .with_min_len(min_len)
                        .for_each(|(i, s)| kernel(i, s));
                };
                match &self.pool {
                    Some(pool) => pool.install(run),
                    None => run(),
                }
                return;
            }
        }

        for (i, s) in status.iter_mut().enumerate() {
            kernel(i, s);
        }
    }

    /// Dispatch one batch-wide phase over live members only.
    ///
    /// Members whose info entry is non-zero are skipped; `status` is only
    /// read. Same completion guarantee as [`CpuClient::dispatch_batch`].
    pub(crate) fn dispatch_live<F>(&self, status: &[i32], kernel: F)
    where
        F: Fn(usize) + Send + Sync,
    {
        #[cfg(feature = "rayon")]
        {
            if status.len() > 1 {
                let min_len = self.parallelism.min_members_per_task;
                let run = || {
                    status
                        .par_iter()
                        .enumerate()
                        .with_min_len(min_len)
                        .for_each(|(i, &s)| {
                            if s == 0 {
                                kernel(i);
                            }
                        });
                };
                match &self.pool {
                    Some(pool) => pool.install(run),
                    None => run(),
                }
                return;
            }
        }

        for (i, &s) in status.iter().enumerate() {
            if s == 0 {
                kernel(i);
            }
        }
    }
}

impl RuntimeClient<CpuRuntime> for CpuClient {
    fn device(&self) -> &CpuDevice {
        &self.device
    }

    fn synchronize(&self) {
        // Phases complete before dispatch_batch returns
    }

    fn allocator(&self) -> &CpuAllocator {
        &self.allocator
    }
}

fn create_cpu_allocator(device: CpuDevice) -> CpuAllocator {
    TrackingAllocator::new(
        device,
        |size, _dev| {
            let layout = AllocLayout::from_size_align(size, CPU_ALIGNMENT).ok()?;
            let ptr = unsafe { alloc_zeroed(layout) };
            if ptr.is_null() {
                None
            } else {
                Some(ptr as u64)
            }
        },
        |ptr, size, _dev| {
            if let Ok(layout) = AllocLayout::from_size_align(size, CPU_ALIGNMENT) {
                unsafe {
                    dealloc(ptr as *mut u8, layout);
                }
            }
        },
    )
}
