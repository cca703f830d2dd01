//! Memory allocator trait and a tracking implementation
//!
//! Allocators hand out device memory as opaque `u64` handles. The tracking
//! allocator wraps a backend's raw allocate/free functions and keeps live and
//! peak byte counts, which batch storage and tests use to check that every
//! buffer is released.

use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Memory allocator trait for runtime backends
pub trait Allocator: Clone + Send + Sync {
    /// Allocate memory of given size
    ///
    /// Returns a device pointer (u64). A zero-sized request returns the null
    /// handle `0` without allocating.
    fn allocate(&self, size_bytes: usize) -> Result<u64>;

    /// Deallocate memory previously returned by [`Allocator::allocate`]
    fn deallocate(&self, ptr: u64, size_bytes: usize);

    /// Get the currently allocated bytes
    fn allocated_bytes(&self) -> usize {
        0
    }
}

/// Snapshot of allocator bookkeeping
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocationStats {
    /// Bytes currently allocated
    pub live_bytes: usize,
    /// Highest value `live_bytes` has reached
    pub peak_bytes: usize,
    /// Number of live allocations
    pub live_allocations: usize,
}

/// Allocator that delegates to backend functions and tracks usage
///
/// Clones share the same statistics.
#[derive(Clone, Debug)]
pub struct TrackingAllocator<D> {
    device: D,
    allocate_fn: fn(usize, &D) -> Option<u64>,
    deallocate_fn: fn(u64, usize, &D),
    stats: Arc<Mutex<AllocationStats>>,
}

impl<D: Clone + Send + Sync> TrackingAllocator<D> {
    /// Create a new tracking allocator
    ///
    /// `allocate_fn` returns `None` when the backend is out of memory.
    pub fn new(
        device: D,
        allocate_fn: fn(usize, &D) -> Option<u64>,
        deallocate_fn: fn(u64, usize, &D),
    ) -> Self {
        Self {
            device,
            allocate_fn,
            deallocate_fn,
            stats: Arc::new(Mutex::new(AllocationStats::default())),
        }
    }

    /// Get the device this allocator is associated with
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Current bookkeeping snapshot
    pub fn stats(&self) -> AllocationStats {
        *self.stats.lock()
    }
}

impl<D: Clone + Send + Sync> Allocator for TrackingAllocator<D> {
    fn allocate(&self, size_bytes: usize) -> Result<u64> {
        if size_bytes == 0 {
            return Ok(0);
        }
        let ptr = (self.allocate_fn)(size_bytes, &self.device)
            .ok_or(Error::OutOfMemory { size: size_bytes })?;

        let mut stats = self.stats.lock();
        stats.live_bytes += size_bytes;
        stats.live_allocations += 1;
        stats.peak_bytes = stats.peak_bytes.max(stats.live_bytes);
        Ok(ptr)
    }

    fn deallocate(&self, ptr: u64, size_bytes: usize) {
        if ptr == 0 || size_bytes == 0 {
            return;
        }
        (self.deallocate_fn)(ptr, size_bytes, &self.device);

        let mut stats = self.stats.lock();
        stats.live_bytes = stats.live_bytes.saturating_sub(size_bytes);
        stats.live_allocations = stats.live_allocations.saturating_sub(1);
    }

    fn allocated_bytes(&self) -> usize {
        self.stats.lock().live_bytes
    }
}
