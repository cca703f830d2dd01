//! Device-resident storage for a batch of matrices

use super::view::required_len;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::runtime::{Allocator, Runtime, RuntimeClient};
#[cfg(feature = "cpu")]
use {super::descriptor::VBatch, super::view::MatrixView, crate::runtime::cpu::CpuRuntime};
use std::fmt;
use std::marker::PhantomData;

/// One contiguous device buffer holding every member of a batch
///
/// Members are column-major and packed back to back, each occupying
/// `ld * (n - 1) + n` elements. The buffer is released on drop.
pub struct BatchStorage<R: Runtime, T: Element> {
    ptr: u64,
    size_bytes: usize,
    offsets: Vec<usize>,
    sizes: Vec<usize>,
    lds: Vec<usize>,
    allocator: R::Allocator,
    device: R::Device,
    _marker: PhantomData<T>,
}

impl<R: Runtime, T: Element> BatchStorage<R, T> {
    /// Allocate device memory for the batch and upload `matrices`.
    ///
    /// `matrices[i]` holds member `i` column-major with leading dimension
    /// `lds[i]`; only the `sizes[i] × sizes[i]` block is transferred.
    pub fn from_host(
        client: &R::Client,
        matrices: &[&[T]],
        sizes: &[usize],
        lds: &[usize],
    ) -> Result<Self> {
        if matrices.len() != sizes.len() {
            return Err(Error::batch_mismatch(matrices.len(), sizes.len()));
        }
        if lds.len() != sizes.len() {
            return Err(Error::invalid_argument(
                "lds",
                format!("{} leading dimensions for {} members", lds.len(), sizes.len()),
            ));
        }

        let mut offsets = Vec::with_capacity(sizes.len());
        let mut total = 0usize;
        for (i, (&n, &ld)) in sizes.iter().zip(lds).enumerate() {
            if ld < n.max(1) {
                return Err(Error::invalid_argument(
                    "lds",
                    format!("member {i}: leading dimension {ld} < max(1, {n})"),
                ));
            }
            let len = required_len(n, n, ld);
            if matrices[i].len() < len {
                return Err(Error::invalid_argument(
                    "matrices",
                    format!("member {i} needs {len} elements, got {}", matrices[i].len()),
                ));
            }
            offsets.push(total);
            total += len;
        }

        let elem_size = std::mem::size_of::<T>();
        let size_bytes = total * elem_size;
        let allocator = client.allocator().clone();
        let device = client.device().clone();
        let ptr = allocator.allocate(size_bytes)?;

        let storage = Self {
            ptr,
            size_bytes,
            offsets,
            sizes: sizes.to_vec(),
            lds: lds.to_vec(),
            allocator,
            device,
            _marker: PhantomData,
        };

        for (i, m) in matrices.iter().enumerate() {
            let len = storage.member_len(i);
            if len == 0 {
                continue;
            }
            let bytes: &[u8] = bytemuck::cast_slice(&m[..len]);
            R::copy_to_device(bytes, storage.member_ptr(i), &storage.device)?;
        }

        log::debug!(
            "Uploaded {} matrices (max order {}) to {} ({} bytes)",
            storage.len(),
            storage.max_n(),
            R::name(),
            size_bytes
        );

        Ok(storage)
    }

    /// Download every member to host memory.
    ///
    /// Member `i` comes back with `ld * (n - 1) + n` elements, column-major.
    pub fn to_host(&self) -> Result<Vec<Vec<T>>> {
        (0..self.len())
            .map(|i| {
                let mut out = vec![T::zero(); self.member_len(i)];
                if !out.is_empty() {
                    let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut out);
                    R::copy_from_device(self.member_ptr(i), bytes, &self.device)?;
                }
                Ok(out)
            })
            .collect()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether the batch has no members
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Per-member orders
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Per-member leading dimensions
    pub fn lds(&self) -> &[usize] {
        &self.lds
    }

    /// Maximum order across the batch
    pub fn max_n(&self) -> usize {
        self.sizes.iter().copied().max().unwrap_or(0)
    }

    /// Bytes held on the device
    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    fn member_len(&self, i: usize) -> usize {
        required_len(self.sizes[i], self.sizes[i], self.lds[i])
    }

    fn member_ptr(&self, i: usize) -> u64 {
        self.ptr + (self.offsets[i] * std::mem::size_of::<T>()) as u64
    }
}

#[cfg(feature = "cpu")]
impl<T: Element> BatchStorage<CpuRuntime, T> {
    /// Views of every member, borrowing the storage mutably.
    pub fn batch(&mut self) -> VBatch<'_, T> {
        let views = (0..self.len())
            .map(|i| {
                let (n, ld) = (self.sizes[i], self.lds[i]);
                let ptr = self.member_ptr(i) as *mut T;
                // SAFETY: CPU device handles are host addresses; member i owns
                // member_len(i) elements at member_ptr(i), disjoint from other
                // members, and `self` stays mutably borrowed for the views' lifetime.
                unsafe { MatrixView::from_raw_parts(ptr, n, n, ld) }
            })
            .collect();
        VBatch::from_validated(views, self.sizes.clone(), self.max_n())
    }
}

impl<R: Runtime, T: Element> fmt::Debug for BatchStorage<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchStorage")
            .field("runtime", &R::name())
            .field("dtype", &T::DTYPE)
            .field("sizes", &self.sizes)
            .field("lds", &self.lds)
            .field("size_bytes", &self.size_bytes)
            .finish()
    }
}

impl<R: Runtime, T: Element> Drop for BatchStorage<R, T> {
    fn drop(&mut self) {
        self.allocator.deallocate(self.ptr, self.size_bytes);
    }
}

#[cfg(all(test, feature = "cpu"))]
mod tests {
    use super::*;
    use crate::runtime::cpu::CpuDevice;

    #[test]
    fn test_upload_download() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);

        let a = vec![1.0f64, 2.0, 3.0, 4.0];
        let b = vec![5.0f64, 6.0, 0.0, 7.0, 8.0, 0.0, 9.0, 10.0, 11.0];
        let storage = BatchStorage::<CpuRuntime, f64>::from_host(
            &client,
            &[a.as_slice(), b.as_slice()],
            &[2, 2],
            &[2, 3],
        )
        .unwrap();

        assert_eq!(storage.len(), 2);
        assert_eq!(storage.max_n(), 2);
        // member 1 stores ld * (n - 1) + n = 5 elements
        assert_eq!(storage.size_bytes(), (4 + 5) * 8);

        let back = storage.to_host().unwrap();
        assert_eq!(back[0], a);
        assert_eq!(back[1], b[..5].to_vec());
    }

    #[test]
    fn test_drop_releases_memory() {
        let device = CpuDevice::new();
        let client = CpuRuntime::default_client(&device);
        let a = vec![1.0f32; 16];
        {
            let mut storage =
                BatchStorage::<CpuRuntime, f32>::from_host(&client, &[a.as_slice()], &[4], &[4])
                    .unwrap();
            assert_eq!(client.allocator().allocated_bytes(), 64);
            let batch = storage.batch();
            assert_eq!(batch.sizes(), &[4]);
        }
        assert_eq!(client.allocator().allocated_bytes(), 0);
    }

    #[test]
    fn test_rejects_bad_leading_dimension() {
        let client = CpuRuntime::default_client(&CpuDevice::new());
        let a = vec![1.0f64; 9];
        let err =
            BatchStorage::<CpuRuntime, f64>::from_host(&client, &[a.as_slice()], &[3], &[2])
                .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "lds", .. }));
    }

    #[test]
    fn test_debug_lists_layout() {
        let client = CpuRuntime::default_client(&CpuDevice::new());
        let a = vec![1.0f64; 4];
        let storage =
            BatchStorage::<CpuRuntime, f64>::from_host(&client, &[a.as_slice()], &[2], &[2])
                .unwrap();
        let text = format!("{storage:?}");
        assert!(text.contains("runtime: \"cpu\""), "{text}");
        assert!(text.contains("sizes: [2]"), "{text}");
        assert!(text.contains("size_bytes: 32"), "{text}");
    }
}
