//! Column-major matrix views over caller-owned memory

use crate::error::{Error, Result};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Lightweight descriptor of a column-major matrix in device memory
///
/// Element `(i, j)` lives at `ptr + i + j * ld`. The view never owns the
/// memory; `'a` ties it to the caller's storage. Views built by the safe
/// constructors each hold a unique mutable borrow, so distinct views never
/// overlap. Sub-views (panel, below-panel, trailing block) are carved out
/// with the `unsafe` [`MatrixView::submatrix`], and element access is `unsafe`
/// because such sub-views alias one allocation.
///
/// # Invariant
///
/// `ld >= max(1, rows)` and the storage covers `ld * (cols - 1) + rows`
/// elements. The safe constructors check this; the raw constructor makes it
/// the caller's responsibility.
pub struct MatrixView<'a, T> {
    ptr: NonNull<T>,
    rows: usize,
    cols: usize,
    ld: usize,
    _marker: PhantomData<&'a mut [T]>,
}

impl<T> std::fmt::Debug for MatrixView<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixView")
            .field("ptr", &self.ptr)
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("ld", &self.ld)
            .finish()
    }
}

// SAFETY: a view is a plain descriptor. Batched kernels hand each member's
// views to exactly one worker, so no element is touched by two threads.
unsafe impl<T: Send> Send for MatrixView<'_, T> {}
unsafe impl<T: Send> Sync for MatrixView<'_, T> {}

impl<'a, T> MatrixView<'a, T> {
    /// View `rows × cols` elements of `data` with leading dimension `ld`.
    pub fn from_slice(data: &'a mut [T], rows: usize, cols: usize, ld: usize) -> Result<Self> {
        if ld < rows.max(1) {
            return Err(Error::invalid_argument(
                "ld",
                format!("leading dimension {ld} is smaller than max(1, {rows})"),
            ));
        }
        let required = required_len(rows, cols, ld);
        if data.len() < required {
            return Err(Error::invalid_argument(
                "data",
                format!(
                    "{rows}x{cols} matrix with ld {ld} needs {required} elements, got {}",
                    data.len()
                ),
            ));
        }

        // SAFETY: bounds checked above and the slice is borrowed mutably for 'a
        Ok(unsafe { Self::from_raw_parts(data.as_mut_ptr(), rows, cols, ld) })
    }

    /// View a square `n × n` matrix stored with leading dimension `ld`.
    pub fn square(data: &'a mut [T], n: usize, ld: usize) -> Result<Self> {
        Self::from_slice(data, n, n, ld)
    }

    /// Build a view from a raw device pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads and writes of `ld * (cols - 1) + rows`
    /// elements for `'a`, `ld >= max(1, rows)`, and no other live view may
    /// write the same memory concurrently.
    pub unsafe fn from_raw_parts(ptr: *mut T, rows: usize, cols: usize, ld: usize) -> Self {
        Self {
            ptr: NonNull::new(ptr).unwrap_or(NonNull::dangling()),
            rows,
            cols,
            ld,
            _marker: PhantomData,
        }
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Leading dimension (column stride in elements)
    #[inline]
    pub fn ld(&self) -> usize {
        self.ld
    }

    /// Whether the view covers no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Base pointer
    #[inline]
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Sub-block of `rows × cols` elements starting at `(i, j)`.
    ///
    /// Empty sub-blocks are allowed anywhere inside or on the edge of the
    /// view and never dereference their pointer.
    ///
    /// # Safety
    ///
    /// The block must lie inside this view when non-empty. The result
    /// aliases `self`.
    #[inline]
    pub unsafe fn submatrix(&self, i: usize, j: usize, rows: usize, cols: usize) -> Self {
        debug_assert!(rows == 0 || cols == 0 || (i + rows <= self.rows && j + cols <= self.cols));
        if rows == 0 || cols == 0 {
            return Self {
                ptr: self.ptr,
                rows,
                cols,
                ld: self.ld,
                _marker: PhantomData,
            };
        }
        Self {
            // SAFETY: (i, j) is inside the view per the caller contract
            ptr: unsafe { NonNull::new_unchecked(self.ptr.as_ptr().add(i + j * self.ld)) },
            rows,
            cols,
            ld: self.ld,
            _marker: PhantomData,
        }
    }

    /// Square diagonal block `[j, j + n) × [j, j + n)`.
    ///
    /// # Safety
    ///
    /// Same contract as [`MatrixView::submatrix`].
    #[inline]
    pub unsafe fn diagonal_block(&self, j: usize, n: usize) -> Self {
        unsafe { self.submatrix(j, j, n, n) }
    }
}

impl<T: Copy> MatrixView<'_, T> {
    /// Read element `(i, j)`.
    ///
    /// # Safety
    ///
    /// `i < rows`, `j < cols`, and no other thread writes the element.
    #[inline(always)]
    pub unsafe fn get(&self, i: usize, j: usize) -> T {
        unsafe { *self.ptr.as_ptr().add(i + j * self.ld) }
    }

    /// Write element `(i, j)`.
    ///
    /// # Safety
    ///
    /// `i < rows`, `j < cols`, and no other thread accesses the element.
    #[inline(always)]
    pub unsafe fn set(&self, i: usize, j: usize, value: T) {
        unsafe { *self.ptr.as_ptr().add(i + j * self.ld) = value }
    }
}

/// Elements spanned by a column-major `rows × cols` matrix with stride `ld`.
#[inline]
pub(crate) fn required_len(rows: usize, cols: usize, ld: usize) -> usize {
    if rows == 0 || cols == 0 {
        0
    } else {
        ld * (cols - 1) + rows
    }
}
