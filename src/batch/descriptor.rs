//! Variable-size batch descriptor

use super::view::MatrixView;
use crate::error::{Error, Result};

/// Batch of square matrices of possibly different orders
///
/// Holds one view per member, the per-member orders and their maximum. The
/// maximum drives the uniform phase structure of batched kernels: every phase
/// is expressed against `max_n` and each member clamps it to its own order.
///
/// # Invariants
///
/// - `views.len() == sizes.len()`
/// - `views[i]` is `sizes[i] × sizes[i]`
/// - `max_n == max(sizes)` (0 for an empty batch)
#[derive(Debug)]
pub struct VBatch<'a, T> {
    views: Vec<MatrixView<'a, T>>,
    sizes: Vec<usize>,
    max_n: usize,
}

impl<'a, T> VBatch<'a, T> {
    /// Build a batch from square views, deriving sizes and maximum order.
    pub fn new(views: Vec<MatrixView<'a, T>>) -> Result<Self> {
        for (i, v) in views.iter().enumerate() {
            if v.rows() != v.cols() {
                return Err(Error::invalid_argument(
                    "views",
                    format!("member {i} is {}x{}, expected a square matrix", v.rows(), v.cols()),
                ));
            }
        }
        let sizes: Vec<usize> = views.iter().map(|v| v.rows()).collect();
        let max_n = sizes.iter().copied().max().unwrap_or(0);
        Ok(Self {
            views,
            sizes,
            max_n,
        })
    }

    /// Build a batch from its three parts, checking they agree.
    pub fn from_parts(
        views: Vec<MatrixView<'a, T>>,
        sizes: Vec<usize>,
        max_n: usize,
    ) -> Result<Self> {
        if views.len() != sizes.len() {
            return Err(Error::batch_mismatch(views.len(), sizes.len()));
        }
        for (i, (v, &n)) in views.iter().zip(&sizes).enumerate() {
            if v.rows() != n || v.cols() != n {
                return Err(Error::invalid_argument(
                    "sizes",
                    format!("member {i} has order {n} but its view is {}x{}", v.rows(), v.cols()),
                ));
            }
        }
        let actual_max = sizes.iter().copied().max().unwrap_or(0);
        if actual_max != max_n {
            return Err(Error::invalid_argument(
                "max_n",
                format!("declared maximum order {max_n}, actual maximum {actual_max}"),
            ));
        }
        Ok(Self {
            views,
            sizes,
            max_n,
        })
    }

    /// Assemble a batch whose invariants the caller already guarantees.
    pub(crate) fn from_validated(
        views: Vec<MatrixView<'a, T>>,
        sizes: Vec<usize>,
        max_n: usize,
    ) -> Self {
        debug_assert_eq!(views.len(), sizes.len());
        Self {
            views,
            sizes,
            max_n,
        }
    }

    /// Build a batch from `(storage, order, leading dimension)` triples.
    pub fn from_matrices<I>(matrices: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a mut [T], usize, usize)>,
    {
        let views = matrices
            .into_iter()
            .map(|(data, n, ld)| MatrixView::square(data, n, ld))
            .collect::<Result<Vec<_>>>()?;
        Self::new(views)
    }

    /// Build a fixed-size batch: every member is `n × n` with stride `ld`.
    pub fn uniform<I>(matrices: I, n: usize, ld: usize) -> Result<Self>
    where
        I: IntoIterator<Item = &'a mut [T]>,
    {
        Self::from_matrices(matrices.into_iter().map(|data| (data, n, ld)))
    }

    /// Number of members
    #[inline]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether the batch has no members
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Per-member orders
    #[inline]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Maximum order across the batch
    #[inline]
    pub fn max_n(&self) -> usize {
        self.max_n
    }

    /// Per-member views
    #[inline]
    pub fn views(&self) -> &[MatrixView<'a, T>] {
        &self.views
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes_and_max() {
        let mut a = vec![0.0f64; 9];
        let mut b = vec![0.0f64; 25];
        let mut c: Vec<f64> = Vec::new();
        let batch =
            VBatch::from_matrices([(&mut a[..], 3, 3), (&mut b[..], 5, 5), (&mut c[..], 0, 1)])
                .unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.sizes(), &[3, 5, 0]);
        assert_eq!(batch.max_n(), 5);
    }

    #[test]
    fn test_empty_batch() {
        let batch: VBatch<'_, f32> = VBatch::new(Vec::new()).unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch.max_n(), 0);
    }

    #[test]
    fn test_from_parts_rejects_mismatch() {
        let mut a = vec![0.0f64; 4];

        let view = MatrixView::square(&mut a, 2, 2).unwrap();
        let err = VBatch::from_parts(vec![view], vec![2, 2], 2).unwrap_err();
        assert!(matches!(err, Error::BatchMismatch { views: 1, sizes: 2 }));

        let view = MatrixView::square(&mut a, 2, 2).unwrap();
        let err = VBatch::from_parts(vec![view], vec![3], 3).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "sizes", .. }));

        let view = MatrixView::square(&mut a, 2, 2).unwrap();
        let err = VBatch::from_parts(vec![view], vec![2], 4).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "max_n", .. }));

        let view = MatrixView::square(&mut a, 2, 2).unwrap();
        assert!(VBatch::from_parts(vec![view], vec![2], 2).is_ok());
    }

    #[test]
    fn test_rejects_rectangular_view() {
        let mut a = vec![0.0f64; 6];
        let view = MatrixView::from_slice(&mut a, 2, 3, 2).unwrap();
        assert!(VBatch::new(vec![view]).is_err());
    }
}
