//! Batched BLAS-3 operations trait

use crate::batch::{InfoArray, MatrixView};
use crate::dtype::LinalgScalar;
use crate::error::{Error, Result};
use crate::runtime::Runtime;

/// Batched level-3 BLAS operations over per-member view arrays
///
/// Member `i` of every array belongs to batch member `i`. Members whose info
/// entry is non-zero are skipped entirely: their views are not read and their
/// memory is not written.
///
/// The written array is taken as `&mut`, so one call has exclusive access to
/// the memory it updates. Sharing a target array between concurrent calls
/// does not compile:
///
/// ```compile_fail
/// use numr_batched::prelude::*;
///
/// let client = CpuClient::new(CpuDevice::new());
/// let mut a = vec![1.0f64];
/// let mut c = vec![2.0f64];
/// let source = [MatrixView::square(&mut a, 1, 1).unwrap()];
/// let mut target = [MatrixView::square(&mut c, 1, 1).unwrap()];
/// let info = InfoArray::new(1);
///
/// std::thread::scope(|s| {
///     s.spawn(|| client.herk_vbatched(&source, &mut target, &info));
///     s.spawn(|| client.herk_vbatched(&source, &mut target, &info));
/// });
/// ```
pub trait BatchedBlasOps<R: Runtime> {
    /// Triangular solve on every live member: `target[i] := target[i] * tri[i]^{-H}`
    ///
    /// `tri[i]` is `k_i × k_i` lower triangular with a real positive diagonal
    /// (a Cholesky factor), `target[i]` is `m_i × k_i`.
    ///
    /// # Errors
    ///
    /// - `BatchMismatch` / `InvalidArgument` if the arrays disagree in length
    ///   or a member's dimensions are inconsistent
    fn trsm_vbatched<T: LinalgScalar>(
        &self,
        tri: &[MatrixView<'_, T>],
        target: &mut [MatrixView<'_, T>],
        info: &InfoArray,
    ) -> Result<()> {
        let _ = (tri, target, info);
        Err(Error::NotImplemented {
            feature: "BatchedBlasOps::trsm_vbatched",
        })
    }

    /// Hermitian rank-k update on every live member:
    /// `target[i] := target[i] - source[i] * source[i]^H` (lower triangle)
    ///
    /// `source[i]` is `m_i × k_i`, `target[i]` is `m_i × m_i`.
    ///
    /// # Errors
    ///
    /// - `BatchMismatch` / `InvalidArgument` if the arrays disagree in length
    ///   or a member's dimensions are inconsistent
    fn herk_vbatched<T: LinalgScalar>(
        &self,
        source: &[MatrixView<'_, T>],
        target: &mut [MatrixView<'_, T>],
        info: &InfoArray,
    ) -> Result<()> {
        let _ = (source, target, info);
        Err(Error::NotImplemented {
            feature: "BatchedBlasOps::herk_vbatched",
        })
    }
}

/// Check that two per-member arrays and the info array describe one batch.
pub(crate) fn validate_batch_arrays<T>(
    first: &[MatrixView<'_, T>],
    second: &[MatrixView<'_, T>],
    info: &InfoArray,
) -> Result<()> {
    if first.len() != second.len() {
        return Err(Error::batch_mismatch(first.len(), second.len()));
    }
    if info.len() != first.len() {
        return Err(Error::invalid_argument(
            "info",
            format!("{} info entries for {} members", info.len(), first.len()),
        ));
    }
    Ok(())
}
