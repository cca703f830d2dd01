//! CPU implementation of batched BLAS operations

use super::kernels::{herk_lower_kernel, trsm_right_lower_conj_kernel};
use super::{CpuClient, CpuRuntime};
use crate::batch::{InfoArray, MatrixView};
use crate::dtype::LinalgScalar;
use crate::error::{Error, Result};
use crate::ops::BatchedBlasOps;
use crate::ops::traits::validate_batch_arrays;

impl BatchedBlasOps<CpuRuntime> for CpuClient {
    fn trsm_vbatched<T: LinalgScalar>(
        &self,
        tri: &[MatrixView<'_, T>],
        target: &mut [MatrixView<'_, T>],
        info: &InfoArray,
    ) -> Result<()> {
        validate_batch_arrays(tri, target, info)?;
        for (i, (l, b)) in tri.iter().zip(target.iter()).enumerate() {
            if info.is_live(i) && (l.rows() != l.cols() || b.cols() != l.rows()) {
                return Err(Error::invalid_argument(
                    "target",
                    format!(
                        "member {i}: {}x{} block against {}x{} triangle",
                        b.rows(),
                        b.cols(),
                        l.rows(),
                        l.cols()
                    ),
                ));
            }
        }

        let target: &[MatrixView<'_, T>] = target;
        self.dispatch_live(info.as_slice(), |i| {
            if target[i].is_empty() {
                return;
            }
            // SAFETY: member i's target is written only by this task, and
            // triangle and target are distinct blocks of that member.
            unsafe { trsm_right_lower_conj_kernel(&tri[i], &target[i]) }
        });
        Ok(())
    }

    fn herk_vbatched<T: LinalgScalar>(
        &self,
        source: &[MatrixView<'_, T>],
        target: &mut [MatrixView<'_, T>],
        info: &InfoArray,
    ) -> Result<()> {
        validate_batch_arrays(source, target, info)?;
        for (i, (a, c)) in source.iter().zip(target.iter()).enumerate() {
            if info.is_live(i) && (c.rows() != c.cols() || a.rows() != c.rows()) {
                return Err(Error::invalid_argument(
                    "target",
                    format!(
                        "member {i}: {}x{} update against {}x{} source",
                        c.rows(),
                        c.cols(),
                        a.rows(),
                        a.cols()
                    ),
                ));
            }
        }

        let target: &[MatrixView<'_, T>] = target;
        self.dispatch_live(info.as_slice(), |i| {
            if target[i].is_empty() {
                return;
            }
            // SAFETY: member i's target is written only by this task, and
            // source and target are distinct blocks of that member.
            unsafe { herk_lower_kernel(&source[i], &target[i]) }
        });
        Ok(())
    }
}
