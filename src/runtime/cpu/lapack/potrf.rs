//! Batch-wide Cholesky drivers
//!
//! Each driver issues a fixed sequence of batch-wide phases (panel, trsm,
//! herk) determined only by the batch's maximum order. Members clamp every
//! phase's block to their own order, so a small member simply sees empty
//! blocks once the driver has moved past it.

use super::super::CpuClient;
use super::super::kernels::potf2_lower_kernel;
use crate::algorithm::cholesky::{info_code, recursive_split};
use crate::batch::{InfoArray, MatrixView, record_failure};
use crate::dtype::LinalgScalar;
use crate::error::Result;
use crate::ops::BatchedBlasOps;

/// Per-member blocks of one split, as batch-wide arrays.
struct SplitBlocks<'a, T> {
    a11: Vec<MatrixView<'a, T>>,
    a21: Vec<MatrixView<'a, T>>,
    a22: Vec<MatrixView<'a, T>>,
}

impl<'a, T> SplitBlocks<'a, T> {
    /// Split every member's block at offset `j` into the diagonal block of
    /// width `w`, the rows below it and the trailing block.
    ///
    /// Member blocks are clamped to the member's order: a member of order `m`
    /// gets `min(w, m - j)` columns, or empty blocks when `j >= m`.
    fn new(blocks: &[MatrixView<'a, T>], j: usize, w: usize) -> Self {
        let mut a11 = Vec::with_capacity(blocks.len());
        let mut a21 = Vec::with_capacity(blocks.len());
        let mut a22 = Vec::with_capacity(blocks.len());

        for block in blocks {
            let n = block.rows();
            let j0 = j.min(n);
            let k = (n - j0).min(w);
            let rest = n - j0 - k;
            // SAFETY: the three blocks lie inside `block` and are disjoint.
            unsafe {
                a11.push(block.diagonal_block(j0, k));
                a21.push(block.submatrix(j0 + k, j0, rest, k));
                a22.push(block.submatrix(j0 + k, j0 + k, rest, rest));
            }
        }

        Self { a11, a21, a22 }
    }
}

/// Batched Cholesky drivers bound to one client and panel threshold.
pub(crate) struct PotrfDriver<'c> {
    client: &'c CpuClient,
    nb: usize,
}

impl<'c> PotrfDriver<'c> {
    /// `panel_threshold` must be at least 1.
    pub(crate) fn new(client: &'c CpuClient, panel_threshold: usize) -> Self {
        debug_assert!(panel_threshold > 0);
        Self {
            client,
            nb: panel_threshold,
        }
    }

    /// Unblocked phase: factorize every live member's block with `potf2`.
    ///
    /// A failure at local column `k` records `gbstep + k`.
    pub(crate) fn panel<T: LinalgScalar>(
        &self,
        blocks: &[MatrixView<'_, T>],
        gbstep: usize,
        info: &mut InfoArray,
    ) {
        self.client.dispatch_batch(info.as_mut_slice(), |i, status| {
            let block = &blocks[i];
            if *status != 0 || block.is_empty() {
                return;
            }
            // SAFETY: member i's block is accessed only by this task.
            if let Err(k) = unsafe { potf2_lower_kernel(block) } {
                record_failure(status, info_code(gbstep + k));
            }
        });
    }

    /// Recursive driver over square blocks of order at most `w`.
    ///
    /// `w` is the largest block order in the batch at this level; `gbstep` is
    /// the global column of the blocks' first column.
    pub(crate) fn recursive<T: LinalgScalar>(
        &self,
        blocks: &[MatrixView<'_, T>],
        w: usize,
        gbstep: usize,
        info: &mut InfoArray,
    ) -> Result<()> {
        if w == 0 {
            return Ok(());
        }
        if w <= self.nb {
            self.panel(blocks, gbstep, info);
            return Ok(());
        }

        let p = recursive_split(w, self.nb);
        log::trace!("potrf recursion: w={w} p={p} gbstep={gbstep}");

        let mut split = SplitBlocks::new(blocks, 0, p);
        self.recursive(&split.a11, p, gbstep, info)?;
        self.client.trsm_vbatched(&split.a11, &mut split.a21, info)?;
        self.client.herk_vbatched(&split.a21, &mut split.a22, info)?;
        self.recursive(&split.a22, w - p, gbstep + p, info)
    }

    /// Right-looking blocked driver over full members of order at most `max_n`.
    ///
    /// Each diagonal block of width `block_size` is factorized by the
    /// recursive driver, then the rows below it are solved and the trailing
    /// matrix updated.
    pub(crate) fn blocked<T: LinalgScalar>(
        &self,
        members: &[MatrixView<'_, T>],
        max_n: usize,
        block_size: usize,
        gbstep: usize,
        info: &mut InfoArray,
    ) -> Result<()> {
        for j in (0..max_n).step_by(block_size) {
            let jb = block_size.min(max_n - j);
            log::trace!("potrf block: j={j} jb={jb} gbstep={}", gbstep + j);

            let mut split = SplitBlocks::new(members, j, jb);
            self.recursive(&split.a11, jb, gbstep + j, info)?;
            if j + jb < max_n {
                self.client.trsm_vbatched(&split.a11, &mut split.a21, info)?;
                self.client.herk_vbatched(&split.a21, &mut split.a22, info)?;
            }
        }
        Ok(())
    }
}
