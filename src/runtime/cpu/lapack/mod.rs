//! CPU implementation of batched Cholesky algorithms
//!
//! This module implements [`BatchedCholeskyAlgorithms`] for [`CpuClient`].
//! Every batch-wide phase is dispatched through the client, so a phase runs
//! on the client's thread pool and completes before the next one starts.

mod potrf;


use super::{CpuClient, CpuRuntime};
use crate::algorithm::cholesky::{
    BatchedCholeskyAlgorithms, CholeskyAlgorithm, PotrfOptions, validate_info_len, validate_uplo,
};
use crate::batch::{InfoArray, Uplo, VBatch};
use crate::dtype::LinalgScalar;
use crate::error::Result;
use potrf::PotrfDriver;

impl BatchedCholeskyAlgorithms<CpuRuntime> for CpuClient {
    fn potrf_vbatched<T: LinalgScalar>(
        &self,
        uplo: Uplo,
        batch: &mut VBatch<'_, T>,
        info: &mut InfoArray,
        gbstep: usize,
        options: &PotrfOptions,
    ) -> Result<()> {
        validate_uplo(uplo, "potrf_vbatched")?;
        validate_info_len(batch.len(), info)?;
        options.validate()?;

        if batch.is_empty() || batch.max_n() == 0 {
            return Ok(());
        }

        let algorithm = options.resolve(batch.max_n());
        log::debug!(
            "{}potrf_vbatched: batch_count={} max_n={} algorithm={:?} nb={} gbstep={}",
            T::DTYPE.blas_prefix(),
            batch.len(),
            batch.max_n(),
            algorithm,
            options.panel_threshold,
            gbstep
        );

        let driver = PotrfDriver::new(self, options.panel_threshold);
        match algorithm {
            CholeskyAlgorithm::Blocked => driver.blocked(
                batch.views(),
                batch.max_n(),
                options.block_size,
                gbstep,
                info,
            )?,
            CholeskyAlgorithm::Recursive | CholeskyAlgorithm::Auto => {
                driver.recursive(batch.views(), batch.max_n(), gbstep, info)?
            }
        }

        log_failures("potrf_vbatched", info);
        Ok(())
    }

    fn potf2_vbatched<T: LinalgScalar>(
        &self,
        uplo: Uplo,
        batch: &mut VBatch<'_, T>,
        info: &mut InfoArray,
        gbstep: usize,
    ) -> Result<()> {
        validate_uplo(uplo, "potf2_vbatched")?;
        validate_info_len(batch.len(), info)?;

        if batch.is_empty() || batch.max_n() == 0 {
            return Ok(());
        }

        log::debug!(
            "{}potf2_vbatched: batch_count={} max_n={} gbstep={}",
            T::DTYPE.blas_prefix(),
            batch.len(),
            batch.max_n(),
            gbstep
        );

        // The panel threshold is irrelevant here: only the panel phase runs.
        PotrfDriver::new(self, 1).panel(batch.views(), gbstep, info);

        log_failures("potf2_vbatched", info);
        Ok(())
    }
}

fn log_failures(op: &str, info: &InfoArray) {
    if log::log_enabled!(log::Level::Debug) {
        let failed = info.failures().count();
        if failed > 0 {
            log::debug!("{op}: {failed} of {} members have non-zero info", info.len());
        }
    }
}
