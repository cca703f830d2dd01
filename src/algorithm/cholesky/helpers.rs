//! Validation and recursion helpers shared by the batched Cholesky backends

use crate::batch::{InfoArray, Uplo};
use crate::error::{Error, Result};

/// Reject triangular modes the engine does not implement.
///
/// Only [`Uplo::Lower`] is supported. `Upper` is reported through a `warn!`
/// diagnostic and an [`Error::UnsupportedUplo`].
pub fn validate_uplo(uplo: Uplo, op: &'static str) -> Result<()> {
    match uplo {
        Uplo::Lower => Ok(()),
        Uplo::Upper => {
            log::warn!("{op}: uplo = '{}' is not supported", uplo.as_char());
            Err(Error::unsupported_uplo(uplo, op))
        }
    }
}

/// Check that the info array has one entry per batch member.
pub fn validate_info_len(batch_count: usize, info: &InfoArray) -> Result<()> {
    if info.len() != batch_count {
        return Err(Error::invalid_argument(
            "info",
            format!(
                "expected {batch_count} entries (one per member), got {}",
                info.len()
            ),
        ));
    }
    Ok(())
}

/// Leading block order of one recursive split of a width-`w` block.
///
/// Returns `max(nb, round_up(w / 2, nb))`. For `w > nb >= 1` the result
/// satisfies `0 < p < w`, so both halves are non-empty and the recursion
/// terminates.
pub fn recursive_split(w: usize, nb: usize) -> usize {
    let half = w / 2;
    let rounded = half.div_ceil(nb) * nb;
    rounded.max(nb)
}

/// Info code for a failure at 1-based global column `minor`.
///
/// Saturates at `i32::MAX` so an out-of-range index still reads as a failure.
#[inline]
pub fn info_code(minor: usize) -> i32 {
    i32::try_from(minor).unwrap_or(i32::MAX)
}
