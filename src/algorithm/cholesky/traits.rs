//! Batched Cholesky algorithm trait definitions

use super::helpers::validate_uplo;
use super::options::PotrfOptions;
use crate::batch::{InfoArray, Uplo, VBatch};
use crate::dtype::{Complex64, Complex128, LinalgScalar};
use crate::error::{Error, Result};
use crate::runtime::Runtime;

/// Generates the precision-prefixed entry points (`dpotrf_vbatched`, ...).
///
/// Each alias is a parallel instantiation of the generic method with the
/// default [`PotrfOptions`].
macro_rules! precision_entry_points {
    ($($prefix:ident => $ty:ty),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = concat!(
                    "[`potrf_vbatched`](Self::potrf_vbatched) on `",
                    stringify!($ty),
                    "` members with default options"
                )]
                fn [<$prefix potrf_vbatched>](
                    &self,
                    uplo: Uplo,
                    batch: &mut VBatch<'_, $ty>,
                    info: &mut InfoArray,
                    gbstep: usize,
                ) -> Result<()> {
                    self.potrf_vbatched(uplo, batch, info, gbstep, &PotrfOptions::default())
                }
            )*
        }
    };
}

/// Variable-size batched Cholesky factorization
///
/// Factorizes every member `A_i` of a batch of Hermitian positive-definite
/// matrices in place as `A_i = L_i · L_iᴴ`, overwriting the lower triangle
/// with `L_i`. The strict upper triangle is never read or written.
///
/// # Algorithm
///
/// The recursion runs over the batch's *maximum* order. Every member clamps
/// the current block to its own order, so all members go through the same
/// sequence of batch-wide phases:
///
/// ```text
/// potrf(blocks, w, gbstep):
///     if w <= nb: potf2 on every live member, failure -> info = gbstep + k
///     else:
///         p = max(nb, round_up(w / 2, nb))
///         potrf(A11, p, gbstep)
///         A21 := A21 · L11^{-H}            (trsm, live members)
///         A22 := A22 - A21 · A21^H         (herk, live members)
///         potrf(A22, w - p, gbstep + p)
/// ```
///
/// # Per-member outcomes
///
/// Numerical failures are data, not errors. Entry `i` of the info array is
/// `0` on success and `k > 0` when the leading `k × k` minor (global column
/// numbering including `gbstep`) is not positive-definite. The first non-zero
/// code of a member wins: a member whose entry is non-zero on entry is left
/// untouched, and a failed member receives no further updates.
pub trait BatchedCholeskyAlgorithms<R: Runtime> {
    /// Variable-size batched Cholesky factorization (lower triangle)
    ///
    /// # Arguments
    ///
    /// * `uplo` - Triangle holding the data; only [`Uplo::Lower`] is supported
    /// * `batch` - Members to factorize in place
    /// * `info` - One entry per member, updated with per-member outcomes
    /// * `gbstep` - Global column offset added to reported failure indices
    /// * `options` - Panel threshold and driver selection
    ///
    /// # Errors
    ///
    /// - `UnsupportedUplo` for [`Uplo::Upper`], before anything is written
    /// - `InvalidArgument` if `info` has the wrong length or `options` are invalid
    ///
    /// An empty batch, or one whose members all have order 0, succeeds
    /// without touching memory.
    fn potrf_vbatched<T: LinalgScalar>(
        &self,
        uplo: Uplo,
        batch: &mut VBatch<'_, T>,
        info: &mut InfoArray,
        gbstep: usize,
        options: &PotrfOptions,
    ) -> Result<()> {
        let _ = (uplo, batch, info, gbstep, options);
        Err(Error::NotImplemented {
            feature: "BatchedCholeskyAlgorithms::potrf_vbatched",
        })
    }

    /// Unblocked batched Cholesky factorization
    ///
    /// Runs the column-by-column factorizer on every live member in a single
    /// batch-wide phase. Produces results bit-identical to
    /// [`potrf_vbatched`](Self::potrf_vbatched) and is the reference the
    /// recursive driver is checked against.
    ///
    /// # Errors
    ///
    /// Same invocation errors as [`potrf_vbatched`](Self::potrf_vbatched).
    fn potf2_vbatched<T: LinalgScalar>(
        &self,
        uplo: Uplo,
        batch: &mut VBatch<'_, T>,
        info: &mut InfoArray,
        gbstep: usize,
    ) -> Result<()> {
        let _ = (uplo, batch, info, gbstep);
        Err(Error::NotImplemented {
            feature: "BatchedCholeskyAlgorithms::potf2_vbatched",
        })
    }

    /// Fixed-size batched Cholesky factorization
    ///
    /// Every member must have order `n`. Forwards to
    /// [`potrf_vbatched`](Self::potrf_vbatched).
    ///
    /// # Errors
    ///
    /// - `UnsupportedUplo` for [`Uplo::Upper`]
    /// - `InvalidArgument` if a member's order differs from `n`
    fn potrf_batched<T: LinalgScalar>(
        &self,
        uplo: Uplo,
        n: usize,
        batch: &mut VBatch<'_, T>,
        info: &mut InfoArray,
        gbstep: usize,
        options: &PotrfOptions,
    ) -> Result<()> {
        validate_uplo(uplo, "potrf_batched")?;
        if let Some((i, m)) = batch.sizes().iter().enumerate().find(|&(_, &m)| m != n) {
            return Err(Error::invalid_argument(
                "batch",
                format!("member {i} has order {m}, expected uniform order {n}"),
            ));
        }
        self.potrf_vbatched(uplo, batch, info, gbstep, options)
    }

    precision_entry_points! {
        s => f32,
        d => f64,
        c => Complex64,
        z => Complex128,
    }
}
