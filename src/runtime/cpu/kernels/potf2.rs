//! Unblocked lower Cholesky kernel

use crate::batch::MatrixView;
use crate::dtype::LinalgScalar;
use num_traits::{Float, Zero};

/// Unblocked, right-looking Cholesky factorization of the lower triangle of
/// an `n × n` view: `A = L * L^H`.
///
/// On success the lower triangle holds `L` (real positive diagonal). The
/// strict upper triangle is neither read nor written.
///
/// Returns `Err(k)` with the 1-based column `k` whose updated diagonal has a
/// real part that is not strictly positive (or is NaN). Columns `k..n` are
/// left unfactorized: column `k` itself is not written.
///
/// # Safety
/// - `a` must be square and valid for reads and writes
/// - no other thread may access `a` during the call
pub unsafe fn potf2_lower_kernel<T: LinalgScalar>(a: &MatrixView<'_, T>) -> Result<(), usize> {
    let n = a.rows();
    debug_assert_eq!(n, a.cols());

    for c in 0..n {
        let d = a.get(c, c).real();
        // `!(d > 0)` also rejects NaN
        if !(d > T::Real::zero()) {
            return Err(c + 1);
        }
        let l = d.sqrt();
        a.set(c, c, T::from_real(l));

        for i in (c + 1)..n {
            a.set(i, c, a.get(i, c).div_real(l));
        }

        // Rank-1 update of the trailing lower triangle
        for j in (c + 1)..n {
            let l_jc = a.get(j, c);
            a.set(j, j, T::from_real(a.get(j, j).real() - l_jc.abs_sq()));
            for i in (j + 1)..n {
                a.set(i, j, a.get(i, j) - a.get(i, c).mul_conj(l_jc));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Complex128;

    #[test]
    fn test_potf2_3x3_exact() {
        // A = L L^T with L = [[2,0,0],[6,1,0],[-8,5,3]]
        #[rustfmt::skip]
        let mut a = vec![
            4.0, 12.0, -16.0,
            12.0, 37.0, -43.0,
            -16.0, -43.0, 98.0,
        ];
        let view = MatrixView::square(&mut a, 3, 3).unwrap();
        unsafe { potf2_lower_kernel(&view) }.unwrap();

        // column-major lower triangle
        assert_eq!(a[0], 2.0);
        assert_eq!(a[1], 6.0);
        assert_eq!(a[2], -8.0);
        assert_eq!(a[4], 1.0);
        assert_eq!(a[5], 5.0);
        assert_eq!(a[8], 3.0);
        // strict upper triangle untouched
        assert_eq!(a[3], 12.0);
        assert_eq!(a[6], -16.0);
        assert_eq!(a[7], -43.0);
    }

    #[test]
    fn test_potf2_reports_failing_column() {
        let mut a = vec![1.0f64, 2.0, 2.0, 1.0];
        let view = MatrixView::square(&mut a, 2, 2).unwrap();
        assert_eq!(unsafe { potf2_lower_kernel(&view) }, Err(2));
        // column 2 diagonal holds the updated (negative) value, not a sqrt
        assert_eq!(a[3], -3.0);
    }

    #[test]
    fn test_potf2_rejects_nan() {
        let mut a = vec![f32::NAN];
        let view = MatrixView::square(&mut a, 1, 1).unwrap();
        assert_eq!(unsafe { potf2_lower_kernel(&view) }, Err(1));
    }

    #[test]
    fn test_potf2_zero_order() {
        let mut a: Vec<f64> = Vec::new();
        let view = MatrixView::square(&mut a, 0, 1).unwrap();
        assert_eq!(unsafe { potf2_lower_kernel(&view) }, Ok(()));
    }

    #[test]
    fn test_potf2_hermitian_2x2() {
        // A = [[4, 2-2i], [2+2i, 6]] -> L = [[2, 0], [1+i, 2]]
        let mut a = vec![
            Complex128::new(4.0, 0.0),
            Complex128::new(2.0, 2.0),
            Complex128::new(2.0, -2.0),
            Complex128::new(6.0, 0.0),
        ];
        let view = MatrixView::square(&mut a, 2, 2).unwrap();
        unsafe { potf2_lower_kernel(&view) }.unwrap();
        assert_eq!(a[0], Complex128::new(2.0, 0.0));
        assert_eq!(a[1], Complex128::new(1.0, 1.0));
        assert_eq!(a[3], Complex128::new(2.0, 0.0));
    }
}
