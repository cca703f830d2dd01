//! Triangular solve kernel: `B := B * L^{-H}`

use crate::batch::MatrixView;
use crate::dtype::LinalgScalar;

/// Solve `X * L^H = B` in place for `X` (right side, lower, conjugate
/// transpose, non-unit diagonal).
///
/// `l` is `k × k` lower triangular with a real diagonal, `b` is `m × k`.
///
/// # Safety
/// - `l` and `b` must be valid views; `b` is written, `l` only read
/// - `l` and `b` must not overlap
/// - no other thread may access `b` during the call
pub unsafe fn trsm_right_lower_conj_kernel<T: LinalgScalar>(
    l: &MatrixView<'_, T>,
    b: &MatrixView<'_, T>,
) {
    let m = b.rows();
    let k = b.cols();
    debug_assert_eq!(l.rows(), k);
    debug_assert_eq!(l.cols(), k);

    for c in 0..k {
        for p in 0..c {
            let l_cp = l.get(c, p);
            for i in 0..m {
                b.set(i, c, b.get(i, c) - b.get(i, p).mul_conj(l_cp));
            }
        }
        let d = l.get(c, c).real();
        for i in 0..m {
            b.set(i, c, b.get(i, c).div_real(d));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trsm_recovers_lower_factor_rows() {
        // L = [[2,0],[6,1]], rows below in the full factor: [-8, 5]
        // B = X * L^T with X = [-8, 5] -> B = [-16, -43]
        let mut l = vec![2.0f64, 6.0, 0.0, 1.0];
        let mut b = vec![-16.0f64, -43.0];
        let lv = MatrixView::square(&mut l, 2, 2).unwrap();
        let bv = MatrixView::from_slice(&mut b, 1, 2, 1).unwrap();
        unsafe { trsm_right_lower_conj_kernel(&lv, &bv) };
        assert_eq!(b, vec![-8.0, 5.0]);
    }

    #[test]
    fn test_trsm_empty_rows() {
        let mut l = vec![3.0f64];
        let mut b: Vec<f64> = Vec::new();
        let lv = MatrixView::square(&mut l, 1, 1).unwrap();
        let bv = MatrixView::from_slice(&mut b, 0, 1, 1).unwrap();
        unsafe { trsm_right_lower_conj_kernel(&lv, &bv) };
    }
}
