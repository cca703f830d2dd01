//! Hermitian rank-k update kernel: `C := C - A * A^H`

use crate::batch::MatrixView;
use crate::dtype::LinalgScalar;

/// Lower-triangular Hermitian rank-k update `C := C - A * A^H`.
///
/// `a` is `m × k`, `c` is `m × m`; only the lower triangle of `c` is
/// touched. The imaginary part of the diagonal of `c` is reset to zero.
///
/// # Safety
/// - `a` and `c` must be valid views; `c` is written, `a` only read
/// - `a` and `c` must not overlap
/// - no other thread may access `c` during the call
pub unsafe fn herk_lower_kernel<T: LinalgScalar>(a: &MatrixView<'_, T>, c: &MatrixView<'_, T>) {
    let m = c.rows();
    let k = a.cols();
    debug_assert_eq!(c.cols(), m);
    debug_assert_eq!(a.rows(), m);

    for j in 0..m {
        for p in 0..k {
            let a_jp = a.get(j, p);
            c.set(j, j, T::from_real(c.get(j, j).real() - a_jp.abs_sq()));
            for i in (j + 1)..m {
                c.set(i, j, c.get(i, j) - a.get(i, p).mul_conj(a_jp));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::Complex64;

    #[test]
    fn test_herk_lower_only() {
        // A = [[1, 2], [3, 4]] (column-major [1, 3, 2, 4]); A A^T = [[5, 11], [11, 25]]
        let mut a = vec![1.0f64, 3.0, 2.0, 4.0];
        let mut c = vec![10.0f64, 20.0, 99.0, 30.0];
        let av = MatrixView::square(&mut a, 2, 2).unwrap();
        let cv = MatrixView::square(&mut c, 2, 2).unwrap();
        unsafe { herk_lower_kernel(&av, &cv) };
        assert_eq!(c, vec![5.0, 9.0, 99.0, 5.0]);
    }

    #[test]
    fn test_herk_complex_diagonal_is_real() {
        let mut a = vec![Complex64::new(1.0, 1.0)];
        let mut c = vec![Complex64::new(5.0, 0.5)];
        let av = MatrixView::square(&mut a, 1, 1).unwrap();
        let cv = MatrixView::square(&mut c, 1, 1).unwrap();
        unsafe { herk_lower_kernel(&av, &cv) };
        assert_eq!(c[0], Complex64::new(3.0, 0.0));
    }
}
