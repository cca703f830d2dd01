//! Scalar operations needed by Hermitian factorizations
//!
//! Every kernel (unblocked panel, triangular solve, rank update) goes through
//! the same three helpers: [`LinalgScalar::mul_conj`] for off-diagonal updates,
//! [`LinalgScalar::abs_sq`] for diagonal updates and
//! [`LinalgScalar::div_real`] for scaling by the factor's diagonal. Using the
//! same helpers in the same order keeps the blocked, recursive and unblocked
//! paths bit-identical.

use super::Element;
use super::complex::{Complex64, Complex128};
use num_traits::Float;

/// Element type that supports Hermitian linear algebra.
///
/// Real types are their own conjugate; for complex types `Real` is the
/// component float type.
pub trait LinalgScalar: Element {
    /// Underlying real type
    type Real: Float + Send + Sync + std::fmt::Debug + 'static;

    /// Real part
    fn real(self) -> Self::Real;

    /// Embed a real value (imaginary part zero)
    fn from_real(r: Self::Real) -> Self;

    /// Complex conjugate (identity for real types)
    fn conj(self) -> Self;

    /// `self * conj(rhs)`
    #[inline]
    fn mul_conj(self, rhs: Self) -> Self {
        self * rhs.conj()
    }

    /// Squared magnitude |self|²
    fn abs_sq(self) -> Self::Real;

    /// Divide by a real scalar
    fn div_real(self, d: Self::Real) -> Self;
}

macro_rules! impl_real_scalar {
    ($ty:ty) => {
        impl LinalgScalar for $ty {
            type Real = $ty;

            #[inline]
            fn real(self) -> Self::Real {
                self
            }

            #[inline]
            fn from_real(r: Self::Real) -> Self {
                r
            }

            #[inline]
            fn conj(self) -> Self {
                self
            }

            #[inline]
            fn abs_sq(self) -> Self::Real {
                self * self
            }

            #[inline]
            fn div_real(self, d: Self::Real) -> Self {
                self / d
            }
        }
    };
}

macro_rules! impl_complex_scalar {
    ($ty:ty, $float:ty) => {
        impl LinalgScalar for $ty {
            type Real = $float;

            #[inline]
            fn real(self) -> Self::Real {
                self.re
            }

            #[inline]
            fn from_real(r: Self::Real) -> Self {
                <$ty>::new(r, 0.0)
            }

            #[inline]
            fn conj(self) -> Self {
                <$ty>::conj(self)
            }

            #[inline]
            fn abs_sq(self) -> Self::Real {
                self.magnitude_squared()
            }

            #[inline]
            fn div_real(self, d: Self::Real) -> Self {
                <$ty>::div_real(self, d)
            }
        }
    };
}

impl_real_scalar!(f32);
impl_real_scalar!(f64);
impl_complex_scalar!(Complex64, f32);
impl_complex_scalar!(Complex128, f64);
