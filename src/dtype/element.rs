//! Element trait for mapping Rust types to DType

use super::DType;
use super::complex::{Complex64, Complex128};
use bytemuck::{Pod, Zeroable};
use std::ops::{Add, Mul, Sub};

/// Trait for types that can be stored in a batch member's matrix
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - elements are moved freely between workers
/// - `Pod + Zeroable` - byte-level host/device transfers (bytemuck)
/// - `Add + Sub + Mul` - arithmetic shared by real and complex types
///
/// `Div` is intentionally absent: the factorization only ever divides by a
/// real diagonal, see [`LinalgScalar::div_real`](super::LinalgScalar::div_real).
pub trait Element:
    Copy
    + Send
    + Sync
    + Pod
    + Zeroable
    + PartialEq
    + std::fmt::Debug
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;
}

macro_rules! impl_element {
    ($ty:ty, $dtype:ident, $zero:expr, $one:expr) => {
        impl Element for $ty {
            const DTYPE: DType = DType::$dtype;

            #[inline]
            fn zero() -> Self {
                $zero
            }

            #[inline]
            fn one() -> Self {
                $one
            }
        }
    };
}

impl_element!(f64, F64, 0.0, 1.0);
impl_element!(f32, F32, 0.0, 1.0);
impl_element!(Complex64, Complex64, Complex64::ZERO, Complex64::ONE);
impl_element!(Complex128, Complex128, Complex128::ZERO, Complex128::ONE);
