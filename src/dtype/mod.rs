//! Data type system for batched factorizations
//!
//! The four working precisions of a batched call: real/complex in single and
//! double precision. Each precision is a separate monomorphized instantiation
//! of the same generic code; [`DType`] only names it at runtime (logging,
//! BLAS-style precision prefixes).

pub mod complex;
mod element;
mod scalar;

pub use complex::{Complex64, Complex128};
pub use element::Element;
pub use scalar::LinalgScalar;

use std::fmt;

/// Working precisions supported by the batched kernels
///
/// # Discriminant Values (Serialization Stability)
///
/// Discriminants follow the numr dtype table:
/// - Floats: F64=0, F32=1
/// - Complex: Complex64=40, Complex128=41
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DType {
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point
    F32 = 1,
    /// Complex number with two f32 parts
    Complex64 = 40,
    /// Complex number with two f64 parts
    Complex128 = 41,
}

impl DType {
    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            DType::F32 => 4,
            DType::F64 | DType::Complex64 => 8,
            DType::Complex128 => 16,
        }
    }

    /// Whether elements carry an imaginary part
    #[inline]
    pub const fn is_complex(self) -> bool {
        matches!(self, DType::Complex64 | DType::Complex128)
    }

    /// BLAS/LAPACK precision prefix (`s`, `d`, `c`, `z`)
    #[inline]
    pub const fn blas_prefix(self) -> char {
        match self {
            DType::F32 => 's',
            DType::F64 => 'd',
            DType::Complex64 => 'c',
            DType::Complex128 => 'z',
        }
    }

    /// Short lowercase name
    pub const fn short_name(self) -> &'static str {
        match self {
            DType::F64 => "f64",
            DType::F32 => "f32",
            DType::Complex64 => "c64",
            DType::Complex128 => "c128",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_sizes() {
        assert_eq!(DType::F32.size_in_bytes(), std::mem::size_of::<f32>());
        assert_eq!(DType::F64.size_in_bytes(), std::mem::size_of::<f64>());
        assert_eq!(
            DType::Complex64.size_in_bytes(),
            std::mem::size_of::<Complex64>()
        );
        assert_eq!(
            DType::Complex128.size_in_bytes(),
            std::mem::size_of::<Complex128>()
        );
    }

    #[test]
    fn test_blas_prefix() {
        let prefixes: String = [DType::F32, DType::F64, DType::Complex64, DType::Complex128]
            .iter()
            .map(|d| d.blas_prefix())
            .collect();
        assert_eq!(prefixes, "sdcz");
        assert!(DType::Complex128.is_complex());
        assert!(!DType::F64.is_complex());
    }
}
