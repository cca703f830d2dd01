//! Common test utilities
#![allow(dead_code)]

use numr_batched::dtype::Complex128;
use numr_batched::runtime::Runtime;
use numr_batched::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sentinel written to the strict upper triangle and the padding rows.
pub const SENTINEL: f64 = -777.0;

/// Create a CPU client and device for testing
pub fn create_cpu_client() -> (CpuClient, CpuDevice) {
    let device = CpuDevice::new();
    let client = CpuRuntime::default_client(&device);
    (client, device)
}

/// Seeded generator so failures reproduce
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Assert two f32 slices are close within tolerance
pub fn assert_allclose_f32(a: &[f32], b: &[f32], rtol: f32, atol: f32, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Random SPD matrix `B * B^T + n * I`, column-major with leading dimension
/// `ld`. Only the lower triangle holds data; the strict upper triangle and
/// the padding rows hold [`SENTINEL`].
pub fn random_spd_f64(rng: &mut StdRng, n: usize, ld: usize) -> Vec<f64> {
    assert!(ld >= n.max(1));
    let b: Vec<f64> = (0..n * n).map(|_| rng.random_range(-1.0..1.0)).collect();
    let len = if n == 0 { 0 } else { ld * (n - 1) + n };
    let mut a = vec![SENTINEL; len];
    for j in 0..n {
        for i in j..n {
            let mut s = 0.0;
            for k in 0..n {
                s += b[i + k * n] * b[j + k * n];
            }
            a[i + j * ld] = s + if i == j { n as f64 } else { 0.0 };
        }
    }
    a
}

/// Random Hermitian positive-definite matrix, lower triangle only, `ld = n`.
pub fn random_hpd_c128(rng: &mut StdRng, n: usize) -> Vec<Complex128> {
    let b: Vec<Complex128> = (0..n * n)
        .map(|_| Complex128::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
        .collect();
    let mut a = vec![Complex128::ZERO; n * n];
    for j in 0..n {
        for i in j..n {
            let mut s = Complex128::ZERO;
            for k in 0..n {
                s = s + b[i + k * n] * b[j + k * n].conj();
            }
            if i == j {
                s = Complex128::new(s.re + n as f64, 0.0);
            }
            a[i + j * n] = s;
        }
    }
    a
}

/// Lower triangle of an `n × n` column-major matrix, column by column.
pub fn lower_triangle<T: Copy>(a: &[T], n: usize, ld: usize) -> Vec<T> {
    let mut out = Vec::with_capacity(n * (n + 1) / 2);
    for j in 0..n {
        for i in j..n {
            out.push(a[i + j * ld]);
        }
    }
    out
}

/// Lower triangle of `L * L^T` for the factor stored in `l`'s lower triangle.
pub fn reconstruct_lower_f64(l: &[f64], n: usize, ld: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(n * (n + 1) / 2);
    for j in 0..n {
        for i in j..n {
            let mut s = 0.0;
            for k in 0..=j {
                s += l[i + k * ld] * l[j + k * ld];
            }
            out.push(s);
        }
    }
    out
}

/// Lower triangle of `L * L^H` for a complex factor (`ld = n`).
pub fn reconstruct_lower_c128(l: &[Complex128], n: usize) -> Vec<Complex128> {
    let mut out = Vec::with_capacity(n * (n + 1) / 2);
    for j in 0..n {
        for i in j..n {
            let mut s = Complex128::ZERO;
            for k in 0..=j {
                s = s + l[i + k * n] * l[j + k * n].conj();
            }
            out.push(s);
        }
    }
    out
}

/// Entries outside the lower triangle (strict upper and padding rows).
pub fn outside_lower<T: Copy>(a: &[T], n: usize, ld: usize) -> Vec<T> {
    let mut out = Vec::new();
    for j in 0..n {
        for i in 0..ld {
            let idx = i + j * ld;
            if (i < j || i >= n) && idx < a.len() {
                out.push(a[idx]);
            }
        }
    }
    out
}
