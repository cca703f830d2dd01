//! Integration tests for library-owned batch storage
#![cfg(feature = "cpu")]

mod common;

use common::{
    assert_allclose_f64, create_cpu_client, lower_triangle, random_spd_f64, reconstruct_lower_f64,
    seeded_rng,
};
use numr_batched::prelude::*;

#[test]
fn test_factor_through_device_storage() {
    let (client, _device) = create_cpu_client();
    let mut rng = seeded_rng(21);
    let sizes = [5usize, 0, 19, 2];
    let lds = [7usize, 1, 19, 4];
    let host: Vec<Vec<f64>> = sizes
        .iter()
        .zip(&lds)
        .map(|(&n, &ld)| random_spd_f64(&mut rng, n, ld))
        .collect();
    let slices: Vec<&[f64]> = host.iter().map(|m| m.as_slice()).collect();

    let mut storage = BatchStorage::<CpuRuntime, f64>::from_host(&client, &slices, &sizes, &lds)
        .unwrap();
    assert_eq!(storage.len(), 4);
    assert_eq!(storage.max_n(), 19);
    assert!(client.allocator().stats().live_bytes >= storage.size_bytes());

    let mut info = InfoArray::new(storage.len());
    {
        let mut batch = storage.batch();
        client
            .potrf_vbatched(Uplo::Lower, &mut batch, &mut info, 0, &PotrfOptions::default())
            .unwrap();
    }
    assert!(info.all_succeeded());

    let factors = storage.to_host().unwrap();
    for (i, (l, a)) in factors.iter().zip(&host).enumerate() {
        let (n, ld) = (sizes[i], lds[i]);
        assert_allclose_f64(
            &reconstruct_lower_f64(l, n, ld),
            &lower_triangle(a, n, ld),
            1e-12,
            1e-10,
            &format!("member {i}"),
        );
    }

    drop(storage);
    assert_eq!(client.allocator().stats().live_bytes, 0);
    assert_eq!(client.allocator().stats().live_allocations, 0);
}

#[test]
fn test_storage_rejects_inconsistent_members() {
    let (client, _device) = create_cpu_client();
    let a = vec![1.0f64; 4];

    let err = BatchStorage::<CpuRuntime, f64>::from_host(&client, &[a.as_slice()], &[2, 2], &[2, 2])
        .unwrap_err();
    assert!(matches!(err, Error::BatchMismatch { views: 1, sizes: 2 }));

    let err = BatchStorage::<CpuRuntime, f64>::from_host(&client, &[a.as_slice()], &[3], &[3])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { arg: "matrices", .. }));

    let err = BatchStorage::<CpuRuntime, f64>::from_host(&client, &[a.as_slice()], &[2], &[1])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { arg: "lds", .. }));
}

#[test]
fn test_batched_blas_building_blocks() {
    let (client, _device) = create_cpu_client();
    // Factor of [[4, 12, -16], [12, 37, -43], [-16, -43, 98]] assembled by hand:
    // L11 = 2, A21 := A21 * L11^{-T}, A22 -= A21 * A21^T, then the trailing 2x2.
    let mut a = vec![4.0f64, 12.0, -16.0, 0.0, 37.0, -43.0, 0.0, 0.0, 98.0];
    a[0] = 2.0;
    let info = InfoArray::new(1);
    {
        let view = MatrixView::square(&mut a, 3, 3).unwrap();
        // SAFETY: the three blocks are disjoint parts of `view`.
        let (l11, a21, a22) = unsafe {
            (
                view.submatrix(0, 0, 1, 1),
                view.submatrix(1, 0, 2, 1),
                view.submatrix(1, 1, 2, 2),
            )
        };
        let (l11, mut a21, mut a22) = ([l11], [a21], [a22]);
        client.trsm_vbatched(&l11, &mut a21, &info).unwrap();
        client.herk_vbatched(&a21, &mut a22, &info).unwrap();
    }
    assert_eq!(&a[..3], &[2.0, 6.0, -8.0]);
    // Trailing block now holds [[1, -], [5, 34]]
    assert_eq!(a[4], 1.0);
    assert_eq!(a[5], 5.0);
    assert_eq!(a[8], 34.0);
}
