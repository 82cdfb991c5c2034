//! Projection / reconstruction tests
//!
//! `reconstruct(W, mean, project(W, mean, X))` must give back `X` whenever the
//! samples lie in the affine subspace spanned by an orthonormal `W`.

use approx::assert_abs_diff_eq;
use ndarray::{Array1, Array2, array, s};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use subspace::{SampleLayout, SubspaceError, project, reconstruct};

/// Orthonormal 3×3 basis (rotation about z, then about x)
fn rotation() -> Array2<f64> {
    let (a, b) = (0.7_f64, -1.3_f64);
    let rz = array![
        [a.cos(), -a.sin(), 0.0],
        [a.sin(), a.cos(), 0.0],
        [0.0, 0.0, 1.0]
    ];
    let rx = array![
        [1.0, 0.0, 0.0],
        [0.0, b.cos(), -b.sin()],
        [0.0, b.sin(), b.cos()]
    ];
    rz.dot(&rx)
}

fn random_samples(n: usize, d: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_fn((n, d), |_| rng.random_range(-10.0..10.0))
}

#[test]
fn test_round_trip_full_basis_rows() {
    let w = rotation();
    let mean = array![1.5, -2.0, 0.25];
    let x = random_samples(20, 3, 7);

    let y = project(&w, &mean, &x, SampleLayout::Row).unwrap();
    assert_eq!(y.dim(), (20, 3));

    let restored = reconstruct(&w, &mean, &y, SampleLayout::Row).unwrap();
    assert_abs_diff_eq!(restored, x, epsilon = 1e-10);
}

#[test]
fn test_round_trip_full_basis_columns() {
    let w = rotation();
    let mean = array![[1.5], [-2.0], [0.25]];
    let x = random_samples(3, 15, 11);

    let y = project(&w, &mean, &x, SampleLayout::Column).unwrap();
    assert_eq!(y.dim(), (3, 15));

    let restored = reconstruct(&w, &mean, &y, SampleLayout::Column).unwrap();
    assert_abs_diff_eq!(restored, x, epsilon = 1e-10);
}

#[test]
fn test_round_trip_within_subspace() {
    // Samples generated inside mean + span(W) survive a K < D round trip
    let w = rotation().slice(s![.., 0..2]).to_owned();
    let mean = array![3.0, 0.0, -1.0];
    let coefficients = random_samples(10, 2, 3);
    let x = coefficients.dot(&w.t()) + &mean;

    let y = project(&w, &mean, &x, SampleLayout::Row).unwrap();
    assert_eq!(y.dim(), (10, 2));
    assert_abs_diff_eq!(y, coefficients, epsilon = 1e-10);

    let restored = reconstruct(&w, &mean, &y, SampleLayout::Row).unwrap();
    assert_abs_diff_eq!(restored, x, epsilon = 1e-10);
}

#[test]
fn test_round_trip_single_precision() {
    let w = rotation().mapv(|v| v as f32);
    let mean: Array1<f32> = array![0.5, 0.5, 0.5];
    let x = array![[1i32, 2, 3], [-4, 5, -6]];

    let y = project(&w, &mean, &x, SampleLayout::Row).unwrap();
    let restored = reconstruct(&w, &mean, &y, SampleLayout::Row).unwrap();
    assert_abs_diff_eq!(restored, x.mapv(|v| v as f32), epsilon = 1e-4);
}

#[test]
fn test_dimension_mismatch_rows() {
    let w = rotation();
    let mean = array![1.0, 2.0];
    let x = random_samples(4, 3, 1);

    let err = project(&w, &mean, &x, SampleLayout::Row).unwrap_err();
    assert!(matches!(
        err,
        SubspaceError::DimensionMismatch {
            expected: 3,
            actual: 2
        }
    ));

    let err = reconstruct(&w, &mean, &x, SampleLayout::Row).unwrap_err();
    assert!(matches!(err, SubspaceError::DimensionMismatch { .. }));
}

#[test]
fn test_dimension_mismatch_columns() {
    let w = rotation();
    let mean = array![1.0, 2.0, 3.0, 4.0];
    // Three samples of dimension 3 stored as columns
    let x = random_samples(3, 3, 2);

    let err = project(&w, &mean, &x, SampleLayout::Column).unwrap_err();
    assert!(matches!(
        err,
        SubspaceError::DimensionMismatch {
            expected: 3,
            actual: 4
        }
    ));

    let err = reconstruct(&w, &mean, &x, SampleLayout::Column).unwrap_err();
    assert!(matches!(err, SubspaceError::DimensionMismatch { .. }));

    // Row-shaped data handed over as columns has the wrong sample dimension
    let mean = array![1.0, 2.0, 3.0];
    let rows = random_samples(5, 3, 4);
    assert!(project(&w, &mean, &rows, SampleLayout::Column).is_err());
}
