//! Eigendecomposition and inversion behind injectable traits
//!
//! `LapackSolver` is the production implementation (ndarray-linalg over
//! OpenBLAS/LAPACK). Tests substitute their own implementations to exercise
//! the LDA orchestration on small fixed cases.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use ndarray_linalg::{Eig, Inverse};

use crate::error::Result;

/// Real part of an eigendecomposition
#[derive(Debug, Clone, PartialEq)]
pub struct Eigen {
    /// Eigenvalues, in solver order
    pub values: Array1<f64>,
    /// Eigenvectors, column `i` belongs to `values[i]`
    pub vectors: Array2<f64>,
    /// Largest absolute imaginary component dropped from values and vectors
    pub max_imaginary: f64,
}

/// Eigendecomposition of a square, possibly non-symmetric, real matrix
pub trait EigenSolver {
    /// Only real parts are returned; complex pairs collapse onto their real part.
    fn eigen(&self, matrix: ArrayView2<'_, f64>) -> Result<Eigen>;
}

/// Inverse of a square real matrix
pub trait MatrixInverse {
    fn invert(&self, matrix: ArrayView2<'_, f64>) -> Result<Array2<f64>>;
}

/// LAPACK-backed solver (`dgeev` for eigenpairs, LU for the inverse)
#[derive(Debug, Clone, Copy, Default)]
pub struct LapackSolver;

impl EigenSolver for LapackSolver {
    fn eigen(&self, matrix: ArrayView2<'_, f64>) -> Result<Eigen> {
        let (values, vectors) = matrix.eig()?;

        let max_imaginary = values
            .iter()
            .chain(vectors.iter())
            .map(|c| c.im.abs())
            .fold(0.0, f64::max);

        Ok(Eigen {
            values: values.mapv(|c| c.re),
            vectors: vectors.mapv(|c| c.re),
            max_imaginary,
        })
    }
}

impl MatrixInverse for LapackSolver {
    fn invert(&self, matrix: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        Ok(matrix.inv()?)
    }
}

/// Indices that sort `values` in descending order
///
/// The sort is stable, so equal eigenvalues keep the solver's order. NaN sorts
/// ahead of every number.
pub fn argsort_descending(values: ArrayView1<'_, f64>) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    indices
}

/// Sorts eigenpairs by eigenvalue (descending) and keeps the first `k`
///
/// Eigenvector columns are permuted together with their eigenvalues.
/// `k` larger than the number of eigenpairs keeps all of them.
pub fn sort_eigenpairs(eigen: &Eigen, k: usize) -> (Array1<f64>, Array2<f64>) {
    let order = argsort_descending(eigen.values.view());
    let keep = &order[..k.min(order.len())];

    let values = eigen.values.select(Axis(0), keep);
    let vectors = eigen.vectors.select(Axis(1), keep);
    (values, vectors)
}
