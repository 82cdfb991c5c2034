//! Affine subspace projection
//!
//! * `project`:     Y = (X - mean) · W
//! * `reconstruct`: X = Y · Wᵗ + mean
//!
//! `W` is a D×K basis with one basis vector per column. Inputs follow the
//! given `SampleLayout` and results come back in the same layout. Source data
//! of any primitive type is converted to the element type of `mean` and `W`.

use ndarray::{Array1, Array2, ArrayBase, Data, Dimension, Ix2, LinalgScalar};
use num_traits::AsPrimitive;

use crate::error::{Result, SubspaceError};
use crate::layout::SampleLayout;

/// Computes `Y = (X - mean) · W`
///
/// # Arguments
/// * `w` - D×K projection basis
/// * `mean` - Sample mean; any shape, as long as it holds D elements
/// * `src` - Samples to project, N×D (`Row`) or D×N (`Column`)
/// * `layout` - Orientation of `src` and of the returned matrix
///
/// # Errors
/// `DimensionMismatch` when `mean` or `w` disagree with the sample dimension of `src`
pub fn project<F, A, Sw, Sm, Sx, D>(
    w: &ArrayBase<Sw, Ix2>,
    mean: &ArrayBase<Sm, D>,
    src: &ArrayBase<Sx, Ix2>,
    layout: SampleLayout,
) -> Result<Array2<F>>
where
    F: LinalgScalar,
    A: AsPrimitive<F>,
    Sw: Data<Elem = F>,
    Sm: Data<Elem = F>,
    Sx: Data<Elem = A>,
    D: Dimension,
{
    let (_, d) = layout.shape_of(src);
    if mean.len() != d {
        return Err(SubspaceError::dimension_mismatch(d, mean.len()));
    }
    if w.nrows() != d {
        return Err(SubspaceError::dimension_mismatch(d, w.nrows()));
    }

    let data: Array2<F> = layout.rows(src).mapv(|v| v.as_());
    let mean_row: Array1<F> = mean.iter().copied().collect();

    let centered = data - &mean_row;
    Ok(layout.orient(centered.dot(w)))
}

/// Computes `X = Y · Wᵗ + mean`
///
/// # Arguments
/// * `w` - D×K projection basis
/// * `mean` - Sample mean; any shape, as long as it holds D elements
/// * `src` - Subspace coefficients, N×K (`Row`) or K×N (`Column`)
/// * `layout` - Orientation of `src` and of the returned matrix
///
/// # Errors
/// `DimensionMismatch` when `mean` does not match the output dimension D of `w`,
/// or when the coefficient width of `src` differs from K
pub fn reconstruct<F, A, Sw, Sm, Sx, D>(
    w: &ArrayBase<Sw, Ix2>,
    mean: &ArrayBase<Sm, D>,
    src: &ArrayBase<Sx, Ix2>,
    layout: SampleLayout,
) -> Result<Array2<F>>
where
    F: LinalgScalar,
    A: AsPrimitive<F>,
    Sw: Data<Elem = F>,
    Sm: Data<Elem = F>,
    Sx: Data<Elem = A>,
    D: Dimension,
{
    if mean.len() != w.nrows() {
        return Err(SubspaceError::dimension_mismatch(w.nrows(), mean.len()));
    }
    let (_, k) = layout.shape_of(src);
    if k != w.ncols() {
        return Err(SubspaceError::dimension_mismatch(w.ncols(), k));
    }

    let data: Array2<F> = layout.rows(src).mapv(|v| v.as_());
    let mean_row: Array1<F> = mean.iter().copied().collect();

    let restored = data.dot(&w.t()) + &mean_row;
    Ok(layout.orient(restored))
}
