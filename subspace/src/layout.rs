//! Sample orientation and conversion of caller data into `f64` sample matrices.

use ndarray::{Array2, ArrayBase, ArrayView2, Data, Dimension, Ix2, ShapeBuilder};
use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SubspaceError};

/// Orientation of samples inside a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleLayout {
    /// One sample per row (N×D)
    #[default]
    Row,
    /// One sample per column (D×N)
    Column,
}

impl SampleLayout {
    pub fn from_data_as_row(data_as_row: bool) -> Self {
        if data_as_row { Self::Row } else { Self::Column }
    }

    pub fn is_row(self) -> bool {
        self == Self::Row
    }

    /// Returns `(n_samples, dimension)` of a matrix laid out this way
    pub fn shape_of<A, S>(self, matrix: &ArrayBase<S, Ix2>) -> (usize, usize)
    where
        S: Data<Elem = A>,
    {
        match self {
            Self::Row => (matrix.nrows(), matrix.ncols()),
            Self::Column => (matrix.ncols(), matrix.nrows()),
        }
    }

    /// View of `matrix` with one sample per row
    pub fn rows<'a, A, S>(self, matrix: &'a ArrayBase<S, Ix2>) -> ArrayView2<'a, A>
    where
        S: Data<Elem = A>,
    {
        match self {
            Self::Row => matrix.view(),
            Self::Column => matrix.t(),
        }
    }

    /// Turns a row-per-sample result back into this layout
    pub fn orient<A>(self, matrix: Array2<A>) -> Array2<A> {
        match self {
            Self::Row => matrix,
            Self::Column => matrix.reversed_axes(),
        }
    }
}

/// Converts a single-channel sample matrix to `f64`.
///
/// Accepts a 2-D `(rows, cols)` array, or a 3-D `(rows, cols, channels)` array
/// with exactly one channel. Anything else is a `BadArgument`.
pub fn single_channel<A, S, D>(samples: &ArrayBase<S, D>) -> Result<Array2<f64>>
where
    A: AsPrimitive<f64>,
    S: Data<Elem = A>,
    D: Dimension,
{
    let (rows, cols) = match *samples.shape() {
        [rows, cols] | [rows, cols, 1] => (rows, cols),
        [_, _, channels] => {
            return Err(SubspaceError::bad_argument(format!(
                "Only single channel matrices allowed, got {} channels",
                channels
            )));
        }
        ref shape => {
            return Err(SubspaceError::bad_argument(format!(
                "Expected a 2-D sample matrix, got {} dimensions",
                shape.len()
            )));
        }
    };

    let values: Vec<f64> = samples.iter().map(|&v| v.as_()).collect();
    Ok(Array2::from_shape_vec((rows, cols), values)?)
}

/// Flattens every sample (row-major) and concatenates them into a row vector
/// buffer, returning `(n_samples, dimension, buffer)`.
fn flatten_samples<A, S, D>(samples: &[ArrayBase<S, D>]) -> Result<(usize, usize, Vec<f64>)>
where
    A: AsPrimitive<f64>,
    S: Data<Elem = A>,
    D: Dimension,
{
    let first = samples
        .first()
        .ok_or_else(|| SubspaceError::bad_argument("Sample list is empty"))?;
    let dimension = first.len();

    let mut buffer = Vec::with_capacity(samples.len() * dimension);
    for (i, sample) in samples.iter().enumerate() {
        if sample.len() != dimension {
            return Err(SubspaceError::bad_argument(format!(
                "Sample {} has {} elements, expected {}",
                i,
                sample.len(),
                dimension
            )));
        }
        buffer.extend(sample.iter().map(|&v| v.as_()));
    }

    Ok((samples.len(), dimension, buffer))
}

/// Stacks samples into an N×D matrix, one flattened sample per row
pub fn as_row_matrix<A, S, D>(samples: &[ArrayBase<S, D>]) -> Result<Array2<f64>>
where
    A: AsPrimitive<f64>,
    S: Data<Elem = A>,
    D: Dimension,
{
    let (n, d, buffer) = flatten_samples(samples)?;
    Ok(Array2::from_shape_vec((n, d), buffer)?)
}

/// Stacks samples into a D×N matrix, one flattened sample per column
pub fn as_column_matrix<A, S, D>(samples: &[ArrayBase<S, D>]) -> Result<Array2<f64>>
where
    A: AsPrimitive<f64>,
    S: Data<Elem = A>,
    D: Dimension,
{
    let (n, d, buffer) = flatten_samples(samples)?;
    // Column-major storage places each contiguous sample in its own column
    Ok(Array2::from_shape_vec((d, n).f(), buffer)?)
}
