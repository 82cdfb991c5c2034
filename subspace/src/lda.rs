use derive_builder::Builder;
use ndarray::{Array1, Array2, ArrayBase, Data, Dimension, Ix2};
use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::eigen::{EigenSolver, LapackSolver, MatrixInverse, sort_eigenpairs};
use crate::error::{Result, SubspaceError};
use crate::labels::LabelMap;
use crate::layout::{SampleLayout, as_column_matrix, as_row_matrix, single_channel};
use crate::projection;
use crate::scatter::{ClassStatistics, ScatterMatrices};

/// Relative size of a discarded imaginary eigen-part that is worth a warning
const IMAGINARY_TOLERANCE: f64 = 1e-8;

/// Ridge added to a singular `Sw`, relative to its mean diagonal
const SINGULAR_RIDGE: f64 = 1e-6;

/// LDA configuration
///
/// # Example
///
/// ```rust
/// use subspace::{LdaConfig, SampleLayout};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = LdaConfig::builder()
///     .num_components(2)
///     .layout(SampleLayout::Column)
///     .build()?;
/// assert_eq!(config.components_for(5), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[builder(default)]
pub struct LdaConfig {
    /// Number of discriminant components to keep.
    /// Values `<= 0` or above `C - 1` resolve to `C - 1`.
    pub num_components: i32,

    /// Orientation of samples in the matrices handed to the model
    pub layout: SampleLayout,
}

impl Default for LdaConfig {
    fn default() -> Self {
        Self {
            num_components: 0,
            layout: SampleLayout::Row,
        }
    }
}

impl LdaConfig {
    /// Create a new builder for LdaConfig
    pub fn builder() -> LdaConfigBuilder {
        LdaConfigBuilder::default()
    }

    pub fn with_components(num_components: i32) -> Self {
        Self {
            num_components,
            ..Default::default()
        }
    }

    /// Effective number of components for `n_classes` classes
    pub fn components_for(&self, n_classes: usize) -> usize {
        let max = n_classes.saturating_sub(1);
        match usize::try_from(self.num_components) {
            Ok(k) if k > 0 && k <= max => k,
            _ => max,
        }
    }
}

/// Fitted LDA state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LdaModel {
    /// Eigenvalues of `Sw⁻¹Sb`, non-increasing (K)
    pub eigenvalues: Array1<f64>,
    /// Discriminant directions, column `i` belongs to `eigenvalues[i]` (D×K)
    pub eigenvectors: Array2<f64>,
    /// Mean over all training samples (D)
    pub mean: Array1<f64>,
    /// Distinct training labels; position is the class index
    pub class_labels: Vec<i32>,
}

impl LdaModel {
    pub fn num_components(&self) -> usize {
        self.eigenvalues.len()
    }

    pub fn dimension(&self) -> usize {
        self.eigenvectors.nrows()
    }

    pub fn n_classes(&self) -> usize {
        self.class_labels.len()
    }
}

/// Linear Discriminant Analysis
///
/// Finds the directions that maximise between-class scatter relative to
/// within-class scatter, i.e. the leading eigenvectors of `M = Sw⁻¹Sb`.
///
/// # Algorithm
/// 1. Map labels to class indices in order of first appearance
/// 2. Accumulate total and per-class means in a single pass
/// 3. `Sw` from class-centred samples, `Sb` from class-mean offsets
/// 4. Eigendecompose `Sw⁻¹Sb`, keep real parts
/// 5. Sort eigenpairs by eigenvalue (descending), keep `num_components`
///
/// # Example
///
/// ```rust,no_run
/// use ndarray::array;
/// use subspace::{LdaConfig, LinearDiscriminantAnalysis};
///
/// # fn main() -> subspace::Result<()> {
/// let samples = array![[0.0, 0.0], [1.0, 0.0], [0.5, 0.5], [0.0, 5.0], [1.0, 5.0], [0.5, 5.5]];
/// let labels = [1, 1, 1, 2, 2, 2];
///
/// let lda = LinearDiscriminantAnalysis::fit(LdaConfig::default(), &samples, &labels)?;
/// let projected = lda.project(&samples)?;
/// assert_eq!(projected.dim(), (6, 1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LinearDiscriminantAnalysis<S = LapackSolver> {
    config: LdaConfig,
    solver: S,
    model: Option<LdaModel>,
}

impl Default for LinearDiscriminantAnalysis<LapackSolver> {
    fn default() -> Self {
        Self::new(LdaConfig::default())
    }
}

impl LinearDiscriminantAnalysis<LapackSolver> {
    pub fn new(config: LdaConfig) -> Self {
        Self::with_solver(config, LapackSolver)
    }

    /// Construct and immediately compute on `samples`
    pub fn fit<A, St, D>(
        config: LdaConfig,
        samples: &ArrayBase<St, D>,
        labels: &[i32],
    ) -> Result<Self>
    where
        A: AsPrimitive<f64>,
        St: Data<Elem = A>,
        D: Dimension,
    {
        let mut lda = Self::new(config);
        lda.compute(samples, labels)?;
        Ok(lda)
    }
}

impl<S> LinearDiscriminantAnalysis<S>
where
    S: EigenSolver + MatrixInverse,
{
    pub fn with_solver(config: LdaConfig, solver: S) -> Self {
        Self {
            config,
            solver,
            model: None,
        }
    }

    /// Fit the model to a single-channel sample matrix
    ///
    /// Replaces any previously fitted model. On error the previous model is kept.
    ///
    /// # Arguments
    /// * `samples` - N×D (`Row`) or D×N (`Column`) matrix; a 3-D array is
    ///   accepted when its last (channel) axis has length 1
    /// * `labels` - One label per sample, arbitrary values
    ///
    /// # Errors
    /// * `BadArgument` - more than one channel, or label count differs from sample count
    /// * `InsufficientClasses` - fewer than two distinct labels
    /// * `Linalg` - `Sw⁻¹Sb` could not be decomposed
    ///
    /// A singular `Sw` is not an error: it is regularized with a small ridge
    /// and logged. Results on such data may be numerically meaningless.
    pub fn compute<A, St, D>(&mut self, samples: &ArrayBase<St, D>, labels: &[i32]) -> Result<()>
    where
        A: AsPrimitive<f64>,
        St: Data<Elem = A>,
        D: Dimension,
    {
        let raw = single_channel(samples)?;
        let data = self.config.layout.rows(&raw).to_owned();
        let (n, d) = data.dim();

        if labels.len() != n {
            return Err(SubspaceError::bad_argument(format!(
                "The number of samples ({}) must equal the number of labels ({})",
                n,
                labels.len()
            )));
        }

        let label_map = LabelMap::new(labels);
        let n_classes = label_map.n_classes();
        if n_classes < 2 {
            return Err(SubspaceError::InsufficientClasses { found: n_classes });
        }

        if n < d {
            warn!(
                "Less observations ({}) than feature dimension ({}) given, within-class scatter will be singular",
                n, d
            );
        }

        let k = self.config.components_for(n_classes);
        debug!(
            "Computing LDA: {} samples, {} dimensions, {} classes, {} components",
            n, d, n_classes, k
        );

        let classes = label_map
            .map_all(labels)
            .ok_or_else(|| SubspaceError::bad_argument("Label without a class index"))?;
        let stats = ClassStatistics::accumulate(data.view(), &classes, n_classes)?;
        let scatter = ScatterMatrices::compute(data.view(), &classes, &stats);

        let within_inv = self.invert_within(&scatter.within)?;
        let m = within_inv.dot(&scatter.between);

        let eigen = self.solver.eigen(m.view())?;
        if eigen.vectors.nrows() != d || eigen.vectors.ncols() != eigen.values.len() {
            return Err(SubspaceError::dimension_mismatch(d, eigen.vectors.nrows()));
        }

        let scale = eigen.values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        if eigen.max_imaginary > IMAGINARY_TOLERANCE * scale.max(1.0) {
            warn!(
                "Discarded imaginary eigen-part of magnitude {:.3e} (largest eigenvalue {:.3e})",
                eigen.max_imaginary, scale
            );
        } else if eigen.max_imaginary > 0.0 {
            debug!("Discarded imaginary eigen-part of magnitude {:.3e}", eigen.max_imaginary);
        }

        let (eigenvalues, eigenvectors) = sort_eigenpairs(&eigen, k);
        debug!("Retained eigenvalues: {}", eigenvalues);

        self.model = Some(LdaModel {
            eigenvalues,
            eigenvectors,
            mean: stats.total_mean,
            class_labels: label_map.into_labels(),
        });
        Ok(())
    }

    /// Fit the model to a list of samples
    ///
    /// Each sample is flattened (row-major) and stacked as one row (`Row`) or
    /// one column (`Column`) before delegating to [`compute`](Self::compute).
    pub fn compute_from_samples<A, St, D>(
        &mut self,
        samples: &[ArrayBase<St, D>],
        labels: &[i32],
    ) -> Result<()>
    where
        A: AsPrimitive<f64>,
        St: Data<Elem = A>,
        D: Dimension,
    {
        let stacked = match self.config.layout {
            SampleLayout::Row => as_row_matrix(samples)?,
            SampleLayout::Column => as_column_matrix(samples)?,
        };
        self.compute(&stacked, labels)
    }

    /// Projects `src` onto the discriminant directions: `Y = X · W`
    ///
    /// The training mean is *not* subtracted. Use
    /// [`project_centered`](Self::project_centered) for `Y = (X - mean) · W`.
    pub fn project<A, St>(&self, src: &ArrayBase<St, Ix2>) -> Result<Array2<f64>>
    where
        A: AsPrimitive<f64>,
        St: Data<Elem = A>,
    {
        let model = self.fitted()?;
        let layout = self.config.layout;

        let (_, d) = layout.shape_of(src);
        if d != model.dimension() {
            return Err(SubspaceError::dimension_mismatch(model.dimension(), d));
        }

        let data: Array2<f64> = layout.rows(src).mapv(|v| v.as_());
        Ok(layout.orient(data.dot(&model.eigenvectors)))
    }

    /// Projects `src` after subtracting the training mean: `Y = (X - mean) · W`
    pub fn project_centered<A, St>(&self, src: &ArrayBase<St, Ix2>) -> Result<Array2<f64>>
    where
        A: AsPrimitive<f64>,
        St: Data<Elem = A>,
    {
        let model = self.fitted()?;
        projection::project(&model.eigenvectors, &model.mean, src, self.config.layout)
    }

    /// Maps subspace coefficients back to sample space: `X = Y · Wᵗ + mean`
    pub fn reconstruct<A, St>(&self, src: &ArrayBase<St, Ix2>) -> Result<Array2<f64>>
    where
        A: AsPrimitive<f64>,
        St: Data<Elem = A>,
    {
        let model = self.fitted()?;
        projection::reconstruct(&model.eigenvectors, &model.mean, src, self.config.layout)
    }

    /// Gram product of `src` with itself, as the legacy instance reconstruction computed it
    ///
    /// Row layout returns `src · srcᵗ`; column layout returns `(srcᵗ · srcᵗ)ᵗ`,
    /// which requires a square `src`. The fitted basis and mean are not used,
    /// so this is not an inverse of [`project`](Self::project). Kept for
    /// comparing against results produced by that implementation; use
    /// [`reconstruct`](Self::reconstruct) for an actual reconstruction.
    pub fn reconstruct_gram<A, St>(&self, src: &ArrayBase<St, Ix2>) -> Result<Array2<f64>>
    where
        A: AsPrimitive<f64>,
        St: Data<Elem = A>,
    {
        self.fitted()?;
        let data: Array2<f64> = src.mapv(|v| v.as_());

        match self.config.layout {
            SampleLayout::Row => Ok(data.dot(&data.t())),
            SampleLayout::Column => {
                if data.nrows() != data.ncols() {
                    return Err(SubspaceError::dimension_mismatch(data.nrows(), data.ncols()));
                }
                // (srcᵗ · srcᵗ)ᵗ == src · src
                Ok(data.dot(&data))
            }
        }
    }

    pub fn config(&self) -> &LdaConfig {
        &self.config
    }

    pub fn model(&self) -> Option<&LdaModel> {
        self.model.as_ref()
    }

    pub fn into_model(self) -> Option<LdaModel> {
        self.model
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    pub fn eigenvalues(&self) -> Option<&Array1<f64>> {
        self.model.as_ref().map(|m| &m.eigenvalues)
    }

    pub fn eigenvectors(&self) -> Option<&Array2<f64>> {
        self.model.as_ref().map(|m| &m.eigenvectors)
    }

    pub fn mean(&self) -> Option<&Array1<f64>> {
        self.model.as_ref().map(|m| &m.mean)
    }

    pub fn class_labels(&self) -> Option<&[i32]> {
        self.model.as_ref().map(|m| m.class_labels.as_slice())
    }

    /// Number of components of the fitted model
    pub fn num_components(&self) -> Option<usize> {
        self.model.as_ref().map(LdaModel::num_components)
    }

    /// `Sw⁻¹`, tolerating a singular `Sw`
    ///
    /// An exactly singular matrix is retried as `Sw + εI`. If that fails too
    /// the zero matrix is used and the resulting eigenvalues are all zero.
    fn invert_within(&self, within: &Array2<f64>) -> Result<Array2<f64>> {
        let err = match self.solver.invert(within.view()) {
            Ok(inverse) => return Ok(inverse),
            Err(SubspaceError::Linalg(err)) => err,
            Err(err) => return Err(err),
        };

        let d = within.nrows();
        let scale = within.diag().sum() / d.max(1) as f64;
        let ridge = SINGULAR_RIDGE * if scale > 0.0 { scale } else { 1.0 };
        warn!(
            "Within-class scatter is singular ({}), regularizing with ridge {:.3e}",
            err, ridge
        );

        let regularized = within + &(Array2::<f64>::eye(d) * ridge);
        match self.solver.invert(regularized.view()) {
            Ok(inverse) => Ok(inverse),
            Err(SubspaceError::Linalg(err)) => {
                warn!("Regularized within-class scatter is singular ({}), using a zero inverse", err);
                Ok(Array2::zeros((d, d)))
            }
            Err(err) => Err(err),
        }
    }

    fn fitted(&self) -> Result<&LdaModel> {
        self.model.as_ref().ok_or(SubspaceError::NotFitted)
    }
}
