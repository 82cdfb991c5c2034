//! Class statistics and scatter matrices
//!
//! Within-class scatter:  Sw = Σ_i (x_i - μ_c(i))ᵗ (x_i - μ_c(i))
//! Between-class scatter: Sb = Σ_c (μ_c - μ)ᵗ (μ_c - μ)
//!
//! `Sb` carries one unweighted term per class.

use ndarray::{Array1, Array2, ArrayView2, Axis};

use crate::error::{Result, SubspaceError};

/// Per-class means and counts plus the mean over all samples
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStatistics {
    /// Mean over all samples (D)
    pub total_mean: Array1<f64>,
    /// One mean per class, row `c` belongs to class `c` (C×D)
    pub class_means: Array2<f64>,
    /// Number of samples per class; sums to N
    pub class_counts: Vec<usize>,
}

impl ClassStatistics {
    /// Accumulate means in a single pass over `samples` (one sample per row)
    ///
    /// # Arguments
    /// * `samples` - N×D sample matrix
    /// * `classes` - Dense class index of every sample (length N)
    /// * `n_classes` - Number of classes C; every index must be `< C`
    ///
    /// A class without samples ends up with a NaN mean.
    pub fn accumulate(
        samples: ArrayView2<'_, f64>,
        classes: &[usize],
        n_classes: usize,
    ) -> Result<Self> {
        let (n, d) = samples.dim();
        if classes.len() != n {
            return Err(SubspaceError::bad_argument(format!(
                "The number of samples ({}) must equal the number of labels ({})",
                n,
                classes.len()
            )));
        }
        if let Some(&bad) = classes.iter().find(|&&c| c >= n_classes) {
            return Err(SubspaceError::bad_argument(format!(
                "Class index {} out of range for {} classes",
                bad, n_classes
            )));
        }

        let mut total_sum = Array1::<f64>::zeros(d);
        let mut class_sums = Array2::<f64>::zeros((n_classes, d));
        let mut class_counts = vec![0usize; n_classes];

        for (sample, &class) in samples.outer_iter().zip(classes) {
            total_sum += &sample;
            let mut class_sum = class_sums.row_mut(class);
            class_sum += &sample;
            class_counts[class] += 1;
        }

        let total_mean = total_sum / n as f64;
        let mut class_means = class_sums;
        for (mut mean, &count) in class_means.outer_iter_mut().zip(&class_counts) {
            mean /= count as f64;
        }

        Ok(Self {
            total_mean,
            class_means,
            class_counts,
        })
    }

    pub fn n_classes(&self) -> usize {
        self.class_counts.len()
    }

    pub fn dimension(&self) -> usize {
        self.total_mean.len()
    }

    /// Returns a copy of `samples` with each row's class mean subtracted
    pub fn center_by_class(&self, samples: ArrayView2<'_, f64>, classes: &[usize]) -> Array2<f64> {
        let mut centered = samples.to_owned();
        for (mut sample, &class) in centered.outer_iter_mut().zip(classes) {
            sample -= &self.class_means.row(class);
        }
        centered
    }
}

/// Within-class (`Sw`) and between-class (`Sb`) scatter, both D×D symmetric
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterMatrices {
    pub within: Array2<f64>,
    pub between: Array2<f64>,
}

impl ScatterMatrices {
    /// Builds both scatter matrices from row-per-sample data and its class statistics
    pub fn compute(
        samples: ArrayView2<'_, f64>,
        classes: &[usize],
        stats: &ClassStatistics,
    ) -> Self {
        let centered = stats.center_by_class(samples, classes);
        let within = centered.t().dot(&centered);

        let d = stats.dimension();
        let mut between = Array2::<f64>::zeros((d, d));
        for mean in stats.class_means.outer_iter() {
            let diff = (&mean - &stats.total_mean).insert_axis(Axis(1));
            between += &diff.dot(&diff.t());
        }

        Self { within, between }
    }
}
