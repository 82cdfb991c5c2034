//! Linear Discriminant Analysis for dense sample matrices
//!
//! Fits the subspace that best separates labelled classes (the leading
//! eigenvectors of `Sw⁻¹Sb`) and maps samples into and out of it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ndarray::array;
//! use subspace::{LdaConfig, LinearDiscriminantAnalysis, SampleLayout};
//!
//! let samples = array![
//!     [0.0, 0.0], [1.0, 0.0], [0.5, 0.5],
//!     [0.0, 5.0], [1.0, 5.0], [0.5, 5.5],
//!     [5.0, 0.0], [6.0, 0.5], [5.5, 1.0],
//! ];
//! let labels = [10, 10, 10, 20, 20, 20, 30, 30, 30];
//!
//! let config = LdaConfig::builder()
//!     .layout(SampleLayout::Row)
//!     .build()?;
//! let lda = LinearDiscriminantAnalysis::fit(config, &samples, &labels)?;
//!
//! // Two discriminant directions for three classes
//! let projected = lda.project_centered(&samples)?;
//! assert_eq!(projected.ncols(), 2);
//!
//! let restored = lda.reconstruct(&projected)?;
//! assert_eq!(restored.dim(), samples.dim());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The free functions [`project`] and [`reconstruct`] apply any basis and mean,
//! independent of a fitted model.

pub mod eigen;
pub mod error;
pub mod labels;
pub mod layout;
pub mod lda;
pub mod projection;
pub mod scatter;

pub use eigen::{Eigen, EigenSolver, LapackSolver, MatrixInverse};
pub use error::{Result, SubspaceError};
pub use labels::LabelMap;
pub use layout::SampleLayout;
pub use lda::{LdaConfig, LdaConfigBuilder, LdaModel, LinearDiscriminantAnalysis};
pub use projection::{project, reconstruct};
pub use scatter::{ClassStatistics, ScatterMatrices};
