#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kornia Procrustes
//!
//! Closed-form estimation of the rigid transform (rotation + translation, no
//! scale) that best maps a set of 3D points onto a second, index-paired set in
//! the least-squares sense.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use kornia_procrustes::estimate_pose;
//!
//! let source = [
//!     DVec3::new(0.0, 0.0, 0.0),
//!     DVec3::new(1.0, 0.0, 0.0),
//!     DVec3::new(0.0, 1.0, 0.0),
//! ];
//! // 90 degrees about the z axis
//! let target = [
//!     DVec3::new(0.0, 0.0, 0.0),
//!     DVec3::new(0.0, 1.0, 0.0),
//!     DVec3::new(-1.0, 0.0, 0.0),
//! ];
//!
//! let pose = estimate_pose(&source, &target)?;
//! let p = pose.transform_point(source[1]);
//! assert!(p.abs_diff_eq(target[1], 1e-9));
//! # Ok::<(), kornia_procrustes::ProcrustesError>(())
//! ```

/// Procrustes aligner and its parameters.
pub mod aligner;

/// Centroid computation of point sets.
pub mod centroid;

/// Error types for the crate.
pub mod error;

/// Residual metrics of an estimated pose.
pub mod metrics;

/// Homogeneous rigid transform.
pub mod pose;

/// Singular value decomposition of 3x3 matrices.
pub mod svd;

pub use aligner::{estimate_pose, AlignParams, AlignResult, ProcrustesAligner};
pub use centroid::{compute_centroid, compute_centroids};
pub use error::ProcrustesError;
pub use pose::Pose;
