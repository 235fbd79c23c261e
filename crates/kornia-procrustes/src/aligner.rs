use glam::{DMat3, DVec3};

use crate::{centroid::compute_centroids, error::ProcrustesError, metrics, pose::Pose, svd::svd3};

/// Parameters of the [`ProcrustesAligner`].
#[derive(Debug, Clone)]
pub struct AlignParams {
    /// Singular values below `rank_tolerance * sigma_max` count as zero when
    /// estimating the rank of the cross-covariance. Must be finite and non-negative.
    pub rank_tolerance: f64,
    /// Return [`ProcrustesError::DegenerateInput`] instead of a pose when the
    /// cross-covariance has rank below 2.
    pub reject_degenerate: bool,
}

impl Default for AlignParams {
    fn default() -> Self {
        Self {
            rank_tolerance: 1e-9,
            reject_degenerate: false,
        }
    }
}

/// Result of a Procrustes alignment.
///
/// The pose maps points from the **source** frame to the **target** frame.
#[derive(Debug, Clone)]
pub struct AlignResult {
    /// Estimated rigid transform.
    pub pose: Pose,
    /// Singular values of the cross-covariance, non-increasing.
    pub singular_values: DVec3,
    /// Numerical rank of the cross-covariance.
    pub rank: usize,
    /// Whether `V * U^T` was a reflection and the last singular vector was flipped.
    pub reflection_corrected: bool,
    /// Root-mean-square distance between the transformed source and the target.
    pub rmse: f64,
}

impl AlignResult {
    /// True when the point configuration does not fix a unique rotation
    /// (coincident or colinear points).
    pub fn is_degenerate(&self) -> bool {
        self.rank < 2
    }
}

/// Least-squares rigid aligner of index-paired 3D point sets.
///
/// The estimation follows Arun, K., Huang, T. S., and Blostein, S. D.
/// "Least-squares fitting of two 3-D point sets." IEEE PAMI, 1987, with the
/// reflection fix of Umeyama (1991):
///
/// 1. Compute the centroids of both sets.
/// 2. Build the cross-covariance `H = Σ (src_i - src_mean) * (dst_i - dst_mean)^T`.
/// 3. Decompose `H = U * S * V^T` and take `R = V * U^T`, flipping the last
///    column of `V` if `det(R) < 0`.
/// 4. Recover the translation `t = dst_mean - R * src_mean`.
#[derive(Debug, Clone, Default)]
pub struct ProcrustesAligner {
    params: AlignParams,
}

impl ProcrustesAligner {
    /// Create an aligner with the given parameters.
    pub fn new(params: AlignParams) -> Self {
        Self { params }
    }

    /// The parameters of the aligner.
    pub fn params(&self) -> &AlignParams {
        &self.params
    }

    /// Estimate the pose mapping `source` onto `target`.
    ///
    /// # Arguments
    ///
    /// * `source` - Source points.
    /// * `target` - Target points, `target[i]` corresponds to `source[i]`.
    ///
    /// # Errors
    ///
    /// * [`ProcrustesError::MismatchedInputLengths`] if the sets differ in length.
    /// * [`ProcrustesError::EmptyPointSet`] if the sets are empty.
    /// * [`ProcrustesError::NonFiniteInput`] if a coordinate is NaN or infinite.
    /// * [`ProcrustesError::InvalidParams`] if `rank_tolerance` is negative or not finite.
    /// * [`ProcrustesError::DegenerateInput`] if the configuration is rank
    ///   deficient and [`AlignParams::reject_degenerate`] is set.
    pub fn align(
        &self,
        source: &[DVec3],
        target: &[DVec3],
    ) -> Result<AlignResult, ProcrustesError> {
        let tolerance = self.params.rank_tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ProcrustesError::InvalidParams(
                "rank_tolerance must be finite and non-negative",
            ));
        }

        let (src_centroid, dst_centroid) = compute_centroids(source, target)?;

        // cross-covariance H = Σ[(src - src_mean) * (dst - dst_mean)^T]
        let mut h = DMat3::ZERO;
        for (&src_pt, &dst_pt) in source.iter().zip(target.iter()) {
            let src_centered = src_pt - src_centroid;
            let dst_centered = dst_pt - dst_centroid;
            h += DMat3::from_cols(
                src_centered * dst_centered.x,
                src_centered * dst_centered.y,
                src_centered * dst_centered.z,
            );
        }

        let svd = svd3(&h);
        let (u, s, v) = (*svd.u(), *svd.s(), *svd.v());

        let rank = numerical_rank(&s, tolerance);
        if rank < 2 {
            if self.params.reject_degenerate {
                return Err(ProcrustesError::DegenerateInput { rank });
            }
            log::warn!(
                "Rank deficient cross-covariance (rank {rank}, singular values {s}): rotation is not unique"
            );
        }

        let mut rotation = v * u.transpose();
        let reflection_corrected = rotation.determinant() < 0.0;
        if reflection_corrected {
            log::debug!("V * U^T is a reflection, flipping the last singular vector");
            let v_corrected = DMat3::from_cols(v.x_axis, v.y_axis, -v.z_axis);
            rotation = v_corrected * u.transpose();
        }

        let translation = dst_centroid - rotation * src_centroid;
        let pose = Pose::from_rotation_translation(rotation, translation);

        let rmse = metrics::rmse(&pose, source, target)?;
        log::debug!(
            "Aligned {} correspondences, rank {rank}, rmse {rmse:e}",
            source.len()
        );

        Ok(AlignResult {
            pose,
            singular_values: s,
            rank,
            reflection_corrected,
            rmse,
        })
    }

    /// Estimate the pose mapping `source` onto `target`, see [`ProcrustesAligner::align`].
    pub fn estimate_pose(
        &self,
        source: &[DVec3],
        target: &[DVec3],
    ) -> Result<Pose, ProcrustesError> {
        self.align(source, target).map(|result| result.pose)
    }
}

/// Estimate the rigid pose mapping `source` onto `target` with default parameters.
///
/// The returned pose satisfies `pose * source[i] ≈ target[i]` in the
/// least-squares sense.
///
/// This runs the full [`ProcrustesAligner::align`], including the residual
/// pass over all points, and keeps only the pose.
pub fn estimate_pose(source: &[DVec3], target: &[DVec3]) -> Result<Pose, ProcrustesError> {
    ProcrustesAligner::default().estimate_pose(source, target)
}

fn numerical_rank(s: &DVec3, tolerance: f64) -> usize {
    if s.x <= 0.0 {
        return 0;
    }
    let threshold = tolerance * s.x;
    s.to_array().iter().filter(|&&sv| sv > threshold).count()
}
