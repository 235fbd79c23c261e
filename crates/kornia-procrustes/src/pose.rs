//! Rigid homogeneous transform returned by the aligner.
//!
//! A [`Pose`] maps a point `p` in the source frame to `R * p + t` in the
//! target frame. The rotation occupies the upper-left 3x3 block of the
//! underlying 4x4 matrix, the translation the upper-right 3x1 block, and the
//! bottom row is always `[0, 0, 0, 1]`.

use glam::{DMat3, DMat4, DVec3, DVec4};

use crate::error::ProcrustesError;

/// Tolerance used by [`Pose::from_matrix`] to validate the rigid structure.
const RIGID_TOL: f64 = 1e-6;

/// A 4x4 homogeneous rigid transform (rotation + translation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose(DMat4);

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// The identity transform.
    pub const IDENTITY: Self = Self(DMat4::IDENTITY);

    /// Create a pose from a rotation matrix and a translation vector.
    ///
    /// The rotation is stored as given; no orthonormalization is applied.
    pub fn from_rotation_translation(rotation: DMat3, translation: DVec3) -> Self {
        Self(DMat4::from_cols(
            rotation.x_axis.extend(0.0),
            rotation.y_axis.extend(0.0),
            rotation.z_axis.extend(0.0),
            translation.extend(1.0),
        ))
    }

    /// Create a pose from a 4x4 matrix, checking that it is a rigid transform.
    ///
    /// The bottom row must be `[0, 0, 0, 1]` and the upper-left block a proper
    /// rotation (orthonormal with determinant +1).
    pub fn from_matrix(matrix: DMat4) -> Result<Self, ProcrustesError> {
        if !matrix.is_finite() {
            return Err(ProcrustesError::InvalidPose("matrix has non-finite entries"));
        }
        if !matrix.row(3).abs_diff_eq(DVec4::W, RIGID_TOL) {
            return Err(ProcrustesError::InvalidPose("bottom row must be [0, 0, 0, 1]"));
        }
        let rotation = DMat3::from_mat4(matrix);
        if !(rotation.transpose() * rotation).abs_diff_eq(DMat3::IDENTITY, RIGID_TOL) {
            return Err(ProcrustesError::InvalidPose("rotation block is not orthonormal"));
        }
        if rotation.determinant() < 0.0 {
            return Err(ProcrustesError::InvalidPose("rotation block is a reflection"));
        }
        Ok(Self(matrix))
    }

    /// The rotation block `R`.
    pub fn rotation(&self) -> DMat3 {
        DMat3::from_mat4(self.0)
    }

    /// The translation block `t`.
    pub fn translation(&self) -> DVec3 {
        self.0.w_axis.truncate()
    }

    /// The underlying 4x4 matrix (column-major storage).
    pub fn matrix(&self) -> &DMat4 {
        &self.0
    }

    /// The 4x4 matrix as row-major nested arrays, `rows[i][j]` being row `i`, column `j`.
    pub fn to_rows_array(&self) -> [[f64; 4]; 4] {
        self.0.transpose().to_cols_array_2d()
    }

    /// Apply the transform to a single point: `R * p + t`.
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.0.transform_point3(point)
    }

    /// Transform a set of points.
    ///
    /// # Arguments
    ///
    /// * `src_points` - A set of points to be transformed.
    /// * `dst_points` - A pre-allocated slice to store the transformed points.
    ///
    /// PRECONDITION: `dst_points` has the same length as `src_points`.
    pub fn transform_points(
        &self,
        src_points: &[DVec3],
        dst_points: &mut [DVec3],
    ) -> Result<(), ProcrustesError> {
        if src_points.len() != dst_points.len() {
            return Err(ProcrustesError::MismatchedInputLengths {
                source_len: src_points.len(),
                target_len: dst_points.len(),
            });
        }
        let (rotation, translation) = (self.rotation(), self.translation());
        for (dst, &src) in dst_points.iter_mut().zip(src_points.iter()) {
            *dst = rotation * src + translation;
        }
        Ok(())
    }

    /// The inverse rigid transform `(R^T, -R^T * t)`.
    pub fn inverse(&self) -> Self {
        let rotation_inv = self.rotation().transpose();
        Self::from_rotation_translation(rotation_inv, -(rotation_inv * self.translation()))
    }

    /// Compose two poses: the result applies `other` first, then `self`.
    pub fn compose(&self, other: &Pose) -> Self {
        Self(self.0 * other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_pose() -> Pose {
        let rotation = DMat3::from_axis_angle(DVec3::new(1.0, 2.0, 3.0).normalize(), 0.7);
        Pose::from_rotation_translation(rotation, DVec3::new(1.0, -2.0, 0.5))
    }

    #[test]
    fn test_pose_identity() {
        let p = DVec3::new(2.0, 3.0, 4.0);
        assert_eq!(Pose::IDENTITY.transform_point(p), p);
        assert_eq!(Pose::default(), Pose::IDENTITY);
        assert_eq!(Pose::IDENTITY.translation(), DVec3::ZERO);
    }

    #[test]
    fn test_pose_blocks() {
        let rotation = DMat3::from_rotation_z(std::f64::consts::FRAC_PI_2);
        let translation = DVec3::new(1.0, 2.0, 3.0);
        let pose = Pose::from_rotation_translation(rotation, translation);

        assert_eq!(pose.rotation(), rotation);
        assert_eq!(pose.translation(), translation);

        let rows = pose.to_rows_array();
        assert_eq!(rows[3], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!([rows[0][3], rows[1][3], rows[2][3]], [1.0, 2.0, 3.0]);
        assert_relative_eq!(rows[0][1], -1.0, epsilon = 1e-12);
        assert_relative_eq!(rows[1][0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_transform_points() -> Result<(), ProcrustesError> {
        let pose = Pose::from_rotation_translation(
            DMat3::from_rotation_x(std::f64::consts::FRAC_PI_2),
            DVec3::new(1.0, 2.0, 3.0),
        );
        let src_points = vec![DVec3::new(2.0, 2.0, 2.0), DVec3::new(3.0, 4.0, 5.0)];
        let mut dst_points = vec![DVec3::ZERO; src_points.len()];
        pose.transform_points(&src_points, &mut dst_points)?;

        for (dst, &src) in dst_points.iter().zip(src_points.iter()) {
            assert!(dst.abs_diff_eq(pose.transform_point(src), 1e-12));
        }
        assert!(dst_points[0].abs_diff_eq(DVec3::new(3.0, 0.0, 5.0), 1e-12));

        let mut too_short = vec![DVec3::ZERO; 1];
        assert!(pose.transform_points(&src_points, &mut too_short).is_err());
        Ok(())
    }

    #[test]
    fn test_pose_inverse_roundtrip() {
        let pose = test_pose();
        let p = DVec3::new(0.3, -4.0, 2.5);
        let back = pose.inverse().transform_point(pose.transform_point(p));
        assert!(back.abs_diff_eq(p, 1e-12));
        assert!(pose
            .compose(&pose.inverse())
            .matrix()
            .abs_diff_eq(DMat4::IDENTITY, 1e-12));
    }

    #[test]
    fn test_pose_compose_order() {
        let a = Pose::from_rotation_translation(DMat3::IDENTITY, DVec3::X);
        let b = Pose::from_rotation_translation(
            DMat3::from_rotation_z(std::f64::consts::FRAC_PI_2),
            DVec3::ZERO,
        );
        // rotate first, then translate
        let p = a.compose(&b).transform_point(DVec3::X);
        assert!(p.abs_diff_eq(DVec3::new(1.0, 1.0, 0.0), 1e-12));
    }

    #[test]
    fn test_pose_from_matrix() {
        let pose = test_pose();
        assert_eq!(Pose::from_matrix(*pose.matrix()), Ok(pose));

        let scaled = DMat4::from_scale(DVec3::splat(2.0));
        assert!(matches!(
            Pose::from_matrix(scaled),
            Err(ProcrustesError::InvalidPose(_))
        ));

        let reflection = DMat4::from_scale(DVec3::new(1.0, 1.0, -1.0));
        assert!(Pose::from_matrix(reflection).is_err());

        let mut projective = DMat4::IDENTITY;
        projective.x_axis.w = 0.5;
        assert!(Pose::from_matrix(projective).is_err());
    }
}
