use glam::DVec3;

use crate::{
    error::{check_pairing, ProcrustesError},
    pose::Pose,
};

/// Compute the sum of squared distances between the transformed source points and the targets.
///
/// # Arguments
///
/// * `pose` - The transform applied to the source points.
/// * `source` - Source points.
/// * `target` - Target points, `target[i]` corresponds to `source[i]`.
///
/// # Returns
///
/// `Σ ‖pose * source[i] - target[i]‖²`.
pub fn sum_squared_error(
    pose: &Pose,
    source: &[DVec3],
    target: &[DVec3],
) -> Result<f64, ProcrustesError> {
    check_pairing(source, target)?;
    let (rotation, translation) = (pose.rotation(), pose.translation());
    Ok(source
        .iter()
        .zip(target.iter())
        .map(|(&p, &q)| (rotation * p + translation).distance_squared(q))
        .sum())
}

/// Compute the root-mean-square distance between the transformed source points and the targets.
pub fn rmse(pose: &Pose, source: &[DVec3], target: &[DVec3]) -> Result<f64, ProcrustesError> {
    let sse = sum_squared_error(pose, source, target)?;
    Ok((sse / source.len() as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sum_squared_error() -> Result<(), ProcrustesError> {
        let source = vec![DVec3::new(0.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0)];
        let target = vec![DVec3::new(1.0, 0.0, 0.0), DVec3::new(2.0, 2.0, 0.0)];
        let pose = Pose::from_rotation_translation(glam::DMat3::IDENTITY, DVec3::X);

        // residuals are 0 and 2
        assert_relative_eq!(sum_squared_error(&pose, &source, &target)?, 4.0);
        assert_relative_eq!(rmse(&pose, &source, &target)?, 2.0_f64.sqrt());
        Ok(())
    }

    #[test]
    fn test_metrics_invalid_input() {
        let pose = Pose::IDENTITY;
        assert_eq!(rmse(&pose, &[], &[]), Err(ProcrustesError::EmptyPointSet));
        assert!(sum_squared_error(&pose, &[DVec3::ZERO], &[]).is_err());
    }
}
