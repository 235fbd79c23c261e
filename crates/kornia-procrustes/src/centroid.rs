use glam::DVec3;

use crate::error::{check_finite, check_pairing, ProcrustesError};

/// Compute the centroid of a point set.
///
/// # Arguments
///
/// * `points` - A set of points.
///
/// # Returns
///
/// The per-axis arithmetic mean of the points, [`ProcrustesError::EmptyPointSet`]
/// when the set is empty or [`ProcrustesError::NonFiniteInput`] when a coordinate
/// is NaN or infinite.
///
/// Example:
///
/// ```
/// use glam::DVec3;
/// use kornia_procrustes::compute_centroid;
///
/// let points = [DVec3::new(1.0, 2.0, 3.0), DVec3::new(3.0, 4.0, 5.0)];
/// let centroid = compute_centroid(&points).unwrap();
/// assert_eq!(centroid, DVec3::new(2.0, 3.0, 4.0));
/// ```
pub fn compute_centroid(points: &[DVec3]) -> Result<DVec3, ProcrustesError> {
    if points.is_empty() {
        return Err(ProcrustesError::EmptyPointSet);
    }
    check_finite(points, "points")?;
    let sum = points.iter().fold(DVec3::ZERO, |acc, &p| acc + p);
    Ok(sum / points.len() as f64)
}

/// Compute the centroids of two index-paired point sets.
///
/// Both sets must have the same, non-zero, number of points.
pub fn compute_centroids(
    points_src: &[DVec3],
    points_dst: &[DVec3],
) -> Result<(DVec3, DVec3), ProcrustesError> {
    check_pairing(points_src, points_dst)?;
    Ok((compute_centroid(points_src)?, compute_centroid(points_dst)?))
}
