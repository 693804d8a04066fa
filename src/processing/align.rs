use crate::error::CompareError;
use crate::io::geometry::PointSet;

/// Translates a set into its own centroid-relative frame.
pub fn center_at_origin(points: &PointSet) -> Result<PointSet, CompareError> {
    let centroid = points
        .centroid()
        .ok_or_else(|| CompareError::invalid("cannot center an empty point set"))?;
    Ok(points.translated(-centroid))
}

/// Centers both captures independently at their own centroids.
///
/// Two captures of the same subject arrive in arbitrary capture-relative
/// coordinate frames; subtracting each centroid removes the translation bias
/// between them. Rotation is assumed consistent between captures, so no
/// rigid registration happens here. Cardinalities may differ.
pub fn center_point_sets(
    baseline: &PointSet,
    comparison: &PointSet,
) -> Result<(PointSet, PointSet), CompareError> {
    let baseline_centered = center_at_origin(baseline)?;
    let comparison_centered = center_at_origin(comparison)?;
    Ok((baseline_centered, comparison_centered))
}

#[cfg(test)]
mod align_tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_centered_set_has_zero_centroid() {
        let points = PointSet::new(vec![
            Vector3::new(10.0, 5.0, -2.0),
            Vector3::new(12.0, 5.0, -2.0),
            Vector3::new(11.0, 8.0, 4.0),
        ]);
        let centered = center_at_origin(&points).unwrap();
        let centroid = centered.centroid().unwrap();
        assert_relative_eq!(centroid.norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_centering_preserves_shape() {
        let points = PointSet::new(vec![
            Vector3::new(100.0, 0.0, 0.0),
            Vector3::new(103.0, 4.0, 0.0),
        ]);
        let centered = center_at_origin(&points).unwrap();
        let before = (points.positions[0] - points.positions[1]).norm();
        let after = (centered.positions[0] - centered.positions[1]).norm();
        assert_relative_eq!(before, after, epsilon = 1e-12);
        assert_relative_eq!(after, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sets_are_centered_independently() {
        let baseline = PointSet::new(vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
        ]);
        // same shape, far away and with an extra point
        let comparison = PointSet::new(vec![
            Vector3::new(50.0, 50.0, 50.0),
            Vector3::new(52.0, 50.0, 50.0),
            Vector3::new(51.0, 50.0, 50.0),
        ]);
        let (b, c) = center_point_sets(&baseline, &comparison).unwrap();
        assert_relative_eq!(b.centroid().unwrap().norm(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(c.centroid().unwrap().norm(), 0.0, epsilon = 1e-12);
        assert_eq!(b.len(), 2);
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn test_empty_set_rejected() {
        let empty = PointSet::new(Vec::new());
        let ok = PointSet::new(vec![Vector3::new(1.0, 2.0, 3.0)]);
        assert!(center_point_sets(&empty, &ok).is_err());
        assert!(center_point_sets(&ok, &empty).is_err());
    }
}
