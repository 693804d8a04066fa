use kiddo::{KdTree, SquaredEuclidean};
use rayon::prelude::*;

use crate::error::CompareError;
use crate::io::geometry::PointSet;

/// For every baseline index, the comparison index treated as the same
/// physical surface location.
pub type CorrespondenceMap = Vec<usize>;

/// Maps each baseline point to its counterpart in the comparison set.
///
/// Equal counts map by index: both captures are assumed to be exports of the
/// same underlying point template, where same length implies same order.
/// Unequal counts fall back to nearest-neighbor matching over a k-d tree
/// built on the comparison set; exact distance ties resolve to the lowest
/// comparison index so the mapping is deterministic regardless of tree
/// layout.
pub fn resolve_correspondence(
    baseline: &PointSet,
    comparison: &PointSet,
) -> Result<CorrespondenceMap, CompareError> {
    if comparison.is_empty() {
        return Err(CompareError::invalid("comparison point set is empty"));
    }

    if baseline.len() == comparison.len() {
        return Ok((0..baseline.len()).collect());
    }

    let mut tree: KdTree<f64, 3> = KdTree::with_capacity(comparison.len());
    for (i, p) in comparison.positions.iter().enumerate() {
        tree.add(&[p.x, p.y, p.z], i as u64);
    }

    let map = baseline
        .positions
        .par_iter()
        .map(|p| {
            let query = [p.x, p.y, p.z];
            let nearest = tree.nearest_one::<SquaredEuclidean>(&query);
            // Sweep everything at the same squared distance so ties resolve
            // to the lowest index.
            let radius = nearest.distance.max(f64::MIN_POSITIVE) * (1.0 + 1e-9);
            tree.within_unsorted::<SquaredEuclidean>(&query, radius)
                .into_iter()
                .filter(|n| n.distance <= nearest.distance)
                .map(|n| n.item as usize)
                .min()
                .unwrap_or(nearest.item as usize)
        })
        .collect();

    Ok(map)
}

#[cfg(test)]
mod correspondence_tests {
    use super::*;
    use crate::utils::test_utils::{ellipsoid_surface, jittered_points};
    use nalgebra::Vector3;

    #[test]
    fn test_equal_counts_use_identity() {
        let surface = ellipsoid_surface("a", Vector3::new(1.0, 1.5, 0.8), 6, 12);
        let baseline = surface.points.clone();
        let comparison = jittered_points(&baseline, 0.05, 7);

        let map = resolve_correspondence(&baseline, &comparison).unwrap();
        assert_eq!(map.len(), baseline.len());
        for (i, &j) in map.iter().enumerate() {
            assert_eq!(i, j);
        }
    }

    #[test]
    fn test_unequal_counts_stay_in_range() {
        let baseline = ellipsoid_surface("a", Vector3::new(1.0, 1.0, 1.0), 10, 10).points;
        let comparison = ellipsoid_surface("b", Vector3::new(1.0, 1.0, 1.0), 5, 10).points;
        assert_eq!(baseline.len(), 100);
        assert_eq!(comparison.len(), 50);

        let map = resolve_correspondence(&baseline, &comparison).unwrap();
        assert_eq!(map.len(), 100);
        assert!(map.iter().all(|&j| j < 50));
    }

    #[test]
    fn test_outlier_maps_to_nearest_cluster_point() {
        // comparison cluster near the origin, one comparison point pulled out
        // toward the far-away baseline point
        let comparison = PointSet::new(vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.1, 0.0, 0.0),
            Vector3::new(5.0, 0.0, 0.0),
        ]);
        let baseline = PointSet::new(vec![
            Vector3::new(0.05, 0.0, 0.0),
            Vector3::new(100.0, 0.0, 0.0),
        ]);

        let map = resolve_correspondence(&baseline, &comparison).unwrap();
        // far outlier snaps to the closest of the three comparison points
        assert_eq!(map[1], 2);
    }

    #[test]
    fn test_exact_ties_take_lowest_index() {
        // baseline point equidistant from comparison[0] and comparison[2]
        let comparison = PointSet::new(vec![
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(10.0, 10.0, 10.0),
            Vector3::new(-1.0, 0.0, 0.0),
        ]);
        let baseline = PointSet::new(vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(20.0, 20.0, 20.0),
        ]);

        let map = resolve_correspondence(&baseline, &comparison).unwrap();
        assert_eq!(map[0], 0);
    }

    #[test]
    fn test_empty_comparison_rejected() {
        let baseline = PointSet::new(vec![Vector3::new(0.0, 0.0, 0.0)]);
        let comparison = PointSet::new(Vec::new());
        assert!(resolve_correspondence(&baseline, &comparison).is_err());
    }
}
