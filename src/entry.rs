use anyhow::anyhow;
use crossbeam::thread;
use serde::Serialize;

use std::collections::BTreeMap;

use crate::config::CompareConfig;
use crate::error::CompareError;
use crate::io::check_comparison_inputs;
use crate::io::geometry::{NormalSet, PointSet, SurfaceSet};
use crate::processing::align::center_point_sets;
use crate::processing::correspondence::resolve_correspondence;
use crate::processing::displacement::{compute_displacements, DisplacementField};
use crate::processing::stats::{aggregate_full, aggregate_masked, DisplacementStats};
use crate::regions::{normalize_coordinates, BodyRegion, BoxRegionClassifier, RegionClassifier};
use crate::texture::colormap::{ColorField, ColorMapper};

/// Everything one comparison produces. Created once per invocation and never
/// mutated afterwards; the caller owns persistence.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub displacement: DisplacementField,
    pub global_stats: DisplacementStats,
    /// Per-region statistics over the raw region masks. Regions whose mask
    /// predicates overlap (waist/hips) count shared points in both entries.
    pub region_stats: BTreeMap<BodyRegion, DisplacementStats>,
    /// Exclusive per-point label, priority-ordered.
    pub region_labels: Vec<BodyRegion>,
    pub colors: ColorField,
}

/// Runs the full comparison pipeline with the built-in box-rule region
/// classifier.
pub fn run_comparison(
    baseline: &SurfaceSet,
    comparison: &PointSet,
    config: &CompareConfig,
) -> Result<ComparisonResult, CompareError> {
    run_comparison_with(baseline, comparison, &BoxRegionClassifier::new(), config)
}

/// Same pipeline with a caller-supplied region classifier.
pub fn run_comparison_with(
    baseline: &SurfaceSet,
    comparison: &PointSet,
    classifier: &dyn RegionClassifier,
    config: &CompareConfig,
) -> Result<ComparisonResult, CompareError> {
    check_comparison_inputs(baseline, comparison)?;

    let (baseline_points, comparison_points) = if config.align {
        center_point_sets(&baseline.points, comparison)?
    } else {
        (baseline.points.clone(), comparison.clone())
    };

    let correspondence = resolve_correspondence(&baseline_points, &comparison_points)?;
    let displacement = compute_displacements(
        &baseline_points,
        &baseline.normals,
        &comparison_points,
        &correspondence,
    )?;

    let global_stats = aggregate_full(&displacement);

    let classification_coords = if config.normalize_region_coordinates {
        normalize_coordinates(&baseline_points.positions)
    } else {
        baseline_points.positions.clone()
    };
    let region_labels = classifier.assign_regions(&classification_coords);
    let masks = classifier.region_masks(&classification_coords);

    let mut region_stats = BTreeMap::new();
    for (region, mask) in masks.iter() {
        region_stats.insert(region, aggregate_masked(&displacement, mask));
    }

    let mapper = ColorMapper::new(config.change_threshold, config.external_ceiling);
    let colors = mapper.map_projections(&displacement.projections);

    Ok(ComparisonResult {
        displacement,
        global_stats,
        region_stats,
        region_labels,
        colors,
    })
}

/// Raw-buffer front door: float32 vertex/normal triples straight from the
/// decoding layer.
pub fn compare_buffers(
    baseline_vertices: &[[f32; 3]],
    baseline_normals: &[[f32; 3]],
    comparison_vertices: &[[f32; 3]],
    config: &CompareConfig,
) -> Result<ComparisonResult, CompareError> {
    let baseline = SurfaceSet::new(
        "baseline",
        PointSet::from_f32_triples(baseline_vertices),
        NormalSet::from_f32_triples(baseline_normals),
    );
    let comparison = PointSet::from_f32_triples(comparison_vertices);
    run_comparison(&baseline, &comparison, config)
}

/// Compares a series of later captures against one baseline.
///
/// The comparisons are fully independent, so each runs on its own scoped
/// thread; results come back in input order. Prints a per-capture summary
/// table once all comparisons finish.
pub fn run_timeline(
    baseline: &SurfaceSet,
    comparisons: &[PointSet],
    config: &CompareConfig,
) -> anyhow::Result<Vec<ComparisonResult>> {
    let results = thread::scope(|s| -> Result<Vec<ComparisonResult>, CompareError> {
        let handles: Vec<_> = comparisons
            .iter()
            .map(|comparison| s.spawn(move |_| run_comparison(baseline, comparison, config)))
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.join().unwrap()?);
        }
        Ok(results)
    })
    .map_err(|panic_payload| anyhow!("comparison threads panicked: {:?}", panic_payload))??;

    println!();
    println!(
        "{:>10} | {:>10} | {:>14} | {:>12} | {:>12}",
        "Capture", "Points", "Avg Magnitude", "Increase %", "Decrease %"
    );
    println!("{:-<70}", "");
    for (i, result) in results.iter().enumerate() {
        println!(
            "{:>10} | {:>10} | {:>14.4} | {:>12.1} | {:>12.1}",
            i,
            result.displacement.len(),
            result.global_stats.avg_magnitude,
            result.global_stats.increase_percentage,
            result.global_stats.decrease_percentage,
        );
    }
    println!();

    Ok(results)
}

#[cfg(test)]
mod entry_tests {
    use super::*;
    use crate::texture::colormap::COLOR_NO_CHANGE;
    use crate::utils::test_utils::{offset_along_normals, unit_cube_surface};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_identical_captures_report_no_change() {
        let baseline = unit_cube_surface("baseline");
        let comparison = baseline.points.clone();
        let result = run_comparison(&baseline, &comparison, &CompareConfig::default()).unwrap();

        assert_eq!(result.displacement.len(), 8);
        for i in 0..8 {
            assert_relative_eq!(result.displacement.magnitudes[i], 0.0, epsilon = 1e-12);
        }
        assert_relative_eq!(result.global_stats.increase_percentage, 0.0, epsilon = 1e-12);
        assert_relative_eq!(result.global_stats.decrease_percentage, 0.0, epsilon = 1e-12);
        assert_relative_eq!(
            result.global_stats.no_change_percentage,
            100.0,
            epsilon = 1e-12
        );
        assert!(result.colors.colors.iter().all(|c| *c == COLOR_NO_CHANGE));
        // documented fallback, not an error
        assert_relative_eq!(result.colors.ceiling, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_uniform_growth_saturates_red() {
        let baseline = unit_cube_surface("baseline");
        let comparison = offset_along_normals(&baseline, 0.1);
        let result = run_comparison(&baseline, &comparison, &CompareConfig::default()).unwrap();

        for i in 0..8 {
            assert_relative_eq!(result.displacement.projections[i], 0.1, epsilon = 1e-10);
            assert_eq!(result.displacement.signs[i], 1);
        }
        assert_relative_eq!(result.colors.ceiling, 0.1, epsilon = 1e-10);
        assert!(result.colors.colors.iter().all(|c| *c == [255, 0, 0]));
        assert_relative_eq!(
            result.global_stats.increase_percentage,
            100.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_unequal_counts_resolve_per_baseline_point() {
        let baseline = crate::utils::test_utils::ellipsoid_surface(
            "baseline",
            Vector3::new(1.0, 1.0, 1.0),
            10,
            10,
        );
        let comparison =
            crate::utils::test_utils::ellipsoid_surface("later", Vector3::new(1.0, 1.0, 1.0), 5, 10)
                .points;
        let result = run_comparison(&baseline, &comparison, &CompareConfig::default()).unwrap();

        assert_eq!(result.displacement.len(), 100);
        assert_eq!(result.region_labels.len(), 100);
        assert_eq!(result.colors.colors.len(), 100);
    }

    #[test]
    fn test_region_stats_cover_all_regions() {
        let baseline = unit_cube_surface("baseline");
        let comparison = baseline.points.clone();
        let result = run_comparison(&baseline, &comparison, &CompareConfig::default()).unwrap();

        assert_eq!(result.region_stats.len(), 6);
        let total_labelled: usize = result
            .region_stats
            .values()
            .map(|stats| stats.total_points)
            .sum();
        // raw masks may overlap, so the sum is at least the point count
        assert!(total_labelled >= 8);
    }

    #[test]
    fn test_invalid_inputs_abort_whole_comparison() {
        let baseline = unit_cube_surface("baseline");
        let empty = PointSet::new(Vec::new());
        assert!(run_comparison(&baseline, &empty, &CompareConfig::default()).is_err());

        let mut bad_normals = baseline.clone();
        bad_normals.normals.normals.pop();
        let comparison = baseline.points.clone();
        assert!(run_comparison(&bad_normals, &comparison, &CompareConfig::default()).is_err());

        let mut non_finite = baseline.clone();
        non_finite.points.positions[0].x = f64::INFINITY;
        assert!(run_comparison(&non_finite, &comparison, &CompareConfig::default()).is_err());
    }

    #[test]
    fn test_compare_buffers_front_door() {
        let vertices = [[0.0_f32, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let normals = [[0.0_f32, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0]];
        let result =
            compare_buffers(&vertices, &normals, &vertices, &CompareConfig::default()).unwrap();
        assert_eq!(result.displacement.len(), 3);
        assert_relative_eq!(
            result.global_stats.no_change_percentage,
            100.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_timeline_keeps_input_order() {
        let baseline = unit_cube_surface("baseline");
        let unchanged = baseline.points.clone();
        let grown = offset_along_normals(&baseline, 0.2);

        let results =
            run_timeline(&baseline, &[unchanged, grown], &CompareConfig::default()).unwrap();
        assert_eq!(results.len(), 2);
        assert_relative_eq!(
            results[0].global_stats.no_change_percentage,
            100.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            results[1].global_stats.increase_percentage,
            100.0,
            epsilon = 1e-12
        );
    }
}
