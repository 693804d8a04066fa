use crate::error::CompareError;
use crate::io::geometry::{PointSet, SurfaceSet};

type CheckResult = Result<(), CompareError>;

/// Runs every precondition the core depends on before a comparison starts.
///
/// The decoding layer owns topology validation; only the invariants the
/// pipeline itself relies on are re-checked here, and the first failure
/// aborts the comparison.
pub fn check_comparison_inputs(baseline: &SurfaceSet, comparison: &PointSet) -> CheckResult {
    let checks: &[(&str, fn(&SurfaceSet, &PointSet) -> CheckResult)] = &[
        ("baseline_not_empty", check_baseline_not_empty),
        ("comparison_not_empty", check_comparison_not_empty),
        ("normals_match_points", check_normals_match_points),
        ("coordinates_finite", check_coordinates_finite),
    ];

    for (name, check) in checks {
        if let Err(e) = check(baseline, comparison) {
            log::warn!("integrity check '{}' failed: {}", name, e);
            return Err(e);
        }
    }

    Ok(())
}

fn check_baseline_not_empty(baseline: &SurfaceSet, _comparison: &PointSet) -> CheckResult {
    if baseline.points.is_empty() {
        return Err(CompareError::invalid(format!(
            "baseline point set '{}' is empty",
            baseline.label
        )));
    }
    Ok(())
}

fn check_comparison_not_empty(_baseline: &SurfaceSet, comparison: &PointSet) -> CheckResult {
    if comparison.is_empty() {
        return Err(CompareError::invalid("comparison point set is empty"));
    }
    Ok(())
}

fn check_normals_match_points(baseline: &SurfaceSet, _comparison: &PointSet) -> CheckResult {
    if baseline.points.len() != baseline.normals.len() {
        return Err(CompareError::invalid(format!(
            "baseline '{}' has {} points but {} normals",
            baseline.label,
            baseline.points.len(),
            baseline.normals.len()
        )));
    }
    Ok(())
}

fn check_coordinates_finite(baseline: &SurfaceSet, comparison: &PointSet) -> CheckResult {
    let buffers: [(&str, &[nalgebra::Vector3<f64>]); 3] = [
        ("baseline points", baseline.points.positions.as_slice()),
        ("baseline normals", baseline.normals.normals.as_slice()),
        ("comparison points", comparison.positions.as_slice()),
    ];

    for (name, buffer) in buffers {
        if let Some(index) = buffer
            .iter()
            .position(|v| !(v.x.is_finite() && v.y.is_finite() && v.z.is_finite()))
        {
            return Err(CompareError::invalid(format!(
                "non-finite coordinate in {} at index {}",
                name, index
            )));
        }
    }
    Ok(())
}
