use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use std::collections::HashMap;

use crate::config::CompareConfig;
use crate::entry::{compare_buffers, ComparisonResult};
use crate::processing::stats::DisplacementStats;

/// Python view of one statistics block.
///
/// Attributes mirror the Rust summary: counts, percentages and the signed
/// projection averages.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PyDisplacementStats {
    #[pyo3(get)]
    pub total_points: usize,
    #[pyo3(get)]
    pub avg_magnitude: f64,
    #[pyo3(get)]
    pub min_magnitude: f64,
    #[pyo3(get)]
    pub max_magnitude: f64,
    #[pyo3(get)]
    pub increase_count: usize,
    #[pyo3(get)]
    pub decrease_count: usize,
    #[pyo3(get)]
    pub no_change_count: usize,
    #[pyo3(get)]
    pub increase_percentage: f64,
    #[pyo3(get)]
    pub decrease_percentage: f64,
    #[pyo3(get)]
    pub no_change_percentage: f64,
    #[pyo3(get)]
    pub avg_increase: f64,
    #[pyo3(get)]
    pub avg_decrease: f64,
}

#[pymethods]
impl PyDisplacementStats {
    fn __repr__(&self) -> String {
        format!(
            "DisplacementStats(points={}, avg_mag={:.4}, up={:.1}%, down={:.1}%)",
            self.total_points,
            self.avg_magnitude,
            self.increase_percentage,
            self.decrease_percentage
        )
    }
}

impl From<&DisplacementStats> for PyDisplacementStats {
    fn from(stats: &DisplacementStats) -> Self {
        Self {
            total_points: stats.total_points,
            avg_magnitude: stats.avg_magnitude,
            min_magnitude: stats.min_magnitude,
            max_magnitude: stats.max_magnitude,
            increase_count: stats.increase_count,
            decrease_count: stats.decrease_count,
            no_change_count: stats.no_change_count,
            increase_percentage: stats.increase_percentage,
            decrease_percentage: stats.decrease_percentage,
            no_change_percentage: stats.no_change_percentage,
            avg_increase: stats.avg_increase,
            avg_decrease: stats.avg_decrease,
        }
    }
}

/// Python view of one comparison run.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PyComparisonResult {
    inner: ComparisonResult,
}

#[pymethods]
impl PyComparisonResult {
    fn global_stats(&self) -> PyDisplacementStats {
        PyDisplacementStats::from(&self.inner.global_stats)
    }

    fn region_stats(&self) -> HashMap<String, PyDisplacementStats> {
        self.inner
            .region_stats
            .iter()
            .map(|(region, stats)| (region.to_string(), PyDisplacementStats::from(stats)))
            .collect()
    }

    fn region_labels(&self) -> Vec<String> {
        self.inner
            .region_labels
            .iter()
            .map(|region| region.to_string())
            .collect()
    }

    fn magnitudes(&self) -> Vec<f64> {
        self.inner.displacement.magnitudes.clone()
    }

    fn projections(&self) -> Vec<f64> {
        self.inner.displacement.projections.clone()
    }

    fn colors(&self) -> Vec<(u8, u8, u8)> {
        self.inner
            .colors
            .colors
            .iter()
            .map(|c| (c[0], c[1], c[2]))
            .collect()
    }

    #[getter]
    fn ceiling(&self) -> f64 {
        self.inner.colors.ceiling
    }

    #[getter]
    fn threshold(&self) -> f64 {
        self.inner.colors.threshold
    }

    fn __repr__(&self) -> String {
        format!(
            "ComparisonResult(points={}, ceiling={:.4})",
            self.inner.displacement.len(),
            self.inner.colors.ceiling
        )
    }
}

/// Python wrapper around the comparison pipeline.
///
/// Uses a Python-friendly signature to allow defaults.
#[pyfunction]
#[pyo3(
    signature = (
        baseline_vertices,
        baseline_normals,
        comparison_vertices,
        align = true,
        normalize_region_coordinates = true,
        change_threshold = 0.001f64,
        external_ceiling = None
    )
)]
fn compare_surfaces_py(
    baseline_vertices: Vec<[f32; 3]>,
    baseline_normals: Vec<[f32; 3]>,
    comparison_vertices: Vec<[f32; 3]>,
    align: bool,
    normalize_region_coordinates: bool,
    change_threshold: f64,
    external_ceiling: Option<f64>,
) -> PyResult<PyComparisonResult> {
    let config = CompareConfig {
        align,
        normalize_region_coordinates,
        change_threshold,
        external_ceiling,
    };
    let inner = compare_buffers(
        &baseline_vertices,
        &baseline_normals,
        &comparison_vertices,
        &config,
    )
    .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))?;

    Ok(PyComparisonResult { inner })
}

/// This is the module importable from Python:
///
/// ```python
/// import bodydiff
/// result = bodydiff.compare_surfaces_py(baseline_v, baseline_n, comparison_v)
/// result.global_stats()
/// ```
#[pymodule]
fn bodydiff(_py: Python, m: pyo3::prelude::Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_function(wrap_pyfunction!(compare_surfaces_py, m.clone())?)?;
    m.add_class::<PyDisplacementStats>()?;
    m.add_class::<PyComparisonResult>()?;
    Ok(())
}
