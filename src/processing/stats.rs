use serde::Serialize;

use super::displacement::DisplacementField;

/// Summary of a displacement field over one index subset (the full set for
/// the global view, one region mask for the regional view).
///
/// An empty subset yields the all-zero summary: an empty region is an
/// expected data condition, not an error, and percentages never divide by
/// zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplacementStats {
    pub total_points: usize,
    pub avg_magnitude: f64,
    pub min_magnitude: f64,
    pub max_magnitude: f64,
    pub increase_count: usize,
    pub decrease_count: usize,
    pub no_change_count: usize,
    pub increase_percentage: f64,
    pub decrease_percentage: f64,
    pub no_change_percentage: f64,
    /// Average projection over the positive-sign subset (0.0 when none).
    pub avg_increase: f64,
    /// Average projection over the negative-sign subset (0.0 when none).
    pub avg_decrease: f64,
}

impl DisplacementStats {
    pub fn empty() -> Self {
        DisplacementStats {
            total_points: 0,
            avg_magnitude: 0.0,
            min_magnitude: 0.0,
            max_magnitude: 0.0,
            increase_count: 0,
            decrease_count: 0,
            no_change_count: 0,
            increase_percentage: 0.0,
            decrease_percentage: 0.0,
            no_change_percentage: 0.0,
            avg_increase: 0.0,
            avg_decrease: 0.0,
        }
    }
}

/// Statistics over every point of the field.
pub fn aggregate_full(field: &DisplacementField) -> DisplacementStats {
    aggregate_indices(field, 0..field.len())
}

/// Statistics over the points a boolean mask selects.
pub fn aggregate_masked(field: &DisplacementField, mask: &[bool]) -> DisplacementStats {
    debug_assert_eq!(mask.len(), field.len());
    aggregate_indices(
        field,
        mask.iter()
            .enumerate()
            .filter_map(|(i, &selected)| selected.then_some(i)),
    )
}

// Sequential, index-ordered accumulation keeps the reduction deterministic
// across runs and thread counts.
fn aggregate_indices(
    field: &DisplacementField,
    indices: impl Iterator<Item = usize>,
) -> DisplacementStats {
    let mut count = 0usize;
    let mut sum_magnitude = 0.0;
    let mut min_magnitude = f64::INFINITY;
    let mut max_magnitude = f64::NEG_INFINITY;
    let mut increase_count = 0usize;
    let mut decrease_count = 0usize;
    let mut no_change_count = 0usize;
    let mut sum_increase = 0.0;
    let mut sum_decrease = 0.0;

    for i in indices {
        let magnitude = field.magnitudes[i];
        let projection = field.projections[i];

        count += 1;
        sum_magnitude += magnitude;
        min_magnitude = min_magnitude.min(magnitude);
        max_magnitude = max_magnitude.max(magnitude);

        match field.signs[i] {
            1 => {
                increase_count += 1;
                sum_increase += projection;
            }
            -1 => {
                decrease_count += 1;
                sum_decrease += projection;
            }
            _ => no_change_count += 1,
        }
    }

    if count == 0 {
        return DisplacementStats::empty();
    }

    let percentage = |c: usize| c as f64 / count as f64 * 100.0;

    DisplacementStats {
        total_points: count,
        avg_magnitude: sum_magnitude / count as f64,
        min_magnitude,
        max_magnitude,
        increase_count,
        decrease_count,
        no_change_count,
        increase_percentage: percentage(increase_count),
        decrease_percentage: percentage(decrease_count),
        no_change_percentage: percentage(no_change_count),
        avg_increase: if increase_count > 0 {
            sum_increase / increase_count as f64
        } else {
            0.0
        },
        avg_decrease: if decrease_count > 0 {
            sum_decrease / decrease_count as f64
        } else {
            0.0
        },
    }
}
