use nalgebra::Vector3;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::CompareError;
use crate::io::geometry::{NormalSet, PointSet};

use super::correspondence::CorrespondenceMap;

/// Per-point change field, one entry per baseline point, stored as parallel
/// arrays rather than per-point records.
///
/// `projections[i]` is the signed component of `vectors[i]` along the local
/// outward normal: positive means outward growth, negative inward shrinkage.
/// `signs[i]` is exactly the algebraic sign of `projections[i]`, with 0
/// mapping to 0.
#[derive(Debug, Clone, Serialize)]
pub struct DisplacementField {
    pub vectors: Vec<Vector3<f64>>,
    pub magnitudes: Vec<f64>,
    pub projections: Vec<f64>,
    pub signs: Vec<i8>,
}

impl DisplacementField {
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }
}

/// Computes displacement vectors, magnitudes and normal projections for each
/// matched point pair.
///
/// The comparison set is read through the correspondence map, so entry `i`
/// of every output array belongs to baseline index `i`.
pub fn compute_displacements(
    baseline: &PointSet,
    normals: &NormalSet,
    comparison: &PointSet,
    correspondence: &CorrespondenceMap,
) -> Result<DisplacementField, CompareError> {
    if baseline.len() != normals.len() {
        return Err(CompareError::invalid(format!(
            "baseline has {} points but {} normals",
            baseline.len(),
            normals.len()
        )));
    }
    debug_assert_eq!(baseline.len(), correspondence.len());

    let per_point: Vec<(Vector3<f64>, f64, f64, i8)> = baseline
        .positions
        .par_iter()
        .zip(normals.normals.par_iter())
        .zip(correspondence.par_iter())
        .map(|((base, normal), &matched_index)| {
            let matched = comparison.positions[matched_index];
            let vector = matched - base;
            let magnitude = vector.norm();
            // dot() can drift a hair past the magnitude bound for unit
            // normals; clamp keeps the invariant exact
            let projection = vector.dot(normal).clamp(-magnitude, magnitude);
            let sign = if projection > 0.0 {
                1
            } else if projection < 0.0 {
                -1
            } else {
                0
            };
            (vector, magnitude, projection, sign)
        })
        .collect();

    let n = per_point.len();
    let mut field = DisplacementField {
        vectors: Vec::with_capacity(n),
        magnitudes: Vec::with_capacity(n),
        projections: Vec::with_capacity(n),
        signs: Vec::with_capacity(n),
    };
    for (vector, magnitude, projection, sign) in per_point {
        field.vectors.push(vector);
        field.magnitudes.push(magnitude);
        field.projections.push(projection);
        field.signs.push(sign);
    }

    Ok(field)
}
