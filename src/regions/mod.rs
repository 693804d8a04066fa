use nalgebra::Vector3;
use rayon::prelude::*;
use serde::Serialize;

use std::collections::BTreeMap;
use std::fmt;

pub mod box_classifier;

pub use box_classifier::BoxRegionClassifier;

/// Closed set of anatomical zones, declared in classification priority
/// order: when several region predicates match a point, the earliest variant
/// wins the exclusive label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyRegion {
    Arms,
    Chest,
    Waist,
    Hips,
    Thighs,
    Other,
}

impl BodyRegion {
    pub const ALL: [BodyRegion; 6] = [
        BodyRegion::Arms,
        BodyRegion::Chest,
        BodyRegion::Waist,
        BodyRegion::Hips,
        BodyRegion::Thighs,
        BodyRegion::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyRegion::Arms => "arms",
            BodyRegion::Chest => "chest",
            BodyRegion::Waist => "waist",
            BodyRegion::Hips => "hips",
            BodyRegion::Thighs => "thighs",
            BodyRegion::Other => "other",
        }
    }
}

impl fmt::Display for BodyRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Non-exclusive membership per region over the baseline indices.
///
/// A point may satisfy several region predicates at once; the exclusive
/// per-point label is a separate output.
#[derive(Debug, Clone)]
pub struct RegionMasks {
    masks: BTreeMap<BodyRegion, Vec<bool>>,
}

impl RegionMasks {
    pub fn new(masks: BTreeMap<BodyRegion, Vec<bool>>) -> Self {
        RegionMasks { masks }
    }

    /// Exclusive partition derived from per-point labels.
    pub fn from_labels(labels: &[BodyRegion]) -> Self {
        let mut masks = BTreeMap::new();
        for region in BodyRegion::ALL {
            masks.insert(
                region,
                labels.iter().map(|&label| label == region).collect(),
            );
        }
        RegionMasks { masks }
    }

    pub fn mask(&self, region: BodyRegion) -> &[bool] {
        &self.masks[&region]
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyRegion, &[bool])> {
        self.masks
            .iter()
            .map(|(&region, mask)| (region, mask.as_slice()))
    }
}

/// Region assignment as a capability.
///
/// The box-rule variant in this crate is a geometric heuristic; a finer
/// classifier (skeleton-based, learned) can replace it without touching the
/// rest of the pipeline.
pub trait RegionClassifier: Sync {
    /// Exclusive label for one point in normalized body coordinates.
    fn classify(&self, point: &Vector3<f64>) -> BodyRegion;

    /// Exclusive per-point labels.
    fn assign_regions(&self, points: &[Vector3<f64>]) -> Vec<BodyRegion> {
        points.par_iter().map(|p| self.classify(p)).collect()
    }

    /// Raw membership per region. Defaults to the exclusive partition;
    /// classifiers whose predicates overlap override this.
    fn region_masks(&self, points: &[Vector3<f64>]) -> RegionMasks {
        RegionMasks::from_labels(&self.assign_regions(points))
    }
}

/// Centroid-centers the set and rescales by its maximum absolute coordinate,
/// so classifier bounds expressed in the unit body frame apply to captures
/// of any scale or placement. A degenerate all-identical set only gets
/// centered.
pub fn normalize_coordinates(points: &[Vector3<f64>]) -> Vec<Vector3<f64>> {
    if points.is_empty() {
        return Vec::new();
    }

    let centroid = points.iter().fold(Vector3::zeros(), |acc, p| acc + p) / points.len() as f64;
    let centered: Vec<Vector3<f64>> = points.iter().map(|p| p - centroid).collect();

    let max_range = centered
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()).max(p.z.abs()))
        .fold(0.0, f64::max);

    if max_range > 0.0 {
        centered.into_iter().map(|p| p / max_range).collect()
    } else {
        centered
    }
}
