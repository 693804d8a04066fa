use nalgebra::Vector3;

use std::collections::BTreeMap;

use super::{BodyRegion, RegionClassifier, RegionMasks};

/// Inclusive coordinate band.
#[derive(Debug, Clone, Copy)]
struct Band {
    lo: f64,
    hi: f64,
}

impl Band {
    const fn new(lo: f64, hi: f64) -> Self {
        Band { lo, hi }
    }

    fn contains(&self, v: f64) -> bool {
        v >= self.lo && v <= self.hi
    }
}

// Bands are expressed in the normalized body frame: Y vertical (up),
// X lateral, Z depth, coordinates roughly in [-1, 1].
const ARMS_X_EXTREME: f64 = 0.3;
const ARMS_Y: Band = Band::new(-0.2, 0.4);
const CHEST_Y: Band = Band::new(0.1, 0.5);
const WAIST_Y: Band = Band::new(-0.3, 0.1);
const HIPS_Y: Band = Band::new(-0.3, 0.0);
const THIGHS_Y: Band = Band::new(-0.8, -0.3);
const THIGHS_X: Band = Band::new(-0.4, 0.4);
const TORSO_X: Band = Band::new(-0.5, 0.5);
const TORSO_Z: Band = Band::new(-0.5, 0.5);

/// Axis-aligned bounding rules over normalized body coordinates.
///
/// The bands assume a canonical upright capture orientation and are a
/// geometric stand-in for real anatomical segmentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxRegionClassifier;

impl BoxRegionClassifier {
    pub fn new() -> Self {
        BoxRegionClassifier
    }

    fn is_arms(p: &Vector3<f64>) -> bool {
        p.x.abs() >= ARMS_X_EXTREME && ARMS_Y.contains(p.y)
    }

    fn is_chest(p: &Vector3<f64>) -> bool {
        CHEST_Y.contains(p.y) && TORSO_X.contains(p.x) && TORSO_Z.contains(p.z)
    }

    fn is_waist(p: &Vector3<f64>) -> bool {
        WAIST_Y.contains(p.y) && TORSO_X.contains(p.x) && TORSO_Z.contains(p.z)
    }

    fn is_hips(p: &Vector3<f64>) -> bool {
        HIPS_Y.contains(p.y) && TORSO_X.contains(p.x) && TORSO_Z.contains(p.z)
    }

    fn is_thighs(p: &Vector3<f64>) -> bool {
        THIGHS_Y.contains(p.y) && THIGHS_X.contains(p.x) && TORSO_Z.contains(p.z)
    }
}

impl RegionClassifier for BoxRegionClassifier {
    /// First matching predicate wins. The waist and hip bands overlap in
    /// `Y ∈ [-0.3, 0.0]` with identical X/Z bounds; this ordering is what
    /// keeps that label unambiguous (waist wins the overlap).
    fn classify(&self, p: &Vector3<f64>) -> BodyRegion {
        if Self::is_arms(p) {
            BodyRegion::Arms
        } else if Self::is_chest(p) {
            BodyRegion::Chest
        } else if Self::is_waist(p) {
            BodyRegion::Waist
        } else if Self::is_hips(p) {
            BodyRegion::Hips
        } else if Self::is_thighs(p) {
            BodyRegion::Thighs
        } else {
            BodyRegion::Other
        }
    }

    /// Raw per-region predicates without the priority resolution; the
    /// waist/hips overlap therefore shows up in both masks. `Other` collects
    /// everything no predicate claims.
    fn region_masks(&self, points: &[Vector3<f64>]) -> RegionMasks {
        let arms: Vec<bool> = points.iter().map(Self::is_arms).collect();
        let chest: Vec<bool> = points.iter().map(Self::is_chest).collect();
        let waist: Vec<bool> = points.iter().map(Self::is_waist).collect();
        let hips: Vec<bool> = points.iter().map(Self::is_hips).collect();
        let thighs: Vec<bool> = points.iter().map(Self::is_thighs).collect();

        let other: Vec<bool> = (0..points.len())
            .map(|i| !(arms[i] || chest[i] || waist[i] || hips[i] || thighs[i]))
            .collect();

        let mut masks = BTreeMap::new();
        masks.insert(BodyRegion::Arms, arms);
        masks.insert(BodyRegion::Chest, chest);
        masks.insert(BodyRegion::Waist, waist);
        masks.insert(BodyRegion::Hips, hips);
        masks.insert(BodyRegion::Thighs, thighs);
        masks.insert(BodyRegion::Other, other);
        RegionMasks::new(masks)
    }
}
