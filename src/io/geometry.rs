use nalgebra::Vector3;

/// Ordered 3D surface samples, stored as one contiguous buffer.
///
/// A set is immutable once built; every transformation returns a new set.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    pub positions: Vec<Vector3<f64>>,
}

impl PointSet {
    pub fn new(positions: Vec<Vector3<f64>>) -> Self {
        PointSet { positions }
    }

    /// Builds a set from the float32 x,y,z triples the decoding layer
    /// exports. Math downstream runs in f64.
    pub fn from_f32_triples(triples: &[[f32; 3]]) -> Self {
        let positions = triples
            .iter()
            .map(|t| Vector3::new(t[0] as f64, t[1] as f64, t[2] as f64))
            .collect();
        PointSet { positions }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Arithmetic mean of all positions. `None` for an empty set.
    pub fn centroid(&self) -> Option<Vector3<f64>> {
        if self.positions.is_empty() {
            return None;
        }
        let sum = self
            .positions
            .iter()
            .fold(Vector3::zeros(), |acc, p| acc + p);
        Some(sum / self.positions.len() as f64)
    }

    pub fn translated(&self, offset: Vector3<f64>) -> PointSet {
        PointSet {
            positions: self.positions.iter().map(|p| p + offset).collect(),
        }
    }
}

/// Unit outward normals, index-aligned with a baseline [`PointSet`].
///
/// Unit length is guaranteed by the upstream decoding layer and is not
/// re-checked here.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalSet {
    pub normals: Vec<Vector3<f64>>,
}

impl NormalSet {
    pub fn new(normals: Vec<Vector3<f64>>) -> Self {
        NormalSet { normals }
    }

    pub fn from_f32_triples(triples: &[[f32; 3]]) -> Self {
        let normals = triples
            .iter()
            .map(|t| Vector3::new(t[0] as f64, t[1] as f64, t[2] as f64))
            .collect();
        NormalSet { normals }
    }

    pub fn len(&self) -> usize {
        self.normals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normals.is_empty()
    }
}

/// One labelled capture: positions plus their outward normals.
#[derive(Debug, Clone)]
pub struct SurfaceSet {
    pub label: String,
    pub points: PointSet,
    pub normals: NormalSet,
}

impl SurfaceSet {
    pub fn new(label: impl Into<String>, points: PointSet, normals: NormalSet) -> Self {
        SurfaceSet {
            label: label.into(),
            points,
            normals,
        }
    }
}
