use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use std::f64::consts::PI;

use crate::io::geometry::{NormalSet, PointSet, SurfaceSet};

/// Eight unit-cube corners with outward corner normals.
pub fn unit_cube_surface(label: &str) -> SurfaceSet {
    let mut positions = Vec::with_capacity(8);
    let mut normals = Vec::with_capacity(8);
    for &x in &[-0.5, 0.5] {
        for &y in &[-0.5, 0.5] {
            for &z in &[-0.5, 0.5] {
                let corner = Vector3::new(x, y, z);
                positions.push(corner);
                normals.push(corner.normalize());
            }
        }
    }
    SurfaceSet::new(label, PointSet::new(positions), NormalSet::new(normals))
}

/// Latitude/longitude ellipsoid shell (poles excluded) with exact outward
/// normals, `rings * segments` points, Y up.
pub fn ellipsoid_surface(
    label: &str,
    radii: Vector3<f64>,
    rings: usize,
    segments: usize,
) -> SurfaceSet {
    let mut positions = Vec::with_capacity(rings * segments);
    let mut normals = Vec::with_capacity(rings * segments);

    for i in 1..=rings {
        let theta = PI * i as f64 / (rings + 1) as f64;
        for j in 0..segments {
            let phi = 2.0 * PI * j as f64 / segments as f64;
            let direction = Vector3::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            );
            let position = Vector3::new(
                radii.x * direction.x,
                radii.y * direction.y,
                radii.z * direction.z,
            );
            let normal = Vector3::new(
                position.x / (radii.x * radii.x),
                position.y / (radii.y * radii.y),
                position.z / (radii.z * radii.z),
            )
            .normalize();
            positions.push(position);
            normals.push(normal);
        }
    }

    SurfaceSet::new(label, PointSet::new(positions), NormalSet::new(normals))
}

/// Shifts every point along its paired normal: positive amounts emulate
/// uniform outward growth, negative amounts shrinkage.
pub fn offset_along_normals(surface: &SurfaceSet, amount: f64) -> PointSet {
    PointSet::new(
        surface
            .points
            .positions
            .iter()
            .zip(surface.normals.normals.iter())
            .map(|(p, n)| p + n * amount)
            .collect(),
    )
}

/// Seeded, reproducible jittered copy of a point set.
pub fn jittered_points(points: &PointSet, amplitude: f64, seed: u64) -> PointSet {
    let mut rng = StdRng::seed_from_u64(seed);
    PointSet::new(
        points
            .positions
            .iter()
            .map(|p| {
                p + Vector3::new(
                    rng.random_range(-amplitude..=amplitude),
                    rng.random_range(-amplitude..=amplitude),
                    rng.random_range(-amplitude..=amplitude),
                )
            })
            .collect(),
    )
}
