//! Triangle soup surface hit by a downward ray.
use glam::Vec3;
use mint::Vector3;

use crate::error::{Error, Result};
use crate::surface::{SurfaceProjector, DEFAULT_RAY_HEIGHT};

const EPSILON: f32 = 1e-7;

/// A set of triangles projected onto by casting a ray straight down from
/// `point + ray_height * Y`. Both triangle faces are hit; the nearest hit wins.
#[derive(Debug, Clone)]
pub struct TriangleMeshSurface {
    triangles: Vec<[Vec3; 3]>,
    ray_height: f32,
}

impl TriangleMeshSurface {
    pub fn try_new(triangles: Vec<[Vec3; 3]>) -> Result<Self> {
        if triangles.is_empty() {
            return Err(Error::InvalidSurface("mesh has no triangles".into()));
        }
        if triangles.iter().flatten().any(|v| !v.is_finite()) {
            return Err(Error::InvalidSurface("mesh vertices must be finite".into()));
        }
        Ok(Self {
            triangles,
            ray_height: DEFAULT_RAY_HEIGHT,
        })
    }

    /// Build from an indexed mesh (three indices per triangle).
    pub fn from_indexed(vertices: &[Vec3], indices: &[u32]) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(Error::InvalidSurface(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            )));
        }

        let mut triangles = Vec::with_capacity(indices.len() / 3);
        for tri in indices.chunks_exact(3) {
            let mut corners = [Vec3::ZERO; 3];
            for (corner, &index) in corners.iter_mut().zip(tri) {
                *corner = *vertices.get(index as usize).ok_or_else(|| {
                    Error::InvalidSurface(format!(
                        "index {index} out of range for {} vertices",
                        vertices.len()
                    ))
                })?;
            }
            triangles.push(corners);
        }

        Self::try_new(triangles)
    }

    /// Set the height above the candidate from which rays start.
    pub fn with_ray_height(mut self, ray_height: f32) -> Self {
        if ray_height.is_finite() && ray_height > 0.0 {
            self.ray_height = ray_height;
        }
        self
    }

    pub fn ray_height(&self) -> f32 {
        self.ray_height
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Distance along a downward ray from `origin` to the nearest triangle.
    fn cast_down(&self, origin: Vec3) -> Option<f32> {
        self.triangles
            .iter()
            .filter_map(|tri| intersect(origin, Vec3::NEG_Y, tri))
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Möller–Trumbore ray/triangle test, two-sided. Returns the ray parameter of the hit.
fn intersect(origin: Vec3, dir: Vec3, [a, b, c]: &[Vec3; 3]) -> Option<f32> {
    let e1 = *b - *a;
    let e2 = *c - *a;
    let p = dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = origin - *a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(e1);
    let v = dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

impl SurfaceProjector for TriangleMeshSurface {
    fn project(&self, point: Vector3<f32>) -> Option<Vector3<f32>> {
        let point = Vec3::from(point);
        if !point.is_finite() {
            return None;
        }
        let origin = point + Vec3::Y * self.ray_height;
        let t = self.cast_down(origin)?;
        Some((origin + Vec3::NEG_Y * t).into())
    }
}
