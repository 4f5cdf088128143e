//! Horizontal plane surface.
use glam::{Vec2, Vec3};
use mint::Vector3;

use crate::surface::SurfaceProjector;

/// Plane at a fixed height, optionally limited to an XZ rectangle (inclusive).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatSurface {
    /// World height of the plane.
    pub height: f32,
    /// Optional `(min, max)` footprint in XZ; points outside miss.
    pub bounds: Option<(Vec2, Vec2)>,
}

impl FlatSurface {
    /// Unbounded plane at `height`.
    pub fn new(height: f32) -> Self {
        Self {
            height,
            bounds: None,
        }
    }

    /// Limit the plane to the XZ rectangle spanned by `a` and `b`.
    pub fn with_bounds(mut self, a: Vec2, b: Vec2) -> Self {
        self.bounds = Some((a.min(b), a.max(b)));
        self
    }

    /// Square footprint of half-size `half_extent` centered at the XZ origin.
    pub fn square(height: f32, half_extent: f32) -> Self {
        Self::new(height).with_bounds(Vec2::splat(-half_extent), Vec2::splat(half_extent))
    }

    fn contains_xz(&self, x: f32, z: f32) -> bool {
        match self.bounds {
            Some((min, max)) => x >= min.x && x <= max.x && z >= min.y && z <= max.y,
            None => x.is_finite() && z.is_finite(),
        }
    }
}

impl SurfaceProjector for FlatSurface {
    fn project(&self, point: Vector3<f32>) -> Option<Vector3<f32>> {
        if !self.contains_xz(point.x, point.z) {
            return None;
        }
        Some(Vec3::new(point.x, self.height, point.z).into())
    }
}
