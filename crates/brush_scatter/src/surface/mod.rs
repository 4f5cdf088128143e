//! Surface projection for brush candidates.
//!
//! The tool never intersects geometry itself. A host hands it a [`SurfaceProjector`] that casts
//! a ray from well above a candidate straight down (-Y) and reports the first hit. This module
//! also ships a few projectors for headless use:
//! - [`FlatSurface`]: horizontal plane, optionally bounded
//! - [`HeightfieldSurface`]: regular grid of heights with bilinear interpolation
//! - [`TriangleMeshSurface`]: downward ray cast against a triangle soup
//! - [`FnSurface`]: closure adapter
use glam::Vec3;
use mint::Vector3;

pub mod flat;
pub mod heightfield;
pub mod mesh;

pub use flat::FlatSurface;
pub use heightfield::HeightfieldSurface;
pub use mesh::TriangleMeshSurface;

/// Height above a candidate from which projection rays start.
pub const DEFAULT_RAY_HEIGHT: f32 = 100.0;

/// Host capability that drops a point onto the target surface.
pub trait SurfaceProjector: Send + Sync {
    /// Cast downward from above `point` and return the first hit, or `None` on a miss.
    fn project(&self, point: Vector3<f32>) -> Option<Vector3<f32>>;
}

impl<T: SurfaceProjector + ?Sized> SurfaceProjector for &T {
    #[inline]
    fn project(&self, point: Vector3<f32>) -> Option<Vector3<f32>> {
        (**self).project(point)
    }
}

impl<T: SurfaceProjector + ?Sized> SurfaceProjector for Box<T> {
    #[inline]
    fn project(&self, point: Vector3<f32>) -> Option<Vector3<f32>> {
        (**self).project(point)
    }
}

/// Project `point` through `surface` using glam types on both sides.
#[inline]
pub fn project_to_surface(surface: &dyn SurfaceProjector, point: Vec3) -> Option<Vec3> {
    surface.project(point.into()).map(Vec3::from)
}

/// A surface backed by a closure.
pub struct FnSurface<F>
where
    F: Fn(Vec3) -> Option<Vec3> + Send + Sync,
{
    f: F,
}

impl<F> FnSurface<F>
where
    F: Fn(Vec3) -> Option<Vec3> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> SurfaceProjector for FnSurface<F>
where
    F: Fn(Vec3) -> Option<Vec3> + Send + Sync,
{
    #[inline]
    fn project(&self, point: Vector3<f32>) -> Option<Vector3<f32>> {
        (self.f)(Vec3::from(point)).map(Into::into)
    }
}
