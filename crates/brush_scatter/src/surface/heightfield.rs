//! Regular-grid heightfield surface.
//!
//! Heights are stored row-major with X varying fastest; sample `(ix, iz)` sits at
//! `origin + (ix, iz) * cell_size` in XZ. Queries between samples are bilinear.
use glam::{Vec2, Vec3};
use mint::Vector3;

use crate::error::{Error, Result};
use crate::surface::SurfaceProjector;

#[derive(Debug, Clone)]
pub struct HeightfieldSurface {
    /// XZ position of sample (0, 0).
    origin: Vec2,
    /// Spacing between samples in world units.
    cell_size: f32,
    /// Samples along X.
    width: usize,
    /// Samples along Z.
    depth: usize,
    heights: Vec<f32>,
}

impl HeightfieldSurface {
    /// Build a heightfield from `width * depth` row-major heights.
    pub fn try_new(
        origin: Vec2,
        cell_size: f32,
        width: usize,
        depth: usize,
        heights: Vec<f32>,
    ) -> Result<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(Error::InvalidSurface("cell_size must be > 0".into()));
        }
        if width < 2 || depth < 2 {
            return Err(Error::InvalidSurface(format!(
                "heightfield needs at least 2x2 samples, got {width}x{depth}"
            )));
        }
        if heights.len() != width * depth {
            return Err(Error::InvalidSurface(format!(
                "expected {} heights for {width}x{depth}, got {}",
                width * depth,
                heights.len()
            )));
        }
        if heights.iter().any(|h| !h.is_finite()) {
            return Err(Error::InvalidSurface("heights must be finite".into()));
        }

        Ok(Self {
            origin,
            cell_size,
            width,
            depth,
            heights,
        })
    }

    /// Build a heightfield by evaluating `f` at every sample position (XZ world coordinates).
    pub fn from_fn(
        origin: Vec2,
        cell_size: f32,
        width: usize,
        depth: usize,
        f: impl Fn(Vec2) -> f32,
    ) -> Result<Self> {
        let mut heights = Vec::with_capacity(width * depth);
        for iz in 0..depth {
            for ix in 0..width {
                heights.push(f(origin + Vec2::new(ix as f32, iz as f32) * cell_size));
            }
        }
        Self::try_new(origin, cell_size, width, depth, heights)
    }

    /// XZ extent covered by the samples.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(
            (self.width - 1) as f32 * self.cell_size,
            (self.depth - 1) as f32 * self.cell_size,
        )
    }

    #[inline]
    fn at(&self, ix: usize, iz: usize) -> f32 {
        self.heights[iz * self.width + ix]
    }

    /// Interpolated height at an XZ position, or `None` outside the footprint.
    pub fn height_at(&self, xz: Vec2) -> Option<f32> {
        let local = (xz - self.origin) / self.cell_size;
        let max_x = (self.width - 1) as f32;
        let max_z = (self.depth - 1) as f32;
        if !(local.x >= 0.0 && local.x <= max_x && local.y >= 0.0 && local.y <= max_z) {
            return None;
        }

        let x0 = (local.x.floor() as usize).min(self.width - 2);
        let z0 = (local.y.floor() as usize).min(self.depth - 2);
        let tx = local.x - x0 as f32;
        let tz = local.y - z0 as f32;

        let h00 = self.at(x0, z0);
        let h10 = self.at(x0 + 1, z0);
        let h01 = self.at(x0, z0 + 1);
        let h11 = self.at(x0 + 1, z0 + 1);

        let near = h00 + (h10 - h00) * tx;
        let far = h01 + (h11 - h01) * tx;
        Some(near + (far - near) * tz)
    }
}

impl SurfaceProjector for HeightfieldSurface {
    fn project(&self, point: Vector3<f32>) -> Option<Vector3<f32>> {
        let height = self.height_at(Vec2::new(point.x, point.z))?;
        Some(Vec3::new(point.x, height, point.z).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::project_to_surface;

    fn ramp() -> HeightfieldSurface {
        // Height equals x, 5x5 samples over [0, 4] x [0, 4].
        HeightfieldSurface::from_fn(Vec2::ZERO, 1.0, 5, 5, |p| p.x).expect("valid heightfield")
    }

    #[test]
    fn rejects_malformed_inputs() {
        assert!(HeightfieldSurface::try_new(Vec2::ZERO, 0.0, 2, 2, vec![0.0; 4]).is_err());
        assert!(HeightfieldSurface::try_new(Vec2::ZERO, 1.0, 1, 2, vec![0.0; 2]).is_err());
        assert!(HeightfieldSurface::try_new(Vec2::ZERO, 1.0, 2, 2, vec![0.0; 3]).is_err());
        assert!(
            HeightfieldSurface::try_new(Vec2::ZERO, 1.0, 2, 2, vec![0.0, 1.0, f32::NAN, 0.0])
                .is_err()
        );
    }

    #[test]
    fn interpolates_between_samples() {
        let s = ramp();
        assert!((s.height_at(Vec2::new(1.5, 2.25)).unwrap() - 1.5).abs() < 1e-6);
        assert!((s.height_at(Vec2::new(4.0, 4.0)).unwrap() - 4.0).abs() < 1e-6);

        let bumps = HeightfieldSurface::try_new(Vec2::ZERO, 2.0, 2, 2, vec![0.0, 0.0, 0.0, 4.0])
            .expect("valid heightfield");
        // Center of the single cell averages the four corners.
        assert!((bumps.height_at(Vec2::new(1.0, 1.0)).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn projection_misses_outside_footprint() {
        let s = ramp();
        assert_eq!(s.extent(), Vec2::new(4.0, 4.0));
        assert!(project_to_surface(&s, Vec3::new(-0.1, 0.0, 1.0)).is_none());
        assert!(project_to_surface(&s, Vec3::new(1.0, 0.0, 4.1)).is_none());

        let hit = project_to_surface(&s, Vec3::new(3.0, 99.0, 1.0)).expect("hit");
        assert_eq!(hit, Vec3::new(3.0, 3.0, 1.0));
    }
}
