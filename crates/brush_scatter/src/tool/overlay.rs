//! Gizmo geometry for a host renderer.
use std::f32::consts::TAU;

use glam::Vec3;

use crate::brush::BrushState;
use crate::config::GizmoColors;
use crate::tool::session::ToolState;

/// Borrowed view of what the gizmo layer draws for one frame.
#[derive(Debug, Clone, Copy)]
pub struct ToolOverlay<'a> {
    pub state: ToolState,
    pub brush: &'a BrushState,
    pub preview: &'a [Vec3],
    pub placed: &'a [Vec3],
    /// Radius of the spacing circle drawn around placed points.
    pub spacing_radius: f32,
    pub colors: &'a GizmoColors,
}

impl<'a> ToolOverlay<'a> {
    /// Polyline approximating the brush circle at the brush centre height.
    ///
    /// Empty when the cursor is off the surface. The first point is repeated at the end.
    pub fn brush_ring(&self, segments: usize) -> Vec<Vec3> {
        let Some(center) = self.brush.center() else {
            return Vec::new();
        };
        circle_points(center, self.brush.radius(), segments.max(3))
    }

    /// Placed points inside the brush, which get a spacing circle.
    pub fn spacing_rings(&self) -> impl Iterator<Item = (Vec3, f32)> + '_ {
        let radius = self.spacing_radius;
        self.placed
            .iter()
            .copied()
            .filter(|p| self.brush.contains_xz(*p))
            .map(move |p| (p, radius))
    }

    /// Whether the brush is drawn at all.
    pub fn is_visible(&self) -> bool {
        self.brush.center().is_some()
    }
}

fn circle_points(center: Vec3, radius: f32, segments: usize) -> Vec<Vec3> {
    (0..=segments)
        .map(|i| {
            let theta = (i % segments) as f32 / segments as f32 * TAU;
            center + Vec3::new(radius * theta.cos(), 0.0, radius * theta.sin())
        })
        .collect()
}
