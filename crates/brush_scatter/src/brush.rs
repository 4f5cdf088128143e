//! Brush state: where the brush sits on the surface and how large it is.
use glam::Vec3;

use crate::config::{
    ToolConfig, DEFAULT_MAX_BRUSH_SIZE, DEFAULT_MIN_BRUSH_SIZE, DEFAULT_SCROLL_SENSITIVITY,
};

/// Center and radius of the circular brush.
///
/// The radius is kept inside `[min_size, max_size]` by every mutator; out-of-range requests
/// are clamped and non-finite requests are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushState {
    center: Option<Vec3>,
    radius: f32,
    min_size: f32,
    max_size: f32,
    scroll_sensitivity: f32,
}

impl BrushState {
    /// Creates a brush with the given bounds. `radius` is clamped into them.
    ///
    /// Non-finite or non-positive bounds fall back to the defaults and reversed bounds are
    /// swapped, so the radius always has a valid range.
    pub fn new(radius: f32, min_size: f32, max_size: f32, scroll_sensitivity: f32) -> Self {
        let positive_or = |v: f32, fallback: f32| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                fallback
            }
        };
        let mut min_size = positive_or(min_size, DEFAULT_MIN_BRUSH_SIZE);
        let mut max_size = positive_or(max_size, DEFAULT_MAX_BRUSH_SIZE);
        if min_size > max_size {
            std::mem::swap(&mut min_size, &mut max_size);
        }
        let scroll_sensitivity = if scroll_sensitivity.is_finite() {
            scroll_sensitivity
        } else {
            DEFAULT_SCROLL_SENSITIVITY
        };

        let mut brush = Self {
            center: None,
            radius: min_size,
            min_size,
            max_size,
            scroll_sensitivity,
        };
        brush.set_radius(radius);
        brush
    }

    /// Creates a brush from the size settings of `config`.
    pub fn from_config(config: &ToolConfig) -> Self {
        Self::new(
            config.brush_size,
            config.min_brush_size,
            config.max_brush_size,
            config.scroll_sensitivity,
        )
    }

    /// Surface-projected brush center, `None` while the cursor is off the surface.
    #[inline]
    pub fn center(&self) -> Option<Vec3> {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn bounds(&self) -> (f32, f32) {
        (self.min_size, self.max_size)
    }

    /// Moves the brush. Non-finite centers clear it.
    pub fn set_center(&mut self, center: Option<Vec3>) {
        self.center = center.filter(|c| c.is_finite());
    }

    /// Sets the radius, clamped to the brush bounds. Returns the applied radius.
    pub fn set_radius(&mut self, radius: f32) -> f32 {
        if radius.is_finite() {
            self.radius = radius.clamp(self.min_size, self.max_size);
        }
        self.radius
    }

    /// Applies a scroll delta scaled by the scroll sensitivity. Returns the applied radius.
    pub fn resize(&mut self, scroll_delta: f32) -> f32 {
        self.set_radius(self.radius + scroll_delta * self.scroll_sensitivity)
    }

    /// Whether an XZ position lies within the brush disc.
    pub fn contains_xz(&self, point: Vec3) -> bool {
        self.center.is_some_and(|c| {
            let dx = point.x - c.x;
            let dz = point.z - c.z;
            dx * dx + dz * dz <= self.radius * self.radius
        })
    }
}

impl Default for BrushState {
    fn default() -> Self {
        Self::from_config(&ToolConfig::default())
    }
}
