//! Tool configuration.
//!
//! [`ToolConfig`] carries every recognised option of the brush tool with builder-style setters
//! and a [`ToolConfig::validate`] pass. With the `ron` feature it can be read from and written
//! to RON text.
use crate::error::{Error, Result};
use crate::sampling::RadialDistribution;

pub const DEFAULT_MIN_BRUSH_SIZE: f32 = 0.5;
pub const DEFAULT_MAX_BRUSH_SIZE: f32 = 10.0;
pub const DEFAULT_BRUSH_SIZE: f32 = 2.0;
pub const DEFAULT_SCROLL_SENSITIVITY: f32 = 0.5;
pub const DEFAULT_MIN_DISTANCE: f32 = 0.25;
pub const DEFAULT_SPAWN_INTERVAL: f32 = 0.01;
pub const DEFAULT_PREVIEW_POINTS: usize = 100;
pub const DEFAULT_PREVIEW_INTERVAL: f32 = 0.5;

/// Host reference to the object that gets instantiated for every placement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefabRef(pub String);

impl PrefabRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Host reference to the scene node that receives spawned instances as children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParentRef(pub String);

impl ParentRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Cosmetic RGBA colors for the host's gizmo layer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GizmoColors {
    pub brush: [f32; 4],
    pub preview: [f32; 4],
    pub spacing: [f32; 4],
}

impl Default for GizmoColors {
    fn default() -> Self {
        Self {
            brush: [0.0, 1.0, 0.0, 0.5],
            preview: [1.0, 1.0, 0.0, 0.8],
            spacing: [0.0, 0.6, 1.0, 0.3],
        }
    }
}

/// Configuration for a placement tool session.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ToolConfig {
    /// Object instantiated for every committed placement.
    pub prefab: Option<PrefabRef>,
    /// Optional parent for spawned instances.
    pub parent: Option<ParentRef>,
    /// Smallest brush radius in world units.
    pub min_brush_size: f32,
    /// Largest brush radius in world units.
    pub max_brush_size: f32,
    /// Brush radius when the session starts.
    pub brush_size: f32,
    /// Radius change per unit of scroll input.
    pub scroll_sensitivity: f32,
    /// Minimum distance between committed placements.
    pub min_distance: f32,
    /// Seconds between placement attempts while the trigger is held.
    pub spawn_interval: f32,
    /// Number of attempts per preview refresh.
    pub preview_points: usize,
    /// Seconds between preview refreshes.
    pub preview_interval: f32,
    /// Radial distribution of brush candidates.
    pub distribution: RadialDistribution,
    /// Rotate every instance by a random yaw around +Y.
    pub random_yaw: bool,
    /// Seed for the session RNG.
    pub seed: u64,
    pub gizmo_colors: GizmoColors,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            prefab: None,
            parent: None,
            min_brush_size: DEFAULT_MIN_BRUSH_SIZE,
            max_brush_size: DEFAULT_MAX_BRUSH_SIZE,
            brush_size: DEFAULT_BRUSH_SIZE,
            scroll_sensitivity: DEFAULT_SCROLL_SENSITIVITY,
            min_distance: DEFAULT_MIN_DISTANCE,
            spawn_interval: DEFAULT_SPAWN_INTERVAL,
            preview_points: DEFAULT_PREVIEW_POINTS,
            preview_interval: DEFAULT_PREVIEW_INTERVAL,
            distribution: RadialDistribution::default(),
            random_yaw: true,
            seed: 0,
            gizmo_colors: GizmoColors::default(),
        }
    }
}

impl ToolConfig {
    /// Creates a default configuration placing `prefab`.
    pub fn new(prefab: PrefabRef) -> Self {
        Self {
            prefab: Some(prefab),
            ..Default::default()
        }
    }

    /// Sets the parent for spawned instances.
    pub fn with_parent(mut self, parent: ParentRef) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the brush radius bounds.
    pub fn with_brush_bounds(mut self, min: f32, max: f32) -> Self {
        self.min_brush_size = min;
        self.max_brush_size = max;
        self
    }

    /// Sets the initial brush radius.
    pub fn with_brush_size(mut self, brush_size: f32) -> Self {
        self.brush_size = brush_size;
        self
    }

    /// Sets the scroll sensitivity.
    pub fn with_scroll_sensitivity(mut self, scroll_sensitivity: f32) -> Self {
        self.scroll_sensitivity = scroll_sensitivity;
        self
    }

    /// Sets the minimum spacing between placements.
    pub fn with_min_distance(mut self, min_distance: f32) -> Self {
        self.min_distance = min_distance;
        self
    }

    /// Sets the interval between placement attempts.
    pub fn with_spawn_interval(mut self, spawn_interval: f32) -> Self {
        self.spawn_interval = spawn_interval;
        self
    }

    /// Sets the preview attempt count and refresh interval.
    pub fn with_preview(mut self, preview_points: usize, preview_interval: f32) -> Self {
        self.preview_points = preview_points;
        self.preview_interval = preview_interval;
        self
    }

    /// Sets the radial distribution of brush candidates.
    pub fn with_distribution(mut self, distribution: RadialDistribution) -> Self {
        self.distribution = distribution;
        self
    }

    /// Enables or disables random yaw on spawned instances.
    pub fn with_random_yaw(mut self, random_yaw: bool) -> Self {
        self.random_yaw = random_yaw;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the gizmo colors.
    pub fn with_gizmo_colors(mut self, gizmo_colors: GizmoColors) -> Self {
        self.gizmo_colors = gizmo_colors;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    ///
    /// A missing prefab is not a configuration error; the session reports it as a
    /// precondition when placement is requested.
    pub fn validate(&self) -> Result<()> {
        let positive = |v: f32| v.is_finite() && v > 0.0;

        if !positive(self.min_brush_size) || !positive(self.max_brush_size) {
            return Err(Error::InvalidConfig(
                "brush size bounds must be finite and > 0".into(),
            ));
        }
        if self.min_brush_size > self.max_brush_size {
            return Err(Error::InvalidConfig(format!(
                "min_brush_size ({}) must be <= max_brush_size ({})",
                self.min_brush_size, self.max_brush_size
            )));
        }
        if !(self.min_brush_size..=self.max_brush_size).contains(&self.brush_size) {
            return Err(Error::InvalidConfig(format!(
                "brush_size ({}) must lie within [{}, {}]",
                self.brush_size, self.min_brush_size, self.max_brush_size
            )));
        }
        if !self.scroll_sensitivity.is_finite() {
            return Err(Error::InvalidConfig(
                "scroll_sensitivity must be finite".into(),
            ));
        }
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return Err(Error::InvalidConfig("min_distance must be >= 0".into()));
        }
        if !positive(self.spawn_interval) {
            return Err(Error::InvalidConfig("spawn_interval must be > 0".into()));
        }
        if !positive(self.preview_interval) {
            return Err(Error::InvalidConfig("preview_interval must be > 0".into()));
        }

        Ok(())
    }
}

#[cfg(feature = "ron")]
impl ToolConfig {
    /// Parses a configuration from RON text. Missing fields take their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text).map_err(|e| Error::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as pretty RON text.
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::Parse(e.to_string()))
    }
}
