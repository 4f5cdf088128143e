#![forbid(unsafe_code)]
//! brush_scatter: brush-driven placement of decorative instances on a surface.
//!
//! Modules:
//! - brush: brush centre and clamped radius
//! - sampling: uniform candidate generation inside the brush disc
//! - surface: projection of candidates onto the target surface (flat, heightfield, mesh)
//! - placement: the spacing-enforcing placement set and sampler
//! - tool: session state machine, scheduler, host traits, events, overlay
//! - config: tool configuration and validation
//!
//! For examples, see the `brush_scatter_examples` crate and the README.
pub mod brush;
pub mod config;
pub mod error;
pub mod placement;
pub mod sampling;
pub mod surface;
pub mod tool;

/// Convenient re-exports for common types. Import with `use brush_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::brush::BrushState;
    pub use crate::config::{GizmoColors, ParentRef, PrefabRef, ToolConfig};
    pub use crate::error::{Error, Precondition, Result};
    pub use crate::placement::{
        is_far_enough, AttemptOutcome, AttemptStats, PlacementSampler, PlacementSet,
        PlacementSnapshot,
    };
    pub use crate::sampling::{sample_candidate, RadialDistribution};
    pub use crate::surface::{
        project_to_surface, FlatSurface, FnSurface, HeightfieldSurface, SurfaceProjector,
        TriangleMeshSurface,
    };
    pub use crate::tool::{
        EditorTool, EventSink, FnSink, HistoryRecorder, InputEvent, InputSource, InputState,
        InstanceRecorder, ObjectFactory, ObjectHandle, PlacementSession, SessionStats, ToolEvent,
        ToolId, ToolOverlay, ToolScheduler, ToolState, VecSink,
    };
}
