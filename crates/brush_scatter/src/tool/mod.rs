//! The interactive brush tool and its host-facing plumbing.
//!
//! - session: Idle/Placing state machine driven by ticks and input
//! - scheduler: explicit registration and teardown of tools
//! - host: capability traits the host editor implements
//! - events: observable tool events and sinks
//! - overlay: gizmo geometry for the host renderer
//! - timer: interval timer behind the spawn and preview cadences
pub mod events;
pub mod host;
pub mod overlay;
pub mod scheduler;
pub mod session;
pub mod timer;

pub use events::{EventSink, FnSink, ToolEvent, VecSink};
pub use host::{
    HistoryRecorder, InputEvent, InputSource, InputState, Instance, InstanceRecorder,
    ObjectFactory, ObjectHandle,
};
pub use overlay::ToolOverlay;
pub use scheduler::{EditorTool, ToolId, ToolScheduler};
pub use session::{PlacementSession, SessionStats, ToolState, CLEAR_LABEL, PLACE_LABEL};
pub use timer::IntervalTimer;
