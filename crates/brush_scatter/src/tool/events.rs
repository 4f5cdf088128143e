//! What a placement session reports while it reacts to ticks and input.
//!
//! Sessions push [`ToolEvent`]s into whatever [`EventSink`] the host passes in: `()` to ignore
//! them, [`VecSink`] to keep them, [`FnSink`] to react inline.
use glam::Vec3;

use crate::error::Precondition;
use crate::tool::host::ObjectHandle;

/// Describes events emitted by a placement session.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum ToolEvent {
    /// The tool was registered with its host and is receiving ticks.
    Activated,

    /// The tool was torn down by its host.
    Deactivated,

    /// The placement trigger was pressed and accepted.
    PlacingStarted,

    /// The placement trigger was released.
    PlacingStopped,

    /// A point was committed and an instance spawned.
    Placed {
        /// World position of the instance.
        position: Vec3,
        /// Host handle of the spawned instance.
        handle: ObjectHandle,
    },

    /// The preview set was regenerated.
    PreviewRefreshed {
        /// Number of valid preview points.
        count: usize,
    },

    /// The brush radius changed.
    BrushResized {
        /// Applied (clamped) radius.
        radius: f32,
    },

    /// Every placement was removed.
    Cleared {
        /// Number of instances destroyed.
        count: usize,
    },

    /// Placement was requested without a required collaborator.
    PreconditionMissing {
        /// What is missing.
        missing: Precondition,
    },
}

/// Receives [`ToolEvent`]s as a session produces them.
pub trait EventSink {
    fn send(&mut self, event: ToolEvent);
}

/// Discards every event.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: ToolEvent) {}
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    #[inline]
    fn send(&mut self, event: ToolEvent) {
        (**self).send(event);
    }
}

/// Forwards each event to a closure.
pub struct FnSink<F: FnMut(ToolEvent)>(F);

impl<F: FnMut(ToolEvent)> FnSink<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F: FnMut(ToolEvent)> EventSink for FnSink<F> {
    #[inline]
    fn send(&mut self, event: ToolEvent) {
        (self.0)(event);
    }
}

/// Keeps every event in arrival order.
#[derive(Debug, Default)]
pub struct VecSink {
    events: Vec<ToolEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[ToolEvent] {
        &self.events
    }

    pub fn into_inner(self) -> Vec<ToolEvent> {
        self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events matching `pred`.
    pub fn count(&self, pred: impl Fn(&ToolEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    /// Positions of every `Placed` event, in placement order.
    pub fn placed_positions(&self) -> Vec<Vec3> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ToolEvent::Placed { position, .. } => Some(*position),
                _ => None,
            })
            .collect()
    }

    /// Whether the events seen so far leave the tool placing.
    pub fn is_placing(&self) -> bool {
        self.events
            .iter()
            .rev()
            .find_map(|e| match e {
                ToolEvent::PlacingStarted => Some(true),
                ToolEvent::PlacingStopped | ToolEvent::Deactivated => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: ToolEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_keeps_arrival_order() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(ToolEvent::Activated);
        sink.send(ToolEvent::PreviewRefreshed { count: 3 });
        assert_eq!(
            sink.as_slice(),
            &[ToolEvent::Activated, ToolEvent::PreviewRefreshed { count: 3 }]
        );
        assert_eq!(
            sink.count(|e| matches!(e, ToolEvent::PreviewRefreshed { .. })),
            1
        );
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn placed_positions_skip_other_events() {
        let mut sink = VecSink::new();
        sink.send(ToolEvent::PlacingStarted);
        sink.send(ToolEvent::Placed {
            position: Vec3::X,
            handle: ObjectHandle(0),
        });
        sink.send(ToolEvent::PreviewRefreshed { count: 10 });
        sink.send(ToolEvent::Placed {
            position: Vec3::Z,
            handle: ObjectHandle(1),
        });
        assert_eq!(sink.placed_positions(), vec![Vec3::X, Vec3::Z]);
    }

    #[test]
    fn is_placing_follows_the_latest_transition() {
        let mut sink = VecSink::new();
        assert!(!sink.is_placing());
        sink.send(ToolEvent::PlacingStarted);
        sink.send(ToolEvent::PreviewRefreshed { count: 1 });
        assert!(sink.is_placing());
        sink.send(ToolEvent::PlacingStopped);
        assert!(!sink.is_placing());
        sink.send(ToolEvent::PlacingStarted);
        sink.send(ToolEvent::Deactivated);
        assert!(!sink.is_placing());
    }

    #[test]
    fn fn_sink_and_borrowed_sinks_forward() {
        let mut resized = Vec::new();
        {
            let mut sink = FnSink::new(|event| {
                if let ToolEvent::BrushResized { radius } = event {
                    resized.push(radius);
                }
            });
            fn forward(mut sink: impl EventSink, event: ToolEvent) {
                sink.send(event);
            }
            forward(&mut sink, ToolEvent::BrushResized { radius: 2.5 });
            sink.send(ToolEvent::Activated);
        }
        assert_eq!(resized, vec![2.5]);
    }
}
