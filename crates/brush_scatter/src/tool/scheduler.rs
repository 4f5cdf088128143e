//! Host-owned update scheduler for editor tools.
//!
//! Tools are registered explicitly and receive `on_activate` at registration and
//! `on_deactivate` when they are deregistered, when the scheduler shuts down, or when it is
//! dropped. Nothing subscribes implicitly.
use tracing::debug;

use crate::tool::events::EventSink;
use crate::tool::host::InputEvent;

/// Lifecycle hooks a host calls into.
pub trait EditorTool {
    fn name(&self) -> &str {
        "tool"
    }

    fn on_activate(&mut self, sink: &mut dyn EventSink);

    fn on_tick(&mut self, dt: f32, sink: &mut dyn EventSink);

    fn on_input_event(&mut self, event: InputEvent, sink: &mut dyn EventSink);

    fn on_deactivate(&mut self, sink: &mut dyn EventSink);
}

/// Identifier returned by [`ToolScheduler::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToolId(u64);

/// Drives registered tools and forwards their events to one sink.
pub struct ToolScheduler<S: EventSink = ()> {
    sink: S,
    tools: Vec<(ToolId, Box<dyn EditorTool>)>,
    next_id: u64,
}

impl<S: EventSink> ToolScheduler<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            tools: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers `tool` and activates it.
    pub fn register(&mut self, mut tool: Box<dyn EditorTool>) -> ToolId {
        let id = ToolId(self.next_id);
        self.next_id += 1;
        debug!("Registering tool '{}' as {:?}", tool.name(), id);
        tool.on_activate(&mut self.sink);
        self.tools.push((id, tool));
        id
    }

    /// Registers a concrete tool.
    pub fn register_tool<T: EditorTool + 'static>(&mut self, tool: T) -> ToolId {
        self.register(Box::new(tool))
    }

    /// Deactivates and removes a tool, handing it back to the caller.
    pub fn deregister(&mut self, id: ToolId) -> Option<Box<dyn EditorTool>> {
        let index = self.tools.iter().position(|(tid, _)| *tid == id)?;
        let (_, mut tool) = self.tools.remove(index);
        debug!("Deregistering tool '{}' ({:?})", tool.name(), id);
        tool.on_deactivate(&mut self.sink);
        Some(tool)
    }

    /// Advances every tool by `dt` seconds, in registration order.
    pub fn tick(&mut self, dt: f32) {
        for (_, tool) in self.tools.iter_mut() {
            tool.on_tick(dt, &mut self.sink);
        }
    }

    /// Delivers an input event to every tool.
    pub fn dispatch(&mut self, event: InputEvent) {
        for (_, tool) in self.tools.iter_mut() {
            tool.on_input_event(event, &mut self.sink);
        }
    }

    /// Deactivates every tool, newest first.
    pub fn shutdown(&mut self) {
        while let Some((id, mut tool)) = self.tools.pop() {
            debug!("Shutting down tool '{}' ({:?})", tool.name(), id);
            tool.on_deactivate(&mut self.sink);
        }
    }

    pub fn is_registered(&self, id: ToolId) -> bool {
        self.tools.iter().any(|(tid, _)| *tid == id)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl<S: EventSink + Default> Default for ToolScheduler<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: EventSink> Drop for ToolScheduler<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec3;

    use super::*;
    use crate::config::{PrefabRef, ToolConfig};
    use crate::surface::FlatSurface;
    use crate::tool::events::{FnSink, ToolEvent, VecSink};
    use crate::tool::host::InstanceRecorder;
    use crate::tool::session::PlacementSession;

    /// Records hook calls into a shared log.
    struct Probe {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl EditorTool for Probe {
        fn name(&self) -> &str {
            self.name
        }

        fn on_activate(&mut self, _sink: &mut dyn EventSink) {
            self.log.borrow_mut().push(format!("{}:activate", self.name));
        }

        fn on_tick(&mut self, dt: f32, _sink: &mut dyn EventSink) {
            self.log.borrow_mut().push(format!("{}:tick {dt}", self.name));
        }

        fn on_input_event(&mut self, event: InputEvent, _sink: &mut dyn EventSink) {
            self.log
                .borrow_mut()
                .push(format!("{}:input {event:?}", self.name));
        }

        fn on_deactivate(&mut self, _sink: &mut dyn EventSink) {
            self.log.borrow_mut().push(format!("{}:deactivate", self.name));
        }
    }

    #[test]
    fn lifecycle_hooks_run_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut scheduler = ToolScheduler::<()>::default();

        let a = scheduler.register_tool(Probe {
            name: "a",
            log: log.clone(),
        });
        let b = scheduler.register_tool(Probe {
            name: "b",
            log: log.clone(),
        });
        assert_ne!(a, b);
        assert_eq!(scheduler.len(), 2);

        scheduler.tick(0.5);
        scheduler.dispatch(InputEvent::PlacePressed);
        let removed = scheduler.deregister(a).expect("registered");
        assert_eq!(removed.name(), "a");
        assert!(!scheduler.is_registered(a));
        assert!(scheduler.deregister(a).is_none());

        drop(scheduler);

        assert_eq!(
            *log.borrow(),
            vec![
                "a:activate",
                "b:activate",
                "a:tick 0.5",
                "b:tick 0.5",
                "a:input PlacePressed",
                "b:input PlacePressed",
                "a:deactivate",
                "b:deactivate",
            ]
        );
    }

    #[test]
    fn drives_a_placement_session() {
        let session = PlacementSession::try_new(
            ToolConfig::new(PrefabRef::new("grass")).with_seed(1),
            InstanceRecorder::new(),
            (),
        )
        .expect("valid config")
        .with_surface(FlatSurface::new(0.0));

        let mut scheduler = ToolScheduler::new(VecSink::new());
        let id = scheduler.register_tool(session);
        scheduler.dispatch(InputEvent::CursorMoved(Some(Vec3::ZERO)));
        scheduler.dispatch(InputEvent::PlacePressed);
        for _ in 0..10 {
            scheduler.tick(0.02);
        }
        scheduler.dispatch(InputEvent::PlaceReleased);

        let placed = scheduler
            .sink()
            .count(|e| matches!(e, ToolEvent::Placed { .. }));
        assert!(placed > 0);

        scheduler.shutdown();
        assert!(scheduler.is_empty());
        assert!(!scheduler.is_registered(id));
        assert_eq!(scheduler.sink().as_slice().first(), Some(&ToolEvent::Activated));
        assert_eq!(scheduler.sink().as_slice().last(), Some(&ToolEvent::Deactivated));
    }

    #[test]
    fn drop_deactivates_remaining_tools() {
        let deactivated = Rc::new(RefCell::new(0));
        {
            let counter = deactivated.clone();
            let sink = FnSink::new(move |event| {
                if event == ToolEvent::Deactivated {
                    *counter.borrow_mut() += 1;
                }
            });
            let mut scheduler = ToolScheduler::new(sink);
            for seed in 0..3 {
                let session = PlacementSession::try_new(
                    ToolConfig::default().with_seed(seed),
                    InstanceRecorder::new(),
                    (),
                )
                .expect("valid config");
                scheduler.register_tool(session);
            }
        }
        assert_eq!(*deactivated.borrow(), 3);
    }
}
