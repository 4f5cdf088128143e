//! Capabilities the host editor provides to the placement tool.
//!
//! The tool never touches the host's scene graph, undo stack or input devices directly; it goes
//! through [`ObjectFactory`], [`HistoryRecorder`] and [`InputSource`]/[`InputEvent`].
use glam::{Quat, Vec3};

use crate::config::{ParentRef, PrefabRef};

/// Host handle to a spawned instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(pub u64);

/// Creates and destroys scene instances.
pub trait ObjectFactory {
    fn instantiate(
        &mut self,
        prefab: &PrefabRef,
        position: Vec3,
        rotation: Quat,
        parent: Option<&ParentRef>,
    ) -> ObjectHandle;

    fn destroy(&mut self, handle: ObjectHandle);
}

/// Records created and destroyed instances for the host's undo history.
pub trait HistoryRecorder {
    fn record_created(&mut self, label: &str, handle: ObjectHandle);

    fn record_destroyed(&mut self, label: &str, handles: &[ObjectHandle]);
}

/// A recorder that keeps no history.
impl HistoryRecorder for () {
    #[inline]
    fn record_created(&mut self, _label: &str, _handle: ObjectHandle) {}

    #[inline]
    fn record_destroyed(&mut self, _label: &str, _handles: &[ObjectHandle]) {}
}

/// Input delivered to a tool by its host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved; `None` when it left the surface.
    CursorMoved(Option<Vec3>),
    /// Placement trigger went down.
    PlacePressed,
    /// Placement trigger went up.
    PlaceReleased,
    /// Brush resize input (e.g. scroll amount).
    Resize(f32),
    /// Remove every placement.
    ClearRequested,
}

/// Polled view of the host's input state.
pub trait InputSource {
    /// Cursor position projected onto the surface, if any.
    fn cursor(&self) -> Option<Vec3>;

    /// Whether the placement trigger is held.
    fn placement_active(&self) -> bool;

    /// Resize input accumulated since the last poll.
    fn resize_delta(&self) -> f32;
}

/// Plain snapshot of input state, handy for hosts that already poll their devices.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub cursor: Option<Vec3>,
    pub placement_active: bool,
    pub resize_delta: f32,
}

impl InputSource for InputState {
    fn cursor(&self) -> Option<Vec3> {
        self.cursor
    }

    fn placement_active(&self) -> bool {
        self.placement_active
    }

    fn resize_delta(&self) -> f32 {
        self.resize_delta
    }
}

/// A spawned instance as seen by [`InstanceRecorder`].
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub handle: ObjectHandle,
    pub prefab: PrefabRef,
    pub position: Vec3,
    pub rotation: Quat,
    pub parent: Option<ParentRef>,
}

/// Headless factory that keeps spawned instances in memory.
#[derive(Debug, Default)]
pub struct InstanceRecorder {
    next: u64,
    live: Vec<Instance>,
    destroyed: usize,
}

impl InstanceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instances that have not been destroyed, in spawn order.
    pub fn instances(&self) -> &[Instance] {
        &self.live
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed
    }
}

impl ObjectFactory for InstanceRecorder {
    fn instantiate(
        &mut self,
        prefab: &PrefabRef,
        position: Vec3,
        rotation: Quat,
        parent: Option<&ParentRef>,
    ) -> ObjectHandle {
        let handle = ObjectHandle(self.next);
        self.next += 1;
        self.live.push(Instance {
            handle,
            prefab: prefab.clone(),
            position,
            rotation,
            parent: parent.cloned(),
        });
        handle
    }

    fn destroy(&mut self, handle: ObjectHandle) {
        if let Some(index) = self.live.iter().position(|i| i.handle == handle) {
            self.live.remove(index);
            self.destroyed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_recorder_tracks_lifecycle() {
        let mut factory = InstanceRecorder::new();
        let prefab = PrefabRef::new("grass");
        let parent = ParentRef::new("field");

        let a = factory.instantiate(&prefab, Vec3::ZERO, Quat::IDENTITY, Some(&parent));
        let b = factory.instantiate(&prefab, Vec3::X, Quat::IDENTITY, None);
        assert_ne!(a, b);
        assert_eq!(factory.instances().len(), 2);
        assert_eq!(factory.instances()[0].parent, Some(parent));

        factory.destroy(a);
        factory.destroy(a);
        assert_eq!(factory.instances().len(), 1);
        assert_eq!(factory.instances()[0].handle, b);
        assert_eq!(factory.destroyed_count(), 1);
    }

    #[test]
    fn input_state_is_an_input_source() {
        let state = InputState {
            cursor: Some(Vec3::ONE),
            placement_active: true,
            resize_delta: -1.0,
        };
        let source: &dyn InputSource = &state;
        assert_eq!(source.cursor(), Some(Vec3::ONE));
        assert!(source.placement_active());
        assert_eq!(source.resize_delta(), -1.0);
    }
}
