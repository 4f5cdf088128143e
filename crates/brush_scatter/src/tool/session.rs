//! Placement session: the brush tool's state machine.
//!
//! A session is `Idle` until the placement trigger goes down and `Placing` until it goes up.
//! Two [`IntervalTimer`]s drive it from [`PlacementSession::tick`]: the preview timer
//! regenerates the preview set, and while placing the spawn timer makes one placement attempt
//! per firing. Accepted points are committed to the [`PlacementSet`], spawned through the
//! host's [`ObjectFactory`] and recorded with its [`HistoryRecorder`].
use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::brush::BrushState;
use crate::config::{PrefabRef, ToolConfig};
use crate::error::{Error, Precondition, Result};
use crate::placement::{
    AttemptOutcome, AttemptStats, PlacementSampler, PlacementSet, PlacementSnapshot,
};
use crate::sampling::{rand01, RadialDistribution};
use crate::surface::{project_to_surface, SurfaceProjector};
use crate::tool::events::{EventSink, ToolEvent};
use crate::tool::host::{HistoryRecorder, InputEvent, InputSource, ObjectFactory, ObjectHandle};
use crate::tool::overlay::ToolOverlay;
use crate::tool::scheduler::EditorTool;
use crate::tool::timer::IntervalTimer;

/// History label for spawned instances.
pub const PLACE_LABEL: &str = "Place Grass";
/// History label for a bulk clear.
pub const CLEAR_LABEL: &str = "Clear Grass";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolState {
    #[default]
    Idle,
    Placing,
}

/// Counters kept over the lifetime of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Outcomes of placement attempts (preview attempts are not counted).
    pub placement: AttemptStats,
    /// Points committed since the session started.
    pub committed: usize,
    /// Preview regenerations.
    pub preview_refreshes: usize,
}

pub struct PlacementSession<F: ObjectFactory, H: HistoryRecorder = ()> {
    config: ToolConfig,
    sampler: PlacementSampler,
    brush: BrushState,
    surface: Option<Box<dyn SurfaceProjector>>,
    placements: PlacementSet,
    spawned: Vec<ObjectHandle>,
    preview: Vec<Vec3>,
    state: ToolState,
    active: bool,
    trigger_held: bool,
    spawn_timer: IntervalTimer,
    preview_timer: IntervalTimer,
    rng: StdRng,
    factory: F,
    history: H,
    stats: SessionStats,
}

impl<F: ObjectFactory, H: HistoryRecorder> PlacementSession<F, H> {
    /// Creates an inactive session after validating `config`.
    pub fn try_new(config: ToolConfig, factory: F, history: H) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sampler: PlacementSampler::new(config.distribution),
            brush: BrushState::from_config(&config),
            surface: None,
            placements: PlacementSet::new(),
            spawned: Vec::new(),
            preview: Vec::new(),
            state: ToolState::Idle,
            active: false,
            trigger_held: false,
            spawn_timer: IntervalTimer::new(config.spawn_interval),
            preview_timer: IntervalTimer::new(config.preview_interval),
            rng: StdRng::seed_from_u64(config.seed),
            factory,
            history,
            stats: SessionStats::default(),
            config,
        })
    }

    /// Sets the target surface.
    pub fn with_surface<S: SurfaceProjector + 'static>(mut self, surface: S) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    pub fn set_surface(&mut self, surface: Box<dyn SurfaceProjector>) {
        self.surface = Some(surface);
    }

    /// Removes the target surface. Placement stops and the preview empties.
    ///
    /// A trigger that is still held resumes placing once a surface is set again and the
    /// input is next polled.
    pub fn clear_surface(&mut self, sink: &mut dyn EventSink) {
        self.surface = None;
        self.stop_placing(sink);
        self.preview.clear();
    }

    /// Replaces the placeable prefab. `None` stops placement.
    pub fn set_prefab(&mut self, prefab: Option<PrefabRef>, sink: &mut dyn EventSink) {
        self.config.prefab = prefab;
        if self.config.prefab.is_none() {
            self.stop_placing(sink);
            self.preview.clear();
        }
    }

    /// Changes the spacing applied to future placements. Existing placements are kept.
    pub fn set_min_distance(&mut self, min_distance: f32) -> Result<()> {
        if !min_distance.is_finite() || min_distance < 0.0 {
            warn!("Rejected min_distance {min_distance}");
            return Err(Error::InvalidConfig("min_distance must be >= 0".into()));
        }
        self.config.min_distance = min_distance;
        Ok(())
    }

    pub fn set_distribution(&mut self, distribution: RadialDistribution) {
        self.config.distribution = distribution;
        self.sampler = PlacementSampler::new(distribution);
    }

    /// `Ok` when both a surface and a prefab are configured.
    pub fn readiness(&self) -> Result<()> {
        if self.surface.is_none() {
            return Err(Error::PreconditionMissing(Precondition::Surface));
        }
        if self.config.prefab.is_none() {
            return Err(Error::PreconditionMissing(Precondition::Prefab));
        }
        Ok(())
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn brush(&self) -> &BrushState {
        &self.brush
    }

    pub fn brush_mut(&mut self) -> &mut BrushState {
        &mut self.brush
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Points from the latest preview refresh.
    pub fn preview(&self) -> &[Vec3] {
        &self.preview
    }

    /// Committed positions at this moment.
    pub fn placements(&self) -> PlacementSnapshot {
        self.placements.snapshot()
    }

    /// Host handles of the spawned instances, in placement order.
    pub fn spawned(&self) -> &[ObjectHandle] {
        &self.spawned
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// View of everything a gizmo layer draws.
    pub fn overlay(&self) -> ToolOverlay<'_> {
        ToolOverlay {
            state: self.state,
            brush: &self.brush,
            preview: &self.preview,
            placed: self.placements.as_slice(),
            spacing_radius: self.config.min_distance,
            colors: &self.config.gizmo_colors,
        }
    }

    /// Starts receiving ticks and input.
    pub fn activate(&mut self, sink: &mut dyn EventSink) {
        if self.active {
            return;
        }
        self.active = true;
        self.spawn_timer.reset();
        self.preview_timer.reset();
        info!(
            "Placement tool activated (min_distance {}, brush {})",
            self.config.min_distance,
            self.brush.radius()
        );
        sink.send(ToolEvent::Activated);
        if let Err(err) = self.readiness() {
            warn!("Placement tool is inactive: {err}");
        }
        self.refresh_preview(sink);
    }

    /// Stops placing, drops the preview and stops reacting to ticks and input.
    pub fn deactivate(&mut self, sink: &mut dyn EventSink) {
        if !self.active {
            return;
        }
        self.stop_placing(sink);
        self.trigger_held = false;
        self.preview.clear();
        self.active = false;
        info!(
            "Placement tool deactivated with {} placements",
            self.placements.len()
        );
        sink.send(ToolEvent::Deactivated);
    }

    /// Advances both timers by `dt` seconds.
    pub fn tick(&mut self, dt: f32, sink: &mut dyn EventSink) {
        if !self.active {
            return;
        }
        if self.preview_timer.tick(dt) {
            self.refresh_preview(sink);
        }
        if self.state == ToolState::Placing && self.spawn_timer.tick(dt) {
            self.place_once(sink);
        }
    }

    /// Applies one input event.
    pub fn handle_input(&mut self, event: InputEvent, sink: &mut dyn EventSink) {
        if !self.active {
            return;
        }
        match event {
            InputEvent::CursorMoved(cursor) => {
                let center = match (&self.surface, cursor) {
                    (Some(surface), Some(c)) => project_to_surface(surface.as_ref(), c),
                    (None, c) => c,
                    (_, None) => None,
                };
                self.brush.set_center(center);
            }
            InputEvent::PlacePressed => {
                self.trigger_held = true;
                self.start_placing(sink);
            }
            InputEvent::PlaceReleased => {
                self.trigger_held = false;
                self.stop_placing(sink);
            }
            InputEvent::Resize(delta) => {
                if delta == 0.0 {
                    return;
                }
                let before = self.brush.radius();
                let radius = self.brush.resize(delta);
                if radius != before {
                    sink.send(ToolEvent::BrushResized { radius });
                }
            }
            InputEvent::ClearRequested => {
                self.clear_all(sink);
            }
        }
    }

    /// Reads `source` and turns it into input events; trigger changes are sent on edges only.
    pub fn poll_input(&mut self, source: &dyn InputSource, sink: &mut dyn EventSink) {
        self.handle_input(InputEvent::CursorMoved(source.cursor()), sink);

        let delta = source.resize_delta();
        if delta != 0.0 {
            self.handle_input(InputEvent::Resize(delta), sink);
        }

        match (source.placement_active(), self.trigger_held) {
            (true, false) => self.handle_input(InputEvent::PlacePressed, sink),
            (false, true) => self.handle_input(InputEvent::PlaceReleased, sink),
            // Held through a lost precondition: pick placing back up once it is satisfied.
            (true, true) if self.state == ToolState::Idle && self.readiness().is_ok() => {
                self.start_placing(sink)
            }
            _ => {}
        }
    }

    fn start_placing(&mut self, sink: &mut dyn EventSink) {
        if self.state == ToolState::Placing {
            return;
        }
        if let Err(err) = self.readiness() {
            warn!("Refusing to place: {err}");
            if let Error::PreconditionMissing(missing) = err {
                sink.send(ToolEvent::PreconditionMissing { missing });
            }
            return;
        }
        self.state = ToolState::Placing;
        self.spawn_timer.reset();
        debug!("Placing started");
        sink.send(ToolEvent::PlacingStarted);
    }

    fn stop_placing(&mut self, sink: &mut dyn EventSink) {
        if self.state != ToolState::Placing {
            return;
        }
        self.state = ToolState::Idle;
        debug!("Placing stopped");
        sink.send(ToolEvent::PlacingStopped);
    }

    /// Makes one placement attempt and commits it on success.
    ///
    /// Returns the handle of the spawned instance. Nothing happens while a precondition is
    /// missing.
    pub fn place_once(&mut self, sink: &mut dyn EventSink) -> Option<ObjectHandle> {
        let surface = self.surface.as_deref()?;
        self.config.prefab.as_ref()?;

        let outcome = self.sampler.attempt(
            &self.brush,
            surface,
            self.placements.as_slice(),
            self.config.min_distance,
            &mut self.rng,
        );
        self.stats.placement.record(&outcome);

        match outcome {
            AttemptOutcome::Accepted(position) => self.commit(position, sink),
            other => {
                debug!("Placement attempt rejected: {other:?}");
                None
            }
        }
    }

    fn commit(&mut self, position: Vec3, sink: &mut dyn EventSink) -> Option<ObjectHandle> {
        let prefab = self.config.prefab.as_ref()?;
        if !self.placements.try_insert(position, self.config.min_distance) {
            return None;
        }

        let rotation = if self.config.random_yaw {
            Quat::from_rotation_y(rand01(&mut self.rng) * TAU)
        } else {
            Quat::IDENTITY
        };

        let handle =
            self.factory
                .instantiate(prefab, position, rotation, self.config.parent.as_ref());
        self.history.record_created(PLACE_LABEL, handle);
        self.spawned.push(handle);
        self.stats.committed += 1;
        debug!("Placed {handle:?} at {position}");
        sink.send(ToolEvent::Placed { position, handle });

        self.refresh_preview(sink);
        Some(handle)
    }

    /// Regenerates the preview set. Without a surface or prefab the preview is left empty.
    pub fn refresh_preview(&mut self, sink: &mut dyn EventSink) {
        self.preview.clear();
        if self.config.prefab.is_none() {
            return;
        }
        let Some(surface) = self.surface.as_deref() else {
            return;
        };

        self.preview.extend(self.sampler.refresh_preview(
            &self.brush,
            surface,
            self.placements.as_slice(),
            self.config.min_distance,
            self.config.preview_points,
            &mut self.rng,
        ));
        self.stats.preview_refreshes += 1;
        sink.send(ToolEvent::PreviewRefreshed {
            count: self.preview.len(),
        });
    }

    /// Destroys every spawned instance and empties the placement set. Returns how many were
    /// removed.
    pub fn clear_all(&mut self, sink: &mut dyn EventSink) -> usize {
        let handles = std::mem::take(&mut self.spawned);
        for &handle in &handles {
            self.factory.destroy(handle);
        }
        if !handles.is_empty() {
            self.history.record_destroyed(CLEAR_LABEL, &handles);
        }
        let count = self.placements.clear();
        info!("Cleared {count} placements");
        sink.send(ToolEvent::Cleared { count });
        self.refresh_preview(sink);
        count
    }
}

impl<F: ObjectFactory, H: HistoryRecorder> EditorTool for PlacementSession<F, H> {
    fn name(&self) -> &str {
        "brush_scatter"
    }

    fn on_activate(&mut self, sink: &mut dyn EventSink) {
        self.activate(sink);
    }

    fn on_tick(&mut self, dt: f32, sink: &mut dyn EventSink) {
        self.tick(dt, sink);
    }

    fn on_input_event(&mut self, event: InputEvent, sink: &mut dyn EventSink) {
        self.handle_input(event, sink);
    }

    fn on_deactivate(&mut self, sink: &mut dyn EventSink) {
        self.deactivate(sink);
    }
}
