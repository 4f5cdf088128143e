use brush_scatter::prelude::*;
use brush_scatter_examples::{init_tracing, render_overlay_to_png, RenderConfig};
use glam::{Vec2, Vec3};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ToolConfig::new(PrefabRef::new("grass"))
        .with_parent(ParentRef::new("meadow"))
        .with_brush_size(3.0)
        .with_min_distance(0.4)
        .with_seed(2025);

    let mut session = PlacementSession::try_new(config, InstanceRecorder::new(), ())?
        .with_surface(FlatSurface::square(0.0, 20.0));

    let mut sink = VecSink::new();
    session.activate(&mut sink);

    // An S-shaped stroke across the field at 60 fps, trigger held throughout.
    let frames = 600;
    let dt = 1.0 / 60.0;
    for frame in 0..frames {
        let t = frame as f32 / frames as f32;
        let cursor = Vec3::new(-14.0 + 28.0 * t, 0.0, 8.0 * (t * std::f32::consts::TAU).sin());
        session.handle_input(InputEvent::CursorMoved(Some(cursor)), &mut sink);
        if frame == 0 {
            session.handle_input(InputEvent::PlacePressed, &mut sink);
        }
        session.tick(dt, &mut sink);
    }
    session.handle_input(InputEvent::PlaceReleased, &mut sink);

    let stats = session.stats();
    tracing::info!(
        "{} placed from {} attempts (acceptance {:.1}%, {} spacing rejections)",
        stats.committed,
        stats.placement.attempts,
        stats.placement.acceptance_rate() * 100.0,
        stats.placement.spacing_violations,
    );
    tracing::info!(
        "{} events, {} preview refreshes",
        sink.len(),
        stats.preview_refreshes
    );

    let render = RenderConfig::new((1000, 1000), Vec2::new(40.0, 40.0));
    render_overlay_to_png(&session.overlay(), &render, "brush-stroke-flat.png")?;

    session.deactivate(&mut sink);
    Ok(())
}
