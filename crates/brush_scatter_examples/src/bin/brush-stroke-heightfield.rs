use brush_scatter::prelude::*;
use brush_scatter_examples::{init_tracing, Canvas, PointStyle, RenderConfig};
use glam::{Vec2, Vec3};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let hills = HeightfieldSurface::from_fn(Vec2::splat(-16.0), 0.5, 65, 65, |p| {
        1.5 * (p.x * 0.35).sin() * (p.y * 0.25).cos()
    })?;

    let config = ToolConfig::new(PrefabRef::new("grass"))
        .with_brush_size(4.0)
        .with_min_distance(0.5)
        .with_seed(11);
    let session = PlacementSession::try_new(config, InstanceRecorder::new(), ())?
        .with_surface(hills);

    // The scheduler owns the session; the host only forwards frames and input.
    let mut scheduler = ToolScheduler::new(VecSink::new());
    let tool = scheduler.register_tool(session);

    let dt = 1.0 / 30.0;
    for (i, center) in [
        Vec3::new(-8.0, 0.0, -8.0),
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(8.0, 0.0, 6.0),
    ]
    .into_iter()
    .enumerate()
    {
        scheduler.dispatch(InputEvent::CursorMoved(Some(center)));
        scheduler.dispatch(InputEvent::Resize(i as f32));
        scheduler.dispatch(InputEvent::PlacePressed);
        for _ in 0..90 {
            scheduler.tick(dt);
        }
        scheduler.dispatch(InputEvent::PlaceReleased);
    }

    let positions = scheduler.sink().placed_positions();
    let resizes = scheduler
        .sink()
        .count(|e| matches!(e, ToolEvent::BrushResized { .. }));
    tracing::info!("{} instances placed, {resizes} resizes", positions.len());

    scheduler.deregister(tool);

    let render = RenderConfig::new((900, 900), Vec2::new(32.0, 32.0));
    let mut canvas = Canvas::new(render);
    canvas.draw_points_by_height(&positions, 3, -1.5, 1.5);
    canvas.draw_points(
        &[Vec3::ZERO],
        PointStyle::Ring {
            color: [200, 200, 200],
            radius: 4,
        },
    );
    canvas.save("brush-stroke-heightfield.png")?;
    Ok(())
}
