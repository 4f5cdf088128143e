use brush_scatter::prelude::*;
use brush_scatter_examples::{init_tracing, Canvas, PointStyle, RenderConfig};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let surface = FlatSurface::new(0.0);
    let sampler = PlacementSampler::default();
    let mut brush = BrushState::default();
    brush.set_center(Some(Vec3::ZERO));
    let min_distance = 0.25;
    let preview_points = 100;

    let mut rng = StdRng::seed_from_u64(99);
    let mut set = PlacementSet::new();
    let mut stats = AttemptStats::default();

    // Keep placing and watch the preview shrink as the disc fills up.
    for round in 0..=10 {
        let preview: Vec<Vec3> = sampler
            .refresh_preview(
                &brush,
                &surface,
                set.as_slice(),
                min_distance,
                preview_points,
                &mut rng,
            )
            .collect();
        tracing::info!(
            "round {round:2}: {:4} placed, preview {:3}/{preview_points}",
            set.len(),
            preview.len()
        );

        for _ in 0..400 {
            let outcome = sampler.attempt(&brush, &surface, set.as_slice(), min_distance, &mut rng);
            stats.record(&outcome);
            if let Some(p) = outcome.accepted() {
                set.try_insert(p, min_distance);
            }
        }
    }
    tracing::info!(
        "acceptance over {} attempts: {:.1}%",
        stats.attempts,
        stats.acceptance_rate() * 100.0
    );

    let render = RenderConfig::new((800, 800), Vec2::new(5.0, 5.0));
    let mut canvas = Canvas::new(render);
    let spacing_px = canvas.world_to_px(min_distance * 0.5);
    canvas.draw_points(
        set.as_slice(),
        PointStyle::Ring {
            color: [90, 200, 90],
            radius: spacing_px,
        },
    );
    canvas.save("preview-saturation.png")?;
    Ok(())
}
