use brush_scatter::prelude::*;
use brush_scatter_examples::{init_tracing, render_points_to_png, PointStyle, RenderConfig};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let radius = 10.0;
    let count = 4000;
    let render = RenderConfig::new((800, 800), Vec2::new(22.0, 22.0));

    for (distribution, out) in [
        (RadialDistribution::AreaUniform, "distribution-area-uniform.png"),
        (RadialDistribution::Linear, "distribution-linear.png"),
    ] {
        let mut rng = StdRng::seed_from_u64(7);
        let points: Vec<Vec3> = (0..count)
            .map(|_| sample_candidate(Vec3::ZERO, radius, distribution, &mut rng))
            .collect();

        let inner = points
            .iter()
            .filter(|p| Vec2::new(p.x, p.z).length() < radius * 0.5)
            .count();
        tracing::info!(
            "{distribution:?}: {:.1}% of candidates in the inner half radius",
            inner as f32 / count as f32 * 100.0
        );

        render_points_to_png(
            &points,
            PointStyle::Dot {
                color: [235, 235, 235],
                radius: 1,
            },
            &render,
            out,
        )?;
    }

    Ok(())
}
