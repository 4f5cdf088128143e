use std::path::Path;

use brush_scatter::prelude::ToolOverlay;
use glam::{Vec2, Vec3};
use image::{Rgb, RgbImage};
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Image size and the XZ footprint it covers, centred on the origin.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub domain_extent: Vec2,
    pub background: [u8; 3],
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), domain_extent: Vec2) -> Self {
        Self {
            image_size,
            domain_extent,
            background: [24, 28, 24],
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }
}

/// How a set of points is drawn.
#[derive(Debug, Clone, Copy)]
pub enum PointStyle {
    Dot { color: [u8; 3], radius: i32 },
    Ring { color: [u8; 3], radius: i32 },
}

/// RGB image with world-space (XZ) drawing helpers.
pub struct Canvas {
    config: RenderConfig,
    image: RgbImage,
}

impl Canvas {
    pub fn new(config: RenderConfig) -> Self {
        let (w, h) = config.image_size;
        let image = RgbImage::from_pixel(w, h, Rgb(config.background));
        Self { config, image }
    }

    /// Pixel position of a world point; X maps right and Z maps down.
    pub fn to_pixel(&self, p: Vec3) -> (i32, i32) {
        let (w, h) = self.config.image_size;
        let u = p.x / self.config.domain_extent.x + 0.5;
        let v = p.z / self.config.domain_extent.y + 0.5;
        ((u * w as f32).floor() as i32, (v * h as f32).floor() as i32)
    }

    /// World distance expressed in pixels along X.
    pub fn world_to_px(&self, d: f32) -> i32 {
        (d / self.config.domain_extent.x * self.config.image_size.0 as f32).round() as i32
    }

    fn put(&mut self, x: i32, y: i32, color: [u8; 3]) {
        if x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height()
        {
            self.image.put_pixel(x as u32, y as u32, Rgb(color));
        }
    }

    pub fn draw_points(&mut self, points: &[Vec3], style: PointStyle) {
        for &p in points {
            let (cx, cy) = self.to_pixel(p);
            match style {
                PointStyle::Dot { color, radius } => self.fill_disc(cx, cy, radius, color),
                PointStyle::Ring { color, radius } => self.stroke_circle(cx, cy, radius, color),
            }
        }
    }

    /// Points coloured by height between `low` and `high`.
    pub fn draw_points_by_height(&mut self, points: &[Vec3], radius: i32, low: f32, high: f32) {
        let span = (high - low).max(f32::EPSILON);
        for &p in points {
            let t = ((p.y - low) / span).clamp(0.0, 1.0);
            let color = [
                (40.0 + 180.0 * t) as u8,
                (200.0 - 60.0 * t) as u8,
                (60.0 + 20.0 * t) as u8,
            ];
            let (cx, cy) = self.to_pixel(p);
            self.fill_disc(cx, cy, radius, color);
        }
    }

    pub fn draw_polyline(&mut self, points: &[Vec3], color: [u8; 3]) {
        for pair in points.windows(2) {
            let (x0, y0) = self.to_pixel(pair[0]);
            let (x1, y1) = self.to_pixel(pair[1]);
            self.line(x0, y0, x1, y1, color);
        }
    }

    fn fill_disc(&mut self, cx: i32, cy: i32, radius: i32, color: [u8; 3]) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn stroke_circle(&mut self, cx: i32, cy: i32, radius: i32, color: [u8; 3]) {
        let inner = (radius - 1).max(0);
        let (r2, i2) = (radius * radius, inner * inner);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let d2 = dx * dx + dy * dy;
                if d2 <= r2 && d2 >= i2 {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn line(&mut self, mut x0: i32, mut y0: i32, x1: i32, y1: i32, color: [u8; 3]) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.image.save(path)?;
        tracing::info!("Wrote {}", path.display());
        Ok(())
    }
}

/// Renders a set of points with one style.
pub fn render_points_to_png(
    points: &[Vec3],
    style: PointStyle,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let mut canvas = Canvas::new(*config);
    canvas.draw_points(points, style);
    canvas.save(path)
}

/// Renders placed points, their spacing circles inside the brush, the preview and the brush ring
/// using the overlay's gizmo colours.
pub fn render_overlay_to_png(
    overlay: &ToolOverlay<'_>,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let mut canvas = Canvas::new(*config);

    canvas.draw_points(
        overlay.placed,
        PointStyle::Dot {
            color: [90, 200, 90],
            radius: 2,
        },
    );

    let spacing = to_rgb(overlay.colors.spacing);
    let spacing_px = canvas.world_to_px(overlay.spacing_radius).max(1);
    for (p, _) in overlay.spacing_rings() {
        canvas.draw_points(
            &[p],
            PointStyle::Ring {
                color: spacing,
                radius: spacing_px,
            },
        );
    }

    canvas.draw_points(
        overlay.preview,
        PointStyle::Dot {
            color: to_rgb(overlay.colors.preview),
            radius: 1,
        },
    );

    let ring = overlay.brush_ring(96);
    canvas.draw_polyline(&ring, to_rgb(overlay.colors.brush));

    canvas.save(path)
}

fn to_rgb(rgba: [f32; 4]) -> [u8; 3] {
    let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [c(rgba[0]), c(rgba[1]), c(rgba[2])]
}
