#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{
    init_tracing, render_overlay_to_png, render_points_to_png, Canvas, PointStyle, RenderConfig,
};
