//! Drawing surface abstraction
//!
//! Scenes issue immediate-mode 2D draw calls against a [`Surface`]. In the
//! browser that is a Canvas 2D context; headless runs and tests record the
//! calls instead.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;
pub mod scene;

use glam::Vec2;

use crate::sim::{Color, Extent, Rect};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use recording::{DrawCmd, RecordingSurface};
pub use scene::Scene;

/// Gradient color stop, `offset` in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// How a shape is filled
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Linear gradient between two points
    Linear {
        from: Vec2,
        to: Vec2,
        stops: Vec<GradientStop>,
    },
    /// Radial gradient between two circles
    Radial {
        inner_center: Vec2,
        inner_radius: f32,
        outer_center: Vec2,
        outer_radius: f32,
        stops: Vec<GradientStop>,
    },
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

/// Dashed line pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    pub on: f32,
    pub off: f32,
    /// Pattern advance along the line
    pub offset: f32,
}

/// Line style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub dash: Option<Dash>,
}

impl Stroke {
    pub const fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub const fn dashed(color: Color, width: f32, dash: Dash) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }
}

/// Immediate-mode 2D drawing target
pub trait Surface {
    /// Current drawable size
    fn extent(&self) -> Extent;

    /// Called once before a scene draws a frame
    fn begin_frame(&mut self) {}

    /// Erase to transparent
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke);

    /// Fill a closed polygon
    fn fill_polygon(&mut self, points: &[Vec2], paint: &Paint);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke);

    /// Soft glow behind everything drawn until [`Surface::clear_glow`]
    fn set_glow(&mut self, color: Color, blur: f32);

    fn clear_glow(&mut self);
}
