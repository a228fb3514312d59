//! Recording surface for headless runs and tests

use glam::Vec2;

use super::{Paint, Stroke, Surface};
use crate::sim::{Color, Extent, Rect};

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear,
    FillRect(Rect, Paint),
    StrokeRect(Rect, Stroke),
    FillCircle { center: Vec2, radius: f32, paint: Paint },
    StrokeCircle { center: Vec2, radius: f32, stroke: Stroke },
    FillPolygon(Vec<Vec2>, Paint),
    StrokeLine { from: Vec2, to: Vec2, stroke: Stroke },
    Glow { color: Color, blur: f32 },
    NoGlow,
}

/// Surface that keeps every call of the current frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    extent: Extent,
    pub commands: Vec<DrawCmd>,
    /// Frames begun so far
    pub frames: u64,
}

impl RecordingSurface {
    pub fn new(extent: Extent) -> Self {
        Self {
            extent,
            commands: Vec::new(),
            frames: 0,
        }
    }

    /// Number of circle fills in the current frame
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::FillCircle { .. }))
            .count()
    }

    /// Number of polygon fills in the current frame
    pub fn polygon_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::FillPolygon(..)))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn begin_frame(&mut self) {
        self.commands.clear();
        self.frames += 1;
    }

    fn clear(&mut self) {
        self.commands.push(DrawCmd::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCmd::FillRect(rect, paint.clone()));
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.commands.push(DrawCmd::StrokeRect(rect, *stroke));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.commands.push(DrawCmd::FillCircle {
            center,
            radius,
            paint: paint.clone(),
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) {
        self.commands.push(DrawCmd::StrokeCircle {
            center,
            radius,
            stroke: *stroke,
        });
    }

    fn fill_polygon(&mut self, points: &[Vec2], paint: &Paint) {
        self.commands
            .push(DrawCmd::FillPolygon(points.to_vec(), paint.clone()));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        self.commands.push(DrawCmd::StrokeLine {
            from,
            to,
            stroke: *stroke,
        });
    }

    fn set_glow(&mut self, color: Color, blur: f32) {
        self.commands.push(DrawCmd::Glow { color, blur });
    }

    fn clear_glow(&mut self) {
        self.commands.push(DrawCmd::NoGlow);
    }
}
