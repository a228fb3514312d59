//! Canvas 2D drawing surface (browser only)

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use super::{GradientStop, Paint, Stroke, Surface};
use crate::sim::{Color, Extent, Rect};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Shadow-blur glow is costly on low-end devices
    glow_enabled: bool,
}

impl CanvasSurface {
    /// Wrap a canvas, or None if no 2D context is available
    pub fn new(canvas: HtmlCanvasElement, glow_enabled: bool) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            glow_enabled,
        })
    }

    /// Match the backing store to the element's layout size
    pub fn fit_to_element(&self) -> Extent {
        let width = self.canvas.client_width().max(0) as u32;
        let height = self.canvas.client_height().max(0) as u32;
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
        Extent::new(width as f32, height as f32)
    }

    fn gradient(&self, paint: &Paint) -> Option<(CanvasGradient, Vec<GradientStop>)> {
        match paint {
            Paint::Solid(_) => None,
            Paint::Linear { from, to, stops } => {
                let g = self.ctx.create_linear_gradient(
                    from.x as f64,
                    from.y as f64,
                    to.x as f64,
                    to.y as f64,
                );
                Some((g, stops.clone()))
            }
            Paint::Radial {
                inner_center,
                inner_radius,
                outer_center,
                outer_radius,
                stops,
            } => {
                let g = self
                    .ctx
                    .create_radial_gradient(
                        inner_center.x as f64,
                        inner_center.y as f64,
                        inner_radius.max(0.0) as f64,
                        outer_center.x as f64,
                        outer_center.y as f64,
                        outer_radius.max(0.0) as f64,
                    )
                    .ok()?;
                Some((g, stops.clone()))
            }
        }
    }

    fn apply_fill(&self, paint: &Paint) {
        if let Paint::Solid(color) = paint {
            self.ctx.set_fill_style_str(&color.to_css());
            return;
        }
        match self.gradient(paint) {
            Some((gradient, stops)) => {
                for stop in stops {
                    gradient
                        .add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.to_css())
                        .ok();
                }
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
            None => self.ctx.set_fill_style_str("transparent"),
        }
    }

    fn apply_stroke(&self, stroke: &Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color.to_css());
        self.ctx.set_line_width(stroke.width as f64);
        let pattern = js_sys::Array::new();
        if let Some(dash) = stroke.dash {
            pattern.push(&JsValue::from_f64(dash.on as f64));
            pattern.push(&JsValue::from_f64(dash.off as f64));
            self.ctx.set_line_dash_offset(dash.offset as f64);
        } else {
            self.ctx.set_line_dash_offset(0.0);
        }
        self.ctx.set_line_dash(&pattern).ok();
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        self.ctx
            .arc(
                center.x as f64,
                center.y as f64,
                radius.max(0.0) as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .ok();
    }
}

impl Surface for CanvasSurface {
    fn extent(&self) -> Extent {
        Extent::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self) {
        let extent = self.extent();
        self.ctx
            .clear_rect(0.0, 0.0, extent.width as f64, extent.height as f64);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.apply_fill(paint);
        self.ctx.fill_rect(
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.apply_stroke(stroke);
        self.ctx.stroke_rect(
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.circle_path(center, radius);
        self.apply_fill(paint);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) {
        self.circle_path(center, radius);
        self.apply_stroke(stroke);
        self.ctx.stroke();
    }

    fn fill_polygon(&mut self, points: &[Vec2], paint: &Paint) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.apply_fill(paint);
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        self.apply_stroke(stroke);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn set_glow(&mut self, color: Color, blur: f32) {
        if self.glow_enabled {
            self.ctx.set_shadow_color(&color.to_css());
            self.ctx.set_shadow_blur(blur as f64);
        }
    }

    fn clear_glow(&mut self) {
        self.ctx.set_shadow_blur(0.0);
    }
}
