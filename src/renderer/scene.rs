//! Scene drawing for both games
//!
//! Draw order matters: background first, then entities, particles last.

use glam::Vec2;

use super::{Dash, GradientStop, Paint, Stroke, Surface};
use crate::consts::{LANE_DASH_OFF, LANE_DASH_ON};
use crate::hash_u32;
use crate::sim::racer::PLAYER_COLOR;
use crate::sim::{
    Bubble, Color, ParallaxElement, Particle, RacerState, RealmState, Rect, SessionPhase,
};

/// Translucent night fill; leaves motion trails behind the bubbles
const REALM_BACKDROP: Color = Color::hsla(216.0, 71.0, 2.7, 0.3);
const SKY_TOP: Color = Color::hsl(255.0, 100.0, 1.6);
const SKY_BOTTOM: Color = Color::hsl(288.0, 100.0, 10.0);
const ROAD_FILL: Color = Color::hsla(0.0, 0.0, 3.9, 0.8);
const ROAD_EDGE: Color = Color::hsl(340.0, 100.0, 50.0);
const LANE_MARK: Color = Color::hsla(0.0, 0.0, 100.0, 0.3);
const PLAYER_LIGHTS: Color = Color::hsl(0.0, 100.0, 83.3);

const CAR_GLOW: f32 = 20.0;
const EDGE_GLOW: f32 = 15.0;
const SKYLINE_GLOW: f32 = 20.0;

/// Something that can draw itself onto a surface
pub trait Scene {
    fn draw(&self, surface: &mut dyn Surface);
}

fn draw_particles(surface: &mut dyn Surface, particles: &[Particle]) {
    for p in particles {
        surface.fill_circle(p.pos, p.size, &Paint::Solid(p.color.with_alpha(p.life)));
    }
}

fn draw_bubble(surface: &mut dyn Surface, b: &Bubble) {
    let r = b.radius;
    let shine = Paint::Radial {
        inner_center: b.pos - Vec2::splat(r * 0.3),
        inner_radius: r * 0.1,
        outer_center: b.pos,
        outer_radius: r,
        stops: vec![
            GradientStop::new(0.0, Color::WHITE.with_alpha(0.9)),
            GradientStop::new(0.2, Color::WHITE.with_alpha(0.1)),
            GradientStop::new(1.0, b.color.with_alpha(b.opacity * 0.4)),
        ],
    };
    surface.fill_circle(b.pos, r, &shine);
    surface.stroke_circle(
        b.pos,
        r,
        &Stroke::solid(Color::WHITE.with_alpha(b.opacity * 0.3), 1.0),
    );

    // Specular highlight
    surface.fill_circle(
        b.pos - Vec2::splat(r * 0.4),
        r * 0.2,
        &Paint::Solid(Color::WHITE.with_alpha(b.opacity * 0.4)),
    );
}

impl Scene for RealmState {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.begin_frame();
        let extent = surface.extent();
        surface.fill_rect(
            Rect::new(0.0, 0.0, extent.width, extent.height),
            &Paint::Solid(REALM_BACKDROP),
        );

        for bubble in &self.bubbles {
            draw_bubble(surface, bubble);
        }
        draw_particles(surface, &self.particles);
    }
}

fn draw_building(surface: &mut dyn Surface, index: usize, el: &ParallaxElement) {
    let rect = Rect {
        pos: el.pos,
        size: el.size,
    };
    if !el.glows() {
        surface.fill_rect(rect, &Paint::Solid(el.color));
        return;
    }

    surface.set_glow(el.color, SKYLINE_GLOW);
    surface.fill_rect(rect, &Paint::Solid(Color::BLACK));
    surface.stroke_rect(rect, &Stroke::solid(el.color, 2.0));

    // Lit windows flicker as the building scrolls
    let lit = Paint::Solid(el.color);
    let row_phase = (el.pos.y / 20.0).floor() as i32 as u32;
    let mut window = 0u32;
    let mut wy = el.pos.y + 10.0;
    while wy < el.pos.y + el.size.y - 10.0 {
        let mut wx = el.pos.x + 5.0;
        while wx < el.pos.x + el.size.x - 5.0 {
            if hash_u32(index as u32 * 977 + window, row_phase) % 10 >= 7 {
                surface.fill_rect(Rect::new(wx, wy, 5.0, 8.0), &lit);
            }
            window += 1;
            wx += 15.0;
        }
        wy += 20.0;
    }
    surface.clear_glow();
}

/// Car silhouette: trapezoid body, lights and a dark windshield.
/// `x` is the center, `top` the leading edge.
fn draw_car(surface: &mut dyn Surface, x: f32, top: f32, size: Vec2, color: Color, player: bool) {
    let half_nose = size.x * 0.375;
    let half_tail = size.x * 0.5;
    let length = size.y * 6.0 / 7.0;

    surface.set_glow(color, CAR_GLOW);
    surface.fill_polygon(
        &[
            Vec2::new(x - half_nose, top),
            Vec2::new(x + half_nose, top),
            Vec2::new(x + half_tail, top + length),
            Vec2::new(x - half_tail, top + length),
        ],
        &Paint::Solid(color),
    );

    // Player shows tail lights up front; oncoming cars show headlights at the bottom
    let (lights, light_y) = if player {
        (PLAYER_LIGHTS, top + 5.0)
    } else {
        (Color::WHITE, top + length - 5.0)
    };
    let lights = Paint::Solid(lights);
    surface.fill_rect(Rect::new(x - half_tail + 2.0, light_y, 8.0, 4.0), &lights);
    surface.fill_rect(Rect::new(x + half_tail - 10.0, light_y, 8.0, 4.0), &lights);

    surface.fill_rect(
        Rect::new(x - size.x * 0.3, top + 15.0, size.x * 0.6, 15.0),
        &Paint::Solid(Color::BLACK),
    );
    surface.clear_glow();
}

impl RacerState {
    fn draw_road(&self, surface: &mut dyn Surface) {
        let height = self.extent.height;
        let left = self.road_left();
        let right = left + self.tuning.road_width;
        let center = self.extent.center_x();

        surface.fill_rect(
            Rect::new(left, 0.0, self.tuning.road_width, height),
            &Paint::Solid(ROAD_FILL),
        );

        surface.set_glow(ROAD_EDGE, EDGE_GLOW);
        let edge = Stroke::solid(ROAD_EDGE, 4.0);
        surface.stroke_line(Vec2::new(left, 0.0), Vec2::new(left, height), &edge);
        surface.stroke_line(Vec2::new(right, 0.0), Vec2::new(right, height), &edge);
        surface.clear_glow();

        let lane = Stroke::dashed(
            LANE_MARK,
            2.0,
            Dash {
                on: LANE_DASH_ON,
                off: LANE_DASH_OFF,
                offset: -self.road_offset,
            },
        );
        let divider = self.tuning.road_width / 6.0;
        for x in [center - divider, center + divider] {
            surface.stroke_line(Vec2::new(x, 0.0), Vec2::new(x, height), &lane);
        }
    }
}

impl Scene for RacerState {
    fn draw(&self, surface: &mut dyn Surface) {
        surface.begin_frame();
        let extent = surface.extent();
        surface.clear();
        surface.fill_rect(
            Rect::new(0.0, 0.0, extent.width, extent.height),
            &Paint::Linear {
                from: Vec2::ZERO,
                to: Vec2::new(0.0, extent.height),
                stops: vec![
                    GradientStop::new(0.0, SKY_TOP),
                    GradientStop::new(1.0, SKY_BOTTOM),
                ],
            },
        );

        for (i, el) in self.skyline.elements.iter().enumerate() {
            draw_building(surface, i, el);
        }

        if self.phase != SessionPhase::Idle {
            self.draw_road(surface);

            let car = Vec2::new(self.tuning.car_width, self.tuning.car_height);
            let player = self.player_rect();
            draw_car(surface, self.player_x, player.top(), car, PLAYER_COLOR, true);
            for o in &self.obstacles {
                draw_car(surface, o.rect.center().x, o.rect.top(), car, o.color, false);
            }
        }

        draw_particles(surface, &self.particles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCmd, RecordingSurface};
    use crate::sim::{Extent, Game, TickInput};
    use crate::tuning::{RacerTuning, RealmTuning};

    fn surface() -> RecordingSurface {
        RecordingSurface::new(Extent::new(800.0, 600.0))
    }

    #[test]
    fn test_realm_draws_bubbles_and_highlights() {
        let mut state = RealmState::new(1, Extent::new(800.0, 600.0), RealmTuning::default());
        state.spawn_bubble();
        state.spawn_bubble();
        let mut s = surface();
        state.draw(&mut s);

        // Body + highlight per bubble
        assert_eq!(s.circle_count(), 4);
        assert!(matches!(
            s.commands.first(),
            Some(DrawCmd::FillRect(_, Paint::Solid(c))) if *c == REALM_BACKDROP
        ));
        assert!(s.commands.iter().any(|c| matches!(
            c,
            DrawCmd::FillCircle { paint: Paint::Radial { .. }, .. }
        )));
    }

    #[test]
    fn test_realm_particles_fade_with_life() {
        let mut state = RealmState::new(2, Extent::new(800.0, 600.0), RealmTuning::default());
        state.start();
        state.spawn_bubble();
        let pos = state.bubbles[0].pos;
        state.pop_at(pos);
        state.particles[0].life = 0.25;

        let mut s = surface();
        state.draw(&mut s);
        assert_eq!(s.circle_count(), 8);
        let DrawCmd::FillCircle {
            paint: Paint::Solid(color),
            ..
        } = &s.commands[1]
        else {
            panic!("expected particle circle, got {:?}", s.commands[1]);
        };
        assert_eq!(color.a, 0.25);
    }

    #[test]
    fn test_racer_idle_draws_background_only() {
        let state = RacerState::new(3, Extent::new(800.0, 600.0), RacerTuning::default());
        let mut s = surface();
        state.draw(&mut s);
        assert_eq!(s.commands[0], DrawCmd::Clear);
        assert_eq!(s.polygon_count(), 0);
        assert!(
            !s.commands
                .iter()
                .any(|c| matches!(c, DrawCmd::StrokeLine { .. }))
        );
    }

    #[test]
    fn test_racer_playing_draws_road_and_cars() {
        let mut state = RacerState::new(4, Extent::new(800.0, 600.0), RacerTuning::default());
        state.start();
        state.spawn_obstacle();
        state.spawn_obstacle();
        state.tick(&TickInput::default());

        let mut s = surface();
        state.draw(&mut s);
        assert_eq!(s.polygon_count(), 3);

        let dashes: Vec<_> = s
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCmd::StrokeLine { stroke, .. } => stroke.dash,
                _ => None,
            })
            .collect();
        assert_eq!(dashes.len(), 2);
        assert!(dashes.iter().all(|d| d.offset == -state.road_offset));
    }

    #[test]
    fn test_glow_calls_balanced() {
        let mut state = RacerState::new(5, Extent::new(800.0, 600.0), RacerTuning::default());
        state.start();
        state.spawn_obstacle();
        let mut s = surface();
        state.draw(&mut s);

        let on = s
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::Glow { .. }))
            .count();
        let off = s
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCmd::NoGlow))
            .count();
        assert_eq!(on, off);
        assert!(on > 0);
    }
}
