//! Night Run: endless three-lane dodging racer
//!
//! Difficulty is derived from score: every 500 points adds one unit of game
//! speed and every 1000 points shortens the obstacle spawn interval by one
//! tick (down to a floor).

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, first_hit};
use super::color::Color;
use super::parallax::Skyline;
use super::particle::{Particle, burst, step_particles};
use super::state::{Extent, GameEvent, IdAllocator, SessionPhase, SimRng, seeded_rng};
use super::tick::{Game, TickInput};
use crate::consts::{LANE_COUNT, LANE_DASH_OFF, LANE_DASH_ON, OBSTACLE_HUE_MAX, OBSTACLE_HUE_MIN};
use crate::tuning::RacerTuning;

/// Player car color
pub const PLAYER_COLOR: Color = Color::hsl(0.0, 100.0, 50.0);

/// A falling car in one of the lanes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
    /// Fall speed (units per tick)
    pub speed: f32,
    pub color: Color,
}

/// Complete Night Run state
#[derive(Debug, Clone)]
pub struct RacerState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: SimRng,
    pub tuning: RacerTuning,
    pub extent: Extent,
    pub phase: SessionPhase,
    pub score: u64,
    /// Playing ticks since (re)start; drives obstacle spawns
    pub frame: u64,
    /// Lane marking scroll, in `[0, dash pattern length)`
    pub road_offset: f32,
    /// Player car center x
    pub player_x: f32,
    /// Live obstacles, oldest (lowest) first
    pub obstacles: Vec<Obstacle>,
    pub particles: Vec<Particle>,
    pub skyline: Skyline,
    events: Vec<GameEvent>,
    ids: IdAllocator,
}

/// Length of one dash + gap of the lane markings
pub const DASH_PATTERN: f32 = LANE_DASH_ON + LANE_DASH_OFF;

impl RacerState {
    pub fn new(seed: u64, extent: Extent, tuning: RacerTuning) -> Self {
        let mut rng = seeded_rng(seed);
        let skyline = Skyline::populate(
            extent,
            tuning.far_layer_count,
            tuning.near_layer_count,
            &mut rng,
        );
        Self {
            seed,
            rng,
            tuning,
            extent,
            phase: SessionPhase::Idle,
            score: 0,
            frame: 0,
            road_offset: 0.0,
            player_x: extent.center_x(),
            obstacles: Vec::new(),
            particles: Vec::new(),
            skyline,
            events: Vec::new(),
            ids: IdAllocator::default(),
        }
    }

    /// Current game speed: base + one unit per score step
    pub fn game_speed(&self) -> f32 {
        self.tuning.base_speed + (self.score / self.tuning.speed_step_score) as f32
    }

    /// Ticks between obstacle spawns, shrinking with score down to the floor
    pub fn spawn_interval(&self) -> u64 {
        self.tuning
            .spawn_interval_base
            .saturating_sub(self.score / self.tuning.interval_step_score)
            .max(self.tuning.spawn_interval_min)
    }

    /// Left edge of the road
    pub fn road_left(&self) -> f32 {
        self.extent.center_x() - self.tuning.road_width / 2.0
    }

    /// Allowed range for the player's center x
    pub fn corridor(&self) -> (f32, f32) {
        let left = self.road_left();
        (
            left + self.tuning.corridor_margin,
            left + self.tuning.road_width - self.tuning.corridor_margin,
        )
    }

    fn clamp_to_corridor(&self, x: f32) -> f32 {
        let (min, max) = self.corridor();
        x.clamp(min, max)
    }

    /// Player car bounding box
    pub fn player_rect(&self) -> Rect {
        Rect::new(
            self.player_x - self.tuning.car_width / 2.0,
            self.extent.height - self.tuning.player_bottom_offset,
            self.tuning.car_width,
            self.tuning.car_height,
        )
    }

    /// Top-left x of an obstacle centered in `lane`
    pub fn lane_x(&self, lane: u32) -> f32 {
        let lane_width = self.tuning.road_width / LANE_COUNT as f32;
        self.road_left() + lane as f32 * lane_width + (lane_width - self.tuning.car_width) / 2.0
    }

    /// Drop a new obstacle at the top of a random lane
    pub fn spawn_obstacle(&mut self) -> u32 {
        let lane = self.rng.random_range(0..LANE_COUNT);
        let jitter = self
            .rng
            .random_range(self.tuning.speed_jitter_min..self.tuning.speed_jitter_max);
        let color = Color::random_in_band(&mut self.rng, OBSTACLE_HUE_MIN, OBSTACLE_HUE_MAX, 100.0, 50.0);
        let id = self.ids.next_id();
        self.obstacles.push(Obstacle {
            id,
            rect: Rect::new(
                self.lane_x(lane),
                self.tuning.obstacle_spawn_y,
                self.tuning.car_width,
                self.tuning.car_height,
            ),
            speed: self.game_speed() * jitter,
            color,
        });
        id
    }

    fn steer(&mut self, input: &TickInput) {
        if let Some(x) = input.steer_x {
            self.player_x = self.clamp_to_corridor(x);
        }
        if input.left {
            self.player_x -= self.tuning.player_speed;
        }
        if input.right {
            self.player_x += self.tuning.player_speed;
        }
        self.player_x = self.clamp_to_corridor(self.player_x);
    }

    /// End the run against obstacle `index`
    fn crash(&mut self, index: usize) {
        let player = self.player_rect();
        let (id, rect, color) = {
            let o = &self.obstacles[index];
            (o.id, o.rect, o.color)
        };
        let impact = player
            .intersection(&rect)
            .map(|r| r.center())
            .unwrap_or_else(|| player.center());

        self.particles.extend(burst(impact, color, &mut self.rng));
        self.phase = SessionPhase::Ended;
        self.events.push(GameEvent::Crashed { score: self.score });
        log::info!("Crashed into obstacle {} - final score {}", id, self.score);
    }

    /// Score the front obstacle once it is past the bottom margin.
    ///
    /// Only the oldest obstacle is checked, one per tick. A faster obstacle
    /// that overtakes it stays in the store (off-screen, harmless) until it
    /// reaches the front, so its award is delayed but never lost.
    fn expire_front(&mut self) {
        let limit = self.extent.height + self.tuning.expiry_margin;
        if self.obstacles.first().is_some_and(|o| o.rect.pos.y > limit) {
            let obstacle = self.obstacles.remove(0);
            self.score += self.tuning.obstacle_award;
            self.events.push(GameEvent::Scored { total: self.score });
            log::debug!("Obstacle {} cleared (score {})", obstacle.id, self.score);
        }
    }

    fn tick_playing(&mut self, input: &TickInput) {
        let speed = self.game_speed();

        self.skyline.scroll(speed, self.extent, &mut self.rng);

        self.steer(input);
        self.frame += 1;
        if self.frame % self.spawn_interval() == 0 {
            self.spawn_obstacle();
        }

        for obstacle in &mut self.obstacles {
            obstacle.rect.pos.y += obstacle.speed;
        }
        step_particles(&mut self.particles);
        self.road_offset = (self.road_offset + speed) % DASH_PATTERN;

        let player = self.player_rect();
        if let Some(index) = first_hit(
            &player,
            self.obstacles.iter().map(|o| &o.rect),
            self.tuning.hitbox_padding,
        ) {
            self.crash(index);
            return;
        }

        self.expire_front();
    }

    /// Reset the run and enter play
    fn restart(&mut self) {
        self.score = 0;
        self.frame = 0;
        self.road_offset = 0.0;
        self.player_x = self.extent.center_x();
        self.obstacles.clear();
        self.particles.clear();
        self.phase = SessionPhase::Playing;
        self.events.push(GameEvent::Started);
    }
}

impl Game for RacerState {
    fn tick(&mut self, input: &TickInput) {
        match self.phase {
            SessionPhase::Playing => self.tick_playing(input),
            SessionPhase::Idle | SessionPhase::Ended => {
                let speed = self.tuning.base_speed * self.tuning.idle_scroll_factor;
                self.skyline.scroll(speed, self.extent, &mut self.rng);
                step_particles(&mut self.particles);
            }
        }
    }

    fn start(&mut self) {
        if self.phase == SessionPhase::Playing {
            return;
        }
        let restarting = self.phase == SessionPhase::Ended;
        self.restart();
        if restarting {
            log::info!("Night Run restarted");
        } else {
            log::info!("Night Run started");
        }
    }

    fn phase(&self) -> SessionPhase {
        self.phase
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn extent(&self) -> Extent {
        self.extent
    }

    fn resize(&mut self, extent: Extent) {
        self.extent = extent;
        self.skyline = Skyline::populate(
            extent,
            self.tuning.far_layer_count,
            self.tuning.near_layer_count,
            &mut self.rng,
        );
        self.player_x = self.clamp_to_corridor(self.player_x);
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn engine_speed(&self) -> Option<f32> {
        (self.phase == SessionPhase::Playing).then(|| self.game_speed())
    }
}
