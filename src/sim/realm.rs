//! Bubble Realm: pop the rising bubbles
//!
//! No terminal state. Start toggles between the ambient attract mode and
//! play; the score only ever grows.

use glam::Vec2;
use rand::Rng;

use super::bubble::Bubble;
use super::collision::pop_target;
use super::particle::{Particle, burst, step_particles};
use super::state::{Extent, GameEvent, IdAllocator, SessionPhase, SimRng, seeded_rng};
use super::tick::{Game, TickInput};
use crate::consts::{POP_PITCH_MAX, POP_PITCH_MIN};
use crate::tuning::RealmTuning;

/// Complete Bubble Realm state
#[derive(Debug, Clone)]
pub struct RealmState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: SimRng,
    pub tuning: RealmTuning,
    pub extent: Extent,
    pub phase: SessionPhase,
    /// Bubbles popped
    pub score: u64,
    /// Simulation tick counter (drives the wobble)
    pub frame: u64,
    /// Ticks since the last playing spawn
    pub spawn_counter: u32,
    /// Live bubbles, oldest first
    pub bubbles: Vec<Bubble>,
    pub particles: Vec<Particle>,
    events: Vec<GameEvent>,
    ids: IdAllocator,
}

impl RealmState {
    pub fn new(seed: u64, extent: Extent, tuning: RealmTuning) -> Self {
        Self {
            seed,
            rng: seeded_rng(seed),
            tuning,
            extent,
            phase: SessionPhase::Idle,
            score: 0,
            frame: 0,
            spawn_counter: 0,
            bubbles: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            ids: IdAllocator::default(),
        }
    }

    /// Create a bubble at the bottom edge and add it to the store
    pub fn spawn_bubble(&mut self) -> u32 {
        let id = self.ids.next_id();
        let bubble = Bubble::spawn(id, self.extent, &self.tuning, &mut self.rng);
        self.bubbles.push(bubble);
        id
    }

    fn spawn(&mut self) {
        match self.phase {
            SessionPhase::Playing => {
                self.spawn_counter += 1;
                if self.spawn_counter > self.tuning.spawn_rate {
                    self.spawn_bubble();
                    self.spawn_counter = 0;
                }
            }
            SessionPhase::Idle => {
                if self.bubbles.len() < self.tuning.ambient_max_bubbles
                    && self.rng.random_bool(self.tuning.ambient_spawn_chance)
                {
                    self.spawn_bubble();
                }
            }
            SessionPhase::Ended => {}
        }
    }

    /// Pop the bubble under `point`, if any. At most one bubble per press.
    pub fn pop_at(&mut self, point: Vec2) -> Option<Bubble> {
        let index = pop_target(&self.bubbles, point, self.tuning.pop_tolerance)?;
        let bubble = self.bubbles.remove(index);

        self.particles
            .extend(burst(bubble.pos, bubble.color, &mut self.rng));
        self.score += 1;

        let pitch = self.rng.random_range(POP_PITCH_MIN..POP_PITCH_MAX);
        self.events.push(GameEvent::Popped {
            pos: bubble.pos,
            pitch,
        });
        log::debug!("Popped bubble {} (score {})", bubble.id, self.score);
        Some(bubble)
    }
}

impl Game for RealmState {
    fn tick(&mut self, input: &TickInput) {
        // Presses hit the bubbles as last drawn, before this tick moves them
        if self.phase == SessionPhase::Playing {
            if let Some(press) = input.press {
                self.pop_at(press);
            }
        }

        self.spawn();

        for bubble in &mut self.bubbles {
            bubble.step(self.frame, input.pointer, &self.tuning);
        }
        step_particles(&mut self.particles);

        self.bubbles.retain(|b| !b.is_gone());

        self.frame += 1;
    }

    fn start(&mut self) {
        match self.phase {
            SessionPhase::Playing => {
                self.phase = SessionPhase::Idle;
                log::info!("Bubble Realm paused (score {})", self.score);
            }
            SessionPhase::Idle | SessionPhase::Ended => {
                self.phase = SessionPhase::Playing;
                self.spawn_counter = 0;
                self.events.push(GameEvent::Started);
                log::info!("Bubble Realm session started");
            }
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
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BURST_SIZE;
    use proptest::prelude::*;

    fn quiet_tuning() -> RealmTuning {
        RealmTuning {
            wobble_amplitude: 0.0,
            ambient_spawn_chance: 0.0,
            ..RealmTuning::default()
        }
    }

    fn playing(seed: u64) -> RealmState {
        let mut state = RealmState::new(seed, Extent::new(400.0, 300.0), quiet_tuning());
        state.start();
        state.drain_events();
        state
    }

    #[test]
    fn test_start_toggles_idle_and_playing() {
        let mut state = RealmState::new(1, Extent::default(), RealmTuning::default());
        assert_eq!(state.phase(), SessionPhase::Idle);
        state.start();
        assert_eq!(state.phase(), SessionPhase::Playing);
        assert_eq!(state.drain_events(), vec![GameEvent::Started]);
        state.start();
        assert_eq!(state.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_playing_spawns_every_forty_one_ticks() {
        let mut state = playing(5);
        let input = TickInput::default();
        for _ in 0..40 {
            state.tick(&input);
        }
        assert!(state.bubbles.is_empty());
        state.tick(&input);
        assert_eq!(state.bubbles.len(), 1);
        assert_eq!(state.spawn_counter, 0);
    }

    #[test]
    fn test_idle_ambient_population_capped() {
        let tuning = RealmTuning {
            ambient_spawn_chance: 1.0,
            speed_min: 0.0,
            speed_max: 0.001,
            ..RealmTuning::default()
        };
        let mut state = RealmState::new(9, Extent::new(400.0, 300.0), tuning);
        for _ in 0..100 {
            state.tick(&TickInput::default());
        }
        assert_eq!(state.bubbles.len(), 15);
    }

    #[test]
    fn test_pop_removes_bubble_and_bursts() {
        let mut state = playing(3);
        state.spawn_bubble();
        let target_id = state.spawn_bubble();
        let target = state.bubbles[1].clone();

        let removed = state.pop_at(target.pos).unwrap();
        assert_eq!(removed.id, target_id);
        assert_eq!(state.bubbles.len(), 1);
        assert!(state.bubbles.iter().all(|b| b.id != target_id));
        assert_eq!(state.particles.len(), BURST_SIZE);
        assert!(state.particles.iter().all(|p| p.color == target.color));
        assert_eq!(state.score, 1);

        match state.drain_events().as_slice() {
            [GameEvent::Popped { pitch, .. }] => assert!((300.0..600.0).contains(pitch)),
            other => panic!("unexpected events {:?}", other),
        }
    }

    #[test]
    fn test_press_through_tick_pops() {
        let mut state = playing(3);
        state.spawn_bubble();
        let pos = state.bubbles[0].pos;
        let input = TickInput {
            press: Some(pos),
            ..Default::default()
        };
        state.tick(&input);
        assert!(state.bubbles.is_empty());
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_press_at_drawn_edge_beats_repulsion() {
        let mut state = playing(3);
        state.spawn_bubble();
        let b = &mut state.bubbles[0];
        b.pos = Vec2::new(200.0, 150.0);
        b.radius = 20.0;
        b.speed = 0.5;

        // 33 from the drawn center: inside radius + 15, and close enough
        // that the pointer would shove the bubble out of reach
        let click = Vec2::new(233.0, 150.0);
        state.tick(&TickInput {
            pointer: Some(click),
            press: Some(click),
            ..Default::default()
        });
        assert!(state.bubbles.is_empty());
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_resize_keeps_bubbles() {
        let mut state = playing(6);
        state.spawn_bubble();
        state.spawn_bubble();
        let before = state.bubbles.clone();

        state.resize(Extent::new(200.0, 100.0));
        assert_eq!(state.extent, Extent::new(200.0, 100.0));
        assert_eq!(state.bubbles, before);
    }

    #[test]
    fn test_press_ignored_while_idle() {
        let mut state = RealmState::new(3, Extent::new(400.0, 300.0), quiet_tuning());
        state.spawn_bubble();
        let pos = state.bubbles[0].pos;
        state.tick(&TickInput {
            press: Some(pos),
            ..Default::default()
        });
        assert_eq!(state.bubbles.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_miss_changes_nothing() {
        let mut state = playing(4);
        state.spawn_bubble();
        state.spawn_bubble();
        let before = state.bubbles.clone();

        assert!(state.pop_at(Vec2::new(-500.0, -500.0)).is_none());
        assert_eq!(state.bubbles, before);
        assert_eq!(state.score, 0);
        assert!(state.particles.is_empty());
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_bubble_removed_past_top() {
        let mut state = RealmState::new(8, Extent::new(400.0, 300.0), quiet_tuning());
        state.spawn_bubble();
        state.bubbles[0].radius = 20.0;
        state.bubbles[0].pos.y = 300.0 + 20.0;
        state.bubbles[0].speed = 2.0;

        let input = TickInput::default();
        for _ in 0..200 {
            let y_before = state.bubbles.first().map(|b| b.pos.y);
            state.tick(&input);
            match (y_before, state.bubbles.first()) {
                (Some(_), Some(b)) => assert!(b.pos.y >= -40.0),
                (Some(y), None) => assert!(y - 2.0 < -40.0),
                (None, _) => {}
            }
        }
        assert!(state.bubbles.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut a = playing(99);
        let mut b = playing(99);
        let inputs = [
            TickInput {
                pointer: Some(Vec2::new(200.0, 250.0)),
                ..Default::default()
            },
            TickInput {
                press: Some(Vec2::new(200.0, 250.0)),
                ..Default::default()
            },
            TickInput::default(),
        ];
        for i in 0..300 {
            let input = &inputs[i % inputs.len()];
            a.tick(input);
            b.tick(input);
        }
        assert_eq!(a.bubbles, b.bubbles);
        assert_eq!(a.particles, b.particles);
        assert_eq!(a.score, b.score);
    }

    proptest! {
        #[test]
        fn prop_opacity_bounded_and_monotonic(seed in any::<u64>(), ticks in 1usize..200) {
            let mut state = RealmState::new(seed, Extent::new(400.0, 300.0), RealmTuning::default());
            state.start();
            let pointer = Some(Vec2::new(200.0, 150.0));
            for _ in 0..ticks {
                let before: Vec<(u32, f32)> =
                    state.bubbles.iter().map(|b| (b.id, b.opacity)).collect();
                state.tick(&TickInput { pointer, ..Default::default() });
                for b in &state.bubbles {
                    prop_assert!((0.0..=1.0).contains(&b.opacity));
                    if let Some((_, old)) = before.iter().find(|(id, _)| *id == b.id) {
                        prop_assert!(b.opacity >= *old);
                    }
                }
            }
        }
    }
}
