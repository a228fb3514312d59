//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON document can override it.
//! Missing fields fall back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Bubble Realm balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RealmTuning {
    pub spawn_rate: u32,
    pub radius_min: f32,
    pub radius_max: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub hue_min: f32,
    pub hue_max: f32,
    pub ambient_spawn_chance: f64,
    pub ambient_max_bubbles: usize,
    pub wobble_frequency: f32,
    pub wobble_amplitude: f32,
    pub repulsion_radius: f32,
    pub repulsion_strength: f32,
    pub fade_in_step: f32,
    pub pop_tolerance: f32,
}

impl Default for RealmTuning {
    fn default() -> Self {
        Self {
            spawn_rate: BUBBLE_SPAWN_RATE,
            radius_min: BUBBLE_MIN_RADIUS,
            radius_max: BUBBLE_MAX_RADIUS,
            speed_min: BUBBLE_MIN_SPEED,
            speed_max: BUBBLE_MAX_SPEED,
            hue_min: BUBBLE_HUE_MIN,
            hue_max: BUBBLE_HUE_MAX,
            ambient_spawn_chance: AMBIENT_SPAWN_CHANCE,
            ambient_max_bubbles: AMBIENT_MAX_BUBBLES,
            wobble_frequency: WOBBLE_FREQUENCY,
            wobble_amplitude: WOBBLE_AMPLITUDE,
            repulsion_radius: REPULSION_RADIUS,
            repulsion_strength: REPULSION_STRENGTH,
            fade_in_step: FADE_IN_STEP,
            pop_tolerance: POP_TOLERANCE,
        }
    }
}

/// Night Run balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RacerTuning {
    pub base_speed: f32,
    pub player_speed: f32,
    pub road_width: f32,
    pub corridor_margin: f32,
    pub car_width: f32,
    pub car_height: f32,
    pub player_bottom_offset: f32,
    pub obstacle_spawn_y: f32,
    pub expiry_margin: f32,
    pub obstacle_award: u64,
    pub speed_step_score: u64,
    pub spawn_interval_base: u64,
    pub spawn_interval_min: u64,
    pub interval_step_score: u64,
    pub speed_jitter_min: f32,
    pub speed_jitter_max: f32,
    pub hitbox_padding: f32,
    pub idle_scroll_factor: f32,
    pub far_layer_count: usize,
    pub near_layer_count: usize,
}

impl Default for RacerTuning {
    fn default() -> Self {
        Self {
            base_speed: GAME_SPEED_BASE,
            player_speed: PLAYER_SPEED,
            road_width: ROAD_WIDTH,
            corridor_margin: CORRIDOR_MARGIN,
            car_width: CAR_WIDTH,
            car_height: CAR_HEIGHT,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,
            obstacle_spawn_y: OBSTACLE_SPAWN_Y,
            expiry_margin: EXPIRY_MARGIN,
            obstacle_award: OBSTACLE_AWARD,
            speed_step_score: SPEED_STEP_SCORE,
            spawn_interval_base: SPAWN_INTERVAL_BASE,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            interval_step_score: INTERVAL_STEP_SCORE,
            speed_jitter_min: SPEED_JITTER_MIN,
            speed_jitter_max: SPEED_JITTER_MAX,
            hitbox_padding: HITBOX_PADDING,
            idle_scroll_factor: IDLE_SCROLL_FACTOR,
            far_layer_count: FAR_LAYER_COUNT,
            near_layer_count: NEAR_LAYER_COUNT,
        }
    }
}

/// All balance data for both games
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub realm: RealmTuning,
    pub racer: RacerTuning,
}

fn check(ok: bool, field: &'static str, expected: &'static str) -> Result<(), TuningError> {
    if ok {
        Ok(())
    } else {
        Err(TuningError::Invalid { field, expected })
    }
}

impl RealmTuning {
    pub fn validate(&self) -> Result<(), TuningError> {
        check(
            self.radius_min > 0.0 && self.radius_min < self.radius_max,
            "realm.radius_min",
            "0 < radius_min < radius_max",
        )?;
        check(
            self.speed_min >= 0.0 && self.speed_min < self.speed_max,
            "realm.speed_min",
            "0 <= speed_min < speed_max",
        )?;
        check(self.hue_min < self.hue_max, "realm.hue_min", "hue_min < hue_max")?;
        check(
            (0.0..=1.0).contains(&self.ambient_spawn_chance),
            "realm.ambient_spawn_chance",
            "a probability in [0, 1]",
        )?;
        check(
            self.fade_in_step > 0.0,
            "realm.fade_in_step",
            "a positive step",
        )?;
        check(
            self.pop_tolerance >= 0.0 && self.repulsion_radius >= 0.0,
            "realm.pop_tolerance",
            "non-negative reach distances",
        )
    }
}

impl RacerTuning {
    pub fn validate(&self) -> Result<(), TuningError> {
        check(
            self.road_width > 2.0 * self.corridor_margin,
            "racer.road_width",
            "wider than twice the corridor margin",
        )?;
        check(
            self.spawn_interval_min >= 1,
            "racer.spawn_interval_min",
            "at least one tick",
        )?;
        check(
            self.spawn_interval_base >= self.spawn_interval_min,
            "racer.spawn_interval_base",
            "spawn_interval_base >= spawn_interval_min",
        )?;
        check(
            self.speed_step_score > 0 && self.interval_step_score > 0,
            "racer.speed_step_score",
            "positive score steps",
        )?;
        check(
            self.speed_jitter_min > 0.0 && self.speed_jitter_min < self.speed_jitter_max,
            "racer.speed_jitter_min",
            "0 < speed_jitter_min < speed_jitter_max",
        )?;
        check(
            self.car_width > 2.0 * self.hitbox_padding && self.car_height > 2.0 * self.hitbox_padding,
            "racer.hitbox_padding",
            "padding smaller than half the car size",
        )
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        self.realm.validate()?;
        self.racer.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let tuning = Tuning::from_json(r#"{ "racer": { "base_speed": 10.0 } }"#).unwrap();
        assert_eq!(tuning.racer.base_speed, 10.0);
        assert_eq!(tuning.racer.road_width, ROAD_WIDTH);
        assert_eq!(tuning.realm, RealmTuning::default());
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let err = Tuning::from_json(
            r#"{ "racer": { "spawn_interval_base": 10, "spawn_interval_min": 20 } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "racer.spawn_interval_base",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("tuning JSON did not parse"));
    }
}
