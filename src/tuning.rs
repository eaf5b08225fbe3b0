//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so a
//! `tuning.json` next to the page can override it. Missing fields keep
//! their defaults from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;
use crate::sim::sprite::presets::PLAYER_SIZE;

/// Gameplay tuning block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Speeds (px/s) ===
    pub player_speed: f32,
    pub bullet_speed: f32,
    pub enemy_speed: f32,
    pub asteroid_speed: f32,

    // === Weapons ===
    /// Wall-clock milliseconds between volleys
    pub fire_cooldown_ms: f64,
    pub enemy_kill_score: u64,

    // === Spawning ===
    pub enemy_spawn_base: f32,
    pub asteroid_spawn_base: f32,

    // === Player ===
    pub player_start: [f32; 2],

    // === Frame clock ===
    /// Frame deltas above this are clamped (seconds)
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            player_speed: PLAYER_SPEED,
            bullet_speed: BULLET_SPEED,
            enemy_speed: ENEMY_SPEED,
            asteroid_speed: ASTEROID_SPEED,

            fire_cooldown_ms: FIRE_COOLDOWN_MS,
            enemy_kill_score: ENEMY_KILL_SCORE,

            enemy_spawn_base: ENEMY_SPAWN_BASE,
            asteroid_spawn_base: ASTEROID_SPAWN_BASE,

            player_start: [PLAYER_START_X, PLAYER_START_Y],

            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Tuning {
    /// Path the web shell looks for, relative to the page
    pub const FILE_NAME: &'static str = "tuning.json";

    /// Parse and validate a tuning file
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::InvalidValue {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }

        // The ship must fit or the clamp bounds go negative
        for (field, value, min) in [
            ("canvas_width", self.canvas_width, PLAYER_SIZE.x),
            ("canvas_height", self.canvas_height, PLAYER_SIZE.y),
        ] {
            if value < min {
                return Err(TuningError::InvalidValue {
                    field,
                    reason: format!("must fit the {min}px ship, got {value}"),
                });
            }
        }

        let speeds = [
            ("player_speed", self.player_speed),
            ("bullet_speed", self.bullet_speed),
            ("enemy_speed", self.enemy_speed),
            ("asteroid_speed", self.asteroid_speed),
        ];
        for (field, value) in speeds {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError::InvalidValue {
                    field,
                    reason: format!("must be finite and non-negative, got {value}"),
                });
            }
        }

        // A base outside (0, 1] makes the spawn probability meaningless
        for (field, value) in [
            ("enemy_spawn_base", self.enemy_spawn_base),
            ("asteroid_spawn_base", self.asteroid_spawn_base),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(TuningError::InvalidValue {
                    field,
                    reason: format!("must be in (0, 1], got {value}"),
                });
            }
        }

        if !self.fire_cooldown_ms.is_finite() || self.fire_cooldown_ms < 0.0 {
            return Err(TuningError::InvalidValue {
                field: "fire_cooldown_ms",
                reason: format!("must be non-negative, got {}", self.fire_cooldown_ms),
            });
        }

        if !self.player_start.iter().all(|v| v.is_finite()) {
            return Err(TuningError::InvalidValue {
                field: "player_start",
                reason: "must be finite".to_string(),
            });
        }

        Ok(())
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
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 320.0 }"#).unwrap();
        assert_eq!(tuning.player_speed, 320.0);
        assert_eq!(tuning.bullet_speed, BULLET_SPEED);
        assert_eq!(tuning.player_start, [PLAYER_START_X, PLAYER_START_Y]);
    }

    #[test]
    fn test_rejects_bad_spawn_base() {
        let err = Tuning::from_json(r#"{ "enemy_spawn_base": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::InvalidValue {
                field: "enemy_spawn_base",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_speed() {
        let err = Tuning::from_json(r#"{ "enemy_speed": -5.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::InvalidValue { field: "enemy_speed", .. }));
    }

    #[test]
    fn test_rejects_canvas_smaller_than_ship() {
        let err = Tuning::from_json(r#"{ "canvas_width": 50.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::InvalidValue { field: "canvas_width", .. }));

        let err = Tuning::from_json(r#"{ "canvas_height": 73.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::InvalidValue { field: "canvas_height", .. }));

        // Exactly the ship's size still leaves a valid clamp range
        assert!(Tuning::from_json(r#"{ "canvas_width": 76.0, "canvas_height": 74.0 }"#).is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
