//! Data-driven game balance
//!
//! Every speed, size and cooldown used by the simulation lives here so it can
//! be overridden from JSON without a rebuild. Missing fields keep defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::consts::*;

/// Breakout balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakoutTuning {
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Paddle speed (pixels/s)
    pub paddle_speed: f32,
    /// Ball edge length (the ball is a square)
    pub ball_size: f32,
    /// Ball speed (pixels/s)
    pub ball_speed: f32,
    /// Direction the ball leaves the paddle with on the very first launch
    pub initial_direction: [f32; 2],
}

impl Default for BreakoutTuning {
    fn default() -> Self {
        Self {
            paddle_width: 100.0,
            paddle_height: 20.0,
            paddle_speed: 500.0,
            ball_size: 20.0,
            ball_speed: 600.0,
            initial_direction: [-1.0, -1.0],
        }
    }
}

impl BreakoutTuning {
    /// Paddle rest height: lifted off the bottom by twice its height
    pub fn paddle_y(&self) -> f32 {
        SCREEN_HEIGHT - 2.0 * self.paddle_height
    }

    /// Ball rest height while it sits on the paddle
    pub fn ball_rest_y(&self) -> f32 {
        SCREEN_HEIGHT - 3.5 * self.paddle_height
    }
}

/// Bubble Destroyer balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleTuning {
    pub player_width: f32,
    pub player_height: f32,
    /// Player walk speed (pixels/s)
    pub player_speed: f32,
    pub player_health: u8,
    /// Number of frames in the walk cycle
    pub walk_frames: u8,
    /// Seconds between walk frame advances
    pub walk_frame_time: f32,
    /// Seconds the player holds the Shoot pose
    pub shoot_hold_time: f32,
    /// Minimum seconds between shots
    pub shot_cooldown: f32,
    /// Seconds the player is locked in Damaged after a hit
    pub damage_lock_time: f32,

    pub bullet_width: f32,
    pub bullet_height: f32,
    /// Bullet speed (pixels/s, upward)
    pub bullet_speed: f32,

    /// Bubble radius per tier
    pub large_radius: f32,
    pub medium_radius: f32,
    pub small_radius: f32,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Upward speed a bubble gets when it touches the floor
    pub floor_rebound_speed: f32,
    /// Upward speed both halves get after a split
    pub split_rise_speed: f32,
    /// Horizontal bubble speed
    pub bubble_speed: f32,
    /// Number of large bubbles in the opening wave
    pub initial_bubbles: usize,
    /// Spawn height of the opening wave
    pub spawn_y: f32,
}

impl Default for BubbleTuning {
    fn default() -> Self {
        Self {
            player_width: 48.0,
            player_height: 64.0,
            player_speed: 300.0,
            player_health: 3,
            walk_frames: 4,
            walk_frame_time: 0.1,
            shoot_hold_time: 0.15,
            shot_cooldown: 0.3,
            damage_lock_time: 1.0,

            bullet_width: 4.0,
            bullet_height: 16.0,
            bullet_speed: 700.0,

            large_radius: 100.0,
            medium_radius: 40.0,
            small_radius: 15.0,
            gravity: 500.0,
            floor_rebound_speed: 600.0,
            split_rise_speed: 300.0,
            bubble_speed: 150.0,
            initial_bubbles: 2,
            spawn_y: 150.0,
        }
    }
}

/// All tuning tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub breakout: BreakoutTuning,
    pub bubbles: BubbleTuning,
}

impl Tuning {
    /// Parse tuning overrides from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let mut tuning: Tuning = serde_json::from_str(json)?;
        // The opening wave can never exceed the pool
        tuning.bubbles.initial_bubbles = tuning.bubbles.initial_bubbles.clamp(1, MAX_BUBBLES);
        Ok(tuning)
    }

    /// Load tuning from a file, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "breakout": { "ball_speed": 300.0 } }"#).unwrap();
        assert_eq!(tuning.breakout.ball_speed, 300.0);
        assert_eq!(tuning.breakout.paddle_speed, 500.0);
        assert_eq!(tuning.bubbles, BubbleTuning::default());
    }

    #[test]
    fn test_initial_bubbles_clamped_to_pool() {
        let tuning = Tuning::from_json(r#"{ "bubbles": { "initial_bubbles": 50 } }"#).unwrap();
        assert_eq!(tuning.bubbles.initial_bubbles, MAX_BUBBLES);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Tuning::from_json("{ not json").is_err());
    }

    #[test]
    fn test_rest_positions() {
        let t = BreakoutTuning::default();
        assert_eq!(t.paddle_y(), 560.0);
        assert_eq!(t.ball_rest_y(), 530.0);
    }
}
