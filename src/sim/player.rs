//! Bubble Destroyer player and its action state machine
//!
//! Once per tick, unless a timed action (Shoot pose, Damaged lock) is still
//! running, the player picks the next state in priority order:
//! Shoot (if affordable) > Walk (if moving) > Idle. Dead is terminal.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::clamp_span;
use super::rect::Rect;
use crate::consts::*;
use crate::tuning::BubbleTuning;

/// What the player is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Idle,
    Walk,
    Shoot,
    Damaged,
    Dead,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub state: PlayerState,
    /// Animation frame within the current state
    pub frame: u8,
    /// 1.0 facing right, -1.0 facing left
    pub facing: f32,
    pub health: u8,
    /// Earliest time the next shot may fire
    pub next_shot_at: f32,
    /// Next walk frame advance
    pub next_frame_at: f32,
    /// End of the running timed action (Shoot pose or Damaged lock)
    pub locked_until: f32,
}

impl Player {
    /// Horizontally centered, standing on the floor
    pub fn new(tuning: &BubbleTuning) -> Self {
        Self {
            rect: Rect::new(
                SCREEN_WIDTH / 2.0 - tuning.player_width / 2.0,
                SCREEN_HEIGHT - tuning.player_height,
                tuning.player_width,
                tuning.player_height,
            ),
            state: PlayerState::Idle,
            frame: 0,
            facing: 1.0,
            health: tuning.player_health,
            next_shot_at: 0.0,
            next_frame_at: 0.0,
            locked_until: 0.0,
        }
    }

    /// Where bullets leave from: the middle of the top edge
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.rect.center().x, self.rect.top())
    }

    pub fn is_dead(&self) -> bool {
        self.state == PlayerState::Dead
    }

    /// Run one step of the state machine.
    ///
    /// `bullet_free` tells whether the bullet pool has room. Returns true when
    /// a shot was committed; the caller spawns the bullet.
    pub fn update(
        &mut self,
        dir: f32,
        shoot: bool,
        bullet_free: bool,
        now: f32,
        dt: f32,
        tuning: &BubbleTuning,
    ) -> bool {
        match self.state {
            PlayerState::Dead => return false,
            PlayerState::Damaged | PlayerState::Shoot if now < self.locked_until => return false,
            _ => {}
        }

        if shoot && bullet_free && now >= self.next_shot_at {
            self.state = PlayerState::Shoot;
            self.frame = 0;
            self.next_shot_at = now + tuning.shot_cooldown;
            self.locked_until = now + tuning.shoot_hold_time;
            return true;
        }

        if dir != 0.0 {
            if self.state != PlayerState::Walk {
                self.state = PlayerState::Walk;
                self.frame = 0;
                self.next_frame_at = now + tuning.walk_frame_time;
            } else if now >= self.next_frame_at {
                self.frame = (self.frame + 1) % tuning.walk_frames.max(1);
                self.next_frame_at = now + tuning.walk_frame_time;
            }

            self.facing = dir.signum();
            self.rect.x += self.facing * tuning.player_speed * dt;
            self.rect.x = clamp_span(self.rect.x, self.rect.w, SCREEN_WIDTH);
        } else {
            self.state = PlayerState::Idle;
            self.frame = 0;
        }

        false
    }

    /// Apply one point of damage unless already Damaged (or Dead).
    /// Returns true when health was lost.
    pub fn take_hit(&mut self, now: f32, tuning: &BubbleTuning) -> bool {
        if matches!(self.state, PlayerState::Damaged | PlayerState::Dead) {
            return false;
        }

        self.health = self.health.saturating_sub(1);
        self.frame = 0;
        if self.health == 0 {
            self.state = PlayerState::Dead;
        } else {
            self.state = PlayerState::Damaged;
            self.locked_until = now + tuning.damage_lock_time;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> BubbleTuning {
        BubbleTuning::default()
    }

    #[test]
    fn test_idle_by_default() {
        let t = tuning();
        let mut p = Player::new(&t);
        assert!(!p.update(0.0, false, true, 0.0, SIM_DT, &t));
        assert_eq!(p.state, PlayerState::Idle);
    }

    #[test]
    fn test_shoot_beats_walk() {
        let t = tuning();
        let mut p = Player::new(&t);
        let x = p.rect.x;
        assert!(p.update(1.0, true, true, 0.0, SIM_DT, &t));
        assert_eq!(p.state, PlayerState::Shoot);
        // Shooting this frame means no movement
        assert_eq!(p.rect.x, x);
    }

    #[test]
    fn test_shoot_holds_then_cooldown() {
        let t = tuning();
        let mut p = Player::new(&t);
        assert!(p.update(0.0, true, true, 0.0, SIM_DT, &t));

        // Still inside the shoot pose: input ignored
        assert!(!p.update(1.0, true, true, 0.1, SIM_DT, &t));
        assert_eq!(p.state, PlayerState::Shoot);

        // Pose over but cooldown not: walks instead
        assert!(!p.update(1.0, true, true, 0.2, SIM_DT, &t));
        assert_eq!(p.state, PlayerState::Walk);

        // Cooldown elapsed
        assert!(p.update(0.0, true, true, 0.31, SIM_DT, &t));
    }

    #[test]
    fn test_no_shot_when_pool_full() {
        let t = tuning();
        let mut p = Player::new(&t);
        assert!(!p.update(0.0, true, false, 0.0, SIM_DT, &t));
        assert_eq!(p.state, PlayerState::Idle);
    }

    #[test]
    fn test_walk_cycles_frames_and_clamps() {
        let t = tuning();
        let mut p = Player::new(&t);
        let mut now = 0.0;
        for _ in 0..2400 {
            p.update(-1.0, false, true, now, SIM_DT, &t);
            assert!(p.frame < t.walk_frames);
            now += SIM_DT;
        }
        assert_eq!(p.state, PlayerState::Walk);
        assert_eq!(p.rect.x, 0.0);
        assert_eq!(p.facing, -1.0);
    }

    #[test]
    fn test_walk_frame_advances_on_cadence() {
        let t = tuning();
        let mut p = Player::new(&t);
        p.update(1.0, false, true, 0.0, SIM_DT, &t);
        assert_eq!(p.frame, 0);
        p.update(1.0, false, true, 0.05, SIM_DT, &t);
        assert_eq!(p.frame, 0);
        p.update(1.0, false, true, 0.1, SIM_DT, &t);
        assert_eq!(p.frame, 1);
    }

    #[test]
    fn test_damage_locks_input() {
        let t = tuning();
        let mut p = Player::new(&t);
        assert!(p.take_hit(0.0, &t));
        assert_eq!(p.health, 2);
        assert_eq!(p.state, PlayerState::Damaged);

        // Second contact during the lock does nothing
        assert!(!p.take_hit(0.5, &t));
        assert_eq!(p.health, 2);

        let x = p.rect.x;
        assert!(!p.update(1.0, true, true, 0.5, SIM_DT, &t));
        assert_eq!(p.rect.x, x);

        // Lock over: back to normal
        p.update(1.0, false, true, 1.0, SIM_DT, &t);
        assert_eq!(p.state, PlayerState::Walk);
    }

    #[test]
    fn test_last_hit_is_dead() {
        let t = tuning();
        let mut p = Player::new(&t);
        p.health = 1;
        assert!(p.take_hit(0.0, &t));
        assert!(p.is_dead());
        assert!(!p.update(1.0, true, true, 10.0, SIM_DT, &t));
        assert!(!p.take_hit(10.0, &t));
        assert_eq!(p.health, 0);
    }
}
