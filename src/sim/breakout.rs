//! Breakout: paddle, ball and a grid of bricks
//!
//! The ball rests on the paddle until launched. It bounces off the side
//! walls and the ceiling, steers off the paddle, and destroys every brick it
//! overlaps. Falling past the bottom edge returns it to the paddle; there is
//! no loss condition. Clearing all bricks wins.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{bounce_ceiling, bounce_span, brick_deflect, clamp_span, paddle_deflect};
use super::layout::{BrickLayout, brick_origin};
use super::pool::{Slot, active_count};
use super::rect::Rect;
use super::state::{GameEvent, GamePhase};
use crate::consts::*;
use crate::tuning::BreakoutTuning;
use crate::{Color, palette};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct BreakoutInput {
    /// Horizontal input: -1 left, 0 none, 1 right
    pub dir: f32,
    /// Launch the resting ball (pressed this frame)
    pub launch: bool,
    /// Destroy every brick (debug)
    pub clear_bricks: bool,
    /// Reinitialize the whole level
    pub reset: bool,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    pub speed: f32,
    pub color: Color,
}

/// The ball. Inactive means resting on the paddle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    /// Movement direction (unit length once launched)
    pub dir: Vec2,
    pub speed: f32,
    pub color: Color,
    pub active: bool,
}

/// A brick; destroyed bricks stay in the grid with the flag cleared
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub color: Color,
    pub active: bool,
}

impl Slot for Brick {
    fn is_active(&self) -> bool {
        self.active
    }
}

/// Complete Breakout state
#[derive(Debug, Clone)]
pub struct BreakoutState {
    pub tuning: BreakoutTuning,
    pub layout: BrickLayout,
    pub phase: GamePhase,
    /// Seconds since the level started (drives the victory shader)
    pub elapsed: f32,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: [Brick; BRICK_COUNT],
    /// Bricks still standing; the level is won at zero
    pub remaining_bricks: i32,
    /// Events produced by the last tick
    pub events: Vec<GameEvent>,
}

impl BreakoutState {
    /// Classic level with the given tuning
    pub fn new(tuning: BreakoutTuning) -> Self {
        Self::with_layout(tuning, BrickLayout::classic())
    }

    pub fn with_layout(tuning: BreakoutTuning, layout: BrickLayout) -> Self {
        let paddle = Paddle {
            rect: Rect::new(
                SCREEN_WIDTH / 2.0 - tuning.paddle_width / 2.0,
                tuning.paddle_y(),
                tuning.paddle_width,
                tuning.paddle_height,
            ),
            speed: tuning.paddle_speed,
            color: palette::RED,
        };

        let ball = Ball {
            rect: Rect::new(
                SCREEN_WIDTH / 2.0 - tuning.ball_size / 2.0,
                tuning.ball_rest_y(),
                tuning.ball_size,
                tuning.ball_size,
            ),
            dir: Vec2::from(tuning.initial_direction),
            speed: tuning.ball_speed,
            color: palette::RED,
            active: false,
        };

        let mut bricks = [Brick {
            rect: Rect::default(),
            color: palette::WHITE,
            active: false,
        }; BRICK_COUNT];
        let mut remaining_bricks = 0;
        for (i, (brick, cell)) in bricks.iter_mut().zip(layout.cells.iter()).enumerate() {
            let (x, y) = brick_origin(i);
            brick.rect = Rect::new(x, y, BRICK_WIDTH, BRICK_HEIGHT);
            if let Some(color) = cell {
                brick.color = *color;
                brick.active = true;
                remaining_bricks += 1;
            }
        }

        Self {
            tuning,
            layout,
            phase: GamePhase::Playing,
            elapsed: 0.0,
            paddle,
            ball,
            bricks,
            remaining_bricks,
            events: Vec::new(),
        }
    }

    /// Reinitialize every flag and counter from the same tuning and layout
    pub fn reset(&mut self) {
        *self = Self::with_layout(self.tuning.clone(), self.layout.clone());
        log::info!("Breakout reset ({} bricks)", self.remaining_bricks);
    }

    /// Counter agrees with the brick flags
    pub fn is_consistent(&self) -> bool {
        self.remaining_bricks.max(0) as usize == active_count(&self.bricks)
    }

    fn clear_bricks(&mut self) {
        for brick in self.bricks.iter_mut() {
            brick.active = false;
        }
        self.remaining_bricks = 0;
        log::info!("Debug: all bricks cleared");
    }

    /// Park the inactive ball on top of the paddle's center
    fn rest_ball(&mut self) {
        let ball = &mut self.ball;
        ball.rect.x = self.paddle.rect.center().x - ball.rect.w / 2.0;
        ball.rect.y = self.tuning.ball_rest_y();
    }

    fn update_ball(&mut self, dt: f32) {
        let ball = &mut self.ball;
        let dir_before = ball.dir;

        ball.rect = ball.rect.translated(ball.dir * ball.speed * dt);

        bounce_span(&mut ball.rect.x, ball.rect.w, &mut ball.dir.x, SCREEN_WIDTH);
        if !bounce_ceiling(&mut ball.rect.y, &mut ball.dir.y) && ball.rect.y > SCREEN_HEIGHT {
            // Fell past the paddle: back to resting on it
            ball.active = false;
            self.rest_ball();
            return;
        }

        if let Some(dir) = paddle_deflect(&ball.rect, ball.dir, &self.paddle.rect) {
            ball.dir = dir;
        }

        // Every overlapping brick is destroyed and gets its own flip, in grid order
        for (i, brick) in self.bricks.iter_mut().enumerate() {
            if !brick.active || !ball.rect.intersects(&brick.rect) {
                continue;
            }
            brick.active = false;
            self.remaining_bricks -= 1;
            ball.dir = brick_deflect(&ball.rect, ball.dir, &brick.rect);
            self.events.push(GameEvent::BrickDestroyed { index: i });
            log::debug!("Brick {} destroyed, {} remaining", i, self.remaining_bricks);
        }

        if ball.dir != dir_before {
            self.events.push(GameEvent::Bounce);
        }
    }
}

/// Advance Breakout by one step and return the resulting phase
pub fn tick(state: &mut BreakoutState, input: &BreakoutInput, dt: f32) -> GamePhase {
    state.events.clear();

    if input.reset {
        state.reset();
        return state.phase;
    }

    state.elapsed += dt;

    if state.phase.is_terminal() {
        return state.phase;
    }

    if input.clear_bricks {
        state.clear_bricks();
    }

    if !state.ball.active && input.launch {
        state.ball.dir = state.ball.dir.normalize_or_zero();
        state.ball.active = true;
    }

    let paddle = &mut state.paddle;
    paddle.rect.x += input.dir.signum_or_zero() * paddle.speed * dt;
    paddle.rect.x = clamp_span(paddle.rect.x, paddle.rect.w, SCREEN_WIDTH);

    if state.ball.active {
        state.update_ball(dt);
    } else {
        state.rest_ball();
    }

    if state.remaining_bricks <= 0 {
        state.phase = GamePhase::Win;
        state.events.push(GameEvent::Victory);
        log::info!("Breakout won after {:.1}s", state.elapsed);
    }

    state.phase
}

/// `f32::signum` maps 0.0 to 1.0; input needs a true zero
trait SignumOrZero {
    fn signum_or_zero(self) -> f32;
}

impl SignumOrZero for f32 {
    fn signum_or_zero(self) -> f32 {
        if self == 0.0 || self.is_nan() { 0.0 } else { self.signum() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> BreakoutState {
        BreakoutState::new(BreakoutTuning::default())
    }

    #[test]
    fn test_new_level() {
        let s = state();
        assert_eq!(s.remaining_bricks, BRICK_COUNT as i32);
        assert!(s.is_consistent());
        assert!(!s.ball.active);
        assert_eq!(s.paddle.rect.x, 350.0);
        assert_eq!(s.paddle.rect.y, 560.0);
    }

    #[test]
    fn test_ball_follows_paddle_until_launch() {
        let mut s = state();
        let input = BreakoutInput {
            dir: 1.0,
            ..Default::default()
        };
        tick(&mut s, &input, SIM_DT);
        assert!(!s.ball.active);
        assert!((s.ball.rect.center().x - s.paddle.rect.center().x).abs() < 1e-4);
        assert_eq!(s.ball.rect.y, 530.0);

        let input = BreakoutInput {
            launch: true,
            ..Default::default()
        };
        tick(&mut s, &input, SIM_DT);
        assert!(s.ball.active);
        assert!((s.ball.dir.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_paddle_clamped() {
        let mut s = state();
        let input = BreakoutInput {
            dir: -1.0,
            ..Default::default()
        };
        for _ in 0..1000 {
            tick(&mut s, &input, SIM_DT);
        }
        assert_eq!(s.paddle.rect.x, 0.0);

        let input = BreakoutInput {
            dir: 1.0,
            ..Default::default()
        };
        for _ in 0..1000 {
            tick(&mut s, &input, SIM_DT);
        }
        assert_eq!(s.paddle.rect.x, SCREEN_WIDTH - s.paddle.rect.w);
    }

    #[test]
    fn test_paddle_bounce_scenario() {
        let mut s = state();
        s.ball.active = true;
        // Heading down-left, landing left of paddle center means the paddle center is to the right
        s.ball.dir = Vec2::new(-1.0, 1.0).normalize();
        s.ball.rect.x = s.paddle.rect.x + 10.0;
        s.ball.rect.y = s.paddle.rect.y - s.ball.rect.h + 2.0;
        tick(&mut s, &BreakoutInput::default(), SIM_DT);
        assert!(s.ball.dir.x < 0.0);
        assert!(s.ball.dir.y < 0.0);
        assert!(s.events.contains(&GameEvent::Bounce));
    }

    #[test]
    fn test_paddle_bounce_steers_right() {
        let mut s = state();
        s.ball.active = true;
        s.ball.dir = Vec2::new(-1.0, 1.0).normalize();
        // Ball center right of paddle center
        s.ball.rect.x = s.paddle.rect.right() - 15.0;
        s.ball.rect.y = s.paddle.rect.y - s.ball.rect.h + 2.0;
        tick(&mut s, &BreakoutInput::default(), SIM_DT);
        assert!(s.ball.dir.x > 0.0);
        assert!(s.ball.dir.y < 0.0);
    }

    #[test]
    fn test_brick_hit_decrements_and_flips() {
        let mut s = state();
        s.ball.active = true;
        s.ball.dir = Vec2::new(0.0, -1.0);
        // Just under the first row, column 3
        let brick = s.bricks[BRICK_COLUMNS * 4 + 3].rect;
        s.ball.rect.x = brick.x + 10.0;
        s.ball.rect.y = brick.bottom() + 0.5;
        tick(&mut s, &BreakoutInput::default(), SIM_DT);

        assert!(!s.bricks[BRICK_COLUMNS * 4 + 3].active);
        assert_eq!(s.remaining_bricks, BRICK_COUNT as i32 - 1);
        assert!(s.ball.dir.y > 0.0);
        assert!(s.is_consistent());
    }

    #[test]
    fn test_multi_brick_overlap_destroys_both() {
        let mut s = state();
        s.ball.active = true;
        s.ball.dir = Vec2::new(0.0, -1.0);
        // Straddle the gap between two bottom-row bricks
        let left = s.bricks[BRICK_COLUMNS * 4].rect;
        s.ball.rect.x = left.right() - 8.0;
        s.ball.rect.y = left.bottom() - 2.0;
        tick(&mut s, &BreakoutInput::default(), SIM_DT);

        assert!(!s.bricks[BRICK_COLUMNS * 4].active);
        assert!(!s.bricks[BRICK_COLUMNS * 4 + 1].active);
        assert_eq!(s.remaining_bricks, BRICK_COUNT as i32 - 2);
        // First hit flipped it downward; second sees it already moving away
        assert!(s.ball.dir.y > 0.0);
    }

    #[test]
    fn test_ball_lost_returns_to_paddle() {
        let mut s = state();
        s.ball.active = true;
        s.ball.dir = Vec2::new(0.0, 1.0);
        s.ball.rect.x = 10.0;
        s.ball.rect.y = SCREEN_HEIGHT - 0.5;
        tick(&mut s, &BreakoutInput::default(), SIM_DT);
        assert!(!s.ball.active);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.ball.rect.y, 530.0);
        assert!((s.ball.rect.center().x - s.paddle.rect.center().x).abs() < 1e-4);
    }

    #[test]
    fn test_relaunch_right_after_fall_starts_on_paddle() {
        let mut s = state();
        s.ball.active = true;
        s.ball.dir = Vec2::new(1.0, 1.0).normalize();
        s.ball.rect.x = 500.0;
        s.ball.rect.y = SCREEN_HEIGHT - 0.5;
        tick(&mut s, &BreakoutInput::default(), SIM_DT);
        assert!(!s.ball.active);

        let launch = BreakoutInput {
            launch: true,
            ..Default::default()
        };
        tick(&mut s, &launch, SIM_DT);
        assert!(s.ball.active);
        assert!(s.ball.rect.bottom() <= SCREEN_HEIGHT);
        assert!((s.ball.rect.center().x - s.paddle.rect.center().x).abs() < 5.0);

        // Held launch never strands the ball below the screen
        for _ in 0..240 {
            tick(&mut s, &launch, SIM_DT);
            assert!(s.ball.rect.y <= SCREEN_HEIGHT);
        }
    }

    #[test]
    fn test_wall_bounce_clamps() {
        let mut s = state();
        s.ball.active = true;
        s.ball.dir = Vec2::new(-1.0, -1.0).normalize();
        s.ball.rect.x = 0.5;
        s.ball.rect.y = 300.0;
        tick(&mut s, &BreakoutInput::default(), SIM_DT);
        assert_eq!(s.ball.rect.x, 0.0);
        assert!(s.ball.dir.x > 0.0);
    }

    #[test]
    fn test_clear_bricks_wins_once() {
        let mut s = state();
        let input = BreakoutInput {
            clear_bricks: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut s, &input, SIM_DT), GamePhase::Win);
        assert!(s.is_consistent());
        assert_eq!(s.events.iter().filter(|e| **e == GameEvent::Victory).count(), 1);

        // Terminal: no second Victory
        assert_eq!(tick(&mut s, &BreakoutInput::default(), SIM_DT), GamePhase::Win);
        assert!(s.events.is_empty());
    }

    #[test]
    fn test_reset_restores_level() {
        let mut s = state();
        tick(
            &mut s,
            &BreakoutInput {
                clear_bricks: true,
                ..Default::default()
            },
            SIM_DT,
        );
        tick(
            &mut s,
            &BreakoutInput {
                reset: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.remaining_bricks, BRICK_COUNT as i32);
        assert_eq!(s.elapsed, 0.0);
    }

    #[test]
    fn test_sparse_layout_counts() {
        let mut layout = BrickLayout::classic();
        layout.cells[0] = None;
        layout.cells[9] = None;
        let s = BreakoutState::with_layout(BreakoutTuning::default(), layout);
        assert_eq!(s.remaining_bricks, BRICK_COUNT as i32 - 2);
        assert!(!s.bricks[9].active);
        assert!(s.is_consistent());
    }
}
