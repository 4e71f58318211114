//! Fixed-step simulation for both games
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform code:
//! - One `tick(state, input, dt)` per game, returning the phase after the step
//! - Fixed-capacity pools with active flags, never reallocated mid-level
//! - Seeded RNG only
//! - Stable iteration order (slot index)

pub mod breakout;
pub mod bubbles;
pub mod collision;
pub mod layout;
pub mod player;
pub mod pool;
pub mod rect;
pub mod state;

pub use breakout::{Ball, BreakoutInput, BreakoutState, Brick, Paddle};
pub use bubbles::{Bubble, BubbleInput, BubbleState, Bullet, Tier};
pub use layout::BrickLayout;
pub use player::{Player, PlayerState};
pub use rect::{Rect, circle_intersects_rect};
pub use state::{GameEvent, GamePhase};
