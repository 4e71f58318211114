//! Scanline Arcade - Breakout and Bubble Destroyer
//!
//! Core modules:
//! - `sim`: Fixed-step simulation for both games (movement, collisions, state machines)
//! - `renderer`: Presentation adapter (state -> scene) and the WebGPU pipeline
//! - `platform`: Keyboard sampling and frame pacing
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{ArcadeError, Result};
pub use game::{Arcade, GameKind};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (240 Hz)
    pub const SIM_DT: f32 = 1.0 / 240.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Screen dimensions (pixels, origin top-left, y down)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Breakout brick grid
    pub const BRICK_COLUMNS: usize = 8;
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COUNT: usize = BRICK_COLUMNS * BRICK_ROWS;
    pub const BRICK_MARGIN: f32 = 2.0;
    pub const BRICK_WIDTH: f32 = (SCREEN_WIDTH - BRICK_MARGIN) / BRICK_COLUMNS as f32 - BRICK_MARGIN;
    pub const BRICK_HEIGHT: f32 = 20.0;

    /// Bubble Destroyer pool capacities
    pub const MAX_BULLETS: usize = 3;
    pub const MAX_BUBBLES: usize = 8;
}

/// RGBA color in 0-255 channels
pub type Color = [u8; 4];

/// Named colors shared by sim (entity colors) and renderer
pub mod palette {
    use super::Color;

    pub const RED: Color = [230, 41, 55, 255];
    pub const ORANGE: Color = [255, 161, 0, 255];
    pub const YELLOW: Color = [253, 249, 0, 255];
    pub const GREEN: Color = [0, 228, 48, 255];
    pub const BLUE: Color = [0, 121, 241, 255];
    pub const WHITE: Color = [255, 255, 255, 255];
    pub const GRAY: Color = [130, 130, 130, 255];
    pub const CRT_BLACK: Color = [18, 18, 18, 255];
}
