//! Platform abstraction layer
//!
//! Browser-independent pieces of the frame loop:
//! - `Keyboard`: key state sampled from DOM events
//! - `FrameClock`: fixed-step accumulator

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Keys the games listen to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Action,
    Debug,
    Reset,
    Switch,
}

impl Key {
    const COUNT: usize = 6;

    /// Map a DOM `KeyboardEvent.code` to a game key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "KeyD" => Some(Key::Right),
            "Space" => Some(Key::Action),
            "F1" => Some(Key::Debug),
            "KeyR" => Some(Key::Reset),
            "Tab" => Some(Key::Switch),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Held keys plus the keys that went down since the last `end_frame`
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    down: [bool; Key::COUNT],
    pressed: [bool; Key::COUNT],
}

impl Keyboard {
    pub fn key_down(&mut self, key: Key) {
        // Auto-repeat keydowns are not new presses
        if !self.down[key.index()] {
            self.pressed[key.index()] = true;
        }
        self.down[key.index()] = true;
    }

    pub fn key_up(&mut self, key: Key) {
        self.down[key.index()] = false;
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.down[key.index()]
    }

    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    /// Horizontal axis: -1, 0 or 1
    pub fn axis(&self) -> f32 {
        let mut dir = 0.0;
        if self.is_down(Key::Left) {
            dir -= 1.0;
        }
        if self.is_down(Key::Right) {
            dir += 1.0;
        }
        dir
    }

    /// Forget edge-triggered presses
    pub fn end_frame(&mut self) {
        self.pressed = [false; Key::COUNT];
    }

    /// Release everything (window lost focus)
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Fixed-step accumulator
///
/// Real frame time goes in, a number of `SIM_DT` steps comes out. Long frames
/// are clamped and at most `MAX_SUBSTEPS` run per frame; leftover debt is
/// dropped so a stall never turns into a burst of catch-up steps.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    last_ms: Option<f64>,
    /// Smoothed frames per second
    fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed an absolute timestamp in milliseconds (requestAnimationFrame style)
    pub fn advance_to(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        self.advance(dt)
    }

    /// Feed a frame delta in seconds; returns how many fixed steps to run
    pub fn advance(&mut self, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        if dt > 0.0 {
            let instant = 1.0 / dt;
            self.fps = if self.fps == 0.0 {
                instant
            } else {
                self.fps * 0.9 + instant * 0.1
            };
        }

        self.accumulator += dt;
        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}
