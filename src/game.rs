//! Arcade shell: both games, the active selection and per-frame plumbing
//!
//! Owns the simulation states and turns sampled keys into per-game inputs.
//! Sounds raised by any substep are queued until the frame loop takes them.

use crate::audio::SoundEffect;
use crate::platform::{Key, Keyboard};
use crate::renderer::scene::{DrawCommand, Scene, TextEffect};
use crate::renderer::views::{HUD_TEXT_SIZE, breakout_scene, bubbles_scene};
use crate::settings::Settings;
use crate::sim::{
    BreakoutInput, BreakoutState, BrickLayout, BubbleInput, BubbleState, GameEvent, GamePhase,
    breakout, bubbles,
};
use crate::tuning::Tuning;
use crate::{consts::SCREEN_WIDTH, palette};

/// Which game is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameKind {
    #[default]
    Breakout,
    Bubbles,
}

impl GameKind {
    pub fn other(self) -> Self {
        match self {
            GameKind::Breakout => GameKind::Bubbles,
            GameKind::Bubbles => GameKind::Breakout,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GameKind::Breakout => "Breakout",
            GameKind::Bubbles => "Bubble Destroyer",
        }
    }
}

/// Input for one fixed step, game-agnostic
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// -1 left, 0 none, 1 right
    pub dir: f32,
    /// Action key went down this frame
    pub action_pressed: bool,
    /// Action key is held
    pub action_down: bool,
    pub debug_clear: bool,
    pub reset: bool,
    pub switch_game: bool,
}

impl FrameInput {
    pub fn from_keyboard(kb: &Keyboard) -> Self {
        Self {
            dir: kb.axis(),
            action_pressed: kb.was_pressed(Key::Action),
            action_down: kb.is_down(Key::Action),
            debug_clear: kb.was_pressed(Key::Debug),
            reset: kb.was_pressed(Key::Reset),
            switch_game: kb.was_pressed(Key::Switch),
        }
    }

    /// Same held state with every one-shot press consumed
    pub fn held_only(&self) -> Self {
        Self {
            dir: self.dir,
            action_down: self.action_down,
            ..Default::default()
        }
    }
}

pub struct Arcade {
    pub tuning: Tuning,
    pub settings: Settings,
    pub kind: GameKind,
    pub breakout: BreakoutState,
    pub bubbles: BubbleState,
    sounds: Vec<SoundEffect>,
}

impl Arcade {
    /// `fallback_seed` is used when the settings do not pin one
    pub fn new(tuning: Tuning, settings: Settings, fallback_seed: u64) -> Self {
        Self::with_layout(tuning, settings, fallback_seed, BrickLayout::classic())
    }

    pub fn with_layout(
        tuning: Tuning,
        settings: Settings,
        fallback_seed: u64,
        layout: BrickLayout,
    ) -> Self {
        let seed = settings.seed.unwrap_or(fallback_seed);
        let breakout = BreakoutState::with_layout(tuning.breakout.clone(), layout);
        let bubbles = BubbleState::new(tuning.bubbles.clone(), seed);
        log::info!(
            "Arcade ready: {} bricks, {} bubbles (seed {})",
            breakout.remaining_bricks,
            bubbles.active_bubbles,
            seed
        );
        Self {
            tuning,
            settings,
            kind: GameKind::default(),
            breakout,
            bubbles,
            sounds: Vec::new(),
        }
    }

    /// Phase of the game on screen
    pub fn phase(&self) -> GamePhase {
        match self.kind {
            GameKind::Breakout => self.breakout.phase,
            GameKind::Bubbles => self.bubbles.phase,
        }
    }

    /// Events raised by the last step of the active game
    pub fn events(&self) -> &[GameEvent] {
        match self.kind {
            GameKind::Breakout => &self.breakout.events,
            GameKind::Bubbles => &self.bubbles.events,
        }
    }

    /// Run one fixed step of the active game
    pub fn step(&mut self, input: &FrameInput, dt: f32) -> GamePhase {
        if input.switch_game {
            self.kind = self.kind.other();
            log::info!("Switched to {}", self.kind.name());
        }

        let phase = match self.kind {
            GameKind::Breakout => {
                let input = BreakoutInput {
                    dir: input.dir,
                    launch: input.action_pressed,
                    clear_bricks: input.debug_clear,
                    reset: input.reset,
                };
                breakout::tick(&mut self.breakout, &input, dt)
            }
            GameKind::Bubbles => {
                let input = BubbleInput {
                    dir: input.dir,
                    shoot: input.action_down,
                    reset: input.reset,
                };
                bubbles::tick(&mut self.bubbles, &input, dt)
            }
        };

        let events = match self.kind {
            GameKind::Breakout => &self.breakout.events,
            GameKind::Bubbles => &self.bubbles.events,
        };
        self.sounds
            .extend(events.iter().filter_map(SoundEffect::for_event));

        phase
    }

    /// Sounds queued since the last call
    pub fn take_sounds(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.sounds)
    }

    /// Scene for the active game with settings applied
    pub fn scene(&self, fps: f32) -> Scene {
        let mut scene = match self.kind {
            GameKind::Breakout => breakout_scene(&self.breakout),
            GameKind::Bubbles => bubbles_scene(&self.bubbles),
        };

        scene.post.scanlines = self.settings.effective_scanlines();
        if self.settings.reduced_motion {
            for cmd in scene.commands.iter_mut() {
                if let DrawCommand::Text { effect, .. } = cmd {
                    *effect = TextEffect::Plain;
                }
            }
        }

        if self.settings.show_fps {
            let label = format!("{:.0} FPS", fps);
            scene.text(
                &label,
                SCREEN_WIDTH - 110.0,
                10.0,
                HUD_TEXT_SIZE,
                palette::GREEN,
                TextEffect::Plain,
            );
        }

        scene
    }
}
