//! Shared game phase and event types

use serde::{Deserialize, Serialize};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// All bricks / bubbles cleared
    Win,
    /// Player ran out of health
    Loss,
}

impl GamePhase {
    /// Win and Loss stop the simulation until a reset
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Win | GamePhase::Loss)
    }
}

/// Something happened during a tick that the outside world may react to
/// (sound, logging). Cleared at the start of every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball changed direction (wall, paddle or brick)
    Bounce,
    /// A brick was destroyed
    BrickDestroyed { index: usize },
    /// A bubble was hit; `split` is false when it popped for good
    BubbleHit { slot: usize, split: bool },
    /// The player fired a bullet
    ShotFired { slot: usize },
    /// The player lost one health point
    PlayerHurt { health: u8 },
    Victory,
    Defeat,
}
