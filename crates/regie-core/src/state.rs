use std::fmt;

use serde::{Deserialize, Serialize};

use crate::controls::PlayerControls;
use crate::id::ConversationId;
use crate::inventory::Inventory;
use crate::scene::SceneTracker;
use crate::variable::Variables;

/// The process-wide mode that gates player input against scripted sequencing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    /// Normal gameplay; the player is in control.
    #[default]
    Normal,
    /// A script is driving the game.
    Cutscene,
    /// The player is choosing a dialogue option.
    DialogOptions,
    /// The game is paused.
    Paused,
}

impl GameState {
    /// Whether player input is blocked by a script in this state.
    pub fn is_scripted(self) -> bool {
        matches!(self, Self::Cutscene | Self::DialogOptions)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Cutscene => write!(f, "cutscene"),
            Self::DialogOptions => write!(f, "dialog options"),
            Self::Paused => write!(f, "paused"),
        }
    }
}

/// Everything scripts can read and write, bundled into one explicitly passed handle.
///
/// There is no global instance: each director owns its own world state, so
/// several independent simulations can live in one process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// The shared gate between scripts and player input.
    #[serde(default)]
    pub game_state: GameState,
    /// Project variables.
    #[serde(default)]
    pub variables: Variables,
    /// Items held by the player.
    #[serde(default)]
    pub inventory: Inventory,
    /// Scene history.
    #[serde(default)]
    pub scenes: SceneTracker,
    /// Player input constraints.
    #[serde(default)]
    pub controls: PlayerControls,
    /// The conversation whose options are currently offered, read by UI and input.
    #[serde(default)]
    pub active_conversation: Option<ConversationId>,
}

impl WorldState {
    /// Create a world state in normal gameplay with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the variable store.
    pub fn with_variables(mut self, variables: Variables) -> Self {
        self.variables = variables;
        self
    }

    /// Replace the inventory.
    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    /// Replace the scene tracker.
    pub fn with_scenes(mut self, scenes: SceneTracker) -> Self {
        self.scenes = scenes;
        self
    }

    /// Write the game state, returning the previous value.
    pub fn set_game_state(&mut self, state: GameState) -> GameState {
        std::mem::replace(&mut self.game_state, state)
    }
}
