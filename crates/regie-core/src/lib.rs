//! Core types for Regie: the world state that action lists read and write.
//!
//! This crate holds the data the interpreter in `regie-script` consults and
//! mutates: the shared [`GameState`] gate, project variables, the inventory,
//! scene history, and player constraints. Everything is bundled into a
//! [`WorldState`] that is passed explicitly to every running script instead of
//! living in a global.

/// Player input constraints (direction locks, run lock, save lock, time scale).
pub mod controls;
/// Error types used throughout the crate.
pub mod error;
/// Strongly typed identifiers for variables, items, and scenes.
pub mod id;
/// Item counts held by the player.
pub mod inventory;
/// Current and previous scene bookkeeping.
pub mod scene;
/// The shared game state gate and the aggregated world state.
pub mod state;
/// Typed parameter values passed to world effects.
pub mod value;
/// Project-wide integer and boolean variables.
pub mod variable;

/// Re-export control types.
pub use controls::{LockType, PlayerControls, RunLock};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export identifier types.
pub use id::{ActionListId, ConversationId, ItemId, SceneId, VariableId};
/// Re-export the inventory.
pub use inventory::Inventory;
/// Re-export scene tracking.
pub use scene::SceneTracker;
/// Re-export state types.
pub use state::{GameState, WorldState};
/// Re-export value types.
pub use value::Value;
/// Re-export variable types.
pub use variable::{Variable, VariableKind, Variables};
