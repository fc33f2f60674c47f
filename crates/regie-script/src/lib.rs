//! The Regie interpreter: resumable action lists driven by a tick-based director.
//!
//! An [`ActionList`] is a sequence of [`Action`]s that runs until one of them
//! has to wait, then resumes from where it stopped on a later tick. Lists
//! share a single [`regie_core::GameState`] gate with dialogue
//! [`Conversation`]s, and can start, stop, and toggle each other through
//! messages. The [`Director`] owns every list and conversation, advances them
//! once per tick, and records what happened in an [`EventLog`]. World effects
//! such as animations and speech are delegated to a [`Stage`].

/// Actions, their end results, and the conditions checks evaluate.
pub mod action;
/// Action lists and their execution state machine.
pub mod action_list;
/// Director time.
pub mod clock;
/// Configuration for a director.
pub mod config;
/// The handle passed to every running action.
pub mod context;
/// Conversations and dialogue options.
pub mod conversation;
/// The scheduler that owns and advances lists and conversations.
pub mod director;
/// Error types for the interpreter.
pub mod error;
/// Script events and the event log.
pub mod event;
/// Where a list goes after an action, and where its cursor is.
pub mod flow;
/// Messages scripts send to lists, conversations, and scene objects.
pub mod message;
/// The world-effect collaborator.
pub mod stage;
/// Authoring checks.
pub mod validate;

/// Re-exports of action types.
pub use action::{
    Action, ActionKind, Branch, CountCheck, Equality, IntCondition, Poll, ResultAction,
    VariableCheck,
};
/// Re-exports of action list types.
pub use action_list::{ActionList, ListKind, Phase};
/// Re-export of [`clock::ScriptClock`].
pub use clock::ScriptClock;
/// Re-export of [`config::DirectorConfig`].
pub use config::DirectorConfig;
/// Re-export of [`context::ScriptContext`].
pub use context::ScriptContext;
/// Re-exports of conversation types.
pub use conversation::{Conversation, DialogueOption};
/// Re-export of [`director::Director`].
pub use director::Director;
/// Re-exports of [`error::ScriptError`] and [`error::ScriptResult`].
pub use error::{ScriptError, ScriptResult};
/// Re-exports of [`event::EventLog`], [`event::ScriptEvent`], and [`event::ScriptEventKind`].
pub use event::{EventLog, ScriptEvent, ScriptEventKind};
/// Re-exports of [`flow::Flow`] and [`flow::Cursor`].
pub use flow::{Cursor, Flow};
/// Re-exports of message types.
pub use message::{HandlerRegistry, Message, MessageHandler, Target};
/// Re-exports of stage types.
pub use stage::{EffectCall, EffectStatus, NullStage, Stage, StageCall, TimedStage};
/// Re-exports of validation types.
pub use validate::{ValidationIssue, validate, validate_conversations, validate_lists};
