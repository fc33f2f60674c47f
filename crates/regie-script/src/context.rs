//! What a running script sees of the world while one of its actions executes.

use std::collections::VecDeque;

use regie_core::{ActionListId, ConversationId, GameState, WorldState};

use crate::action_list::ActionList;
use crate::clock::ScriptClock;
use crate::config::DirectorConfig;
use crate::event::{EventLog, ScriptEvent, ScriptEventKind};
use crate::message::{HandlerRegistry, Target};
use crate::stage::Stage;

/// Cross-list work requested by a running script, carried out by the director
/// after the requesting list yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Interact(ActionListId),
    Kill(ActionListId),
    SetEnabled(ActionListId, bool),
    OpenConversation(ConversationId),
    CloseConversation(ConversationId),
}

/// Mutable context passed to every action while it runs.
pub struct ScriptContext<'a> {
    /// The shared world state.
    pub world: &'a mut WorldState,
    /// The world-effect collaborator.
    pub stage: &'a mut dyn Stage,
    /// Director time.
    pub clock: &'a ScriptClock,
    /// Director tuning.
    pub config: &'a DirectorConfig,
    /// The event log.
    pub events: &'a mut EventLog,
    pub(crate) handlers: &'a mut HandlerRegistry,
    pub(crate) commands: &'a mut VecDeque<Command>,
    lists: &'a [ActionList],
    conversation_count: usize,
    current: Option<(ActionListId, f32)>,
    self_kill: bool,
}

impl<'a> ScriptContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        world: &'a mut WorldState,
        stage: &'a mut dyn Stage,
        clock: &'a ScriptClock,
        config: &'a DirectorConfig,
        events: &'a mut EventLog,
        handlers: &'a mut HandlerRegistry,
        commands: &'a mut VecDeque<Command>,
        lists: &'a [ActionList],
        conversation_count: usize,
    ) -> Self {
        Self {
            world,
            stage,
            clock,
            config,
            events,
            handlers,
            commands,
            lists,
            conversation_count,
            current: None,
            self_kill: false,
        }
    }

    /// Mark the list being stepped. Its own entry in the list slice is a placeholder
    /// while it runs, so its start delay is carried here.
    pub(crate) fn for_list(mut self, id: ActionListId, trigger_time: f32) -> Self {
        self.current = Some((id, trigger_time));
        self
    }

    /// Emit an event at the current tick.
    pub fn emit(&mut self, kind: ScriptEventKind, description: impl Into<String>) {
        self.events.push(ScriptEvent::new(
            self.clock.tick(),
            self.clock.elapsed(),
            kind,
            description,
        ));
    }

    /// The list whose action is running, if any.
    pub fn current_list(&self) -> Option<ActionListId> {
        self.current.map(|(id, _)| id)
    }

    /// Whether a list with this id exists.
    pub fn has_list(&self, id: ActionListId) -> bool {
        self.current_list() == Some(id) || id.index() < self.lists.len()
    }

    /// Whether a conversation with this id exists.
    pub fn has_conversation(&self, id: ConversationId) -> bool {
        id.index() < self.conversation_count
    }

    /// Start delay of a list, or `None` if it does not exist.
    pub fn trigger_time(&self, id: ActionListId) -> Option<f32> {
        match self.current {
            Some((current, delay)) if current == id => Some(delay),
            _ => self.lists.get(id.index()).map(|l| l.trigger_time),
        }
    }

    /// Write the game state, logging the change.
    pub fn set_game_state(&mut self, state: GameState) {
        let from = self.world.set_game_state(state);
        if from != state {
            self.emit(
                ScriptEventKind::GameStateChanged { from, to: state },
                format!("game state {from} -> {state}"),
            );
        }
    }

    /// Ask a list to start once the running list yields.
    pub fn interact(&mut self, id: ActionListId) {
        self.commands.push_back(Command::Interact(id));
    }

    /// Kill a list. Killing the running list takes effect as soon as its current action ends.
    pub fn kill(&mut self, id: ActionListId) {
        if self.current_list() == Some(id) {
            self.self_kill = true;
        } else {
            self.commands.push_back(Command::Kill(id));
        }
    }

    /// Enable or disable a list for player activation.
    pub fn set_enabled(&mut self, id: ActionListId, enabled: bool) {
        self.commands.push_back(Command::SetEnabled(id, enabled));
    }

    /// Publish a conversation's options.
    pub fn open_conversation(&mut self, id: ConversationId) {
        self.commands.push_back(Command::OpenConversation(id));
    }

    /// Withdraw a conversation's options.
    pub fn close_conversation(&mut self, id: ConversationId) {
        self.commands.push_back(Command::CloseConversation(id));
    }

    /// Call a custom message handler. Returns `false` when none is registered.
    pub fn dispatch_custom(&mut self, name: &str, target: &Target, value: Option<i32>) -> bool {
        self.handlers.dispatch(name, self.world, target, value)
    }

    pub(crate) fn take_self_kill(&mut self) -> bool {
        std::mem::take(&mut self.self_kill)
    }
}
