//! The director: owns the lists and conversations, drives them each tick, and
//! carries out the commands scripts queue for it.

use std::collections::VecDeque;

use regie_core::{ActionListId, ConversationId, GameState, WorldState};

use crate::action::Action;
use crate::action_list::{ActionList, ListKind};
use crate::clock::ScriptClock;
use crate::config::DirectorConfig;
use crate::context::{Command, ScriptContext};
use crate::conversation::Conversation;
use crate::error::{ScriptError, ScriptResult};
use crate::event::{EventLog, ScriptEvent, ScriptEventKind};
use crate::message::{HandlerRegistry, Target};
use crate::stage::{NullStage, Stage};

/// The top-level scheduler.
///
/// Owns the world state, clock, event log, stage, and every registered list
/// and conversation. Drives the tick loop and carries out the cross-list
/// commands scripts issue.
pub struct Director {
    world: WorldState,
    clock: ScriptClock,
    config: DirectorConfig,
    events: EventLog,
    stage: Box<dyn Stage>,
    handlers: HandlerRegistry,
    lists: Vec<ActionList>,
    conversations: Vec<Conversation>,
    commands: VecDeque<Command>,
    runtime_list: Option<ActionListId>,
    paused_from: Option<GameState>,
}

impl std::fmt::Debug for Director {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Director")
            .field("tick", &self.clock.tick())
            .field("game_state", &self.world.game_state)
            .field("lists", &self.lists.len())
            .field("conversations", &self.conversations.len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Director {
    /// Create a director over a world state, with a stage that does nothing.
    pub fn new(world: WorldState, config: DirectorConfig) -> Self {
        let events = EventLog::new(config.max_events);
        Self {
            world,
            clock: ScriptClock::new(),
            config,
            events,
            stage: Box::new(NullStage),
            handlers: HandlerRegistry::new(),
            lists: Vec::new(),
            conversations: Vec::new(),
            commands: VecDeque::new(),
            runtime_list: None,
            paused_from: None,
        }
    }

    /// Replace the stage.
    pub fn with_stage<S: Stage + 'static>(mut self, stage: S) -> Self {
        self.stage = Box::new(stage);
        self
    }

    /// Register a list. Ids are handed out in registration order.
    pub fn add_list(&mut self, mut list: ActionList) -> ActionListId {
        let id = ActionListId(self.lists.len() as u32);
        list.set_id(id);
        self.lists.push(list);
        id
    }

    /// Register a conversation. Ids are handed out in registration order.
    pub fn add_conversation(&mut self, mut conversation: Conversation) -> ConversationId {
        let id = ConversationId(self.conversations.len() as u32);
        conversation.set_id(id);
        self.conversations.push(conversation);
        id
    }

    /// Register a handler for custom messages sent to lists and conversations.
    pub fn register_handler<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: FnMut(&mut WorldState, &Target, Option<i32>) + 'static,
    {
        self.handlers.register(name, handler);
    }

    /// Start a list. Returns whether it started; an active list is left alone.
    pub fn interact(&mut self, id: ActionListId) -> ScriptResult<bool> {
        self.check_list(id)?;
        let started = self.start_list(id);
        self.drain_commands();
        Ok(started)
    }

    /// Player-initiated start, as from a hotspot or trigger volume.
    ///
    /// Only works on an enabled list during normal gameplay.
    pub fn activate(&mut self, id: ActionListId) -> ScriptResult<bool> {
        self.check_list(id)?;
        if !self.lists[id.index()].enabled || self.world.game_state != GameState::Normal {
            tracing::debug!(
                "{id} not activated: enabled={}, state={}",
                self.lists[id.index()].enabled,
                self.world.game_state
            );
            return Ok(false);
        }
        self.interact(id)
    }

    /// Run ad-hoc actions on the shared runtime list, replacing whatever it ran before.
    pub fn play(&mut self, actions: Vec<Action>) -> ActionListId {
        let id = match self.runtime_list {
            Some(id) => id,
            None => {
                let id = self.add_list(
                    ActionList::new("runtime", Vec::new()).with_kind(ListKind::Runtime),
                );
                self.runtime_list = Some(id);
                id
            }
        };
        if actions.is_empty() {
            return id;
        }
        if self.lists[id.index()].is_active() {
            tracing::debug!("replacing the runtime list while it was running");
            self.kill_list(id);
        }
        self.lists[id.index()].actions = actions;
        self.start_list(id);
        self.drain_commands();
        id
    }

    /// Stop a list at once. Returns whether it was active.
    pub fn kill(&mut self, id: ActionListId) -> ScriptResult<bool> {
        self.check_list(id)?;
        Ok(self.kill_list(id))
    }

    /// Kill every list whose cursor reports it running, as done before loading a save.
    ///
    /// Returns how many lists were killed.
    pub fn kill_running(&mut self) -> usize {
        let running: Vec<ActionListId> = self
            .lists
            .iter()
            .filter(|l| l.is_running())
            .map(ActionList::id)
            .collect();
        for id in &running {
            self.kill_list(*id);
        }
        running.len()
    }

    /// Publish a conversation's options.
    pub fn open_conversation(&mut self, id: ConversationId) -> ScriptResult<()> {
        self.check_conversation(id)?;
        self.with_conversation(id, |conversation, ctx| conversation.open(ctx));
        self.drain_commands();
        Ok(())
    }

    /// Withdraw a conversation's options.
    pub fn close_conversation(&mut self, id: ConversationId) -> ScriptResult<()> {
        self.check_conversation(id)?;
        self.with_conversation(id, |conversation, ctx| conversation.close(ctx));
        Ok(())
    }

    /// Choose a visible option of the active conversation. Returns the option index.
    pub fn choose(&mut self, slot: usize) -> ScriptResult<usize> {
        let id = self
            .world
            .active_conversation
            .ok_or(ScriptError::NoActiveConversation)?;
        self.run_option(id, slot)
    }

    /// Choose a visible option of a conversation. Returns the option index.
    pub fn run_option(&mut self, id: ConversationId, slot: usize) -> ScriptResult<usize> {
        self.check_conversation(id)?;
        self.with_conversation(id, |conversation, ctx| conversation.choose(slot, ctx))
    }

    /// Pause or unpause the game. Unpausing restores the state from before the pause.
    pub fn set_paused(&mut self, paused: bool) {
        let current = self.world.game_state;
        let target = if paused {
            if current == GameState::Paused {
                return;
            }
            self.paused_from = Some(current);
            GameState::Paused
        } else {
            if current != GameState::Paused {
                return;
            }
            self.paused_from.take().unwrap_or_default()
        };
        self.world.set_game_state(target);
        self.emit(
            ScriptEventKind::GameStateChanged {
                from: current,
                to: target,
            },
            format!("game state {current} -> {target}"),
        );
    }

    /// Advance by one tick of `dt` real seconds.
    pub fn tick(&mut self, dt: f32) {
        // Game time stands still while paused; the clock still sees real time.
        let scaled = if self.world.game_state == GameState::Paused {
            0.0
        } else {
            dt * self.world.controls.time_scale.max(0.0)
        };
        self.clock.advance(dt, scaled);
        self.stage.advance(scaled);

        let active: Vec<ActionListId> = self
            .lists
            .iter()
            .filter(|l| l.is_active())
            .map(ActionList::id)
            .collect();
        for id in active {
            self.with_list(id, |list, ctx| list.advance(scaled, ctx));
            self.drain_commands();
        }

        for index in 0..self.conversations.len() {
            let id = ConversationId(index as u32);
            if let Some(option) =
                self.with_conversation(id, |conversation, ctx| conversation.advance(scaled, ctx))
            {
                self.fire_option(id, option);
            }
        }
        self.drain_commands();
    }

    /// Advance by `n` ticks of `dt` seconds.
    pub fn run(&mut self, n: u64, dt: f32) {
        for _ in 0..n {
            self.tick(dt);
        }
    }

    /// Tick until no list is active and no option is pending, or `max_ticks` pass.
    ///
    /// Returns whether everything settled.
    pub fn run_until_idle(&mut self, dt: f32, max_ticks: u64) -> bool {
        for _ in 0..max_ticks {
            if self.is_idle() {
                return true;
            }
            self.tick(dt);
        }
        self.is_idle()
    }

    /// Whether nothing is executing or waiting to execute.
    pub fn is_idle(&self) -> bool {
        !self.lists.iter().any(ActionList::is_active)
            && !self.conversations.iter().any(Conversation::has_pending_choice)
            && self.commands.is_empty()
    }

    /// Record a host-side note in the event log, such as an input the host applied.
    pub fn annotate(&mut self, label: impl Into<String>) {
        let label = label.into();
        self.emit(
            ScriptEventKind::Custom {
                label: label.clone(),
            },
            label,
        );
    }

    /// The world state.
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// The world state, mutably.
    pub fn world_mut(&mut self) -> &mut WorldState {
        &mut self.world
    }

    /// Director time.
    pub fn clock(&self) -> &ScriptClock {
        &self.clock
    }

    /// Director tuning.
    pub fn config(&self) -> &DirectorConfig {
        &self.config
    }

    /// Everything that happened so far.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Look up a list.
    pub fn list(&self, id: ActionListId) -> Option<&ActionList> {
        self.lists.get(id.index())
    }

    /// Look up a list mutably, e.g. to restore its cursor.
    pub fn list_mut(&mut self, id: ActionListId) -> Option<&mut ActionList> {
        self.lists.get_mut(id.index())
    }

    /// All lists in id order.
    pub fn lists(&self) -> &[ActionList] {
        &self.lists
    }

    /// Look up a conversation.
    pub fn conversation(&self, id: ConversationId) -> Option<&Conversation> {
        self.conversations.get(id.index())
    }

    /// Look up a conversation mutably, e.g. to restore its option flags.
    pub fn conversation_mut(&mut self, id: ConversationId) -> Option<&mut Conversation> {
        self.conversations.get_mut(id.index())
    }

    /// All conversations in id order.
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    /// The conversation currently offering options, if any.
    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.world
            .active_conversation
            .and_then(|id| self.conversation(id))
    }

    /// The stage.
    pub fn stage(&self) -> &dyn Stage {
        &*self.stage
    }

    /// Access the stage by downcasting to a concrete type.
    pub fn stage_as<T: Stage + 'static>(&self) -> Option<&T> {
        self.stage.as_any().downcast_ref::<T>()
    }

    /// Access the stage mutably by downcasting to a concrete type.
    pub fn stage_as_mut<T: Stage + 'static>(&mut self) -> Option<&mut T> {
        self.stage.as_any_mut().downcast_mut::<T>()
    }

    /// The current tick number.
    pub fn current_tick(&self) -> u64 {
        self.clock.tick()
    }

    fn check_list(&self, id: ActionListId) -> ScriptResult<()> {
        if id.index() < self.lists.len() {
            Ok(())
        } else {
            Err(ScriptError::UnknownList(id))
        }
    }

    fn check_conversation(&self, id: ConversationId) -> ScriptResult<()> {
        if id.index() < self.conversations.len() {
            Ok(())
        } else {
            Err(ScriptError::UnknownConversation(id))
        }
    }

    fn emit(&mut self, kind: ScriptEventKind, description: impl Into<String>) {
        self.events.push(ScriptEvent::new(
            self.clock.tick(),
            self.clock.elapsed(),
            kind,
            description,
        ));
    }

    /// Step one list with a context over everything else.
    ///
    /// The list is swapped out of the arena while it runs so that the context
    /// can still read the other lists.
    fn with_list<R>(
        &mut self,
        id: ActionListId,
        f: impl FnOnce(&mut ActionList, &mut ScriptContext<'_>) -> R,
    ) -> R {
        let index = id.index();
        let mut list = std::mem::take(&mut self.lists[index]);
        let trigger_time = list.trigger_time;
        let mut ctx = ScriptContext::new(
            &mut self.world,
            &mut *self.stage,
            &self.clock,
            &self.config,
            &mut self.events,
            &mut self.handlers,
            &mut self.commands,
            &self.lists,
            self.conversations.len(),
        )
        .for_list(id, trigger_time);
        let result = f(&mut list, &mut ctx);
        self.lists[index] = list;
        result
    }

    fn with_conversation<R>(
        &mut self,
        id: ConversationId,
        f: impl FnOnce(&mut Conversation, &mut ScriptContext<'_>) -> R,
    ) -> R {
        let count = self.conversations.len();
        let conversation = &mut self.conversations[id.index()];
        let mut ctx = ScriptContext::new(
            &mut self.world,
            &mut *self.stage,
            &self.clock,
            &self.config,
            &mut self.events,
            &mut self.handlers,
            &mut self.commands,
            &self.lists,
            count,
        );
        f(conversation, &mut ctx)
    }

    fn start_list(&mut self, id: ActionListId) -> bool {
        self.with_list(id, |list, ctx| list.interact(ctx))
    }

    fn kill_list(&mut self, id: ActionListId) -> bool {
        let Some(list) = self.lists.get_mut(id.index()) else {
            return false;
        };
        let was_active = list.kill();
        let name = list.name.clone();
        tracing::info!("{id} '{name}' killed");
        self.emit(
            ScriptEventKind::ListKilled { list: id },
            format!("{id} '{name}' killed"),
        );
        was_active
    }

    fn fire_option(&mut self, conversation: ConversationId, option: usize) {
        let Some(chosen) = self.conversations[conversation.index()].options.get(option) else {
            return;
        };
        let returning = chosen.return_to_conversation;
        let Some(id) = chosen.list.filter(|l| l.index() < self.lists.len()) else {
            tracing::warn!("option {option} of {conversation} has no list to run");
            self.recover_from_option(conversation, returning);
            return;
        };
        let previous = self.lists[id.index()].conversation;
        self.lists[id.index()].conversation = returning.then_some(conversation);
        if !self.start_list(id) {
            tracing::warn!("option {option} of {conversation} could not start {id}");
            self.lists[id.index()].conversation = previous;
            self.recover_from_option(conversation, returning);
        }
    }

    /// Leave the cutscene an option entered when its list never ran.
    fn recover_from_option(&mut self, conversation: ConversationId, returning: bool) {
        self.with_conversation(conversation, |conversation, ctx| {
            if returning {
                conversation.open(ctx);
            } else if ctx.world.game_state == GameState::Cutscene {
                ctx.set_game_state(GameState::Normal);
            }
        });
    }

    /// Carry out queued commands in order, including any they queue in turn.
    fn drain_commands(&mut self) {
        let mut budget = self.config.max_dispatch;
        while let Some(command) = self.commands.pop_front() {
            if budget == 0 {
                tracing::warn!(
                    "more than {} script commands in one tick, deferring {} to the next",
                    self.config.max_dispatch,
                    self.commands.len() + 1
                );
                self.commands.push_front(command);
                return;
            }
            budget -= 1;
            match command {
                Command::Interact(id) if id.index() < self.lists.len() => {
                    self.start_list(id);
                }
                Command::Kill(id) => {
                    self.kill_list(id);
                }
                Command::SetEnabled(id, enabled) => {
                    if let Some(list) = self.lists.get_mut(id.index()) {
                        list.enabled = enabled;
                    }
                }
                Command::OpenConversation(id) if id.index() < self.conversations.len() => {
                    self.with_conversation(id, |conversation, ctx| conversation.open(ctx));
                }
                Command::CloseConversation(id) if id.index() < self.conversations.len() => {
                    self.with_conversation(id, |conversation, ctx| conversation.close(ctx));
                }
                other => tracing::warn!("dropping command for a missing target: {other:?}"),
            }
        }
    }
}
