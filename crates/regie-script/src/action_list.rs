//! Action lists: ordered scripts that step through their actions over time.
//!
//! A running list is an explicit state machine instead of a coroutine. Its
//! [`Phase`] says what it is waiting for, and the director calls
//! [`ActionList::advance`] once per tick to let it make progress. Actions that
//! finish without a delay are chained within the same tick.

use std::fmt;

use regie_core::{ActionListId, ConversationId, GameState};
use serde::{Deserialize, Serialize};

use crate::action::{Action, Poll};
use crate::context::ScriptContext;
use crate::event::ScriptEventKind;
use crate::flow::Cursor;

/// How a list is used in a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListKind {
    /// A scripted scene, started by other scripts or the host.
    #[default]
    Cutscene,
    /// Runs when the player uses a hotspot.
    Interaction,
    /// Runs when the player enters a trigger volume.
    Trigger,
    /// Runs when the player picks a dialogue option.
    DialogueOption,
    /// Built at runtime from ad-hoc actions.
    Runtime,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cutscene => write!(f, "cutscene"),
            Self::Interaction => write!(f, "interaction"),
            Self::Trigger => write!(f, "trigger"),
            Self::DialogueOption => write!(f, "dialogue option"),
            Self::Runtime => write!(f, "runtime"),
        }
    }
}

/// What a list is waiting for.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Phase {
    /// Not executing.
    #[default]
    Idle,
    /// Counting down the start delay.
    Delaying {
        /// Scaled seconds left.
        remaining: f32,
    },
    /// Start delay over; waiting for normal gameplay.
    AwaitingNormal,
    /// Ran out of its step budget; continues next tick.
    Ready,
    /// Waiting to run an action again.
    Polling {
        /// The action.
        index: usize,
        /// Scaled seconds left.
        remaining: f32,
    },
    /// Waiting for the game to be unpaused before the next action.
    HoldingForUnpause,
}

fn enabled_default() -> bool {
    true
}

/// An ordered, resumable script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionList {
    /// Name shown in logs.
    pub name: String,
    /// How the list is used.
    #[serde(default)]
    pub kind: ListKind,
    /// The steps.
    #[serde(default)]
    pub actions: Vec<Action>,
    /// Scaled seconds to wait before starting. A delayed list also waits for normal gameplay.
    #[serde(default)]
    pub trigger_time: f32,
    /// Ask for an autosave when the list hands control back to the player.
    #[serde(default)]
    pub autosave_after: bool,
    /// Whether the player can activate the list.
    #[serde(default = "enabled_default")]
    pub enabled: bool,
    /// Conversation to reopen when the list ends.
    #[serde(skip)]
    pub conversation: Option<ConversationId>,
    #[serde(skip)]
    id: ActionListId,
    #[serde(skip)]
    cursor: Cursor,
    #[serde(skip)]
    phase: Phase,
}

impl Default for ActionList {
    fn default() -> Self {
        Self::new("", Vec::new())
    }
}

impl ActionList {
    /// Create an enabled cutscene with no start delay.
    pub fn new(name: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            name: name.into(),
            kind: ListKind::Cutscene,
            actions,
            trigger_time: 0.0,
            autosave_after: false,
            enabled: true,
            conversation: None,
            id: ActionListId::default(),
            cursor: Cursor::default(),
            phase: Phase::Idle,
        }
    }

    /// Set the kind.
    pub fn with_kind(mut self, kind: ListKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the start delay.
    pub fn with_trigger_time(mut self, seconds: f32) -> Self {
        self.trigger_time = seconds;
        self
    }

    /// Request an autosave on a normal end.
    pub fn with_autosave(mut self) -> Self {
        self.autosave_after = true;
        self
    }

    /// The id the director registered this list under.
    pub fn id(&self) -> ActionListId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: ActionListId) {
        self.id = id;
    }

    /// Where the list is.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Overwrite the cursor, e.g. when restoring a save. Does not start execution.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// What the list is waiting for.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the cursor sits on an action index.
    ///
    /// A list that ran to the end parks past its last action and keeps
    /// reporting `true` until it is killed or restarted. Use
    /// [`ActionList::is_active`] to ask whether it is actually executing.
    pub fn is_running(&self) -> bool {
        self.cursor.is_running()
    }

    /// Whether the list is executing or waiting to execute.
    pub fn is_active(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Start the list from its first action. Does nothing if it is already active
    /// or has no actions. Returns whether it started.
    pub fn interact(&mut self, ctx: &mut ScriptContext<'_>) -> bool {
        if self.is_active() {
            tracing::debug!("{} '{}' is already running", self.id, self.name);
            return false;
        }
        if self.actions.is_empty() {
            tracing::debug!("{} '{}' has no actions", self.id, self.name);
            return false;
        }
        self.cursor = Cursor::At(0);
        tracing::info!("{} '{}' started", self.id, self.name);
        ctx.emit(
            ScriptEventKind::ListStarted { list: self.id },
            format!("{} '{}' started", self.id, self.name),
        );
        if self.trigger_time > 0.0 {
            self.phase = Phase::Delaying {
                remaining: self.trigger_time,
            };
        } else {
            self.step(ctx);
        }
        true
    }

    /// Stop the list at once, wherever it is. Safe to call at any time.
    ///
    /// The game state is left alone. Returns whether the list was active.
    pub fn kill(&mut self) -> bool {
        let was_active = self.is_active();
        if let Phase::Polling { index, .. } = self.phase
            && let Some(action) = self.actions.get_mut(index)
        {
            action.is_running = false;
        }
        self.cursor = Cursor::Halted { notify: true };
        self.phase = Phase::Idle;
        was_active
    }

    /// Let `dt` scaled seconds pass.
    pub fn advance(&mut self, dt: f32, ctx: &mut ScriptContext<'_>) {
        match self.phase {
            Phase::Idle => {}
            Phase::Delaying { remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = Phase::Delaying { remaining };
                } else {
                    self.phase = Phase::AwaitingNormal;
                    self.step_when_normal(ctx);
                }
            }
            Phase::AwaitingNormal => self.step_when_normal(ctx),
            Phase::Ready => self.step(ctx),
            Phase::Polling { index, remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = Phase::Polling { index, remaining };
                } else {
                    self.poll_action(index, ctx);
                }
            }
            Phase::HoldingForUnpause => {
                if ctx.world.game_state != GameState::Paused {
                    self.step(ctx);
                }
            }
        }
    }

    fn step_when_normal(&mut self, ctx: &mut ScriptContext<'_>) {
        if ctx.world.game_state == GameState::Normal {
            self.step(ctx);
        }
    }

    fn poll_action(&mut self, index: usize, ctx: &mut ScriptContext<'_>) {
        let Some(action) = self.actions.get_mut(index) else {
            tracing::warn!("{} lost action {index} while it was running", self.id);
            self.phase = Phase::Idle;
            return;
        };
        ctx.emit(
            ScriptEventKind::ActionPolled {
                list: self.id,
                index,
            },
            format!("{} action {index} polled", self.id),
        );
        match action.run(ctx) {
            Poll::Pending(delay) => {
                self.phase = Phase::Polling {
                    index,
                    remaining: delay,
                };
            }
            Poll::Done => {
                if self.finish(index, ctx) {
                    self.step(ctx);
                }
            }
        }
    }

    /// Run actions from the cursor until one has to wait or the list ends.
    fn step(&mut self, ctx: &mut ScriptContext<'_>) {
        let mut budget = ctx.config.max_steps;
        loop {
            let index = match self.cursor {
                Cursor::At(index) if index < self.actions.len() => index,
                _ => {
                    self.phase = Phase::Idle;
                    self.end_cutscene(ctx);
                    return;
                }
            };
            if budget == 0 {
                tracing::warn!(
                    "{} '{}' ran {} actions in one tick, continuing next tick",
                    self.id,
                    self.name,
                    ctx.config.max_steps
                );
                self.phase = Phase::Ready;
                return;
            }
            budget -= 1;

            ctx.set_game_state(GameState::Cutscene);
            self.cursor = Cursor::At(index + 1);
            let action = &mut self.actions[index];
            action.is_running = false;
            tracing::debug!("{} running action {index} ({})", self.id, action.kind.name());
            ctx.emit(
                ScriptEventKind::ActionStarted {
                    list: self.id,
                    index,
                },
                format!("{} action {index} ({})", self.id, action.kind.name()),
            );
            if let Poll::Pending(delay) = action.run(ctx) {
                self.phase = Phase::Polling {
                    index,
                    remaining: delay,
                };
                return;
            }
            if !self.finish(index, ctx) {
                return;
            }
        }
    }

    /// Apply the action's end result. Returns `false` if the list must hold for unpause.
    fn finish(&mut self, index: usize, ctx: &mut ScriptContext<'_>) -> bool {
        let flow = self.actions[index].end(ctx);
        self.cursor = self.cursor.follow(flow);
        if ctx.take_self_kill() {
            self.cursor = Cursor::Halted { notify: true };
        }
        ctx.emit(
            ScriptEventKind::ActionEnded {
                list: self.id,
                index,
                flow,
            },
            format!("{} action {index} ended: {flow}", self.id),
        );
        if ctx.world.game_state == GameState::Paused {
            self.phase = Phase::HoldingForUnpause;
            return false;
        }
        true
    }

    fn end_cutscene(&mut self, ctx: &mut ScriptContext<'_>) {
        let notify = self.cursor != Cursor::Halted { notify: false };
        if notify && ctx.world.game_state == GameState::Cutscene {
            ctx.set_game_state(GameState::Normal);
            if self.autosave_after {
                ctx.stage.autosave();
                ctx.emit(
                    ScriptEventKind::AutosaveRequested { list: self.id },
                    format!("{} requested an autosave", self.id),
                );
            }
        } else if self.autosave_after {
            tracing::warn!(
                "cannot autosave after {} '{}': another cutscene has started",
                self.id,
                self.name
            );
        }
        tracing::info!("{} '{}' ended", self.id, self.name);
        ctx.emit(
            ScriptEventKind::ListEnded {
                list: self.id,
                notify,
            },
            format!("{} '{}' ended", self.id, self.name),
        );
        if let Some(conversation) = self.conversation.take() {
            ctx.set_game_state(GameState::Cutscene);
            ctx.open_conversation(conversation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionKind, ResultAction};
    use crate::context::testing::TestBed;
    use crate::flow::Flow;
    use proptest::prelude::*;
    use regie_core::{Variable, VariableId, Variables, WorldState};

    fn counter_world() -> WorldState {
        WorldState::new()
            .with_variables(Variables::new().with(Variable::integer(VariableId(0), "steps")))
    }

    fn bump() -> Action {
        Action::new(ActionKind::SetVariable {
            variable: VariableId(0),
            value: 1,
            cumulative: true,
        })
    }

    fn started_indices(bed: &TestBed) -> Vec<usize> {
        bed.events
            .events()
            .iter()
            .filter_map(|e| match e.kind {
                ScriptEventKind::ActionStarted { index, .. } => Some(index),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn immediate_actions_chain_in_one_call() {
        let mut bed = TestBed::new(counter_world());
        let mut list = ActionList::new("count", vec![bump(), bump(), bump()]);
        assert!(list.interact(&mut bed.ctx_for(list.id(), 0.0)));
        assert_eq!(bed.world.variables.value(VariableId(0)), Some(3));
        assert_eq!(list.cursor(), Cursor::At(3));
        assert!(list.is_running());
        assert!(!list.is_active());
        assert_eq!(bed.world.game_state, GameState::Normal);
    }

    #[test]
    fn wait_suspends_until_enough_time_passed() {
        let mut bed = TestBed::new(counter_world());
        let mut list = ActionList::new("pause", vec![Action::wait(1.0), bump()]);
        list.interact(&mut bed.ctx());
        assert_eq!(list.phase(), Phase::Polling { index: 0, remaining: 1.0 });
        assert_eq!(bed.world.game_state, GameState::Cutscene);

        list.advance(0.5, &mut bed.ctx());
        assert_eq!(bed.world.variables.value(VariableId(0)), Some(0));
        list.advance(0.5, &mut bed.ctx());
        assert_eq!(bed.world.variables.value(VariableId(0)), Some(1));
        assert_eq!(list.phase(), Phase::Idle);
        assert_eq!(bed.world.game_state, GameState::Normal);
    }

    #[test]
    fn delayed_start_waits_for_normal_state() {
        let mut bed = TestBed::new(counter_world());
        let mut list = ActionList::new("late", vec![bump()]).with_trigger_time(1.0);
        list.interact(&mut bed.ctx());
        assert_eq!(list.phase(), Phase::Delaying { remaining: 1.0 });

        bed.world.game_state = GameState::DialogOptions;
        list.advance(1.0, &mut bed.ctx());
        assert_eq!(list.phase(), Phase::AwaitingNormal);
        list.advance(1.0, &mut bed.ctx());
        assert_eq!(bed.world.variables.value(VariableId(0)), Some(0));

        bed.world.game_state = GameState::Normal;
        list.advance(0.1, &mut bed.ctx());
        assert_eq!(bed.world.variables.value(VariableId(0)), Some(1));
    }

    #[test]
    fn interact_while_active_is_ignored() {
        let mut bed = TestBed::new(counter_world());
        let mut list = ActionList::new("pause", vec![Action::wait(1.0)]);
        assert!(list.interact(&mut bed.ctx()));
        assert!(!list.interact(&mut bed.ctx()));
        let starts = bed
            .events
            .events()
            .iter()
            .filter(|e| matches!(e.kind, ScriptEventKind::ListStarted { .. }))
            .count();
        assert_eq!(starts, 1);
    }

    #[test]
    fn empty_list_does_not_start() {
        let mut bed = TestBed::new(counter_world());
        let mut list = ActionList::new("empty", Vec::new());
        assert!(!list.interact(&mut bed.ctx()));
        assert!(bed.events.is_empty());
    }

    #[test]
    fn skip_jumps_and_stop_halts() {
        let mut bed = TestBed::new(counter_world());
        let mut list = ActionList::new(
            "jumpy",
            vec![
                bump().with_end(ResultAction::Skip(2)),
                bump(),
                bump().with_end(ResultAction::Stop),
                bump(),
            ],
        );
        list.interact(&mut bed.ctx());
        assert_eq!(started_indices(&bed), vec![0, 2]);
        assert_eq!(list.cursor(), Cursor::Halted { notify: true });
        assert!(!list.is_running());
    }

    #[test]
    fn skip_to_zero_advances() {
        let mut bed = TestBed::new(counter_world());
        let mut list = ActionList::new(
            "straight",
            vec![bump().with_end(ResultAction::Skip(0)), bump()],
        );
        list.interact(&mut bed.ctx());
        assert_eq!(started_indices(&bed), vec![0, 1]);
        assert_eq!(bed.world.variables.value(VariableId(0)), Some(2));
        assert_eq!(list.cursor(), Cursor::At(2));
        assert!(!list.is_active());
    }

    #[test]
    fn skip_backwards_loops() {
        let mut bed = TestBed::new(counter_world());
        let mut list = ActionList::new(
            "loop",
            vec![
                bump(),
                Action::wait(1.0),
                bump().with_end(ResultAction::Skip(1)),
            ],
        );
        list.interact(&mut bed.ctx());
        list.advance(1.0, &mut bed.ctx());
        assert_eq!(list.phase(), Phase::Polling { index: 1, remaining: 1.0 });
        list.advance(1.0, &mut bed.ctx());
        assert_eq!(bed.world.variables.value(VariableId(0)), Some(3));
    }

    #[test]
    fn runaway_loop_yields_after_budget() {
        let mut bed = TestBed::new(counter_world());
        bed.config.max_steps = 10;
        let mut list = ActionList::new(
            "spin",
            vec![bump(), bump().with_end(ResultAction::Skip(1))],
        );
        list.interact(&mut bed.ctx());
        assert_eq!(list.phase(), Phase::Ready);
        assert_eq!(bed.world.variables.value(VariableId(0)), Some(10));
        list.advance(0.0, &mut bed.ctx());
        assert_eq!(bed.world.variables.value(VariableId(0)), Some(20));
        list.kill();
    }

    #[test]
    fn pause_holds_between_actions() {
        let mut bed = TestBed::new(counter_world());
        let mut list = ActionList::new("pausable", vec![Action::wait(1.0), bump(), bump()]);
        list.interact(&mut bed.ctx());
        bed.world.game_state = GameState::Paused;
        list.advance(1.0, &mut bed.ctx());
        assert_eq!(list.phase(), Phase::HoldingForUnpause);
        assert_eq!(list.cursor(), Cursor::At(1));
        list.advance(1.0, &mut bed.ctx());
        assert_eq!(bed.world.variables.value(VariableId(0)), Some(0));

        bed.world.game_state = GameState::Cutscene;
        list.advance(0.0, &mut bed.ctx());
        assert_eq!(bed.world.variables.value(VariableId(0)), Some(2));
        assert_eq!(list.phase(), Phase::Idle);
    }

    #[test]
    fn kill_is_idempotent_in_every_phase() {
        let lists = [
            ActionList::new("idle", vec![bump()]),
            ActionList::new("delaying", vec![bump()]).with_trigger_time(2.0),
            ActionList::new("polling", vec![Action::wait(2.0), bump()]),
        ];
        for mut list in lists {
            let mut bed = TestBed::new(counter_world());
            if list.name != "idle" {
                list.interact(&mut bed.ctx());
            }
            list.kill();
            list.kill();
            assert!(!list.is_running(), "{}", list.name);
            assert!(!list.is_active(), "{}", list.name);
            let before = bed.events.len();
            for _ in 0..5 {
                list.advance(1.0, &mut bed.ctx());
            }
            assert_eq!(bed.events.len(), before, "{}", list.name);
            assert_eq!(bed.world.variables.value(VariableId(0)), Some(0));
        }
    }

    #[test]
    fn hand_off_does_not_restore_normal_or_autosave() {
        let mut bed = TestBed::new(counter_world());
        bed.add_list("sub", 0.0);
        let mut list = ActionList::new(
            "parent",
            vec![bump().with_end(ResultAction::RunCutscene(Some(ActionListId(0))))],
        )
        .with_autosave();
        list.set_id(ActionListId(1));
        list.interact(&mut bed.ctx_for(ActionListId(1), 0.0));
        assert_eq!(list.cursor(), Cursor::Halted { notify: false });
        assert_eq!(bed.world.game_state, GameState::Cutscene);
        assert_eq!(bed.stage.autosave_count(), 0);
    }

    #[test]
    fn normal_end_restores_and_autosaves() {
        let mut bed = TestBed::new(counter_world());
        let mut list = ActionList::new("saver", vec![bump()]).with_autosave();
        list.interact(&mut bed.ctx());
        assert_eq!(bed.world.game_state, GameState::Normal);
        assert_eq!(bed.stage.autosave_count(), 1);
    }

    #[test]
    fn ending_reopens_pending_conversation() {
        let mut bed = TestBed::new(counter_world());
        bed.conversation_count = 1;
        let mut list = ActionList::new("option", vec![bump()]);
        list.conversation = Some(ConversationId(0));
        list.interact(&mut bed.ctx());
        assert_eq!(bed.world.game_state, GameState::Cutscene);
        assert_eq!(list.conversation, None);
        assert_eq!(bed.commands.len(), 1);
    }

    #[test]
    fn self_kill_stops_after_current_action() {
        let mut bed = TestBed::new(counter_world());
        let mut list = ActionList::new(
            "quitter",
            vec![
                Action::send(crate::message::Target::Own, crate::message::Message::Kill),
                bump(),
            ],
        );
        list.interact(&mut bed.ctx_for(list.id(), 0.0));
        assert_eq!(bed.world.variables.value(VariableId(0)), Some(0));
        assert_eq!(list.cursor(), Cursor::Halted { notify: true });
        assert_eq!(bed.world.game_state, GameState::Normal);
    }

    #[test]
    fn ended_action_reports_its_flow() {
        let mut bed = TestBed::new(counter_world());
        let mut list = ActionList::new("one", vec![bump().with_end(ResultAction::Stop)]);
        list.interact(&mut bed.ctx());
        let flows: Vec<Flow> = bed
            .events
            .events()
            .iter()
            .filter_map(|e| match e.kind {
                ScriptEventKind::ActionEnded { flow, .. } => Some(flow),
                _ => None,
            })
            .collect();
        assert_eq!(flows, vec![Flow::STOP]);
    }

    #[test]
    fn list_deserializes_with_defaults() {
        let list: ActionList = serde_json::from_str(
            r#"{"name": "door", "kind": "interaction",
                "actions": [{"action": "wait", "seconds": 1.0}]}"#,
        )
        .unwrap();
        assert_eq!(list.kind, ListKind::Interaction);
        assert!(list.enabled);
        assert_eq!(list.cursor(), Cursor::At(0));
        assert!(!list.is_active());
    }

    proptest! {
        // Without jumps, actions start in order and each starts only after
        // the previous one finished, however the waits are arranged.
        #[test]
        fn actions_run_in_order(waits in proptest::collection::vec(0u8..4, 1..8), dt in 1u8..4) {
            let mut bed = TestBed::new(counter_world());
            let actions = waits.iter().map(|w| Action::wait(f32::from(*w))).collect::<Vec<_>>();
            let len = actions.len();
            let mut list = ActionList::new("seq", actions);
            list.interact(&mut bed.ctx());
            for _ in 0..200 {
                if !list.is_active() {
                    break;
                }
                list.advance(f32::from(dt) * 0.5, &mut bed.ctx());
            }
            prop_assert!(!list.is_active());
            prop_assert_eq!(started_indices(&bed), (0..len).collect::<Vec<_>>());

            let mut open: Option<usize> = None;
            for event in bed.events.events() {
                match event.kind {
                    ScriptEventKind::ActionStarted { index, .. } => {
                        prop_assert!(open.is_none());
                        open = Some(index);
                    }
                    ScriptEventKind::ActionEnded { index, .. } => {
                        prop_assert_eq!(open, Some(index));
                        open = None;
                    }
                    _ => {}
                }
            }
        }
    }
}
