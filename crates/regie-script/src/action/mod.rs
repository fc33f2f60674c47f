//! Actions: the steps of an action list.
//!
//! Each action runs in two phases. [`Action::run`] performs the step and may
//! ask to be run again after a delay. [`Action::end`] decides where the list
//! goes next. The set of actions is closed; hosts extend behaviour through
//! [`ActionKind::Effect`] calls on the stage and custom message handlers.

mod condition;
mod result;

pub use condition::{Branch, CountCheck, Equality, IntCondition, VariableCheck};
pub use result::ResultAction;

use regie_core::{
    ConversationId, GameState, ItemId, LockType, RunLock, SceneId, VariableId, VariableKind,
};
use serde::{Deserialize, Serialize};

use crate::context::ScriptContext;
use crate::event::ScriptEventKind;
use crate::flow::Flow;
use crate::message::{Message, Target};
use crate::stage::{EffectCall, EffectStatus};

/// What a run step asks of its list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Poll {
    /// The action is done; call `end` now.
    Done,
    /// Run the action again after this many scaled seconds.
    Pending(f32),
}

/// The behaviour of an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionKind {
    /// Do nothing for a while.
    Wait {
        /// Seconds of scaled time.
        seconds: f32,
    },
    /// Ask the stage for a world effect.
    Effect {
        /// The effect.
        call: EffectCall,
    },
    /// Show a line of dialogue.
    Speech {
        /// Who speaks, if anyone.
        #[serde(default)]
        speaker: Option<String>,
        /// The line.
        text: String,
        /// Let gameplay continue while the line is shown.
        #[serde(default)]
        background: bool,
    },
    /// Write a variable.
    SetVariable {
        /// The variable.
        variable: VariableId,
        /// New value, or the amount to add.
        value: i32,
        /// Add to the current value instead of replacing it. Integers only.
        #[serde(default)]
        cumulative: bool,
    },
    /// Branch on a variable.
    CheckVariable {
        /// The variable.
        variable: VariableId,
        /// The comparison.
        check: VariableCheck,
        /// Where to go.
        #[serde(default)]
        outcome: Branch,
    },
    /// Branch on a held item.
    CheckInventory {
        /// The item.
        item: ItemId,
        /// Count comparison. `None` means "held at least once".
        #[serde(default)]
        count: Option<CountCheck>,
        /// Where to go.
        #[serde(default)]
        outcome: Branch,
    },
    /// Branch on the scene the player came from.
    CheckScene {
        /// The scene to compare with.
        scene: SceneId,
        /// The comparison.
        #[serde(default)]
        condition: Equality,
        /// Where to go.
        #[serde(default)]
        outcome: Branch,
    },
    /// Send a message to a list, conversation, or object.
    SendMessage {
        /// The receiver.
        target: Target,
        /// The message.
        message: Message,
    },
    /// Offer a conversation's options and hand control to it.
    StartConversation {
        /// The conversation.
        conversation: ConversationId,
    },
    /// Move to another scene.
    ChangeScene {
        /// The scene to load.
        scene: SceneId,
    },
    /// Change player input constraints.
    PlayerLock {
        /// Moving up.
        #[serde(default)]
        up: LockType,
        /// Moving down.
        #[serde(default)]
        down: LockType,
        /// Moving left.
        #[serde(default)]
        left: LockType,
        /// Moving right.
        #[serde(default)]
        right: LockType,
        /// Walk/run constraint.
        #[serde(default)]
        run: RunLock,
        /// Inventory access. Only unlocked when the inventory holds something.
        #[serde(default)]
        inventory: LockType,
        /// Saving from the pause menu.
        #[serde(default)]
        save: LockType,
    },
    /// Change the time scale. Negative values are ignored.
    Timescale {
        /// New multiplier.
        scale: f32,
    },
}

impl ActionKind {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Wait { .. } => "wait",
            Self::Effect { .. } => "effect",
            Self::Speech { .. } => "speech",
            Self::SetVariable { .. } => "set variable",
            Self::CheckVariable { .. } => "check variable",
            Self::CheckInventory { .. } => "check inventory",
            Self::CheckScene { .. } => "check scene",
            Self::SendMessage { .. } => "send message",
            Self::StartConversation { .. } => "start conversation",
            Self::ChangeScene { .. } => "change scene",
            Self::PlayerLock { .. } => "player lock",
            Self::Timescale { .. } => "timescale",
        }
    }

    /// The branch of a check action.
    pub fn branch(&self) -> Option<&Branch> {
        match self {
            Self::CheckVariable { outcome, .. }
            | Self::CheckInventory { outcome, .. }
            | Self::CheckScene { outcome, .. } => Some(outcome),
            _ => None,
        }
    }
}

/// One step of an action list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Author-assigned number, shown in logs.
    #[serde(default)]
    pub id: u32,
    /// Block the list until a started effect finishes.
    #[serde(default)]
    pub will_wait: bool,
    /// Where the list goes after this action. Check actions use their branch instead.
    #[serde(default)]
    pub end: ResultAction,
    /// What the action does.
    #[serde(flatten)]
    pub kind: ActionKind,
    /// Set while the action waits to be run again.
    #[serde(skip)]
    pub is_running: bool,
}

impl Action {
    /// Create an action that continues to the next one when done.
    pub fn new(kind: ActionKind) -> Self {
        Self {
            id: 0,
            will_wait: false,
            end: ResultAction::Continue,
            kind,
            is_running: false,
        }
    }

    /// A pause of `seconds`.
    pub fn wait(seconds: f32) -> Self {
        Self::new(ActionKind::Wait { seconds })
    }

    /// A world effect that does not block.
    pub fn effect(call: EffectCall) -> Self {
        Self::new(ActionKind::Effect { call })
    }

    /// A foreground line of dialogue.
    pub fn speech(speaker: Option<&str>, text: impl Into<String>) -> Self {
        Self::new(ActionKind::Speech {
            speaker: speaker.map(str::to_string),
            text: text.into(),
            background: false,
        })
    }

    /// Replace a variable's value.
    pub fn set_variable(variable: VariableId, value: i32) -> Self {
        Self::new(ActionKind::SetVariable {
            variable,
            value,
            cumulative: false,
        })
    }

    /// Send a message.
    pub fn send(target: Target, message: Message) -> Self {
        Self::new(ActionKind::SendMessage { target, message })
    }

    /// Set the author-assigned number.
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    /// Set what happens after this action.
    pub fn with_end(mut self, end: ResultAction) -> Self {
        self.end = end;
        self
    }

    /// Block until a started effect finishes.
    pub fn waiting(mut self) -> Self {
        self.will_wait = true;
        self
    }

    /// Perform the step. Called again after each `Pending` delay until it returns `Done`.
    pub fn run(&mut self, ctx: &mut ScriptContext<'_>) -> Poll {
        let poll = match &self.kind {
            ActionKind::Wait { seconds } => {
                if !self.is_running && *seconds > 0.0 {
                    Poll::Pending(*seconds)
                } else {
                    Poll::Done
                }
            }
            ActionKind::Effect { call } => {
                let status = if self.is_running {
                    ctx.stage.poll(call)
                } else {
                    ctx.stage.start(call)
                };
                if self.will_wait && status == EffectStatus::Running {
                    Poll::Pending(ctx.config.default_pause)
                } else {
                    Poll::Done
                }
            }
            ActionKind::Speech {
                speaker,
                text,
                background,
            } => run_speech(self.is_running, speaker.as_deref(), text, *background, ctx),
            ActionKind::SetVariable {
                variable,
                value,
                cumulative,
            } => {
                set_variable(*variable, *value, *cumulative, ctx);
                Poll::Done
            }
            ActionKind::CheckVariable { .. }
            | ActionKind::CheckInventory { .. }
            | ActionKind::CheckScene { .. } => Poll::Done,
            ActionKind::SendMessage { target, message } => {
                send_message(target, message, ctx);
                Poll::Done
            }
            ActionKind::StartConversation { conversation } => {
                if ctx.has_conversation(*conversation) {
                    ctx.open_conversation(*conversation);
                } else {
                    tracing::warn!("cannot start {conversation}: no such conversation");
                }
                Poll::Done
            }
            ActionKind::ChangeScene { scene } => {
                let from = ctx.world.scenes.current;
                ctx.world.scenes.change_to(*scene);
                ctx.set_game_state(GameState::Normal);
                ctx.stage.scene_changed(from, *scene);
                ctx.emit(
                    ScriptEventKind::SceneChanged { from, to: *scene },
                    format!("scene {from} -> {scene}"),
                );
                Poll::Done
            }
            ActionKind::PlayerLock {
                up,
                down,
                left,
                right,
                run,
                inventory,
                save,
            } => {
                let controls = &mut ctx.world.controls;
                up.apply(&mut controls.up_locked);
                down.apply(&mut controls.down_locked);
                left.apply(&mut controls.left_locked);
                right.apply(&mut controls.right_locked);
                controls.set_run_lock(*run);
                save.apply(&mut controls.save_locked);
                match inventory {
                    LockType::Disabled => ctx.world.inventory.is_locked = true,
                    LockType::Enabled if !ctx.world.inventory.is_empty() => {
                        ctx.world.inventory.is_locked = false;
                    }
                    _ => {}
                }
                Poll::Done
            }
            ActionKind::Timescale { scale } => {
                if *scale >= 0.0 {
                    ctx.world.controls.time_scale = *scale;
                } else {
                    tracing::debug!("ignoring negative time scale {scale}");
                }
                Poll::Done
            }
        };
        self.is_running = matches!(poll, Poll::Pending(_));
        poll
    }

    /// Decide where the list goes next. Check conditions are evaluated here, fresh.
    pub fn end(&mut self, ctx: &mut ScriptContext<'_>) -> Flow {
        match &self.kind {
            ActionKind::CheckVariable {
                variable,
                check,
                outcome,
            } => match ctx.world.variables.value(*variable) {
                Some(stored) => outcome.pick(check.evaluate(stored)).resolve(ctx),
                None => {
                    tracing::warn!("cannot check {variable}: no such variable");
                    Flow::Continue
                }
            },
            ActionKind::CheckInventory {
                item,
                count,
                outcome,
            } => {
                let holds = CountCheck::held(count.as_ref(), ctx.world, *item);
                outcome.pick(holds).resolve(ctx)
            }
            ActionKind::CheckScene {
                scene,
                condition,
                outcome,
            } => {
                let holds = condition.evaluate(ctx.world.scenes.previous, Some(*scene));
                outcome.pick(holds).resolve(ctx)
            }
            ActionKind::SendMessage {
                target,
                message: Message::Interact,
            } => {
                let list = match target {
                    Target::Own => ctx.current_list(),
                    Target::List(id) => Some(*id),
                    _ => None,
                };
                match list.and_then(|id| ctx.trigger_time(id)) {
                    Some(delay) if delay <= 0.0 => Flow::HAND_OFF,
                    _ => self.end.resolve(ctx),
                }
            }
            ActionKind::StartConversation { conversation }
                if ctx.has_conversation(*conversation) =>
            {
                Flow::HAND_OFF
            }
            _ => self.end.resolve(ctx),
        }
    }
}

fn run_speech(
    waiting: bool,
    speaker: Option<&str>,
    text: &str,
    background: bool,
    ctx: &mut ScriptContext<'_>,
) -> Poll {
    if waiting {
        return if ctx.stage.speech_active() {
            Poll::Pending(ctx.config.default_pause)
        } else {
            Poll::Done
        };
    }
    if text.is_empty() {
        return Poll::Done;
    }
    ctx.stage.clear_speech();
    if background {
        ctx.set_game_state(GameState::Normal);
        ctx.stage.show_speech(speaker, text);
        Poll::Done
    } else {
        ctx.set_game_state(GameState::Cutscene);
        ctx.stage.show_speech(speaker, text);
        Poll::Pending(ctx.config.default_pause)
    }
}

fn set_variable(variable: VariableId, value: i32, cumulative: bool, ctx: &mut ScriptContext<'_>) {
    let Some(kind) = ctx.world.variables.kind_of(variable) else {
        tracing::warn!("cannot set {variable}: no such variable");
        return;
    };
    let cumulative = cumulative && kind == VariableKind::Integer;
    match ctx.world.variables.set_value(variable, value, cumulative) {
        Ok(stored) => ctx.emit(
            ScriptEventKind::VariableChanged {
                variable,
                value: stored,
            },
            format!("{variable} = {stored}"),
        ),
        Err(e) => tracing::warn!("{e}"),
    }
}

fn send_message(target: &Target, message: &Message, ctx: &mut ScriptContext<'_>) {
    match target {
        Target::Own | Target::List(_) => {
            let list = match target {
                Target::List(id) => Some(*id),
                _ => ctx.current_list(),
            };
            let Some(id) = list.filter(|id| ctx.has_list(*id)) else {
                tracing::warn!("cannot send {message} to {target}: no such list");
                return;
            };
            match message {
                Message::TurnOn => ctx.set_enabled(id, true),
                Message::TurnOff => ctx.set_enabled(id, false),
                Message::Interact => ctx.interact(id),
                Message::Kill => ctx.kill(id),
                Message::Custom { name, value } => send_custom(name, target, *value, ctx),
            }
        }
        Target::Conversation(id) => {
            if !ctx.has_conversation(*id) {
                tracing::warn!("cannot send {message} to {id}: no such conversation");
                return;
            }
            match message {
                Message::TurnOn | Message::Interact => ctx.open_conversation(*id),
                Message::TurnOff | Message::Kill => ctx.close_conversation(*id),
                Message::Custom { name, value } => send_custom(name, target, *value, ctx),
            }
        }
        Target::Object(name) => {
            if !ctx.stage.send(name, message) {
                tracing::warn!("cannot send {message}: no object named '{name}'");
                return;
            }
        }
    }
    if let Some(list) = ctx.current_list() {
        ctx.emit(
            ScriptEventKind::MessageSent {
                list,
                target: target.to_string(),
                message: message.to_string(),
            },
            format!("{list} sent {message} to {target}"),
        );
    }
}

fn send_custom(name: &str, target: &Target, value: Option<i32>, ctx: &mut ScriptContext<'_>) {
    if !ctx.dispatch_custom(name, target, value) {
        tracing::warn!("no handler registered for message '{name}'");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::TestBed;
    use crate::stage::StageCall;
    use regie_core::{ActionListId, Inventory, SceneTracker, Variable, Variables, WorldState};

    fn world() -> WorldState {
        let mut inventory = Inventory::new();
        inventory.add(ItemId(1), 2);
        WorldState::new()
            .with_variables(
                Variables::new()
                    .with(Variable::integer(VariableId(0), "coins").with_value(5))
                    .with(Variable::boolean(VariableId(1), "door open")),
            )
            .with_inventory(inventory)
            .with_scenes(SceneTracker::starting_in(SceneId(1)))
    }

    #[test]
    fn wait_pends_once() {
        let mut bed = TestBed::new(world());
        let mut action = Action::wait(2.0);
        assert_eq!(action.run(&mut bed.ctx()), Poll::Pending(2.0));
        assert!(action.is_running);
        assert_eq!(action.run(&mut bed.ctx()), Poll::Done);
        assert!(!action.is_running);
        assert_eq!(Action::wait(0.0).run(&mut bed.ctx()), Poll::Done);
    }

    #[test]
    fn waiting_effect_polls_the_stage() {
        let mut bed = TestBed::new(world());
        bed.stage = bed.stage.with_effect_duration("walk", 0.5);
        let mut action = Action::effect(EffectCall::new("hero", "walk")).waiting();
        assert_eq!(action.run(&mut bed.ctx()), Poll::Pending(0.2));
        bed.advance_stage(0.3);
        assert_eq!(action.run(&mut bed.ctx()), Poll::Pending(0.2));
        bed.advance_stage(0.3);
        assert_eq!(action.run(&mut bed.ctx()), Poll::Done);
        assert_eq!(bed.stage.calls().len(), 1);
    }

    #[test]
    fn non_waiting_effect_is_fire_and_forget() {
        let mut bed = TestBed::new(world());
        bed.stage = bed.stage.with_effect_duration("walk", 0.5);
        let mut action = Action::effect(EffectCall::new("hero", "walk"));
        assert_eq!(action.run(&mut bed.ctx()), Poll::Done);
    }

    #[test]
    fn foreground_speech_waits_for_the_line() {
        let mut bed = TestBed::new(world());
        bed.stage = bed.stage.with_speech_duration(0.3);
        let mut action = Action::speech(Some("Elaine"), "Hello.");
        assert_eq!(action.run(&mut bed.ctx()), Poll::Pending(0.2));
        assert_eq!(bed.world.game_state, GameState::Cutscene);
        bed.advance_stage(0.2);
        assert_eq!(action.run(&mut bed.ctx()), Poll::Pending(0.2));
        bed.advance_stage(0.2);
        assert_eq!(action.run(&mut bed.ctx()), Poll::Done);
    }

    #[test]
    fn background_speech_returns_control() {
        let mut bed = TestBed::new(world());
        bed.world.game_state = GameState::Cutscene;
        let mut action = Action::new(ActionKind::Speech {
            speaker: None,
            text: "Psst.".into(),
            background: true,
        });
        assert_eq!(action.run(&mut bed.ctx()), Poll::Done);
        assert_eq!(bed.world.game_state, GameState::Normal);
    }

    #[test]
    fn empty_speech_is_a_no_op() {
        let mut bed = TestBed::new(world());
        let mut action = Action::speech(None, "");
        assert_eq!(action.run(&mut bed.ctx()), Poll::Done);
        assert!(bed.stage.calls().is_empty());
    }

    #[test]
    fn set_variable_honours_kind() {
        let mut bed = TestBed::new(world());
        let mut add = Action::new(ActionKind::SetVariable {
            variable: VariableId(0),
            value: 3,
            cumulative: true,
        });
        add.run(&mut bed.ctx());
        assert_eq!(bed.world.variables.value(VariableId(0)), Some(8));

        // Booleans are always assigned, never accumulated.
        bed.world
            .variables
            .set_value(VariableId(1), 1, false)
            .unwrap();
        let mut clear = Action::new(ActionKind::SetVariable {
            variable: VariableId(1),
            value: 0,
            cumulative: true,
        });
        clear.run(&mut bed.ctx());
        assert_eq!(bed.world.variables.get_bool(VariableId(1)), Some(false));
    }

    #[test]
    fn missing_variable_degrades_to_continue() {
        let mut bed = TestBed::new(world());
        let mut set = Action::set_variable(VariableId(9), 1);
        assert_eq!(set.run(&mut bed.ctx()), Poll::Done);
        let mut check = Action::new(ActionKind::CheckVariable {
            variable: VariableId(9),
            check: VariableCheck::Integer {
                condition: IntCondition::EqualTo,
                value: 1,
            },
            outcome: Branch::new(ResultAction::Stop, ResultAction::Stop),
        });
        assert_eq!(check.end(&mut bed.ctx()), Flow::Continue);
    }

    #[test]
    fn check_variable_branches() {
        let mut bed = TestBed::new(world());
        let mut check = Action::new(ActionKind::CheckVariable {
            variable: VariableId(0),
            check: VariableCheck::Integer {
                condition: IntCondition::MoreThan,
                value: 4,
            },
            outcome: Branch::new(ResultAction::Skip(3), ResultAction::Stop),
        });
        assert_eq!(check.end(&mut bed.ctx()), Flow::Jump(3));
        bed.world
            .variables
            .set_value(VariableId(0), 1, false)
            .unwrap();
        assert_eq!(check.end(&mut bed.ctx()), Flow::STOP);
    }

    #[test]
    fn check_inventory_and_scene() {
        let mut bed = TestBed::new(world());
        let mut has_key = Action::new(ActionKind::CheckInventory {
            item: ItemId(1),
            count: Some(CountCheck {
                condition: IntCondition::EqualTo,
                value: 2,
            }),
            outcome: Branch::new(ResultAction::Continue, ResultAction::Stop),
        });
        assert_eq!(has_key.end(&mut bed.ctx()), Flow::Continue);

        let mut came_from = Action::new(ActionKind::CheckScene {
            scene: SceneId(1),
            condition: Equality::EqualTo,
            outcome: Branch::new(ResultAction::Skip(3), ResultAction::Stop),
        });
        assert_eq!(came_from.end(&mut bed.ctx()), Flow::STOP);
        bed.world.scenes.change_to(SceneId(2));
        assert_eq!(came_from.end(&mut bed.ctx()), Flow::Jump(3));
    }

    #[test]
    fn run_cutscene_hands_off_to_immediate_list() {
        let mut bed = TestBed::new(world());
        bed.add_list("immediate", 0.0);
        bed.add_list("delayed", 1.5);
        let mut action =
            Action::wait(0.0).with_end(ResultAction::RunCutscene(Some(ActionListId(0))));
        assert_eq!(action.end(&mut bed.ctx()), Flow::HAND_OFF);
        let mut action =
            Action::wait(0.0).with_end(ResultAction::RunCutscene(Some(ActionListId(1))));
        assert_eq!(action.end(&mut bed.ctx()), Flow::STOP);
        assert_eq!(bed.commands.len(), 2);

        let mut dangling =
            Action::wait(0.0).with_end(ResultAction::RunCutscene(Some(ActionListId(7))));
        assert_eq!(dangling.end(&mut bed.ctx()), Flow::Continue);
        assert_eq!(bed.commands.len(), 2);
    }

    #[test]
    fn interact_message_hands_off_to_immediate_list() {
        let mut bed = TestBed::new(world());
        bed.add_list("immediate", 0.0);
        bed.add_list("delayed", 2.0);
        let mut send = Action::send(Target::List(ActionListId(0)), Message::Interact);
        send.run(&mut bed.ctx_for(ActionListId(1), 2.0));
        assert_eq!(send.end(&mut bed.ctx()), Flow::HAND_OFF);

        let mut send = Action::send(Target::List(ActionListId(1)), Message::Interact);
        assert_eq!(send.end(&mut bed.ctx()), Flow::Continue);
    }

    #[test]
    fn object_messages_go_to_the_stage() {
        let mut bed = TestBed::new(world());
        let mut send = Action::send(Target::Object("door".into()), Message::TurnOn);
        send.run(&mut bed.ctx_for(ActionListId(0), 0.0));
        assert_eq!(
            bed.stage.calls(),
            &[StageCall::Sent {
                object: "door".into(),
                message: Message::TurnOn
            }]
        );
        assert_eq!(bed.events.len(), 1);
    }

    #[test]
    fn start_conversation_always_hands_off() {
        let mut bed = TestBed::new(world());
        bed.conversation_count = 1;
        let mut start = Action::new(ActionKind::StartConversation {
            conversation: ConversationId(0),
        })
        .with_end(ResultAction::Stop);
        start.run(&mut bed.ctx());
        assert_eq!(start.end(&mut bed.ctx()), Flow::HAND_OFF);
    }

    #[test]
    fn change_scene_restores_normal() {
        let mut bed = TestBed::new(world());
        bed.world.game_state = GameState::Cutscene;
        let mut change = Action::new(ActionKind::ChangeScene { scene: SceneId(5) });
        change.run(&mut bed.ctx());
        assert_eq!(bed.world.scenes.current, SceneId(5));
        assert_eq!(bed.world.scenes.previous, Some(SceneId(1)));
        assert_eq!(bed.world.game_state, GameState::Normal);
    }

    #[test]
    fn player_lock_respects_no_change_and_empty_inventory() {
        let mut bed = TestBed::new(WorldState::new());
        bed.world.inventory.is_locked = true;
        bed.world.controls.left_locked = true;
        let mut lock = Action::new(ActionKind::PlayerLock {
            up: LockType::Disabled,
            down: LockType::Disabled,
            left: LockType::NoChange,
            right: LockType::Enabled,
            run: RunLock::AlwaysWalk,
            inventory: LockType::Enabled,
            save: LockType::Disabled,
        });
        lock.run(&mut bed.ctx());
        let controls = &bed.world.controls;
        assert!(controls.up_locked && controls.down_locked && controls.left_locked);
        assert!(!controls.right_locked);
        assert!(controls.save_locked);
        assert_eq!(controls.run_lock, RunLock::AlwaysWalk);
        // Nothing to use, so the inventory stays locked.
        assert!(bed.world.inventory.is_locked);
    }

    #[test]
    fn negative_timescale_ignored() {
        let mut bed = TestBed::new(world());
        Action::new(ActionKind::Timescale { scale: 0.5 }).run(&mut bed.ctx());
        Action::new(ActionKind::Timescale { scale: -1.0 }).run(&mut bed.ctx());
        assert!((bed.world.controls.time_scale - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn actions_deserialize_flat() {
        let action: Action = serde_json::from_str(
            r#"{"action": "check_variable", "variable": 0,
                "check": {"integer": {"condition": "less_than", "value": 3}},
                "outcome": {"on_true": {"skip": 2}}}"#,
        )
        .unwrap();
        assert_eq!(action.kind.name(), "check variable");
        assert_eq!(
            action.kind.branch().map(|b| b.on_true),
            Some(ResultAction::Skip(2))
        );
        let action: Action =
            serde_json::from_str(r#"{"action": "wait", "seconds": 1.5, "end": "stop"}"#).unwrap();
        assert_eq!(action.end, ResultAction::Stop);
    }
}
