//! Conversations: a set of dialogue options offered to the player.
//!
//! Opening a conversation publishes it as the world's active conversation and
//! switches the game state to dialog options. Only options that are switched
//! on are shown, so the player picks a *slot* among the visible options,
//! which is then mapped back to an option index. A chosen option runs its
//! list after a short delay. A timed conversation picks its default option
//! when the countdown runs out.

use regie_core::{ActionListId, ConversationId, GameState};
use serde::{Deserialize, Serialize};

use crate::context::ScriptContext;
use crate::error::{ScriptError, ScriptResult};
use crate::event::ScriptEventKind;

fn default_on() -> bool {
    true
}

fn default_timer() -> f32 {
    5.0
}

/// One choice in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueOption {
    /// Text shown to the player.
    pub label: String,
    /// Whether the option is shown.
    #[serde(default = "default_on")]
    pub is_on: bool,
    /// Whether scripts may no longer change `is_on`.
    #[serde(default)]
    pub is_locked: bool,
    /// Reopen the conversation when the option's list ends.
    #[serde(default)]
    pub return_to_conversation: bool,
    /// The list to run when chosen.
    #[serde(default)]
    pub list: Option<ActionListId>,
}

impl DialogueOption {
    /// A visible, unlocked option that runs `list`.
    pub fn new(label: impl Into<String>, list: ActionListId) -> Self {
        Self {
            label: label.into(),
            is_on: true,
            is_locked: false,
            return_to_conversation: false,
            list: Some(list),
        }
    }

    /// Reopen the conversation after the option's list.
    pub fn returning(mut self) -> Self {
        self.return_to_conversation = true;
        self
    }

    /// Start hidden.
    pub fn hidden(mut self) -> Self {
        self.is_on = false;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingChoice {
    option: usize,
    remaining: f32,
}

/// A set of dialogue options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Name shown in logs.
    pub name: String,
    /// The options, in display order.
    #[serde(default)]
    pub options: Vec<DialogueOption>,
    /// Pick the default option when the timer runs out.
    #[serde(default)]
    pub timed: bool,
    /// Countdown length in scaled seconds.
    #[serde(default = "default_timer")]
    pub timer: f32,
    /// Option index picked on timeout.
    #[serde(default)]
    pub default_option: Option<usize>,
    #[serde(skip)]
    id: ConversationId,
    #[serde(skip)]
    countdown: Option<f32>,
    #[serde(skip)]
    pending: Option<PendingChoice>,
}

impl Conversation {
    /// Create an untimed conversation.
    pub fn new(name: impl Into<String>, options: Vec<DialogueOption>) -> Self {
        Self {
            name: name.into(),
            options,
            timed: false,
            timer: default_timer(),
            default_option: None,
            id: ConversationId::default(),
            countdown: None,
            pending: None,
        }
    }

    /// Pick `default_option` after `seconds` without a choice.
    pub fn timed(mut self, seconds: f32, default_option: usize) -> Self {
        self.timed = true;
        self.timer = seconds;
        self.default_option = Some(default_option);
        self
    }

    /// The id the director registered this conversation under.
    pub fn id(&self) -> ConversationId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: ConversationId) {
        self.id = id;
    }

    /// Number of visible options.
    pub fn visible_count(&self) -> usize {
        self.options.iter().filter(|o| o.is_on).count()
    }

    /// Map a slot among the visible options to an option index.
    pub fn slot_to_option(&self, slot: usize) -> Option<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_on)
            .nth(slot)
            .map(|(i, _)| i)
    }

    /// Label of the option shown in a slot.
    pub fn option_label(&self, slot: usize) -> Option<&str> {
        self.slot_to_option(slot)
            .map(|i| self.options[i].label.as_str())
    }

    /// Switch an option on or off and set its lock.
    ///
    /// Returns `Ok(false)` without changing anything if the option is locked.
    pub fn set_option(&mut self, index: usize, is_on: bool, is_locked: bool) -> ScriptResult<bool> {
        let len = self.options.len();
        let option = self
            .options
            .get_mut(index)
            .ok_or(ScriptError::OptionOutOfRange { index, len })?;
        if option.is_locked {
            return Ok(false);
        }
        option.is_on = is_on;
        option.is_locked = is_locked;
        Ok(true)
    }

    /// Remove an option's lock.
    pub fn unlock(&mut self, index: usize) -> ScriptResult<()> {
        let len = self.options.len();
        let option = self
            .options
            .get_mut(index)
            .ok_or(ScriptError::OptionOutOfRange { index, len })?;
        option.is_locked = false;
        Ok(())
    }

    /// Whether each option is on.
    pub fn option_states(&self) -> Vec<bool> {
        self.options.iter().map(|o| o.is_on).collect()
    }

    /// Whether each option is locked.
    pub fn option_locks(&self) -> Vec<bool> {
        self.options.iter().map(|o| o.is_locked).collect()
    }

    /// Restore on/off flags, one per option.
    pub fn set_option_states(&mut self, states: &[bool]) -> ScriptResult<()> {
        self.check_len(states.len())?;
        for (option, on) in self.options.iter_mut().zip(states) {
            option.is_on = *on;
        }
        Ok(())
    }

    /// Restore lock flags, one per option.
    pub fn set_option_locks(&mut self, locks: &[bool]) -> ScriptResult<()> {
        self.check_len(locks.len())?;
        for (option, locked) in self.options.iter_mut().zip(locks) {
            option.is_locked = *locked;
        }
        Ok(())
    }

    fn check_len(&self, found: usize) -> ScriptResult<()> {
        if found == self.options.len() {
            Ok(())
        } else {
            Err(ScriptError::StateLengthMismatch {
                expected: self.options.len(),
                found,
            })
        }
    }

    /// Fraction of the countdown left, from 1.0 down to 0.0. `None` when not counting down.
    pub fn time_remaining(&self) -> Option<f32> {
        let left = self.countdown?;
        if self.timer > 0.0 {
            Some((left / self.timer).clamp(0.0, 1.0))
        } else {
            Some(0.0)
        }
    }

    /// Whether a chosen option is waiting to run.
    pub fn has_pending_choice(&self) -> bool {
        self.pending.is_some()
    }

    /// Publish the options, or clear the active conversation if none are visible.
    pub fn open(&mut self, ctx: &mut ScriptContext<'_>) {
        if self.visible_count() == 0 {
            tracing::debug!("{} '{}' has no visible options", self.id, self.name);
            self.countdown = None;
            if ctx.world.active_conversation == Some(self.id) {
                ctx.world.active_conversation = None;
            }
            if ctx.world.game_state.is_scripted() {
                ctx.set_game_state(GameState::Normal);
            }
            ctx.emit(
                ScriptEventKind::ConversationClosed {
                    conversation: self.id,
                },
                format!("{} '{}' closed: nothing to say", self.id, self.name),
            );
            return;
        }
        ctx.world.active_conversation = Some(self.id);
        ctx.set_game_state(GameState::DialogOptions);
        self.countdown = self.timed.then_some(self.timer);
        ctx.emit(
            ScriptEventKind::ConversationOpened {
                conversation: self.id,
            },
            format!(
                "{} '{}' offers {} options",
                self.id,
                self.name,
                self.visible_count()
            ),
        );
    }

    /// Withdraw the options if this conversation is the active one.
    pub fn close(&mut self, ctx: &mut ScriptContext<'_>) {
        self.countdown = None;
        if ctx.world.active_conversation != Some(self.id) {
            return;
        }
        ctx.world.active_conversation = None;
        if ctx.world.game_state == GameState::DialogOptions {
            ctx.set_game_state(GameState::Normal);
        }
        ctx.emit(
            ScriptEventKind::ConversationClosed {
                conversation: self.id,
            },
            format!("{} '{}' closed", self.id, self.name),
        );
    }

    /// Choose the option shown in `slot`. Its list runs after the option delay.
    ///
    /// Returns the option index.
    pub fn choose(&mut self, slot: usize, ctx: &mut ScriptContext<'_>) -> ScriptResult<usize> {
        let option = self
            .slot_to_option(slot)
            .ok_or(ScriptError::InvalidChoice(slot))?;
        if ctx.world.active_conversation == Some(self.id) {
            ctx.world.active_conversation = None;
        }
        self.countdown = None;
        self.pending = Some(PendingChoice {
            option,
            remaining: ctx.config.option_delay,
        });
        ctx.set_game_state(GameState::Cutscene);
        ctx.emit(
            ScriptEventKind::OptionChosen {
                conversation: self.id,
                option,
            },
            format!(
                "{} '{}': chose '{}'",
                self.id, self.name, self.options[option].label
            ),
        );
        Ok(option)
    }

    /// Let `dt` scaled seconds pass. Returns an option whose list should start now.
    pub fn advance(&mut self, dt: f32, ctx: &mut ScriptContext<'_>) -> Option<usize> {
        if let Some(mut pending) = self.pending.take() {
            pending.remaining -= dt;
            if pending.remaining <= 0.0 {
                return Some(pending.option);
            }
            self.pending = Some(pending);
        }

        let left = self.countdown? - dt;
        if left > 0.0 {
            self.countdown = Some(left);
            return None;
        }
        self.countdown = None;
        if ctx.world.active_conversation != Some(self.id) {
            return None;
        }
        let option = self.default_option.filter(|i| *i < self.options.len());
        let Some(option) = option else {
            tracing::warn!("{} '{}' timed out without a default option", self.id, self.name);
            return None;
        };
        ctx.world.active_conversation = None;
        ctx.set_game_state(GameState::Cutscene);
        ctx.emit(
            ScriptEventKind::ConversationTimedOut {
                conversation: self.id,
                option,
            },
            format!(
                "{} '{}' timed out: '{}'",
                self.id, self.name, self.options[option].label
            ),
        );
        Some(option)
    }
}
