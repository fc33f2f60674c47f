//! The world the scripts act on: animation, movement, sound, speech bubbles.
//!
//! The interpreter never touches the scene itself. Every visible effect goes
//! through a [`Stage`], which either finishes it at once or reports it as
//! running until a later [`Stage::poll`] says otherwise.

use std::any::Any;
use std::collections::BTreeMap;

use regie_core::{SceneId, Value};
use serde::{Deserialize, Serialize};

use crate::message::Message;

/// A request for a world effect, such as playing a clip on a character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectCall {
    /// The object the effect applies to.
    pub target: String,
    /// Effect name, e.g. `"play_clip"` or `"move_to"`.
    pub effect: String,
    /// Effect parameters.
    #[serde(default)]
    pub args: Vec<Value>,
}

impl EffectCall {
    /// Create a call without arguments.
    pub fn new(target: impl Into<String>, effect: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            effect: effect.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument.
    pub fn with_arg(mut self, arg: impl Into<Value>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// Whether an effect is still playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectStatus {
    /// Done; scripts need not wait.
    Finished,
    /// Still playing.
    Running,
}

/// The collaborator that carries out world effects for a director.
pub trait Stage: std::fmt::Debug {
    /// Begin an effect.
    fn start(&mut self, call: &EffectCall) -> EffectStatus;

    /// Ask whether an effect started earlier is still playing.
    fn poll(&mut self, _call: &EffectCall) -> EffectStatus {
        EffectStatus::Finished
    }

    /// Display a line of dialogue, replacing any current line.
    fn show_speech(&mut self, _speaker: Option<&str>, _text: &str) {}

    /// Remove the current line of dialogue.
    fn clear_speech(&mut self) {}

    /// Whether a line of dialogue is still on screen.
    fn speech_active(&self) -> bool {
        false
    }

    /// Deliver a message to a scene object. Returns `false` if no such object exists.
    fn send(&mut self, _object: &str, _message: &Message) -> bool {
        false
    }

    /// Called after the scene changed.
    fn scene_changed(&mut self, _from: SceneId, _to: SceneId) {}

    /// Save the game now.
    fn autosave(&mut self) {}

    /// Let scaled time pass.
    fn advance(&mut self, _dt: f32) {}

    /// Support downcasting to concrete types.
    fn as_any(&self) -> &dyn Any;

    /// Support downcasting to concrete types.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A stage with no scene: effects finish instantly and messages go nowhere.
#[derive(Debug, Default)]
pub struct NullStage;

impl Stage for NullStage {
    fn start(&mut self, _call: &EffectCall) -> EffectStatus {
        EffectStatus::Finished
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// One interaction recorded by a [`TimedStage`].
#[derive(Debug, Clone, PartialEq)]
pub enum StageCall {
    /// An effect was started.
    Started(EffectCall),
    /// A line of dialogue was shown.
    Speech {
        /// Who spoke, if anyone.
        speaker: Option<String>,
        /// The line.
        text: String,
    },
    /// The current line was removed.
    SpeechCleared,
    /// A message was delivered to an object.
    Sent {
        /// Object name.
        object: String,
        /// The message.
        message: Message,
    },
    /// The scene changed.
    SceneChanged {
        /// Scene left.
        from: SceneId,
        /// Scene entered.
        to: SceneId,
    },
    /// An autosave was requested.
    Autosave,
}

/// A headless stage where effects and speech last a configured time.
///
/// Effects with no configured duration finish instantly. Every call is
/// recorded so tests and the CLI can inspect what the scripts did.
#[derive(Debug, Default)]
pub struct TimedStage {
    durations: BTreeMap<String, f32>,
    speech_duration: f32,
    running: Vec<(EffectCall, f32)>,
    speech_left: f32,
    objects: Option<Vec<String>>,
    calls: Vec<StageCall>,
}

impl TimedStage {
    /// Create a stage where everything is instant.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every effect with this name last `seconds`.
    pub fn with_effect_duration(mut self, effect: impl Into<String>, seconds: f32) -> Self {
        self.durations.insert(effect.into(), seconds);
        self
    }

    /// Make every line of dialogue stay on screen for `seconds`.
    pub fn with_speech_duration(mut self, seconds: f32) -> Self {
        self.speech_duration = seconds;
        self
    }

    /// Restrict which objects accept messages. By default every object does.
    pub fn with_objects<I, S>(mut self, objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.objects = Some(objects.into_iter().map(Into::into).collect());
        self
    }

    /// Everything the scripts asked of the stage, in order.
    pub fn calls(&self) -> &[StageCall] {
        &self.calls
    }

    /// Number of autosaves requested so far.
    pub fn autosave_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, StageCall::Autosave))
            .count()
    }

    fn same_effect(a: &EffectCall, b: &EffectCall) -> bool {
        a.target == b.target && a.effect == b.effect
    }
}

impl Stage for TimedStage {
    fn start(&mut self, call: &EffectCall) -> EffectStatus {
        self.calls.push(StageCall::Started(call.clone()));
        let duration = self.durations.get(&call.effect).copied().unwrap_or(0.0);
        self.running.retain(|(c, _)| !Self::same_effect(c, call));
        if duration > 0.0 {
            self.running.push((call.clone(), duration));
            EffectStatus::Running
        } else {
            EffectStatus::Finished
        }
    }

    fn poll(&mut self, call: &EffectCall) -> EffectStatus {
        let running = self
            .running
            .iter()
            .any(|(c, left)| Self::same_effect(c, call) && *left > 0.0);
        if running {
            EffectStatus::Running
        } else {
            EffectStatus::Finished
        }
    }

    fn show_speech(&mut self, speaker: Option<&str>, text: &str) {
        self.calls.push(StageCall::Speech {
            speaker: speaker.map(str::to_string),
            text: text.to_string(),
        });
        self.speech_left = self.speech_duration;
    }

    fn clear_speech(&mut self) {
        if self.speech_left > 0.0 {
            self.calls.push(StageCall::SpeechCleared);
        }
        self.speech_left = 0.0;
    }

    fn speech_active(&self) -> bool {
        self.speech_left > 0.0
    }

    fn send(&mut self, object: &str, message: &Message) -> bool {
        let known = self
            .objects
            .as_ref()
            .is_none_or(|objects| objects.iter().any(|o| o == object));
        if known {
            self.calls.push(StageCall::Sent {
                object: object.to_string(),
                message: message.clone(),
            });
        }
        known
    }

    fn scene_changed(&mut self, from: SceneId, to: SceneId) {
        self.calls.push(StageCall::SceneChanged { from, to });
    }

    fn autosave(&mut self) {
        self.calls.push(StageCall::Autosave);
    }

    fn advance(&mut self, dt: f32) {
        for (_, left) in &mut self.running {
            *left -= dt;
        }
        self.running.retain(|(_, left)| *left > 0.0);
        self.speech_left = (self.speech_left - dt).max(0.0);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
