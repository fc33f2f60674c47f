//! Scenario files: a world, its scripts, and the host input to replay against them.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use regie_core::{ActionListId, WorldState};
use regie_script::{
    ActionList, Conversation, Director, DirectorConfig, ScriptResult, TimedStage,
};
use serde::Deserialize;

/// Everything needed to build and drive a director.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub world: WorldState,
    #[serde(default)]
    pub stage: StageSpec,
    #[serde(default)]
    pub lists: Vec<ActionList>,
    #[serde(default)]
    pub conversations: Vec<Conversation>,
    #[serde(default)]
    pub input: Vec<InputStep>,
}

/// Durations for the headless stage.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StageSpec {
    /// Seconds each named effect lasts; unnamed effects are instant.
    #[serde(default)]
    pub effects: BTreeMap<String, f32>,
    #[serde(default)]
    pub speech_duration: f32,
    /// Scene objects that accept messages. Omitted means all of them.
    #[serde(default)]
    pub objects: Option<Vec<String>>,
}

impl StageSpec {
    fn build(&self) -> TimedStage {
        let mut stage = self
            .effects
            .iter()
            .fold(TimedStage::new(), |stage, (effect, seconds)| {
                stage.with_effect_duration(effect.clone(), *seconds)
            })
            .with_speech_duration(self.speech_duration);
        if let Some(objects) = &self.objects {
            stage = stage.with_objects(objects.iter().cloned());
        }
        stage
    }
}

/// A host action applied once the run reaches `at` seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct InputStep {
    pub at: f32,
    #[serde(flatten)]
    pub command: HostCommand,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum HostCommand {
    Interact { list: ActionListId },
    Activate { list: ActionListId },
    Choose { slot: usize },
    Pause,
    Resume,
    Kill { list: ActionListId },
    KillRunning,
}

impl HostCommand {
    /// The list the command refers to, if any.
    pub fn list(&self) -> Option<ActionListId> {
        match self {
            Self::Interact { list } | Self::Activate { list } | Self::Kill { list } => Some(*list),
            _ => None,
        }
    }

    pub fn apply(&self, director: &mut Director) -> ScriptResult<()> {
        match self {
            Self::Interact { list } => {
                director.interact(*list)?;
            }
            Self::Activate { list } => {
                director.activate(*list)?;
            }
            Self::Choose { slot } => {
                director.choose(*slot)?;
            }
            Self::Pause => director.set_paused(true),
            Self::Resume => director.set_paused(false),
            Self::Kill { list } => {
                director.kill(*list)?;
            }
            Self::KillRunning => {
                director.kill_running();
            }
        }
        Ok(())
    }
}

impl fmt::Display for HostCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interact { list } => write!(f, "interact {list}"),
            Self::Activate { list } => write!(f, "activate {list}"),
            Self::Choose { slot } => write!(f, "choose slot {slot}"),
            Self::Pause => write!(f, "pause"),
            Self::Resume => write!(f, "resume"),
            Self::Kill { list } => write!(f, "kill {list}"),
            Self::KillRunning => write!(f, "kill running lists"),
        }
    }
}

impl Scenario {
    /// Read and parse a scenario file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        let mut scenario: Scenario = serde_json::from_str(&text)
            .map_err(|e| format!("invalid scenario {}: {e}", path.display()))?;
        if scenario.name.is_empty() {
            scenario.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        scenario.input.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(scenario)
    }

    /// Build a director holding the scenario's world, stage, lists, and conversations.
    pub fn director(&self, config: DirectorConfig) -> Director {
        let mut director =
            Director::new(self.world.clone(), config).with_stage(self.stage.build());
        for list in &self.lists {
            director.add_list(list.clone());
        }
        for conversation in &self.conversations {
            director.add_conversation(conversation.clone());
        }
        director
    }
}
