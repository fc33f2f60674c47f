use serde::{Deserialize, Serialize};

use crate::id::SceneId;

/// Tracks which scene is loaded and which one the player came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneTracker {
    /// The scene currently loaded.
    pub current: SceneId,
    /// The scene loaded before the current one.
    #[serde(default)]
    pub previous: Option<SceneId>,
}

impl SceneTracker {
    /// Start in the given scene with no history.
    pub fn starting_in(scene: SceneId) -> Self {
        Self {
            current: scene,
            previous: None,
        }
    }

    /// Move to another scene. The current scene becomes the previous one.
    pub fn change_to(&mut self, scene: SceneId) {
        self.previous = Some(self.current);
        self.current = scene;
    }
}
