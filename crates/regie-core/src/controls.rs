use serde::{Deserialize, Serialize};

/// How a constraint action should change a lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockType {
    /// Allow the input (unlock).
    #[default]
    Enabled,
    /// Block the input (lock).
    Disabled,
    /// Leave the lock as it is.
    NoChange,
}

impl LockType {
    /// Apply this change to a "locked" flag.
    pub fn apply(self, locked: &mut bool) {
        match self {
            Self::Enabled => *locked = false,
            Self::Disabled => *locked = true,
            Self::NoChange => {}
        }
    }
}

/// Constraint on the player's movement speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunLock {
    /// The player chooses between walking and running.
    #[default]
    Free,
    /// The player can only walk.
    AlwaysWalk,
    /// The player can only run.
    AlwaysRun,
    /// Keep the current setting.
    NoChange,
}

/// Player input constraints set by scripts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerControls {
    /// Moving up is blocked.
    #[serde(default)]
    pub up_locked: bool,
    /// Moving down is blocked.
    #[serde(default)]
    pub down_locked: bool,
    /// Moving left is blocked.
    #[serde(default)]
    pub left_locked: bool,
    /// Moving right is blocked.
    #[serde(default)]
    pub right_locked: bool,
    /// Walk/run constraint. Never `NoChange`.
    #[serde(default)]
    pub run_lock: RunLock,
    /// Saving from the pause menu is blocked.
    #[serde(default)]
    pub save_locked: bool,
    /// Multiplier applied to elapsed time. 1.0 is real time.
    #[serde(default = "default_time_scale")]
    pub time_scale: f32,
}

fn default_time_scale() -> f32 {
    1.0
}

impl Default for PlayerControls {
    fn default() -> Self {
        Self {
            up_locked: false,
            down_locked: false,
            left_locked: false,
            right_locked: false,
            run_lock: RunLock::Free,
            save_locked: false,
            time_scale: default_time_scale(),
        }
    }
}

impl PlayerControls {
    /// Whether every movement direction is blocked.
    pub fn movement_locked(&self) -> bool {
        self.up_locked && self.down_locked && self.left_locked && self.right_locked
    }

    /// Change the run constraint. `NoChange` leaves it untouched.
    pub fn set_run_lock(&mut self, lock: RunLock) {
        if lock != RunLock::NoChange {
            self.run_lock = lock;
        }
    }
}
