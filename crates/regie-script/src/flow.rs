//! Control-flow results and the list cursor.
//!
//! Both have a raw integer form for persistence: a non-negative number is an
//! action index, `-1` means "stopped, restore the game state" and `-2` means
//! "stopped, another script now owns the game state".

use std::fmt;

/// What an action's end step tells its list to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Move on to the following action.
    Continue,
    /// Move to the action at this index.
    Jump(usize),
    /// Stop the list.
    Halt {
        /// Whether the list should hand control back to the player on its way out.
        notify: bool,
    },
}

impl Flow {
    /// Stop and restore normal gameplay.
    pub const STOP: Self = Self::Halt { notify: true };
    /// Stop silently; another script has taken over.
    pub const HAND_OFF: Self = Self::Halt { notify: false };

    /// Raw integer form.
    pub fn as_raw(self) -> i64 {
        match self {
            Self::Continue => 0,
            Self::Jump(index) => index as i64,
            Self::Halt { notify: true } => -1,
            Self::Halt { notify: false } => -2,
        }
    }

    /// Decode the raw integer form. Zero is `Continue`; values below `-1` hand off.
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            0 => Self::Continue,
            -1 => Self::STOP,
            r if r < -1 => Self::HAND_OFF,
            r => Self::Jump(r as usize),
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continue => write!(f, "continue"),
            Self::Jump(index) => write!(f, "jump to {index}"),
            Self::Halt { notify: true } => write!(f, "stop"),
            Self::Halt { notify: false } => write!(f, "hand off"),
        }
    }
}

/// Where a list is: the next action to run, or halted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// The index of the next action to run. May equal the list length once finished.
    At(usize),
    /// The list stopped.
    Halted {
        /// Whether the stop handed control back to the player.
        notify: bool,
    },
}

impl Default for Cursor {
    fn default() -> Self {
        Self::At(0)
    }
}

impl Cursor {
    /// Raw integer form.
    pub fn as_raw(self) -> i64 {
        match self {
            Self::At(index) => index as i64,
            Self::Halted { notify: true } => -1,
            Self::Halted { notify: false } => -2,
        }
    }

    /// Decode the raw integer form.
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            r if r >= 0 => Self::At(r as usize),
            -1 => Self::Halted { notify: true },
            _ => Self::Halted { notify: false },
        }
    }

    /// Whether the cursor sits on an action index. True for a list that ran to
    /// completion too, until it is killed or restarted.
    pub fn is_running(self) -> bool {
        matches!(self, Self::At(_))
    }

    /// Apply an end result.
    pub fn follow(self, flow: Flow) -> Self {
        match flow {
            Flow::Continue => self,
            Flow::Jump(index) => Self::At(index),
            Flow::Halt { notify } => Self::Halted { notify },
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(index) => write!(f, "at {index}"),
            Self::Halted { notify: true } => write!(f, "stopped"),
            Self::Halted { notify: false } => write!(f, "handed off"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_raw_values() {
        assert_eq!(Flow::Continue.as_raw(), 0);
        assert_eq!(Flow::Jump(4).as_raw(), 4);
        assert_eq!(Flow::STOP.as_raw(), -1);
        assert_eq!(Flow::HAND_OFF.as_raw(), -2);
        assert_eq!(Flow::from_raw(-7), Flow::HAND_OFF);
        assert_eq!(Flow::from_raw(3), Flow::Jump(3));
    }

    #[test]
    fn cursor_raw_values() {
        assert_eq!(Cursor::from_raw(-1), Cursor::Halted { notify: true });
        assert_eq!(Cursor::from_raw(-2).as_raw(), -2);
        assert_eq!(Cursor::from_raw(5), Cursor::At(5));
        assert_eq!(Cursor::default(), Cursor::At(0));
    }

    #[test]
    fn running_means_non_negative() {
        for raw in -3..4 {
            assert_eq!(Cursor::from_raw(raw).is_running(), raw > -1);
        }
    }

    #[test]
    fn follow_applies_flow() {
        let at = Cursor::At(3);
        assert_eq!(at.follow(Flow::Continue), at);
        assert_eq!(at.follow(Flow::Jump(0)), Cursor::At(0));
        assert_eq!(at.follow(Flow::HAND_OFF), Cursor::Halted { notify: false });
    }
}
