//! Comparisons used by the check actions.

use regie_core::{ItemId, VariableKind, WorldState};
use serde::{Deserialize, Serialize};

use super::result::ResultAction;

/// Integer comparison against an expected value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntCondition {
    /// `actual == expected`
    #[default]
    EqualTo,
    /// `actual != expected`
    NotEqualTo,
    /// `actual < expected`
    LessThan,
    /// `actual > expected`
    MoreThan,
}

impl IntCondition {
    /// Compare `actual` with `expected`.
    pub fn evaluate(self, actual: i64, expected: i64) -> bool {
        match self {
            Self::EqualTo => actual == expected,
            Self::NotEqualTo => actual != expected,
            Self::LessThan => actual < expected,
            Self::MoreThan => actual > expected,
        }
    }
}

/// Equality comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equality {
    /// The values match.
    #[default]
    EqualTo,
    /// The values differ.
    NotEqualTo,
}

impl Equality {
    /// Compare two values.
    pub fn evaluate<T: PartialEq>(self, actual: T, expected: T) -> bool {
        match self {
            Self::EqualTo => actual == expected,
            Self::NotEqualTo => actual != expected,
        }
    }
}

/// What a variable check compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableCheck {
    /// Compare an integer variable.
    Integer {
        /// Comparison.
        #[serde(default)]
        condition: IntCondition,
        /// Expected value.
        value: i32,
    },
    /// Compare a boolean variable.
    Boolean {
        /// Comparison.
        #[serde(default)]
        condition: Equality,
        /// Expected value.
        value: bool,
    },
}

impl VariableCheck {
    /// The variable kind this check is written for.
    pub fn kind(&self) -> VariableKind {
        match self {
            Self::Integer { .. } => VariableKind::Integer,
            Self::Boolean { .. } => VariableKind::Boolean,
        }
    }

    /// Evaluate against a stored variable value.
    pub fn evaluate(&self, stored: i32) -> bool {
        match *self {
            Self::Integer { condition, value } => {
                condition.evaluate(i64::from(stored), i64::from(value))
            }
            Self::Boolean { condition, value } => condition.evaluate(stored > 0, value),
        }
    }
}

/// Comparison applied to a held item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountCheck {
    /// Comparison.
    #[serde(default)]
    pub condition: IntCondition,
    /// Expected count.
    pub value: u32,
}

impl CountCheck {
    /// Evaluate an item count, or "held at all" when no comparison is given.
    pub fn held(check: Option<&CountCheck>, world: &WorldState, item: ItemId) -> bool {
        let count = world.inventory.count(item);
        match check {
            Some(c) => c.condition.evaluate(i64::from(count), i64::from(c.value)),
            None => count > 0,
        }
    }
}

/// The two outcomes of a check action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Taken when the condition holds.
    #[serde(default)]
    pub on_true: ResultAction,
    /// Taken otherwise.
    #[serde(default)]
    pub on_false: ResultAction,
}

impl Branch {
    /// Create a branch.
    pub fn new(on_true: ResultAction, on_false: ResultAction) -> Self {
        Self { on_true, on_false }
    }

    /// The outcome for a condition result.
    pub fn pick(&self, holds: bool) -> &ResultAction {
        if holds { &self.on_true } else { &self.on_false }
    }
}
