//! Project-wide variables.
//!
//! Variables are small integers. Boolean variables store 0 or 1 and every
//! write to them is clamped back into that range.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::id::VariableId;

/// Whether a variable holds a boolean or an integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    /// Stored as 0 (false) or 1 (true).
    #[default]
    Boolean,
    /// Stored as a signed integer.
    Integer,
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "boolean"),
            Self::Integer => write!(f, "integer"),
        }
    }
}

/// A single variable with its current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    /// Stable identifier, independent of list order.
    pub id: VariableId,
    /// Human-readable label.
    #[serde(default)]
    pub label: String,
    /// Boolean or integer.
    #[serde(default)]
    pub kind: VariableKind,
    /// Current value. Booleans are 0 or 1.
    #[serde(default)]
    pub value: i32,
}

impl Variable {
    /// Create a boolean variable initialised to false.
    pub fn boolean(id: VariableId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            kind: VariableKind::Boolean,
            value: 0,
        }
    }

    /// Create an integer variable initialised to zero.
    pub fn integer(id: VariableId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            kind: VariableKind::Integer,
            value: 0,
        }
    }

    /// Set the initial value.
    pub fn with_value(mut self, value: i32) -> Self {
        self.assign(value, false);
        self
    }

    /// The value interpreted as a boolean.
    pub fn as_bool(&self) -> bool {
        self.value > 0
    }

    fn assign(&mut self, value: i32, cumulative: bool) {
        if cumulative {
            self.value = self.value.saturating_add(value);
        } else {
            self.value = value;
        }
        if self.kind == VariableKind::Boolean {
            self.value = i32::from(self.value > 0);
        }
    }
}

/// The runtime copy of all project variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables {
    vars: Vec<Variable>,
}

impl Variables {
    /// Create an empty variable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variable. IDs must be unique.
    pub fn add(&mut self, variable: Variable) -> CoreResult<VariableId> {
        let id = variable.id;
        if self.vars.iter().any(|v| v.id == id) {
            return Err(CoreError::DuplicateVariable(id));
        }
        self.vars.push(variable);
        Ok(id)
    }

    /// Builder-style registration. Duplicate IDs are logged and skipped.
    pub fn with(mut self, variable: Variable) -> Self {
        if let Err(e) = self.add(variable) {
            tracing::warn!("{e}");
        }
        self
    }

    /// Look up a variable.
    pub fn get(&self, id: VariableId) -> Option<&Variable> {
        self.vars.iter().find(|v| v.id == id)
    }

    /// Current value of a variable.
    pub fn value(&self, id: VariableId) -> Option<i32> {
        self.get(id).map(|v| v.value)
    }

    /// Current value of a variable interpreted as a boolean.
    pub fn get_bool(&self, id: VariableId) -> Option<bool> {
        self.get(id).map(Variable::as_bool)
    }

    /// The kind of a variable.
    pub fn kind_of(&self, id: VariableId) -> Option<VariableKind> {
        self.get(id).map(|v| v.kind)
    }

    /// Write a variable. When `cumulative`, the value is added to the current one.
    ///
    /// Returns the stored value after clamping.
    pub fn set_value(&mut self, id: VariableId, value: i32, cumulative: bool) -> CoreResult<i32> {
        let var = self
            .vars
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(CoreError::VariableNotFound(id))?;
        var.assign(value, cumulative);
        Ok(var.value)
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.iter()
    }

    /// Number of registered variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no variables are registered.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
