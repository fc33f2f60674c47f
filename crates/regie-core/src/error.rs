use crate::id::{ItemId, VariableId};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when manipulating world state.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested variable ID does not exist.
    #[error("variable not found: {0}")]
    VariableNotFound(VariableId),

    /// A variable with the same ID was already registered.
    #[error("variable already exists: {0}")]
    DuplicateVariable(VariableId),

    /// More items were removed than the player holds.
    #[error("not enough of item {item}: have {held}, need {wanted}")]
    NotEnoughItems {
        /// The item being removed.
        item: ItemId,
        /// How many the player holds.
        held: u32,
        /// How many were requested.
        wanted: u32,
    },

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
