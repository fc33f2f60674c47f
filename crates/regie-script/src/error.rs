use regie_core::{ActionListId, ConversationId};

/// Result alias for host-facing director operations.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Host API misuse. Problems inside a running script are logged, not returned.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// No action list is registered under this id.
    #[error("action list not found: {0}")]
    UnknownList(ActionListId),

    /// No conversation is registered under this id.
    #[error("conversation not found: {0}")]
    UnknownConversation(ConversationId),

    /// A choice was made while no conversation was offering options.
    #[error("no conversation is active")]
    NoActiveConversation,

    /// The slot does not correspond to a visible option.
    #[error("no visible dialogue option in slot {0}")]
    InvalidChoice(usize),

    /// An option index past the end of the option list.
    #[error("dialogue option {index} out of range ({len} options)")]
    OptionOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of options.
        len: usize,
    },

    /// A restored per-option array does not match the option count.
    #[error("expected {expected} option values, found {found}")]
    StateLengthMismatch {
        /// Number of options in the conversation.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },
}
