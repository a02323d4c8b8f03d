//! Error types for deck-bridge

/// Host-side command parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unimplemented command: {0}")]
    Unknown(String),

    #[error("Command '{verb}' expects {expected} field(s), got {got}")]
    Arity {
        verb: String,
        expected: usize,
        got: usize,
    },

    #[error("Invalid value '{value}' for '{verb}'")]
    InvalidValue { verb: String, value: String },

    #[error("Empty channel name in '{0}'")]
    EmptyChannel(String),
}
