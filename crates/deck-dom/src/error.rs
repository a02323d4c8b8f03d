//! Error types for deck-dom

/// Rendering backend errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("No element with id '{0}' to insert into")]
    UnknownParent(String),

    #[error("Element id '{0}' is already in use")]
    DuplicateId(String),
}
