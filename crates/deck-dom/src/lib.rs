//! deck-dom: Rendering capability for SoundDeck panels
//!
//! The panel never talks to a browser engine directly. It consumes the
//! [`Dom`] trait (create, insert and remove elements, bind events) and ships
//! [`MemoryDom`], a headless implementation used by the shell and by tests.

pub mod error;
pub mod id;
pub mod memory;
pub mod node;

pub use error::DomError;
pub use memory::{Fired, MemoryDom};
pub use node::{InsertPosition, Node};

/// Id of the element every panel container hangs off.
pub const ROOT_ID: &str = "body";

/// Event kinds a panel binds actions to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Fires continuously while a range input is dragged.
    Input,
    /// Fires once a value is committed.
    Change,
    Click,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Input => "input",
            EventKind::Change => "change",
            EventKind::Click => "click",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "input" => Some(EventKind::Input),
            "change" => Some(EventKind::Change),
            "click" => Some(EventKind::Click),
            _ => None,
        }
    }
}

/// Trait every rendering backend must implement.
///
/// `A` is the action type a backend hands back when a bound event fires;
/// the backend stores it opaquely and never interprets it.
/// Lookups by id that miss are reported through the return value, never
/// through a panic.
pub trait Dom<A> {
    /// Insert `node` (and its subtree) into the element with id `parent`.
    fn insert(&mut self, parent: &str, at: InsertPosition, node: Node) -> Result<(), DomError>;

    /// Destroy the element with `id` and its subtree. Returns false if absent.
    fn remove(&mut self, id: &str) -> bool;

    /// Destroy every child of `parent`, returning how many were removed.
    fn clear_children(&mut self, parent: &str) -> usize;

    fn contains(&self, id: &str) -> bool;

    /// Current value of a form element.
    fn value(&self, id: &str) -> Option<String>;

    /// Overwrite a form element's value without firing any bound event.
    fn set_value(&mut self, id: &str, value: &str) -> bool;

    fn set_opacity(&mut self, id: &str, opacity: f64) -> bool;

    /// Add (`enabled`) or remove a class on an element.
    fn set_class(&mut self, id: &str, class: &str, enabled: bool) -> bool;

    /// Bind `action` to `kind` events on the element with `id`.
    fn listen(&mut self, id: &str, kind: EventKind, action: A) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_names_round_trip() {
        for kind in [EventKind::Input, EventKind::Change, EventKind::Click] {
            assert_eq!(EventKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(EventKind::from_str("hover"), None);
    }
}
