//! Errors shown until the user dismisses them.

use crate::{Dismiss, close_id};
use deck_dom::{Dom, EventKind, InsertPosition, Node, id};
use log::error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorEntry {
    /// Generated element id, unique within one log.
    pub id: String,
    pub name: String,
    pub text: String,
}

/// Errors are not deduplicated, not bounded and never expire.
pub struct ErrorLog {
    container: String,
    entries: Vec<ErrorEntry>,
    next_serial: u64,
}

pub const ERROR_SCOPE: &str = "error";

impl ErrorLog {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            entries: Vec::new(),
            next_serial: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Show a new error at the top of the list and return its id.
    pub fn append<A, D>(&mut self, dom: &mut D, name: &str, text: &str) -> String
    where
        A: From<Dismiss>,
        D: Dom<A> + ?Sized,
    {
        let id = id::part(&id::scoped(ERROR_SCOPE, name), &self.next_serial.to_string());
        self.next_serial += 1;

        let node = Node::new("div")
            .id(id.clone())
            .class("w3-bar w3-animate-bottom w3-red")
            .style("padding: 10px 15px 10px 15px;")
            .child(
                Node::new("span")
                    .id(close_id(&id))
                    .class("w3-closebtn")
                    .html("&times;"),
            )
            .child(Node::new("h3").html(name.to_string()))
            .child(Node::new("p").html(text.to_string()));

        match dom.insert(&self.container, InsertPosition::AfterBegin, node) {
            Ok(()) => {
                dom.listen(
                    &close_id(&id),
                    EventKind::Click,
                    A::from(Dismiss::Error(id.clone())),
                );
                self.entries.push(ErrorEntry {
                    id: id.clone(),
                    name: name.to_string(),
                    text: text.to_string(),
                });
            }
            Err(e) => error!("Failed to render error '{}': {}", name, e),
        }
        id
    }

    /// Remove the entry with exactly this id. Absent ids are ignored.
    pub fn remove<A, D>(&mut self, dom: &mut D, id: &str) -> bool
    where
        D: Dom<A> + ?Sized,
    {
        let Some(pos) = self.entries.iter().position(|e| e.id == id) else {
            return false;
        };
        self.entries.remove(pos);
        dom.remove(id);
        true
    }
}
