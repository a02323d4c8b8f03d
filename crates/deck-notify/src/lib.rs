//! deck-notify: Host-pushed notices for SoundDeck panels.
//!
//! - [`NotificationStore`]: bounded, keyed alerts that fade out and expire,
//!   advanced once per rendered frame
//! - [`ErrorLog`]: unbounded errors that stay until dismissed
//!
//! Both render themselves through a [`deck_dom::Dom`] and bind their close
//! buttons to a [`Dismiss`] action the owner routes back to them.

mod alerts;
mod config;
mod errors;

pub use alerts::{ALERT_SCOPE, Alert, NotificationStore, alert_id};
pub use config::{
    AlertConfig, DEFAULT_ALERT_CAPACITY, DEFAULT_ALERT_LIFETIME_SECS, DEFAULT_FADE_WINDOW_SECS,
};
pub use errors::{ERROR_SCOPE, ErrorEntry, ErrorLog};

/// Close-button action produced by alerts and errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dismiss {
    /// Alert name.
    Alert(String),
    /// Generated error id.
    Error(String),
}

/// Id of the close control inside an alert or error element.
pub fn close_id(element_id: &str) -> String {
    deck_dom::id::part(element_id, "close")
}
