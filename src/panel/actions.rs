//! Actions bound to panel elements.
//!
//! The DOM stores these opaquely; `Panel::dispatch` routes whatever a user
//! event fires either to the command channel or back into a store.

use deck_bridge::MenuAction;
use deck_notify::Dismiss;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiAction {
    /// Slider moved; the value comes from the event.
    Volume(String),
    /// Threshold selector changed; the level comes from the event.
    Threshold(String),
    Skip(String),
    PlayPause(String),
    Menu(MenuAction),
    Dismiss(Dismiss),
}

impl From<Dismiss> for UiAction {
    fn from(dismiss: Dismiss) -> Self {
        UiAction::Dismiss(dismiss)
    }
}
