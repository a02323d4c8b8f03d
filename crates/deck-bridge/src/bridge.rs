//! Host bindings behind the command channel.

use crate::command::Command;
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Transport for command strings. Delivery is fire-and-forget: no
/// acknowledgement, no retry, no error surfaced to the caller.
pub trait HostBridge {
    fn deliver(&self, message: &str);
}

/// Host exposes one global invocation function taking a string.
pub struct InvokeBridge<F: Fn(&str)> {
    invoke: F,
}

impl<F: Fn(&str)> InvokeBridge<F> {
    pub fn new(invoke: F) -> Self {
        Self { invoke }
    }
}

impl<F: Fn(&str)> HostBridge for InvokeBridge<F> {
    fn deliver(&self, message: &str) {
        (self.invoke)(message);
    }
}

/// Structured message object posted to a named host handler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostEnvelope {
    pub handler: String,
    pub body: String,
}

/// Host requires a structured message delivered through a named handler.
/// `post` receives the JSON encoded [`HostEnvelope`].
pub struct MessageHandlerBridge<F: Fn(&str)> {
    handler: String,
    post: F,
}

impl<F: Fn(&str)> MessageHandlerBridge<F> {
    pub fn new(handler: impl Into<String>, post: F) -> Self {
        Self {
            handler: handler.into(),
            post,
        }
    }
}

impl<F: Fn(&str)> HostBridge for MessageHandlerBridge<F> {
    fn deliver(&self, message: &str) {
        let envelope = HostEnvelope {
            handler: self.handler.clone(),
            body: message.to_string(),
        };
        match serde_json::to_string(&envelope) {
            Ok(json) => (self.post)(&json),
            Err(e) => error!("Failed to encode message for handler '{}': {}", self.handler, e),
        }
    }
}

/// Keeps every delivered message in memory. Clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct RecordingBridge {
    sent: Rc<RefCell<Vec<String>>>,
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages delivered so far, oldest first.
    pub fn sent(&self) -> Vec<String> {
        self.sent.borrow().clone()
    }

    /// Drain the log.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.sent.borrow_mut())
    }
}

impl HostBridge for RecordingBridge {
    fn deliver(&self, message: &str) {
        self.sent.borrow_mut().push(message.to_string());
    }
}

/// Which binding the hosting shell provides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BridgeKind {
    #[default]
    Invoke,
    MessageHandler,
}

/// When slider moves are reported. Decided by the hosting shell at startup;
/// some embedded engines only deliver committed values reliably.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderBinding {
    /// Every intermediate value while dragging.
    #[default]
    Continuous,
    /// Only the value the user lets go at.
    Commit,
}

/// Outbound-only command transport.
pub struct CommandChannel {
    bridge: Box<dyn HostBridge>,
}

impl CommandChannel {
    pub fn new<B: HostBridge + 'static>(bridge: B) -> Self {
        Self {
            bridge: Box::new(bridge),
        }
    }

    /// Format `command` and hand it to the host.
    pub fn send(&self, command: &Command) {
        self.send_message(&command.to_string());
    }

    /// Hand a literal message to the host.
    pub fn send_message(&self, message: &str) {
        debug!("-> host: {}", message);
        self.bridge.deliver(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::MenuAction;

    #[test]
    fn test_invoke_bridge_passes_literal_string() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let channel = CommandChannel::new(InvokeBridge::new(move |m: &str| {
            sink.borrow_mut().push(m.to_string())
        }));

        channel.send(&Command::PlayPause { channel: "music".into() });
        channel.send(&Command::Menu(MenuAction::ShowAbout));

        assert_eq!(*seen.borrow(), vec!["play_pause:music", "show_about"]);
    }

    #[test]
    fn test_message_handler_bridge_wraps_in_envelope() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let channel = CommandChannel::new(MessageHandlerBridge::new("external", move |m: &str| {
            sink.borrow_mut().push(m.to_string())
        }));

        channel.send(&Command::SkipCurrentSound { channel: "weather".into() });

        let posted = seen.borrow();
        assert_eq!(posted.len(), 1);
        let envelope: HostEnvelope = serde_json::from_str(&posted[0]).unwrap();
        assert_eq!(
            envelope,
            HostEnvelope {
                handler: "external".into(),
                body: "skip_current_sound:weather".into(),
            }
        );
    }

    #[test]
    fn test_recording_bridge_clones_share_log() {
        let bridge = RecordingBridge::new();
        let channel = CommandChannel::new(bridge.clone());
        channel.send_message("load_soundpack");

        assert_eq!(bridge.sent(), vec!["load_soundpack"]);
        assert_eq!(bridge.take(), vec!["load_soundpack"]);
        assert!(bridge.sent().is_empty());
    }

    #[test]
    fn test_config_enums_deserialize_snake_case() {
        let kind: BridgeKind = serde_json::from_str("\"message_handler\"").unwrap();
        assert_eq!(kind, BridgeKind::MessageHandler);
        let binding: SliderBinding = serde_json::from_str("\"commit\"").unwrap();
        assert_eq!(binding, SliderBinding::Commit);
        assert_eq!(SliderBinding::default(), SliderBinding::Continuous);
    }
}
