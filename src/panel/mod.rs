//! The control panel: one document, the channel registry, the alert queue,
//! the error log and the command channel, owned together.
//!
//! Host pushes come in through [`Panel::apply`], user events through
//! [`Panel::dispatch`], frames through [`Panel::tick`]. Everything runs on
//! the thread that owns the panel.

pub mod actions;
pub mod channels;
pub mod markup;

use crate::config::PanelConfig;
use crate::host::HostMessage;
use actions::UiAction;
use channels::ChannelRegistry;
use deck_bridge::{Command, CommandChannel, Threshold};
use deck_dom::{Dom, DomError, EventKind, Fired, InsertPosition, MemoryDom, ROOT_ID};
use deck_notify::{Dismiss, ErrorLog, NotificationStore};
use log::{debug, info, warn};
use markup::{ALERTS_ID, CHANNELS_ID, ERRORS_ID};

pub struct Panel {
    dom: MemoryDom<UiAction>,
    channels: ChannelRegistry,
    alerts: NotificationStore,
    errors: ErrorLog,
    commands: CommandChannel,
}

/// Slider and selector values arrive as strings; volumes may be fractional.
fn parse_volume(raw: &str) -> Option<u8> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 100.0) as u8)
}

impl Panel {
    /// Build the shell document and wire the menu bar.
    pub fn new(config: &PanelConfig, commands: CommandChannel) -> Result<Self, DomError> {
        let mut dom: MemoryDom<UiAction> = MemoryDom::new();
        for node in markup::shell() {
            dom.insert(ROOT_ID, InsertPosition::BeforeEnd, node)?;
        }
        for action in deck_bridge::MenuAction::ALL {
            dom.listen(
                &markup::menu_button_id(action),
                EventKind::Click,
                UiAction::Menu(action),
            );
        }

        Ok(Self {
            dom,
            channels: ChannelRegistry::new(CHANNELS_ID, config.slider_binding),
            alerts: NotificationStore::new(ALERTS_ID, config.alerts.clone()),
            errors: ErrorLog::new(ERRORS_ID),
            commands,
        })
    }

    pub fn dom(&self) -> &MemoryDom<UiAction> {
        &self.dom
    }

    pub fn channels(&self) -> &ChannelRegistry {
        &self.channels
    }

    pub fn alerts(&self) -> &NotificationStore {
        &self.alerts
    }

    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    // === Host pushes ===

    pub fn add_channel(&mut self, name: &str) -> bool {
        self.channels.add_channel(&mut self.dom, name)
    }

    pub fn remove_channel(&mut self, name: &str) -> bool {
        self.channels.remove_channel(&mut self.dom, name)
    }

    pub fn set_volume(&mut self, name: &str, value: f64) -> bool {
        let value = if value.is_finite() {
            value.clamp(0.0, 100.0) as u8
        } else {
            warn!("Ignoring non-finite volume for '{}'", name);
            return false;
        };
        self.channels.set_volume(&mut self.dom, name, value)
    }

    pub fn set_paused(&mut self, name: &str, paused: bool) -> bool {
        self.channels.set_paused(&mut self.dom, name, paused)
    }

    pub fn clear_channels(&mut self) {
        self.channels.clear(&mut self.dom);
    }

    pub fn add_alert(&mut self, name: &str, color: &str, text: &str) {
        self.alerts.upsert(&mut self.dom, name, color, text);
    }

    pub fn remove_alert(&mut self, name: &str) -> bool {
        self.alerts.remove(&mut self.dom, name)
    }

    pub fn add_error(&mut self, name: &str, text: &str) -> String {
        self.errors.append(&mut self.dom, name, text)
    }

    pub fn remove_error(&mut self, id: &str) -> bool {
        self.errors.remove(&mut self.dom, id)
    }

    /// Swap a "loading" alert for its "loaded" counterpart.
    fn replace_alert(&mut self, loading: &str, loaded: &str, text: &str) {
        self.remove_alert(loading);
        self.add_alert(loaded, "green", text);
    }

    pub fn apply(&mut self, message: HostMessage) {
        debug!("<- host: {:?}", message);
        match message {
            HostMessage::AddChannel { name } => {
                self.add_channel(&name);
            }
            HostMessage::RemoveChannel { name } => {
                self.remove_channel(&name);
            }
            HostMessage::SetVolume { name, value } => {
                self.set_volume(&name, value);
            }
            HostMessage::SetPaused { name, paused } => {
                self.set_paused(&name, paused);
            }
            HostMessage::ClearChannels => self.clear_channels(),
            HostMessage::AddAlert { name, color, text } => self.add_alert(&name, &color, &text),
            HostMessage::RemoveAlert { name } => {
                self.remove_alert(&name);
            }
            HostMessage::AddError { name, text } => {
                self.add_error(&name, &text);
            }
            HostMessage::RemoveError { id } => {
                self.remove_error(&id);
            }
            HostMessage::LoadedSoundpack { channels } => {
                self.clear_channels();
                for name in &channels {
                    self.add_channel(name);
                }
                info!("Soundpack loaded with {} channels", self.channels.len());
                self.replace_alert("loading_soundpack", "soundpack_loaded", "&#x2714; Soundpack loaded!");
            }
            HostMessage::LoadedVolumeSettings { entries } => {
                for (name, value) in entries {
                    self.set_volume(&name, value);
                }
            }
            HostMessage::LoadedGamelog => {
                self.replace_alert("loading_gamelog", "gamelog_loaded", "&#x2714; Gamelog loaded!");
            }
            HostMessage::LoadedIgnoreList => {
                self.replace_alert("loading_ignore", "ignore_loaded", "&#x2714; Ignore list loaded!");
            }
            HostMessage::ChannelWasPlayPaused { name, paused } => {
                self.set_paused(&name, paused);
            }
            HostMessage::SoundThreadPanicked { name, text } => {
                warn!("Sound thread failed: {}", text);
                self.clear_channels();
                self.add_error(&name, &text);
            }
            HostMessage::Input { target, event, value } => match EventKind::from_str(&event) {
                Some(kind) => self.dispatch(&target, kind, value.as_deref()),
                None => {
                    warn!("Unknown event '{}' for '{}'", event, target);
                    self.add_error(
                        "Webview Error",
                        &format!("Unimplemented webview event: {}", event),
                    );
                }
            },
        }
    }

    // === User events ===

    /// Deliver a user event to the document and act on whatever it fires.
    pub fn dispatch(&mut self, target: &str, kind: EventKind, value: Option<&str>) {
        let fired = self.dom.dispatch(target, kind, value);
        for f in fired {
            self.route(f);
        }
    }

    fn route(&mut self, fired: Fired<UiAction>) {
        let Fired { action, value } = fired;
        match action {
            UiAction::Volume(channel) => {
                let Some(volume) = value.as_deref().and_then(parse_volume) else {
                    warn!("Bad slider value {:?} for '{}'", value, channel);
                    return;
                };
                self.channels.note_volume_input(&channel, volume);
                self.commands.send(&Command::ChangeVolume {
                    channel,
                    value: volume,
                });
            }
            UiAction::Threshold(channel) => {
                let threshold = value
                    .as_deref()
                    .and_then(|v| v.trim().parse::<u8>().ok())
                    .and_then(Threshold::from_level);
                let Some(threshold) = threshold else {
                    warn!("Bad threshold {:?} for '{}'", value, channel);
                    return;
                };
                self.channels.note_threshold_input(&channel, threshold);
                self.commands
                    .send(&Command::ChangeThreshold { channel, threshold });
            }
            UiAction::Skip(channel) => {
                self.commands.send(&Command::SkipCurrentSound { channel });
            }
            UiAction::PlayPause(channel) => {
                self.commands.send(&Command::PlayPause { channel });
            }
            UiAction::Menu(action) => self.commands.send(&Command::Menu(action)),
            UiAction::Dismiss(Dismiss::Alert(name)) => {
                self.alerts.remove(&mut self.dom, &name);
            }
            UiAction::Dismiss(Dismiss::Error(id)) => {
                self.errors.remove(&mut self.dom, &id);
            }
        }
    }

    // === Frames ===

    pub fn tick(&mut self, delta_secs: f64) {
        self.alerts.tick(&mut self.dom, delta_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::markup::ChannelIds;
    use deck_bridge::{MenuAction, RecordingBridge, SliderBinding};
    use deck_notify::{alert_id, close_id};

    fn panel_with(config: PanelConfig) -> (Panel, RecordingBridge) {
        let bridge = RecordingBridge::new();
        let panel = Panel::new(&config, CommandChannel::new(bridge.clone())).unwrap();
        (panel, bridge)
    }

    fn panel() -> (Panel, RecordingBridge) {
        panel_with(PanelConfig::default())
    }

    #[test]
    fn test_host_push_does_not_echo() {
        let (mut panel, bridge) = panel();
        panel.add_channel("bass");
        assert!(panel.set_volume("bass", 42.0));

        assert_eq!(panel.dom().value(&ChannelIds::new("bass").slider).as_deref(), Some("42"));
        assert!(bridge.sent().is_empty());
    }

    #[test]
    fn test_user_drag_emits_exactly_one_command() {
        let (mut panel, bridge) = panel();
        panel.add_channel("bass");
        panel.dispatch(&ChannelIds::new("bass").slider, EventKind::Input, Some("42"));

        assert_eq!(bridge.sent(), vec!["change_volume:bass:42"]);
        assert_eq!(panel.channels().get("bass").unwrap().volume, 42);
        assert_eq!(panel.dom().value(&ChannelIds::new("bass").slider).as_deref(), Some("42"));
    }

    #[test]
    fn test_commit_binding_reports_only_on_change() {
        let (mut panel, bridge) = panel_with(PanelConfig {
            slider_binding: SliderBinding::Commit,
            ..PanelConfig::default()
        });
        panel.add_channel("bass");
        panel.dispatch(&ChannelIds::new("bass").slider, EventKind::Input, Some("30"));
        panel.dispatch(&ChannelIds::new("bass").slider, EventKind::Input, Some("31"));
        panel.dispatch(&ChannelIds::new("bass").slider, EventKind::Change, Some("31"));

        assert_eq!(bridge.sent(), vec!["change_volume:bass:31"]);
    }

    #[test]
    fn test_buttons_and_selector_emit_commands() {
        let (mut panel, bridge) = panel();
        panel.add_channel("weather");
        let ids = ChannelIds::new("weather");

        panel.dispatch(&ids.skip, EventKind::Click, None);
        panel.dispatch(&ids.play_pause, EventKind::Click, None);
        panel.dispatch(&ids.selector, EventKind::Change, Some("1"));
        panel.dispatch(&markup::menu_button_id(MenuAction::LoadGamelog), EventKind::Click, None);

        assert_eq!(
            bridge.sent(),
            vec![
                "skip_current_sound:weather",
                "play_pause:weather",
                "change_threshold:weather:1",
                "load_gamelog",
            ]
        );
        assert_eq!(panel.channels().get("weather").unwrap().threshold, Threshold::Critical);
    }

    #[test]
    fn test_bad_input_values_are_dropped() {
        let (mut panel, bridge) = panel();
        panel.add_channel("bass");
        panel.dispatch(&ChannelIds::new("bass").slider, EventKind::Input, Some("loud"));
        panel.dispatch(&ChannelIds::new("bass").selector, EventKind::Change, Some("9"));
        assert!(bridge.sent().is_empty());
    }

    #[test]
    fn test_clear_then_push_is_noop() {
        let (mut panel, bridge) = panel();
        panel.add_channel("bass");
        panel.add_channel("treble");
        panel.clear_channels();

        assert_eq!(panel.channels().len(), 0);
        assert!(!panel.set_volume("bass", 10.0));
        assert!(bridge.sent().is_empty());
    }

    #[test]
    fn test_dismiss_clicks_route_back_to_stores() {
        let (mut panel, bridge) = panel();
        panel.add_alert("set_default_paths", "green", "Default paths set.");
        let first = panel.add_error("device-error", "No output device");
        let second = panel.add_error("device-error", "No output device");

        panel.dispatch(&close_id(&alert_id("set_default_paths")), EventKind::Click, None);
        panel.dispatch(&close_id(&first), EventKind::Click, None);

        assert!(panel.alerts().is_empty());
        assert_eq!(panel.errors().len(), 1);
        assert!(panel.errors().contains(&second));
        assert!(bridge.sent().is_empty());
    }

    #[test]
    fn test_frame_ticks_decay_alerts() {
        let (mut panel, _) = panel();
        panel.add_alert("low-battery", "red", "Battery low");
        panel.tick(3.0);
        panel.tick(0.6);
        assert!((panel.dom().opacity(&alert_id("low-battery")).unwrap() - 0.4).abs() < 1e-9);
        panel.tick(0.5);
        assert!(!panel.alerts().contains("low-battery"));
    }

    #[test]
    fn test_loaded_soundpack_rebuilds_channels_and_swaps_alert() {
        let (mut panel, _) = panel();
        panel.add_channel("old");
        panel.add_alert("loading_soundpack", "blue", "&#x231B; Loading soundpack...");

        panel.apply(HostMessage::LoadedSoundpack {
            channels: vec!["music".into(), "weather".into(), "music".into()],
        });

        assert_eq!(panel.channels().names().collect::<Vec<_>>(), vec!["music", "weather"]);
        assert!(!panel.alerts().contains("loading_soundpack"));
        assert!(panel.alerts().contains("soundpack_loaded"));
    }

    #[test]
    fn test_volume_settings_and_play_pause_pushes() {
        let (mut panel, bridge) = panel();
        panel.apply(HostMessage::LoadedSoundpack { channels: vec!["music".into()] });
        panel.apply(HostMessage::LoadedVolumeSettings {
            entries: vec![("music".into(), 35.7), ("missing".into(), 10.0)],
        });
        panel.apply(HostMessage::ChannelWasPlayPaused { name: "music".into(), paused: true });

        assert_eq!(panel.dom().value(&ChannelIds::new("music").slider).as_deref(), Some("35"));
        assert!(panel.dom().has_class(&ChannelIds::new("music").head, "w3-opacity-max"));
        assert!(bridge.sent().is_empty());
    }

    #[test]
    fn test_sound_thread_panic_clears_and_reports() {
        let (mut panel, _) = panel();
        panel.apply(HostMessage::LoadedSoundpack { channels: vec!["music".into()] });
        panel.apply(HostMessage::SoundThreadPanicked {
            name: "Sound thread panicked".into(),
            text: "No output device".into(),
        });

        assert!(panel.channels().is_empty());
        assert_eq!(panel.errors().entries()[0].text, "No output device");
    }

    #[test]
    fn test_replayed_input_and_unknown_events() {
        let (mut panel, bridge) = panel();
        panel.apply(HostMessage::AddChannel { name: "combat".into() });
        panel.apply(HostMessage::Input {
            target: ChannelIds::new("combat").skip,
            event: "click".into(),
            value: None,
        });
        panel.apply(HostMessage::Input {
            target: ChannelIds::new("combat").skip,
            event: "hover".into(),
            value: None,
        });

        assert_eq!(bridge.sent(), vec!["skip_current_sound:combat"]);
        assert_eq!(panel.errors().entries()[0].name, "Webview Error");
    }

    #[test]
    fn test_alert_and_channel_ids_do_not_collide() {
        let (mut panel, bridge) = panel();
        panel.add_alert("slider", "blue", "x");
        assert!(panel.add_channel("alert"));
        panel.add_alert("alert", "blue", "x");

        assert_eq!(panel.alerts().len(), 2);
        panel.dispatch(&ChannelIds::new("alert").slider, EventKind::Input, Some("12"));
        assert_eq!(bridge.sent(), vec!["change_volume:alert:12"]);
        assert!(panel.alerts().contains("slider"));
    }

    #[test]
    fn test_host_removals_by_name_and_id() {
        let (mut panel, _) = panel();
        panel.apply(HostMessage::AddAlert {
            name: "loading_gamelog".into(),
            color: "blue".into(),
            text: "Loading gamelog...".into(),
        });
        let first = panel.add_error("device-error", "No output device");
        let second = panel.add_error("device-error", "No output device");

        panel.apply(HostMessage::RemoveAlert { name: "loading_gamelog".into() });
        panel.apply(HostMessage::RemoveError { id: first.clone() });
        // Repeats and unknown ids are no-ops.
        panel.apply(HostMessage::RemoveError { id: first.clone() });
        panel.apply(HostMessage::RemoveAlert { name: "never_shown".into() });

        assert!(panel.alerts().is_empty());
        assert!(!panel.dom().contains(&alert_id("loading_gamelog")));
        assert_eq!(panel.errors().len(), 1);
        assert!(panel.errors().contains(&second));
        assert!(!panel.dom().contains(&first));
        assert!(panel.dom().contains(&second));
    }

    #[test]
    fn test_shell_has_all_containers() {
        let (panel, _) = panel();
        let top = panel.dom().child_ids(ROOT_ID);
        assert_eq!(top, vec![markup::MENU_ID, CHANNELS_ID, ERRORS_ID, ALERTS_ID]);
    }
}
