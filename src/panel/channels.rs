//! Channel control groups and the host/UI sync rules.
//!
//! User input is mirrored into the entry and sent to the host; host pushes
//! overwrite the display and never echo back as commands.

use crate::panel::actions::UiAction;
use crate::panel::markup::{self, ChannelIds};
use deck_bridge::{SliderBinding, Threshold};
use deck_dom::{Dom, EventKind, InsertPosition};
use indexmap::IndexMap;
use log::{debug, error, warn};

const PAUSED_CLASS: &str = "w3-opacity-max";
const DEFAULT_VOLUME: u8 = 100;

/// What the panel currently shows for one channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelEntry {
    pub name: String,
    pub volume: u8,
    pub paused: bool,
    pub threshold: Threshold,
}

pub struct ChannelRegistry {
    container: String,
    binding: SliderBinding,
    entries: IndexMap<String, ChannelEntry>,
}

fn slider_event(binding: SliderBinding) -> EventKind {
    match binding {
        SliderBinding::Continuous => EventKind::Input,
        SliderBinding::Commit => EventKind::Change,
    }
}

impl ChannelRegistry {
    pub fn new(container: impl Into<String>, binding: SliderBinding) -> Self {
        Self {
            container: container.into(),
            binding,
            entries: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&ChannelEntry> {
        self.entries.get(name)
    }

    /// Channel names in the order they were added.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Render and wire a control group. Returns false, rendering nothing,
    /// for duplicate names and names the command grammar cannot carry.
    pub fn add_channel<D>(&mut self, dom: &mut D, name: &str) -> bool
    where
        D: Dom<UiAction> + ?Sized,
    {
        if name.is_empty() || name.contains(':') {
            warn!("Rejecting channel name '{}'", name);
            return false;
        }
        if self.entries.contains_key(name) {
            debug!("Channel '{}' already has a control group", name);
            return false;
        }

        let row = markup::channel_row(name, DEFAULT_VOLUME, Threshold::default());
        if let Err(e) = dom.insert(&self.container, InsertPosition::BeforeEnd, row) {
            error!("Failed to render channel '{}': {}", name, e);
            return false;
        }

        let ids = ChannelIds::new(name);
        let owned = name.to_string();
        dom.listen(
            &ids.slider,
            slider_event(self.binding),
            UiAction::Volume(owned.clone()),
        );
        dom.listen(&ids.skip, EventKind::Click, UiAction::Skip(owned.clone()));
        dom.listen(
            &ids.play_pause,
            EventKind::Click,
            UiAction::PlayPause(owned.clone()),
        );
        dom.listen(
            &ids.selector,
            EventKind::Change,
            UiAction::Threshold(owned.clone()),
        );

        self.entries.insert(
            owned.clone(),
            ChannelEntry {
                name: owned,
                volume: DEFAULT_VOLUME,
                paused: false,
                threshold: Threshold::default(),
            },
        );
        true
    }

    pub fn remove_channel<D>(&mut self, dom: &mut D, name: &str) -> bool
    where
        D: Dom<UiAction> + ?Sized,
    {
        if self.entries.shift_remove(name).is_none() {
            debug!("remove_channel: no channel '{}'", name);
            return false;
        }
        dom.remove(&ChannelIds::new(name).row);
        true
    }

    /// Host push: show `value` on the slider without emitting a command.
    pub fn set_volume<D>(&mut self, dom: &mut D, name: &str, value: u8) -> bool
    where
        D: Dom<UiAction> + ?Sized,
    {
        let Some(entry) = self.entries.get_mut(name) else {
            debug!("set_volume: no channel '{}'", name);
            return false;
        };
        let value = value.min(100);
        entry.volume = value;
        dom.set_value(&ChannelIds::new(name).slider, &value.to_string());
        true
    }

    /// Host push: dim (or undim) the channel head and slider.
    pub fn set_paused<D>(&mut self, dom: &mut D, name: &str, paused: bool) -> bool
    where
        D: Dom<UiAction> + ?Sized,
    {
        let Some(entry) = self.entries.get_mut(name) else {
            debug!("set_paused: no channel '{}'", name);
            return false;
        };
        entry.paused = paused;
        let ids = ChannelIds::new(name);
        dom.set_class(&ids.head, PAUSED_CLASS, paused);
        dom.set_class(&ids.slider, PAUSED_CLASS, paused);
        true
    }

    /// Destroy every control group.
    pub fn clear<D>(&mut self, dom: &mut D)
    where
        D: Dom<UiAction> + ?Sized,
    {
        let removed = dom.clear_children(&self.container);
        debug!("Cleared {} channel rows", removed);
        self.entries.clear();
    }

    /// Record a value the user dragged the slider to. The widget already
    /// shows it; only the entry is updated.
    pub fn note_volume_input(&mut self, name: &str, value: u8) {
        if let Some(entry) = self.entries.get_mut(name) {
            entry.volume = value;
        }
    }

    pub fn note_threshold_input(&mut self, name: &str, threshold: Threshold) {
        if let Some(entry) = self.entries.get_mut(name) {
            entry.threshold = threshold;
        }
    }
}
