//! Host → panel messages.
//!
//! The host pushes state as JSON objects tagged by `"op"`, one per line.
//! Commands travel the other way through `deck_bridge::CommandChannel`.

pub mod stdio;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum HostMessage {
    AddChannel {
        name: String,
    },
    RemoveChannel {
        name: String,
    },
    /// Host volumes are floats; the slider shows them truncated to 0-100.
    SetVolume {
        name: String,
        value: f64,
    },
    SetPaused {
        name: String,
        paused: bool,
    },
    ClearChannels,
    AddAlert {
        name: String,
        color: String,
        text: String,
    },
    RemoveAlert {
        name: String,
    },
    AddError {
        name: String,
        text: String,
    },
    RemoveError {
        id: String,
    },

    // Sound engine lifecycle events
    LoadedSoundpack {
        channels: Vec<String>,
    },
    LoadedVolumeSettings {
        entries: Vec<(String, f64)>,
    },
    LoadedGamelog,
    LoadedIgnoreList,
    ChannelWasPlayPaused {
        name: String,
        paused: bool,
    },
    SoundThreadPanicked {
        name: String,
        text: String,
    },

    /// A user event forwarded by a front end (or replayed by a script).
    Input {
        target: String,
        event: String,
        #[serde(default)]
        value: Option<String>,
    },
}
