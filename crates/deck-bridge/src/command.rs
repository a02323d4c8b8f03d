//! Command grammar shared by the panel and the host.
//!
//! Channel commands are colon-delimited (`verb:channel[:value]`) and the
//! host splits on `:`. Menu commands are bare verbs.

use crate::error::CommandError;
use crate::threshold::Threshold;
use std::fmt;
use std::str::FromStr;

/// Menu bar actions. The host answers these with file dialogs, links
/// or default-file bookkeeping, none of which the panel tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuAction {
    LoadGamelog,
    LoadSoundpack,
    LoadIgnoreList,
    ShowAbout,
    LinkOriginal,
    LinkFork,
    LinkSource,
    SetDefaultPaths,
    SetDefaultVolumes,
    RemoveDefaultPaths,
    RemoveDefaultVolumes,
}

impl MenuAction {
    pub const ALL: [MenuAction; 11] = [
        MenuAction::LoadGamelog,
        MenuAction::LoadSoundpack,
        MenuAction::LoadIgnoreList,
        MenuAction::SetDefaultPaths,
        MenuAction::SetDefaultVolumes,
        MenuAction::RemoveDefaultPaths,
        MenuAction::RemoveDefaultVolumes,
        MenuAction::ShowAbout,
        MenuAction::LinkOriginal,
        MenuAction::LinkFork,
        MenuAction::LinkSource,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuAction::LoadGamelog => "load_gamelog",
            MenuAction::LoadSoundpack => "load_soundpack",
            MenuAction::LoadIgnoreList => "load_ignore_list",
            MenuAction::ShowAbout => "show_about",
            MenuAction::LinkOriginal => "link_original",
            MenuAction::LinkFork => "link_fork",
            MenuAction::LinkSource => "link_source",
            MenuAction::SetDefaultPaths => "set_default_paths",
            MenuAction::SetDefaultVolumes => "set_default_volumes",
            MenuAction::RemoveDefaultPaths => "remove_default_paths",
            MenuAction::RemoveDefaultVolumes => "remove_default_volumes",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        MenuAction::ALL.iter().copied().find(|a| a.as_str() == s)
    }

    /// Button caption.
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::LoadGamelog => "Load gamelog.txt",
            MenuAction::LoadSoundpack => "Load soundpack",
            MenuAction::LoadIgnoreList => "Load ignore.txt",
            MenuAction::ShowAbout => "About",
            MenuAction::LinkOriginal => "Original SoundSense",
            MenuAction::LinkFork => "Soundpack fork",
            MenuAction::LinkSource => "Source code",
            MenuAction::SetDefaultPaths => "Set current paths as default",
            MenuAction::SetDefaultVolumes => "Set current volumes as default",
            MenuAction::RemoveDefaultPaths => "Remove default paths",
            MenuAction::RemoveDefaultVolumes => "Remove default volumes",
        }
    }
}

/// A single UI action sent to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    ChangeVolume { channel: String, value: u8 },
    SkipCurrentSound { channel: String },
    PlayPause { channel: String },
    ChangeThreshold { channel: String, threshold: Threshold },
    Menu(MenuAction),
    /// Free text echoed into the host log.
    TestMessage(String),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::ChangeVolume { channel, value } => {
                write!(f, "change_volume:{}:{}", channel, value)
            }
            Command::SkipCurrentSound { channel } => write!(f, "skip_current_sound:{}", channel),
            Command::PlayPause { channel } => write!(f, "play_pause:{}", channel),
            Command::ChangeThreshold { channel, threshold } => {
                write!(f, "change_threshold:{}:{}", channel, threshold)
            }
            Command::Menu(action) => f.write_str(action.as_str()),
            Command::TestMessage(text) => write!(f, "test_message:{}", text),
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(CommandError::Empty);
        }
        if let Some(action) = MenuAction::from_str(s) {
            return Ok(Command::Menu(action));
        }

        let (verb, rest) = s.split_once(':').unwrap_or((s, ""));
        if verb == "test_message" {
            return Ok(Command::TestMessage(rest.to_string()));
        }

        let fields: Vec<&str> = s.split(':').skip(1).collect();
        let expect = |n: usize| -> Result<(), CommandError> {
            if fields.len() == n {
                Ok(())
            } else {
                Err(CommandError::Arity {
                    verb: verb.to_string(),
                    expected: n,
                    got: fields.len(),
                })
            }
        };
        let channel = |field: &str| -> Result<String, CommandError> {
            if field.is_empty() {
                Err(CommandError::EmptyChannel(s.to_string()))
            } else {
                Ok(field.to_string())
            }
        };

        match verb {
            "change_volume" => {
                expect(2)?;
                Ok(Command::ChangeVolume {
                    channel: channel(fields[0])?,
                    value: parse_volume(verb, fields[1])?,
                })
            }
            "change_threshold" => {
                expect(2)?;
                let threshold = fields[1]
                    .parse::<u8>()
                    .ok()
                    .and_then(Threshold::from_level)
                    .ok_or_else(|| CommandError::InvalidValue {
                        verb: verb.to_string(),
                        value: fields[1].to_string(),
                    })?;
                Ok(Command::ChangeThreshold {
                    channel: channel(fields[0])?,
                    threshold,
                })
            }
            "skip_current_sound" => {
                expect(1)?;
                Ok(Command::SkipCurrentSound {
                    channel: channel(fields[0])?,
                })
            }
            "play_pause" => {
                expect(1)?;
                Ok(Command::PlayPause {
                    channel: channel(fields[0])?,
                })
            }
            _ => Err(CommandError::Unknown(s.to_string())),
        }
    }
}

/// Slider values arrive as numbers that may carry a fraction; they are
/// truncated and clamped to the slider range.
fn parse_volume(verb: &str, raw: &str) -> Result<u8, CommandError> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v.clamp(0.0, 100.0) as u8),
        _ => Err(CommandError::InvalidValue {
            verb: verb.to_string(),
            value: raw.to_string(),
        }),
    }
}
