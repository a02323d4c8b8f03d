//! Per-channel sound filtering threshold.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which sounds a channel lets through. Lower is stricter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Threshold {
    Nothing = 0,
    Critical = 1,
    Important = 2,
    Fluff = 3,
    #[default]
    Everything = 4,
}

impl Threshold {
    /// Selector order: most permissive first.
    pub const DESCENDING: [Threshold; 5] = [
        Threshold::Everything,
        Threshold::Fluff,
        Threshold::Important,
        Threshold::Critical,
        Threshold::Nothing,
    ];

    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Threshold::Nothing),
            1 => Some(Threshold::Critical),
            2 => Some(Threshold::Important),
            3 => Some(Threshold::Fluff),
            4 => Some(Threshold::Everything),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Threshold::Nothing => "Nothing",
            Threshold::Critical => "Critical",
            Threshold::Important => "Important",
            Threshold::Fluff => "Fluff",
            Threshold::Everything => "Everything",
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

impl TryFrom<u8> for Threshold {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Threshold::from_level(level).ok_or_else(|| format!("threshold level {} out of range 0-4", level))
    }
}

impl From<Threshold> for u8 {
    fn from(threshold: Threshold) -> u8 {
        threshold.level()
    }
}
