//! App-level view models consumed by host renderers.

use serde::{Deserialize, Serialize};

use crate::{app::PlaybackStatus, orp::OrpSplit, preview::WordLocation, stats::DocumentStats};

/// Color used for the ORP letter.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightColor {
    #[default]
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
}

impl HighlightColor {
    pub const ALL: [Self; 5] = [Self::Red, Self::Orange, Self::Yellow, Self::Green, Self::Blue];

    pub const fn index(self) -> u8 {
        match self {
            Self::Red => 0,
            Self::Orange => 1,
            Self::Yellow => 2,
            Self::Green => 3,
            Self::Blue => 4,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Snapshot of everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct ReaderView<'a> {
    pub status: PlaybackStatus,
    /// Current word split around its ORP letter, `None` before a load.
    pub word: Option<OrpSplit<'a>>,
    /// 1-based position, `0` before a load.
    pub position: usize,
    pub total: usize,
    pub wpm: u16,
    pub highlight: HighlightColor,
    pub theme: Theme,
    pub stats: Option<&'a DocumentStats>,
    /// Where the current word sits in the page preview, when mapped.
    pub location: Option<WordLocation>,
}
