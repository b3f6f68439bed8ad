use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::time::{deserialize_mmss, format_mmss};

/// Track identifier as it appears in the playlist document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TrackId {
    Number(u64),
    Text(String),
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackId::Number(n) => write!(f, "{n}"),
            TrackId::Text(s) => f.write_str(s),
        }
    }
}

/// Immutable descriptor for one playable item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    /// Media locator. Relative paths are resolved against the playlist file.
    #[serde(alias = "src")]
    pub source: PathBuf,
    /// Artwork locator (`wallpaper` in playlist documents).
    #[serde(default, alias = "wallpaper")]
    pub artwork: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(deserialize_with = "deserialize_mmss")]
    pub duration: Duration,
}

impl Track {
    /// "Artist - Title", or just the title when the artist is blank.
    pub fn display(&self) -> String {
        let artist = self.artist.trim();
        if artist.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", artist, self.title)
        }
    }

    pub fn duration_text(&self) -> String {
        format_mmss(self.duration)
    }
}
