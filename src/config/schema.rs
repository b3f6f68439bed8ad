use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/reprise/config.toml` or `~/.config/reprise/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `REPRISE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub playlist: PlaylistSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Play mode active at startup.
    pub play_mode: PlayModeSetting,
    /// Progress sampling cadence (milliseconds).
    pub sample_interval_ms: u64,
    /// Start playing the first track as soon as the playlist is loaded.
    pub autoplay: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            play_mode: PlayModeSetting::RepeatAll,
            sample_interval_ms: 100,
            autoplay: false,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayModeSetting {
    #[serde(alias = "repeatall", alias = "repeat_all", alias = "loop-all")]
    RepeatAll,
    #[serde(alias = "repeatone", alias = "repeat_one", alias = "loop-one")]
    RepeatOne,
    #[serde(alias = "random")]
    Shuffle,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaylistSettings {
    /// Playlist document. The first command-line argument takes precedence.
    pub path: PathBuf,
}

impl Default for PlaylistSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("songs.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Percentage of the track to scrub when pressing `H` / `L`.
    pub scrub_percent: f64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_percent: 5.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Which track fields to show in the now-playing block, and in what order.
    ///
    /// Example: ["artist", "title", "duration"]
    pub now_playing_fields: Vec<TrackDisplayField>,

    /// Separator used to join `now_playing_fields`.
    pub now_playing_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ reprise ~ ".to_string(),
            now_playing_fields: vec![TrackDisplayField::Artist, TrackDisplayField::Title],
            now_playing_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    Title,
    Artist,
    Duration,
    Id,
    /// File stem of the media locator.
    Source,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log file. Logging stays off when unset since the UI owns the terminal.
    pub file: Option<PathBuf>,
    /// `tracing` filter directive, used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: None,
            filter: "info".to_string(),
        }
    }
}
