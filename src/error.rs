//! Error types for the player.
//!
//! `PlayerError` is what transport operations return. Loading the playlist
//! document fails with `DataLoadError`, and the media engine reports
//! `MediaError`, which the session wraps into `PlayerError::PlaybackFailed`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// `load` was handed a playlist with no tracks.
    #[error("playlist is empty")]
    EmptyPlaylist,

    /// A transport operation was invoked before a playlist was loaded.
    #[error("no track loaded")]
    NoTrackLoaded,

    /// The media engine refused to start the track.
    #[error("playback failed for \"{track}\": {source}")]
    PlaybackFailed {
        track: String,
        #[source]
        source: MediaError,
    },

    /// The shuffle order does not contain the current index.
    #[error("track {index} is missing from the shuffle order")]
    StaleShuffleOrder { index: usize },

    /// An explicitly supplied shuffle order is not a permutation of the playlist.
    #[error("shuffle order is not a permutation of 0..{len}")]
    InvalidShuffleOrder { len: usize },

    #[error(transparent)]
    DataLoad(#[from] DataLoadError),
}

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read playlist {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse playlist {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid duration {0:?}, expected MM:SS")]
    InvalidDuration(String),
}

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("no source loaded")]
    NoSource,

    #[error("audio output unavailable: {0}")]
    Output(String),
}

pub type Result<T> = std::result::Result<T, PlayerError>;
