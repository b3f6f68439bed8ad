//! Audio-related small types.
//!
//! This module defines the play mode, skip direction and the events that
//! reach the playback session from the media engine and the sampling clock.

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayMode {
    /// Walk the playlist in order and wrap around at either end.
    RepeatAll,
    /// Keep repeating the current track when it ends. Manual skips still move linearly.
    RepeatOne,
    /// Walk the playlist through a shuffled permutation.
    Shuffle,
}

impl Default for PlayMode {
    fn default() -> Self {
        Self::RepeatAll
    }
}

impl PlayMode {
    /// Cycle `RepeatAll -> RepeatOne -> Shuffle -> RepeatAll`.
    pub fn next(self) -> Self {
        match self {
            PlayMode::RepeatAll => PlayMode::RepeatOne,
            PlayMode::RepeatOne => PlayMode::Shuffle,
            PlayMode::Shuffle => PlayMode::RepeatAll,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayMode::RepeatAll => "Repeat all tracks",
            PlayMode::RepeatOne => "Repeat current track",
            PlayMode::Shuffle => "Shuffle play",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaEventKind {
    /// The engine acknowledged a play request.
    Started,
    Paused,
    /// The source drained without looping.
    Ended,
}

/// Lifecycle notification from the media engine.
///
/// `generation` identifies the loaded source the event belongs to, so events
/// emitted before a track change can be told apart from current ones.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MediaEvent {
    pub kind: MediaEventKind,
    pub generation: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    Media(MediaEvent),
    /// Progress sampling tick carrying the token of the timer that fired it.
    Tick(u64),
}
