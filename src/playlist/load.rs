use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::DataLoadError;

use super::model::Track;

/// Read and parse the playlist document at `path`.
///
/// Relative media locators are resolved against the directory holding the
/// playlist, so a `songs.json` next to its audio files works from any cwd.
pub fn load_playlist(path: &Path) -> Result<Vec<Track>, DataLoadError> {
    let text = fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut tracks = parse_playlist(&text).map_err(|source| DataLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(base) = path.parent() {
        for track in &mut tracks {
            if track.source.is_relative() {
                track.source = base.join(&track.source);
            }
        }
    }

    debug!(path = %path.display(), tracks = tracks.len(), "playlist loaded");
    Ok(tracks)
}

/// Parse a playlist document without touching the filesystem.
pub fn parse_playlist(text: &str) -> Result<Vec<Track>, serde_json::Error> {
    serde_json::from_str(text)
}
