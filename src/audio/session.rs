//! The playback session: authoritative transport state.
//!
//! All mutation happens through the methods below, invoked from a single
//! thread in response to user commands, media events and sampler ticks.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info, warn};

use crate::error::{MediaError, PlayerError, Result};
use crate::playlist::Track;

use super::engine::MediaEngine;
use super::sampler::{Clock, ProgressSampler, progress_percent};
use super::traversal::{is_permutation, next_index, shuffled_order};
use super::types::{Direction, MediaEventKind, PlayMode, PlayerEvent};
use super::view::View;

pub struct PlaybackSession<E, C, V> {
    engine: E,
    sampler: ProgressSampler<C>,
    view: V,
    playlist: Vec<Track>,
    current: Option<usize>,
    saved_position: Duration,
    mode: PlayMode,
    shuffle_order: Vec<usize>,
    playing: bool,
    // Bumped on every source load; media events from older loads are ignored.
    generation: u64,
    rng: StdRng,
}

impl<E: MediaEngine, C: Clock, V: View> PlaybackSession<E, C, V> {
    pub fn new(engine: E, clock: C, view: V, sample_interval: Duration) -> Self {
        Self::with_rng(engine, clock, view, sample_interval, StdRng::from_entropy())
    }

    pub fn with_rng(
        engine: E,
        clock: C,
        view: V,
        sample_interval: Duration,
        rng: StdRng,
    ) -> Self {
        Self {
            engine,
            sampler: ProgressSampler::new(clock, sample_interval),
            view,
            playlist: Vec::new(),
            current: None,
            saved_position: Duration::ZERO,
            mode: PlayMode::default(),
            shuffle_order: Vec::new(),
            playing: false,
            generation: 0,
            rng,
        }
    }

    /// Replace the playlist and select its first track.
    ///
    /// Any previous shuffle order is discarded.
    pub fn load(&mut self, tracks: Vec<Track>) -> Result<()> {
        if tracks.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }

        self.sampler.stop();
        if self.playing {
            self.engine.pause();
            self.playing = false;
            self.view.on_play_state_changed(false);
        }
        self.generation += 1;

        self.playlist = tracks;
        self.current = Some(0);
        self.saved_position = Duration::ZERO;
        self.shuffle_order.clear();
        if self.mode == PlayMode::Shuffle {
            self.regenerate_shuffle_order();
        }

        info!(tracks = self.playlist.len(), "playlist loaded");
        self.view.render_track(&self.playlist[0]);
        self.view.update_progress(0.0, Duration::ZERO);
        Ok(())
    }

    /// Start the current track from the saved position. No-op while playing.
    pub fn play(&mut self) -> Result<()> {
        if self.current.is_none() {
            return Err(PlayerError::NoTrackLoaded);
        }
        if self.playing {
            debug!("play requested while already playing");
            return Ok(());
        }
        self.start_current()
    }

    /// Remember the elapsed position and pause.
    pub fn pause(&mut self) -> Result<()> {
        let index = self.current.ok_or(PlayerError::NoTrackLoaded)?;

        if self.playing {
            let duration = self.playlist[index].duration;
            self.saved_position = self.engine.position().min(duration);
            self.engine.pause();
        }
        self.sampler.stop();
        self.playing = false;
        debug!(position = ?self.saved_position, "paused");
        self.view.on_play_state_changed(false);
        Ok(())
    }

    /// Play when paused, pause when playing.
    pub fn toggle(&mut self) -> Result<()> {
        if self.playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Advance to the next track per the active mode and start it.
    pub fn next(&mut self) -> Result<()> {
        self.skip(Direction::Forward)
    }

    /// Step back to the previous track per the active mode and start it.
    pub fn previous(&mut self) -> Result<()> {
        self.skip(Direction::Backward)
    }

    /// Switch the play mode. Entering shuffle generates an order if there is none yet.
    pub fn set_play_mode(&mut self, mode: PlayMode) {
        self.mode = mode;
        if mode == PlayMode::Shuffle && self.shuffle_order.is_empty() && !self.playlist.is_empty() {
            self.regenerate_shuffle_order();
        }
        self.engine.set_looping(mode == PlayMode::RepeatOne);
        info!(?mode, "play mode changed");
        self.view.on_play_mode_changed(mode);
    }

    /// Apply the next mode in the `RepeatAll -> RepeatOne -> Shuffle` cycle.
    pub fn cycle_play_mode(&mut self) -> PlayMode {
        let mode = self.mode.next();
        self.set_play_mode(mode);
        mode
    }

    /// Jump to `percentage` (clamped to `[0, 100]`) of the current track.
    ///
    /// Seeking while paused resumes playback at the new position.
    pub fn seek_to(&mut self, percentage: f64) -> Result<()> {
        let index = self.current.ok_or(PlayerError::NoTrackLoaded)?;
        let percentage = if percentage.is_finite() {
            percentage.clamp(0.0, 100.0)
        } else {
            0.0
        };

        let duration = self.playlist[index].duration;
        let target = duration.mul_f64(percentage / 100.0);
        let previous = self.saved_position;
        self.saved_position = target;

        let result = if !self.playing || self.engine.is_paused() {
            self.start_current()
        } else {
            self.engine
                .seek(target)
                .map_err(|source| self.fail(index, source))
        };
        if let Err(err) = result {
            self.saved_position = previous;
            return Err(err);
        }

        self.view
            .update_progress(progress_percent(target, duration), target);
        Ok(())
    }

    /// Seek relative to the current position by `delta` percent of the track.
    pub fn seek_by(&mut self, delta: f64) -> Result<()> {
        let index = self.current.ok_or(PlayerError::NoTrackLoaded)?;
        let position = if self.playing {
            self.engine.position()
        } else {
            self.saved_position
        };
        let now = progress_percent(position, self.playlist[index].duration);
        self.seek_to(now + delta)
    }

    /// Install an explicit shuffle order.
    pub fn set_shuffle_order(&mut self, order: Vec<usize>) -> Result<()> {
        if !is_permutation(&order, self.playlist.len()) {
            return Err(PlayerError::InvalidShuffleOrder {
                len: self.playlist.len(),
            });
        }
        self.shuffle_order = order;
        Ok(())
    }

    /// Dispatch one asynchronous event from the engine or the clock.
    pub fn handle_event(&mut self, event: PlayerEvent) -> Result<()> {
        match event {
            PlayerEvent::Tick(token) => {
                self.on_tick(token);
                Ok(())
            }
            PlayerEvent::Media(ev) => match ev.kind {
                MediaEventKind::Started => {
                    self.on_media_playing(ev.generation);
                    Ok(())
                }
                MediaEventKind::Paused => {
                    self.on_media_paused(ev.generation);
                    Ok(())
                }
                MediaEventKind::Ended => self.on_media_ended(ev.generation),
            },
        }
    }

    /// Sample the engine and push progress to the view.
    pub fn on_tick(&mut self, token: u64) {
        if !self.sampler.accepts(token) {
            debug!(token, "ignoring tick from a cancelled timer");
            return;
        }
        if self.engine.is_paused() || self.engine.is_ended() {
            return;
        }
        let Some(index) = self.current else {
            return;
        };

        let elapsed = self.engine.position();
        let duration = self.playlist[index].duration;
        self.view
            .update_progress(progress_percent(elapsed, duration), elapsed);
    }

    /// The loaded source finished.
    ///
    /// Under RepeatOne the engine normally loops by itself; if an end still
    /// arrives the same track restarts. Other modes advance like `next`.
    pub fn on_media_ended(&mut self, generation: u64) -> Result<()> {
        if generation != self.generation {
            debug!(generation, "ignoring end of a replaced source");
            return Ok(());
        }

        match self.mode {
            PlayMode::RepeatOne => {
                self.sampler.stop();
                self.saved_position = Duration::ZERO;
                self.view.update_progress(0.0, Duration::ZERO);
                self.start_current()
            }
            PlayMode::RepeatAll | PlayMode::Shuffle => self.next(),
        }
    }

    pub fn on_media_playing(&mut self, generation: u64) {
        if generation == self.generation {
            self.view.on_media_playing();
        }
    }

    pub fn on_media_paused(&mut self, generation: u64) {
        if generation == self.generation {
            self.view.on_media_paused();
        }
    }

    /// Let the engine detect the end of its source.
    pub fn poll_media(&mut self) {
        self.engine.poll();
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.playlist.get(i))
    }

    pub fn saved_position(&self) -> Duration {
        self.saved_position
    }

    pub fn play_mode(&self) -> PlayMode {
        self.mode
    }

    pub fn shuffle_order(&self) -> &[usize] {
        &self.shuffle_order
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_sampling(&self) -> bool {
        self.sampler.is_running()
    }

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn skip(&mut self, direction: Direction) -> Result<()> {
        let index = self.current.ok_or(PlayerError::NoTrackLoaded)?;

        let resume_at = if self.playing {
            self.engine
                .position()
                .min(self.playlist[index].duration)
        } else {
            self.saved_position
        };

        self.sampler.stop();
        self.view.update_progress(0.0, Duration::ZERO);

        let next = self.resolve_next(index, direction)?;
        self.current = Some(next);
        self.saved_position = Duration::ZERO;
        self.playing = false;
        info!(from = index, to = next, mode = ?self.mode, "track changed");
        self.view.render_track(&self.playlist[next]);

        if let Err(err) = self.start_current() {
            self.current = Some(index);
            self.saved_position = resume_at;
            let duration = self.playlist[index].duration;
            self.view.render_track(&self.playlist[index]);
            self.view
                .update_progress(progress_percent(resume_at, duration), resume_at);
            return Err(err);
        }
        Ok(())
    }

    fn resolve_next(&mut self, index: usize, direction: Direction) -> Result<usize> {
        let len = self.playlist.len();
        match next_index(index, self.mode, len, &self.shuffle_order, direction) {
            Err(PlayerError::StaleShuffleOrder { index }) => {
                warn!(index, "shuffle order is stale, regenerating");
                self.regenerate_shuffle_order();
                next_index(index, self.mode, len, &self.shuffle_order, direction)
            }
            other => other,
        }
    }

    /// Load the current track, seek to the saved position and start it.
    fn start_current(&mut self) -> Result<()> {
        let index = self.current.ok_or(PlayerError::NoTrackLoaded)?;
        let track = &self.playlist[index];
        let start_at = self.saved_position.min(track.duration);

        self.generation += 1;
        let generation = self.generation;

        let started = self.engine.load(track, generation).and_then(|()| {
            if !start_at.is_zero() {
                self.engine.seek(start_at)?;
            }
            self.engine.play()
        });

        match started {
            Ok(()) => {
                self.playing = true;
                self.sampler.start();
                debug!(index, position = ?start_at, generation, "playback started");
                self.view.on_play_state_changed(true);
                Ok(())
            }
            Err(source) => Err(self.fail(index, source)),
        }
    }

    /// Settle into a paused, non-sampling state after the engine failed.
    fn fail(&mut self, index: usize, source: MediaError) -> PlayerError {
        self.engine.pause();
        self.sampler.stop();
        self.playing = false;
        self.view.on_play_state_changed(false);

        let err = PlayerError::PlaybackFailed {
            track: self.playlist[index].display(),
            source,
        };
        error!(error = %err, "playback failed");
        self.view.on_error(&err);
        err
    }

    fn regenerate_shuffle_order(&mut self) {
        self.shuffle_order = shuffled_order(self.playlist.len(), &mut self.rng);
        debug!(order = ?self.shuffle_order, "shuffle order generated");
    }
}
