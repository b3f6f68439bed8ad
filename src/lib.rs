//! reprise: a single-track terminal audio player.
//!
//! The playback session in [`audio`] owns all transport state. The
//! [`runtime`] wires it to a `rodio` engine, the `ratatui` UI and MPRIS.

pub mod app;
pub mod audio;
pub mod config;
pub mod error;
pub mod mpris;
pub mod playlist;
pub mod runtime;
pub mod time;
pub mod ui;
