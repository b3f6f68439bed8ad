//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and mirrors what the playback
//! session pushes through the `View` trait.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
