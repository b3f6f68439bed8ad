//! Playlist document loading and the `Track` model.
//!
//! A playlist is a JSON array of track descriptors, read once at startup and
//! never mutated afterwards.

mod display;
mod load;
mod model;

pub use display::display_from_fields;
pub use load::{load_playlist, parse_playlist};
pub use model::*;
