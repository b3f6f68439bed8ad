//! Playback core: play modes, traversal, progress sampling, the media engine
//! and the session that ties them together.

mod engine;
mod sampler;
mod session;
mod sink;
mod traversal;
mod types;
mod view;

pub use engine::{MediaEngine, RodioEngine};
pub use sampler::{Clock, ProgressSampler, ThreadClock, TimerHandle, progress_percent};
pub use session::PlaybackSession;
pub use traversal::{is_permutation, next_index, shuffled_order};
pub use types::*;
pub use view::View;
