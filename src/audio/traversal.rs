//! Traversal policy: which track comes next.
//!
//! Linear modes wrap around in both directions. Shuffle walks the stored
//! permutation by position, so `Backward` retraces the same order.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::PlayerError;

use super::types::{Direction, PlayMode};

/// Compute the playlist index after `current` for `mode` and `direction`.
///
/// In shuffle mode an order that does not cover the playlist (or lacks
/// `current`) yields `StaleShuffleOrder`; the caller regenerates and retries.
pub fn next_index(
    current: usize,
    mode: PlayMode,
    len: usize,
    shuffle_order: &[usize],
    direction: Direction,
) -> Result<usize, PlayerError> {
    if len == 0 {
        return Err(PlayerError::EmptyPlaylist);
    }

    match mode {
        PlayMode::RepeatAll | PlayMode::RepeatOne => Ok(step(current % len, len, direction)),
        PlayMode::Shuffle => {
            let stale = PlayerError::StaleShuffleOrder { index: current };
            if shuffle_order.len() != len {
                return Err(stale);
            }
            let pos = shuffle_order
                .iter()
                .position(|&i| i == current)
                .ok_or(stale)?;
            let next = shuffle_order[step(pos, len, direction)];
            if next >= len {
                return Err(PlayerError::StaleShuffleOrder { index: current });
            }
            Ok(next)
        }
    }
}

fn step(pos: usize, len: usize, direction: Direction) -> usize {
    match direction {
        Direction::Forward => (pos + 1) % len,
        Direction::Backward => (pos + len - 1) % len,
    }
}

/// Uniform random permutation of `0..len`.
pub fn shuffled_order<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(rng);
    order
}

/// Whether `order` contains every index of `0..len` exactly once.
pub fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &i in order {
        if i >= len || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}
