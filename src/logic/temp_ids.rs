//! Ids for temporary players, unique against the whole roster.

use crate::models::{PlayerId, SessionError};
use rand::RngCore;
use std::collections::HashSet;

/// Draws before giving up.
pub const MAX_ID_ATTEMPTS: usize = 16;

const TEMP_ID_PREFIX: &str = "temp-";

/// Random id source with bounded retry. The rng is injected so collisions can be forced.
pub struct TempIdAllocator<R: RngCore> {
    rng: R,
    max_attempts: usize,
}

impl<R: RngCore> TempIdAllocator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            max_attempts: MAX_ID_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(rng: R, max_attempts: usize) -> Self {
        Self { rng, max_attempts }
    }

    /// Return an id not contained in `taken` (permanent and temporary ids alike).
    pub fn allocate(&mut self, taken: &HashSet<PlayerId>) -> Result<PlayerId, SessionError> {
        for _ in 0..self.max_attempts {
            let candidate = format!("{}{:06x}", TEMP_ID_PREFIX, self.rng.next_u32() & 0x00ff_ffff);
            if !taken.contains(&candidate) {
                return Ok(candidate);
            }
        }
        log::warn!("No free temporary id after {} attempts", self.max_attempts);
        Err(SessionError::UniqueIdGenerationFailure {
            attempts: self.max_attempts,
        })
    }
}
