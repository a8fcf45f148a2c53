//! Stable snapshot hashing for determinism verification.
//! This module exists to keep hashing concerns separate from session
//! control code. It does not own replay execution or journal persistence.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::Game;
use crate::types::Phase;

impl Game {
    /// Canonical xxh3 digest of the session. Two games that accepted the
    /// same command sequence over the same layout hash identically.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.tick);
        hasher.write_u8(match self.phase {
            Phase::NotStarted => 0,
            Phase::Playing => 1,
            Phase::Won => 2,
            Phase::Lost => 3,
        });
        hasher.write_u32(self.session.score);
        hasher.write_i32(self.session.player.x);
        hasher.write_i32(self.session.player.y);
        hasher.write_i32(self.session.pursuer.x);
        hasher.write_i32(self.session.pursuer.y);
        hasher.write_usize(self.session.pickups.len());
        for pickup in &self.session.pickups {
            hasher.write_i32(pickup.x);
            hasher.write_i32(pickup.y);
        }
        hasher.finish()
    }
}
