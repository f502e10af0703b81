//! Id allocation for countries created without an explicit id.
//!
//! Countries added through the editor only carry a name, so the editor asks
//! an injected allocator for an id. Both allocators are deterministic: the
//! same map and the same seed always produce the same id.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::country::CountryId;
use super::model::GameMap;

/// Lowest id handed out by [`SeededIds`].
const SEEDED_MIN: u32 = 100;
/// Highest id handed out by [`SeededIds`].
const SEEDED_MAX: u32 = 999;
/// Random draws attempted before falling back to `max + 1`.
const SEEDED_ATTEMPTS: usize = 64;

/// Source of fresh country ids.
pub trait IdAllocator {
    /// Returns an id not used by any country in `map`.
    fn next_id(&mut self, map: &GameMap) -> CountryId;
}

/// Monotonically increasing ids starting at 1, skipping ids already taken.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u32,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator for SequentialIds {
    fn next_id(&mut self, map: &GameMap) -> CountryId {
        while map.country(CountryId(self.next)).is_some() {
            self.next += 1;
        }
        let id = CountryId(self.next);
        self.next += 1;
        id
    }
}

/// Three-digit ids drawn from a seeded generator.
#[derive(Debug, Clone)]
pub struct SeededIds {
    rng: SmallRng,
}

impl SeededIds {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl IdAllocator for SeededIds {
    fn next_id(&mut self, map: &GameMap) -> CountryId {
        for _ in 0..SEEDED_ATTEMPTS {
            let candidate = CountryId(self.rng.gen_range(SEEDED_MIN..=SEEDED_MAX));
            if map.country(candidate).is_none() {
                return candidate;
            }
        }
        // Range is crowded; scan for a gap before leaving it.
        (SEEDED_MIN..=SEEDED_MAX)
            .map(CountryId)
            .find(|&id| map.country(id).is_none())
            .unwrap_or_else(|| {
                let max = map.countries().iter().map(|c| c.id.0).max().unwrap_or(0);
                CountryId(max + 1)
            })
    }
}
