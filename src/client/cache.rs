//! Snapshot Cache Module
//!
//! Caches the task collection in a single storage slot with a fixed
//! freshness window.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::clock::{Clock, SystemClock};
use crate::client::storage::SnapshotStorage;
use crate::error::ClientError;
use crate::models::Task;

// == Public Constants ==
/// Storage key holding the serialized snapshot
pub const CACHE_KEY: &str = "tasks_cache";

/// Default freshness window
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

// == Cache State ==
/// Freshness of the cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing usable is stored
    Absent,
    /// A snapshot younger than the ttl is stored
    Fresh,
    /// A snapshot is stored but has outlived the ttl
    Stale,
}

// == Cached Snapshot ==
/// Stored form of the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedSnapshot {
    /// Capture time (Unix milliseconds)
    pub captured_at: u64,
    pub tasks: Vec<Task>,
}

impl CachedSnapshot {
    /// Age of the snapshot at `now_ms`; a capture time in the future counts
    /// as zero age.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.captured_at)
    }

    /// Fresh while the age is strictly below the ttl.
    pub fn is_fresh_at(&self, now_ms: u64, ttl: Duration) -> bool {
        u128::from(self.age_ms(now_ms)) < ttl.as_millis()
    }
}

// == Snapshot Cache ==
/// Single-slot snapshot cache over a storage substrate and a clock.
///
/// Every write replaces the whole snapshot and resets its timestamp.
#[derive(Debug)]
pub struct SnapshotCache<S, C = SystemClock> {
    storage: S,
    clock: C,
    ttl: Duration,
}

impl<S: SnapshotStorage> SnapshotCache<S> {
    /// Creates a cache with the wall clock and the default ttl.
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock, DEFAULT_TTL)
    }
}

impl<S: SnapshotStorage, C: Clock> SnapshotCache<S, C> {
    pub fn with_clock(storage: S, clock: C, ttl: Duration) -> Self {
        Self {
            storage,
            clock,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads and decodes the stored snapshot regardless of age.
    ///
    /// A blob that fails to decode is treated as absent.
    fn read(&self) -> Option<CachedSnapshot> {
        let raw = self.storage.get_item(CACHE_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Discarding unreadable task cache: {}", e);
                None
            }
        }
    }

    // == State ==
    /// Classifies the slot as absent, fresh or stale.
    pub fn state(&self) -> CacheState {
        match self.read() {
            None => CacheState::Absent,
            Some(snapshot) if snapshot.is_fresh_at(self.clock.now_ms(), self.ttl) => {
                CacheState::Fresh
            }
            Some(_) => CacheState::Stale,
        }
    }

    pub fn is_fresh(&self) -> bool {
        self.state() == CacheState::Fresh
    }

    // == Get ==
    /// Returns the cached tasks while the snapshot is fresh.
    pub fn get(&self) -> Option<Vec<Task>> {
        let snapshot = self.read()?;
        let now = self.clock.now_ms();
        if snapshot.is_fresh_at(now, self.ttl) {
            debug!("Task cache fresh (age {}ms)", snapshot.age_ms(now));
            Some(snapshot.tasks)
        } else {
            debug!("Task cache stale (age {}ms)", snapshot.age_ms(now));
            None
        }
    }

    // == Set ==
    /// Replaces the snapshot and stamps it with the current time.
    pub fn set(&mut self, tasks: &[Task]) -> Result<(), ClientError> {
        let snapshot = CachedSnapshot {
            captured_at: self.clock.now_ms(),
            tasks: tasks.to_vec(),
        };
        let raw = serde_json::to_string(&snapshot)?;
        self.storage.set_item(CACHE_KEY, raw);
        Ok(())
    }

    // == Invalidate ==
    /// Removes the snapshot unconditionally.
    pub fn invalidate(&mut self) {
        self.storage.remove_item(CACHE_KEY);
        debug!("Task cache cleared");
    }

    /// Time left before the stored snapshot goes stale, if one is stored.
    pub fn remaining(&self) -> Option<Duration> {
        let snapshot = self.read()?;
        let age = Duration::from_millis(snapshot.age_ms(self.clock.now_ms()));
        Some(self.ttl.saturating_sub(age))
    }
}
