//! Client Module
//!
//! A caching client for the task service: the API seam, a single-slot
//! snapshot cache with a freshness window, and the client that ties them
//! together with write-through on every successful mutation.

pub mod api;
pub mod cache;
pub mod clock;
mod manager;
pub mod metrics;
pub mod storage;

// Re-export public types
pub use api::{ClientResult, HttpTaskApi, LocalTaskApi, TaskApi};
pub use cache::{CacheState, CachedSnapshot, SnapshotCache, CACHE_KEY, DEFAULT_TTL};
pub use clock::{Clock, ManualClock, SystemClock};
pub use manager::{LoadSource, TaskClient};
pub use metrics::ClientMetrics;
pub use storage::{MemoryStorage, SnapshotStorage};
