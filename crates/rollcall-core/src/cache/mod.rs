//! Read-through caching for offline data access.
//!
//! This module provides the `CacheManager`, which serves each domain
//! collection (user, classes, notes, schedules) from a durable store when a
//! usable snapshot exists and falls back to a caller-supplied fetch
//! otherwise. Snapshots are considered stale after 7 days unless the
//! window is overridden per domain.
//!
//! Persisted layout, per domain:
//! - `<Domain>`: the raw JSON value
//! - `<Domain>.CacheDuration`: RFC 3339 time of the last successful fetch

pub mod freshness;
pub mod keys;
pub mod manager;
pub mod status;
pub mod store;

pub use freshness::{is_stale, FreshnessPolicy, HitPolicy, DEFAULT_WINDOW_DAYS};
pub use keys::StoreKey;
pub use manager::CacheManager;
pub use status::{CacheStatus, DomainStatus};
pub use store::{DurableStore, FileStore, MemoryStore};
