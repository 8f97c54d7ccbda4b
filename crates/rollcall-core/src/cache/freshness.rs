//! Time-based staleness rules for cached domains.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::StoreKey;

/// Default freshness window applied to every domain without an override.
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// What to do when a cached value exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitPolicy {
    /// Serve a cached value only while its timestamp is within the window.
    #[default]
    FreshOnly,
    /// Serve any cached value until it is explicitly cleared.
    Unconditional,
}

/// Parse a stored RFC 3339 timestamp. `None` when absent or malformed.
pub fn parse_timestamp(timestamp: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = timestamp?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            warn!(timestamp = raw, error = %e, "Unparsable cache timestamp");
            None
        }
    }
}

/// Staleness under the default 7-day window.
pub fn is_stale(timestamp: Option<&str>) -> bool {
    is_stale_at(timestamp, Duration::days(DEFAULT_WINDOW_DAYS), Utc::now())
}

fn is_stale_at(timestamp: Option<&str>, window: Duration, now: DateTime<Utc>) -> bool {
    match parse_timestamp(timestamp) {
        // A timestamp ahead of `now` (clock skew) counts as fresh.
        Some(written_at) => now - written_at > window,
        None => {
            if timestamp.is_none() {
                warn!("Missing cache timestamp, treating entry as stale");
            }
            true
        }
    }
}

/// Freshness windows, one default plus optional per-domain overrides.
#[derive(Debug, Clone)]
pub struct FreshnessPolicy {
    default_window: Duration,
    overrides: HashMap<StoreKey, Duration>,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self::new(Duration::days(DEFAULT_WINDOW_DAYS))
    }
}

impl FreshnessPolicy {
    pub fn new(default_window: Duration) -> Self {
        Self {
            default_window,
            overrides: HashMap::new(),
        }
    }

    pub fn with_window(mut self, key: StoreKey, window: Duration) -> Self {
        self.overrides.insert(key, window);
        self
    }

    pub fn window_for(&self, key: StoreKey) -> Duration {
        self.overrides
            .get(&key)
            .copied()
            .unwrap_or(self.default_window)
    }

    pub fn is_stale_for(&self, key: StoreKey, timestamp: Option<&str>) -> bool {
        is_stale_at(timestamp, self.window_for(key), Utc::now())
    }
}
