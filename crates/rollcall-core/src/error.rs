use thiserror::Error;

use crate::cache::StoreKey;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by a durable store implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored value under {key} is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors surfaced by the read-through cache to its callers.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The caller-supplied fetch failed. Nothing was persisted.
    #[error("Failed to get {} records", .domain.domain_label())]
    RemoteFetch {
        domain: StoreKey,
        #[source]
        source: BoxError,
    },

    #[error("Not a cacheable domain: {0}")]
    InvalidKey(String),
}

impl CacheError {
    pub(crate) fn remote_fetch(domain: StoreKey, cause: anyhow::Error) -> Self {
        CacheError::RemoteFetch {
            domain,
            source: cause.into(),
        }
    }
}

/// One or more removals failed during a bulk clear.
///
/// Keys that were removed stay removed; calling `clear_all` again is safe.
#[derive(Error, Debug)]
#[error("Failed to clear cache for: {}", join_keys(.failed))]
pub struct InvalidationError {
    pub failed: Vec<(StoreKey, String)>,
}

fn join_keys(failed: &[(StoreKey, String)]) -> String {
    failed
        .iter()
        .map(|(key, _)| key.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl InvalidationError {
    pub fn failed_keys(&self) -> Vec<&'static str> {
        self.failed.iter().map(|(key, _)| key.as_str()).collect()
    }
}
