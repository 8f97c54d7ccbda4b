use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::freshness::{parse_timestamp, FreshnessPolicy, HitPolicy};
use super::status::{CacheStatus, DomainStatus};
use super::store::DurableStore;
use super::StoreKey;
use crate::error::{CacheError, InvalidationError, StoreError};

/// Read-through cache over a durable store.
///
/// Cheap to clone; clones share the same store.
pub struct CacheManager<S: DurableStore + ?Sized> {
    store: Arc<S>,
    freshness: FreshnessPolicy,
    hit_policy: HitPolicy,
}

impl<S: DurableStore + ?Sized> Clone for CacheManager<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            freshness: self.freshness.clone(),
            hit_policy: self.hit_policy,
        }
    }
}

impl<S: DurableStore + ?Sized> CacheManager<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            freshness: FreshnessPolicy::default(),
            hit_policy: HitPolicy::default(),
        }
    }

    pub fn with_freshness(mut self, freshness: FreshnessPolicy) -> Self {
        self.freshness = freshness;
        self
    }

    pub fn with_hit_policy(mut self, hit_policy: HitPolicy) -> Self {
        self.hit_policy = hit_policy;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn hit_policy(&self) -> HitPolicy {
        self.hit_policy
    }

    /// Return the cached value for `key`, or fetch, persist and return it.
    ///
    /// `fetch_remote` runs at most once. On failure nothing is written and
    /// the error is surfaced as `CacheError::RemoteFetch`. A failed write
    /// after a successful fetch is logged and the value is still returned.
    pub async fn get_or_fetch<T, F, Fut, E>(&self, key: StoreKey, fetch_remote: F) -> Result<T, CacheError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<anyhow::Error>,
    {
        if !key.is_domain() {
            return Err(CacheError::InvalidKey(key.to_string()));
        }

        if let Some(cached) = self.read_cached::<T>(key).await {
            if self.may_serve(key).await {
                debug!(key = %key, "Cache hit");
                return Ok(cached);
            }
            debug!(key = %key, "Cached value is stale, refetching");
        }

        match fetch_remote().await {
            Ok(value) => {
                self.persist(key, &value).await;
                Ok(value)
            }
            Err(e) => {
                let cause: anyhow::Error = e.into();
                let detail = format!("{:#}", cause);
                warn!(key = %key, error = %detail, "Remote fetch failed");
                Err(CacheError::remote_fetch(key, cause))
            }
        }
    }

    /// Remove every listed key and its paired timestamp.
    ///
    /// Removals run concurrently. Keys that succeed stay removed even when
    /// others fail.
    pub async fn clear_all(&self, keys: &BTreeSet<StoreKey>) -> Result<(), InvalidationError> {
        let results = join_all(keys.iter().map(|&key| async move {
            (key, self.remove_key(key).await)
        }))
        .await;

        let failed: Vec<(StoreKey, String)> = results
            .into_iter()
            .filter_map(|(key, result)| result.err().map(|e| (key, e.to_string())))
            .collect();

        if failed.is_empty() {
            debug!(count = keys.len(), "Cleared cache keys");
            Ok(())
        } else {
            for (key, error) in &failed {
                warn!(key = %key, error = %error, "Failed to clear cache key");
            }
            Err(InvalidationError { failed })
        }
    }

    /// Clear every data domain.
    pub async fn logout(&self) -> Result<(), InvalidationError> {
        let all: BTreeSet<StoreKey> = StoreKey::DOMAINS.into_iter().collect();
        self.clear_all(&all).await
    }

    /// Age and staleness of every data domain.
    pub async fn status(&self) -> CacheStatus {
        let mut domains = Vec::with_capacity(StoreKey::DOMAINS.len());
        for key in StoreKey::DOMAINS {
            let raw = self.read_timestamp(key).await;
            domains.push(DomainStatus::new(
                key,
                parse_timestamp(raw.as_deref()),
                self.freshness.is_stale_for(key, raw.as_deref()),
            ));
        }
        CacheStatus { domains }
    }

    async fn read_cached<T: DeserializeOwned>(&self, key: StoreKey) -> Option<T> {
        match self.store.get(key.as_str()).await {
            Ok(Some(raw)) => match serde_json::from_value(raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!(key = %key, error = %e, "Cached value has unexpected shape, ignoring");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read cache, treating as miss");
                None
            }
        }
    }

    async fn read_timestamp(&self, key: StoreKey) -> Option<String> {
        let ts_key = key.timestamp_key()?;
        match self.store.get(ts_key).await {
            Ok(Some(Value::String(raw))) => Some(raw),
            Ok(Some(other)) => {
                warn!(key = %key, value = %other, "Cache timestamp is not a string");
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read cache timestamp");
                None
            }
        }
    }

    async fn may_serve(&self, key: StoreKey) -> bool {
        match self.hit_policy {
            HitPolicy::Unconditional => true,
            HitPolicy::FreshOnly => {
                let raw = self.read_timestamp(key).await;
                !self.freshness.is_stale_for(key, raw.as_deref())
            }
        }
    }

    async fn persist<T: Serialize>(&self, key: StoreKey, value: &T) {
        let json = match serde_json::to_value(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to serialize fetched value, not caching");
                return;
            }
        };

        if let Err(e) = self.store.set(key.as_str(), json).await {
            warn!(key = %key, error = %e, "Failed to cache fetched value");
            return;
        }

        let Some(ts_key) = key.timestamp_key() else {
            return;
        };
        let now = Value::String(Utc::now().to_rfc3339());
        if let Err(e) = self.store.set(ts_key, now).await {
            warn!(key = %key, error = %e, "Failed to write cache timestamp, dropping entry");
            // A stale timestamp from an earlier fetch may still be there, so
            // drop both halves to keep value and timestamp paired.
            if let Err(e) = self.remove_key(key).await {
                warn!(key = %key, error = %e, "Failed to drop half-written entry");
            }
        }
    }

    async fn remove_key(&self, key: StoreKey) -> Result<(), StoreError> {
        let value = self.store.remove(key.as_str());
        match key.timestamp_key() {
            Some(ts_key) => {
                let (value, ts) = futures::join!(value, self.store.remove(ts_key));
                value.and(ts)
            }
            None => value.await,
        }
    }
}
