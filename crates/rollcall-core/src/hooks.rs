//! Typed accessors for each cached domain.
//!
//! Screens call these instead of `get_or_fetch` directly so every domain
//! is read and written with one concrete type.

use std::future::Future;

use crate::cache::{CacheManager, DurableStore, StoreKey};
use crate::error::CacheError;
use crate::models::{ClassGroup, Note, Schedule, UserProfile};

pub async fn get_user<S, F, Fut, E>(cache: &CacheManager<S>, fetch: F) -> Result<UserProfile, CacheError>
where
    S: DurableStore + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<UserProfile, E>>,
    E: Into<anyhow::Error>,
{
    cache.get_or_fetch(StoreKey::User, fetch).await
}

pub async fn get_classes<S, F, Fut, E>(cache: &CacheManager<S>, fetch: F) -> Result<Vec<ClassGroup>, CacheError>
where
    S: DurableStore + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<ClassGroup>, E>>,
    E: Into<anyhow::Error>,
{
    cache.get_or_fetch(StoreKey::Classes, fetch).await
}

pub async fn get_notes<S, F, Fut, E>(cache: &CacheManager<S>, fetch: F) -> Result<Vec<Note>, CacheError>
where
    S: DurableStore + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<Note>, E>>,
    E: Into<anyhow::Error>,
{
    cache.get_or_fetch(StoreKey::Notes, fetch).await
}

pub async fn get_schedules<S, F, Fut, E>(cache: &CacheManager<S>, fetch: F) -> Result<Vec<Schedule>, CacheError>
where
    S: DurableStore + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<Schedule>, E>>,
    E: Into<anyhow::Error>,
{
    cache.get_or_fetch(StoreKey::Schedules, fetch).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::cache::MemoryStore;
    use crate::models::Weekday;

    #[tokio::test]
    async fn test_get_schedules_typed_round_trip() {
        let cache = CacheManager::new(Arc::new(MemoryStore::new()));
        let slot = Schedule {
            id: "s1".to_string(),
            class_id: "c1".to_string(),
            weekday: Weekday::Monday,
            start_time: "08:00".to_string(),
            end_time: "08:45".to_string(),
            room: None,
        };

        let expected = vec![slot.clone()];
        let first = get_schedules(&cache, || async move { Ok::<_, anyhow::Error>(vec![slot]) })
            .await
            .unwrap();
        let second = get_schedules(&cache, || async { Err::<Vec<Schedule>, _>(anyhow::anyhow!("offline")) })
            .await
            .unwrap();

        assert_eq!(first, expected);
        assert_eq!(second, expected);
    }

    #[tokio::test]
    async fn test_get_user_surfaces_domain_error() {
        let cache = CacheManager::new(Arc::new(MemoryStore::new()));
        let err = get_user(&cache, || async { Err::<UserProfile, _>(anyhow::anyhow!("401")) })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to get user records");
    }
}
