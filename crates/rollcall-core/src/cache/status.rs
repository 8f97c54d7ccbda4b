use chrono::{DateTime, Utc};
use serde::Serialize;

use super::StoreKey;

/// Human-readable age of a snapshot written at `cached_at`.
pub fn age_display(cached_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - cached_at).num_minutes();
    if minutes < 1 {
        // Also covers clock skew
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        let hours = minutes / 60;
        if minutes % 60 >= 30 {
            format!("{}h ago", hours + 1)
        } else {
            format!("{}h ago", hours)
        }
    } else {
        let days = minutes / 1440;
        if (minutes % 1440) / 60 >= 12 {
            format!("{}d ago", days + 1)
        } else {
            format!("{}d ago", days)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainStatus {
    pub key: StoreKey,
    pub cached_at: Option<DateTime<Utc>>,
    pub age: Option<String>,
    pub stale: bool,
}

impl DomainStatus {
    pub fn new(key: StoreKey, cached_at: Option<DateTime<Utc>>, stale: bool) -> Self {
        Self {
            key,
            cached_at,
            age: cached_at.map(|at| age_display(at, Utc::now())),
            stale,
        }
    }
}

/// Snapshot of every cached domain.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStatus {
    pub domains: Vec<DomainStatus>,
}

impl CacheStatus {
    pub fn get(&self, key: StoreKey) -> Option<&DomainStatus> {
        self.domains.iter().find(|d| d.key == key)
    }

    pub fn any_stale(&self) -> bool {
        self.domains.iter().any(|d| d.stale)
    }

    /// Age of the most recently written domain, or "never".
    pub fn last_updated(&self) -> String {
        self.domains
            .iter()
            .filter_map(|d| d.cached_at)
            .max()
            .map(|at| age_display(at, Utc::now()))
            .unwrap_or_else(|| "never".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn display_ago(d: Duration) -> String {
        let now = Utc::now();
        age_display(now - d, now)
    }

    #[test]
    fn test_age_display_rounding() {
        assert_eq!(display_ago(Duration::seconds(20)), "just now");
        assert_eq!(display_ago(Duration::minutes(-5)), "just now");
        assert_eq!(display_ago(Duration::minutes(5)), "5m ago");
        assert_eq!(display_ago(Duration::minutes(89)), "1h ago");
        assert_eq!(display_ago(Duration::minutes(90)), "2h ago");
        assert_eq!(display_ago(Duration::hours(35)), "1d ago");
        assert_eq!(display_ago(Duration::hours(36)), "2d ago");
    }

    #[test]
    fn test_last_updated_picks_newest() {
        let now = Utc::now();
        let status = CacheStatus {
            domains: vec![
                DomainStatus::new(StoreKey::User, Some(now - Duration::days(3)), false),
                DomainStatus::new(StoreKey::Notes, Some(now - Duration::minutes(5)), false),
                DomainStatus::new(StoreKey::Classes, None, true),
            ],
        };
        assert_eq!(status.last_updated(), "5m ago");
        assert!(status.any_stale());
    }

    #[test]
    fn test_last_updated_empty() {
        assert_eq!(CacheStatus::default().last_updated(), "never");
        assert!(!CacheStatus::default().any_stale());
    }
}
