use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// Logical cache domains. Every key written to a durable store comes from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StoreKey {
    User,
    Classes,
    Notes,
    Schedules,
    /// Names the timestamp family paired with each data domain.
    CacheDuration,
}

impl StoreKey {
    /// Keys that hold domain data (everything except `CacheDuration`).
    pub const DOMAINS: [StoreKey; 4] = [
        StoreKey::User,
        StoreKey::Classes,
        StoreKey::Notes,
        StoreKey::Schedules,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::User => "User",
            StoreKey::Classes => "Classes",
            StoreKey::Notes => "Notes",
            StoreKey::Schedules => "Schedules",
            StoreKey::CacheDuration => "CacheDuration",
        }
    }

    /// Key under which the last-fetch timestamp of this domain is stored.
    pub fn timestamp_key(&self) -> Option<&'static str> {
        match self {
            StoreKey::User => Some("User.CacheDuration"),
            StoreKey::Classes => Some("Classes.CacheDuration"),
            StoreKey::Notes => Some("Notes.CacheDuration"),
            StoreKey::Schedules => Some("Schedules.CacheDuration"),
            StoreKey::CacheDuration => None,
        }
    }

    /// Label used in user-facing messages ("Failed to get schedule records").
    pub fn domain_label(&self) -> &'static str {
        match self {
            StoreKey::User => "user",
            StoreKey::Classes => "class",
            StoreKey::Notes => "note",
            StoreKey::Schedules => "schedule",
            StoreKey::CacheDuration => "cache duration",
        }
    }

    pub fn is_domain(&self) -> bool {
        self.timestamp_key().is_some()
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for StoreKey {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(StoreKey::User),
            "classes" => Ok(StoreKey::Classes),
            "notes" => Ok(StoreKey::Notes),
            "schedules" => Ok(StoreKey::Schedules),
            "cacheduration" => Ok(StoreKey::CacheDuration),
            _ => Err(CacheError::InvalidKey(s.to_string())),
        }
    }
}
