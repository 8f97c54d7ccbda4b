//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! backend location, the signed-in teacher, and cache freshness settings.
//!
//! Configuration is stored at `~/.config/rollcall/config.json`. The
//! `ROLLCALL_API_URL`, `ROLLCALL_TOKEN` and `ROLLCALL_TEACHER_ID`
//! environment variables take precedence over the file.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cache::{FreshnessPolicy, HitPolicy, StoreKey, DEFAULT_WINDOW_DAYS};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "rollcall";

/// Config file name
const CONFIG_FILE: &str = "config.json";

const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub teacher_id: Option<String>,
    /// Bearer token; normally supplied through the environment only.
    #[serde(default, skip_serializing)]
    pub token: Option<String>,
    #[serde(default)]
    pub hit_policy: HitPolicy,
    #[serde(default = "default_freshness_days")]
    pub freshness_days: i64,
    /// Per-domain windows in days, keyed by domain name ("Schedules").
    #[serde(default)]
    pub freshness_overrides: BTreeMap<String, i64>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_freshness_days() -> i64 {
    DEFAULT_WINDOW_DAYS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_url(),
            teacher_id: None,
            token: None,
            hit_policy: HitPolicy::default(),
            freshness_days: DEFAULT_WINDOW_DAYS,
            freshness_overrides: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load from disk, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Persist the effective configuration (token excluded) and return its path.
    pub fn save(&self) -> Result<PathBuf> {
        if let Some(ref teacher) = self.teacher_id {
            validate_teacher_id(teacher)?;
        }
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("ROLLCALL_API_URL") {
            self.api_base_url = url;
        }
        if let Some(token) = var("ROLLCALL_TOKEN") {
            self.token = Some(token);
        }
        if let Some(id) = var("ROLLCALL_TEACHER_ID") {
            self.teacher_id = Some(id);
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Cache location, namespaced by teacher so accounts never share data.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;

        let mut path = cache_dir.join(APP_NAME);
        if let Some(ref teacher) = self.teacher_id {
            validate_teacher_id(teacher)?;
            path = path.join(teacher);
        }
        Ok(path)
    }

    /// Build the freshness policy. Out-of-range or non-positive windows are
    /// skipped with a warning; a bad default falls back to 7 days.
    pub fn freshness_policy(&self) -> FreshnessPolicy {
        let default_window = window_days(self.freshness_days).unwrap_or_else(|| {
            warn!(days = self.freshness_days, "Invalid freshness_days, using default");
            Duration::days(DEFAULT_WINDOW_DAYS)
        });

        let mut policy = FreshnessPolicy::new(default_window);
        for (name, days) in &self.freshness_overrides {
            match (name.parse::<StoreKey>(), window_days(*days)) {
                (Ok(key), Some(window)) if key.is_domain() => {
                    policy = policy.with_window(key, window);
                }
                _ => warn!(domain = %name, days, "Ignoring invalid freshness override"),
            }
        }
        policy
    }
}

fn window_days(days: i64) -> Option<Duration> {
    if days > 0 {
        Duration::try_days(days)
    } else {
        None
    }
}

/// The teacher id becomes a directory name under the cache root, so it must
/// be a single plain path component.
fn validate_teacher_id(id: &str) -> Result<()> {
    let plain = !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\', '\0'])
        && !id.contains(':');
    if plain {
        Ok(())
    } else {
        anyhow::bail!("Invalid teacher id {:?}: must be a single path component", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.hit_policy, HitPolicy::FreshOnly);
        assert_eq!(config.freshness_days, 7);
    }

    #[test]
    fn test_freshness_overrides() {
        let config: Config = serde_json::from_str(
            r#"{"hit_policy":"unconditional","freshness_overrides":{"schedules":1,"Bogus":3,"User":0}}"#,
        )
        .unwrap();
        assert_eq!(config.hit_policy, HitPolicy::Unconditional);

        let policy = config.freshness_policy();
        assert_eq!(policy.window_for(StoreKey::Schedules), Duration::days(1));
        assert_eq!(policy.window_for(StoreKey::User), Duration::days(7));
    }

    #[test]
    fn test_out_of_range_windows_do_not_panic() {
        let config: Config = serde_json::from_str(
            r#"{"freshness_days":9000000000000000,"freshness_overrides":{"Notes":9000000000000000,"Classes":2}}"#,
        )
        .unwrap();

        let policy = config.freshness_policy();
        assert_eq!(policy.window_for(StoreKey::User), Duration::days(7));
        assert_eq!(policy.window_for(StoreKey::Notes), Duration::days(7));
        assert_eq!(policy.window_for(StoreKey::Classes), Duration::days(2));
    }

    #[test]
    fn test_negative_default_window_falls_back() {
        let config = Config {
            freshness_days: -3,
            ..Config::default()
        };
        assert_eq!(config.freshness_policy().window_for(StoreKey::Schedules), Duration::days(7));
    }

    #[test]
    fn test_teacher_id_must_be_one_component() {
        for bad in ["", ".", "..", "../..", "/tmp/x", "a/b", "a\\b", "C:evil"] {
            assert!(validate_teacher_id(bad).is_err(), "expected {:?} to be rejected", bad);
            let config = Config {
                teacher_id: Some(bad.to_string()),
                ..Config::default()
            };
            assert!(config.cache_dir().is_err(), "cache_dir accepted {:?}", bad);
        }
        for good in ["t-42", "teacher_7", "a.b"] {
            assert!(validate_teacher_id(good).is_ok(), "expected {:?} to be accepted", good);
        }
    }

    #[test]
    fn test_save_rejects_unsafe_teacher_id() {
        let config = Config {
            teacher_id: Some("../other".to_string()),
            ..Config::default()
        };
        let err = config.save().unwrap_err();
        assert!(err.to_string().contains("Invalid teacher id"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("ROLLCALL_API_URL", "https://school.example/api"),
            ("ROLLCALL_TEACHER_ID", "t-42"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.api_base_url, "https://school.example/api");
        assert_eq!(config.teacher_id.as_deref(), Some("t-42"));
        assert!(config.token.is_none());
    }

    #[test]
    fn test_token_is_never_saved() {
        let config = Config {
            token: Some("secret".to_string()),
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
