//! Rollcall CLI - inspect and refresh the teacher client's offline cache.
//!
//! Usage:
//!   rollcall status
//!   rollcall show <user|classes|notes|schedules>
//!   rollcall clear [domain...]
//!   rollcall logout
//!   rollcall config

use std::collections::BTreeSet;
use std::io;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rollcall_core::api::ApiClient;
use rollcall_core::hooks;
use rollcall_core::{CacheManager, Config, FileStore, StoreKey};

const USAGE: &str =
    "usage: rollcall <status | show <domain> | clear [domain...] | logout | config>";

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    let config = Config::load().context("Failed to load configuration")?;
    if command == "config" {
        // Writes the effective settings back so env overrides become sticky.
        let path = config.save().context("Failed to save configuration")?;
        println!("Saved configuration to {}", path.display());
        return Ok(());
    }

    let cache_dir = config.cache_dir()?;
    info!(cache_dir = %cache_dir.display(), "Opening cache");

    let store = FileStore::new(cache_dir).context("Failed to open cache directory")?;
    let cache = CacheManager::new(Arc::new(store))
        .with_freshness(config.freshness_policy())
        .with_hit_policy(config.hit_policy);

    match command.as_str() {
        "status" => status(&cache).await,
        "show" => {
            let domain = args.get(1).context(USAGE)?.parse::<StoreKey>()?;
            show(&cache, &config, domain).await
        }
        "clear" => {
            let keys = parse_domains(&args[1..])?;
            clear(&cache, &keys).await
        }
        "logout" => {
            cache.logout().await?;
            println!("Signed out, cached data removed");
            Ok(())
        }
        other => bail!("unknown command '{}'\n{}", other, USAGE),
    }
}

fn parse_domains(names: &[String]) -> Result<BTreeSet<StoreKey>> {
    if names.is_empty() {
        return Ok(StoreKey::DOMAINS.into_iter().collect());
    }
    names
        .iter()
        .map(|name| name.parse::<StoreKey>().map_err(anyhow::Error::from))
        .collect()
}

async fn status(cache: &CacheManager<FileStore>) -> Result<()> {
    let status = cache.status().await;
    for domain in &status.domains {
        println!(
            "{:<10} {:<10} {}",
            domain.key,
            domain.age.as_deref().unwrap_or("never"),
            if domain.stale { "stale" } else { "fresh" }
        );
    }
    println!("last updated: {}", status.last_updated());
    Ok(())
}

async fn show(cache: &CacheManager<FileStore>, config: &Config, domain: StoreKey) -> Result<()> {
    let mut api = ApiClient::new(&config.api_base_url)?;
    if let Some(token) = &config.token {
        api = api.with_token(token.clone());
    }
    let teacher = || {
        config
            .teacher_id
            .clone()
            .context("No teacher id configured (set ROLLCALL_TEACHER_ID)")
    };

    let json = match domain {
        StoreKey::User => {
            let user = hooks::get_user(cache, || api.fetch_user()).await?;
            serde_json::to_string_pretty(&user)?
        }
        StoreKey::Classes => {
            let id = teacher()?;
            let classes = hooks::get_classes(cache, || api.fetch_classes(&id)).await?;
            serde_json::to_string_pretty(&classes)?
        }
        StoreKey::Notes => {
            let id = teacher()?;
            let notes = hooks::get_notes(cache, || api.fetch_notes(&id)).await?;
            serde_json::to_string_pretty(&notes)?
        }
        StoreKey::Schedules => {
            let id = teacher()?;
            let schedules = hooks::get_schedules(cache, || api.fetch_schedules(&id)).await?;
            serde_json::to_string_pretty(&schedules)?
        }
        StoreKey::CacheDuration => bail!("'{}' is not a data domain", domain),
    };
    println!("{}", json);
    Ok(())
}

async fn clear(cache: &CacheManager<FileStore>, keys: &BTreeSet<StoreKey>) -> Result<()> {
    cache.clear_all(keys).await?;
    let names: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
    println!("Cleared {}", names.join(", "));
    Ok(())
}
