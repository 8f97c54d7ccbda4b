//! Core library for rollcall, the teacher client.
//!
//! The centre of the crate is [`cache::CacheManager`], a read-through cache
//! with time-based invalidation over a [`cache::DurableStore`]. Everything
//! else (models, typed accessors, the HTTP client, configuration) exists
//! to feed it or consume it.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod hooks;
pub mod models;

pub use cache::{CacheManager, CacheStatus, DurableStore, FileStore, MemoryStore, StoreKey};
pub use config::Config;
pub use error::{CacheError, InvalidationError, StoreError};
