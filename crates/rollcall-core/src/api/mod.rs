//! REST client for the school backend.
//!
//! `ApiClient` implements one fetch per cached domain. The cache never
//! depends on it; front ends pass its methods into `get_or_fetch` as the
//! remote-fetch capability.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
