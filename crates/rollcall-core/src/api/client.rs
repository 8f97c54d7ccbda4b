//! HTTP client for the school backend.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::models::{ClassGroup, Note, Schedule, UserProfile};

use super::ApiError;

/// HTTP request timeout in seconds.
/// The cache layer has no timeout of its own, so the fetch must bound itself.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn check_response(path: &str, response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_response(path, status, &body);
        warn!(path, status = status.as_u16(), transient = err.is_transient(), "Request failed");
        Err(err.into())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let mut request = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        debug!(url = %url, "GET");
        let response = request
            .send()
            .await
            .map_err(ApiError::from)
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        Self::check_response(path, response)
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    pub async fn fetch_user(&self) -> Result<UserProfile> {
        self.get("me").await
    }

    pub async fn fetch_classes(&self, teacher_id: &str) -> Result<Vec<ClassGroup>> {
        self.get(&format!("teachers/{}/classes", teacher_id)).await
    }

    pub async fn fetch_notes(&self, teacher_id: &str) -> Result<Vec<Note>> {
        self.get(&format!("teachers/{}/notes", teacher_id)).await
    }

    pub async fn fetch_schedules(&self, teacher_id: &str) -> Result<Vec<Schedule>> {
        self.get(&format!("teachers/{}/schedules", teacher_id)).await
    }
}
