//! HTTP client for the food log persistence service.
//!
//! Every failure is translated into a [`RemoteError`]: transport problems
//! become `Network`, a 403 becomes `Forbidden` and any other non-success
//! status becomes `Service` with the message the service sent.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use super::error::RemoteError;
use super::wire::{ClearResponse, CreateFoodLogRequest, ErrorBody, FoodLogRecord};
use super::FoodLogApi;
use crate::models::{FoodLogEntry, NormalizedEntry};

/// Upper bound for a single request, including reading the body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout used by [`check_server`].
const HEALTH_TIMEOUT: Duration = Duration::from_secs(3);

const COLLECTION_PATH: &str = "/api/foodlogs";

/// Client for the `/api/foodlogs` collection resource.
///
/// Holds no entries; it only proxies requests.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    base_url: String,
    http: reqwest::Client,
}

impl RemoteClient {
    /// Creates a client with the default request timeout.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, RemoteError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(RemoteError::network)?;

        Ok(Self {
            base_url: normalize_base_url(base_url.as_ref()),
            http,
        })
    }

    /// Returns the normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Calls the liveness probe and returns its plain-text body.
    pub async fn health_check(&self) -> Result<String, RemoteError> {
        let response = self
            .http
            .get(self.build_url("/"))
            .send()
            .await
            .map_err(RemoteError::network)?;

        let response = check_status(response).await?;
        response.text().await.map_err(RemoteError::network)
    }

    /// Fetches every entry from the service.
    ///
    /// Records without an id cannot be tracked and are skipped.
    pub async fn fetch_all(&self) -> Result<Vec<FoodLogEntry>, RemoteError> {
        tracing::debug!(url = %self.collection_url(), "fetching food logs");

        let response = self
            .http
            .get(self.collection_url())
            .send()
            .await
            .map_err(RemoteError::network)?;

        let records: Vec<FoodLogRecord> = decode(check_status(response).await?).await?;
        let total = records.len();

        let entries: Vec<FoodLogEntry> = records
            .into_iter()
            .filter_map(FoodLogRecord::into_entry)
            .collect();

        if entries.len() < total {
            tracing::warn!(
                skipped = total - entries.len(),
                "ignoring food log records without an id"
            );
        }

        Ok(entries)
    }

    /// Submits a validated entry and returns the record the service created.
    ///
    /// `logged_at` defaults to the time of the request.
    pub async fn create_entry(
        &self,
        entry: &NormalizedEntry,
        user_id: &str,
    ) -> Result<FoodLogEntry, RemoteError> {
        let date = entry.logged_at.unwrap_or_else(Utc::now);
        let body = CreateFoodLogRequest::new(entry, user_id, date);

        tracing::debug!(food_name = %entry.food_name, calories = entry.calories, "creating food log");

        let response = self
            .http
            .post(self.collection_url())
            .json(&body)
            .send()
            .await
            .map_err(RemoteError::network)?;

        let status = response.status();
        let record: FoodLogRecord = decode(check_status(response).await?).await?;

        let mut created = record.into_entry().ok_or_else(|| {
            RemoteError::service(status.as_u16(), "Created food log is missing its id")
        })?;

        // Fill in what the service did not echo back.
        if created.logged_at.is_none() {
            created.logged_at = Some(date);
        }
        if created.user_id.is_empty() {
            created.user_id = user_id.to_string();
        }
        if created.food_name.is_empty() {
            created.food_name = entry.food_name.clone();
        }

        Ok(created)
    }

    /// Deletes every entry and returns how many were removed.
    ///
    /// The service only allows this outside production; a refusal surfaces
    /// as [`RemoteError::Forbidden`].
    pub async fn clear_all(&self) -> Result<u64, RemoteError> {
        tracing::debug!(url = %self.collection_url(), "deleting all food logs");

        let response = self
            .http
            .delete(self.collection_url())
            .send()
            .await
            .map_err(RemoteError::network)?;

        let body: ClearResponse = decode(check_status(response).await?).await?;
        Ok(body.deleted())
    }

    fn collection_url(&self) -> String {
        self.build_url(COLLECTION_PATH)
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl FoodLogApi for RemoteClient {
    async fn fetch_all(&self) -> Result<Vec<FoodLogEntry>, RemoteError> {
        RemoteClient::fetch_all(self).await
    }

    async fn create_entry(
        &self,
        entry: &NormalizedEntry,
        user_id: &str,
    ) -> Result<FoodLogEntry, RemoteError> {
        RemoteClient::create_entry(self, entry, user_id).await
    }

    async fn clear_all(&self) -> Result<u64, RemoteError> {
        RemoteClient::clear_all(self).await
    }
}

/// Returns true if the service answers its liveness probe.
pub async fn check_server(url: &str) -> bool {
    match RemoteClient::with_timeout(url, HEALTH_TIMEOUT) {
        Ok(client) => client.health_check().await.is_ok(),
        Err(_) => false,
    }
}

/// Adds a scheme to bare `host:port` URLs and trims trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim();
    let base_url = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{}", url)
    };

    base_url.trim_end_matches('/').to_string()
}

/// Passes successful responses through and translates failures.
async fn check_status(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = error_message(response).await;
    tracing::warn!(status = status.as_u16(), %message, "food log service returned an error");

    if status == StatusCode::FORBIDDEN {
        Err(RemoteError::Forbidden { message })
    } else {
        Err(RemoteError::service(status.as_u16(), message))
    }
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    let fallback = || {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
    };

    match response.text().await {
        Ok(text) => serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(ErrorBody::into_message)
            .or_else(|| Some(text.trim().to_string()).filter(|t| !t.is_empty()))
            .unwrap_or_else(fallback),
        Err(_) => fallback(),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let status = response.status().as_u16();
    let bytes = response.bytes().await.map_err(RemoteError::network)?;

    serde_json::from_slice(&bytes)
        .map_err(|e| RemoteError::service(status, format!("Invalid response from server: {}", e)))
}
