use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use memeproto_core::AppError;
use reqwest::Client;
use serde::Deserialize;

use crate::FEED_LIMIT;

/// One row of the `/api/activity` response, as the widget needs it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub token_name: Option<String>,
    #[serde(default)]
    pub transaction_signature: Option<String>,
    #[serde(default)]
    pub amount_sol: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ActivityEnvelope {
    #[serde(default)]
    activities: Option<Vec<FeedItem>>,
}

/// Where the feed gets its records from.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    async fn fetch_recent_buys(&self) -> Result<Vec<FeedItem>, AppError>;
}

/// HTTP client for the activity endpoint.
#[derive(Clone)]
pub struct ActivityClient {
    http: Client,
    base_url: String,
}

impl ActivityClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| AppError::Http(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/activity?type=buy&limit={}", self.base_url, FEED_LIMIT)
    }
}

#[async_trait]
impl ActivitySource for ActivityClient {
    async fn fetch_recent_buys(&self) -> Result<Vec<FeedItem>, AppError> {
        let resp = self
            .http
            .get(self.endpoint())
            .send()
            .await
            .map_err(|e| AppError::Http(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(AppError::Http(format!(
                "Failed to fetch (status {})",
                resp.status().as_u16()
            )));
        }

        let envelope: ActivityEnvelope = resp
            .json()
            .await
            .map_err(|e| AppError::Http(e.to_string()))?;
        Ok(envelope.activities.unwrap_or_default())
    }
}
