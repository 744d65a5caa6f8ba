//! OAuth2 client-credentials token cache.
//!
//! Holds a single bearer token and its expiry. Concurrent callers that find
//! the slot expired may each refresh it; every exchange yields a valid
//! independent token, so refreshes are not serialized.

use chrono::{DateTime, Duration, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::ProviderError;
use crate::metrics;

/// Seconds subtracted from the provider-declared lifetime to absorb clock
/// skew and network latency.
pub const EXPIRY_MARGIN_SECS: i64 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

pub struct TokenCache {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    slot: RwLock<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(http: Client, token_url: String, client_id: String, client_secret: String) -> Self {
        Self {
            http,
            token_url,
            client_id,
            client_secret,
            slot: RwLock::new(None),
        }
    }

    /// Return the cached token, exchanging credentials first when it is
    /// missing or expired.
    pub async fn get_token(&self) -> Result<String, ProviderError> {
        let cached = self.slot.read().await.clone();
        if let Some(token) = cached.filter(|t| t.is_valid_at(Utc::now())) {
            return Ok(token.value);
        }

        let result = self.exchange().await;
        metrics::record_token_refresh(result.is_ok());
        let token = result?;

        tracing::debug!(expires_at = %token.expires_at, "refreshed Amadeus access token");
        let value = token.value.clone();
        *self.slot.write().await = Some(token);
        Ok(value)
    }

    pub async fn cached(&self) -> Option<CachedToken> {
        self.slot.read().await.clone()
    }

    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }

    async fn exchange(&self) -> Result<CachedToken, ProviderError> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(ProviderError::UpstreamAuth(
                "Amadeus client credentials are not configured".into(),
            ));
        }

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let resp = self
            .http
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| ProviderError::UpstreamAuth(format!("token request failed: {}", e)))?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(status = %status, "Amadeus token exchange rejected");
            return Err(ProviderError::UpstreamAuth(format!(
                "failed to get access token: {} {}",
                status,
                super::truncate(&body, 200)
            )));
        }

        let body: TokenResponse = resp
            .json()
            .await
            .map_err(|e| ProviderError::UpstreamAuth(format!("malformed token response: {}", e)))?;

        Ok(CachedToken {
            value: body.access_token,
            expires_at: Utc::now() + Duration::seconds(body.expires_in - EXPIRY_MARGIN_SECS),
        })
    }
}
