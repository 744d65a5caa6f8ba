//! Client for the hotel and location data provider (Amadeus).
//!
//! Every call is bearer-authenticated with a token from [`TokenCache`].
//! Lookup failures never leave this module as errors: the public lookup
//! methods log them and degrade to `None` or an empty list. Only the token
//! exchange surfaces [`ProviderError::UpstreamAuth`] to callers.

use std::time::Duration;

use anyhow::Context;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::AmadeusConfig;
use crate::metrics;

pub mod fallback;
pub mod hotels;
pub mod locations;
pub mod token;

pub use fallback::FallbackCatalog;
pub use hotels::{rating_label, stars_for_score, MAX_HOTELS, RATING_NOT_AVAILABLE};
pub use token::{CachedToken, TokenCache, EXPIRY_MARGIN_SECS};

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Client-credentials exchange failed.
    #[error("upstream authentication failed: {0}")]
    UpstreamAuth(String),

    #[error("{endpoint} request failed: {source}")]
    Http {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

pub struct AmadeusClient {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenCache,
}

impl AmadeusClient {
    pub fn new(cfg: &AmadeusConfig, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .context("failed to build Amadeus HTTP client")?;

        let base_url = cfg.base_url.trim_end_matches('/').to_string();
        let tokens = TokenCache::new(
            http.clone(),
            format!("{}/v1/security/oauth2/token", base_url),
            cfg.client_id.clone(),
            cfg.client_secret.clone(),
        );

        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenCache {
        &self.tokens
    }

    /// Cached bearer token, refreshed when expired or absent.
    pub async fn get_token(&self) -> Result<String, ProviderError> {
        self.tokens.get_token().await
    }

    /// Authenticated GET that insists on HTTP 200 and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        token: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let result = self.send_get(endpoint, path, token, query).await;
        metrics::record_upstream(endpoint, result.is_ok());
        result
    }

    async fn send_get<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        token: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(|source| ProviderError::Http { endpoint, source })?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                endpoint,
                status: status.as_u16(),
                body: truncate(&body, 200),
            });
        }

        resp.json::<T>()
            .await
            .map_err(|source| ProviderError::Decode { endpoint, source })
    }
}

fn truncate(body: &str, max_chars: usize) -> String {
    match body.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &body[..idx]),
        None => body.to_string(),
    }
}
