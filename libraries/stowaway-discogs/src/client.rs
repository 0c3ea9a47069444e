//! Discogs search client.

use crate::config::DiscogsConfig;
use crate::error::{DiscogsError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use stowaway_core::CatalogSearch;
use tracing::{debug, warn};

/// Client for the Discogs database search endpoint.
pub struct DiscogsClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl DiscogsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: DiscogsConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(DiscogsError::InvalidUrl("URL cannot be empty".into()));
        }

        let parsed = url::Url::parse(&config.base_url)
            .map_err(|e| DiscogsError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(DiscogsError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token,
        })
    }

    /// Get the API root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run a free-text database search and return the raw JSON payload.
    pub async fn search(&self, query: &str) -> Result<serde_json::Value> {
        let url = format!("{}/database/search", self.base_url);

        debug!(url = %url, query, "Searching Discogs");

        let mut request = self.http.get(&url).query(&[("q", query)]);
        if let Some(token) = &self.token {
            request = request.header(
                reqwest::header::AUTHORIZATION,
                format!("Discogs token={}", token),
            );
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                DiscogsError::Unreachable(e.to_string())
            } else {
                DiscogsError::Request(e)
            }
        })?;

        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Discogs rate limit hit");
            return Err(DiscogsError::RateLimited);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Discogs search failed");
            return Err(DiscogsError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| DiscogsError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl CatalogSearch for DiscogsClient {
    async fn search(&self, query: &str) -> stowaway_core::Result<serde_json::Value> {
        Ok(DiscogsClient::search(self, query).await?)
    }
}
