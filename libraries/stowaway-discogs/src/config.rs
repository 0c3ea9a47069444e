//! Client configuration.

use serde::{Deserialize, Serialize};

/// Connection settings for the Discogs API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscogsConfig {
    /// API root, e.g. `https://api.discogs.com`
    pub base_url: String,

    /// Personal access token; search requires one on the public API
    pub token: Option<String>,

    /// Discogs rejects requests without a descriptive User-Agent
    pub user_agent: String,

    pub timeout_secs: u64,
}

impl DiscogsConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            user_agent: format!("Stowaway/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}
