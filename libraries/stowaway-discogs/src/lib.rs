//! Stowaway Discogs Client
//!
//! Thin client for the Discogs database search endpoint. The response payload
//! is handed back untouched so the server can relay it as-is.
//!
//! # Example
//!
//! ```ignore
//! use stowaway_discogs::{DiscogsClient, DiscogsConfig};
//!
//! let client = DiscogsClient::new(DiscogsConfig::new("https://api.discogs.com").with_token("abc"))?;
//! let results = client.search("Misfits").await?;
//! println!("{}", results["pagination"]["items"]);
//! ```

mod client;
mod config;
mod error;

pub use client::DiscogsClient;
pub use config::DiscogsConfig;
pub use error::{DiscogsError, Result};
