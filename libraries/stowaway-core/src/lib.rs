//! Stowaway Core
//!
//! Domain types, traits, and error handling shared by the Stowaway storage
//! layer, the catalog search client, and the HTTP server.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Record`, `Condition`, `Genre`, `User` and their write payloads
//! - **Core Traits**: `RecordStore` (persistence) and `CatalogSearch` (external lookup)
//! - **Error Handling**: Unified `StowawayError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use stowaway_core::types::{Condition, Genre, NewRecord, RecordFields};
//!
//! let condition = Condition { id: 1, label: "Mint".to_string() };
//! let genres = vec![Genre { id: 4, name: "Punk".to_string() }];
//!
//! let fields = RecordFields {
//!     artist: "Misfits".to_string(),
//!     album: "Static Age".to_string(),
//!     year_released: Some(1980),
//!     image_url: "https://example.com/static-age.jpg".to_string(),
//! };
//!
//! let record = NewRecord::new(fields, &condition, &genres, 5);
//! assert_eq!(record.condition_id, 1);
//! assert_eq!(record.user_id, 5);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use catalog::CatalogSearch;
pub use error::{Result, StowawayError};
pub use storage::RecordStore;

pub use types::{
    Condition, ConditionId, CreateUser, Genre, GenreId, NewRecord, Record, RecordFields, RecordId,
    User, UserId,
};
