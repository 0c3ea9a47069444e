/// Core error types for Stowaway
use thiserror::Error;

/// Result type alias using `StowawayError`
pub type Result<T> = std::result::Result<T, StowawayError>;

/// Core error type for Stowaway
///
/// Each variant is one failure kind that callers match on. The HTTP layer maps
/// them to status codes per endpoint.
#[derive(Error, Debug)]
pub enum StowawayError {
    /// Entity not found
    #[error("{entity} matching id {id} does not exist")]
    NotFound { entity: String, id: String },

    /// Payload failed validation
    #[error("{0}")]
    Validation(String),

    /// Unique constraint violated
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// External catalog service failed
    #[error("{0}")]
    Upstream(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Anything else
    #[error("{0}")]
    Internal(String),
}

impl StowawayError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an upstream error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// True when this is a not-found error for the given entity name
    pub fn is_not_found(&self, entity: &str) -> bool {
        matches!(self, Self::NotFound { entity: e, .. } if e == entity)
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for StowawayError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return Self::Duplicate(db_err.message().to_string());
            }
        }
        Self::Database(err.to_string())
    }
}
