/// Storage-specific errors
use thiserror::Error;

/// Errors raised while opening or migrating the database
#[derive(Error, Debug)]
pub enum StorageError {
    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for stowaway_core::StowawayError {
    fn from(err: StorageError) -> Self {
        stowaway_core::StowawayError::Database(err.to_string())
    }
}
