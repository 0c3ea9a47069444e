//! Storage trait for the record collection

use crate::error::Result;
use crate::types::{
    Condition, ConditionId, CreateUser, Genre, GenreId, NewRecord, Record, RecordId, User, UserId,
};
use async_trait::async_trait;

/// Persistence operations used by the HTTP layer
///
/// Lookups return `Ok(None)` for a missing row. Mutations on a missing record
/// return `StowawayError::NotFound`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    // ========================================================================
    // Reference data
    // ========================================================================

    /// Get all conditions
    async fn get_all_conditions(&self) -> Result<Vec<Condition>>;

    /// Get condition by ID
    async fn get_condition(&self, id: ConditionId) -> Result<Option<Condition>>;

    /// Get all genres
    async fn get_all_genres(&self) -> Result<Vec<Genre>>;

    /// Get genre by ID
    async fn get_genre(&self, id: GenreId) -> Result<Option<Genre>>;

    // ========================================================================
    // Records
    // ========================================================================

    /// Get all records
    async fn get_all_records(&self) -> Result<Vec<Record>>;

    /// Get records owned by a user
    async fn get_records_by_user(&self, user_id: UserId) -> Result<Vec<Record>>;

    /// Get record by ID
    async fn get_record(&self, id: RecordId) -> Result<Option<Record>>;

    /// Insert a record together with its genre set
    async fn create_record(&self, record: NewRecord) -> Result<Record>;

    /// Overwrite every field of an existing record, genre set included
    async fn update_record(&self, id: RecordId, record: NewRecord) -> Result<()>;

    /// Delete a record
    async fn delete_record(&self, id: RecordId) -> Result<()>;

    // ========================================================================
    // Users
    // ========================================================================

    /// Create a user along with its password hash
    async fn create_user(&self, user: CreateUser, password_hash: &str) -> Result<User>;

    /// Get user by ID
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// Find user by username
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Get all users
    async fn get_all_users(&self) -> Result<Vec<User>>;

    /// Get user's password hash, if credentials are set
    async fn get_password_hash(&self, id: UserId) -> Result<Option<String>>;
}
