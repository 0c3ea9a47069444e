use crate::{conditions, genres, records, users, StorageError};
use async_trait::async_trait;
use sqlx::SqlitePool;
use stowaway_core::{error::Result, storage::RecordStore, types::*};

/// Local storage context using `SQLite`
pub struct LocalStorageContext {
    pool: SqlitePool,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the database at `database_url` and bring its schema up to date
    pub async fn connect(database_url: &str) -> std::result::Result<Self, StorageError> {
        let pool = crate::create_pool(database_url).await?;
        crate::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl RecordStore for LocalStorageContext {
    // Reference data
    async fn get_all_conditions(&self) -> Result<Vec<Condition>> {
        conditions::get_all(&self.pool).await
    }

    async fn get_condition(&self, id: ConditionId) -> Result<Option<Condition>> {
        conditions::get_by_id(&self.pool, id).await
    }

    async fn get_all_genres(&self) -> Result<Vec<Genre>> {
        genres::get_all(&self.pool).await
    }

    async fn get_genre(&self, id: GenreId) -> Result<Option<Genre>> {
        genres::get_by_id(&self.pool, id).await
    }

    // Records
    async fn get_all_records(&self) -> Result<Vec<Record>> {
        records::get_all(&self.pool).await
    }

    async fn get_records_by_user(&self, user_id: UserId) -> Result<Vec<Record>> {
        records::get_by_user(&self.pool, user_id).await
    }

    async fn get_record(&self, id: RecordId) -> Result<Option<Record>> {
        records::get_by_id(&self.pool, id).await
    }

    async fn create_record(&self, record: NewRecord) -> Result<Record> {
        records::create(&self.pool, record).await
    }

    async fn update_record(&self, id: RecordId, record: NewRecord) -> Result<()> {
        records::update(&self.pool, id, record).await
    }

    async fn delete_record(&self, id: RecordId) -> Result<()> {
        records::delete(&self.pool, id).await
    }

    // Users
    async fn create_user(&self, user: CreateUser, password_hash: &str) -> Result<User> {
        users::create(&self.pool, user, password_hash).await
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        users::get_by_id(&self.pool, id).await
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        users::find_by_username(&self.pool, username).await
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        users::get_all(&self.pool).await
    }

    async fn get_password_hash(&self, id: UserId) -> Result<Option<String>> {
        users::get_password_hash(&self.pool, id).await
    }
}
