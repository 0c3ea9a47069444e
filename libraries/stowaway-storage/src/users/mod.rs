//! User management and authentication queries

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use stowaway_core::{error::Result, types::*, StowawayError};

fn user_from_row(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
    })
}

/// Create a user and store its credentials
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `user` - Profile fields
/// * `password_hash` - Hashed password (should already be hashed with bcrypt)
pub async fn create(pool: &SqlitePool, user: CreateUser, password_hash: &str) -> Result<User> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO users (username, first_name, last_name)
         VALUES (?, ?, ?)",
    )
    .bind(&user.username)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .execute(&mut *tx)
    .await?;

    let id = result.last_insert_rowid();

    sqlx::query(
        "INSERT INTO user_credentials (user_id, password_hash, updated_at)
         VALUES (?, ?, datetime('now'))",
    )
    .bind(id)
    .bind(password_hash)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StowawayError::internal("Failed to retrieve created user"))
}

pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, username, first_name, last_name FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(user_from_row).transpose()
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row =
        sqlx::query("SELECT id, username, first_name, last_name FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await?;

    row.as_ref().map(user_from_row).transpose()
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, username, first_name, last_name FROM users ORDER BY username")
        .fetch_all(pool)
        .await?;

    rows.iter().map(user_from_row).collect()
}

/// Get user's password hash for authentication
///
/// Returns None if the user has no credentials
pub async fn get_password_hash(pool: &SqlitePool, user_id: UserId) -> Result<Option<String>> {
    let row = sqlx::query("SELECT password_hash FROM user_credentials WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    row.map(|r| r.try_get::<String, _>("password_hash"))
        .transpose()
        .map_err(Into::into)
}
