//! Record queries
//!
//! Reads join the condition and owner in one query and attach the genre set
//! afterwards. Writes touch `records` and `record_genres` inside a single
//! transaction.

use crate::genres;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use stowaway_core::{error::Result, types::*, StowawayError};

const SELECT_RECORDS: &str = "SELECT r.id, r.artist, r.album, r.year_released, r.image_url,
        c.id AS condition_id, c.label AS condition_label,
        u.id AS user_id, u.username, u.first_name, u.last_name
 FROM records r
 INNER JOIN conditions c ON c.id = r.condition_id
 INNER JOIN users u ON u.id = r.user_id";

fn record_from_row(row: &SqliteRow, genres: Vec<Genre>) -> Result<Record> {
    Ok(Record {
        id: row.try_get("id")?,
        artist: row.try_get("artist")?,
        album: row.try_get("album")?,
        year_released: row.try_get("year_released")?,
        image_url: row.try_get("image_url")?,
        condition: Condition {
            id: row.try_get("condition_id")?,
            label: row.try_get("condition_label")?,
        },
        genres,
        user: User {
            id: row.try_get("user_id")?,
            username: row.try_get("username")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
        },
    })
}

async fn with_genres(pool: &SqlitePool, rows: Vec<SqliteRow>) -> Result<Vec<Record>> {
    let mut grouped = genres::get_grouped_by_record(pool).await?;

    rows.iter()
        .map(|row| {
            let id: RecordId = row.try_get("id")?;
            record_from_row(row, grouped.remove(&id).unwrap_or_default())
        })
        .collect()
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Record>> {
    let sql = format!("{SELECT_RECORDS} ORDER BY r.id");
    let rows = sqlx::query(&sql).fetch_all(pool).await?;

    with_genres(pool, rows).await
}

pub async fn get_by_user(pool: &SqlitePool, user_id: UserId) -> Result<Vec<Record>> {
    let sql = format!("{SELECT_RECORDS} WHERE r.user_id = ? ORDER BY r.id");
    let rows = sqlx::query(&sql).bind(user_id).fetch_all(pool).await?;

    with_genres(pool, rows).await
}

pub async fn get_by_id(pool: &SqlitePool, id: RecordId) -> Result<Option<Record>> {
    let sql = format!("{SELECT_RECORDS} WHERE r.id = ?");
    let Some(row) = sqlx::query(&sql).bind(id).fetch_optional(pool).await? else {
        return Ok(None);
    };

    let genres = genres::get_by_record(pool, id).await?;
    record_from_row(&row, genres).map(Some)
}

pub async fn create(pool: &SqlitePool, record: NewRecord) -> Result<Record> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO records (artist, album, year_released, image_url, condition_id, user_id)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&record.artist)
    .bind(&record.album)
    .bind(record.year_released)
    .bind(&record.image_url)
    .bind(record.condition_id)
    .bind(record.user_id)
    .execute(&mut *tx)
    .await?;

    let id = result.last_insert_rowid();
    genres::set_for_record(&mut tx, id, &record.genre_ids).await?;
    tx.commit().await?;

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StowawayError::internal("Failed to retrieve created record"))
}

pub async fn update(pool: &SqlitePool, id: RecordId, record: NewRecord) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "UPDATE records
         SET artist = ?, album = ?, year_released = ?, image_url = ?,
             condition_id = ?, user_id = ?, updated_at = datetime('now')
         WHERE id = ?",
    )
    .bind(&record.artist)
    .bind(&record.album)
    .bind(record.year_released)
    .bind(&record.image_url)
    .bind(record.condition_id)
    .bind(record.user_id)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(StowawayError::not_found("Record", id));
    }

    genres::set_for_record(&mut tx, id, &record.genre_ids).await?;
    tx.commit().await?;

    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: RecordId) -> Result<()> {
    let result = sqlx::query("DELETE FROM records WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(StowawayError::not_found("Record", id));
    }

    Ok(())
}
