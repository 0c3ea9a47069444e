use sqlx::{sqlite::SqliteRow, Row, SqliteConnection, SqlitePool};
use std::collections::{BTreeSet, HashMap};
use stowaway_core::{error::Result, types::*};

fn genre_from_row(row: &SqliteRow) -> Result<Genre> {
    Ok(Genre {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Genre>> {
    let rows = sqlx::query("SELECT id, name FROM genres ORDER BY id")
        .fetch_all(pool)
        .await?;

    rows.iter().map(genre_from_row).collect()
}

pub async fn get_by_id(pool: &SqlitePool, id: GenreId) -> Result<Option<Genre>> {
    let row = sqlx::query("SELECT id, name FROM genres WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(genre_from_row).transpose()
}

/// Get all genres attached to a record
pub async fn get_by_record(pool: &SqlitePool, record_id: RecordId) -> Result<Vec<Genre>> {
    let rows = sqlx::query(
        "SELECT g.id, g.name
         FROM genres g
         INNER JOIN record_genres rg ON g.id = rg.genre_id
         WHERE rg.record_id = ?
         ORDER BY g.id",
    )
    .bind(record_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(genre_from_row).collect()
}

/// Get the genre set of every record, keyed by record id
pub async fn get_grouped_by_record(pool: &SqlitePool) -> Result<HashMap<RecordId, Vec<Genre>>> {
    let rows = sqlx::query(
        "SELECT rg.record_id, g.id, g.name
         FROM genres g
         INNER JOIN record_genres rg ON g.id = rg.genre_id
         ORDER BY rg.record_id, g.id",
    )
    .fetch_all(pool)
    .await?;

    let mut grouped: HashMap<RecordId, Vec<Genre>> = HashMap::new();
    for row in &rows {
        let record_id: RecordId = row.try_get("record_id")?;
        grouped.entry(record_id).or_default().push(genre_from_row(row)?);
    }

    Ok(grouped)
}

/// Replace the genre set of a record
///
/// Runs on the caller's connection so it can share a transaction with the
/// record write.
pub async fn set_for_record(
    conn: &mut SqliteConnection,
    record_id: RecordId,
    genre_ids: &BTreeSet<GenreId>,
) -> Result<()> {
    sqlx::query("DELETE FROM record_genres WHERE record_id = ?")
        .bind(record_id)
        .execute(&mut *conn)
        .await?;

    for genre_id in genre_ids {
        sqlx::query(
            "INSERT OR IGNORE INTO record_genres (record_id, genre_id)
             VALUES (?, ?)",
        )
        .bind(record_id)
        .bind(genre_id)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
