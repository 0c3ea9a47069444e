use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use stowaway_core::{error::Result, types::*};

fn condition_from_row(row: &SqliteRow) -> Result<Condition> {
    Ok(Condition {
        id: row.try_get("id")?,
        label: row.try_get("label")?,
    })
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Condition>> {
    let rows = sqlx::query("SELECT id, label FROM conditions ORDER BY id")
        .fetch_all(pool)
        .await?;

    rows.iter().map(condition_from_row).collect()
}

pub async fn get_by_id(pool: &SqlitePool, id: ConditionId) -> Result<Option<Condition>> {
    let row = sqlx::query("SELECT id, label FROM conditions WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(condition_from_row).transpose()
}
