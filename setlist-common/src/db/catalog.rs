//! Writes for reference data and the set/performance graph
//!
//! Each function inserts one row and returns its id.

use crate::db::models::PerformanceInput;
use crate::{Error, Result};
use sqlx::SqlitePool;
use tracing::debug;

pub async fn create_venue(pool: &SqlitePool, name: &str, city: Option<&str>) -> Result<i64> {
    let result = sqlx::query("INSERT INTO venues (name, city) VALUES (?, ?)")
        .bind(name)
        .bind(city)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn create_song(pool: &SqlitePool, title: &str, slug: Option<&str>) -> Result<i64> {
    let result = sqlx::query("INSERT INTO songs (title, slug) VALUES (?, ?)")
        .bind(title)
        .bind(slug)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Return the id of the named set type, creating it on first use
pub async fn ensure_set_type(pool: &SqlitePool, name: &str) -> Result<i64> {
    sqlx::query("INSERT OR IGNORE INTO set_types (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;
    let id: i64 = sqlx::query_scalar("SELECT id FROM set_types WHERE name = ?")
        .bind(name)
        .fetch_one(pool)
        .await?;
    Ok(id)
}

pub async fn create_musician(pool: &SqlitePool, name: &str) -> Result<i64> {
    let result = sqlx::query("INSERT INTO musicians (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn create_instrument(pool: &SqlitePool, name: &str, display_name: Option<&str>) -> Result<i64> {
    let result = sqlx::query("INSERT INTO instruments (name, display_name) VALUES (?, ?)")
        .bind(name)
        .bind(display_name)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn create_set(pool: &SqlitePool, event_id: i64, set_type_id: i64, position: i64) -> Result<i64> {
    let result = sqlx::query("INSERT INTO sets (event_id, set_type_id, position) VALUES (?, ?, ?)")
        .bind(event_id)
        .bind(set_type_id)
        .bind(position)
        .execute(pool)
        .await?;
    debug!("Added set {} to event {}", position, event_id);
    Ok(result.last_insert_rowid())
}

pub async fn create_performance(pool: &SqlitePool, set_id: i64, input: &PerformanceInput) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO performances (set_id, song_id, performance_order, segues_into,
                                  is_truncated_start, is_truncated_end, public_notes)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(set_id)
    .bind(input.song_id)
    .bind(input.performance_order)
    .bind(input.segues_into)
    .bind(input.is_truncated_start)
    .bind(input.is_truncated_end)
    .bind(&input.public_notes)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Credit a guest musician on one performance
pub async fn add_guest(
    pool: &SqlitePool,
    performance_id: i64,
    musician_id: i64,
    instrument_id: i64,
) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO performance_musicians (performance_id, musician_id, instrument_id) VALUES (?, ?, ?)",
    )
    .bind(performance_id)
    .bind(musician_id)
    .bind(instrument_id)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Set the public visibility flag of an event
pub async fn set_event_visibility(pool: &SqlitePool, event_id: i64, is_public: bool) -> Result<()> {
    let result = sqlx::query("UPDATE events SET is_public = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?")
        .bind(is_public)
        .bind(event_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("event {}", event_id)));
    }
    Ok(())
}
