//! Song listings with performance counts
//!
//! Counts are aggregated on read from public events only, so hiding an event
//! removes its performances from every total.

use crate::db::events::{order_by, EVENT_COLUMNS};
use crate::db::models::{EventRow, SongStats};
use crate::model::EventSummary;
use crate::Result;
use sqlx::SqlitePool;

fn stats_select() -> String {
    format!(
        r#"
        SELECT so.id, so.title, so.slug,
            (SELECT COUNT(*)
             FROM performances p
             JOIN sets s ON s.id = p.set_id
             JOIN events e ON e.id = s.event_id
             WHERE p.song_id = so.id AND e.is_public = 1) AS times_played,
            (SELECT e.slug
             FROM performances p
             JOIN sets s ON s.id = p.set_id
             JOIN events e ON e.id = s.event_id
             WHERE p.song_id = so.id AND e.is_public = 1 AND e.year IS NOT NULL
             ORDER BY {asc} LIMIT 1) AS first_played,
            (SELECT e.slug
             FROM performances p
             JOIN sets s ON s.id = p.set_id
             JOIN events e ON e.id = s.event_id
             WHERE p.song_id = so.id AND e.is_public = 1 AND e.year IS NOT NULL
             ORDER BY {desc} LIMIT 1) AS last_played
        FROM songs so
        "#,
        asc = order_by("ASC"),
        desc = order_by("DESC")
    )
}

pub async fn count_songs(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Songs ordered by play count (most played first), then title
pub async fn list_song_stats(pool: &SqlitePool, limit: i64, offset: i64) -> Result<Vec<SongStats>> {
    let sql = format!(
        "{} ORDER BY times_played DESC, so.title ASC, so.id ASC LIMIT ? OFFSET ?",
        stats_select()
    );
    let songs = sqlx::query_as::<_, SongStats>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(songs)
}

pub async fn get_song_stats(pool: &SqlitePool, slug: &str) -> Result<Option<SongStats>> {
    let sql = format!("{} WHERE so.slug = ?", stats_select());
    let song = sqlx::query_as::<_, SongStats>(&sql)
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(song)
}

/// Public events where a song was played, chronologically, each listed once
pub async fn list_song_events(pool: &SqlitePool, song_id: i64) -> Result<Vec<EventSummary>> {
    let sql = format!(
        r#"
        SELECT {columns}
        FROM events e
        LEFT JOIN venues v ON v.id = e.venue_id
        WHERE e.is_public = 1 AND e.id IN (
            SELECT s.event_id FROM performances p
            JOIN sets s ON s.id = p.set_id
            WHERE p.song_id = ?
        )
        ORDER BY e.year IS NULL, {order}
        "#,
        columns = EVENT_COLUMNS,
        order = order_by("ASC")
    );
    let rows: Vec<EventRow> = sqlx::query_as(&sql).bind(song_id).fetch_all(pool).await?;
    Ok(rows.iter().map(EventRow::summary).collect())
}
