//! Loading an event's set/performance graph for rendering

use crate::model::{GuestCredit, SetlistPerformance, SetlistSet, SongRef};
use crate::Result;
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, sqlx::FromRow)]
struct SetRow {
    id: i64,
    position: i64,
    set_type: String,
}

#[derive(Debug, sqlx::FromRow)]
struct PerformanceRow {
    id: i64,
    set_id: i64,
    performance_order: i64,
    segues_into: bool,
    is_truncated_start: bool,
    is_truncated_end: bool,
    public_notes: Option<String>,
    song_title: Option<String>,
    song_slug: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
struct GuestRow {
    performance_id: i64,
    musician_name: String,
    instrument_name: String,
}

/// Load the ordered sets of an event with their performances and guests
///
/// Sets come back by `position`, performances by `performance_order` and
/// guest credits in the order they were entered.
pub async fn load_setlist(pool: &SqlitePool, event_id: i64) -> Result<Vec<SetlistSet>> {
    let set_rows: Vec<SetRow> = sqlx::query_as(
        r#"
        SELECT s.id, s.position, st.name AS set_type
        FROM sets s
        JOIN set_types st ON st.id = s.set_type_id
        WHERE s.event_id = ?
        ORDER BY s.position
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    let performance_rows: Vec<PerformanceRow> = sqlx::query_as(
        r#"
        SELECT p.id, p.set_id, p.performance_order, p.segues_into,
               p.is_truncated_start, p.is_truncated_end, p.public_notes,
               so.title AS song_title, so.slug AS song_slug
        FROM performances p
        JOIN sets s ON s.id = p.set_id
        LEFT JOIN songs so ON so.id = p.song_id
        WHERE s.event_id = ?
        ORDER BY s.position, p.performance_order
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    let guest_rows: Vec<GuestRow> = sqlx::query_as(
        r#"
        SELECT pm.performance_id, m.name AS musician_name,
               COALESCE(i.display_name, i.name) AS instrument_name
        FROM performance_musicians pm
        JOIN performances p ON p.id = pm.performance_id
        JOIN sets s ON s.id = p.set_id
        JOIN musicians m ON m.id = pm.musician_id
        JOIN instruments i ON i.id = pm.instrument_id
        WHERE s.event_id = ?
        ORDER BY pm.id
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    debug!(
        "Loaded event {}: {} sets, {} performances, {} guest credits",
        event_id,
        set_rows.len(),
        performance_rows.len(),
        guest_rows.len()
    );

    let mut guests: HashMap<i64, Vec<GuestCredit>> = HashMap::new();
    for row in guest_rows {
        guests.entry(row.performance_id).or_default().push(GuestCredit {
            musician_name: row.musician_name,
            instrument_name: row.instrument_name,
        });
    }

    let mut performances: HashMap<i64, Vec<SetlistPerformance>> = HashMap::new();
    for row in performance_rows {
        let song = row.song_title.map(|title| SongRef {
            title,
            slug: row.song_slug,
        });
        performances.entry(row.set_id).or_default().push(SetlistPerformance {
            id: row.id,
            song,
            performance_order: row.performance_order,
            segues_into: row.segues_into,
            is_truncated_start: row.is_truncated_start,
            is_truncated_end: row.is_truncated_end,
            public_notes: row.public_notes,
            guests: guests.remove(&row.id).unwrap_or_default(),
        });
    }

    Ok(set_rows
        .into_iter()
        .map(|row| SetlistSet {
            id: row.id,
            position: row.position,
            set_type: row.set_type,
            performances: performances.remove(&row.id).unwrap_or_default(),
        })
        .collect())
}
