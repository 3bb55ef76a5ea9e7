//! Event queries and writes
//!
//! Every event write recomputes the slug and sort date from the date fields,
//! so callers never maintain them by hand.

use crate::db::models::{EventInput, EventRecord, EventRow};
use crate::display::sort_date;
use crate::model::{EventDate, EventSummary, ShowTiming};
use crate::ordering::Adjacent;
use crate::slug::{generate_slug, resolve_collision};
use crate::{Error, Result};
use sqlx::SqlitePool;
use std::collections::HashSet;
use tracing::{debug, info};

pub(crate) const EVENT_COLUMNS: &str = "e.id, e.slug, e.year, e.month, e.day, e.show_timing, \
     e.display_date, e.is_public, v.name AS venue_name, v.city AS venue_city";

/// Show timing rank: absent < Early < Late
const TIMING_RANK: &str =
    "(CASE e.show_timing WHEN 'Early' THEN 1 WHEN 'Late' THEN 2 ELSE 0 END)";

/// Chronological key as a row value; unknown month/day sort as 0
fn order_key() -> String {
    format!(
        "(e.year, COALESCE(e.month, 0), COALESCE(e.day, 0), {}, e.id)",
        TIMING_RANK
    )
}

/// Chronological ORDER BY clause in the given direction
pub(crate) fn order_by(direction: &str) -> String {
    format!(
        "e.year {d}, COALESCE(e.month, 0) {d}, COALESCE(e.day, 0) {d}, {rank} {d}, e.id {d}",
        d = direction,
        rank = TIMING_RANK
    )
}

/// Reject dates that cannot be stored
pub fn validate_date(date: &EventDate) -> Result<()> {
    if date.day.is_some() && date.month.is_none() {
        return Err(Error::InvalidInput(
            "day is set but month is unknown".to_string(),
        ));
    }
    if let Some(month) = date.month {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidInput(format!("month out of range: {}", month)));
        }
    }
    if let Some(day) = date.day {
        if !(1..=31).contains(&day) {
            return Err(Error::InvalidInput(format!("day out of range: {}", day)));
        }
    }
    Ok(())
}

/// Insert a new event (`id = None`) or update an existing one
///
/// Returns the stored summary including the freshly derived slug.
pub async fn save_event(pool: &SqlitePool, id: Option<i64>, input: &EventInput) -> Result<EventSummary> {
    validate_date(&input.date)?;

    // Take the write lock before reading taken slugs so concurrent saves
    // of the same date serialize instead of racing to the same slug.
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let base = generate_slug(&input.date);
    let year_prefix = base.split('-').next().unwrap_or_default().to_string();
    let taken: HashSet<String> = sqlx::query_scalar::<_, String>(
        "SELECT slug FROM events WHERE slug LIKE ? || '%' AND id IS NOT ?",
    )
    .bind(&year_prefix)
    .bind(id)
    .fetch_all(&mut *tx)
    .await?
    .into_iter()
    .collect();
    let slug = resolve_collision(&base, |candidate| taken.contains(candidate));
    if slug != base {
        debug!("Slug {} taken, using {}", base, slug);
    }

    let show_timing = input.date.show_timing.map(|t| t.as_str());
    let sort = sort_date(&input.date);

    let event_id = match id {
        None => {
            let result = sqlx::query(
                r#"
                INSERT INTO events (slug, year, month, day, show_timing, display_date, sort_date, is_public, venue_id)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&slug)
            .bind(input.date.year)
            .bind(input.date.month)
            .bind(input.date.day)
            .bind(show_timing)
            .bind(&input.display_date)
            .bind(sort)
            .bind(input.is_public)
            .bind(input.venue_id)
            .execute(&mut *tx)
            .await?;
            result.last_insert_rowid()
        }
        Some(existing) => {
            let result = sqlx::query(
                r#"
                UPDATE events
                SET slug = ?, year = ?, month = ?, day = ?, show_timing = ?, display_date = ?,
                    sort_date = ?, is_public = ?, venue_id = ?, updated_at = CURRENT_TIMESTAMP
                WHERE id = ?
                "#,
            )
            .bind(&slug)
            .bind(input.date.year)
            .bind(input.date.month)
            .bind(input.date.day)
            .bind(show_timing)
            .bind(&input.display_date)
            .bind(sort)
            .bind(input.is_public)
            .bind(input.venue_id)
            .bind(existing)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                return Err(Error::NotFound(format!("event {}", existing)));
            }
            existing
        }
    };

    tx.commit().await?;
    info!("Saved event {} as {}", event_id, slug);

    Ok(EventSummary {
        id: event_id,
        slug,
        date: input.date,
        display_date: input.display_date.clone(),
        is_public: input.is_public,
    })
}

/// Delete an event; its sets and performances go with it
pub async fn delete_event(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM events WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("event {}", id)));
    }
    info!("Deleted event {}", id);
    Ok(())
}

/// Look up a public event by slug
pub async fn get_public_event(pool: &SqlitePool, slug: &str) -> Result<Option<EventRecord>> {
    let sql = format!(
        "SELECT {} FROM events e LEFT JOIN venues v ON v.id = e.venue_id \
         WHERE e.slug = ? AND e.is_public = 1",
        EVENT_COLUMNS
    );
    let row: Option<EventRow> = sqlx::query_as(&sql).bind(slug).fetch_optional(pool).await?;
    Ok(row.map(EventRecord::from))
}

/// Count public events, optionally restricted to one year
pub async fn count_public_events(pool: &SqlitePool, year: Option<i32>) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM events e WHERE e.is_public = 1 AND (? IS NULL OR e.year = ?)",
    )
    .bind(year)
    .bind(year)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Public events in chronological order; undated events come last
pub async fn list_public_events(
    pool: &SqlitePool,
    year: Option<i32>,
    limit: i64,
    offset: i64,
) -> Result<Vec<EventSummary>> {
    let sql = format!(
        "SELECT {} FROM events e LEFT JOIN venues v ON v.id = e.venue_id \
         WHERE e.is_public = 1 AND (? IS NULL OR e.year = ?) \
         ORDER BY e.year IS NULL, {} LIMIT ? OFFSET ?",
        EVENT_COLUMNS,
        order_by("ASC")
    );
    let rows: Vec<EventRow> = sqlx::query_as(&sql)
        .bind(year)
        .bind(year)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(EventRow::summary).collect())
}

/// Previous and next public events around `reference`
///
/// Uses the same order as [`crate::ordering::find_adjacent`]. A reference
/// without a year has no neighbours.
pub async fn find_adjacent_events(
    pool: &SqlitePool,
    reference: &EventSummary,
) -> Result<Adjacent<EventSummary>> {
    let Some(year) = reference.date.year else {
        return Ok(Adjacent {
            previous: None,
            next: None,
        });
    };

    let previous = adjacent_query(pool, reference, year, "<", "DESC").await?;
    let next = adjacent_query(pool, reference, year, ">", "ASC").await?;

    Ok(Adjacent { previous, next })
}

async fn adjacent_query(
    pool: &SqlitePool,
    reference: &EventSummary,
    year: i32,
    comparison: &str,
    direction: &str,
) -> Result<Option<EventSummary>> {
    let sql = format!(
        "SELECT {} FROM events e LEFT JOIN venues v ON v.id = e.venue_id \
         WHERE e.is_public = 1 AND e.year IS NOT NULL AND {} {} (?, ?, ?, ?, ?) \
         ORDER BY {} LIMIT 1",
        EVENT_COLUMNS,
        order_key(),
        comparison,
        order_by(direction)
    );
    let row: Option<EventRow> = sqlx::query_as(&sql)
        .bind(year)
        .bind(reference.date.month.unwrap_or(0))
        .bind(reference.date.day.unwrap_or(0))
        .bind(ShowTiming::rank(reference.date.show_timing))
        .bind(reference.id)
        .fetch_optional(pool)
        .await?;
    Ok(row.as_ref().map(EventRow::summary))
}
