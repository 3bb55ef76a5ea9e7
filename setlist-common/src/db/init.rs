//! Database initialization
//!
//! Opens (creating if needed) the archive database and makes sure every
//! table exists. Table creation is idempotent, so this runs on every start.

use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Open the database at `db_path`, creating file and schema when missing
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Foreign keys are per connection, so they go on the connect options
    // rather than a one-off PRAGMA.
    let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create all archive tables if they do not exist yet
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_venues_table(pool).await?;
    create_events_table(pool).await?;
    create_set_types_table(pool).await?;
    create_sets_table(pool).await?;
    create_songs_table(pool).await?;
    create_musicians_table(pool).await?;
    create_instruments_table(pool).await?;
    create_performances_table(pool).await?;
    create_performance_musicians_table(pool).await?;
    Ok(())
}

async fn create_venues_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venues (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            city TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_events_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            slug TEXT NOT NULL UNIQUE,
            year INTEGER,
            month INTEGER CHECK (month IS NULL OR month BETWEEN 1 AND 12),
            day INTEGER CHECK (day IS NULL OR day BETWEEN 1 AND 31),
            show_timing TEXT CHECK (show_timing IS NULL OR show_timing IN ('Early', 'Late')),
            display_date TEXT,
            sort_date DATE,
            is_public INTEGER NOT NULL DEFAULT 0,
            venue_id INTEGER REFERENCES venues(id) ON DELETE SET NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (day IS NULL OR month IS NOT NULL)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_events_date ON events(year, month, day)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_set_types_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS set_types (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_sets_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            event_id INTEGER NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            set_type_id INTEGER NOT NULL REFERENCES set_types(id),
            position INTEGER NOT NULL,
            UNIQUE (event_id, position)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_songs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            slug TEXT UNIQUE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_musicians_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS musicians (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_instruments_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS instruments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            display_name TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_performances_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS performances (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            set_id INTEGER NOT NULL REFERENCES sets(id) ON DELETE CASCADE,
            song_id INTEGER REFERENCES songs(id) ON DELETE SET NULL,
            performance_order INTEGER NOT NULL,
            segues_into INTEGER NOT NULL DEFAULT 0,
            is_truncated_start INTEGER NOT NULL DEFAULT 0,
            is_truncated_end INTEGER NOT NULL DEFAULT 0,
            public_notes TEXT,
            UNIQUE (set_id, performance_order)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_performances_song ON performances(song_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_performance_musicians_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS performance_musicians (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            performance_id INTEGER NOT NULL REFERENCES performances(id) ON DELETE CASCADE,
            musician_id INTEGER NOT NULL REFERENCES musicians(id),
            instrument_id INTEGER NOT NULL REFERENCES instruments(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
