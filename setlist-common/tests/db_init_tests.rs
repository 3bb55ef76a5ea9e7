//! Database initialization tests

use setlist_common::db::init::init_database;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let temp = tempfile::tempdir().unwrap();
    let db_path = temp.path().join("nested").join("archive.db");

    let result = init_database(&db_path).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let temp = tempfile::tempdir().unwrap();
    let db_path = temp.path().join("archive.db");

    let pool1 = init_database(&db_path).await.unwrap();
    pool1.close().await;

    let pool2 = init_database(&db_path).await;
    assert!(pool2.is_ok(), "Failed to open existing database: {:?}", pool2.err());
}

#[tokio::test]
async fn test_all_tables_created() {
    let temp = tempfile::tempdir().unwrap();
    let pool = init_database(&temp.path().join("archive.db")).await.unwrap();

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    for expected in [
        "events",
        "instruments",
        "musicians",
        "performance_musicians",
        "performances",
        "set_types",
        "sets",
        "songs",
        "venues",
    ] {
        assert!(tables.iter().any(|t| t == expected), "missing table {}", expected);
    }
}

#[tokio::test]
async fn test_schema_rejects_day_without_month() {
    let temp = tempfile::tempdir().unwrap();
    let pool = init_database(&temp.path().join("archive.db")).await.unwrap();

    let result = sqlx::query("INSERT INTO events (slug, year, month, day) VALUES ('x', 1978, NULL, 5)")
        .execute(&pool)
        .await;

    assert!(result.is_err(), "CHECK constraint should reject day without month");
}
