//! Integration tests for setlist-web API endpoints
//!
//! Each test seeds a throwaway archive database and drives the router with
//! `oneshot` requests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use setlist_common::db::catalog::{
    add_guest, create_instrument, create_musician, create_performance, create_set, create_song,
    create_venue, ensure_set_type,
};
use setlist_common::db::events::save_event;
use setlist_common::db::{init_database, EventInput, PerformanceInput};
use setlist_common::model::{EventDate, ShowTiming};
use setlist_web::{build_router, AppState};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

/// Test helper: empty archive database in a temp dir
async fn setup_test_db() -> (TempDir, SqlitePool) {
    let temp = tempfile::tempdir().unwrap();
    let pool = init_database(&temp.path().join("archive.db"))
        .await
        .expect("Should create test database");
    (temp, pool)
}

/// Test helper: three public shows in March/April 1978 and one hidden one
///
/// 1978-03-09 (with setlist), 1978-03-09-late, 1978-04-01, hidden 1978-03-20
async fn seed_archive(pool: &SqlitePool) {
    let venue = create_venue(pool, "Winterland", Some("San Francisco")).await.unwrap();

    let early = save_event(
        pool,
        None,
        &EventInput {
            date: EventDate::new(1978, 3, 9),
            is_public: true,
            venue_id: Some(venue),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    for (date, is_public) in [
        (EventDate::new(1978, 3, 9).with_timing(ShowTiming::Late), true),
        (EventDate::new(1978, 4, 1), true),
        (EventDate::new(1978, 3, 20), false),
    ] {
        save_event(
            pool,
            None,
            &EventInput {
                date,
                is_public,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    }

    let set_one = ensure_set_type(pool, "Set 1").await.unwrap();
    let set_id = create_set(pool, early.id, set_one, 1).await.unwrap();

    let scarlet = create_song(pool, "Scarlet Begonias", Some("scarlet-begonias")).await.unwrap();
    let fire = create_song(pool, "Fire on the Mountain", Some("fire-on-the-mountain")).await.unwrap();
    let rock = create_song(pool, "Rock & Roll", None).await.unwrap();

    create_performance(
        pool,
        set_id,
        &PerformanceInput {
            song_id: Some(scarlet),
            performance_order: 1,
            segues_into: true,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let fire_perf = create_performance(
        pool,
        set_id,
        &PerformanceInput {
            song_id: Some(fire),
            performance_order: 2,
            public_notes: Some("acoustic".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    create_performance(
        pool,
        set_id,
        &PerformanceInput {
            song_id: Some(rock),
            performance_order: 3,
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let jane = create_musician(pool, "Jane Doe").await.unwrap();
    let fiddle = create_instrument(pool, "fiddle", None).await.unwrap();
    add_guest(pool, fire_perf, jane, fiddle).await.unwrap();
}

async fn setup_app() -> (TempDir, axum::Router) {
    let (temp, pool) = setup_test_db().await;
    seed_archive(&pool).await;
    (temp, build_router(AppState::new(pool)))
}

fn test_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app.oneshot(test_request(uri)).await.unwrap();
    let status = response.status();
    (status, extract_json(response.into_body()).await)
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (_temp, app) = setup_app().await;

    let (status, body) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "setlist-web");
    assert!(body["version"].is_string());
}

// =============================================================================
// Event listing
// =============================================================================

#[tokio::test]
async fn test_list_events_chronological_public_only() {
    let (_temp, app) = setup_app().await;

    let (status, body) = get_json(app, "/api/events").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_results"], 3);
    assert_eq!(body["page"], 1);
    assert_eq!(body["page_size"], 100);

    let slugs: Vec<&str> = body["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["1978-03-09", "1978-03-09-late", "1978-04-01"]);
    assert_eq!(body["events"][1]["display_date"], "March 9, 1978 (Late)");
}

#[tokio::test]
async fn test_list_events_by_year() {
    let (_temp, app) = setup_app().await;

    let (status, body) = get_json(app, "/api/events?year=1979").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_results"], 0);
    assert!(body["events"].as_array().unwrap().is_empty());
}

// =============================================================================
// Event detail
// =============================================================================

#[tokio::test]
async fn test_event_detail_with_setlist() {
    let (_temp, app) = setup_app().await;

    let (status, body) = get_json(app, "/api/events/1978-03-09").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["display_date"], "March 9, 1978");
    assert_eq!(body["venue"]["name"], "Winterland");
    assert_eq!(body["date"]["year"], 1978);

    let setlist = &body["setlist"];
    assert_eq!(setlist["status"], "known");
    assert_eq!(setlist["sets"][0]["label"], "Set 1");
    assert_eq!(
        setlist["sets"][0]["text"],
        "Scarlet Begonias > Fire on the Mountain[1][2], Rock & Roll"
    );
    assert_eq!(
        setlist["sets"][0]["html"],
        "<a href=\"/songs/scarlet-begonias\">Scarlet Begonias</a> &gt; \
         <a href=\"/songs/fire-on-the-mountain\">Fire on the Mountain</a>\
         <sup>[1]</sup><sup>[2]</sup>, Rock &amp; Roll"
    );
    assert_eq!(setlist["footnotes"][0]["number"], 1);
    assert_eq!(setlist["footnotes"][0]["text"], "acoustic");
    assert_eq!(setlist["footnotes"][1]["text"], "Jane Doe on fiddle");
}

#[tokio::test]
async fn test_event_detail_navigation() {
    let (_temp, app) = setup_app().await;

    let (_, first) = get_json(app.clone(), "/api/events/1978-03-09").await;
    assert!(first["previous"].is_null());
    assert_eq!(first["next"]["slug"], "1978-03-09-late");

    let (_, late) = get_json(app, "/api/events/1978-03-09-late").await;
    assert_eq!(late["previous"]["slug"], "1978-03-09");
    assert_eq!(late["next"]["slug"], "1978-04-01");
    assert_eq!(late["next"]["display_date"], "April 1, 1978");
}

#[tokio::test]
async fn test_event_without_setlist_is_unknown() {
    let (_temp, app) = setup_app().await;

    let (status, body) = get_json(app, "/api/events/1978-04-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["setlist"]["status"], "unknown");
    assert!(body["next"].is_null());
}

#[tokio::test]
async fn test_hidden_and_missing_events_are_not_found() {
    let (_temp, app) = setup_app().await;

    let (status, body) = get_json(app.clone(), "/api/events/1978-03-20").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("1978-03-20"));

    let (status, _) = get_json(app, "/api/events/not-a-slug").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Songs
// =============================================================================

#[tokio::test]
async fn test_list_songs_with_counts() {
    let (_temp, app) = setup_app().await;

    let (status, body) = get_json(app, "/api/songs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_results"], 3);
    let songs = body["songs"].as_array().unwrap();
    assert!(songs.iter().all(|s| s["times_played"] == 1));
    assert_eq!(songs[0]["title"], "Fire on the Mountain");
}

#[tokio::test]
async fn test_song_detail() {
    let (_temp, app) = setup_app().await;

    let (status, body) = get_json(app.clone(), "/api/songs/scarlet-begonias").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Scarlet Begonias");
    assert_eq!(body["times_played"], 1);
    assert_eq!(body["first_played"], "1978-03-09");
    assert_eq!(body["events"][0]["slug"], "1978-03-09");

    let (status, _) = get_json(app, "/api/songs/dark-star").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Browsing page
// =============================================================================

#[tokio::test]
async fn test_index_and_script_served() {
    let (_temp, app) = setup_app().await;

    let response = app.clone().oneshot(test_request("/events/1978-03-09")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(test_request("/static/app.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "application/javascript"
    );
}
