//! Song browsing endpoints with play counts

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use setlist_common::db::songs::{count_songs, get_song_stats, list_song_events, list_song_stats};
use setlist_common::db::SongStats;

use super::error::ApiError;
use super::events::EventLink;
use crate::pagination::{default_page, Page};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SongListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
}

#[derive(Debug, Serialize)]
pub struct SongListResponse {
    #[serde(flatten)]
    pub page: Page,
    pub songs: Vec<SongStats>,
}

#[derive(Debug, Serialize)]
pub struct SongDetailResponse {
    #[serde(flatten)]
    pub song: SongStats,
    pub events: Vec<EventLink>,
}

/// GET /api/songs?page=N
///
/// Most played first.
pub async fn list_songs(
    State(state): State<AppState>,
    Query(query): Query<SongListQuery>,
) -> Result<Json<SongListResponse>, ApiError> {
    let total = count_songs(&state.db).await?;
    let page = Page::new(total, query.page);
    let songs = list_song_stats(&state.db, page.page_size, page.offset).await?;

    Ok(Json(SongListResponse { page, songs }))
}

/// GET /api/songs/:slug
///
/// The song's play count and every public event it was played at.
pub async fn get_song(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<SongDetailResponse>, ApiError> {
    let song = get_song_stats(&state.db, &slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("song {}", slug)))?;
    let events = list_song_events(&state.db, song.id).await?;

    Ok(Json(SongDetailResponse {
        song,
        events: events.iter().map(EventLink::from).collect(),
    }))
}
