//! Event browsing endpoints
//!
//! - `GET /api/events` chronological listing of public events
//! - `GET /api/events/:slug` one event with its rendered setlist and
//!   previous/next navigation

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use setlist_common::db::events::{
    count_public_events, find_adjacent_events, get_public_event, list_public_events,
};
use setlist_common::db::setlists::load_setlist;
use setlist_common::db::Venue;
use setlist_common::display::format_display_date;
use setlist_common::model::{EventDate, EventSummary};
use setlist_common::ordering::Adjacent;
use setlist_common::setlist::markup::{to_html, to_plain_text};
use setlist_common::setlist::{render_setlist, Footnote, RenderedSetlist};
use tracing::debug;

use super::error::ApiError;
use crate::pagination::{default_page, Page};
use crate::AppState;

/// Query parameters for the event listing
#[derive(Debug, Deserialize)]
pub struct EventListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    /// Restrict to one year
    pub year: Option<i32>,
}

/// Link to an event as used in listings and navigation
#[derive(Debug, Clone, Serialize)]
pub struct EventLink {
    pub id: i64,
    pub slug: String,
    pub display_date: String,
}

impl From<&EventSummary> for EventLink {
    fn from(event: &EventSummary) -> Self {
        Self {
            id: event.id,
            slug: event.slug.clone(),
            display_date: format_display_date(&event.date, event.display_date.as_deref()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventListResponse {
    #[serde(flatten)]
    pub page: Page,
    pub events: Vec<EventLink>,
}

/// One set, rendered for each output target
#[derive(Debug, Serialize)]
pub struct SetView {
    pub label: String,
    pub html: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SetlistView {
    Unknown,
    Known {
        sets: Vec<SetView>,
        footnotes: Vec<Footnote>,
    },
}

impl From<RenderedSetlist> for SetlistView {
    fn from(rendered: RenderedSetlist) -> Self {
        match rendered {
            RenderedSetlist::Unknown => SetlistView::Unknown,
            RenderedSetlist::Known { sets, footnotes } => SetlistView::Known {
                sets: sets
                    .iter()
                    .map(|block| SetView {
                        label: block.label.clone(),
                        html: to_html(block),
                        text: to_plain_text(block),
                    })
                    .collect(),
                footnotes,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EventDetailResponse {
    pub id: i64,
    pub slug: String,
    pub display_date: String,
    pub date: EventDate,
    pub venue: Option<Venue>,
    pub setlist: SetlistView,
    pub previous: Option<EventLink>,
    pub next: Option<EventLink>,
}

/// GET /api/events?page=N&year=YYYY
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<EventListResponse>, ApiError> {
    let total = count_public_events(&state.db, query.year).await?;
    let page = Page::new(total, query.page);

    let events = list_public_events(&state.db, query.year, page.page_size, page.offset).await?;

    Ok(Json(EventListResponse {
        page,
        events: events.iter().map(EventLink::from).collect(),
    }))
}

/// GET /api/events/:slug
pub async fn get_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<EventDetailResponse>, ApiError> {
    let record = get_public_event(&state.db, &slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("event {}", slug)))?;
    let event = record.summary;

    let sets = load_setlist(&state.db, event.id).await?;
    let setlist = render_setlist(&sets);
    debug!("Rendered {} (known setlist: {})", event.slug, setlist.is_known());

    let Adjacent { previous, next } = find_adjacent_events(&state.db, &event)
        .await?
        .map(|e| EventLink::from(&e));

    Ok(Json(EventDetailResponse {
        id: event.id,
        display_date: format_display_date(&event.date, event.display_date.as_deref()),
        slug: event.slug,
        date: event.date,
        venue: record.venue,
        setlist: setlist.into(),
        previous,
        next,
    }))
}
