//! HTTP API handlers for setlist-web

pub mod error;
pub mod events;
pub mod health;
pub mod songs;
pub mod ui;

pub use error::ApiError;
pub use events::{get_event, list_events};
pub use health::health_routes;
pub use songs::{get_song, list_songs};
pub use ui::{serve_app_js, serve_index};
