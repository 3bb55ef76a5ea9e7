//! # Setlist Archive Common Library
//!
//! Shared code for the live-performance archive:
//! - Event identity (slugs) and chronological ordering
//! - Setlist rendering with segue/truncation/footnote notation
//! - Display date formatting
//! - Database schema and queries
//! - Configuration loading

pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod model;
pub mod ordering;
pub mod setlist;
pub mod slug;

pub use error::{Error, Result};
pub use model::{EventDate, EventSummary, ShowTiming};
