//! Database models

use crate::model::{EventDate, EventSummary, ShowTiming};
use serde::{Deserialize, Serialize};

/// Raw `events` row joined with its venue
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    pub id: i64,
    pub slug: String,
    pub year: Option<i64>,
    pub month: Option<i64>,
    pub day: Option<i64>,
    pub show_timing: Option<String>,
    pub display_date: Option<String>,
    pub is_public: bool,
    pub venue_name: Option<String>,
    pub venue_city: Option<String>,
}

impl EventRow {
    /// Date fields; out-of-range or unrecognised values become `None`
    pub fn date(&self) -> EventDate {
        EventDate {
            year: self.year.and_then(|y| i32::try_from(y).ok()),
            month: self.month.and_then(|m| u32::try_from(m).ok()),
            day: self.day.and_then(|d| u32::try_from(d).ok()),
            show_timing: self
                .show_timing
                .as_deref()
                .and_then(|t| t.parse::<ShowTiming>().ok()),
        }
    }

    pub fn summary(&self) -> EventSummary {
        EventSummary {
            id: self.id,
            slug: self.slug.clone(),
            date: self.date(),
            display_date: self.display_date.clone(),
            is_public: self.is_public,
        }
    }

    pub fn venue(&self) -> Option<Venue> {
        self.venue_name.as_ref().map(|name| Venue {
            name: name.clone(),
            city: self.venue_city.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub name: String,
    pub city: Option<String>,
}

/// A public event with everything needed for its detail page header
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub summary: EventSummary,
    pub venue: Option<Venue>,
}

impl From<EventRow> for EventRecord {
    fn from(row: EventRow) -> Self {
        Self {
            summary: row.summary(),
            venue: row.venue(),
        }
    }
}

/// Editor-supplied event fields
///
/// Slug and sort date are never supplied: they are derived on every write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventInput {
    pub date: EventDate,
    pub display_date: Option<String>,
    pub is_public: bool,
    pub venue_id: Option<i64>,
}

/// Editor-supplied performance fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceInput {
    pub song_id: Option<i64>,
    pub performance_order: i64,
    pub segues_into: bool,
    pub is_truncated_start: bool,
    pub is_truncated_end: bool,
    pub public_notes: Option<String>,
}

/// Song with its play count across public events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct SongStats {
    pub id: i64,
    pub title: String,
    pub slug: Option<String>,
    pub times_played: i64,
    /// Slug of the chronologically first public event featuring the song
    pub first_played: Option<String>,
    /// Slug of the chronologically last public event featuring the song
    pub last_played: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> EventRow {
        EventRow {
            id: 7,
            slug: "1978-03-09-late".to_string(),
            year: Some(1978),
            month: Some(3),
            day: Some(9),
            show_timing: Some("Late".to_string()),
            display_date: None,
            is_public: true,
            venue_name: Some("Winterland".to_string()),
            venue_city: Some("San Francisco".to_string()),
        }
    }

    #[test]
    fn test_row_date_conversion() {
        let date = row().date();
        assert_eq!(date, EventDate::new(1978, 3, 9).with_timing(ShowTiming::Late));
    }

    #[test]
    fn test_row_with_bad_values_degrades() {
        let mut r = row();
        r.month = Some(-1);
        r.show_timing = Some("matinee".to_string());
        let date = r.date();
        assert_eq!(date.month, None);
        assert_eq!(date.show_timing, None);
        assert_eq!(date.year, Some(1978));
    }

    #[test]
    fn test_record_from_row() {
        let record = EventRecord::from(row());
        assert_eq!(record.summary.id, 7);
        assert_eq!(record.venue.map(|v| v.name), Some("Winterland".to_string()));
    }
}
