//! Typed records exchanged between the data layer, the resolver and the
//! setlist renderer.
//!
//! These are plain structs rather than database rows so that slug/ordering
//! and rendering can be exercised without a database.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Disambiguates two shows played on the same calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShowTiming {
    Early,
    Late,
}

impl ShowTiming {
    /// Stored/display form ("Early" / "Late")
    pub fn as_str(&self) -> &'static str {
        match self {
            ShowTiming::Early => "Early",
            ShowTiming::Late => "Late",
        }
    }

    /// Lower-case slug suffix without the leading dash
    pub fn slug_suffix(&self) -> &'static str {
        match self {
            ShowTiming::Early => "early",
            ShowTiming::Late => "late",
        }
    }

    /// Rank used by ordering: absent (0) < Early (1) < Late (2)
    pub fn rank(timing: Option<ShowTiming>) -> i64 {
        match timing {
            None => 0,
            Some(ShowTiming::Early) => 1,
            Some(ShowTiming::Late) => 2,
        }
    }
}

impl fmt::Display for ShowTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShowTiming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "early" => Ok(ShowTiming::Early),
            "late" => Ok(ShowTiming::Late),
            other => Err(format!("Unknown show timing: {}", other)),
        }
    }
}

/// Possibly partial date of an event plus its show timing
///
/// Partial dates only ever omit from the least significant field inward:
/// a day without a month is not a valid date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub show_timing: Option<ShowTiming>,
}

impl EventDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            show_timing: None,
        }
    }

    pub fn with_timing(mut self, timing: ShowTiming) -> Self {
        self.show_timing = Some(timing);
        self
    }

    /// True when year, month and day are all known
    pub fn is_complete(&self) -> bool {
        self.year.is_some() && self.month.is_some() && self.day.is_some()
    }

    /// True when nothing about the date is known
    pub fn is_unknown(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.day.is_none()
    }
}

/// Minimal event record used for listings and previous/next navigation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub id: i64,
    pub slug: String,
    pub date: EventDate,
    pub display_date: Option<String>,
    pub is_public: bool,
}

/// Reference to a song as shown in a setlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRef {
    pub title: String,
    /// URL slug of the song page, when the song has one
    pub slug: Option<String>,
}

/// Non-default personnel credited on a single performance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestCredit {
    pub musician_name: String,
    pub instrument_name: String,
}

impl GuestCredit {
    /// Footnote text for this credit, e.g. "Jane Doe on fiddle"
    pub fn footnote_text(&self) -> String {
        format!("{} on {}", self.musician_name, self.instrument_name)
    }
}

/// One song rendition within a set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetlistPerformance {
    pub id: i64,
    /// None when the song has not been identified yet
    pub song: Option<SongRef>,
    pub performance_order: i64,
    pub segues_into: bool,
    pub is_truncated_start: bool,
    pub is_truncated_end: bool,
    pub public_notes: Option<String>,
    pub guests: Vec<GuestCredit>,
}

/// One ordered subdivision of an event ("Set 1", "Encore", ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetlistSet {
    pub id: i64,
    pub position: i64,
    /// Display name of the set type
    pub set_type: String,
    /// Already ordered by `performance_order`
    pub performances: Vec<SetlistPerformance>,
}
