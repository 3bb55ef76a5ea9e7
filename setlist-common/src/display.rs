//! Human-readable event dates and derived sort dates

use crate::model::EventDate;
use chrono::{Month, NaiveDate};

/// Shown when nothing about an event's date is known
pub const DATE_UNKNOWN: &str = "Date Unknown";

/// Format the date shown for an event
///
/// A non-blank editor-entered override always wins. Otherwise the most
/// specific form the known fields allow is used.
///
/// # Examples
///
/// ```
/// use setlist_common::display::format_display_date;
/// use setlist_common::model::{EventDate, ShowTiming};
///
/// let date = EventDate::new(1978, 3, 9).with_timing(ShowTiming::Early);
/// assert_eq!(format_display_date(&date, None), "March 9, 1978 (Early)");
/// assert_eq!(format_display_date(&date, Some("Spring 1978")), "Spring 1978");
/// ```
pub fn format_display_date(date: &EventDate, display_override: Option<&str>) -> String {
    if let Some(text) = display_override.map(str::trim).filter(|t| !t.is_empty()) {
        return text.to_string();
    }

    let Some(year) = date.year else {
        return DATE_UNKNOWN.to_string();
    };

    let month_name = date
        .month
        .and_then(|m| u8::try_from(m).ok())
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name());

    let mut text = match (month_name, date.day) {
        (Some(month), Some(day)) => format!("{} {}, {}", month, day, year),
        (Some(month), None) => format!("{} {}", month, year),
        (None, _) => year.to_string(),
    };

    if let Some(timing) = date.show_timing {
        text.push_str(&format!(" ({})", timing));
    }
    text
}

/// Fully-resolved date used as the fallback sort key
///
/// Missing month or day resolve to 1. Returns `None` without a year or when
/// the fields do not form a real calendar date.
pub fn sort_date(date: &EventDate) -> Option<NaiveDate> {
    let year = date.year?;
    NaiveDate::from_ymd_opt(year, date.month.unwrap_or(1), date.day.unwrap_or(1))
}
