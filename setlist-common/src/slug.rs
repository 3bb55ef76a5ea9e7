//! Event slugs
//!
//! A slug is the canonical URL path segment for an event, derived from its
//! date fields and show timing:
//!
//! - complete date: `1978-03-09`, `1978-03-09-early`, `1978-03-09-late`
//! - partial date: `1978-unknown-1` (or `unknown-unknown-1` without a year)
//!
//! Partial dates collapse to the same slug, so storage resolves collisions
//! with [`resolve_collision`]. Parsing a partial slug only recovers the year.

use crate::model::{EventDate, ShowTiming};

const UNKNOWN: &str = "unknown";
const EARLY_SUFFIX: &str = "-early";
const LATE_SUFFIX: &str = "-late";

/// Generate the canonical slug for an event date
///
/// # Examples
///
/// ```
/// use setlist_common::model::{EventDate, ShowTiming};
/// use setlist_common::slug::generate_slug;
///
/// assert_eq!(generate_slug(&EventDate::new(1978, 3, 9)), "1978-03-09");
/// assert_eq!(
///     generate_slug(&EventDate::new(1978, 3, 9).with_timing(ShowTiming::Late)),
///     "1978-03-09-late"
/// );
/// ```
pub fn generate_slug(date: &EventDate) -> String {
    match (date.year, date.month, date.day) {
        (Some(year), Some(month), Some(day)) => {
            let mut slug = format!("{}-{:02}-{:02}", year, month, day);
            if let Some(timing) = date.show_timing {
                slug.push('-');
                slug.push_str(timing.slug_suffix());
            }
            slug
        }
        (year, _, _) => {
            let year = year
                .map(|y| y.to_string())
                .unwrap_or_else(|| UNKNOWN.to_string());
            format!("{}-{}-1", year, UNKNOWN)
        }
    }
}

/// Parse a slug back into date fields
///
/// Never fails: tokens that are missing or not numeric come back as `None`,
/// and callers treat an all-`None` result as "date unknown".
pub fn parse_slug(slug: &str) -> EventDate {
    let (rest, show_timing) = if let Some(rest) = slug.strip_suffix(EARLY_SUFFIX) {
        (rest, Some(ShowTiming::Early))
    } else if let Some(rest) = slug.strip_suffix(LATE_SUFFIX) {
        (rest, Some(ShowTiming::Late))
    } else {
        (slug, None)
    };

    if rest.contains(UNKNOWN) {
        let year = rest.split('-').next().and_then(|t| t.parse::<i32>().ok());
        return EventDate {
            year,
            month: None,
            day: None,
            show_timing,
        };
    }

    let mut tokens = rest.splitn(4, '-');
    let year = tokens.next().and_then(|t| t.parse::<i32>().ok());
    let month = tokens.next().and_then(|t| t.parse::<u32>().ok());
    let day = tokens.next().and_then(|t| t.parse::<u32>().ok());

    EventDate {
        year,
        month,
        day,
        show_timing,
    }
}

/// Pick a free slug starting from `base`
///
/// `base` itself is returned when not taken. Placeholder slugs ending in
/// `-unknown-N` have their counter bumped; any other slug gets `-2`, `-3`, ...
/// inserted ahead of its timing suffix (`1978-03-09-2-early`) so that
/// [`parse_slug`] still recovers the show timing.
pub fn resolve_collision<F>(base: &str, mut is_taken: F) -> String
where
    F: FnMut(&str) -> bool,
{
    if !is_taken(base) {
        return base.to_string();
    }

    let (stem, suffix, start) = match split_unknown_counter(base) {
        Some((stem, counter)) => (stem, "", counter + 1),
        None => {
            let (stem, suffix) = split_timing_suffix(base);
            (stem, suffix, 2)
        }
    };

    let mut n = start;
    loop {
        let candidate = format!("{}-{}{}", stem, n, suffix);
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Split `1978-03-09-late` into (`1978-03-09`, `-late`)
fn split_timing_suffix(slug: &str) -> (&str, &str) {
    for suffix in [EARLY_SUFFIX, LATE_SUFFIX] {
        if let Some(stem) = slug.strip_suffix(suffix) {
            return (stem, suffix);
        }
    }
    (slug, "")
}

/// Split `1978-unknown-3` into (`1978-unknown`, 3)
fn split_unknown_counter(slug: &str) -> Option<(&str, u32)> {
    let (stem, counter) = slug.rsplit_once('-')?;
    if !stem.ends_with(UNKNOWN) {
        return None;
    }
    counter.parse::<u32>().ok().map(|n| (stem, n))
}
