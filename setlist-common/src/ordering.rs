//! Chronological ordering of events and previous/next navigation
//!
//! Events are ordered by year, month, day and show timing. At each level an
//! unknown value sorts before any known one (a show known only as "March
//! 1978" comes before 1978-03-01), and the event id breaks exact ties so the
//! order is total. Events without a year cannot be placed and never take
//! part in navigation.

use crate::model::{EventSummary, ShowTiming};
use serde::Serialize;
use std::cmp::Ordering;

/// Sort key of a placeable event
///
/// Field order is significant: the derived `Ord` compares year, month, day,
/// timing and finally id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EventOrderKey {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub show_timing: Option<ShowTiming>,
    pub id: i64,
}

impl EventOrderKey {
    /// Key for an event, or `None` when its year is unknown
    pub fn of(event: &EventSummary) -> Option<Self> {
        Some(Self {
            year: event.date.year?,
            month: event.date.month,
            day: event.date.day,
            show_timing: event.date.show_timing,
            id: event.id,
        })
    }
}

/// Previous and next neighbours of an event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjacent<T> {
    pub previous: Option<T>,
    pub next: Option<T>,
}

impl<T> Adjacent<T> {
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Adjacent<U> {
        Adjacent {
            previous: self.previous.map(&mut f),
            next: self.next.map(&mut f),
        }
    }
}

/// Compare two events chronologically
///
/// Events without a year sort after every dated event, ordered by id among
/// themselves.
pub fn compare_event_order(a: &EventSummary, b: &EventSummary) -> Ordering {
    match (EventOrderKey::of(a), EventOrderKey::of(b)) {
        (Some(ka), Some(kb)) => ka.cmp(&kb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    }
}

/// Find the closest public events before and after `reference`
///
/// `previous` is the greatest candidate strictly below the reference and
/// `next` the least strictly above. A reference without a year has no
/// neighbours. Reaching either end of the archive yields `None` on that side.
pub fn find_adjacent<'a>(
    reference: &EventSummary,
    candidates: &'a [EventSummary],
) -> Adjacent<&'a EventSummary> {
    let Some(reference_key) = EventOrderKey::of(reference) else {
        return Adjacent {
            previous: None,
            next: None,
        };
    };

    let mut previous: Option<(EventOrderKey, &EventSummary)> = None;
    let mut next: Option<(EventOrderKey, &EventSummary)> = None;

    for candidate in candidates.iter().filter(|c| c.is_public) {
        let Some(key) = EventOrderKey::of(candidate) else {
            continue;
        };

        match key.cmp(&reference_key) {
            Ordering::Less => {
                if previous.map_or(true, |(best, _)| key > best) {
                    previous = Some((key, candidate));
                }
            }
            Ordering::Greater => {
                if next.map_or(true, |(best, _)| key < best) {
                    next = Some((key, candidate));
                }
            }
            Ordering::Equal => {}
        }
    }

    Adjacent {
        previous: previous.map(|(_, e)| e),
        next: next.map(|(_, e)| e),
    }
}
