//! Setlist rendering
//!
//! Turns an event's ordered sets and performances into display blocks using
//! the archive's notation:
//!
//! - `A > B` segue, no comma after `A`
//! - ` //A` recording starts mid-song, `A// ` recording ends mid-song
//! - `[n]` footnote markers for notes and guest credits, numbered in
//!   first-occurrence order across the whole event
//!
//! Rendering produces typed spans; [`markup`] turns those into HTML or plain
//! text. Input order is trusted: sets by position, performances by
//! `performance_order`.

mod footnotes;
pub mod markup;

pub use footnotes::{Footnote, FootnoteTable};

use crate::model::{SetlistPerformance, SetlistSet};
use serde::Serialize;

/// Prefix for a performance documented from mid-song
pub const TRUNCATED_START: &str = " //";
/// Suffix for a performance whose documentation ends mid-song
pub const TRUNCATED_END: &str = "// ";
/// Suffix for a performance that flows into the next
pub const SEGUE: &str = " > ";
/// Separator between consecutive performances
pub const SEPARATOR: &str = ", ";

/// One inline piece of a rendered set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Inline {
    /// Literal notation or an unlinked song title
    Text { text: String },
    /// Song title linking to the song page
    SongLink { title: String, slug: String },
    /// Footnote marker
    Footnote { number: u32 },
}

impl Inline {
    fn text(text: impl Into<String>) -> Self {
        Inline::Text { text: text.into() }
    }
}

/// Rendered content of one set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetBlock {
    /// Set type display name ("Set 1", "Encore", ...)
    pub label: String,
    /// Empty when no performance in the set is documented
    pub spans: Vec<Inline>,
}

impl SetBlock {
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Result of rendering an event's setlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RenderedSetlist {
    /// No documented performance at all
    Unknown,
    Known {
        sets: Vec<SetBlock>,
        footnotes: Vec<Footnote>,
    },
}

impl RenderedSetlist {
    pub fn is_known(&self) -> bool {
        matches!(self, RenderedSetlist::Known { .. })
    }
}

/// Render an event's sets
///
/// Pure: identical input always produces identical output.
pub fn render_setlist(sets: &[SetlistSet]) -> RenderedSetlist {
    let documented = sets
        .iter()
        .flat_map(|s| s.performances.iter())
        .any(|p| p.song.is_some());
    if !documented {
        return RenderedSetlist::Unknown;
    }

    let table = FootnoteTable::build(sets);
    let blocks = sets.iter().map(|set| render_set(set, &table)).collect();

    RenderedSetlist::Known {
        sets: blocks,
        footnotes: table.into_footnotes(),
    }
}

fn render_set(set: &SetlistSet, table: &FootnoteTable) -> SetBlock {
    let performances: Vec<&SetlistPerformance> =
        set.performances.iter().filter(|p| p.song.is_some()).collect();

    let mut spans = Vec::new();
    for (i, performance) in performances.iter().enumerate() {
        push_performance(&mut spans, performance, table);

        let next = performances.get(i + 1);
        if needs_separator(performance, next.copied()) {
            spans.push(Inline::text(SEPARATOR));
        }
    }

    SetBlock {
        label: set.set_type.clone(),
        spans: merge_text(spans),
    }
}

fn push_performance(spans: &mut Vec<Inline>, performance: &SetlistPerformance, table: &FootnoteTable) {
    let Some(song) = &performance.song else {
        return;
    };

    if performance.is_truncated_start {
        spans.push(Inline::text(TRUNCATED_START));
    }

    match &song.slug {
        Some(slug) => spans.push(Inline::SongLink {
            title: song.title.clone(),
            slug: slug.clone(),
        }),
        None => spans.push(Inline::text(song.title.clone())),
    }

    if performance.is_truncated_end {
        spans.push(Inline::text(TRUNCATED_END));
    }

    for number in table.numbers_for(performance) {
        spans.push(Inline::Footnote { number });
    }

    if performance.segues_into {
        spans.push(Inline::text(SEGUE));
    }
}

/// Comma after `left` unless the notation already separates the two songs
fn needs_separator(left: &SetlistPerformance, next: Option<&SetlistPerformance>) -> bool {
    match next {
        None => false,
        Some(next) => !(left.segues_into || left.is_truncated_end || next.is_truncated_start),
    }
}

/// Collapse adjacent text spans so output is canonical
fn merge_text(spans: Vec<Inline>) -> Vec<Inline> {
    let mut merged: Vec<Inline> = Vec::with_capacity(spans.len());
    for span in spans {
        if let (Some(Inline::Text { text: last }), Inline::Text { text }) = (merged.last_mut(), &span) {
            last.push_str(text);
            continue;
        }
        merged.push(span);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::markup::to_plain_text;
    use super::*;
    use crate::model::{GuestCredit, SongRef};

    fn song(title: &str) -> SetlistPerformance {
        SetlistPerformance {
            song: Some(SongRef {
                title: title.to_string(),
                slug: None,
            }),
            ..Default::default()
        }
    }

    fn segue(title: &str) -> SetlistPerformance {
        SetlistPerformance {
            segues_into: true,
            ..song(title)
        }
    }

    fn set(label: &str, performances: Vec<SetlistPerformance>) -> SetlistSet {
        SetlistSet {
            set_type: label.to_string(),
            performances,
            ..Default::default()
        }
    }

    fn plain(sets: &[SetlistSet]) -> Vec<String> {
        match render_setlist(sets) {
            RenderedSetlist::Known { sets, .. } => sets.iter().map(to_plain_text).collect(),
            RenderedSetlist::Unknown => panic!("expected a known setlist"),
        }
    }

    #[test]
    fn test_plain_comma_join() {
        let sets = vec![set("Set 1", vec![song("A"), song("B"), song("C")])];
        assert_eq!(plain(&sets), vec!["A, B, C"]);
    }

    #[test]
    fn test_segue_suppresses_comma() {
        let sets = vec![set("Set 1", vec![segue("A"), song("B"), song("C")])];
        assert_eq!(plain(&sets), vec!["A > B, C"]);
    }

    #[test]
    fn test_truncated_start_suppresses_preceding_comma() {
        let mut b = song("B");
        b.is_truncated_start = true;
        let sets = vec![set("Set 1", vec![song("A"), b, song("C")])];
        assert_eq!(plain(&sets), vec!["A //B, C"]);
    }

    #[test]
    fn test_truncated_end_suppresses_following_comma() {
        let mut a = song("A");
        a.is_truncated_end = true;
        let sets = vec![set("Set 1", vec![a, song("B")])];
        assert_eq!(plain(&sets), vec!["A// B"]);
    }

    #[test]
    fn test_no_trailing_separator_on_last_song() {
        let sets = vec![set("Set 1", vec![song("A"), segue("B")])];
        assert_eq!(plain(&sets), vec!["A, B > "]);
    }

    #[test]
    fn test_missing_songs_are_skipped() {
        let unknown = SetlistPerformance {
            song: None,
            public_notes: Some("tape flip".to_string()),
            ..Default::default()
        };
        let sets = vec![set("Set 1", vec![song("A"), unknown, song("B")])];
        assert_eq!(plain(&sets), vec!["A, B"]);
    }

    #[test]
    fn test_missing_song_keeps_its_footnote_number() {
        let unknown = SetlistPerformance {
            song: None,
            public_notes: Some("tape flip".to_string()),
            ..Default::default()
        };
        let mut a = song("A");
        a.public_notes = Some("acoustic".to_string());
        a.guests = vec![GuestCredit {
            musician_name: "J".to_string(),
            instrument_name: "x".to_string(),
        }];

        let rendered = render_setlist(&[set("Set 1", vec![unknown, a])]);
        let RenderedSetlist::Known { sets, footnotes } = rendered else {
            panic!("expected a known setlist");
        };
        assert_eq!(to_plain_text(&sets[0]), "A[2][3]");
        assert_eq!(footnotes[0].text, "tape flip");
        assert_eq!(footnotes.len(), 3);
    }

    #[test]
    fn test_sets_render_independently() {
        let sets = vec![
            set("Set 1", vec![song("A"), song("B")]),
            set("Encore", vec![song("C")]),
        ];
        match render_setlist(&sets) {
            RenderedSetlist::Known { sets, .. } => {
                assert_eq!(sets[0].label, "Set 1");
                assert_eq!(sets[1].label, "Encore");
                assert_eq!(to_plain_text(&sets[0]), "A, B");
                assert_eq!(to_plain_text(&sets[1]), "C");
            }
            RenderedSetlist::Unknown => panic!("expected a known setlist"),
        }
    }

    #[test]
    fn test_footnote_markers_follow_title() {
        let mut a = song("A");
        a.public_notes = Some("acoustic".to_string());
        a.guests = vec![GuestCredit {
            musician_name: "Jane Doe".to_string(),
            instrument_name: "fiddle".to_string(),
        }];
        a.segues_into = true;
        let mut b = song("B");
        b.public_notes = Some("acoustic".to_string());
        let mut c = song("C");
        c.public_notes = Some("abridged".to_string());

        let rendered = render_setlist(&[set("Set 1", vec![a, b, c])]);
        let RenderedSetlist::Known { sets, footnotes } = rendered else {
            panic!("expected a known setlist");
        };

        assert_eq!(to_plain_text(&sets[0]), "A[1][2] > B[1], C[3]");
        assert_eq!(footnotes.len(), 3);
        assert_eq!(footnotes[2].text, "abridged");
    }

    #[test]
    fn test_song_with_slug_becomes_link() {
        let linked = SetlistPerformance {
            song: Some(SongRef {
                title: "Dark Star".to_string(),
                slug: Some("dark-star".to_string()),
            }),
            ..Default::default()
        };
        let rendered = render_setlist(&[set("Set 1", vec![linked])]);
        let RenderedSetlist::Known { sets, .. } = rendered else {
            panic!("expected a known setlist");
        };
        assert_eq!(
            sets[0].spans,
            vec![Inline::SongLink {
                title: "Dark Star".to_string(),
                slug: "dark-star".to_string(),
            }]
        );
    }

    #[test]
    fn test_empty_inputs_render_unknown() {
        assert_eq!(render_setlist(&[]), RenderedSetlist::Unknown);
        assert_eq!(render_setlist(&[set("Set 1", vec![])]), RenderedSetlist::Unknown);

        let undocumented = SetlistPerformance::default();
        assert_eq!(
            render_setlist(&[set("Set 1", vec![undocumented])]),
            RenderedSetlist::Unknown
        );
    }

    #[test]
    fn test_empty_set_keeps_its_block() {
        let sets = vec![set("Set 1", vec![song("A")]), set("Set 2", vec![])];
        let RenderedSetlist::Known { sets, .. } = render_setlist(&sets) else {
            panic!("expected a known setlist");
        };
        assert_eq!(sets.len(), 2);
        assert!(sets[1].is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(render_setlist(&[])).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "unknown" }));

        let sets = vec![set("Set 1", vec![song("A")])];
        let json = serde_json::to_value(render_setlist(&sets)).unwrap();
        assert_eq!(json["status"], "known");
        assert_eq!(json["sets"][0]["label"], "Set 1");
        assert_eq!(json["sets"][0]["spans"][0]["kind"], "text");
        assert_eq!(json["sets"][0]["spans"][0]["text"], "A");
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let mut a = segue("A");
        a.public_notes = Some("acoustic".to_string());
        let sets = vec![set("Set 1", vec![a, song("B")])];
        assert_eq!(render_setlist(&sets), render_setlist(&sets));
    }
}
