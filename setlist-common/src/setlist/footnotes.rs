//! Event-wide footnote numbering
//!
//! Notes and guest credits share one numbering across the whole event,
//! assigned in first-occurrence order. Identical text anywhere in the show
//! reuses the same number.

use crate::model::{SetlistPerformance, SetlistSet};
use serde::Serialize;
use std::collections::HashMap;

/// A numbered footnote
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footnote {
    pub number: u32,
    pub text: String,
}

/// Footnote lookup table keyed by exact footnote text
#[derive(Debug, Default)]
pub struct FootnoteTable {
    numbers: HashMap<String, u32>,
    entries: Vec<Footnote>,
}

impl FootnoteTable {
    /// Number every note and guest credit, sets in order then performances
    /// in order
    ///
    /// Performances without a song still take numbers here even though the
    /// renderer leaves them out.
    pub fn build(sets: &[SetlistSet]) -> Self {
        let mut table = Self::default();
        for performance in sets.iter().flat_map(|set| set.performances.iter()) {
            for text in footnote_texts(performance) {
                table.assign(text);
            }
        }
        table
    }

    fn assign(&mut self, text: String) -> u32 {
        if let Some(number) = self.numbers.get(&text) {
            return *number;
        }
        let number = self.entries.len() as u32 + 1;
        self.numbers.insert(text.clone(), number);
        self.entries.push(Footnote { number, text });
        number
    }

    /// Footnote numbers for one performance, ascending and without duplicates
    pub fn numbers_for(&self, performance: &SetlistPerformance) -> Vec<u32> {
        let mut numbers: Vec<u32> = footnote_texts(performance)
            .iter()
            .filter_map(|text| self.numbers.get(text).copied())
            .collect();
        numbers.sort_unstable();
        numbers.dedup();
        numbers
    }

    /// All footnotes in number order
    pub fn into_footnotes(self) -> Vec<Footnote> {
        self.entries
    }
}

/// Note text (trimmed, non-empty) followed by each guest credit
fn footnote_texts(performance: &SetlistPerformance) -> Vec<String> {
    let note = performance
        .public_notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);

    note.into_iter()
        .chain(performance.guests.iter().map(|g| g.footnote_text()))
        .collect()
}
