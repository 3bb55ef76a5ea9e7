//! Output targets for rendered setlists

use super::{Inline, SetBlock};

/// Shown in place of a set with no documented songs
pub const EMPTY_SET_TEXT: &str = "No songs documented";

/// Base path of song pages
pub const SONG_PATH: &str = "/songs/";

/// Render a set block as HTML markup
///
/// Titles are escaped; linked songs become `<a>` tags and footnote markers
/// become `<sup>[n]</sup>`.
pub fn to_html(block: &SetBlock) -> String {
    if block.is_empty() {
        return format!("<em>{}</em>", EMPTY_SET_TEXT);
    }

    let mut html = String::new();
    for span in &block.spans {
        match span {
            Inline::Text { text } => html.push_str(&escape_html(text)),
            Inline::SongLink { title, slug } => {
                html.push_str(&format!(
                    "<a href=\"{}{}\">{}</a>",
                    SONG_PATH,
                    escape_html(slug),
                    escape_html(title)
                ));
            }
            Inline::Footnote { number } => html.push_str(&format!("<sup>[{}]</sup>", number)),
        }
    }
    html
}

/// Render a set block as plain text
pub fn to_plain_text(block: &SetBlock) -> String {
    if block.is_empty() {
        return format!("({})", EMPTY_SET_TEXT.to_lowercase());
    }

    block
        .spans
        .iter()
        .map(|span| match span {
            Inline::Text { text } => text.clone(),
            Inline::SongLink { title, .. } => title.clone(),
            Inline::Footnote { number } => format!("[{}]", number),
        })
        .collect()
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
