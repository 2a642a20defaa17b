//! Preview truncation for unpurchased contracts

use serde::Serialize;
use shared_types::GeneratedContract;

/// Words shown before purchase
pub const PREVIEW_WORD_LIMIT: usize = 120;

const ELLIPSIS: &str = "...";

/// Contract text as the current viewer may see it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentView {
    pub content: String,
    pub truncated: bool,
    pub total_words: usize,
}

/// Visible text for `content`.
///
/// Purchased content is returned untouched. Otherwise only the first
/// [`PREVIEW_WORD_LIMIT`] words survive, re-joined with single spaces and
/// followed by `...`; content already within the limit is returned as is.
pub fn preview_text(content: &str, purchased: bool) -> ContentView {
    let total_words = content.split_whitespace().count();
    if purchased || total_words <= PREVIEW_WORD_LIMIT {
        return ContentView {
            content: content.to_string(),
            truncated: false,
            total_words,
        };
    }

    let mut preview = content
        .split_whitespace()
        .take(PREVIEW_WORD_LIMIT)
        .collect::<Vec<_>>()
        .join(" ");
    preview.push_str(ELLIPSIS);
    ContentView {
        content: preview,
        truncated: true,
        total_words,
    }
}

pub fn preview_content(contract: &GeneratedContract) -> ContentView {
    preview_text(&contract.content, contract.is_purchased())
}
