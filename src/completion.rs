//! Incremental completion over the mission-line grammar.
//!
//! Every call re-scans the text up to the cursor with the same tokenizer the
//! builder uses, so "the token being typed" is always the trailing token of
//! that prefix:
//!
//! ```text
//! text[..cursor] ── tokenize ── trailing token?
//!                                 ├─ none (ends in whitespace) ─▶ []
//!                                 ├─ time / strike limit ──────▶ one info row
//!                                 ├─ setting ──────────────────▶ factory modes / info row
//!                                 └─ pool ─────────────────────▶ number shortcuts + catalog prefix matches
//! ```
//!
//! Applying a candidate replaces `[span_start, cursor)` where `span_start` is
//! the start of the last identifier of a pool token, or the start of any other
//! token.

#[path = "completion/apply.rs"]
mod apply;
#[path = "completion/cycle.rs"]
mod cycle;
#[path = "completion/hover.rs"]
mod hover;
#[path = "completion/suggest.rs"]
mod suggest;

pub(crate) use apply::{normalize_edit, splice};
pub use cycle::{CompletionCycle, CycleDirection, CycleStep};
pub(crate) use hover::identifier_at;
pub use hover::Hover;
pub(crate) use suggest::suggest;

use crate::{Token, tokenize};
use serde::Serialize;

/// Which string a highlight range refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightTarget {
    Label,
    Id,
}

/// Byte range to emphasize in a candidate's label or id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub target: HighlightTarget,
    pub start: usize,
    pub len: usize,
}

/// One completion row.
///
/// Informational rows (`selectable == false`) describe what the current
/// token means; applying them changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub replacement_id: String,
    pub label: String,
    pub highlight: Highlight,
    pub selectable: bool,
}

impl Candidate {
    fn info(label: String, highlight_from: usize) -> Self {
        let len = label.len().saturating_sub(highlight_from);
        Candidate {
            replacement_id: String::new(),
            label,
            highlight: Highlight { target: HighlightTarget::Label, start: highlight_from, len },
            selectable: false,
        }
    }

    fn pick(id: String, label: String, highlight: Highlight) -> Self {
        Candidate { replacement_id: id, label, highlight, selectable: true }
    }

    /// Ids that end in a separator expect more typing right after them.
    pub fn expects_more_input(&self) -> bool {
        self.replacement_id.ends_with(['*', ':'])
    }
}

/// Clamp `cursor` into `text` and onto a char boundary.
fn clamp_cursor(text: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(text.len());
    while !text.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

/// The token being typed at `cursor`, if any.
fn in_progress(text: &str, cursor: usize) -> Option<Token> {
    let scan = tokenize(&text[..cursor]);
    scan.trailing().cloned()
}

/// Case-insensitive prefix test. Returns the byte length of the matched
/// prefix of `hay`.
fn prefix_match_len(hay: &str, prefix: &str) -> Option<usize> {
    let mut hay_chars = hay.char_indices();
    for p in prefix.chars() {
        let (_, h) = hay_chars.next()?;
        if !h.to_lowercase().eq(p.to_lowercase()) {
            return None;
        }
    }
    Some(hay_chars.next().map_or(hay.len(), |(i, _)| i))
}
