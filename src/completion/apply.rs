//! Splicing a chosen candidate back into the text.

use super::{clamp_cursor, in_progress};
use crate::TokenKind;

/// Replace the in-progress token (or pool identifier) before `cursor` with
/// `id`. Returns the new text and the cursor position just after the insert.
///
/// The replaced span is `[start, cursor)`, where `start` is the beginning of
/// the last identifier of a pool token or the beginning of any other token.
/// With nothing in progress the id is inserted at the cursor.
pub(crate) fn splice(text: &str, cursor: usize, id: &str, trailing_space: bool) -> (String, usize) {
    let cursor = clamp_cursor(text, cursor);

    let (start, outside_quotes) = match in_progress(text, cursor) {
        Some(token) => match &token.kind {
            TokenKind::Pool(pool) => {
                let offset = pool.last_id_offset();
                let quotes = pool.id_list[..offset].matches('"').count();
                (pool.id_list_start + offset, quotes % 2 == 0)
            }
            _ => (token.span.start, false),
        },
        None => (cursor, true),
    };

    let quote = outside_quotes && id.contains(char::is_whitespace);
    let mut insert = if quote { format!("\"{id}\"") } else { id.to_string() };
    if trailing_space {
        insert.push(' ');
    }

    let mut out = String::with_capacity(text.len() + insert.len());
    out.push_str(&text[..start]);
    out.push_str(&insert);
    out.push_str(&text[cursor..]);

    log::trace!("[splice] replaced {}..{} with {:?}", start, cursor, insert);
    (out, start + insert.len())
}

/// The text the next splice at `cursor` would replace.
pub(crate) fn replaced_text(text: &str, cursor: usize) -> &str {
    let cursor = clamp_cursor(text, cursor);
    let start = match in_progress(text, cursor) {
        Some(token) => match &token.kind {
            TokenKind::Pool(pool) => pool.id_list_start + pool.last_id_offset(),
            _ => token.span.start,
        },
        None => cursor,
    };
    &text[start..cursor]
}

/// Undo the auto-inserted space when a `,` is typed right after it.
///
/// Returns the corrected text and cursor, or `None` if nothing changes.
pub(crate) fn normalize_edit(text: &str, cursor: usize) -> Option<(String, usize)> {
    let cursor = clamp_cursor(text, cursor);
    if !text[..cursor].ends_with(" ,") {
        return None;
    }
    let mut out = String::with_capacity(text.len() - 1);
    out.push_str(&text[..cursor - 2]);
    out.push_str(&text[cursor - 1..]);
    Some((out, cursor - 1))
}
