//! Identifier lookup under a pointer position.

use crate::api::Context;
use crate::{PseudoIdentifier, Span, TokenKind, tokenize};
use serde::Serialize;

/// The identifier found at a text offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hover {
    pub id: String,
    pub display_name: Option<String>,
    /// Where the identifier (including any quotes) sits in the text.
    pub span: Span,
}

pub(crate) fn identifier_at(text: &str, offset: usize, ctx: &Context<'_>) -> Option<Hover> {
    let scan = tokenize(text);
    let pool = scan.tokens.iter().find_map(|token| match &token.kind {
        TokenKind::Pool(pool) if (pool.id_list_start..token.span.end()).contains(&offset) => Some(pool),
        _ => None,
    })?;

    let local = offset - pool.id_list_start;
    let list = pool.id_list.as_str();
    if !list.is_char_boundary(local) || list[local..].starts_with([',', '+']) {
        return None;
    }

    let from = list[..local].rfind([',', '+']).map_or(0, |i| i + 1);
    let to = list[local..].find([',', '+']).map_or(list.len(), |i| local + i);
    let id = list[from..to].replace('"', "").trim().to_string();
    if id.is_empty() {
        return None;
    }

    let display_name = match ctx.catalog.get(&id) {
        Some(module) => Some(module.display_name.clone()),
        None => PseudoIdentifier::from_id(&id).map(|p| p.display_name().to_string()),
    };
    log::trace!("[hover] offset {} -> {:?}", offset, id);

    Some(Hover { id, display_name, span: Span::new(pool.id_list_start + from, to - from) })
}
