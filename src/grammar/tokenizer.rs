//! Whitespace-driven scanner.
//!
//! Scanning restarts only at offset 0 or right after a run of whitespace, so
//! tokens are always separated by at least one whitespace character. The last
//! token may be a partial one (for example an unterminated quoted id); the
//! completion engine relies on that when it scans a prefix of the input.

use super::shapes::classify;
use crate::Token;

/// Result of scanning a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub tokens: Vec<Token>,
    /// Byte offset where scanning stopped, trailing whitespace included.
    pub end: usize,
}

impl Scan {
    /// True when the tokens account for the whole of `text` and there is at
    /// least one of them.
    pub fn covers(&self, text: &str) -> bool {
        !self.tokens.is_empty() && self.end >= text.len()
    }

    /// The token that ends exactly at the end of the scanned text, if any.
    ///
    /// When the text ends in whitespace there is no token in progress.
    pub fn trailing(&self) -> Option<&Token> {
        self.tokens.last().filter(|t| t.span.end() == self.end)
    }
}

/// Scan `text` into tokens.
pub fn tokenize(text: &str) -> Scan {
    let mut tokens = Vec::new();
    let mut pos = 0;

    loop {
        let rest = &text[pos..];
        let gap = rest.len() - rest.trim_start().len();
        if pos > 0 && gap == 0 {
            break;
        }

        let start = pos + gap;
        if start >= text.len() {
            pos = start;
            break;
        }

        let token = classify(text, start);
        pos = token.span.end();
        tokens.push(token);
    }

    log::debug!("[tokenize] {} token(s), scan end {} of {}", tokens.len(), pos, text.len());
    Scan { tokens, end: pos }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Span, TokenKind};

    #[test]
    fn empty_and_blank_inputs_have_no_tokens() {
        for text in ["", "   ", "\t "] {
            let scan = tokenize(text);
            assert!(scan.tokens.is_empty(), "{text:?}");
            assert_eq!(scan.end, text.len());
            assert!(!scan.covers(text));
        }
    }

    #[test]
    fn spans_are_disjoint_and_ordered() {
        let text = "  1:30  5X widgets:3 2;Wires+Keypad ";
        let scan = tokenize(text);
        let spans: Vec<Span> = scan.tokens.iter().map(|t| t.span).collect();
        assert_eq!(spans, vec![Span::new(2, 4), Span::new(8, 2), Span::new(11, 9), Span::new(21, 14)]);
        assert!(scan.covers(text));
        assert!(scan.trailing().is_none());
    }

    #[test]
    fn token_kinds_follow_precedence() {
        let scan = tokenize("1:00 3x strikes:4 Wires");
        let kinds: Vec<&str> = scan
            .tokens
            .iter()
            .map(|t| match t.kind {
                TokenKind::Time(_) => "time",
                TokenKind::StrikeLimit(_) => "strikes",
                TokenKind::Setting(_) => "setting",
                TokenKind::Pool(_) => "pool",
            })
            .collect();
        assert_eq!(kinds, vec!["time", "strikes", "setting", "pool"]);
    }

    #[test]
    fn trailing_partial_token_is_in_progress() {
        let scan = tokenize(r#"Wires "Space T"#);
        let last = scan.trailing().unwrap();
        let TokenKind::Pool(pool) = &last.kind else { panic!("expected pool") };
        assert_eq!(pool.id_list, "\"Space T");
        assert_eq!(pool.stub(), "Space T");
    }

    #[test]
    fn non_ascii_text_is_scanned_on_char_boundaries() {
        let text = "Wirés  Kéypad";
        let scan = tokenize(text);
        assert_eq!(scan.tokens.len(), 2);
        assert!(scan.covers(text));
    }
}
