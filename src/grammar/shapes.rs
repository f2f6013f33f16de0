//! Token shapes in precedence order.
//!
//! Each shape is an anchored regex run against the text from the scan
//! position. A shape only claims a token if its match is followed by
//! whitespace or the end of the input; otherwise the next shape is tried.
//! This is the ordered-alternation behavior of a single tokenizer regex,
//! spelled out because `regex` has no look-ahead.

use crate::{PoolToken, SettingName, SettingToken, Span, StrikeLimitToken, TimeToken, Token, TokenKind};
use regex::{Captures, Regex};

type Build = fn(&Captures<'_>, usize) -> Option<TokenKind>;

struct Shape {
    name: &'static str,
    regex: fn() -> &'static Regex,
    build: Build,
}

static SHAPES: &[Shape] = &[
    Shape { name: "time", regex: time_regex, build: build_time },
    Shape { name: "strike_limit", regex: strike_limit_regex, build: build_strike_limit },
    Shape { name: "setting", regex: setting_regex, build: build_setting },
    Shape { name: "pool", regex: pool_regex, build: build_pool },
];

fn time_regex() -> &'static Regex {
    shape!(r"(?:([0-9]{1,9}):)?([0-9]{1,9}):([0-9]{1,9})")
}

fn strike_limit_regex() -> &'static Regex {
    shape!(r"([0-9]{1,9})x\b")
}

fn setting_regex() -> &'static Regex {
    shape!(r"(strikes|needyactivationtime|widgets|nopacing|frontonly|factory)(?::(\S*))?")
}

/// Optional `count;`/`count*`, then ids. A `"` opens a span that may hold
/// whitespace and closes at the next `"` or the end of input.
fn pool_regex() -> &'static Regex {
    shape!(r#"(?:([0-9]{1,9})[;*])?((?:[^\s"]|"[^"]*(?:"|$))+)"#)
}

/// Classify the token starting at `start` (which must not be whitespace).
pub(super) fn classify(text: &str, start: usize) -> Token {
    let rest = &text[start..];

    for shape in SHAPES {
        let Some(caps) = (shape.regex)().captures(rest) else {
            continue;
        };
        let len = caps.get(0).map_or(0, |m| m.end());
        if len == 0 || !at_boundary(&rest[len..]) {
            continue;
        }
        if let Some(kind) = (shape.build)(&caps, start) {
            log::trace!("[shape] {} at {}..{}: {:?}", shape.name, start, start + len, &rest[..len]);
            return Token { span: Span::new(start, len), kind };
        }
    }

    // Unreachable for well-formed UTF-8 in practice: the pool shape accepts
    // any non-whitespace run. Keep the token so callers can still report it.
    let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
    log::trace!("[shape] unclassified at {}..{}", start, start + len);
    Token {
        span: Span::new(start, len),
        kind: TokenKind::Pool(PoolToken { count: None, id_list: rest[..len].to_string(), id_list_start: start }),
    }
}

fn at_boundary(after: &str) -> bool {
    after.chars().next().is_none_or(char::is_whitespace)
}

fn number(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group).and_then(|m| m.as_str().parse().ok())
}

fn build_time(caps: &Captures<'_>, _start: usize) -> Option<TokenKind> {
    Some(TokenKind::Time(TimeToken { hours: number(caps, 1), minutes: number(caps, 2)?, seconds: number(caps, 3)? }))
}

fn build_strike_limit(caps: &Captures<'_>, _start: usize) -> Option<TokenKind> {
    Some(TokenKind::StrikeLimit(StrikeLimitToken { count: number(caps, 1)? }))
}

fn build_setting(caps: &Captures<'_>, _start: usize) -> Option<TokenKind> {
    let raw_name = caps.get(1)?.as_str();
    Some(TokenKind::Setting(SettingToken {
        name: SettingName::from_keyword(raw_name)?,
        value: caps.get(2).map(|m| m.as_str().to_string()),
        raw_name: raw_name.to_string(),
    }))
}

fn build_pool(caps: &Captures<'_>, start: usize) -> Option<TokenKind> {
    let ids = caps.get(2)?;
    Some(TokenKind::Pool(PoolToken {
        count: number(caps, 1),
        id_list: ids.as_str().to_string(),
        id_list_start: start + ids.start(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(text: &str) -> TokenKind {
        classify(text, 0).kind
    }

    #[test]
    fn time_prefers_hours_when_three_fields() {
        assert_eq!(kind("1:02:03"), TokenKind::Time(TimeToken { hours: Some(1), minutes: 2, seconds: 3 }));
        assert_eq!(kind("5:00"), TokenKind::Time(TimeToken { hours: None, minutes: 5, seconds: 0 }));
    }

    #[test]
    fn time_with_trailing_garbage_falls_through_to_pool() {
        let TokenKind::Pool(pool) = kind("1:30abc") else { panic!("expected pool") };
        assert_eq!(pool.id_list, "1:30abc");
        assert_eq!(pool.count, None);
    }

    #[test]
    fn strike_limit_is_case_insensitive() {
        assert_eq!(kind("4x"), TokenKind::StrikeLimit(StrikeLimitToken { count: 4 }));
        assert_eq!(kind("4X"), TokenKind::StrikeLimit(StrikeLimitToken { count: 4 }));
    }

    #[test]
    fn setting_value_is_optional() {
        let TokenKind::Setting(s) = kind("Widgets:5") else { panic!("expected setting") };
        assert_eq!(s.name, SettingName::Widgets);
        assert_eq!(s.value.as_deref(), Some("5"));
        assert_eq!(s.raw_name, "Widgets");

        let TokenKind::Setting(s) = kind("strikes:") else { panic!("expected setting") };
        assert_eq!(s.value.as_deref(), Some(""));
        assert_eq!(s.value(), None);

        let TokenKind::Setting(s) = kind("nopacing") else { panic!("expected setting") };
        assert_eq!(s.value, None);
    }

    #[test]
    fn setting_prefix_of_longer_word_is_a_pool() {
        assert!(matches!(kind("frontonlyx"), TokenKind::Pool(_)));
    }

    #[test]
    fn pool_count_separator() {
        let TokenKind::Pool(p) = kind("3*Wires,Keypad") else { panic!("expected pool") };
        assert_eq!(p.count, Some(3));
        assert_eq!(p.id_list, "Wires,Keypad");
        assert_eq!(p.id_list_start, 2);
    }

    #[test]
    fn dangling_count_separator_is_part_of_the_id_list() {
        let TokenKind::Pool(p) = kind("12;") else { panic!("expected pool") };
        assert_eq!(p.count, None);
        assert_eq!(p.id_list, "12;");
    }

    #[test]
    fn quoted_ids_may_contain_whitespace() {
        let token = classify(r#""Space Test",Wires tail"#, 0);
        assert_eq!(token.span, Span::new(0, 18));
        let token = classify(r#"Wires+"open quote runs on"#, 0);
        assert_eq!(token.span.len, 25);
    }
}
