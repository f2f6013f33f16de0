/// Lazily compiled `'static` regex.
#[macro_export]
macro_rules! regex {
    ($pat:expr) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Token shape regex, anchored at the start of the haystack and
/// case-insensitive.
///
/// Shapes are always run against `&text[start..]`, so `^` means "at the
/// current scan position".
#[macro_export]
macro_rules! shape {
    ($pat:literal) => {
        $crate::regex!(concat!("^(?i:", $pat, ")"))
    };
}
