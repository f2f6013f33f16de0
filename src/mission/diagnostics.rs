//! Parse diagnostics.
//!
//! Each variant's `Display` is the exact message shown to the user.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    #[error("Syntax error")]
    Syntax,
    #[error("Time specified multiple times")]
    TimeSpecifiedMultipleTimes,
    #[error("Invalid time limit")]
    InvalidTimeLimit,
    #[error("Strike limit specified multiple times")]
    StrikeLimitSpecifiedMultipleTimes,
    #[error("Invalid strike limit")]
    InvalidStrikeLimit,
    #[error("Invalid widget count")]
    InvalidWidgetCount,
    #[error("Invalid needy activation time")]
    InvalidNeedyActivationTime,
    #[error("Factory mode specified multiple times")]
    FactorySpecifiedMultipleTimes,
    #[error("Factory does not seem to be enabled")]
    FactoryNotEnabled,
    #[error("Invalid factory mode")]
    InvalidFactoryMode,
    #[error("Invalid module pool count")]
    InvalidPoolCount,
    #[error("No profile named '{0}' was found.")]
    UnknownProfile(String),
    #[error("Profile '{0}' enables no valid modules.")]
    EmptyProfile(String),
    #[error("'{0}' is an unknown module ID.")]
    UnknownModule(String),
    #[error("'{0}' is disabled.")]
    DisabledModule(String),
    #[error("No regular modules")]
    NoSolvableModules,
    #[error("Too many modules for any bomb casing ({count} > {max}).")]
    TooManyModules { count: u64, max: u32 },
}

/// Ordered, non-empty list of everything wrong with a mission line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub(crate) fn new(list: Vec<Diagnostic>) -> Self {
        debug_assert!(!list.is_empty());
        Diagnostics(list)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, diagnostic: &Diagnostic) -> bool {
        self.0.contains(diagnostic)
    }

    /// Human-readable messages, in the order they were found.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Diagnostics(vec![diagnostic])
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_substitute_names_verbatim() {
        assert_eq!(
            Diagnostic::UnknownProfile("My Pro'file".into()).to_string(),
            "No profile named 'My Pro'file' was found."
        );
        assert_eq!(Diagnostic::UnknownModule("Bogus".into()).to_string(), "'Bogus' is an unknown module ID.");
        assert_eq!(
            Diagnostic::TooManyModules { count: 12, max: 11 }.to_string(),
            "Too many modules for any bomb casing (12 > 11)."
        );
    }

    #[test]
    fn display_joins_with_newlines() {
        let d = Diagnostics::new(vec![Diagnostic::InvalidTimeLimit, Diagnostic::NoSolvableModules]);
        assert_eq!(d.to_string(), "Invalid time limit\nNo regular modules");
        assert_eq!(d.messages(), vec!["Invalid time limit", "No regular modules"]);
    }
}
