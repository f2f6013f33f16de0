//! `mission-line`: a one-line mission description language.
//!
//! A mission line is a whitespace-separated list of tokens, each optional and
//! in any order:
//!
//! ```text
//! [[H:]M:S]                time limit
//! NX                       strike limit
//! strikes[:N]              strike limit (setting form)
//! needyactivationtime[:N]  seconds before needy modules activate
//! widgets[:N]              optional widget count
//! nopacing | frontonly     flags
//! factory[:mode]           factory mode
//! [count;|count*]id[,id|+id...]   module pool
//! ```
//!
//! The crate tokenizes and builds such lines into a [`MissionDescription`]
//! (or a full list of [`Diagnostics`]) and drives interactive completion of
//! the token under a cursor.
//!
//! # Example
//! ```
//! use mission_line::{Catalog, Context, Options, ProfileMap, parse};
//!
//! let catalog = Catalog::vanilla();
//! let profiles = ProfileMap::new();
//! let ctx = Context::new(&catalog, &profiles);
//!
//! let mission = parse("1:30 Wires", &ctx, &Options::default()).unwrap();
//! assert_eq!(mission.time_limit_seconds, 90);
//! assert_eq!(mission.strike_limit, 3);
//! ```

extern crate self as mission_line;

#[macro_use]
mod macros;
mod api;
mod catalog;
mod completion;
mod grammar;
mod mission;

pub use api::{
    Context, Options, ParseReport, apply_candidate, identifier_at, normalize_edit, parse, parse_verbose, suggest,
    tokenize,
};
pub use catalog::{
    Catalog, CatalogEntry, ComponentType, FACTORY_MODES, FactoryMode, ModuleInfo, ModuleKind, Profile, ProfileKind,
    ProfileMap, PseudoIdentifier,
};
pub use completion::{Candidate, CompletionCycle, CycleDirection, CycleStep, Highlight, HighlightTarget, Hover};
pub use grammar::Scan;
pub use mission::{
    ComponentSource, Diagnostic, Diagnostics, MISSION_DISPLAY_NAME, MissionDescription, Pool, SpecialKind,
};

// --- Token model -------------------------------------------------------------

/// Byte span into the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Span {
    /// Start byte index (inclusive).
    pub start: usize,
    /// Length in bytes.
    pub len: usize,
}

impl Span {
    pub fn new(start: usize, len: usize) -> Self {
        Span { start, len }
    }

    /// End byte index (exclusive).
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// One classified token together with the slice of input it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub span: Span,
    pub kind: TokenKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Time(TimeToken),
    StrikeLimit(StrikeLimitToken),
    Setting(SettingToken),
    Pool(PoolToken),
}

/// `[hours:]minutes:seconds`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeToken {
    pub hours: Option<u32>,
    pub minutes: u32,
    pub seconds: u32,
}

impl TimeToken {
    pub fn total_seconds(&self) -> u64 {
        u64::from(self.hours.unwrap_or(0)) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }
}

/// `NX`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrikeLimitToken {
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingToken {
    pub name: SettingName,
    /// Text after the `:`; `None` when there was no colon.
    pub value: Option<String>,
    /// Setting name exactly as typed.
    pub raw_name: String,
}

impl SettingToken {
    /// The value, treating an explicit empty value (`strikes:`) as absent.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingName {
    Strikes,
    NeedyActivationTime,
    Widgets,
    NoPacing,
    FrontOnly,
    Factory,
}

impl SettingName {
    pub const ALL: [SettingName; 6] = [
        SettingName::Strikes,
        SettingName::NeedyActivationTime,
        SettingName::Widgets,
        SettingName::NoPacing,
        SettingName::FrontOnly,
        SettingName::Factory,
    ];

    /// Canonical (lowercase) keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            SettingName::Strikes => "strikes",
            SettingName::NeedyActivationTime => "needyactivationtime",
            SettingName::Widgets => "widgets",
            SettingName::NoPacing => "nopacing",
            SettingName::FrontOnly => "frontonly",
            SettingName::Factory => "factory",
        }
    }

    pub fn from_keyword(s: &str) -> Option<Self> {
        SettingName::ALL.into_iter().find(|name| name.keyword().eq_ignore_ascii_case(s))
    }
}

/// `[count;|count*]idList`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolToken {
    pub count: Option<u32>,
    /// Raw identifier list, quotes and separators still in place.
    pub id_list: String,
    /// Byte offset of `id_list` within the scanned text.
    pub id_list_start: usize,
}

impl PoolToken {
    /// Byte offset (relative to `id_list`) where the last identifier starts.
    pub fn last_id_offset(&self) -> usize {
        self.id_list.rfind([',', '+']).map(|i| i + 1).unwrap_or(0)
    }

    /// The identifier after the last `,`/`+`, quotes stripped.
    pub fn stub(&self) -> String {
        self.id_list[self.last_id_offset()..].replace('"', "")
    }
}
