use crate::completion::{self, Candidate, Hover};
use crate::mission::MissionBuilder;
use crate::{Catalog, Diagnostic, Diagnostics, MissionDescription, ProfileMap, Token};
use std::time::{Duration, Instant};

pub use crate::grammar::tokenize;

const DEFAULT_MAX_MODULES: u32 = 11;

/// Host-supplied data every call reads.
///
/// The catalog and profiles are borrowed for the duration of a call and never
/// modified, so one context can serve any number of parses.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub catalog: &'a Catalog,
    pub profiles: &'a ProfileMap,
}

impl<'a> Context<'a> {
    pub fn new(catalog: &'a Catalog, profiles: &'a ProfileMap) -> Self {
        Context { catalog, profiles }
    }
}

/// Host capabilities that change what is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Largest module count any bomb casing can hold.
    pub max_modules: u32,
    /// Whether `factory:` settings are allowed.
    pub factory_enabled: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options { max_modules: DEFAULT_MAX_MODULES, factory_enabled: false }
    }
}

/// Result from [`parse_verbose`].
#[derive(Debug, Clone)]
pub struct ParseReport {
    /// The parsed input text.
    pub text: String,
    /// Tokens the scanner produced, in order.
    pub tokens: Vec<Token>,
    /// Whether the tokens cover the whole text.
    pub covered: bool,
    pub result: Result<MissionDescription, Diagnostics>,
    /// Total elapsed time spent scanning and building.
    pub elapsed: Duration,
}

/// Parse a mission line.
///
/// Either every token is valid and a mission comes back, or the full list of
/// problems does. There are no partial missions.
///
/// # Example
/// ```
/// use mission_line::{Catalog, Context, Options, ProfileMap, parse};
///
/// let catalog = Catalog::vanilla();
/// let profiles = ProfileMap::new();
/// let ctx = Context::new(&catalog, &profiles);
///
/// let errors = parse("Wires Wires 5X 4X", &ctx, &Options::default()).unwrap_err();
/// assert_eq!(errors.messages(), vec!["Strike limit specified multiple times"]);
/// ```
pub fn parse(text: &str, ctx: &Context<'_>, options: &Options) -> Result<MissionDescription, Diagnostics> {
    parse_verbose(text, ctx, options).result
}

/// Parse `text` and keep the token stream and timing alongside the result.
pub fn parse_verbose(text: &str, ctx: &Context<'_>, options: &Options) -> ParseReport {
    let started = Instant::now();
    let scan = tokenize(text);
    let covered = scan.covers(text);

    let result = if covered {
        let mut builder = MissionBuilder::new(ctx, options);
        for token in &scan.tokens {
            builder.apply(token);
        }
        builder.finish()
    } else {
        log::debug!("[parse] scan stopped at {} of {}", scan.end, text.len());
        Err(Diagnostic::Syntax.into())
    };

    ParseReport { text: text.to_string(), tokens: scan.tokens, covered, result, elapsed: started.elapsed() }
}

/// Completion candidates for the token being typed at `cursor`.
pub fn suggest(text: &str, cursor: usize, ctx: &Context<'_>, options: &Options) -> Vec<Candidate> {
    completion::suggest(text, cursor, ctx, options)
}

/// Splice `candidate` into `text` at `cursor`.
///
/// Informational candidates leave the text alone. A space follows the
/// inserted id unless the id expects more typing (`3*`, `widgets:`).
pub fn apply_candidate(text: &str, cursor: usize, candidate: &Candidate) -> (String, usize) {
    if !candidate.selectable {
        return (text.to_string(), cursor.min(text.len()));
    }
    completion::splice(text, cursor, &candidate.replacement_id, !candidate.expects_more_input())
}

/// The pool identifier under `offset`, with its display name when known.
pub fn identifier_at(text: &str, offset: usize, ctx: &Context<'_>) -> Option<Hover> {
    completion::identifier_at(text, offset, ctx)
}

/// Fix up text after a keystroke: a `,` typed right after an auto-inserted
/// space takes that space's place.
pub fn normalize_edit(text: &str, cursor: usize) -> Option<(String, usize)> {
    completion::normalize_edit(text, cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ComponentType, ModuleInfo, ModuleKind, Profile, ProfileKind, SpecialKind};

    struct Fixture {
        catalog: Catalog,
        profiles: ProfileMap,
    }

    impl Fixture {
        fn new() -> Self {
            let catalog = Catalog::with_modules([
                ModuleInfo::new("Space Test", "Space Test", ModuleKind::Solvable),
                ModuleInfo::new("NeedyThing", "Needy Thing", ModuleKind::Needy),
                ModuleInfo::new("Retired", "Retired Module", ModuleKind::Solvable).disabled(),
            ]);
            let mut profiles = ProfileMap::new();
            profiles.insert(
                "NoWires".to_string(),
                Profile { disabled: ["Wires".to_string()].into(), kind: ProfileKind::Defuser },
            );
            profiles.insert(
                "Quiet".to_string(),
                Profile { disabled: ["NeedyKnob".to_string()].into(), kind: ProfileKind::Expert },
            );
            profiles.insert(
                "Nothing".to_string(),
                Profile {
                    disabled: ComponentType::ALL
                        .iter()
                        .filter(|c| c.kind() == ModuleKind::Solvable)
                        .map(|c| c.id().to_string())
                        .chain(["Space Test".to_string()])
                        .collect(),
                    kind: ProfileKind::Defuser,
                },
            );
            Fixture { catalog, profiles }
        }

        fn parse(&self, text: &str) -> Result<MissionDescription, Diagnostics> {
            self.parse_with(text, &Options::default())
        }

        fn parse_with(&self, text: &str, options: &Options) -> Result<MissionDescription, Diagnostics> {
            parse(text, &Context::new(&self.catalog, &self.profiles), options)
        }

        fn errors(&self, text: &str) -> Vec<String> {
            self.parse(text).unwrap_err().messages()
        }
    }

    #[test]
    fn empty_input_is_a_syntax_error() {
        let f = Fixture::new();
        assert_eq!(f.errors(""), vec!["Syntax error"]);
        assert_eq!(f.errors("   "), vec!["Syntax error"]);
    }

    #[test]
    fn time_and_single_pool() {
        let mission = Fixture::new().parse("1:30 Wires").unwrap();
        assert_eq!(mission.time_limit_seconds, 90);
        assert_eq!(mission.strike_limit, 3);
        assert_eq!(mission.pools.len(), 1);
        assert_eq!(mission.pools[0].count, 1);
        assert!(mission.pools[0].explicit_identifiers.contains("Wires"));
        assert!(mission.pools[0].category_types.contains(&ComponentType::Wires));
    }

    #[test]
    fn defaults_follow_module_count() {
        let mission = Fixture::new().parse("5X Wires,Keypad").unwrap();
        assert_eq!(mission.strike_limit, 5);
        assert_eq!(mission.time_limit_seconds, 120);

        let mission = Fixture::new().parse("2;Wires+Keypad").unwrap();
        assert_eq!(mission.pools[0].count, 2);
        assert_eq!(mission.pools[0].explicit_identifiers.len(), 2);
        assert_eq!(mission.time_limit_seconds, 240);

        let options = Options { max_modules: 100, ..Options::default() };
        let mission = Fixture::new().parse_with("48*Wires", &options).unwrap();
        assert_eq!(mission.strike_limit, 4);
    }

    #[test]
    fn repeated_pools_are_separate() {
        let mission = Fixture::new().parse("Wires Wires").unwrap();
        assert_eq!(mission.pools.len(), 2);
        assert_eq!(mission.module_count(), 2);
    }

    #[test]
    fn unknown_module_also_means_no_regular_modules() {
        assert_eq!(
            Fixture::new().errors("BogusModule"),
            vec!["'BogusModule' is an unknown module ID.", "No regular modules"]
        );
    }

    #[test]
    fn disabled_catalog_module_is_reported() {
        assert_eq!(Fixture::new().errors("Wires Retired"), vec!["'Retired' is disabled."]);
    }

    #[test]
    fn needy_only_missions_have_no_regular_modules() {
        let f = Fixture::new();
        assert_eq!(f.errors("NeedyThing"), vec!["No regular modules"]);
        assert_eq!(f.errors("ALL_NEEDY"), vec!["No regular modules"]);
        assert_eq!(f.errors("Wires,NeedyThing"), vec!["No regular modules"]);
        assert!(f.parse("Wires NeedyThing").is_ok());
    }

    #[test]
    fn pseudo_identifiers_set_special_kind() {
        let mission = Fixture::new().parse("ALL_VANILLA").unwrap();
        let pool = &mission.pools[0];
        assert_eq!(pool.special_kind, Some(SpecialKind::AllSolvable));
        assert!(pool.explicit_identifiers.is_empty());
    }

    #[test]
    fn profiles_resolve_or_report() {
        let f = Fixture::new();
        let mission = f.parse("profile:NoWires").unwrap();
        let ids = &mission.pools[0].explicit_identifiers;
        assert!(!ids.contains("Wires"));
        assert!(ids.contains("Keypad"));
        assert!(ids.contains("Space Test"));
        assert!(!ids.contains("Retired"));

        assert_eq!(f.errors("profile:Missing"), vec!["No profile named 'Missing' was found.", "No regular modules"]);
        assert_eq!(
            f.errors("profile:Nothing"),
            vec!["Profile 'Nothing' enables no valid modules.", "No regular modules"]
        );
    }

    #[test]
    fn needy_profiles_resolve_needy_modules_only() {
        let f = Fixture::new();
        let mission = f.parse("needyprofile:Quiet Wires").unwrap();
        let ids: Vec<&str> = mission.pools[0].explicit_identifiers.iter().map(String::as_str).collect();
        assert_eq!(ids, vec!["NeedyCapacitor", "NeedyThing", "NeedyVentGas"]);

        assert_eq!(f.errors("needyprofile:Nope Wires"), vec!["No profile named 'Nope' was found."]);
        assert_eq!(f.errors("needyprofile:Quiet"), vec!["No regular modules"]);

        let errors = f.parse("needyprofile:Nope").unwrap_err();
        assert!(errors.contains(&Diagnostic::UnknownProfile("Nope".to_string())));
        assert!(errors.contains(&Diagnostic::NoSolvableModules));
    }

    #[test]
    fn duplicate_settings_are_reported_once() {
        let f = Fixture::new();
        assert_eq!(f.errors("1:00 2:00 3:00 Wires"), vec!["Time specified multiple times"]);
        assert_eq!(f.errors("3X strikes:4 5X Wires"), vec!["Strike limit specified multiple times"]);
    }

    #[test]
    fn invalid_values() {
        let f = Fixture::new();
        assert_eq!(f.errors("0:00 Wires"), vec!["Invalid time limit"]);
        assert_eq!(f.errors("0X Wires"), vec!["Invalid strike limit"]);
        assert_eq!(f.errors("0*Wires Keypad"), vec!["Invalid module pool count"]);
        assert_eq!(f.errors("widgets:lots Wires"), vec!["Invalid widget count"]);
    }

    #[test]
    fn empty_setting_value_is_ignored() {
        let mission = Fixture::new().parse("strikes: widgets: Wires").unwrap();
        assert_eq!(mission.strike_limit, 3);
        assert_eq!(mission.widget_count, None);
    }

    #[test]
    fn flags_and_scalar_settings() {
        let mission = Fixture::new().parse("nopacing FrontOnly widgets:7 needyactivationtime:45 Wires").unwrap();
        assert!(!mission.pacing_enabled);
        assert!(mission.front_face_only);
        assert_eq!(mission.widget_count, Some(7));
        assert_eq!(mission.needy_activation_delay, Some(45));
    }

    #[test]
    fn factory_requires_host_support() {
        let f = Fixture::new();
        assert_eq!(f.errors("factory:static Wires"), vec!["Factory does not seem to be enabled"]);

        let options = Options { factory_enabled: true, ..Options::default() };
        let mission = f.parse_with("factory:FINITE Wires", &options).unwrap();
        assert_eq!(mission.factory_mode.map(|m| m.id), Some("finite"));
        assert_eq!(mission.module_count(), 1);
        assert_eq!(mission.time_limit_seconds, 120);
        assert_eq!(mission.strike_limit, 3);

        let errors = f.parse_with("factory:nope factory:static Wires", &options).unwrap_err();
        assert_eq!(errors.messages(), vec!["Invalid factory mode", "Factory mode specified multiple times"]);
    }

    #[test]
    fn capacity_is_checked_last() {
        let errors = Fixture::new().parse("12*Wires").unwrap_err();
        assert_eq!(errors.messages(), vec!["Too many modules for any bomb casing (12 > 11)."]);

        let errors = Fixture::new().parse("12*NeedyThing").unwrap_err();
        assert_eq!(
            errors.messages(),
            vec!["No regular modules", "Too many modules for any bomb casing (12 > 11)."]
        );
    }

    #[test]
    fn canonical_text_parses_back_to_the_same_mission() {
        let f = Fixture::new();
        let options = Options { factory_enabled: true, ..Options::default() };
        for text in [
            "1:30 Wires",
            "2;Wires+Keypad 1:00:05 7X nopacing",
            "\"Space Test\",Wires ALL_MODS_NEEDY frontonly widgets:3",
            "profile:NoWires needyactivationtime:20 factory:infinitegtime",
            "needyprofile:Quiet Wires",
            "999999999:999999999:999999999 Wires",
            "999999999:59 999999999X Wires",
            "strikes:4000000000 Wires",
        ] {
            let mission = f.parse_with(text, &options).unwrap();
            let canonical = mission.to_canonical();
            assert_eq!(f.parse_with(&canonical, &options).unwrap(), mission, "{canonical}");
        }
    }

    #[test]
    fn verbose_parse_keeps_tokens() {
        let f = Fixture::new();
        let report = parse_verbose("1:00 Wires ", &Context::new(&f.catalog, &f.profiles), &Options::default());
        assert!(report.covered);
        assert_eq!(report.tokens.len(), 2);
        assert!(report.result.is_ok());
    }

    #[test]
    fn apply_adds_space_unless_more_input_expected() {
        let f = Fixture::new();
        let ctx = Context::new(&f.catalog, &f.profiles);
        let options = Options::default();

        let candidates = suggest("Wires,Key", 9, &ctx, &options);
        assert_eq!(apply_candidate("Wires,Key", 9, &candidates[0]), ("Wires,Keypad ".to_string(), 13));

        let candidates = suggest("3", 1, &ctx, &options);
        let star = candidates.iter().find(|c| c.replacement_id == "3*").unwrap();
        assert_eq!(apply_candidate("3", 1, star), ("3*".to_string(), 2));

        let info = &suggest("1:00", 4, &ctx, &options)[0];
        assert_eq!(apply_candidate("1:00", 4, info), ("1:00".to_string(), 4));
    }
}
