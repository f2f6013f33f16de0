//! Host-supplied knowledge: which module identifiers exist, which are
//! enabled, and the named profiles that can be turned into pools.
//!
//! Nothing here does I/O. A host builds a [`Catalog`] and a [`ProfileMap`]
//! once and shares them read-only with every parse and completion call.

use crate::mission::{ComponentSource, SpecialKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Solvable,
    Needy,
}

/// A module the host knows about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    pub kind: ModuleKind,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl ModuleInfo {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, kind: ModuleKind) -> Self {
        ModuleInfo { id: id.into(), display_name: display_name.into(), kind, enabled: true }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

// --- Vanilla components -------------------------------------------------------

/// Base-game components. Their identifiers are category shortcuts: they are
/// accepted without consulting the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ComponentType {
    Wires,
    Keypad,
    Memory,
    Maze,
    Password,
    BigButton,
    Simon,
    WhosOnFirst,
    Morse,
    Venn,
    WireSequence,
    NeedyVentGas,
    NeedyCapacitor,
    NeedyKnob,
}

impl ComponentType {
    pub const ALL: [ComponentType; 14] = [
        ComponentType::Wires,
        ComponentType::Keypad,
        ComponentType::Memory,
        ComponentType::Maze,
        ComponentType::Password,
        ComponentType::BigButton,
        ComponentType::Simon,
        ComponentType::WhosOnFirst,
        ComponentType::Morse,
        ComponentType::Venn,
        ComponentType::WireSequence,
        ComponentType::NeedyVentGas,
        ComponentType::NeedyCapacitor,
        ComponentType::NeedyKnob,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ComponentType::Wires => "Wires",
            ComponentType::Keypad => "Keypad",
            ComponentType::Memory => "Memory",
            ComponentType::Maze => "Maze",
            ComponentType::Password => "Password",
            ComponentType::BigButton => "BigButton",
            ComponentType::Simon => "Simon",
            ComponentType::WhosOnFirst => "WhosOnFirst",
            ComponentType::Morse => "Morse",
            ComponentType::Venn => "Venn",
            ComponentType::WireSequence => "WireSequence",
            ComponentType::NeedyVentGas => "NeedyVentGas",
            ComponentType::NeedyCapacitor => "NeedyCapacitor",
            ComponentType::NeedyKnob => "NeedyKnob",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ComponentType::BigButton => "The Button",
            ComponentType::Simon => "Simon Says",
            ComponentType::WhosOnFirst => "Who's On First",
            ComponentType::Morse => "Morse Code",
            ComponentType::Venn => "Complicated Wires",
            ComponentType::WireSequence => "Wire Sequence",
            ComponentType::NeedyVentGas => "Venting Gas",
            ComponentType::NeedyCapacitor => "Capacitor Discharge",
            ComponentType::NeedyKnob => "Knob",
            other => other.id(),
        }
    }

    pub fn kind(self) -> ModuleKind {
        match self {
            ComponentType::NeedyVentGas | ComponentType::NeedyCapacitor | ComponentType::NeedyKnob => ModuleKind::Needy,
            _ => ModuleKind::Solvable,
        }
    }

    /// Exact-case lookup.
    pub fn from_id(id: &str) -> Option<Self> {
        ComponentType::ALL.into_iter().find(|c| c.id() == id)
    }
}

// --- Pseudo identifiers ---------------------------------------------------------

/// Reserved identifiers that stand for a whole category of modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoIdentifier {
    AllSolvable,
    AllNeedy,
    AllVanilla,
    AllMods,
    AllVanillaNeedy,
    AllModsNeedy,
}

impl PseudoIdentifier {
    pub const ALL: [PseudoIdentifier; 6] = [
        PseudoIdentifier::AllSolvable,
        PseudoIdentifier::AllNeedy,
        PseudoIdentifier::AllVanilla,
        PseudoIdentifier::AllMods,
        PseudoIdentifier::AllVanillaNeedy,
        PseudoIdentifier::AllModsNeedy,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PseudoIdentifier::AllSolvable => "ALL_SOLVABLE",
            PseudoIdentifier::AllNeedy => "ALL_NEEDY",
            PseudoIdentifier::AllVanilla => "ALL_VANILLA",
            PseudoIdentifier::AllMods => "ALL_MODS",
            PseudoIdentifier::AllVanillaNeedy => "ALL_VANILLA_NEEDY",
            PseudoIdentifier::AllModsNeedy => "ALL_MODS_NEEDY",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            PseudoIdentifier::AllSolvable => "[All solvable modules]",
            PseudoIdentifier::AllNeedy => "[All needy modules]",
            PseudoIdentifier::AllVanilla => "[All vanilla solvable modules]",
            PseudoIdentifier::AllMods => "[All mod solvable modules]",
            PseudoIdentifier::AllVanillaNeedy => "[All vanilla needy modules]",
            PseudoIdentifier::AllModsNeedy => "[All mod needy modules]",
        }
    }

    pub fn special_kind(self) -> SpecialKind {
        match self {
            PseudoIdentifier::AllSolvable | PseudoIdentifier::AllVanilla | PseudoIdentifier::AllMods => {
                SpecialKind::AllSolvable
            }
            _ => SpecialKind::AllNeedy,
        }
    }

    pub fn sources(self) -> ComponentSource {
        match self {
            PseudoIdentifier::AllSolvable | PseudoIdentifier::AllNeedy => ComponentSource::BASE | ComponentSource::MODS,
            PseudoIdentifier::AllVanilla | PseudoIdentifier::AllVanillaNeedy => ComponentSource::BASE,
            PseudoIdentifier::AllMods | PseudoIdentifier::AllModsNeedy => ComponentSource::MODS,
        }
    }

    /// Exact-case lookup.
    pub fn from_id(id: &str) -> Option<Self> {
        PseudoIdentifier::ALL.into_iter().find(|p| p.id() == id)
    }

    /// Inverse of `(special_kind, sources)`.
    pub fn from_parts(kind: SpecialKind, sources: ComponentSource) -> Option<Self> {
        PseudoIdentifier::ALL.into_iter().find(|p| p.special_kind() == kind && p.sources() == sources)
    }
}

// --- Factory modes --------------------------------------------------------------

/// A factory mode. `implicit_count` is its position in [`FACTORY_MODES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FactoryMode {
    pub id: &'static str,
    pub display_name: &'static str,
    pub implicit_count: u32,
}

pub static FACTORY_MODES: [FactoryMode; 9] = [
    FactoryMode { id: "static", display_name: "Factory: Static", implicit_count: 0 },
    FactoryMode { id: "finite", display_name: "Factory: Finite", implicit_count: 1 },
    FactoryMode { id: "finitegtime", display_name: "Factory: Finite + global time", implicit_count: 2 },
    FactoryMode { id: "finitegstrikes", display_name: "Factory: Finite + global strikes", implicit_count: 3 },
    FactoryMode {
        id: "finitegtimestrikes",
        display_name: "Factory: Finite + global time and strikes",
        implicit_count: 4,
    },
    FactoryMode { id: "infinite", display_name: "Factory: Infinite", implicit_count: 5 },
    FactoryMode { id: "infinitegtime", display_name: "Factory: Infinite + global time", implicit_count: 6 },
    FactoryMode { id: "infinitegstrikes", display_name: "Factory: Infinite + global strikes", implicit_count: 7 },
    FactoryMode {
        id: "infinitegtimestrikes",
        display_name: "Factory: Infinite + global time and strikes",
        implicit_count: 8,
    },
];

impl FactoryMode {
    /// Case-insensitive lookup by mode name.
    pub fn lookup(value: &str) -> Option<FactoryMode> {
        FACTORY_MODES.iter().copied().find(|m| m.id.eq_ignore_ascii_case(value))
    }
}

// --- Profiles -------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProfileKind {
    #[default]
    Expert,
    Defuser,
}

/// A named preset: every module except the disabled ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Profile {
    pub disabled: HashSet<String>,
    pub kind: ProfileKind,
}

pub type ProfileMap = BTreeMap<String, Profile>;

// --- Catalog --------------------------------------------------------------------

/// One completion target: an identifier and what to show for it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CatalogEntry {
    pub id: String,
    pub display_name: String,
}

impl CatalogEntry {
    fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        CatalogEntry { id: id.into(), display_name: display_name.into() }
    }
}

/// Known modules by identifier (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    modules: BTreeMap<String, ModuleInfo>,
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::vanilla()
    }
}

impl Catalog {
    /// A catalog holding only the base-game components, all enabled.
    pub fn vanilla() -> Self {
        let modules = ComponentType::ALL
            .into_iter()
            .map(|c| (c.id().to_string(), ModuleInfo::new(c.id(), c.display_name(), c.kind())))
            .collect();
        Catalog { modules }
    }

    /// The vanilla catalog extended with `modules` (later entries win).
    pub fn with_modules(modules: impl IntoIterator<Item = ModuleInfo>) -> Self {
        let mut catalog = Catalog::vanilla();
        for module in modules {
            catalog.insert(module);
        }
        catalog
    }

    pub fn insert(&mut self, module: ModuleInfo) {
        self.modules.insert(module.id.clone(), module);
    }

    pub fn get(&self, id: &str) -> Option<&ModuleInfo> {
        self.modules.get(id)
    }

    pub fn modules(&self) -> impl Iterator<Item = &ModuleInfo> {
        self.modules.values()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Enabled identifiers of `kind`, ascending.
    pub fn enabled_of_kind(&self, kind: ModuleKind) -> impl Iterator<Item = &str> {
        self.modules().filter(move |m| m.enabled && m.kind == kind).map(|m| m.id.as_str())
    }

    /// Identifiers a profile leaves enabled for `kind`, ascending.
    pub fn resolve_profile(&self, profile: &Profile, kind: ModuleKind) -> Vec<&str> {
        self.enabled_of_kind(kind).filter(|id| !profile.disabled.contains(*id)).collect()
    }

    /// Everything the completion engine may offer for a pool stub, sorted by
    /// identifier and then display name.
    pub fn completion_entries(&self, profiles: &ProfileMap, factory_enabled: bool) -> Vec<CatalogEntry> {
        let mut entries: BTreeSet<CatalogEntry> =
            self.modules().map(|m| CatalogEntry::new(&m.id, &m.display_name)).collect();

        entries.extend(PseudoIdentifier::ALL.into_iter().map(|p| CatalogEntry::new(p.id(), p.display_name())));
        entries.insert(CatalogEntry::new("frontonly", "[Front face only]"));
        entries.insert(CatalogEntry::new("nopacing", "[Disable pacing events]"));
        entries.insert(CatalogEntry::new("widgets:", "[Set widget count]"));
        entries.insert(CatalogEntry::new("needyactivationtime:", "[Set needy activation time in seconds]"));
        if factory_enabled {
            entries.insert(CatalogEntry::new("factory:", "[Set Factory mode]"));
        }

        for (name, profile) in profiles {
            if self.profile_affects(profile, ModuleKind::Solvable) {
                entries.insert(CatalogEntry::new(
                    format!("profile:{name}"),
                    format!("{name} (solvable modules enabled by profile)"),
                ));
            }
            if self.profile_affects(profile, ModuleKind::Needy) {
                entries.insert(CatalogEntry::new(
                    format!("needyprofile:{name}"),
                    format!("{name} (needy modules enabled by profile)"),
                ));
            }
        }

        entries.into_iter().collect()
    }

    /// Defuser profiles that disable nothing of `kind` are not worth listing.
    fn profile_affects(&self, profile: &Profile, kind: ModuleKind) -> bool {
        profile.kind == ProfileKind::Expert
            || profile.disabled.iter().any(|id| self.get(id).is_some_and(|m| m.kind == kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defuser(disabled: &[&str]) -> Profile {
        Profile { disabled: disabled.iter().map(|s| s.to_string()).collect(), kind: ProfileKind::Defuser }
    }

    #[test]
    fn vanilla_catalog_knows_base_components() {
        let catalog = Catalog::vanilla();
        assert_eq!(catalog.len(), 14);
        assert_eq!(catalog.get("BigButton").map(|m| m.display_name.as_str()), Some("The Button"));
        assert_eq!(catalog.get("NeedyKnob").map(|m| m.kind), Some(ModuleKind::Needy));
        assert!(catalog.get("wires").is_none());
        assert_eq!(catalog.modules().filter(|m| m.kind == ModuleKind::Needy).count(), 3);
    }

    #[test]
    fn pseudo_identifier_parts_round_trip() {
        for p in PseudoIdentifier::ALL {
            assert_eq!(PseudoIdentifier::from_parts(p.special_kind(), p.sources()), Some(p));
            assert_eq!(PseudoIdentifier::from_id(p.id()), Some(p));
        }
        assert_eq!(PseudoIdentifier::from_id("all_solvable"), None);
    }

    #[test]
    fn factory_lookup_ignores_case_and_reports_index() {
        let mode = FactoryMode::lookup("FiniteGTime").unwrap();
        assert_eq!(mode.id, "finitegtime");
        assert_eq!(mode.implicit_count, 2);
        assert!(FactoryMode::lookup("sometimes").is_none());
    }

    #[test]
    fn profile_resolution_skips_disabled_and_catalog_disabled_modules() {
        let catalog = Catalog::with_modules([
            ModuleInfo::new("Mod1", "Mod One", ModuleKind::Solvable),
            ModuleInfo::new("Mod2", "Mod Two", ModuleKind::Solvable).disabled(),
        ]);
        let profile = defuser(&["Wires", "Keypad"]);
        let ids = catalog.resolve_profile(&profile, ModuleKind::Solvable);
        assert!(ids.contains(&"Mod1"));
        assert!(!ids.contains(&"Mod2"));
        assert!(!ids.contains(&"Wires"));
        assert!(!ids.contains(&"NeedyKnob"));
    }

    #[test]
    fn completion_entries_are_sorted_and_filter_profiles() {
        let catalog = Catalog::vanilla();
        let mut profiles = ProfileMap::new();
        profiles.insert("solo".into(), defuser(&["Wires"]));
        profiles.insert("idle".into(), defuser(&[]));
        profiles.insert("expert".into(), Profile { disabled: HashSet::new(), kind: ProfileKind::Expert });

        let entries = catalog.completion_entries(&profiles, false);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();

        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);

        assert!(ids.contains(&"profile:solo"));
        assert!(!ids.contains(&"needyprofile:solo"));
        assert!(!ids.iter().any(|id| id.ends_with(":idle")));
        assert!(ids.contains(&"profile:expert"));
        assert!(ids.contains(&"needyprofile:expert"));
        assert!(!ids.contains(&"factory:"));
        assert!(catalog.completion_entries(&profiles, true).iter().any(|e| e.id == "factory:"));
    }
}
