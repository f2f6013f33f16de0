//! Normalized module pools.

use crate::ComponentType;
use serde::Serialize;
use std::collections::BTreeSet;

bitflags::bitflags! {
    /// Where a category pool may draw modules from.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    pub struct ComponentSource: u8 {
        const BASE = 1 << 0;
        const MODS = 1 << 1;
    }
}

/// Category a pseudo-identifier pool draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SpecialKind {
    AllSolvable,
    AllNeedy,
}

/// One group of candidate modules and how many to draw from it.
///
/// `explicit_identifiers` holds every identifier named by the pool (or
/// enabled by its profile). The base-game ones among them are mirrored in
/// `category_types`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pool {
    pub count: u32,
    pub allowed_sources: ComponentSource,
    pub special_kind: Option<SpecialKind>,
    pub explicit_identifiers: BTreeSet<String>,
    pub category_types: BTreeSet<ComponentType>,
}

impl Pool {
    pub(crate) fn new(count: u32) -> Self {
        Pool {
            count,
            allowed_sources: ComponentSource::empty(),
            special_kind: None,
            explicit_identifiers: BTreeSet::new(),
            category_types: BTreeSet::new(),
        }
    }

    pub(crate) fn add_identifier(&mut self, id: &str) {
        if let Some(component) = ComponentType::from_id(id) {
            self.category_types.insert(component);
        }
        self.explicit_identifiers.insert(id.to_string());
    }

    /// Named identifiers that are not base-game components.
    pub fn mod_identifiers(&self) -> impl Iterator<Item = &str> {
        self.explicit_identifiers.iter().map(String::as_str).filter(|id| ComponentType::from_id(id).is_none())
    }
}
