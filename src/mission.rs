//! Mission descriptions and the builder that produces them from tokens.
//!
//! ```text
//! Scan ── covers text? ──no──▶ [Syntax error]
//!            │yes
//!            v
//!   MissionBuilder::apply (per token, builder.rs)
//!      - settings: uniqueness + range checks
//!      - pools: pseudo ids / profiles / explicit ids (pool.rs)
//!            │
//!            v
//!   MissionBuilder::finish
//!      - at least one solvable pool
//!      - module count vs. casing capacity
//!      - defaults for time and strikes
//!            │
//!            v
//!   Result<MissionDescription, Diagnostics>
//! ```
//!
//! Building is all-or-nothing: every token is checked and every violation is
//! collected, and if there is even one the mission is dropped.

#[path = "mission/builder.rs"]
mod builder;
#[path = "mission/canonical.rs"]
mod canonical;
#[path = "mission/diagnostics.rs"]
mod diagnostics;
#[path = "mission/pool.rs"]
mod pool;

pub(crate) use builder::MissionBuilder;
pub use diagnostics::{Diagnostic, Diagnostics};
pub use pool::{ComponentSource, Pool, SpecialKind};

use crate::FactoryMode;
use serde::Serialize;

/// Name the host should show for missions built from a mission line.
pub const MISSION_DISPLAY_NAME: &str = "Custom Freeplay";

/// A fully validated mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissionDescription {
    pub time_limit_seconds: u64,
    pub strike_limit: u32,
    pub pacing_enabled: bool,
    pub front_face_only: bool,
    pub widget_count: Option<u32>,
    pub needy_activation_delay: Option<u32>,
    pub factory_mode: Option<FactoryMode>,
    pub pools: Vec<Pool>,
}

impl MissionDescription {
    /// Total modules requested across all pools.
    pub fn module_count(&self) -> u64 {
        self.pools.iter().map(|p| u64::from(p.count)).sum()
    }

    pub fn display_name(&self) -> &'static str {
        MISSION_DISPLAY_NAME
    }
}
