//! Canonical mission-line text for a built mission.
//!
//! Parsing the canonical text with the same catalog and profiles yields an
//! equal mission. Profile pools are written out as their resolved
//! identifiers, and defaults are written explicitly.

use super::{MissionDescription, Pool};
use crate::PseudoIdentifier;
use std::fmt::Write;

/// Largest value a numeric field of a time or strike-limit token can hold.
const MAX_FIELD: u64 = 999_999_999;

impl MissionDescription {
    pub fn to_canonical(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        parts.push(format_time(self.time_limit_seconds));
        parts.push(format_strike_limit(self.strike_limit));
        if let Some(widgets) = self.widget_count {
            parts.push(format!("widgets:{widgets}"));
        }
        if let Some(delay) = self.needy_activation_delay {
            parts.push(format!("needyactivationtime:{delay}"));
        }
        if !self.pacing_enabled {
            parts.push("nopacing".to_string());
        }
        if self.front_face_only {
            parts.push("frontonly".to_string());
        }
        if let Some(mode) = self.factory_mode {
            parts.push(format!("factory:{}", mode.id));
        }
        parts.extend(self.pools.iter().map(format_pool));

        parts.join(" ")
    }
}

/// Fields fill from hours down, each capped at [`MAX_FIELD`], so every total
/// a time token can express is written back as a valid time token.
fn format_time(total: u64) -> String {
    let hours = (total / 3600).min(MAX_FIELD);
    let rest = total - hours * 3600;
    let minutes = (rest / 60).min(MAX_FIELD);
    let seconds = rest - minutes * 60;
    if hours > 0 { format!("{hours}:{minutes:02}:{seconds:02}") } else { format!("{minutes}:{seconds:02}") }
}

/// `NX` only takes nine digits; `strikes:N` takes any count.
fn format_strike_limit(count: u32) -> String {
    if u64::from(count) <= MAX_FIELD { format!("{count}X") } else { format!("strikes:{count}") }
}

fn format_pool(pool: &Pool) -> String {
    let mut out = format!("{}*", pool.count);

    if let Some(kind) = pool.special_kind {
        if let Some(pseudo) = PseudoIdentifier::from_parts(kind, pool.allowed_sources) {
            out.push_str(pseudo.id());
            return out;
        }
    }

    for (i, id) in pool.explicit_identifiers.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if id.contains(char::is_whitespace) {
            let _ = write!(out, "\"{id}\"");
        } else {
            out.push_str(id);
        }
    }
    out
}
