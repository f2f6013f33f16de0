//! Token-by-token mission accumulation.

use super::{Diagnostic, Diagnostics, MissionDescription, Pool, SpecialKind};
use crate::api::{Context, Options};
use crate::{
    ComponentType, FactoryMode, ModuleKind, PoolToken, PseudoIdentifier, SettingName, SettingToken, TimeToken, Token,
    TokenKind,
};

const SECONDS_PER_MODULE: u64 = 120;
const MIN_DEFAULT_STRIKES: u32 = 3;
const MODULES_PER_EXTRA_STRIKE: u64 = 12;

/// Mutable accumulator for one parse.
///
/// Every `apply` records at most a handful of diagnostics and never stops
/// early; `finish` decides whether anything survives.
pub(crate) struct MissionBuilder<'a> {
    ctx: &'a Context<'a>,
    options: &'a Options,
    diagnostics: Vec<Diagnostic>,
    time_limit: Option<u64>,
    strike_limit: Option<u32>,
    pacing_enabled: bool,
    front_face_only: bool,
    widget_count: Option<u32>,
    needy_activation_delay: Option<u32>,
    factory_specified: bool,
    factory_mode: Option<FactoryMode>,
    pools: Vec<Pool>,
    any_solvable: bool,
}

impl<'a> MissionBuilder<'a> {
    pub(crate) fn new(ctx: &'a Context<'a>, options: &'a Options) -> Self {
        MissionBuilder {
            ctx,
            options,
            diagnostics: Vec::new(),
            time_limit: None,
            strike_limit: None,
            pacing_enabled: true,
            front_face_only: false,
            widget_count: None,
            needy_activation_delay: None,
            factory_specified: false,
            factory_mode: None,
            pools: Vec::new(),
            any_solvable: false,
        }
    }

    pub(crate) fn apply(&mut self, token: &Token) {
        match &token.kind {
            TokenKind::Time(time) => self.set_time(time),
            TokenKind::StrikeLimit(strikes) => self.set_strike_limit(Some(strikes.count)),
            TokenKind::Setting(setting) => self.apply_setting(setting),
            TokenKind::Pool(pool) => self.add_pool(pool),
        }
    }

    pub(crate) fn finish(mut self) -> Result<MissionDescription, Diagnostics> {
        if !self.any_solvable {
            self.diagnostics.push(Diagnostic::NoSolvableModules);
        }

        let count: u64 = self.pools.iter().map(|p| u64::from(p.count)).sum();
        if count > u64::from(self.options.max_modules) {
            self.diagnostics.push(Diagnostic::TooManyModules { count, max: self.options.max_modules });
        }

        if !self.diagnostics.is_empty() {
            log::debug!("[build] rejected with {} diagnostic(s)", self.diagnostics.len());
            return Err(Diagnostics::new(self.diagnostics));
        }

        let default_strikes = u32::try_from(count / MODULES_PER_EXTRA_STRIKE).unwrap_or(u32::MAX);
        let mission = MissionDescription {
            time_limit_seconds: self.time_limit.unwrap_or(count * SECONDS_PER_MODULE),
            strike_limit: self.strike_limit.unwrap_or(default_strikes.max(MIN_DEFAULT_STRIKES)),
            pacing_enabled: self.pacing_enabled,
            front_face_only: self.front_face_only,
            widget_count: self.widget_count,
            needy_activation_delay: self.needy_activation_delay,
            factory_mode: self.factory_mode,
            pools: self.pools,
        };
        log::debug!("[build] accepted: {} pool(s), {} module(s)", mission.pools.len(), count);
        Ok(mission)
    }

    /// Duplicate-setting messages are reported once per parse.
    fn report_once(&mut self, diagnostic: Diagnostic) {
        if !self.diagnostics.contains(&diagnostic) {
            self.diagnostics.push(diagnostic);
        }
    }

    fn set_time(&mut self, time: &TimeToken) {
        if self.time_limit.is_some() {
            self.report_once(Diagnostic::TimeSpecifiedMultipleTimes);
            return;
        }
        let total = time.total_seconds();
        self.time_limit = Some(total);
        if total == 0 {
            self.diagnostics.push(Diagnostic::InvalidTimeLimit);
        }
    }

    /// `None` means the value was present but not a number.
    fn set_strike_limit(&mut self, count: Option<u32>) {
        if self.strike_limit.is_some() {
            self.report_once(Diagnostic::StrikeLimitSpecifiedMultipleTimes);
            return;
        }
        let count = count.unwrap_or(0);
        self.strike_limit = Some(count);
        if count == 0 {
            self.diagnostics.push(Diagnostic::InvalidStrikeLimit);
        }
    }

    fn apply_setting(&mut self, setting: &SettingToken) {
        let value = setting.value();
        match setting.name {
            SettingName::Strikes => {
                if let Some(value) = value {
                    self.set_strike_limit(value.parse().ok());
                }
            }
            SettingName::NeedyActivationTime => {
                if let Some(value) = value {
                    match value.parse() {
                        Ok(seconds) => self.needy_activation_delay = Some(seconds),
                        Err(_) => self.diagnostics.push(Diagnostic::InvalidNeedyActivationTime),
                    }
                }
            }
            SettingName::Widgets => {
                if let Some(value) = value {
                    match value.parse() {
                        Ok(count) => self.widget_count = Some(count),
                        Err(_) => self.diagnostics.push(Diagnostic::InvalidWidgetCount),
                    }
                }
            }
            SettingName::NoPacing => self.pacing_enabled = false,
            SettingName::FrontOnly => self.front_face_only = true,
            SettingName::Factory => self.set_factory(value.unwrap_or("")),
        }
    }

    fn set_factory(&mut self, value: &str) {
        if self.factory_specified {
            self.report_once(Diagnostic::FactorySpecifiedMultipleTimes);
        } else if !self.options.factory_enabled {
            self.diagnostics.push(Diagnostic::FactoryNotEnabled);
        } else {
            self.factory_specified = true;
            match FactoryMode::lookup(value) {
                Some(mode) => self.factory_mode = Some(mode),
                None => self.diagnostics.push(Diagnostic::InvalidFactoryMode),
            }
        }
    }

    fn add_pool(&mut self, token: &PoolToken) {
        let count = token.count.unwrap_or(1);
        if count == 0 {
            self.diagnostics.push(Diagnostic::InvalidPoolCount);
        }

        let mut pool = Pool::new(count);
        let unquoted = token.id_list.replace('"', "");
        let list = unquoted.trim();

        let solvable = if let Some(pseudo) = PseudoIdentifier::from_id(list) {
            pool.allowed_sources = pseudo.sources();
            pool.special_kind = Some(pseudo.special_kind());
            pseudo.special_kind() == SpecialKind::AllSolvable
        } else if let Some((kind, name)) = profile_reference(list) {
            self.resolve_profile(&mut pool, kind, name)
        } else {
            self.resolve_identifiers(&mut pool, list)
        };

        log::trace!("[build] pool {:?} count={} solvable={}", list, count, solvable);
        self.any_solvable |= solvable;
        self.pools.push(pool);
    }

    /// Returns whether the pool contributes solvable modules.
    fn resolve_profile(&mut self, pool: &mut Pool, kind: ModuleKind, name: &str) -> bool {
        let Some(profile) = self.ctx.profiles.get(name) else {
            self.diagnostics.push(Diagnostic::UnknownProfile(name.to_string()));
            return false;
        };
        log::debug!("[build] profile '{}' disables {} module(s)", name, profile.disabled.len());

        let ids = self.ctx.catalog.resolve_profile(profile, kind);
        if ids.is_empty() {
            self.diagnostics.push(Diagnostic::EmptyProfile(name.to_string()));
            return false;
        }
        for id in ids {
            pool.add_identifier(id);
        }
        kind == ModuleKind::Solvable
    }

    /// Returns whether at least one identifier resolved and none is needy.
    fn resolve_identifiers(&mut self, pool: &mut Pool, list: &str) -> bool {
        let mut resolved = false;
        let mut needy = false;

        for id in list.split([',', '+']).map(str::trim) {
            let kind = match ComponentType::from_id(id) {
                Some(component) => component.kind(),
                None => match self.ctx.catalog.get(id) {
                    None => {
                        self.diagnostics.push(Diagnostic::UnknownModule(id.to_string()));
                        continue;
                    }
                    Some(module) if !module.enabled => {
                        self.diagnostics.push(Diagnostic::DisabledModule(id.to_string()));
                        continue;
                    }
                    Some(module) => module.kind,
                },
            };
            pool.add_identifier(id);
            resolved = true;
            needy |= kind == ModuleKind::Needy;
        }

        resolved && !needy
    }
}

/// `profile:<name>` / `needyprofile:<name>`, prefix matched case-insensitively.
fn profile_reference(list: &str) -> Option<(ModuleKind, &str)> {
    strip_prefix_ignore_case(list, "profile:")
        .map(|name| (ModuleKind::Solvable, name))
        .or_else(|| strip_prefix_ignore_case(list, "needyprofile:").map(|name| (ModuleKind::Needy, name)))
}

fn strip_prefix_ignore_case<'s>(s: &'s str, prefix: &str) -> Option<&'s str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_reference_prefixes() {
        assert_eq!(profile_reference("profile:Mine"), Some((ModuleKind::Solvable, "Mine")));
        assert_eq!(profile_reference("PROFILE:Mine"), Some((ModuleKind::Solvable, "Mine")));
        assert_eq!(profile_reference("NeedyProfile:x y"), Some((ModuleKind::Needy, "x y")));
        assert_eq!(profile_reference("profile"), None);
        assert_eq!(profile_reference("Wires"), None);
    }

    #[test]
    fn prefix_strip_respects_char_boundaries() {
        assert_eq!(strip_prefix_ignore_case("profil€x", "profile:"), None);
    }
}
