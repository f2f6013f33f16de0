//! Candidate generation for the token under the cursor.

use super::{Candidate, Highlight, HighlightTarget, clamp_cursor, in_progress, prefix_match_len};
use crate::api::{Context, Options};
use crate::{FACTORY_MODES, PoolToken, SettingName, SettingToken, TimeToken, Token, TokenKind};

const TIME_LABEL: &str = "Time: ";
const STRIKE_LIMIT_LABEL: &str = "Strike limit: ";
const FACTORY_PREFIX: &str = "factory:";

pub(crate) fn suggest(text: &str, cursor: usize, ctx: &Context<'_>, options: &Options) -> Vec<Candidate> {
    let cursor = clamp_cursor(text, cursor);
    let Some(token) = in_progress(text, cursor) else {
        return Vec::new();
    };

    let candidates = match &token.kind {
        TokenKind::Time(time) => vec![time_summary(time)],
        TokenKind::StrikeLimit(_) => vec![strike_limit_summary(text, &token)],
        TokenKind::Setting(setting) => setting_candidates(setting, options),
        TokenKind::Pool(pool) => pool_candidates(pool, ctx, options),
    };
    log::debug!("[suggest] cursor {} -> {} candidate(s)", cursor, candidates.len());
    candidates
}

fn time_summary(time: &TimeToken) -> Candidate {
    let hours = time.hours.map(|h| format!("{h}h ")).unwrap_or_default();
    Candidate::info(format!("{TIME_LABEL}{hours}{}m {}s", time.minutes, time.seconds), TIME_LABEL.len())
}

fn strike_limit_summary(text: &str, token: &Token) -> Candidate {
    let typed = &text[token.span.start..token.span.end()];
    Candidate::info(format!("{STRIKE_LIMIT_LABEL}{typed}"), STRIKE_LIMIT_LABEL.len())
}

fn setting_candidates(setting: &SettingToken, options: &Options) -> Vec<Candidate> {
    let value = setting.value.as_deref().unwrap_or("");

    if setting.name != SettingName::Factory {
        let label = format!("{}: {}", setting.raw_name, value);
        return vec![Candidate::info(label, setting.raw_name.len() + 2)];
    }

    if !options.factory_enabled {
        let id = format!("{}:{}", setting.raw_name, value);
        let len = id.len();
        return vec![Candidate {
            replacement_id: id,
            label: "[Factory is not enabled]".to_string(),
            highlight: Highlight { target: HighlightTarget::Id, start: 0, len },
            selectable: false,
        }];
    }

    FACTORY_MODES
        .iter()
        .filter_map(|mode| {
            let matched = prefix_match_len(mode.id, value)?;
            Some(Candidate::pick(
                format!("{FACTORY_PREFIX}{}", mode.id),
                mode.display_name.to_string(),
                Highlight { target: HighlightTarget::Id, start: 0, len: FACTORY_PREFIX.len() + matched },
            ))
        })
        .collect()
}

fn pool_candidates(pool: &PoolToken, ctx: &Context<'_>, options: &Options) -> Vec<Candidate> {
    let stub = pool.stub();
    let mut out = Vec::new();

    if pool.count.is_none() && !pool.id_list.is_empty() && pool.id_list.bytes().all(|b| b.is_ascii_digit()) {
        let highlight = Highlight { target: HighlightTarget::Id, start: 0, len: stub.len() };
        out.push(Candidate::pick(format!("{stub}:00"), "[Set time]".to_string(), highlight));
        out.push(Candidate::pick(format!("{stub}X"), "[Set strike limit]".to_string(), highlight));
        out.push(Candidate::pick(format!("{stub}*"), "[Set module pool count]".to_string(), highlight));
    }

    for entry in ctx.catalog.completion_entries(ctx.profiles, options.factory_enabled) {
        let highlight = if let Some(len) = prefix_match_len(&entry.id, &stub) {
            Highlight { target: HighlightTarget::Id, start: 0, len }
        } else if let Some(len) = prefix_match_len(&entry.display_name, &stub) {
            Highlight { target: HighlightTarget::Label, start: 0, len }
        } else {
            continue;
        };
        out.push(Candidate::pick(entry.id, entry.display_name, highlight));
    }

    out
}
