//! Per-token light-source toggle bookkeeping.
//!
//! State machine per (token, catalog) pair: `NoneActive` and
//! `OneOrMoreActive`, tracked through enable flags in the host's key-value
//! flag storage. The token's pre-light baseline is captured exactly once,
//! when the first source lights up, and restored once the last source goes
//! dark. Purely flag-driven; no timers, no wall clock.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::apply::{ApplyOptions, EffectSink, TokenRef, TokenStore, apply};
use crate::config::Settings;
use crate::error::HudError;
use crate::presets::Catalog;
use crate::profile::{LightingProfile, RequestedProfile};
use crate::resolve::resolve;

/// Key of the per-token baseline snapshot flag.
pub const FLAG_INITIAL_DATA: &str = "initialData";
/// Per-source enable flags are `hudEnabled_<source id>`.
pub const FLAG_ENABLED_PREFIX: &str = "hudEnabled_";

/// Document the flags may be attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlagOwner {
    Actor(String),
    Item(String),
}

/// The host's namespaced key-value flag storage. The core reads and writes
/// through this seam only; it never owns the storage.
pub trait FlagStore {
    fn get_flag(&self, owner: &FlagOwner, key: &str) -> Option<Value>;
    fn set_flag(&mut self, owner: &FlagOwner, key: &str, value: Value) -> Result<(), HudError>;
    fn unset_flag(&mut self, owner: &FlagOwner, key: &str) -> Result<(), HudError>;
}

pub fn enabled_key(source_id: &str) -> String {
    format!("{FLAG_ENABLED_PREFIX}{source_id}")
}

pub fn is_enabled(flags: &impl FlagStore, owner: &FlagOwner, source_id: &str) -> bool {
    flags
        .get_flag(owner, &enabled_key(source_id))
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// Scan every flagged source of the catalog on this owner.
pub fn any_enabled(flags: &impl FlagStore, owner: &FlagOwner, catalog: &Catalog) -> bool {
    catalog.iter().any(|e| is_enabled(flags, owner, &e.id))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Source turned on; its resolved profile was applied to the token.
    Enabled,
    /// Source turned off. `restored` reports whether the saved baseline
    /// was applied back (only when no sibling source remained active).
    Disabled { restored: bool },
    /// Token or actor lookup failed; reported through the warn sink,
    /// nothing was mutated.
    Aborted,
}

/// Flip one light source on or off for a token.
///
/// Enabling resolves the source's preset against the token's current state
/// (so layered sources stack and the last writer wins shared fields) and
/// applies it untracked. Disabling a non-last source is bookkeeping only.
/// Disabling the last source restores the captured baseline, if any.
#[allow(clippy::too_many_arguments)]
pub fn toggle_source(
    tokens: &mut impl TokenStore,
    effects: &mut impl EffectSink,
    flags: &mut impl FlagStore,
    catalog: &Catalog,
    settings: &Settings,
    token: &TokenRef,
    owner: &FlagOwner,
    source_id: &str,
    mut warn: impl FnMut(&str, bool),
) -> Result<ToggleOutcome, HudError> {
    let element = catalog.get(source_id)?;

    let current = match tokens.current_profile(token) {
        Ok(profile) => profile,
        Err(HudError::MissingTokenOrActor(id)) => {
            warn(&format!("no token or actor found for id '{id}'"), true);
            return Ok(ToggleOutcome::Aborted);
        }
        Err(other) => return Err(other),
    };

    if is_enabled(flags, owner, source_id) {
        flags.unset_flag(owner, &enabled_key(source_id))?;

        if any_enabled(flags, owner, catalog) {
            // Siblings still lit: the token keeps its emitted state.
            debug!(source = source_id, "source off, others remain active");
            return Ok(ToggleOutcome::Disabled { restored: false });
        }

        if let Some(snapshot) = flags.get_flag(owner, FLAG_INITIAL_DATA) {
            if settings.apply_on_flag_item {
                let baseline: LightingProfile = serde_json::from_value(snapshot)
                    .map_err(|e| HudError::Flag(format!("undecodable initial snapshot: {e}")))?;
                apply(tokens, effects, token, &baseline, &ApplyOptions::untracked())?;
                flags.unset_flag(owner, FLAG_INITIAL_DATA)?;
                debug!(source = source_id, "last source off, baseline restored");
                return Ok(ToggleOutcome::Disabled { restored: true });
            }
            // Setting switched off since capture: the snapshot would only
            // grow staler, so it goes even though nothing is restored.
            flags.unset_flag(owner, FLAG_INITIAL_DATA)?;
            debug!(source = source_id, "last source off, stale snapshot dropped");
        }
        Ok(ToggleOutcome::Disabled { restored: false })
    } else {
        // The one point a snapshot is ever created: first source lighting
        // up with none stored yet, before the enable takes effect.
        if settings.apply_on_flag_item
            && !any_enabled(flags, owner, catalog)
            && flags.get_flag(owner, FLAG_INITIAL_DATA).is_none()
        {
            let snapshot = serde_json::to_value(&current)
                .map_err(|e| HudError::Flag(format!("unencodable snapshot: {e}")))?;
            flags.set_flag(owner, FLAG_INITIAL_DATA, snapshot)?;
            debug!(source = source_id, "captured pre-light baseline");
        }

        flags.set_flag(owner, &enabled_key(source_id), Value::Bool(true))?;

        let resolved = resolve(&RequestedProfile::default(), &current, Some(element));
        apply(tokens, effects, token, &resolved, &ApplyOptions::untracked())?;
        Ok(ToggleOutcome::Enabled)
    }
}
