//! The bare HUD torch button: a one-click light toggle driven by the world
//! settings instead of a preset catalog. Availability is checked against
//! the actor's inventory and spell list, lighting raises the emission radii
//! to the configured minimums, and extinguishing restores what the token
//! had before.

use serde_json::{Value, json};
use tracing::debug;

use crate::apply::{TokenRef, TokenStore};
use crate::config::Settings;
use crate::error::HudError;
use crate::toggle::{FlagOwner, FlagStore};
use crate::uses::{ActorResources, Item, ItemKind};

/// Flag holding the pre-torch `[bright, dim]` radii; its presence marks
/// the torch as lit.
pub const FLAG_TORCH_PREVIOUS: &str = "torchPrevious";
/// Flag holding the `[bright, dim]` radii the torch actually applied.
/// When the token no longer carries these, the light was reconfigured
/// externally and the stored record is stale.
pub const FLAG_TORCH_APPLIED: &str = "torchApplied";

const LIGHT_SPELL: &str = "Light";
const DANCING_LIGHTS_SPELL: &str = "Dancing Lights";

/// What entitles this user to the torch button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TorchAvailability {
    /// GM privilege, no matching resource needed.
    Gm,
    /// Availability checking is disabled in the settings.
    Unchecked,
    /// The actor knows the Light cantrip.
    LightSpell,
    /// The actor knows Dancing Lights; the caller should spawn markers
    /// instead of raising radii.
    DancingLights,
    /// A matching inventory item with remaining quantity, by item id.
    Inventory(String),
}

fn is_spell_named(item: &Item, name: &str) -> bool {
    item.kind == ItemKind::Spell && item.name == name
}

/// Decide whether a torch can be lit, in the order the button resolves it:
/// spells beat inventory, inventory beats the GM fallback.
pub fn torch_availability(
    settings: &Settings,
    actor: Option<&ActorResources>,
    is_gm: bool,
) -> Option<TorchAvailability> {
    let Some(actor) = actor else {
        return is_gm.then_some(TorchAvailability::Gm);
    };
    if let Some(spell) = actor
        .items
        .values()
        .find(|i| is_spell_named(i, LIGHT_SPELL) || is_spell_named(i, DANCING_LIGHTS_SPELL))
    {
        return Some(if spell.name == LIGHT_SPELL {
            TorchAvailability::LightSpell
        } else {
            TorchAvailability::DancingLights
        });
    }
    if !settings.check_availability {
        return Some(TorchAvailability::Unchecked);
    }
    let wanted = settings.gm_inventory_item_name.to_lowercase();
    if let Some(item) = actor
        .items
        .values()
        .find(|i| i.kind != ItemKind::Spell && i.name.to_lowercase() == wanted && i.quantity > 0)
    {
        return Some(TorchAvailability::Inventory(item.id.clone()));
    }
    is_gm.then_some(TorchAvailability::Gm)
}

/// Deduct one torch from inventory. Spell users and GMs (unless the
/// settings make the GM spend too) keep their stock. Returns whether a
/// unit was spent.
pub fn spend_torch(settings: &Settings, actor: &mut ActorResources, is_gm: bool) -> bool {
    if is_gm && !settings.gm_uses_inventory {
        return false;
    }
    if actor
        .items
        .values()
        .any(|i| is_spell_named(i, LIGHT_SPELL) || is_spell_named(i, DANCING_LIGHTS_SPELL))
    {
        return false;
    }
    let wanted = settings.gm_inventory_item_name.to_lowercase();
    if let Some(item) = actor
        .items
        .values_mut()
        .find(|i| i.kind != ItemKind::Spell && i.name.to_lowercase() == wanted && i.quantity > 0)
    {
        item.quantity -= 1;
        return true;
    }
    false
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TorchOutcome {
    /// Radii raised to the configured minimums.
    Lit { spent: bool },
    /// The actor's light is the Dancing Lights spell; the caller spawns
    /// the markers and later relays their removal.
    DancingLightsRequested,
    /// Previous radii (or the configured off radii) applied back.
    Extinguished,
    /// Permission or availability failed; nothing was mutated.
    Denied,
}

fn radii_flag(bright: f64, dim: f64) -> Value {
    json!([bright, dim])
}

fn parse_radii(value: &Value) -> Option<(f64, f64)> {
    let bright = value.get(0)?.as_f64()?;
    let dim = value.get(1)?.as_f64()?;
    Some((bright, dim))
}

fn radii_match(current: (f64, f64), recorded: (f64, f64)) -> bool {
    (current.0 - recorded.0).abs() < f64::EPSILON && (current.1 - recorded.1).abs() < f64::EPSILON
}

/// One press of the torch button.
///
/// Lighting stores the token's radii in [`FLAG_TORCH_PREVIOUS`], the radii
/// it applies in [`FLAG_TORCH_APPLIED`], and raises the emission to the
/// settings' minimums, never lowering an already stronger light.
/// Extinguishing restores the stored radii, falling back to the off radii
/// when the flag payload is unusable. A token whose light was reconfigured
/// externally while flagged is not restored: the stale record is dropped
/// and the press lights the torch over the new state instead.
#[allow(clippy::too_many_arguments)]
pub fn toggle_torch(
    tokens: &mut impl TokenStore,
    flags: &mut impl FlagStore,
    settings: &Settings,
    token: &TokenRef,
    owner: &FlagOwner,
    actor: Option<&mut ActorResources>,
    is_gm: bool,
    mut warn: impl FnMut(&str, bool),
) -> Result<TorchOutcome, HudError> {
    if !is_gm && !settings.player_torches {
        warn("players may not use torches in this world", true);
        return Ok(TorchOutcome::Denied);
    }

    let mut current = match tokens.current_profile(token) {
        Ok(profile) => profile,
        Err(HudError::MissingTokenOrActor(id)) => {
            warn(&format!("no token or actor found for id '{id}'"), true);
            return Ok(TorchOutcome::Denied);
        }
        Err(other) => return Err(other),
    };

    if let Some(previous) = flags.get_flag(owner, FLAG_TORCH_PREVIOUS) {
        let applied = flags
            .get_flag(owner, FLAG_TORCH_APPLIED)
            .as_ref()
            .and_then(parse_radii);
        let still_ours = applied
            .is_some_and(|a| radii_match((current.bright_light, current.dim_light), a));
        if still_ours {
            let (bright, dim) = parse_radii(&previous)
                .unwrap_or((settings.off_bright_radius, settings.off_dim_radius));
            current.bright_light = bright;
            current.dim_light = dim;
            tokens.update_profile(token, &current)?;
            flags.unset_flag(owner, FLAG_TORCH_PREVIOUS)?;
            flags.unset_flag(owner, FLAG_TORCH_APPLIED)?;
            debug!(token = %token.token_id, "torch extinguished");
            return Ok(TorchOutcome::Extinguished);
        }
        // The light was changed behind the torch's back; the record no
        // longer describes the token. Drop it and light fresh.
        flags.unset_flag(owner, FLAG_TORCH_PREVIOUS)?;
        flags.unset_flag(owner, FLAG_TORCH_APPLIED)?;
        debug!(token = %token.token_id, "stale torch record dropped");
    }

    let availability = match torch_availability(settings, actor.as_deref(), is_gm) {
        Some(availability) => availability,
        None => {
            warn("no torch, Light spell or Dancing Lights available", true);
            return Ok(TorchOutcome::Denied);
        }
    };
    if availability == TorchAvailability::DancingLights {
        return Ok(TorchOutcome::DancingLightsRequested);
    }

    flags.set_flag(
        owner,
        FLAG_TORCH_PREVIOUS,
        radii_flag(current.bright_light, current.dim_light),
    )?;
    current.bright_light = current.bright_light.max(settings.bright_radius);
    current.dim_light = current.dim_light.max(settings.dim_radius);
    flags.set_flag(
        owner,
        FLAG_TORCH_APPLIED,
        radii_flag(current.bright_light, current.dim_light),
    )?;
    tokens.update_profile(token, &current)?;

    let spent = match actor {
        Some(actor) => spend_torch(settings, actor, is_gm),
        None => false,
    };
    debug!(token = %token.token_id, spent, "torch lit");
    Ok(TorchOutcome::Lit { spent })
}

/// Force the torch off regardless of flag state: the configured off radii
/// are applied and both torch flags are cleared. For the "something is
/// stuck" escape hatch; the caller also relays a dancing-lights removal
/// for the token's actor, since a forced press cannot know which kind of
/// light is burning.
pub fn force_torch_off(
    tokens: &mut impl TokenStore,
    flags: &mut impl FlagStore,
    settings: &Settings,
    token: &TokenRef,
    owner: &FlagOwner,
    mut warn: impl FnMut(&str, bool),
) -> Result<TorchOutcome, HudError> {
    let mut current = match tokens.current_profile(token) {
        Ok(profile) => profile,
        Err(HudError::MissingTokenOrActor(id)) => {
            warn(&format!("no token or actor found for id '{id}'"), true);
            return Ok(TorchOutcome::Denied);
        }
        Err(other) => return Err(other),
    };
    current.bright_light = settings.off_bright_radius;
    current.dim_light = settings.off_dim_radius;
    tokens.update_profile(token, &current)?;
    flags.unset_flag(owner, FLAG_TORCH_PREVIOUS)?;
    flags.unset_flag(owner, FLAG_TORCH_APPLIED)?;
    debug!(token = %token.token_id, "torch forced off");
    Ok(TorchOutcome::Extinguished)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uses::WeaponProperties;

    fn torch_item(quantity: i64) -> Item {
        Item {
            id: "torch-item".to_string(),
            name: "Torch".to_string(),
            kind: ItemKind::Consumable,
            quantity,
            uses: None,
            consume: None,
            level: 0,
            preparation_mode: None,
            recharge: None,
            properties: WeaponProperties::default(),
        }
    }

    fn spell(name: &str) -> Item {
        Item {
            id: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            kind: ItemKind::Spell,
            quantity: 1,
            uses: None,
            consume: None,
            level: 0,
            preparation_mode: None,
            recharge: None,
            properties: WeaponProperties::default(),
        }
    }

    #[test]
    fn spells_beat_inventory() {
        let mut actor = ActorResources::default();
        actor.items.insert("t".into(), torch_item(3));
        actor.items.insert("l".into(), spell("Light"));
        let settings = Settings::default();
        assert_eq!(
            torch_availability(&settings, Some(&actor), false),
            Some(TorchAvailability::LightSpell)
        );
    }

    #[test]
    fn empty_handed_player_is_denied_but_gm_is_not() {
        let actor = ActorResources::default();
        let settings = Settings::default();
        assert_eq!(torch_availability(&settings, Some(&actor), false), None);
        assert_eq!(
            torch_availability(&settings, Some(&actor), true),
            Some(TorchAvailability::Gm)
        );
    }

    #[test]
    fn disabled_checking_lets_anyone_light_up() {
        let actor = ActorResources::default();
        let settings = Settings {
            check_availability: false,
            ..Settings::default()
        };
        assert_eq!(
            torch_availability(&settings, Some(&actor), false),
            Some(TorchAvailability::Unchecked)
        );
    }

    #[test]
    fn spending_consumes_one_torch_only_without_a_spell() {
        let settings = Settings::default();
        let mut actor = ActorResources::default();
        actor.items.insert("t".into(), torch_item(2));
        assert!(spend_torch(&settings, &mut actor, false));
        assert_eq!(actor.items["t"].quantity, 1);

        actor.items.insert("l".into(), spell("Light"));
        assert!(!spend_torch(&settings, &mut actor, false));
        assert_eq!(actor.items["t"].quantity, 1);
    }

    #[test]
    fn gm_spends_only_when_configured() {
        let mut actor = ActorResources::default();
        actor.items.insert("t".into(), torch_item(2));
        let settings = Settings::default();
        assert!(!spend_torch(&settings, &mut actor, true));

        let settings = Settings {
            gm_uses_inventory: true,
            ..Settings::default()
        };
        assert!(spend_torch(&settings, &mut actor, true));
        assert_eq!(actor.items["t"].quantity, 1);
    }
}
