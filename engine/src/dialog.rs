//! Typed models of the HUD dialog submissions.
//!
//! The host forms hand over raw strings; this module converts them into a
//! [`RequestedProfile`] up front so resolution never touches form text. A
//! field that does not parse is simply unset, while a typed `0` stays an
//! explicit zero.

use serde::{Deserialize, Serialize};

use crate::apply::{ApplyOptions, EffectSink, TokenRef, TokenStore, apply};
use crate::config::Settings;
use crate::error::HudError;
use crate::presets::{Catalog, PRESET_NONE};
use crate::profile::{RequestedProfile, parse_form_number};
use crate::resolve::resolve;
use crate::roll::{Dice, roll_item_activation};
use crate::toggle::{FlagOwner, FlagStore, ToggleOutcome, is_enabled, toggle_source};

/// Effect icon used when a dialog does not choose one.
pub const DEFAULT_EFFECT_ICON: &str = "icons/svg/light.svg";

fn parse_form_u8(raw: &str) -> Option<u8> {
    parse_form_number(raw).and_then(|n| {
        if (0.0..=255.0).contains(&n) {
            Some(n as u8)
        } else {
            None
        }
    })
}

fn parse_form_i32(raw: &str) -> Option<i32> {
    parse_form_number(raw).map(|n| n as i32)
}

fn nonempty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Raw submission of the free-form lighting dialog. Text inputs stay
/// strings until [`CustomDialogForm::requested`] types them; checkboxes
/// arrive as booleans and are always explicit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomDialogForm {
    pub effect_name: String,
    pub apply_as_effect: bool,
    pub duration_minutes: String,
    pub height: String,
    pub width: String,
    pub scale: String,
    pub dim_sight: String,
    pub bright_sight: String,
    pub sight_angle: String,
    pub dim_light: String,
    pub bright_light: String,
    pub light_angle: String,
    pub light_color: String,
    pub light_alpha: String,
    pub animation_type: String,
    pub animation_speed: String,
    pub animation_intensity: String,
    pub animation_reverse: bool,
    pub coloration: String,
    pub luminosity: String,
    pub saturation: String,
    pub contrast: String,
    pub shadows: String,
    pub gradual: bool,
}

impl CustomDialogForm {
    /// Type the text fields. Unparsable input falls through to the lower
    /// tiers; checkboxes are always carried.
    pub fn requested(&self) -> RequestedProfile {
        RequestedProfile {
            dim_sight: parse_form_number(&self.dim_sight),
            bright_sight: parse_form_number(&self.bright_sight),
            sight_angle: parse_form_number(&self.sight_angle),
            dim_light: parse_form_number(&self.dim_light),
            bright_light: parse_form_number(&self.bright_light),
            light_angle: parse_form_number(&self.light_angle),
            light_color: nonempty(&self.light_color),
            light_alpha: parse_form_number(&self.light_alpha),
            animation_type: nonempty(&self.animation_type),
            animation_speed: parse_form_u8(&self.animation_speed),
            animation_intensity: parse_form_u8(&self.animation_intensity),
            animation_reverse: Some(self.animation_reverse),
            coloration: parse_form_i32(&self.coloration),
            luminosity: parse_form_number(&self.luminosity),
            saturation: parse_form_number(&self.saturation),
            contrast: parse_form_number(&self.contrast),
            shadows: parse_form_number(&self.shadows),
            gradual: Some(self.gradual),
            height: parse_form_number(&self.height),
            width: parse_form_number(&self.width),
            scale: parse_form_number(&self.scale),
        }
    }

    pub fn duration(&self) -> u32 {
        parse_form_number(&self.duration_minutes)
            .filter(|n| *n >= 0.0)
            .map(|n| n as u32)
            .unwrap_or(0)
    }

    fn effect_name_or_default(&self) -> String {
        nonempty(&self.effect_name).unwrap_or_else(|| "Custom Light".to_string())
    }
}

/// Submission of the two-dropdown preset dialog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresetDialogForm {
    pub vision_id: String,
    pub light_id: String,
    pub apply_as_effect: bool,
    pub duration_minutes: String,
}

impl PresetDialogForm {
    pub fn duration(&self) -> u32 {
        parse_form_number(&self.duration_minutes)
            .filter(|n| *n >= 0.0)
            .map(|n| n as u32)
            .unwrap_or(0)
    }
}

/// Apply a free-form dialog submission to every controlled token.
///
/// A token that has gone missing since the dialog opened is warned about
/// and skipped; the rest of the batch still goes through.
pub fn submit_custom_dialog(
    tokens: &mut impl TokenStore,
    effects: &mut impl EffectSink,
    form: &CustomDialogForm,
    controlled: &[TokenRef],
    mut warn: impl FnMut(&str, bool),
) -> Result<(), HudError> {
    let requested = form.requested();
    let options = if form.apply_as_effect {
        ApplyOptions::tracked(&form.effect_name_or_default(), DEFAULT_EFFECT_ICON, form.duration())
    } else {
        ApplyOptions::untracked()
    };

    for token in controlled {
        let current = match tokens.current_profile(token) {
            Ok(profile) => profile,
            Err(HudError::MissingTokenOrActor(id)) => {
                warn(&format!("no token or actor found for id '{id}'"), true);
                continue;
            }
            Err(other) => return Err(other),
        };
        let resolved = resolve(&requested, &current, None);
        apply(tokens, effects, token, &resolved, &options)?;
    }
    Ok(())
}

/// Apply a preset-dialog submission: the vision choice resolves first, the
/// light choice then resolves against that intermediate state, so the light
/// wins any field both presets set.
pub fn submit_preset_dialog(
    tokens: &mut impl TokenStore,
    effects: &mut impl EffectSink,
    visions: &Catalog,
    lights: &Catalog,
    form: &PresetDialogForm,
    controlled: &[TokenRef],
    mut warn: impl FnMut(&str, bool),
) -> Result<(), HudError> {
    let vision_id = nonempty(&form.vision_id).unwrap_or_else(|| PRESET_NONE.to_string());
    let light_id = nonempty(&form.light_id).unwrap_or_else(|| PRESET_NONE.to_string());
    let vision = visions.get(&vision_id)?;
    let light = lights.get(&light_id)?;

    let duration = if form.duration() > 0 {
        form.duration()
    } else {
        light.duration_minutes.unwrap_or(0)
    };
    let options = if form.apply_as_effect {
        let icon = if light.icon.is_empty() {
            DEFAULT_EFFECT_ICON
        } else {
            &light.icon
        };
        ApplyOptions::tracked(&light.name, icon, duration)
    } else {
        ApplyOptions::untracked()
    };

    let empty = RequestedProfile::default();
    for token in controlled {
        let current = match tokens.current_profile(token) {
            Ok(profile) => profile,
            Err(HudError::MissingTokenOrActor(id)) => {
                warn(&format!("no token or actor found for id '{id}'"), true);
                continue;
            }
            Err(other) => return Err(other),
        };
        let with_vision = resolve(&empty, &current, Some(vision));
        let resolved = resolve(&empty, &with_vision, Some(light));
        apply(tokens, effects, token, &resolved, &options)?;
    }
    Ok(())
}

/// Toggle a source from the HUD, rolling the item to chat first when the
/// world settings ask for it. The roll is flavour only; it never gates the
/// toggle.
#[allow(clippy::too_many_arguments)]
pub fn confirm_source_toggle(
    tokens: &mut impl TokenStore,
    effects: &mut impl EffectSink,
    flags: &mut impl FlagStore,
    catalog: &Catalog,
    settings: &Settings,
    token: &TokenRef,
    owner: &FlagOwner,
    source_id: &str,
    dice: Option<&mut Dice>,
    mut chat: impl FnMut(&str),
    warn: impl FnMut(&str, bool),
) -> Result<ToggleOutcome, HudError> {
    if settings.roll_item && !is_enabled(flags, owner, source_id) {
        if let Some(dice) = dice {
            let element = catalog.get(source_id)?;
            let rolled = roll_item_activation(dice, &element.name);
            chat(&rolled.message);
        }
    }
    toggle_source(
        tokens, effects, flags, catalog, settings, token, owner, source_id, warn,
    )
}
