//! Three-tier default resolution for lighting/vision profiles.
//!
//! Priority per field, highest first: (1) the explicit value in the
//! request, (2) the preset's default if one was supplied, (3) the token's
//! current value. Pure function of its inputs.

use crate::presets::PresetElement;
use crate::profile::{
    AdvancedLighting, LightAnimation, LightingProfile, RequestedProfile, TokenGeometry,
};

/// Which tier supplied a resolved field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Requested,
    Preset,
    Current,
}

/// Every independently resolvable field, in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    DimSight,
    BrightSight,
    SightAngle,
    DimLight,
    BrightLight,
    LightAngle,
    LightColor,
    LightAlpha,
    AnimationType,
    AnimationSpeed,
    AnimationIntensity,
    AnimationReverse,
    Coloration,
    Luminosity,
    Saturation,
    Contrast,
    Shadows,
    Gradual,
    Height,
    Width,
    Scale,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::DimSight => "dimSight",
            Field::BrightSight => "brightSight",
            Field::SightAngle => "sightAngle",
            Field::DimLight => "dimLight",
            Field::BrightLight => "brightLight",
            Field::LightAngle => "lightAngle",
            Field::LightColor => "lightColor",
            Field::LightAlpha => "lightAlpha",
            Field::AnimationType => "animationType",
            Field::AnimationSpeed => "animationSpeed",
            Field::AnimationIntensity => "animationIntensity",
            Field::AnimationReverse => "animationReverse",
            Field::Coloration => "coloration",
            Field::Luminosity => "luminosity",
            Field::Saturation => "saturation",
            Field::Contrast => "contrast",
            Field::Shadows => "shadows",
            Field::Gradual => "gradual",
            Field::Height => "height",
            Field::Width => "width",
            Field::Scale => "scale",
        }
    }
}

/// One generic chooser carries the whole priority rule, so the cascade is
/// testable in isolation instead of being spread over inline fallbacks.
fn three_tier<T: Clone>(requested: Option<&T>, preset: Option<&T>, current: &T) -> (T, Tier) {
    if let Some(v) = requested {
        return (v.clone(), Tier::Requested);
    }
    if let Some(v) = preset {
        return (v.clone(), Tier::Preset);
    }
    (current.clone(), Tier::Current)
}

fn pick<T: Clone>(
    field: Field,
    requested: &Option<T>,
    preset: Option<&Option<T>>,
    current: &T,
    trace: &mut Vec<(Field, Tier)>,
) -> T {
    let preset_value = preset.and_then(|opt| opt.as_ref());
    let (value, tier) = three_tier(requested.as_ref(), preset_value, current);
    trace.push((field, tier));
    value
}

/// Resolve and report which tier won each field.
pub fn resolve_traced(
    requested: &RequestedProfile,
    current: &LightingProfile,
    preset: Option<&PresetElement>,
) -> (LightingProfile, Vec<(Field, Tier)>) {
    let pv = preset.map(|p| &p.values);
    let mut trace = Vec::new();

    let dim_sight = pick(
        Field::DimSight,
        &requested.dim_sight,
        pv.map(|p| &p.dim_sight),
        &current.dim_sight,
        &mut trace,
    );
    let bright_sight = pick(
        Field::BrightSight,
        &requested.bright_sight,
        pv.map(|p| &p.bright_sight),
        &current.bright_sight,
        &mut trace,
    );
    let sight_angle = pick(
        Field::SightAngle,
        &requested.sight_angle,
        pv.map(|p| &p.sight_angle),
        &current.sight_angle,
        &mut trace,
    );
    let dim_light = pick(
        Field::DimLight,
        &requested.dim_light,
        pv.map(|p| &p.dim_light),
        &current.dim_light,
        &mut trace,
    );
    let bright_light = pick(
        Field::BrightLight,
        &requested.bright_light,
        pv.map(|p| &p.bright_light),
        &current.bright_light,
        &mut trace,
    );
    let light_angle = pick(
        Field::LightAngle,
        &requested.light_angle,
        pv.map(|p| &p.light_angle),
        &current.light_angle,
        &mut trace,
    );
    let light_color = pick(
        Field::LightColor,
        &requested.light_color,
        pv.map(|p| &p.light_color),
        &current.light_color,
        &mut trace,
    );
    let light_alpha = pick(
        Field::LightAlpha,
        &requested.light_alpha,
        pv.map(|p| &p.light_alpha),
        &current.light_alpha,
        &mut trace,
    );

    let animation = LightAnimation {
        kind: pick(
            Field::AnimationType,
            &requested.animation_type,
            pv.map(|p| &p.animation_type),
            &current.animation.kind,
            &mut trace,
        ),
        speed: pick(
            Field::AnimationSpeed,
            &requested.animation_speed,
            pv.map(|p| &p.animation_speed),
            &current.animation.speed,
            &mut trace,
        ),
        intensity: pick(
            Field::AnimationIntensity,
            &requested.animation_intensity,
            pv.map(|p| &p.animation_intensity),
            &current.animation.intensity,
            &mut trace,
        ),
        reverse: pick(
            Field::AnimationReverse,
            &requested.animation_reverse,
            pv.map(|p| &p.animation_reverse),
            &current.animation.reverse,
            &mut trace,
        ),
    };

    // Optional blocks stay absent only when no tier supplies any subfield.
    let wants_advanced = current.advanced.is_some()
        || requested.has_advanced()
        || pv.is_some_and(|p| p.has_advanced());
    let advanced = if wants_advanced {
        let base = current.advanced.unwrap_or_default();
        Some(AdvancedLighting {
            coloration: pick(
                Field::Coloration,
                &requested.coloration,
                pv.map(|p| &p.coloration),
                &base.coloration,
                &mut trace,
            ),
            luminosity: pick(
                Field::Luminosity,
                &requested.luminosity,
                pv.map(|p| &p.luminosity),
                &base.luminosity,
                &mut trace,
            ),
            saturation: pick(
                Field::Saturation,
                &requested.saturation,
                pv.map(|p| &p.saturation),
                &base.saturation,
                &mut trace,
            ),
            contrast: pick(
                Field::Contrast,
                &requested.contrast,
                pv.map(|p| &p.contrast),
                &base.contrast,
                &mut trace,
            ),
            shadows: pick(
                Field::Shadows,
                &requested.shadows,
                pv.map(|p| &p.shadows),
                &base.shadows,
                &mut trace,
            ),
            gradual: pick(
                Field::Gradual,
                &requested.gradual,
                pv.map(|p| &p.gradual),
                &base.gradual,
                &mut trace,
            ),
        })
    } else {
        None
    };

    let wants_geometry = current.geometry.is_some()
        || requested.has_geometry()
        || pv.is_some_and(|p| p.has_geometry());
    let geometry = if wants_geometry {
        let base = current.geometry.unwrap_or_default();
        Some(TokenGeometry {
            height: pick(
                Field::Height,
                &requested.height,
                pv.map(|p| &p.height),
                &base.height,
                &mut trace,
            ),
            width: pick(
                Field::Width,
                &requested.width,
                pv.map(|p| &p.width),
                &base.width,
                &mut trace,
            ),
            scale: pick(
                Field::Scale,
                &requested.scale,
                pv.map(|p| &p.scale),
                &base.scale,
                &mut trace,
            ),
        })
    } else {
        None
    };

    let mut profile = LightingProfile {
        dim_sight,
        bright_sight,
        sight_angle,
        dim_light,
        bright_light,
        light_angle,
        light_color,
        light_alpha,
        animation,
        advanced,
        vision: false,
        geometry,
    };
    // Never read from input: derived after every resolution.
    profile.derive_vision();
    (profile, trace)
}

/// Resolve a (possibly partial) request against the token's current state
/// and optional preset defaults into a fully populated profile.
pub fn resolve(
    requested: &RequestedProfile,
    current: &LightingProfile,
    preset: Option<&PresetElement>,
) -> LightingProfile {
    resolve_traced(requested, current, preset).0
}
