use engine::presets::{PresetElement, builtin_lights, builtin_visions};
use engine::resolve::{Field, Tier, resolve, resolve_traced};
use engine::{LightingProfile, RequestedProfile};

fn current_profile() -> LightingProfile {
    LightingProfile {
        dim_sight: 30.0,
        bright_sight: 0.0,
        dim_light: 5.0,
        bright_light: 2.0,
        light_color: "#123456".to_string(),
        ..LightingProfile::dark()
    }
}

fn preset(values: RequestedProfile) -> PresetElement {
    PresetElement {
        id: "test".to_string(),
        name: "Test".to_string(),
        icon: String::new(),
        duration_minutes: None,
        values,
    }
}

#[test]
fn empty_request_without_preset_keeps_current() {
    let mut current = current_profile();
    current.derive_vision();
    let resolved = resolve(&RequestedProfile::default(), &current, None);
    assert_eq!(resolved, current);
}

#[test]
fn requested_beats_preset_and_current() {
    let requested = RequestedProfile {
        dim_light: Some(30.0),
        ..Default::default()
    };
    let element = preset(RequestedProfile {
        dim_light: Some(60.0),
        ..Default::default()
    });
    let resolved = resolve(&requested, &current_profile(), Some(&element));
    assert_eq!(resolved.dim_light, 30.0);
}

#[test]
fn preset_beats_current() {
    let element = preset(RequestedProfile {
        dim_light: Some(60.0),
        light_color: Some("#a2642a".to_string()),
        ..Default::default()
    });
    let resolved = resolve(&RequestedProfile::default(), &current_profile(), Some(&element));
    assert_eq!(resolved.dim_light, 60.0);
    assert_eq!(resolved.light_color, "#a2642a");
    // Fields the preset leaves open fall back to the token.
    assert_eq!(resolved.bright_light, 2.0);
    assert_eq!(resolved.dim_sight, 30.0);
}

#[test]
fn user_sight_override_outranks_the_preset_default() {
    let requested = RequestedProfile {
        dim_sight: Some(30.0),
        ..Default::default()
    };
    let element = preset(RequestedProfile {
        dim_sight: Some(60.0),
        ..Default::default()
    });
    let resolved = resolve(&requested, &LightingProfile::dark(), Some(&element));
    assert_eq!(resolved.dim_sight, 30.0);
}

#[test]
fn explicit_zero_wins_over_preset() {
    let requested = RequestedProfile {
        dim_light: Some(0.0),
        ..Default::default()
    };
    let element = preset(RequestedProfile {
        dim_light: Some(60.0),
        ..Default::default()
    });
    let resolved = resolve(&requested, &current_profile(), Some(&element));
    assert_eq!(resolved.dim_light, 0.0);
}

#[test]
fn vision_is_always_rederived() {
    // Current claims no vision but a requested sight radius flips it.
    let requested = RequestedProfile {
        dim_sight: Some(60.0),
        ..Default::default()
    };
    let mut current = current_profile();
    current.dim_sight = 0.0;
    current.vision = false;
    let resolved = resolve(&requested, &current, None);
    assert!(resolved.vision);

    // And zeroing both sight radii turns it off.
    let requested = RequestedProfile {
        dim_sight: Some(0.0),
        bright_sight: Some(0.0),
        ..Default::default()
    };
    let resolved = resolve(&requested, &current_profile(), None);
    assert!(!resolved.vision);
}

#[test]
fn trace_reports_winning_tier_per_field() {
    let requested = RequestedProfile {
        dim_light: Some(30.0),
        ..Default::default()
    };
    let element = preset(RequestedProfile {
        dim_light: Some(60.0),
        bright_light: Some(15.0),
        ..Default::default()
    });
    let (_, trace) = resolve_traced(&requested, &current_profile(), Some(&element));
    let tier_of = |field: Field| {
        trace
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, t)| *t)
            .unwrap()
    };
    assert_eq!(tier_of(Field::DimLight), Tier::Requested);
    assert_eq!(tier_of(Field::BrightLight), Tier::Preset);
    assert_eq!(tier_of(Field::DimSight), Tier::Current);
}

#[test]
fn advanced_block_stays_absent_until_someone_supplies_it() {
    let resolved = resolve(&RequestedProfile::default(), &current_profile(), None);
    assert!(resolved.advanced.is_none());
    assert!(resolved.geometry.is_none());

    let requested = RequestedProfile {
        luminosity: Some(0.8),
        ..Default::default()
    };
    let resolved = resolve(&requested, &current_profile(), None);
    let advanced = resolved.advanced.unwrap();
    assert_eq!(advanced.luminosity, 0.8);
    // Untouched subfields take the block defaults.
    assert_eq!(advanced.coloration, 1);
}

#[test]
fn geometry_from_request_fills_missing_axes_with_defaults() {
    let requested = RequestedProfile {
        scale: Some(2.0),
        ..Default::default()
    };
    let resolved = resolve(&requested, &current_profile(), None);
    let geometry = resolved.geometry.unwrap();
    assert_eq!(geometry.scale, 2.0);
    assert_eq!(geometry.height, 1.0);
    assert_eq!(geometry.width, 1.0);
}

#[test]
fn builtin_torch_resolves_onto_a_dark_token() {
    let lights = builtin_lights();
    let torch = lights.get("torch").unwrap();
    let resolved = resolve(&RequestedProfile::default(), &LightingProfile::dark(), Some(torch));
    assert_eq!(resolved.dim_light, 40.0);
    assert_eq!(resolved.bright_light, 20.0);
    assert_eq!(resolved.light_color, "#a2642a");
    assert_eq!(resolved.animation.kind, "torch");
}

#[test]
fn builtin_darkvision_grants_vision() {
    let visions = builtin_visions();
    let darkvision = visions.get("darkvision").unwrap();
    let resolved = resolve(
        &RequestedProfile::default(),
        &LightingProfile::dark(),
        Some(darkvision),
    );
    assert_eq!(resolved.dim_sight, 60.0);
    assert!(resolved.vision);
}
