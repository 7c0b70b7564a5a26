use proptest::prelude::*;

use engine::presets::PresetElement;
use engine::{LightingProfile, RequestedProfile, resolve};

fn arb_current() -> impl Strategy<Value = LightingProfile> {
    (
        0.0..=120.0f64,
        0.0..=120.0f64,
        0.0..=120.0f64,
        0.0..=120.0f64,
        1.0..=360.0f64,
        0.0..=1.0f64,
    )
        .prop_map(|(dim_sight, bright_sight, dim_light, bright_light, angle, alpha)| {
            let mut profile = LightingProfile {
                dim_sight,
                bright_sight,
                dim_light,
                bright_light,
                light_angle: angle,
                light_alpha: alpha,
                ..LightingProfile::dark()
            };
            profile.derive_vision();
            profile
        })
}

fn arb_requested() -> impl Strategy<Value = RequestedProfile> {
    (
        proptest::option::of(0.0..=120.0f64),
        proptest::option::of(0.0..=120.0f64),
        proptest::option::of(0.0..=120.0f64),
        proptest::option::of(0.0..=120.0f64),
    )
        .prop_map(|(dim_sight, bright_sight, dim_light, bright_light)| RequestedProfile {
            dim_sight,
            bright_sight,
            dim_light,
            bright_light,
            ..Default::default()
        })
}

fn preset_of(values: RequestedProfile) -> PresetElement {
    PresetElement {
        id: "prop".to_string(),
        name: "Prop".to_string(),
        icon: String::new(),
        duration_minutes: None,
        values,
    }
}

proptest! {
    #[test]
    fn empty_request_is_the_identity(current in arb_current()) {
        let resolved = resolve(&RequestedProfile::default(), &current, None);
        prop_assert_eq!(resolved, current);
    }

    #[test]
    fn requested_fields_always_win(
        current in arb_current(),
        requested in arb_requested(),
        preset_values in arb_requested(),
    ) {
        let element = preset_of(preset_values);
        let resolved = resolve(&requested, &current, Some(&element));
        if let Some(v) = requested.dim_light {
            prop_assert_eq!(resolved.dim_light, v);
        }
        if let Some(v) = requested.bright_light {
            prop_assert_eq!(resolved.bright_light, v);
        }
        if let Some(v) = requested.dim_sight {
            prop_assert_eq!(resolved.dim_sight, v);
        }
        if let Some(v) = requested.bright_sight {
            prop_assert_eq!(resolved.bright_sight, v);
        }
    }

    #[test]
    fn unrequested_fields_never_invent_values(
        current in arb_current(),
        requested in arb_requested(),
    ) {
        // Without a preset every unset field must equal the current value.
        let resolved = resolve(&requested, &current, None);
        if requested.light_color.is_none() {
            prop_assert_eq!(&resolved.light_color, &current.light_color);
        }
        if requested.dim_light.is_none() {
            prop_assert_eq!(resolved.dim_light, current.dim_light);
        }
        if requested.light_angle.is_none() {
            prop_assert_eq!(resolved.light_angle, current.light_angle);
        }
    }

    #[test]
    fn vision_matches_the_sight_radii(
        current in arb_current(),
        requested in arb_requested(),
        preset_values in arb_requested(),
    ) {
        let element = preset_of(preset_values);
        let resolved = resolve(&requested, &current, Some(&element));
        prop_assert_eq!(
            resolved.vision,
            resolved.dim_sight > 0.0 || resolved.bright_sight > 0.0
        );
    }

    #[test]
    fn resolution_is_idempotent(
        current in arb_current(),
        requested in arb_requested(),
    ) {
        // Resolving the same request against its own output changes nothing.
        let once = resolve(&requested, &current, None);
        let twice = resolve(&requested, &once, None);
        prop_assert_eq!(once, twice);
    }
}
