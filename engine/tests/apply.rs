use engine::memory::MemoryHost;
use engine::{ApplyOptions, HudError, LightingProfile, TokenRef, apply};

fn lit_profile() -> LightingProfile {
    let mut profile = LightingProfile {
        dim_light: 40.0,
        bright_light: 20.0,
        light_color: "#a2642a".to_string(),
        ..LightingProfile::dark()
    };
    profile.derive_vision();
    profile
}

#[test]
fn untracked_apply_updates_without_effect() {
    let mut host = MemoryHost::new();
    host.tokens.insert("tok-1", LightingProfile::dark());
    let token = TokenRef::new("scene-1", "tok-1");

    apply(
        &mut host.tokens,
        &mut host.effects,
        &token,
        &lit_profile(),
        &ApplyOptions::untracked(),
    )
    .unwrap();
    assert_eq!(host.tokens.profile("tok-1").unwrap(), &lit_profile());
    assert!(host.effects.created.is_empty());
}

#[test]
fn tracked_apply_requests_one_effect() {
    let mut host = MemoryHost::new();
    host.tokens.insert("tok-1", LightingProfile::dark());
    let token = TokenRef::new("scene-1", "tok-1");

    apply(
        &mut host.tokens,
        &mut host.effects,
        &token,
        &lit_profile(),
        &ApplyOptions::tracked("Torch", "icons/torch.webp", 60),
    )
    .unwrap();
    assert_eq!(host.effects.created.len(), 1);
    let (to, spec) = &host.effects.created[0];
    assert_eq!(to, &token);
    assert_eq!(spec.name, "Torch");
    assert_eq!(spec.duration_minutes, 60);
}

#[test]
fn zero_duration_suppresses_the_effect() {
    let mut host = MemoryHost::new();
    host.tokens.insert("tok-1", LightingProfile::dark());
    let token = TokenRef::new("scene-1", "tok-1");

    apply(
        &mut host.tokens,
        &mut host.effects,
        &token,
        &lit_profile(),
        &ApplyOptions::tracked("Torch", "icons/torch.webp", 0),
    )
    .unwrap();
    // The profile still lands; only the effect record is skipped.
    assert_eq!(host.tokens.profile("tok-1").unwrap().dim_light, 40.0);
    assert!(host.effects.created.is_empty());
}

#[test]
fn host_rejection_propagates_and_creates_no_effect() {
    let mut host = MemoryHost::new();
    host.tokens.insert("tok-1", LightingProfile::dark());
    host.tokens.reject_updates = Some("tok-1".to_string());
    let token = TokenRef::new("scene-1", "tok-1");

    let err = apply(
        &mut host.tokens,
        &mut host.effects,
        &token,
        &lit_profile(),
        &ApplyOptions::tracked("Torch", "icons/torch.webp", 60),
    )
    .unwrap_err();
    assert!(matches!(err, HudError::HostUpdate(_)));
    assert!(host.effects.created.is_empty());
    // Nothing was written.
    assert_eq!(host.tokens.profile("tok-1").unwrap(), &LightingProfile::dark());
}
