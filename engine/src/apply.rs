//! Commits a resolved profile to a token through the injected host stores.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::HudError;
use crate::profile::LightingProfile;

/// Scene-level address of a placed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRef {
    pub scene_id: String,
    pub token_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,
}

impl TokenRef {
    pub fn new(scene_id: &str, token_id: &str) -> Self {
        Self {
            scene_id: scene_id.to_string(),
            token_id: token_id.to_string(),
            actor_id: None,
        }
    }

    pub fn with_actor(mut self, actor_id: &str) -> Self {
        self.actor_id = Some(actor_id.to_string());
        self
    }
}

/// Tracked-effect description handed to the external effect collaborator.
/// Expiry and removal are entirely the host's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectSpec {
    pub name: String,
    pub icon: String,
    pub duration_minutes: u32,
}

/// The host's token document store.
pub trait TokenStore {
    fn current_profile(&self, token: &TokenRef) -> Result<LightingProfile, HudError>;
    fn update_profile(&mut self, token: &TokenRef, profile: &LightingProfile)
    -> Result<(), HudError>;
}

/// The host's active-effect collaborator.
pub trait EffectSink {
    fn create_tracked_effect(&mut self, token: &TokenRef, spec: &EffectSpec)
    -> Result<(), HudError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    pub track_as_effect: bool,
    pub effect_name: String,
    pub effect_icon: String,
    pub duration_minutes: u32,
}

impl ApplyOptions {
    /// Plain permanent update, no effect record.
    pub fn untracked() -> Self {
        Self::default()
    }

    pub fn tracked(name: &str, icon: &str, duration_minutes: u32) -> Self {
        Self {
            track_as_effect: true,
            effect_name: name.to_string(),
            effect_icon: icon.to_string(),
            duration_minutes,
        }
    }
}

/// Commit a fully resolved profile to the token.
///
/// Exactly one update call carrying every field, so no stale sub-field of
/// the token's prior state survives. If `track_as_effect` is set and the
/// duration is positive, an effect record is additionally requested from
/// the collaborator. Host rejections propagate; nothing is retried.
pub fn apply(
    tokens: &mut impl TokenStore,
    effects: &mut impl EffectSink,
    token: &TokenRef,
    profile: &LightingProfile,
    options: &ApplyOptions,
) -> Result<(), HudError> {
    debug!(
        token = %token.token_id,
        dim = profile.dim_light,
        bright = profile.bright_light,
        tracked = options.track_as_effect,
        "updating token lighting"
    );
    tokens.update_profile(token, profile)?;

    if options.track_as_effect && options.duration_minutes > 0 {
        let spec = EffectSpec {
            name: options.effect_name.clone(),
            icon: options.effect_icon.clone(),
            duration_minutes: options.duration_minutes,
        };
        effects.create_tracked_effect(token, &spec)?;
    }
    Ok(())
}
