//! In-memory host implementations of the external seams. They back the
//! integration tests and the command-line demo; a real deployment supplies
//! its own stores. One struct per seam, so a caller can hand out distinct
//! exclusive borrows the way the engine entry points want them.

use indexmap::IndexMap;
use serde_json::Value;

use crate::apply::{EffectSink, EffectSpec, TokenRef, TokenStore};
use crate::error::HudError;
use crate::profile::LightingProfile;
use crate::relay::{MessageBus, RelayRequest};
use crate::scene::{PlacedToken, SceneStore, TokenSpawn};
use crate::toggle::{FlagOwner, FlagStore};

/// Token documents keyed by token id.
#[derive(Debug, Default)]
pub struct TokenBook {
    profiles: IndexMap<String, LightingProfile>,
    /// When set, updates for this token id fail with
    /// `HudError::HostUpdate`, simulating a host-side rejection.
    pub reject_updates: Option<String>,
}

impl TokenBook {
    pub fn insert(&mut self, token_id: &str, profile: LightingProfile) {
        self.profiles.insert(token_id.to_string(), profile);
    }

    pub fn profile(&self, token_id: &str) -> Option<&LightingProfile> {
        self.profiles.get(token_id)
    }
}

impl TokenStore for TokenBook {
    fn current_profile(&self, token: &TokenRef) -> Result<LightingProfile, HudError> {
        self.profiles
            .get(&token.token_id)
            .cloned()
            .ok_or_else(|| HudError::MissingTokenOrActor(token.token_id.clone()))
    }

    fn update_profile(
        &mut self,
        token: &TokenRef,
        profile: &LightingProfile,
    ) -> Result<(), HudError> {
        if self.reject_updates.as_deref() == Some(token.token_id.as_str()) {
            return Err(HudError::HostUpdate(format!(
                "update rejected for token '{}'",
                token.token_id
            )));
        }
        if !self.profiles.contains_key(&token.token_id) {
            return Err(HudError::MissingTokenOrActor(token.token_id.clone()));
        }
        self.profiles
            .insert(token.token_id.clone(), profile.clone());
        Ok(())
    }
}

/// Records every tracked effect the engine requested, in order.
#[derive(Debug, Default)]
pub struct EffectLog {
    pub created: Vec<(TokenRef, EffectSpec)>,
}

impl EffectSink for EffectLog {
    fn create_tracked_effect(
        &mut self,
        token: &TokenRef,
        spec: &EffectSpec,
    ) -> Result<(), HudError> {
        self.created.push((token.clone(), spec.clone()));
        Ok(())
    }
}

/// Namespaced key-value flags keyed by (owner, key).
#[derive(Debug, Default)]
pub struct FlagBook {
    flags: IndexMap<(FlagOwner, String), Value>,
}

impl FlagStore for FlagBook {
    fn get_flag(&self, owner: &FlagOwner, key: &str) -> Option<Value> {
        self.flags.get(&(owner.clone(), key.to_string())).cloned()
    }

    fn set_flag(&mut self, owner: &FlagOwner, key: &str, value: Value) -> Result<(), HudError> {
        self.flags.insert((owner.clone(), key.to_string()), value);
        Ok(())
    }

    fn unset_flag(&mut self, owner: &FlagOwner, key: &str) -> Result<(), HudError> {
        self.flags.shift_remove(&(owner.clone(), key.to_string()));
        Ok(())
    }
}

/// Scene documents: placed tokens by scene id, spawn ids handed out in
/// sequence.
#[derive(Debug, Default)]
pub struct SceneBook {
    scenes: IndexMap<String, Vec<PlacedToken>>,
    next_id: u32,
}

impl SceneBook {
    pub fn place(&mut self, scene_id: &str, token: PlacedToken) {
        self.scenes
            .entry(scene_id.to_string())
            .or_default()
            .push(token);
    }

    pub fn tokens(&self, scene_id: &str) -> &[PlacedToken] {
        self.scenes.get(scene_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl SceneStore for SceneBook {
    fn tokens_in_scene(&self, scene_id: &str) -> Result<Vec<PlacedToken>, HudError> {
        Ok(self.tokens(scene_id).to_vec())
    }

    fn spawn_tokens(&mut self, scene_id: &str, spawns: &[TokenSpawn]) -> Result<(), HudError> {
        for spawn in spawns {
            self.next_id += 1;
            let token = PlacedToken {
                id: format!("tok-{}", self.next_id),
                actor_id: spawn.actor_id.clone(),
                name: spawn.name.clone(),
                x: spawn.x,
                y: spawn.y,
                width: spawn.width,
                height: spawn.height,
                dim_light: spawn.dim_light,
                bright_light: spawn.bright_light,
            };
            self.scenes
                .entry(scene_id.to_string())
                .or_default()
                .push(token);
        }
        Ok(())
    }

    fn delete_tokens(&mut self, scene_id: &str, token_ids: &[String]) -> Result<(), HudError> {
        if let Some(tokens) = self.scenes.get_mut(scene_id) {
            tokens.retain(|t| !token_ids.contains(&t.id));
        }
        Ok(())
    }
}

/// Records emitted relay requests instead of sending them anywhere.
#[derive(Debug, Default)]
pub struct BusLog {
    pub emitted: Vec<RelayRequest>,
}

impl MessageBus for BusLog {
    fn emit(&mut self, request: &RelayRequest) -> Result<(), HudError> {
        self.emitted.push(request.clone());
        Ok(())
    }
}

/// The full set of in-memory stores, one per seam.
#[derive(Debug, Default)]
pub struct MemoryHost {
    pub tokens: TokenBook,
    pub effects: EffectLog,
    pub flags: FlagBook,
    pub scenes: SceneBook,
    pub bus: BusLog,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }
}
