use serde::{Deserialize, Serialize};

use crate::error::HudError;

/// Minimal view of a placed token, enough for the scene-level operations
/// this core performs (marker matching and dancing-light cleanup).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedToken {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub dim_light: f64,
    pub bright_light: f64,
}

/// Placement request for one spawned marker token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSpawn {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub scale: f64,
    pub dim_light: f64,
    pub bright_light: f64,
    pub light_angle: f64,
    pub sight_angle: f64,
    pub light_alpha: f64,
    pub vision: bool,
    pub hidden: bool,
    pub icon: String,
}

/// The host's scene document store.
pub trait SceneStore {
    fn tokens_in_scene(&self, scene_id: &str) -> Result<Vec<PlacedToken>, HudError>;
    fn spawn_tokens(&mut self, scene_id: &str, spawns: &[TokenSpawn]) -> Result<(), HudError>;
    fn delete_tokens(&mut self, scene_id: &str, token_ids: &[String]) -> Result<(), HudError>;
}
