use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// World-scoped plugin settings. The host registers and persists these;
/// the core only reads a loaded snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Players may use the torch HUD button, not only the GM.
    pub player_torches: bool,
    /// Require a matching inventory item / known spell before lighting up.
    pub check_availability: bool,
    /// The GM's toggles also consume inventory.
    pub gm_uses_inventory: bool,
    /// Inventory item name checked for torch availability.
    pub gm_inventory_item_name: String,
    /// Fallback torch radii for the bare HUD toggle.
    pub bright_radius: f64,
    pub dim_radius: f64,
    /// Radii forced when a light is switched off via the HUD.
    pub off_bright_radius: f64,
    pub off_dim_radius: f64,
    /// Spawned dancing-light markers share the caster's vision.
    pub dancing_light_vision: bool,
    /// Capture/restore the token baseline around flag-driven toggles.
    pub apply_on_flag_item: bool,
    /// Roll the source item to chat when it is enabled.
    pub roll_item: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_torches: true,
            check_availability: true,
            gm_uses_inventory: false,
            gm_inventory_item_name: "torch".to_string(),
            bright_radius: 20.0,
            dim_radius: 40.0,
            off_bright_radius: 0.0,
            off_dim_radius: 0.0,
            dancing_light_vision: false,
            apply_on_flag_item: true,
            roll_item: false,
        }
    }
}

impl Settings {
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("failed to parse settings")
    }

    pub fn load_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings: {}", path.display()))?;
        Self::from_yaml(&text)
    }
}
