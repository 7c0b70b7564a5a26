use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::HudError;
use crate::profile::RequestedProfile;

/// A named, immutable catalog entry (vision type or light type): default
/// values for a subset of profile fields plus display metadata. Defined at
/// plugin load, read-only thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetElement {
    /// Unique within its catalog.
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    /// Suggested burn time when applied as a tracked effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(flatten)]
    pub values: RequestedProfile,
}

/// Id of the "no vision"/"no light" entry present in both builtin catalogs.
pub const PRESET_NONE: &str = "none";

/// Ordered, id-addressable preset list.
#[derive(Debug, Clone)]
pub struct Catalog {
    kind: &'static str,
    entries: IndexMap<String, PresetElement>,
}

impl Catalog {
    pub fn new(kind: &'static str, elements: Vec<PresetElement>) -> Self {
        let entries = elements.into_iter().map(|e| (e.id.clone(), e)).collect();
        Self { kind, entries }
    }

    pub fn from_yaml(kind: &'static str, text: &str) -> Result<Self> {
        let elements: Vec<PresetElement> = serde_yaml::from_str(text)
            .with_context(|| format!("failed to parse {kind} preset catalog"))?;
        Ok(Self::new(kind, elements))
    }

    pub fn load_path(kind: &'static str, path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read preset catalog: {}", path.display()))?;
        Self::from_yaml(kind, &text)
    }

    /// Lookup that treats a missing id as a hard precondition violation.
    pub fn get(&self, id: &str) -> Result<&PresetElement, HudError> {
        self.entries.get(id).ok_or_else(|| HudError::MissingCatalogEntry {
            catalog: self.kind,
            id: id.to_string(),
        })
    }

    pub fn find(&self, id: &str) -> Option<&PresetElement> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PresetElement> {
        self.entries.values()
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builtin light-source catalog, embedded at compile time.
pub fn builtin_lights() -> Catalog {
    Catalog::from_yaml("light", include_str!("../content/presets/lights.yaml"))
        .expect("builtin light catalog must parse")
}

/// Builtin vision-type catalog, embedded at compile time.
pub fn builtin_visions() -> Catalog {
    Catalog::from_yaml("vision", include_str!("../content/presets/visions.yaml"))
        .expect("builtin vision catalog must parse")
}
