//! Token lighting engine: preset catalogs, three-tier profile resolution,
//! a single-write apply step and flag-driven source toggling. All host
//! interaction goes through injected store traits, so the crate is plain
//! synchronous Rust with no host runtime attached.

pub mod apply;
pub mod config;
pub mod dancing;
pub mod dialog;
pub mod error;
pub mod hotbar;
pub mod memory;
pub mod presets;
pub mod profile;
pub mod relay;
pub mod resolve;
pub mod roll;
pub mod scene;
pub mod toggle;
pub mod torch;
pub mod uses;

pub use apply::{ApplyOptions, EffectSink, EffectSpec, TokenRef, TokenStore, apply};
pub use config::Settings;
pub use error::HudError;
pub use presets::{Catalog, PRESET_NONE, PresetElement, builtin_lights, builtin_visions};
pub use profile::{
    AdvancedLighting, LightAnimation, LightingProfile, RequestedProfile, TokenGeometry,
    parse_form_number,
};
pub use resolve::{Field, Tier, resolve, resolve_traced};
pub use toggle::{FlagOwner, FlagStore, ToggleOutcome, toggle_source};
