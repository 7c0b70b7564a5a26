//! Dancing-light marker tokens: four small placeable lights spawned around
//! the caster, later found and deleted by the relay handler.

use crate::scene::{PlacedToken, TokenSpawn};

pub const DANCING_LIGHT_NAME: &str = "Dancing Light";
pub const DANCING_LIGHT_DIM: f64 = 10.0;
pub const DANCING_LIGHT_BRIGHT: f64 = 0.0;
pub const DANCING_LIGHT_SCALE: f64 = 0.25;
pub const DANCING_LIGHT_ICON: &str = "icons/magic/light/orbs-firefly-hand-yellow.webp";

/// Spawn templates for the four markers. They land on the corners of the
/// 2x2 block whose lower-right square is centred on the source token, one
/// token-width/height apart, matching the spell's four mote placement.
pub fn dancing_light_spawns(source: &PlacedToken, with_vision: bool) -> Vec<TokenSpawn> {
    let cx = source.x + source.width / 2.0;
    let cy = source.y + source.height / 2.0;
    let offsets = [
        (-source.width, -source.height),
        (0.0, -source.height),
        (-source.width, 0.0),
        (0.0, 0.0),
    ];
    offsets
        .iter()
        .map(|(dx, dy)| TokenSpawn {
            name: DANCING_LIGHT_NAME.to_string(),
            actor_id: source.actor_id.clone(),
            x: cx + dx,
            y: cy + dy,
            width: 1.0,
            height: 1.0,
            scale: DANCING_LIGHT_SCALE,
            dim_light: DANCING_LIGHT_DIM,
            bright_light: DANCING_LIGHT_BRIGHT,
            light_angle: 360.0,
            sight_angle: 360.0,
            light_alpha: 1.0,
            vision: with_vision,
            hidden: false,
            icon: DANCING_LIGHT_ICON.to_string(),
        })
        .collect()
}

/// Does this placed token look like one of our spawned markers for the
/// given owner? Matches the marker name, the owning actor and the radii
/// the spawns actually use.
pub fn is_dancing_light(token: &PlacedToken, owner_actor: Option<&str>) -> bool {
    token.name == DANCING_LIGHT_NAME
        && token.actor_id.as_deref() == owner_actor
        && (token.dim_light - DANCING_LIGHT_DIM).abs() < f64::EPSILON
        && (token.bright_light - DANCING_LIGHT_BRIGHT).abs() < f64::EPSILON
}
