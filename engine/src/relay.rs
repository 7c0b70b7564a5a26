//! Client-to-host-to-client relay for the one request this plugin owns.
//!
//! At-most-once contract: a GM caller handles the request locally; anyone
//! else addresses it to the first active GM and hands it to the transport.
//! An `Ok` from the bus means "emitted", never "delivered": there is no
//! acknowledgment, ordering or retry.

use serde::{Deserialize, Serialize};

use crate::dancing::is_dancing_light;
use crate::error::HudError;
use crate::scene::SceneStore;

/// The lone wire message, relayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "requestType", rename_all = "camelCase")]
pub enum RelayRequest {
    #[serde(rename_all = "camelCase")]
    RemoveDancingLights {
        scene_id: String,
        token_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        address_to: Option<String>,
    },
}

impl RelayRequest {
    pub fn remove_dancing_lights(scene_id: &str, token_id: &str) -> Self {
        Self::RemoveDancingLights {
            scene_id: scene_id.to_string(),
            token_id: token_id.to_string(),
            address_to: None,
        }
    }

    fn addressed_to(&self, user_id: &str) -> Self {
        match self {
            Self::RemoveDancingLights {
                scene_id, token_id, ..
            } => Self::RemoveDancingLights {
                scene_id: scene_id.clone(),
                token_id: token_id.clone(),
                address_to: Some(user_id.to_string()),
            },
        }
    }
}

/// Connected-user entry used for recipient election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
    pub role: u8,
    pub active: bool,
}

/// Host role level that marks a gamemaster.
pub const ROLE_GAMEMASTER: u8 = 4;

/// The single elected recipient: first active GM in user-list order.
pub fn first_gm(users: &[UserRef]) -> Option<&UserRef> {
    users.iter().find(|u| u.role >= ROLE_GAMEMASTER && u.active)
}

/// Fire-and-forget unicast transport.
pub trait MessageBus {
    fn emit(&mut self, request: &RelayRequest) -> Result<(), HudError>;
}

/// Outcome of the at-most-once send contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Caller is a GM; handled locally, nothing went over the wire.
    HandledLocally,
    /// Addressed to the elected GM and handed to the transport. Delivery
    /// itself is not confirmed.
    Emitted,
}

/// Send a request on behalf of `our_user_id`. GMs short-circuit to the
/// local handler; everyone else relays to the first active GM.
pub fn send_request(
    bus: &mut impl MessageBus,
    scenes: &mut impl SceneStore,
    users: &[UserRef],
    our_user_id: &str,
    request: RelayRequest,
) -> Result<Delivery, HudError> {
    let we_are_gm = users
        .iter()
        .any(|u| u.id == our_user_id && u.role >= ROLE_GAMEMASTER);
    if we_are_gm {
        handle_request(scenes, our_user_id, &request)?;
        return Ok(Delivery::HandledLocally);
    }

    let gm = first_gm(users).ok_or(HudError::NoRecipient)?;
    bus.emit(&request.addressed_to(&gm.id))?;
    Ok(Delivery::Emitted)
}

/// Receiver side: acts only when the request is unaddressed or addressed
/// to us, otherwise a silent no-op.
pub fn handle_request(
    scenes: &mut impl SceneStore,
    our_user_id: &str,
    request: &RelayRequest,
) -> Result<(), HudError> {
    match request {
        RelayRequest::RemoveDancingLights {
            scene_id,
            token_id,
            address_to,
        } => {
            if let Some(addressee) = address_to {
                if addressee != our_user_id {
                    return Ok(());
                }
            }
            let tokens = scenes.tokens_in_scene(scene_id)?;
            let owner = tokens
                .iter()
                .find(|t| t.id == *token_id)
                .ok_or_else(|| HudError::MissingTokenOrActor(token_id.clone()))?;
            let owner_actor = owner.actor_id.clone();

            let doomed: Vec<String> = tokens
                .iter()
                .filter(|t| is_dancing_light(t, owner_actor.as_deref()))
                .map(|t| t.id.clone())
                .collect();
            if !doomed.is_empty() {
                scenes.delete_tokens(scene_id, &doomed)?;
            }
            Ok(())
        }
    }
}
