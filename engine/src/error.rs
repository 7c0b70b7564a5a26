use thiserror::Error;

/// Failure taxonomy for the HUD core.
///
/// Malformed numeric form input is deliberately absent: it is recovered
/// silently as "unset" at the form boundary and never surfaces.
#[derive(Debug, Error)]
pub enum HudError {
    /// The host rejected a token update (validation or permission).
    /// Propagated to the caller untouched; never retried here.
    #[error("host rejected token update: {0}")]
    HostUpdate(String),

    /// Token or actor lookup failed. Reported through the notification
    /// sink before any mutation happens.
    #[error("no token or actor found for id '{0}'")]
    MissingTokenOrActor(String),

    /// Hard precondition violation: preset ids handed to the core must
    /// exist in their catalog.
    #[error("no preset '{id}' in the {catalog} catalog")]
    MissingCatalogEntry { catalog: &'static str, id: String },

    /// Flag storage failed or held an undecodable payload.
    #[error("flag storage failure: {0}")]
    Flag(String),

    /// No active gamemaster is connected to receive a relayed request.
    #[error("no active gamemaster available to receive the relay")]
    NoRecipient,
}
