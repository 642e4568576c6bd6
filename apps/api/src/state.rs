use std::sync::Arc;

use crate::gateway::AiGateway;
use crate::screening::InFlight;
use crate::store::SharedStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    /// Pluggable model backend. Default: GeminiGateway.
    pub gateway: Arc<dyn AiGateway>,
    /// Screenings currently waiting on the gateway.
    pub in_flight: InFlight,
}
