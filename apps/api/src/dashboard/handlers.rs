use axum::{extract::State, Json};

use crate::dashboard::{summarize, DashboardSummary};
use crate::state::AppState;

/// GET /api/v1/dashboard
pub async fn handle_dashboard(State(state): State<AppState>) -> Json<DashboardSummary> {
    let store = state.store.read().await;
    Json(summarize(&store, state.in_flight.is_processing()))
}
