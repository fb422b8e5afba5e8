use axum::{Json, extract::State, response::IntoResponse};
use std::sync::Arc;

use crate::models::HealthResponse;
use crate::state::AppState;

pub async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        timestamp: chrono::Utc::now().to_rfc3339(),
        tracked_clients: state.admission.tracked_clients(),
        active_connections: state.admission.active_connections(),
    })
}
