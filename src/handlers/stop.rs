use axum::extract::State;
use std::sync::Arc;
use tracing::info;

use crate::state::AppState;

// Only routed when the server runs with --enable-stop
pub async fn stop_handler(State(state): State<Arc<AppState>>) {
    info!("Stop requested, shutting down");
    state.shutdown.notify_one();
}
