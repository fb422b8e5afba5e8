use axum::{
    extract::{ConnectInfo, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::state::AppState;

// POST: the real lookup, answered with the advertised endpoint
pub async fn server_data_post_handler(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
) -> impl IntoResponse {
    info!("Connection from {}", peer.ip());
    (
        [(header::CONTENT_TYPE, "text/html")],
        state.server_data.render(),
    )
}

// GET: browsers and probes get a bare redirect status
pub async fn server_data_get_handler(ConnectInfo(peer): ConnectInfo<SocketAddr>) -> StatusCode {
    info!("Get request from {}", peer.ip());
    StatusCode::MOVED_PERMANENTLY
}
