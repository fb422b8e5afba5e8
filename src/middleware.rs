use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::admission::Rejection;
use crate::metrics::{
    ADMITTED_TOTAL, CONNECTION_LIMITED_TOTAL, RATE_LIMITED_TOTAL, REQUEST_LATENCY, REQUEST_TOTAL,
};
use crate::state::AppState;

pub fn rejection_status(rejection: Rejection) -> StatusCode {
    match rejection {
        Rejection::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        Rejection::ConnectionLimited => StatusCode::SERVICE_UNAVAILABLE,
    }
}

// Admission check wrapped around the protected routes. The permit lives
// until the inner handler finishes or its future is dropped.
pub async fn admission_guard(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    REQUEST_TOTAL.inc();
    let ip = peer.ip().to_string();

    let _permit = match state.admission.try_acquire(ip.clone()) {
        Ok(permit) => permit,
        Err(rejection) => {
            match rejection {
                Rejection::RateLimited => {
                    RATE_LIMITED_TOTAL.inc();
                    warn!("Rate limit exceeded by IP: {}", ip);
                }
                Rejection::ConnectionLimited => {
                    CONNECTION_LIMITED_TOTAL.inc();
                    warn!("Connection limit exceeded by IP: {}", ip);
                }
            }
            return (rejection_status(rejection), rejection.to_string()).into_response();
        }
    };
    ADMITTED_TOTAL.inc();

    let start_time = Instant::now();
    let response = next.run(request).await;
    REQUEST_LATENCY.observe(start_time.elapsed().as_secs_f64());

    response
}

// One line per request
pub async fn access_log(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    let start_time = Instant::now();

    let response = next.run(request).await;

    info!(
        %method,
        %path,
        %peer,
        status = response.status().as_u16(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "request"
    );
    response
}
