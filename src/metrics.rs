use lazy_static::lazy_static;
use prometheus::{Histogram, IntCounter, IntGauge, register_histogram, register_int_counter, register_int_gauge};

lazy_static! {
    pub static ref REQUEST_TOTAL: IntCounter =
        register_int_counter!("gateway_requests_total", "Total number of requests").unwrap();
    pub static ref ADMITTED_TOTAL: IntCounter =
        register_int_counter!("gateway_admitted_total", "Requests that passed admission").unwrap();
    pub static ref RATE_LIMITED_TOTAL: IntCounter = register_int_counter!(
        "gateway_rate_limited_total",
        "Requests rejected with 429"
    )
    .unwrap();
    pub static ref CONNECTION_LIMITED_TOTAL: IntCounter = register_int_counter!(
        "gateway_connection_limited_total",
        "Requests rejected with 503"
    )
    .unwrap();
    pub static ref ACTIVE_CONNECTIONS: IntGauge = register_int_gauge!(
        "gateway_active_connections",
        "Admitted requests not yet released"
    )
    .unwrap();
    pub static ref TRACKED_CLIENTS: IntGauge = register_int_gauge!(
        "gateway_tracked_clients",
        "Client addresses held in admission state"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "gateway_request_latency_seconds",
        "Request latency in seconds"
    )
    .unwrap();
}
