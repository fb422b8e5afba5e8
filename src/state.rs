use crate::admission::AdmissionController;
use crate::clock::SharedClock;
use crate::models::ServerData;
use std::sync::Arc;
use tokio::sync::Notify;

/// Admission controller keyed by client IP, as used by the HTTP layer.
pub type ClientAdmission = AdmissionController<String, SharedClock>;

// app's shared state
pub struct AppState {
    pub admission: Arc<ClientAdmission>,
    pub server_data: ServerData,
    pub stop_enabled: bool,   // whether GET /stop is routed
    pub shutdown: Arc<Notify>, // signalled by /stop
}

impl AppState {
    pub fn new(admission: Arc<ClientAdmission>, server_data: ServerData) -> Self {
        Self {
            admission,
            server_data,
            stop_enabled: false,
            shutdown: Arc::new(Notify::new()),
        }
    }

    pub fn with_stop_route(mut self, enabled: bool) -> Self {
        self.stop_enabled = enabled;
        self
    }
}
