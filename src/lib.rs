//! HTTPS responder for the game client's `server_data.php` lookup, with
//! per-address rate limiting and concurrent-connection capping.

pub mod admission;
pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod server;
pub mod state;
pub mod sweeper;

pub use admission::{AdmissionController, ClientUsage, ConnectionPermit, Decision, Rejection};
pub use clock::{Clock, SharedClock, SystemClock};
pub use config::{AdmissionConfig, Args};
pub use error::GatewayError;
