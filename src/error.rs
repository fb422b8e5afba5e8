use std::io;
use std::net::SocketAddr;

/// Failures while starting or running the gateway.
///
/// Admission rejections are not errors; see [`crate::admission::Rejection`].
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("failed to load TLS certificate or key: {0}")]
    Tls(#[source] io::Error),

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}
