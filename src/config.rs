use crate::error::GatewayError;
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "server-data-gateway")]
#[command(about = "HTTPS responder for the game client's server_data.php lookup")]
pub struct Args {
    // Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    pub bind: IpAddr,

    // Port to run the server on
    #[arg(short, long, default_value_t = 443)]
    pub port: u16,

    // Game server host advertised to clients
    #[arg(long, default_value = "127.0.0.1")]
    pub game_host: String,

    // Game server port advertised to clients
    #[arg(short, long, default_value_t = 17091)]
    pub game_port: u16,

    // PEM certificate; serve HTTPS when given together with --key
    #[arg(long)]
    pub cert: Option<PathBuf>,

    // PEM private key
    #[arg(long)]
    pub key: Option<PathBuf>,

    // Rate limit max requests per window
    #[arg(long, default_value_t = 10)]
    pub rate_limit: u32,

    // Rate limit window in seconds
    #[arg(long, default_value_t = 60)]
    pub rate_window: u64,

    // Max concurrent connections per client address
    #[arg(long, default_value_t = 5)]
    pub max_connections: u32,

    // Seconds between sweeps of idle client records
    #[arg(long, default_value_t = 60)]
    pub sweep_interval: u64,

    // Expose GET /stop for shutting the server down
    #[arg(long)]
    pub enable_stop: bool,
}

/// Certificate and key used to terminate TLS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

impl Args {
    /// Check the argument combination and return the TLS paths, if any.
    pub fn tls(&self) -> Result<Option<TlsPaths>, GatewayError> {
        match (&self.cert, &self.key) {
            (Some(cert), Some(key)) => Ok(Some(TlsPaths {
                cert: cert.clone(),
                key: key.clone(),
            })),
            (None, None) => Ok(None),
            _ => Err(GatewayError::InvalidConfig(
                "--cert and --key must be given together".to_string(),
            )),
        }
    }

    pub fn admission(&self) -> AdmissionConfig {
        AdmissionConfig::default()
            .max_requests_per_window(self.rate_limit)
            .window_seconds(self.rate_window)
            .max_concurrent_connections(self.max_connections)
    }
}

/// Limits enforced per client key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionConfig {
    pub max_requests_per_window: u32,
    pub window_seconds: u64,
    pub max_concurrent_connections: u32,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            max_requests_per_window: 10,
            window_seconds: 60,
            max_concurrent_connections: 5,
        }
    }
}

impl AdmissionConfig {
    /// Builder-style: set the request budget per window
    pub fn max_requests_per_window(mut self, max: u32) -> Self {
        self.max_requests_per_window = max;
        self
    }

    /// Builder-style: set the window length in seconds
    pub fn window_seconds(mut self, seconds: u64) -> Self {
        self.window_seconds = seconds;
        self
    }

    /// Builder-style: set the concurrent connection cap
    pub fn max_concurrent_connections(mut self, max: u32) -> Self {
        self.max_concurrent_connections = max;
        self
    }
}
