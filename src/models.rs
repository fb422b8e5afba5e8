use serde::Serialize;

// Endpoint advertised to game clients by server_data.php
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerData {
    pub host: String,
    pub port: u16,
}

impl ServerData {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    // Body in the pipe-separated format the client parses
    pub fn render(&self) -> String {
        format!(
            "server|{}\nport|{}\ntype|1\n#maint|Under maintenance.\nbeta_server|127.0.0.1\nbeta_port|1945\nbeta_type|1\nmeta|defined\nRTENDMARKERBS1001\nunknown",
            self.host, self.port
        )
    }
}

// /health response format
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub tracked_clients: usize,
    pub active_connections: usize,
}
