//! HTTP server configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Listener and HTTP layer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct ServerConfig {
    /// Port to listen on
    #[validate(range(min = 1_u16))]
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allow LAN access (bind to 0.0.0.0)
    #[serde(default = "default_true")]
    pub allow_lan_access: bool,
    /// Browser origins allowed by CORS; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Maximum accepted request body in bytes
    #[validate(range(min = 1024_usize))]
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
    /// Set SO_REUSEPORT so a replacement process can bind before this one exits
    #[serde(default)]
    pub reuse_port: bool,
    /// Pending-connection backlog passed to listen(2)
    #[validate(range(min = 1_u32, max = 65_535_u32))]
    #[serde(default = "default_backlog")]
    pub listen_backlog: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            allow_lan_access: true,
            cors_origins: Vec::new(),
            body_limit_bytes: default_body_limit(),
            reuse_port: false,
            listen_backlog: default_backlog(),
        }
    }
}

impl ServerConfig {
    /// Get the bind address based on LAN access setting.
    pub fn get_bind_address(&self) -> String {
        if self.allow_lan_access {
            "0.0.0.0".to_string()
        } else {
            "127.0.0.1".to_string()
        }
    }

    /// Get the full bind socket address.
    pub fn get_socket_addr(&self) -> String {
        format!("{}:{}", self.get_bind_address(), self.port)
    }
}

pub const fn default_port() -> u16 {
    9000
}

const fn default_body_limit() -> usize {
    1024 * 1024
}

const fn default_backlog() -> u32 {
    1024
}

const fn default_true() -> bool {
    true
}
