//! Server configuration from environment variables.

use tracing::warn;

use crate::domain::rules::DEFAULT_MATCH_TARGET;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP/websocket server binds to (`APP_BIND_ADDR`).
    pub bind_addr: String,
    /// Points a player needs to win a match (`APP_MATCH_TARGET`).
    pub match_target: u8,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("APP_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let match_target = match std::env::var("APP_MATCH_TARGET") {
            Err(_) => DEFAULT_MATCH_TARGET,
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!(%raw, "Invalid APP_MATCH_TARGET, using default");
                DEFAULT_MATCH_TARGET
            }),
        };
        Self { bind_addr, match_target }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            match_target: DEFAULT_MATCH_TARGET,
        }
    }
}
