//! Environment-driven server configuration.

use crate::auth::jwt::JwtConfig;

/// Everything the server needs at startup. Every field except the JWT
/// secret has a local-development default.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address. `HOST`, default `0.0.0.0`.
    pub host: String,
    /// Bind port. `PORT`, default `5000`.
    pub port: u16,
    /// Allowed CORS origins. `CORS_ORIGINS`, comma-separated, default is
    /// the Vite dev server.
    pub cors_origins: Vec<String>,
    /// Per-request timeout. `REQUEST_TIMEOUT_SECS`, default `30`.
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Read the full configuration from the environment.
    ///
    /// # Panics
    ///
    /// Panics on unparseable values or a missing JWT secret; a server
    /// that cannot configure itself should not come up.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0"),
            port: parse_env("PORT", 5000),
            cors_origins: env_or("CORS_ORIGINS", "http://localhost:5173")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30),
            jwt: JwtConfig::from_env(),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{key} has an invalid value: {raw}")),
        Err(_) => default,
    }
}
