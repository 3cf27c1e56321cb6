//! Application settings loaded from environment variables.

use std::env;
use std::path::PathBuf;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_STATIC_DIR,
    MIN_JWT_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    /// Token signing secret. `None` leaves token issuance/validation unusable.
    jwt_secret: Option<String>,
    pub server_host: String,
    pub server_port: u16,
    pub static_dir: PathBuf,
    pub cors_allowed_origin: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field(
                "jwt_secret",
                &self.jwt_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("static_dir", &self.static_dir)
            .field("cors_allowed_origin", &self.cors_allowed_origin)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if SECRET_ACCESS_TOKEN_KEY is set but too short.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("SECRET_ACCESS_TOKEN_KEY")
            .ok()
            .filter(|s| !s.is_empty());

        match &jwt_secret {
            Some(secret) if secret.len() < MIN_JWT_SECRET_LENGTH => panic!(
                "SECRET_ACCESS_TOKEN_KEY must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            ),
            Some(_) => {}
            None => tracing::warn!(
                "SECRET_ACCESS_TOKEN_KEY not set, token issuance and validation will fail"
            ),
        }

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATIC_DIR)),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok(),
        }
    }

    /// Build a configuration with an explicit secret (tests, embedding).
    pub fn with_secret(secret: Option<String>) -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: secret,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            cors_allowed_origin: None,
        }
    }

    /// Get JWT secret bytes for token signing/verification, if configured.
    pub fn jwt_secret_bytes(&self) -> Option<&[u8]> {
        self.jwt_secret.as_deref().map(str::as_bytes)
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::with_secret(Some("super-secret-signing-key-0123456789".into()));
        let printed = format!("{:?}", config);

        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("[REDACTED]"));
    }

    #[test]
    fn test_missing_secret_has_no_bytes() {
        assert!(Config::with_secret(None).jwt_secret_bytes().is_none());
    }

    #[test]
    fn test_server_addr() {
        let config = Config::with_secret(None);
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
    }
}
