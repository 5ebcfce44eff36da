//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BACKEND_URL` - Base URL of the hosted backend project
//! - `BACKEND_SERVICE_KEY` - API key sent with every backend request
//! - `BACKEND_SERVICE_EMAIL` - Service account email for the startup sign-in
//! - `BACKEND_SERVICE_PASSWORD` - Service account password
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_FAULT_SEED` - Seed for the fault RNG (reproducible runs)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Hosted backend connection settings
    pub backend: BackendConfig,
    /// Seed for the fault-injection RNG; `None` seeds from the OS
    pub fault_seed: Option<u64>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

/// Hosted backend connection settings.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct BackendConfig {
    /// Base URL of the backend project (e.g., <https://xyz.backend.example>)
    pub url: Url,
    /// Project API key, sent as the `apikey` header
    pub service_key: SecretString,
    /// Service account email used for the one startup sign-in
    pub service_email: String,
    /// Service account password
    pub service_password: SecretString,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url.as_str())
            .field("service_key", &"[REDACTED]")
            .field("service_email", &self.service_email)
            .field("service_password", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = optional_env("STOREFRONT_HOST")
            .map_or(Ok(IpAddr::from([127, 0, 0, 1])), |raw| {
                raw.parse()
                    .map_err(|_| invalid("STOREFRONT_HOST", "not an IP address"))
            })?;

        let port = optional_env("STOREFRONT_PORT").map_or(Ok(3000), |raw| {
            raw.parse()
                .map_err(|_| invalid("STOREFRONT_PORT", "not a port number"))
        })?;

        let fault_seed = optional_env("STOREFRONT_FAULT_SEED")
            .map(|raw| {
                raw.parse()
                    .map_err(|_| invalid("STOREFRONT_FAULT_SEED", "not a u64"))
            })
            .transpose()?;

        let url = Url::parse(&require_env("BACKEND_URL")?)
            .map_err(|err| invalid("BACKEND_URL", &err.to_string()))?;

        Ok(Self {
            host,
            port,
            backend: BackendConfig {
                url,
                service_key: SecretString::from(require_env("BACKEND_SERVICE_KEY")?),
                service_email: require_env("BACKEND_SERVICE_EMAIL")?,
                service_password: SecretString::from(require_env("BACKEND_SERVICE_PASSWORD")?),
            },
            fault_seed,
            sentry_dsn: optional_env("SENTRY_DSN"),
            sentry_environment: optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// The socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn invalid(name: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidEnvVar(name.to_string(), reason.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr_combines_host_and_port() {
        let config = StorefrontConfig {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8080,
            backend: BackendConfig {
                url: Url::parse("https://demo.backend.example").expect("url"),
                service_key: SecretString::from("key".to_string()),
                service_email: "svc@example.com".to_string(),
                service_password: SecretString::from("pw".to_string()),
            },
            fault_seed: Some(1),
            sentry_dsn: None,
            sentry_environment: None,
        };
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_backend_debug_redacts_secrets() {
        let backend = BackendConfig {
            url: Url::parse("https://demo.backend.example").expect("url"),
            service_key: SecretString::from("super-secret-key".to_string()),
            service_email: "svc@example.com".to_string(),
            service_password: SecretString::from("hunter2".to_string()),
        };
        let rendered = format!("{backend:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("super-secret-key"));
        assert!(!rendered.contains("hunter2"));
    }
}
