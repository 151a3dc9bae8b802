//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to deserialize environment variables into a type-safe struct,
//! then validates the signing secret so the service never starts with a guessable one.

use std::fmt;

use serde::Deserialize;

/// Placeholder secret that shipped with early deployments. Rejected at startup.
const PLACEHOLDER_SECRET: &str = "change_this_signing_secret_in_prod";

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `HMAC_SECRET` (required): secret keying the API key hashes
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `STATIC_DIR` (optional): directory served for non-API paths, defaults to `public`
#[derive(Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default)]
    pub hmac_secret: Option<String>,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// Errors that prevent the service from starting.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid environment: {0}")]
    Env(#[from] envy::Error),

    #[error("HMAC_SECRET is not set")]
    MissingSecret,

    #[error("HMAC_SECRET is set to the insecure placeholder value")]
    PlaceholderSecret,
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    5
}

fn default_static_dir() -> String {
    "public".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL)
    /// - Values cannot be parsed into expected types
    /// - HMAC_SECRET is unset, blank, or the placeholder value
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_vars(std::env::vars())
    }

    /// Build configuration from an explicit set of variables.
    ///
    /// Field names map the same way as the environment: `database_url` <- `DATABASE_URL`.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)?;
        config.signing_secret()?;
        Ok(config)
    }

    /// The validated HMAC signing secret.
    pub fn signing_secret(&self) -> Result<&str, ConfigError> {
        let secret = self
            .hmac_secret
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        if secret == PLACEHOLDER_SECRET {
            return Err(ConfigError::PlaceholderSecret);
        }

        Ok(secret)
    }
}

// Hand-written so the secret and database credentials stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"<redacted>")
            .field("hmac_secret", &self.hmac_secret.as_ref().map(|_| "<redacted>"))
            .field("server_port", &self.server_port)
            .field("database_max_connections", &self.database_max_connections)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}
