//! Application configuration
//!
//! Loaded from an optional JSON file; every field has a default.
//! The `PORT` and `SECRET` environment variables override the file.

use std::fs;
use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::{JwtConfig, PasswordPolicy};
use crate::http_server::HttpServerConfig;

/// Longest accepted token lifetime: one year
pub const MAX_TOKEN_TTL_MINUTES: i64 = 365 * 24 * 60;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

impl ConfigError {
    fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Full service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(flatten)]
    pub server: HttpServerConfig,

    /// Token signing secret
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// Token lifetime in minutes (default 60, at most one year)
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,

    /// Shortest accepted password (default 3)
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
}

fn default_jwt_secret() -> String {
    JwtConfig::default().secret
}

fn default_token_ttl_minutes() -> i64 {
    60
}

fn default_password_min_length() -> usize {
    PasswordPolicy::default().min_length
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            jwt_secret: default_jwt_secret(),
            token_ttl_minutes: default_token_ttl_minutes(),
            password_min_length: default_password_min_length(),
        }
    }
}

impl AppConfig {
    /// Load from `path` (or defaults when `None`), apply the process
    /// environment, then validate
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config file without applying overrides
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Apply `PORT` and `SECRET` from `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid("PORT", format!("'{}' is not a port", port)))?;
        }

        if let Some(secret) = lookup("SECRET") {
            self.jwt_secret = secret;
        }

        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("port", "must be > 0"));
        }

        if self.jwt_secret.is_empty() {
            return Err(ConfigError::invalid("jwt_secret", "must not be empty"));
        }

        if self.token_ttl_minutes <= 0 || self.token_ttl_minutes > MAX_TOKEN_TTL_MINUTES {
            return Err(ConfigError::invalid(
                "token_ttl_minutes",
                format!("must be between 1 and {}", MAX_TOKEN_TTL_MINUTES),
            ));
        }

        Ok(())
    }

    /// Token settings derived from this config
    ///
    /// The lifetime is clamped to the accepted range, so an unvalidated
    /// config still yields a usable token lifetime.
    pub fn jwt_config(&self) -> JwtConfig {
        let minutes = self.token_ttl_minutes.clamp(1, MAX_TOKEN_TTL_MINUTES);
        JwtConfig {
            secret: self.jwt_secret.clone(),
            token_ttl: Duration::minutes(minutes),
            ..JwtConfig::default()
        }
    }

    pub fn password_policy(&self) -> PasswordPolicy {
        PasswordPolicy {
            min_length: self.password_min_length,
        }
    }
}
