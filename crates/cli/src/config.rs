//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `FIRE_API_URL` - Backend API base (default: `http://localhost:5000/api`)
//! - `FIRE_WHATSAPP_NUMBER` - Order recipient, digits only (default: `94743678001`)
//! - `FIRE_STATE_FILE` - Where the cart and caches are kept (default: `.fire-state.json`)
//! - `FIRE_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 10)
//! - `FIRE_ADMIN_TOKEN` - Admin token sent with `fire admin` requests

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_WHATSAPP_NUMBER: &str = "94743678001";
const DEFAULT_STATE_FILE: &str = ".fire-state.json";
const DEFAULT_HTTP_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// API base URL without a trailing slash, e.g. `https://fire.lk/api`
    pub api_url: String,
    /// International number orders are sent to
    pub whatsapp_number: String,
    /// JSON file backing the cart and listing caches
    pub state_file: PathBuf,
    /// Per-request HTTP timeout
    pub http_timeout: Duration,
    /// Token for the admin endpoints, if this user has one
    pub admin_token: Option<SecretString>,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = parse_api_url(&get_env_or_default(
            &lookup,
            "FIRE_API_URL",
            DEFAULT_API_URL,
        ))?;

        let whatsapp_number =
            get_env_or_default(&lookup, "FIRE_WHATSAPP_NUMBER", DEFAULT_WHATSAPP_NUMBER)
                .trim()
                .trim_start_matches('+')
                .to_string();
        if whatsapp_number.is_empty() || !whatsapp_number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidEnvVar(
                "FIRE_WHATSAPP_NUMBER".to_string(),
                "must contain digits only".to_string(),
            ));
        }

        let state_file =
            PathBuf::from(get_env_or_default(&lookup, "FIRE_STATE_FILE", DEFAULT_STATE_FILE));

        let timeout_secs =
            get_env_or_default(&lookup, "FIRE_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)
                .parse::<u64>()
                .map_err(|e| {
                    ConfigError::InvalidEnvVar("FIRE_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
                })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "FIRE_HTTP_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let admin_token = lookup("FIRE_ADMIN_TOKEN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(SecretString::from);

        Ok(Self {
            api_url,
            whatsapp_number,
            state_file,
            http_timeout: Duration::from_secs(timeout_secs),
            admin_token,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value. Blank values count as unset.
fn get_env_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_api_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar("FIRE_API_URL".to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "FIRE_API_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}
