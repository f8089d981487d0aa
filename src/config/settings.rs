//! # Configuration Settings
//!
//! Defines the configuration structure for the rotation service. Values are
//! resolved from environment variables (`ROTAVAULT_*`, with bare fallbacks for
//! the Vault client) with explicit defaults where a default is safe.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::rotation::RetirementPolicy;

/// Read a required environment variable, rejecting empty values.
fn required_env(key: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::config(format!("{} environment variable is not set", key))),
    }
}

/// Read an optional environment variable, treating empty values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_flag(key: &str) -> bool {
    std::env::var(key).map(|s| s.to_lowercase() == "true" || s == "1").unwrap_or(false)
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Rotation workflow parameters
    pub rotation: RotationConfig,

    /// Identity-provider directory client
    pub directory: DirectoryConfig,

    /// Secret vault client
    pub vault: VaultConfig,

    /// HTTP/event trigger server
    pub api: ApiServerConfig,
}

impl Config {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            rotation: RotationConfig::from_env()?,
            directory: DirectoryConfig::from_env()?,
            vault: VaultConfig::from_env()?,
            api: ApiServerConfig::from_env()?,
        })
    }
}

/// Parameters of the rotation workflow itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationConfig {
    /// Object ID of the application whose credential is rotated
    pub app_object_id: String,

    /// Display name of the new credential and name of the vault secret
    pub secret_name: String,

    /// Lifetime of the issued credential, in calendar months
    pub rotation_window_months: u32,

    /// Whether the soonest-expiring prior credential is deleted first
    pub retirement_policy: RetirementPolicy,
}

/// Provider-recommended rotation window.
pub const DEFAULT_ROTATION_WINDOW_MONTHS: u32 = 6;

impl RotationConfig {
    /// Create configuration from environment variables
    ///
    /// `ROTAVAULT_APP_OBJECT_ID` and `ROTAVAULT_SECRET_NAME` are required;
    /// absence is a fatal configuration error raised before `rotate` runs.
    pub fn from_env() -> Result<Self> {
        let app_object_id = required_env("ROTAVAULT_APP_OBJECT_ID")?;
        let secret_name = required_env("ROTAVAULT_SECRET_NAME")?;

        let rotation_window_months = match optional_env("ROTAVAULT_ROTATION_WINDOW_MONTHS") {
            Some(raw) => raw.parse::<u32>().map_err(|e| {
                Error::config(format!("Invalid ROTAVAULT_ROTATION_WINDOW_MONTHS: {}", e))
            })?,
            None => DEFAULT_ROTATION_WINDOW_MONTHS,
        };
        if rotation_window_months == 0 {
            return Err(Error::config("ROTAVAULT_ROTATION_WINDOW_MONTHS must be at least 1"));
        }

        let retirement_policy = match optional_env("ROTAVAULT_RETIREMENT_POLICY") {
            Some(raw) => raw
                .parse::<RetirementPolicy>()
                .map_err(|e| Error::config(format!("Invalid ROTAVAULT_RETIREMENT_POLICY: {}", e)))?,
            None => RetirementPolicy::default(),
        };

        Ok(Self { app_object_id, secret_name, rotation_window_months, retirement_policy })
    }
}

/// Identity-provider directory client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Base URL of the directory API
    pub base_url: String,

    /// Bearer token presented to the directory API
    pub bearer_token: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl fmt::Debug for DirectoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("base_url", &self.base_url)
            .field("bearer_token", &"[redacted]")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl DirectoryConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = required_env("ROTAVAULT_DIRECTORY_URL")?;
        url::Url::parse(&base_url)
            .map_err(|e| Error::config(format!("Invalid ROTAVAULT_DIRECTORY_URL: {}", e)))?;

        let bearer_token = required_env("ROTAVAULT_DIRECTORY_TOKEN")?;

        let timeout_seconds = match optional_env("ROTAVAULT_DIRECTORY_TIMEOUT_SECONDS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                Error::config(format!("Invalid ROTAVAULT_DIRECTORY_TIMEOUT_SECONDS: {}", e))
            })?,
            None => 30,
        };

        Ok(Self { base_url, bearer_token, timeout_seconds })
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Secret vault client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Vault server address
    pub address: String,

    /// Vault authentication token
    pub token: Option<String>,

    /// Vault namespace (for Enterprise)
    pub namespace: Option<String>,

    /// KV v2 mount path (default: "secret")
    pub kv_mount_path: String,
}

fn default_kv_mount() -> String {
    "secret".to_string()
}

impl fmt::Debug for VaultConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultConfig")
            .field("address", &self.address)
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .field("namespace", &self.namespace)
            .field("kv_mount_path", &self.kv_mount_path)
            .finish()
    }
}

impl VaultConfig {
    /// Load configuration from environment variables
    ///
    /// Uses:
    /// - `ROTAVAULT_VAULT_ADDR` or `VAULT_ADDR` (required)
    /// - `ROTAVAULT_VAULT_TOKEN` or `VAULT_TOKEN`
    /// - `ROTAVAULT_VAULT_NAMESPACE` or `VAULT_NAMESPACE`
    /// - `ROTAVAULT_VAULT_KV_MOUNT` (default: "secret")
    pub fn from_env() -> Result<Self> {
        let address = optional_env("ROTAVAULT_VAULT_ADDR")
            .or_else(|| optional_env("VAULT_ADDR"))
            .ok_or_else(|| Error::config("ROTAVAULT_VAULT_ADDR environment variable is not set"))?;

        let token = optional_env("ROTAVAULT_VAULT_TOKEN").or_else(|| optional_env("VAULT_TOKEN"));

        let namespace =
            optional_env("ROTAVAULT_VAULT_NAMESPACE").or_else(|| optional_env("VAULT_NAMESPACE"));

        let kv_mount_path =
            optional_env("ROTAVAULT_VAULT_KV_MOUNT").unwrap_or_else(default_kv_mount);

        Ok(Self { address, token, namespace, kv_mount_path })
    }
}

/// HTTP/event trigger server configuration
#[derive(Clone)]
pub struct ApiServerConfig {
    /// Server bind address
    pub bind_address: String,

    /// Server port
    pub port: u16,

    /// Function-level access key required on trigger endpoints
    pub function_key: String,
}

impl fmt::Debug for ApiServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiServerConfig")
            .field("bind_address", &self.bind_address)
            .field("port", &self.port)
            .field("function_key", &"[redacted]")
            .finish()
    }
}

impl ApiServerConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let bind_address =
            optional_env("ROTAVAULT_API_BIND_ADDRESS").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = match optional_env("ROTAVAULT_API_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| Error::config(format!("Invalid ROTAVAULT_API_PORT: {}", e)))?,
            None => 8080,
        };

        let function_key = required_env("ROTAVAULT_API_FUNCTION_KEY")?;

        Ok(Self { bind_address, port, function_key })
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Observability configuration for structured logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,

    /// Service name reported in logs
    pub service_name: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logging: false,
            service_name: "rotavault".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: optional_env("ROTAVAULT_LOG_LEVEL").unwrap_or(defaults.log_level),
            json_logging: env_flag("ROTAVAULT_JSON_LOGGING"),
            service_name: optional_env("ROTAVAULT_SERVICE_NAME").unwrap_or(defaults.service_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    // Environment variables are process-wide; everything touching the
    // ROTAVAULT_APP_OBJECT_ID / ROTAVAULT_SECRET_NAME pair runs in one test.
    #[test]
    fn test_rotation_config_from_env() {
        env::remove_var("ROTAVAULT_APP_OBJECT_ID");
        env::remove_var("ROTAVAULT_SECRET_NAME");

        let err = RotationConfig::from_env().unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("ROTAVAULT_APP_OBJECT_ID"));

        env::set_var("ROTAVAULT_APP_OBJECT_ID", "app-1");
        env::set_var("ROTAVAULT_SECRET_NAME", "entraSecret");

        let config = RotationConfig::from_env().unwrap();
        assert_eq!(config.app_object_id, "app-1");
        assert_eq!(config.secret_name, "entraSecret");
        assert_eq!(config.rotation_window_months, DEFAULT_ROTATION_WINDOW_MONTHS);
        assert_eq!(config.retirement_policy, RetirementPolicy::CreateOnly);

        env::remove_var("ROTAVAULT_APP_OBJECT_ID");
        env::remove_var("ROTAVAULT_SECRET_NAME");
    }

    #[test]
    fn test_rotation_config_rejects_empty_value() {
        env::set_var("ROTAVAULT_APP_OBJECT_ID_EMPTY_PROBE", "  ");
        assert!(required_env("ROTAVAULT_APP_OBJECT_ID_EMPTY_PROBE").is_err());
        env::remove_var("ROTAVAULT_APP_OBJECT_ID_EMPTY_PROBE");
    }

    #[test]
    fn test_vault_config_default_mount() {
        env::set_var("ROTAVAULT_VAULT_ADDR", "http://127.0.0.1:8200");
        env::remove_var("ROTAVAULT_VAULT_KV_MOUNT");

        let config = VaultConfig::from_env().unwrap();
        assert_eq!(config.address, "http://127.0.0.1:8200");
        assert_eq!(config.kv_mount_path, "secret");

        env::remove_var("ROTAVAULT_VAULT_ADDR");
    }

    #[test]
    fn test_api_server_config_bind_address() {
        let config = ApiServerConfig {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            function_key: "key".to_string(),
        };
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_directory_config_timeout() {
        let config = DirectoryConfig {
            base_url: "https://directory.example".to_string(),
            bearer_token: "token".to_string(),
            timeout_seconds: 45,
        };
        assert_eq!(config.timeout(), Duration::from_secs(45));
    }

    #[test]
    fn test_observability_config_defaults() {
        let config = ObservabilityConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logging);
        assert_eq!(config.service_name, "rotavault");
    }

    #[test]
    fn test_redacted_debug_output() {
        let config = DirectoryConfig {
            base_url: "https://directory.example".to_string(),
            bearer_token: "super-secret".to_string(),
            timeout_seconds: 30,
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
