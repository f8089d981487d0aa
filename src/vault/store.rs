//! Vault KV v2 secret store implementation
//!
//! Writes rotated secrets into HashiCorp Vault's KV v2 engine. Each secret is
//! stored under its name inside the configured mount as
//! `{ "value": <secret>, "expires_at": <rfc3339> }`; KV v2 versioning makes a
//! repeated write a pure overwrite by name (last write wins).

use async_trait::async_trait;
use tracing::{debug, error, info};
use vaultrs::client::{VaultClient, VaultClientSettingsBuilder};
use vaultrs::kv2;

use crate::config::VaultConfig;
use crate::errors::{Error, Result};

use super::{SecretVault, StoredSecret};

/// HashiCorp Vault secret store
pub struct VaultSecretStore {
    client: VaultClient,
    kv_mount_path: String,
}

impl std::fmt::Debug for VaultSecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultSecretStore")
            .field("kv_mount_path", &self.kv_mount_path)
            .field("client", &"[VaultClient]")
            .finish()
    }
}

impl VaultSecretStore {
    /// Create a new vault store with the given configuration
    pub fn new(config: VaultConfig) -> Result<Self> {
        let mut settings_builder = VaultClientSettingsBuilder::default();
        settings_builder.address(&config.address);

        if let Some(ref token) = config.token {
            settings_builder.token(token);
        }

        if let Some(ref namespace) = config.namespace {
            settings_builder.namespace(Some(namespace.clone()));
        }

        let settings = settings_builder
            .build()
            .map_err(|e| Error::config(format!("Invalid vault configuration: {}", e)))?;

        let client = VaultClient::new(settings)
            .map_err(|e| Error::config(format!("Failed to create vault client: {}", e)))?;

        info!(address = %config.address, kv_mount = %config.kv_mount_path, "Initialized vault secret store");

        Ok(Self { client, kv_mount_path: config.kv_mount_path })
    }

    /// Create a store from environment configuration
    pub fn from_env() -> Result<Self> {
        Self::new(VaultConfig::from_env()?)
    }
}

#[async_trait]
impl SecretVault for VaultSecretStore {
    async fn put(&self, secret: StoredSecret) -> Result<()> {
        debug!(
            secret_name = %secret.name,
            kv_mount = %self.kv_mount_path,
            expires_at = %secret.expires_at,
            "Writing rotated secret to vault"
        );

        let data = serde_json::json!({
            "value": secret.value.expose(),
            "expires_at": secret.expires_at.to_rfc3339(),
        });

        kv2::set(&self.client, &self.kv_mount_path, &secret.name, &data).await.map_err(|e| {
            error!(
                secret_name = %secret.name,
                error = %e,
                "Failed to write secret to vault"
            );
            Error::persistence(format!("Vault write for '{}' failed: {}", secret.name, e))
        })?;

        info!(secret_name = %secret.name, "Rotated secret stored in vault");
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        vaultrs::sys::health(&self.client)
            .await
            .map_err(|e| Error::transport(format!("Vault health check failed: {}", e)))?;
        Ok(())
    }
}
