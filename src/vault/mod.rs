//! # Secret Vault Adapter
//!
//! Durable storage for rotated secret values. The [`SecretVault`] trait is
//! the seam the rotation workflow writes through; [`VaultSecretStore`] is the
//! production implementation backed by HashiCorp Vault KV v2.
//!
//! A successful vault write is the single durability boundary of a rotation:
//! once `put` returns, the new credential is the active one.

mod store;

pub use store::VaultSecretStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::directory::SecretValue;
use crate::errors::Result;

/// The vault-side representation of a rotated secret.
///
/// One stored secret corresponds to one successful rotation outcome; writing
/// the same `name` again overwrites.
#[derive(Debug)]
pub struct StoredSecret {
    pub name: String,
    pub value: SecretValue,
    pub expires_at: DateTime<Utc>,
}

/// Trait for secret vaults
///
/// Implementations must be Send + Sync for use in async contexts.
#[async_trait]
pub trait SecretVault: Send + Sync + std::fmt::Debug {
    /// Write a secret, overwriting any existing secret with the same name
    ///
    /// Consumes the secret: the material cannot be reused after the write.
    async fn put(&self, secret: StoredSecret) -> Result<()>;

    /// Perform a health check on the vault
    async fn health_check(&self) -> Result<()>;
}
