//! # Rotavault
//!
//! Rotavault rotates an application's client credential: it issues a new
//! credential with a bounded lifetime at an identity-provider directory,
//! persists the secret value in a vault, and optionally retires the
//! soonest-expiring prior credential, so dependent services never operate
//! with an expired credential.
//!
//! ## Architecture
//!
//! ```text
//! Triggers (CLI / scheduler / HTTP / events)
//!        ↓
//! Rotation Orchestrator
//!        ↓                    ↓
//! Directory Adapter     Vault Adapter
//! (credential CRUD)     (secret storage)
//! ```
//!
//! The orchestrator reads credential metadata from the directory, produces a
//! new secret value, and writes it through the vault adapter; no other
//! component touches secret material, and the material never outlives the
//! invocation that issued it.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rotavault::{
//!     Config, HttpDirectoryClient, Result, RotationRequest, Rotator, VaultSecretStore,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::from_env()?;
//!     let store = Arc::new(HttpDirectoryClient::new(config.directory.clone())?);
//!     let vault = Arc::new(VaultSecretStore::new(config.vault.clone())?);
//!     let rotator = Rotator::new(store, vault);
//!
//!     let outcome = rotator.rotate(&RotationRequest::from(&config.rotation)).await?;
//!     println!("stored new secret: {}", outcome.stored());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod directory;
pub mod errors;
pub mod events;
pub mod observability;
pub mod rotation;
pub mod vault;

// Re-export commonly used types and traits
pub use config::{Config, ObservabilityConfig};
pub use directory::{CredentialStore, HttpDirectoryClient};
pub use errors::{Error, Result};
pub use observability::init_logging;
pub use rotation::{RetirementPolicy, RotationOutcome, RotationRequest, Rotator};
pub use vault::{SecretVault, VaultSecretStore};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
