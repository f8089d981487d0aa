//! Credential store trait.
//!
//! Defines the interface the rotation workflow uses to read, issue and retire
//! application credentials at the identity provider.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::Result;

use super::types::{CredentialRecord, NewCredentialMaterial};

/// Trait for identity-provider credential stores
///
/// Implementations must be Send + Sync for use in async contexts.
#[async_trait]
pub trait CredentialStore: Send + Sync + std::fmt::Debug {
    /// List the credentials currently registered for an application
    ///
    /// An application with no credentials yields an empty list; an unknown
    /// application yields `Error::NotFound`.
    async fn list(&self, app_id: &str) -> Result<Vec<CredentialRecord>>;

    /// Issue a new credential for an application
    ///
    /// Returns the freshly issued material, including the secret value. A
    /// provider response without a usable secret value is an
    /// `Error::Issuance`; the caller never sees empty material.
    async fn create(
        &self,
        app_id: &str,
        display_name: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<NewCredentialMaterial>;

    /// Delete a credential by its key ID
    async fn delete(&self, app_id: &str, key_id: &str) -> Result<()>;
}
