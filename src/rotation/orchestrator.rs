//! Rotation orchestrator.
//!
//! Drives one rotation attempt: optionally retire the soonest-expiring
//! credential, issue a replacement at the directory, store its value in the
//! vault. Each step's result gates the next; there are no internal retries,
//! since redelivery is the trigger's responsibility.

use std::sync::Arc;

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use validator::Validate;

use crate::config::RotationConfig;
use crate::directory::CredentialStore;
use crate::errors::{Error, Result};
use crate::vault::{SecretVault, StoredSecret};

use super::outcome::{PhaseOutcome, RotationOutcome};
use super::policy::RetirementPolicy;

/// Parameters of one rotation invocation
///
/// Assembled by a trigger adapter from its configuration; the target vault is
/// carried by the [`SecretVault`] instance the trigger constructed.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RotationRequest {
    /// Object ID of the application whose credential is rotated
    #[validate(length(min = 1, message = "Application object ID cannot be empty"))]
    pub app_object_id: String,

    /// Display name of the new credential and name of the vault secret
    #[validate(length(min = 1, message = "Secret name cannot be empty"))]
    pub secret_name: String,

    /// Lifetime of the issued credential, in calendar months
    #[validate(range(min = 1, message = "Rotation window must be at least one month"))]
    pub rotation_window_months: u32,

    /// Whether the soonest-expiring prior credential is deleted first
    pub policy: RetirementPolicy,
}

impl From<&RotationConfig> for RotationRequest {
    fn from(config: &RotationConfig) -> Self {
        Self {
            app_object_id: config.app_object_id.clone(),
            secret_name: config.secret_name.clone(),
            rotation_window_months: config.rotation_window_months,
            policy: config.retirement_policy,
        }
    }
}

/// Rotation orchestrator
///
/// Holds the two remote adapters and nothing else; every invocation is an
/// independent attempt with its own secret material, so concurrent rotations
/// for the same application are safe by construction (the remote systems are
/// the only serialization points).
pub struct Rotator {
    store: Arc<dyn CredentialStore>,
    vault: Arc<dyn SecretVault>,
}

impl std::fmt::Debug for Rotator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rotator").field("store", &self.store).field("vault", &self.vault).finish()
    }
}

impl Rotator {
    pub fn new(store: Arc<dyn CredentialStore>, vault: Arc<dyn SecretVault>) -> Self {
        Self { store, vault }
    }

    /// Run one rotation attempt
    ///
    /// Returns `Err` only for an invalid request or an application the
    /// directory does not know; phase failures are reported inside the
    /// [`RotationOutcome`] so the caller can distinguish degraded from failed
    /// from fully rotated.
    pub async fn rotate(&self, request: &RotationRequest) -> Result<RotationOutcome> {
        request.validate().map_err(Error::from)?;

        let expires_at = credential_expiry(Utc::now(), request.rotation_window_months)?;

        info!(
            app_id = %request.app_object_id,
            secret_name = %request.secret_name,
            policy = %request.policy,
            expires_at = %expires_at,
            "Starting credential rotation"
        );

        let retirement = match request.policy {
            RetirementPolicy::CreateOnly => {
                debug!(app_id = %request.app_object_id, "Retirement disabled by policy");
                PhaseOutcome::Skipped
            }
            RetirementPolicy::RetireOldestFirst => {
                self.retire_oldest(&request.app_object_id).await?
            }
        };

        let material = match self
            .store
            .create(&request.app_object_id, &request.secret_name, expires_at)
            .await
        {
            Ok(material) => material,
            Err(err @ Error::NotFound { .. }) => return Err(err),
            Err(err) => {
                error!(
                    app_id = %request.app_object_id,
                    secret_name = %request.secret_name,
                    error = %err,
                    "Credential issuance failed; persistence skipped"
                );
                return Ok(RotationOutcome {
                    retirement,
                    issuance: PhaseOutcome::failed(err.to_string()),
                    persistence: PhaseOutcome::Skipped,
                });
            }
        };

        // No vault write ever happens with empty material.
        if material.secret_value.is_empty() {
            error!(
                app_id = %request.app_object_id,
                secret_name = %request.secret_name,
                "Issued credential carries no secret value; persistence skipped"
            );
            return Ok(RotationOutcome {
                retirement,
                issuance: PhaseOutcome::failed("issued credential carries no secret value"),
                persistence: PhaseOutcome::Skipped,
            });
        }

        info!(
            app_id = %request.app_object_id,
            secret_name = %request.secret_name,
            expires_at = %material.expires_at,
            "Issued replacement credential"
        );

        let persistence = match self
            .vault
            .put(StoredSecret {
                name: request.secret_name.clone(),
                value: material.secret_value,
                expires_at: material.expires_at,
            })
            .await
        {
            Ok(()) => PhaseOutcome::Completed,
            Err(err) => {
                // The issued credential is not rolled back: it remains valid
                // at the directory, so a full retry is safe.
                error!(
                    app_id = %request.app_object_id,
                    secret_name = %request.secret_name,
                    error = %err,
                    "Vault write failed; issued credential remains registered"
                );
                PhaseOutcome::failed(err.to_string())
            }
        };

        Ok(RotationOutcome { retirement, issuance: PhaseOutcome::Completed, persistence })
    }

    /// Delete the soonest-expiring credential, if any
    ///
    /// Absence of prior credentials is not a failure. A failed list or
    /// delete leaves the credential in place and is reported in the outcome,
    /// but does not fail the rotation; the record can be cleaned up on a
    /// later run. An unknown application aborts the invocation.
    async fn retire_oldest(&self, app_id: &str) -> Result<PhaseOutcome> {
        let records = match self.store.list(app_id).await {
            Ok(records) => records,
            Err(err @ Error::NotFound { .. }) => return Err(err),
            Err(err) => {
                warn!(
                    app_id = %app_id,
                    error = %err,
                    "Could not list credentials; retirement skipped"
                );
                return Ok(PhaseOutcome::failed(err.to_string()));
            }
        };

        let Some(oldest) = records.iter().min_by_key(|record| record.expires_at) else {
            info!(app_id = %app_id, "No existing credentials; retirement skipped");
            return Ok(PhaseOutcome::Skipped);
        };

        match self.store.delete(app_id, &oldest.key_id).await {
            Ok(()) => {
                info!(
                    app_id = %app_id,
                    key_id = %oldest.key_id,
                    expires_at = %oldest.expires_at,
                    "Retired soonest-expiring credential"
                );
                Ok(PhaseOutcome::Completed)
            }
            Err(err) => {
                warn!(
                    app_id = %app_id,
                    key_id = %oldest.key_id,
                    error = %err,
                    "Failed to retire credential; it remains registered"
                );
                Ok(PhaseOutcome::failed(err.to_string()))
            }
        }
    }
}

/// Expiry of a credential issued now, `months` calendar months out.
fn credential_expiry(now: DateTime<Utc>, months: u32) -> Result<DateTime<Utc>> {
    now.checked_add_months(Months::new(months))
        .ok_or_else(|| Error::validation(format!("Rotation window of {} months overflows", months)))
}
