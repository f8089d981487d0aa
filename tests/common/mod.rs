//! Shared fakes for integration tests: in-memory recording collaborators for
//! the directory and vault adapters.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use rotavault::directory::{CredentialRecord, CredentialStore, NewCredentialMaterial, SecretValue};
use rotavault::errors::{Error, Result};
use rotavault::rotation::{RetirementPolicy, RotationRequest, Rotator};
use rotavault::vault::{SecretVault, StoredSecret};

/// In-memory credential store that records every mutation.
#[derive(Debug, Default)]
pub struct FakeDirectory {
    pub records: Mutex<Vec<CredentialRecord>>,
    pub deleted: Mutex<Vec<String>>,
    /// Value to hand out on the next `create` instead of a generated one
    pub next_secret: Mutex<Option<String>>,
    pub fail_list: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_delete: AtomicBool,
    /// Report the application itself as unknown
    pub unknown_app: AtomicBool,
    issued: AtomicUsize,
}

impl FakeDirectory {
    pub fn with_records(records: Vec<CredentialRecord>) -> Self {
        Self { records: Mutex::new(records), ..Default::default() }
    }

    pub fn script_next_secret(&self, value: &str) {
        *self.next_secret.lock().unwrap() = Some(value.to_string());
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl CredentialStore for FakeDirectory {
    async fn list(&self, app_id: &str) -> Result<Vec<CredentialRecord>> {
        if self.unknown_app.load(Ordering::SeqCst) {
            return Err(Error::not_found("application", app_id));
        }
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Error::transport("simulated list failure"));
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn create(
        &self,
        app_id: &str,
        display_name: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<NewCredentialMaterial> {
        if self.unknown_app.load(Ordering::SeqCst) {
            return Err(Error::not_found("application", app_id));
        }
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(Error::issuance("simulated issuance failure"));
        }

        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let secret =
            self.next_secret.lock().unwrap().take().unwrap_or_else(|| format!("secret-{}", n));

        self.records.lock().unwrap().push(CredentialRecord {
            key_id: format!("key-{}", n),
            display_name: display_name.to_string(),
            expires_at,
        });

        Ok(NewCredentialMaterial {
            display_name: display_name.to_string(),
            expires_at,
            secret_value: SecretValue::new(secret),
        })
    }

    async fn delete(&self, _app_id: &str, key_id: &str) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Error::transport("simulated delete failure"));
        }

        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|record| record.key_id != key_id);
        if records.len() == before {
            return Err(Error::not_found("credential", key_id));
        }

        self.deleted.lock().unwrap().push(key_id.to_string());
        Ok(())
    }
}

/// In-memory vault that records whether and what was written.
#[derive(Debug, Default)]
pub struct FakeVault {
    pub secrets: Mutex<BTreeMap<String, (String, DateTime<Utc>)>>,
    pub put_calls: AtomicUsize,
    pub fail_puts: AtomicBool,
    pub fail_health: AtomicBool,
}

impl FakeVault {
    pub fn stored_value(&self, name: &str) -> Option<String> {
        self.secrets.lock().unwrap().get(name).map(|(value, _)| value.clone())
    }

    pub fn put_count(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretVault for FakeVault {
    async fn put(&self, secret: StoredSecret) -> Result<()> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(Error::persistence("simulated vault write failure"));
        }

        self.secrets
            .lock()
            .unwrap()
            .insert(secret.name, (secret.value.expose().to_string(), secret.expires_at));
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        if self.fail_health.load(Ordering::SeqCst) {
            return Err(Error::transport("simulated vault outage"));
        }
        Ok(())
    }
}

/// A credential record expiring `days` from now.
pub fn record_expiring_in(key_id: &str, days: i64) -> CredentialRecord {
    CredentialRecord {
        key_id: key_id.to_string(),
        display_name: "entraSecret".to_string(),
        expires_at: Utc::now() + Duration::days(days),
    }
}

/// The standard test request: `app-1` / `entraSecret` / 6 months.
pub fn request(policy: RetirementPolicy) -> RotationRequest {
    RotationRequest {
        app_object_id: "app-1".to_string(),
        secret_name: "entraSecret".to_string(),
        rotation_window_months: 6,
        policy,
    }
}

/// Wire a rotator around fakes, keeping handles for assertions.
pub fn rotator_with_fakes() -> (Arc<FakeDirectory>, Arc<FakeVault>, Rotator) {
    let directory = Arc::new(FakeDirectory::default());
    let vault = Arc::new(FakeVault::default());
    let rotator = Rotator::new(directory.clone(), vault.clone());
    (directory, vault, rotator)
}
