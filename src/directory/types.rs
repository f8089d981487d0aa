//! Credential metadata and secret material types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// A secret value held only in process memory.
///
/// The backing buffer is zeroed on drop and the `Debug` representation is
/// redacted. There is deliberately no `Display` impl and no serde support:
/// the only way the value leaves the process is through a vault write.
#[derive(Clone)]
pub struct SecretValue(Zeroizing<String>);

impl SecretValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Borrow the raw secret for handing to a vault client.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretValue([redacted])")
    }
}

impl From<String> for SecretValue {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Metadata of a credential currently registered with the identity provider.
///
/// Owned by the directory; only read (and selectively deleted) here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub key_id: String,

    #[serde(default)]
    pub display_name: String,

    #[serde(rename = "endDateTime")]
    pub expires_at: DateTime<Utc>,
}

/// A freshly issued credential.
///
/// Produced by [`super::CredentialStore::create`] and consumed exactly once by
/// the vault write. Not `Clone`: the material must not outlive the rotation
/// invocation that issued it.
#[derive(Debug)]
pub struct NewCredentialMaterial {
    pub display_name: String,
    pub expires_at: DateTime<Utc>,
    pub secret_value: SecretValue,
}
