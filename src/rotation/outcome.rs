//! Per-phase rotation results.

use serde::{Deserialize, Serialize};

/// Result of one rotation phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PhaseOutcome {
    /// The phase did not run (disabled by policy, nothing to act on, or a
    /// preceding phase failed)
    Skipped,
    /// The phase completed
    Completed,
    /// The phase ran and failed
    Failed { error: String },
}

impl PhaseOutcome {
    pub fn failed<S: Into<String>>(error: S) -> Self {
        Self::Failed { error: error.into() }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Outcome of one rotation invocation
///
/// Reports which phases executed and their individual results rather than a
/// single boolean, so callers can distinguish "new secret stored, old one
/// still present" (degraded but safe) from "nothing happened" (unsafe, must
/// retry) from "new secret stored, old one removed" (fully rotated).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationOutcome {
    pub retirement: PhaseOutcome,
    pub issuance: PhaseOutcome,
    pub persistence: PhaseOutcome,
}

impl RotationOutcome {
    /// The new secret is durably stored
    ///
    /// Once true, the new credential is the active one regardless of what
    /// happened to the old record.
    pub fn stored(&self) -> bool {
        self.persistence.is_completed()
    }

    /// The new secret is stored and the old credential was removed
    pub fn fully_rotated(&self) -> bool {
        self.retirement.is_completed() && self.stored()
    }

    /// No new secret was made active; the invocation must be retried
    pub fn failed(&self) -> bool {
        self.issuance.is_failed() || self.persistence.is_failed()
    }
}
