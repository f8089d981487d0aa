//! # Rotation Workflow
//!
//! The core of the service: decides which credential to act on, drives the
//! directory and vault adapters in the correct order, and reports per-phase
//! results so callers can tell a degraded-but-safe rotation from one that
//! must be retried.
//!
//! A rotation is one linear phase sequence (optional retirement, issuance,
//! persistence) with no internal retries and no shared mutable state. The
//! issued secret material is threaded by value from issuance into persistence
//! and consumed there.

mod orchestrator;
mod outcome;
mod policy;

pub use orchestrator::{RotationRequest, Rotator};
pub use outcome::{PhaseOutcome, RotationOutcome};
pub use policy::RetirementPolicy;
