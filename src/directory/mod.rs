//! # Identity-Provider Directory Adapter
//!
//! Credential CRUD against the remote directory service that owns application
//! identities. The [`CredentialStore`] trait is the seam the rotation
//! workflow drives; [`HttpDirectoryClient`] is the production implementation
//! speaking a Graph-style application-credential API.
//!
//! Secret material returned by [`CredentialStore::create`] is wrapped in
//! [`SecretValue`] and exists only transiently between issuance and the vault
//! write; it is never logged and never persisted by this crate.

mod client;
mod http;
mod types;

pub use client::CredentialStore;
pub use http::HttpDirectoryClient;
pub use types::{CredentialRecord, NewCredentialMaterial, SecretValue};
