//! # Configuration Management
//!
//! Environment-driven configuration for the rotation service. Every trigger
//! (CLI, scheduler, HTTP, events) resolves its parameters from here; a missing
//! or empty required value is a fatal configuration error raised before any
//! remote system is touched.

mod settings;

pub use settings::{
    ApiServerConfig, Config, DirectoryConfig, ObservabilityConfig, RotationConfig, VaultConfig,
};
