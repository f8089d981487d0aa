//! # Error Handling
//!
//! Error types for the rotation service, defined with `thiserror`. A single
//! crate-wide [`Error`] covers configuration resolution, the two remote
//! adapters, and the rotation workflow itself.

mod types;

pub use types::{Error, Result};
