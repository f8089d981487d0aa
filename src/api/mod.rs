//! # HTTP Trigger Surface
//!
//! Axum server exposing the rotation workflow: `/rotate` (GET or POST) runs
//! one rotation, `/events` accepts a batch of expiry notifications, and
//! `/health` reports vault reachability. The trigger endpoints require a
//! function-level access key.

mod auth;
mod error;
mod handlers;
mod routes;
mod server;

pub use auth::FunctionKey;
pub use error::ApiError;
pub use routes::{build_router, ApiState};
pub use server::start_api_server;
