use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::rotation::{RotationRequest, Rotator};
use crate::vault::SecretVault;

use super::auth::{require_function_key, FunctionKey};
use super::handlers::{events_handler, health_handler, rotate_handler};

#[derive(Clone)]
pub struct ApiState {
    pub rotator: Arc<Rotator>,
    /// Parameters applied to every trigger-initiated rotation
    pub request: Arc<RotationRequest>,
    /// Vault handle for the health endpoint
    pub vault: Arc<dyn SecretVault>,
}

pub fn build_router(state: ApiState, function_key: Arc<FunctionKey>) -> Router {
    let auth_layer = middleware::from_fn_with_state(function_key, require_function_key);

    let triggers = Router::new()
        .route("/rotate", get(rotate_handler).post(rotate_handler))
        .route("/events", post(events_handler))
        .route_layer(auth_layer);

    Router::new()
        .merge(triggers)
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
