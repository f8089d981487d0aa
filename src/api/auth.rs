//! Function-key authentication for the trigger endpoints.
//!
//! The key is accepted from the `x-functions-key` header or the `code` query
//! parameter and compared in constant time.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;
use tracing::{info_span, warn};

use super::error::ApiError;

/// Function-level access key required on trigger endpoints
pub struct FunctionKey(String);

impl FunctionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Constant-time comparison against a presented key
    pub fn verify(&self, presented: &str) -> bool {
        self.0.as_bytes().ct_eq(presented.as_bytes()).into()
    }
}

impl std::fmt::Debug for FunctionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FunctionKey([redacted])")
    }
}

pub type FunctionKeyState = Arc<FunctionKey>;

/// Middleware entry point that checks the function key on every request.
pub async fn require_function_key(
    State(key): State<FunctionKeyState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let correlation_id = uuid::Uuid::new_v4();
    let span = info_span!(
        "api.require_function_key",
        http.method = %method,
        http.path = %path,
        correlation_id = %correlation_id
    );

    let presented = request
        .headers()
        .get("x-functions-key")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .or_else(|| key_from_query(request.uri().query()));

    match presented {
        Some(candidate) if key.verify(&candidate) => Ok(next.run(request).await),
        Some(_) => {
            span.in_scope(|| warn!("request rejected: invalid function key"));
            Err(ApiError::unauthorized("Unauthorized: invalid function key"))
        }
        None => {
            span.in_scope(|| warn!("request rejected: missing function key"));
            Err(ApiError::unauthorized("Unauthorized: missing function key"))
        }
    }
}

fn key_from_query(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == "code")
        .map(|(_, value)| value.into_owned())
}
