use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::errors::AppError;

/// Request header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// The key clients must present
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        Self(key.into())
    }

    /// Compare against a presented key.
    ///
    /// Keys of equal length take the same time whichever bytes differ; a
    /// length mismatch returns early, so only the length can leak.
    fn matches(&self, presented: &[u8]) -> bool {
        let expected = self.0.as_bytes();
        expected.len() == presented.len()
            && expected
                .iter()
                .zip(presented)
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// API key authentication middleware
///
/// Missing `X-API-Key` → 401, wrong key → 403.
///
/// # Example
///
/// ```ignore
/// let api_routes = Router::new()
///     .route("/tasks", get(list_tasks))
///     .layer(axum::middleware::from_fn_with_state(
///         ApiKey::new(config.api_key),
///         api_key_middleware,
///     ));
/// ```
pub async fn api_key_middleware(
    State(expected): State<ApiKey>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(presented) = request.headers().get(API_KEY_HEADER) else {
        tracing::debug!("No API key in request");
        return Err(AppError::Unauthorized("API key required".to_string()));
    };

    if !expected.matches(presented.as_bytes()) {
        tracing::debug!("API key mismatch");
        return Err(AppError::Forbidden("Invalid API key".to_string()));
    }

    Ok(next.run(request).await)
}
