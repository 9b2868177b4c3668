//! HTTP middleware module.
//!
//! This module provides HTTP-level middleware for:
//! - CORS configuration
//! - Security headers
//! - Per-client rate limiting
//! - API key authentication
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{api_key_middleware, create_cors_layer, security_headers, ApiKey, SecurityPolicy};
//!
//! let api = Router::new()
//!     .route("/tasks", get(list_tasks))
//!     .layer(axum::middleware::from_fn_with_state(ApiKey::new(key), api_key_middleware));
//!
//! let app = Router::new()
//!     .nest("/api", api)
//!     .layer(axum::middleware::from_fn_with_state(SecurityPolicy::default(), security_headers))
//!     .layer(create_cors_layer(&origins));
//! ```

pub mod api_key;
pub mod client_ip;
pub mod cors;
pub mod rate_limit;
pub mod security;

// Re-export commonly used functions
pub use api_key::{API_KEY_HEADER, ApiKey, api_key_middleware};
pub use client_ip::client_key;
pub use cors::{create_cors_layer, parse_allowed_origins};
pub use rate_limit::{ClientRateLimiter, RateLimitConfig, rate_limit_middleware};
pub use security::{SecurityPolicy, security_headers};
