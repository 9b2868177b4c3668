use axum::http::{HeaderName, HeaderValue, Method, header::InvalidHeaderValue};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::api_key::API_KEY_HEADER;

/// Parse a comma-separated origin list such as
/// `http://localhost:3000, https://app.example.com`.
///
/// Blank entries are skipped; an empty result means "any origin".
pub fn parse_allowed_origins(raw: &str) -> Result<Vec<HeaderValue>, InvalidHeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(HeaderValue::from_str)
        .collect()
}

/// Creates a CORS layer for the task API.
///
/// # Arguments
/// * `allowed_origins` - Origins allowed to call the API; empty allows any origin
///
/// # Returns
/// A configured `CorsLayer` with:
/// - Methods GET, POST, PUT, DELETE, PATCH, OPTIONS
/// - Headers Content-Type, Authorization, Accept, X-API-Key
/// - 1 hour max age
pub fn create_cors_layer(allowed_origins: &[HeaderValue]) -> CorsLayer {
    let allow_origin = if allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(allowed_origins.iter().cloned())
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
            HeaderName::from_static(API_KEY_HEADER),
        ])
        .max_age(Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    #[test]
    fn test_parse_allowed_origins() {
        let origins =
            parse_allowed_origins("http://localhost:3000, https://app.example.com,,").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "http://localhost:3000");
        assert_eq!(origins[1], "https://app.example.com");
    }

    #[test]
    fn test_parse_allowed_origins_empty() {
        assert!(parse_allowed_origins("  ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_allowed_origins_rejects_control_chars() {
        assert!(parse_allowed_origins("http://bad\norigin").is_err());
    }

    async fn preflight(layer: CorsLayer, origin: &str) -> axum::response::Response {
        Router::new()
            .route("/api/tasks", get(|| async { "ok" }))
            .layer(layer)
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/tasks")
                    .header("origin", origin)
                    .header("access-control-request-method", "DELETE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_any_origin_when_unconfigured() {
        let response = preflight(create_cors_layer(&[]), "https://anywhere.test").await;
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            HeaderValue::from_static("*")
        );
    }

    #[tokio::test]
    async fn test_listed_origin_is_echoed() {
        let origins = parse_allowed_origins("https://app.example.com").unwrap();
        let response = preflight(create_cors_layer(&origins), "https://app.example.com").await;
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            HeaderValue::from_static("https://app.example.com")
        );
    }

    #[tokio::test]
    async fn test_unlisted_origin_gets_no_allow_header() {
        let origins = parse_allowed_origins("https://app.example.com").unwrap();
        let response = preflight(create_cors_layer(&origins), "https://evil.test").await;
        assert!(
            response
                .headers()
                .get("access-control-allow-origin")
                .is_none()
        );
    }
}
