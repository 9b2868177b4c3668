use axum::{
    extract::{Request, State},
    http::{
        HeaderValue,
        header::{self, HeaderName},
    },
    middleware::Next,
    response::Response,
};

/// Which optional security headers to send
#[derive(Clone, Copy, Debug, Default)]
pub struct SecurityPolicy {
    /// Send `Strict-Transport-Security` (only behind HTTPS)
    pub hsts: bool,
}

impl SecurityPolicy {
    pub fn with_hsts(hsts: bool) -> Self {
        Self { hsts }
    }
}

// Documentation UIs load scripts and styles, so the lockdown CSP only covers JSON routes
fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

/// Middleware that adds security headers to all responses.
///
/// Adds the following headers:
/// - X-Content-Type-Options: nosniff
/// - X-Frame-Options: DENY
/// - X-XSS-Protection: 1; mode=block
/// - Referrer-Policy: no-referrer
/// - Permissions-Policy: geolocation=(), microphone=(), camera=()
/// - Cache-Control: no-store (unless the handler set its own)
/// - Content-Security-Policy: default-src 'none'; frame-ancestors 'none' (under `/api`)
/// - Strict-Transport-Security (when the policy enables HSTS)
pub async fn security_headers(
    State(policy): State<SecurityPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let api_route = is_api_path(request.uri().path());
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        HeaderName::from_static("x-xss-protection"),
        HeaderValue::from_static("1; mode=block"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    );
    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static("geolocation=(), microphone=(), camera=()"),
    );
    if !headers.contains_key(header::CACHE_CONTROL) {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }
    if api_route {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        );
    }
    if policy.hsts {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, middleware, routing::get};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn get_with(policy: SecurityPolicy, uri: &str) -> Response {
        Router::new()
            .route("/api/tasks", get(|| async { "[]" }))
            .route("/swagger-ui", get(|| async { "<html></html>" }))
            .layer(middleware::from_fn_with_state(policy, security_headers))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_api_routes_get_full_header_set() {
        let response = get_with(SecurityPolicy::default(), "/api/tasks").await;
        let headers = response.headers();

        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["referrer-policy"], "no-referrer");
        assert_eq!(headers["cache-control"], "no-store");
        assert_eq!(
            headers["content-security-policy"],
            "default-src 'none'; frame-ancestors 'none'"
        );
        assert!(headers.get("strict-transport-security").is_none());
    }

    #[tokio::test]
    async fn test_docs_routes_skip_csp() {
        let response = get_with(SecurityPolicy::default(), "/swagger-ui").await;
        assert!(response.headers().get("content-security-policy").is_none());
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_hsts_when_enabled() {
        let response = get_with(SecurityPolicy::with_hsts(true), "/api/tasks").await;
        assert_eq!(
            response.headers()["strict-transport-security"],
            "max-age=31536000; includeSubDomains"
        );
    }

    #[test]
    fn test_is_api_path() {
        assert!(is_api_path("/api"));
        assert!(is_api_path("/api/tasks/507f1f77bcf86cd799439011"));
        assert!(!is_api_path("/api-docs/openapi.json"));
        assert!(!is_api_path("/health"));
    }
}
