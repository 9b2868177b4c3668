use axum::{extract::ConnectInfo, http::Request};
use std::net::SocketAddr;

/// Identify the calling client for per-client limits.
///
/// Checks `X-Forwarded-For` (first hop), then `X-Real-IP`, then the peer
/// address recorded by `into_make_service_with_connect_info`. Falls back to
/// `"unknown"` so every request still gets a bucket.
pub fn client_key<B>(request: &Request<B>) -> String {
    let headers = request.headers();

    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .map(str::to_string)
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> axum::http::request::Builder {
        Request::builder().uri("/api/tasks")
    }

    #[test]
    fn test_forwarded_for_first_hop_wins() {
        let req = request()
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .header("x-real-ip", "198.51.100.2")
            .body(())
            .unwrap();
        assert_eq!(client_key(&req), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_fallback() {
        let req = request()
            .header("x-real-ip", "198.51.100.2")
            .body(())
            .unwrap();
        assert_eq!(client_key(&req), "198.51.100.2");
    }

    #[test]
    fn test_peer_address_fallback() {
        let mut req = request().body(()).unwrap();
        req.extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 10], 51000))));
        assert_eq!(client_key(&req), "192.0.2.10");
    }

    #[test]
    fn test_unknown_without_any_source() {
        let req = request().body(()).unwrap();
        assert_eq!(client_key(&req), "unknown");
    }
}
