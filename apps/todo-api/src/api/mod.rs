//! API routes module

pub mod health;
pub mod home;
pub mod tasks;

use axum::{Router, middleware};
use axum_helpers::{ClientRateLimiter, api_key_middleware, rate_limit_middleware};
use observability::metrics_middleware;

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
///
/// Layers, outermost first: request metrics, rate limiting, API key.
pub fn routes(state: &AppState, rate_limiter: Option<ClientRateLimiter>) -> Router {
    let router = Router::new().nest("/tasks", tasks::router(state));

    let router = match &state.config.http.api_key {
        Some(key) => router.layer(middleware::from_fn_with_state(
            key.clone(),
            api_key_middleware,
        )),
        None => router,
    };

    let router = match rate_limiter {
        Some(limiter) => router.layer(middleware::from_fn_with_state(
            limiter,
            rate_limit_middleware,
        )),
        None => router,
    };

    // outermost, so 401/403/429 rejections are counted too
    router.layer(middleware::from_fn(metrics_middleware))
}

/// Routes served outside `/api`
pub fn public_routes(state: &AppState) -> Router {
    Router::new()
        .merge(home::router())
        .merge(health::router(state.clone()))
        .route("/metrics", axum::routing::get(observability::metrics_handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment, HttpConfig, TasksConfig};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_helpers::{ApiKey, RateLimitConfig, RouterConfig, create_router};
    use core_config::server::ServerConfig;
    use database::mongodb::MongoConfig;
    use std::num::NonZeroU32;
    use std::time::Duration;
    use tower::ServiceExt;

    // The driver connects lazily, so no server is needed until a query runs
    async fn state(api_key: Option<&str>) -> AppState {
        let mongodb = MongoConfig::new("mongodb://localhost:27017");
        let mongo_client = mongodb::Client::with_uri_str(mongodb.url()).await.unwrap();
        let db = mongo_client.database(mongodb.database());

        AppState {
            config: Config {
                app: core_config::app_info!(),
                mongodb,
                server: ServerConfig::new("127.0.0.1".to_string(), 0),
                environment: Environment::Development,
                tasks: TasksConfig {
                    collection: "tasks".to_string(),
                    store_timeout: Duration::from_millis(100),
                },
                http: HttpConfig {
                    allowed_origins: Vec::new(),
                    api_key: api_key.map(ApiKey::new),
                    rate_limit: RateLimitConfig::default(),
                    shutdown_timeout: Duration::from_secs(1),
                },
            },
            mongo_client,
            db,
        }
    }

    #[tokio::test]
    async fn test_api_key_guards_task_routes() {
        let app = routes(&state(Some("s3cret")).await, None);

        let missing = app
            .clone()
            .oneshot(Request::builder().uri("/tasks").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let wrong = app
            .oneshot(
                Request::builder()
                    .uri("/tasks")
                    .header("x-api-key", "guess")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_malformed_id_is_rejected_before_store() {
        let app = routes(&state(None).await, None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/tasks/not-24-hex-chars")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header("x-forwarded-for", "203.0.113.9")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_rate_limited_requests_are_counted() {
        observability::init_metrics().unwrap();
        let limiter = ClientRateLimiter::new(RateLimitConfig {
            per_second: NonZeroU32::new(1).unwrap(),
            burst: NonZeroU32::new(1).unwrap(),
        });
        let app = routes(&state(None).await, Some(limiter));

        // Malformed ids are answered without touching the store
        let first = app.clone().oneshot(get("/tasks/not-an-id")).await.unwrap();
        assert_eq!(first.status(), StatusCode::BAD_REQUEST);
        let second = app.oneshot(get("/tasks/not-an-id")).await.unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

        let rendered = observability::metrics_handler().await;
        let limited = rendered
            .lines()
            .find(|line| line.starts_with("http_requests_total") && line.contains("status=\"429\""));
        assert!(limited.is_some(), "no 429 sample in:\n{rendered}");
    }

    #[tokio::test]
    async fn test_unsupported_method_on_task_is_json_405() {
        let app = create_router::<crate::openapi::ApiDoc>(
            routes(&state(None).await, None),
            RouterConfig::default(),
        );

        let response = app
            .oneshot(
                Request::builder()
                    .method("PATCH")
                    .uri("/api/tasks/507f1f77bcf86cd799439011")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let bytes = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "METHOD_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_bad_completed_filter_is_json_400() {
        let app = routes(&state(None).await, None);

        let response = app
            .oneshot(get("/tasks?completed=true&completed=false"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()["content-type"], "application/json");
    }
}
