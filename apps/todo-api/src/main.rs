use axum_helpers::errors::handlers::method_not_allowed;
use axum_helpers::{ClientRateLimiter, RouterConfig, SecurityPolicy, create_router};
use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// How often idle rate-limit buckets are dropped
const RATE_LIMIT_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    if let Err(e) = observability::init_metrics() {
        warn!(error = %e, "Prometheus recorder not installed, /metrics will be empty");
    }

    info!(
        url = %config.mongodb.redacted_url(),
        database = config.mongodb.database(),
        "Connecting to MongoDB"
    );

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());

    info!(
        database = config.mongodb.database(),
        collection = %config.tasks.collection,
        store_timeout_ms = config.tasks.store_timeout.as_millis() as u64,
        "Connected to MongoDB"
    );

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    let rate_limiter = ClientRateLimiter::new(state.config.http.rate_limit);
    let pruning = rate_limiter.spawn_pruning(RATE_LIMIT_PRUNE_INTERVAL);

    let router_config = RouterConfig {
        allowed_origins: state.config.http.allowed_origins.clone(),
        security: SecurityPolicy::with_hsts(state.config.environment.use_https()),
    };

    if state.config.http.api_key.is_some() {
        info!("API key authentication enabled for /api");
    }

    let router = create_router::<openapi::ApiDoc>(
        api::routes(&state, Some(rate_limiter)),
        router_config,
    );

    let app = router
        .merge(health_router(
            state.config.app,
            "Server is running with MongoDB!",
        ))
        .merge(api::public_routes(&state))
        .method_not_allowed_fallback(method_not_allowed);

    info!(
        base_url = %state.config.server.base_url(),
        "Starting Todo API (docs at /swagger-ui)"
    );

    let mongo_client = state.mongo_client.clone();
    create_production_app(
        app,
        &state.config.server,
        state.config.http.shutdown_timeout,
        async move {
            pruning.abort();
            database::mongodb::disconnect(mongo_client).await;
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Todo API shutdown complete");
    Ok(())
}
