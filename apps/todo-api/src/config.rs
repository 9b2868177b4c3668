use axum::http::HeaderValue;
use axum_helpers::{ApiKey, RateLimitConfig, parse_allowed_origins};
use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, env_first_of, env_or_default, env_parse_or,
    server::ServerConfig,
};
use database::mongodb::MongoConfig;
use domain_tasks::DEFAULT_COLLECTION;
use std::time::Duration;

pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub tasks: TasksConfig,
    pub http: HttpConfig,
}

/// Task store settings
#[derive(Clone, Debug)]
pub struct TasksConfig {
    pub collection: String,
    /// Bound applied to each store call
    pub store_timeout: Duration,
}

/// Middleware settings
#[derive(Clone, Debug)]
pub struct HttpConfig {
    /// Empty means any origin
    pub allowed_origins: Vec<HeaderValue>,
    /// `None` disables API key auth
    pub api_key: Option<ApiKey>,
    pub rate_limit: RateLimitConfig,
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            tasks: TasksConfig::from_env()?,
            http: HttpConfig::from_env()?,
        })
    }
}

impl FromEnv for TasksConfig {
    /// - MONGODB_COLLECTION: defaults to "tasks"
    /// - TASKS_STORE_TIMEOUT_MS: defaults to 5000
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_ms: u64 = env_parse_or("TASKS_STORE_TIMEOUT_MS", 5000)?;
        if timeout_ms == 0 {
            return Err(ConfigError::ParseError {
                key: "TASKS_STORE_TIMEOUT_MS".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            collection: env_or_default("MONGODB_COLLECTION", DEFAULT_COLLECTION),
            store_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

impl FromEnv for HttpConfig {
    /// - CORS_ALLOWED_ORIGIN: comma-separated origins, unset allows any
    /// - API_KEY: enables X-API-Key auth on /api when set
    /// - RATE_LIMIT_PER_SECOND / RATE_LIMIT_BURST
    /// - SHUTDOWN_TIMEOUT_SECS: defaults to 30
    fn from_env() -> Result<Self, ConfigError> {
        let allowed_origins = match env_first_of(&["CORS_ALLOWED_ORIGIN"]) {
            Some(raw) => parse_allowed_origins(&raw).map_err(|e| ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: e.to_string(),
            })?,
            None => Vec::new(),
        };

        let api_key = env_first_of(&["API_KEY"])
            .filter(|key| !key.is_empty())
            .map(ApiKey::new);

        Ok(Self {
            allowed_origins,
            api_key,
            rate_limit: RateLimitConfig::from_env()?,
            shutdown_timeout: Duration::from_secs(env_parse_or("SHUTDOWN_TIMEOUT_SECS", 30)?),
        })
    }
}
