use crate::{ConfigError, FromEnv, env_or_default, env_parse_or};
use std::net::Ipv4Addr;

const DEFAULT_PORT: u16 = 8080;

/// Listen address of the HTTP server
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    /// `host:port`, as passed to the listener
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// URL to print in startup logs; the wildcard host becomes `localhost`
    pub fn base_url(&self) -> String {
        let host = if self.listens_on_all_interfaces() {
            "localhost"
        } else {
            self.host.as_str()
        };
        format!("http://{host}:{}", self.port)
    }

    fn listens_on_all_interfaces(&self) -> bool {
        self.host
            .parse::<Ipv4Addr>()
            .is_ok_and(|addr| addr.is_unspecified())
    }
}

impl FromEnv for ServerConfig {
    /// - HOST: defaults to 0.0.0.0
    /// - PORT: defaults to 8080
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string()),
            port: env_parse_or("PORT", DEFAULT_PORT)?,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(Ipv4Addr::UNSPECIFIED.to_string(), DEFAULT_PORT)
    }
}
