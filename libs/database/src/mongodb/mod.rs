//! MongoDB connector and utilities
//!
//! Provides connection management, readiness probes and shutdown.

mod config;
mod connector;

pub use config::{DEFAULT_DATABASE, MongoConfig};
pub use connector::{
    MongoError, connect_from_config, connect_from_config_with_retry, disconnect, ping,
};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database, bson};
