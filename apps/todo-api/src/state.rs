//! Application state management.

use domain_tasks::{MongoTaskRepository, TaskService};
use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloned into each router; the MongoDB handles share one connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
}

impl AppState {
    /// The task facade over the configured collection
    pub fn task_service(&self) -> TaskService<MongoTaskRepository> {
        let repository =
            MongoTaskRepository::with_collection(self.db.clone(), &self.config.tasks.collection);

        TaskService::new(repository).with_timeout(self.config.tasks.store_timeout)
    }
}
