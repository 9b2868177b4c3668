//! Tasks Domain
//!
//! A task list backed by MongoDB: models, the store abstraction, the
//! `TaskService` facade and its HTTP handlers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, request validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← id decoding, per-call timeouts, error classification
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Store trait + MongoDB / in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Task, DTOs, stored documents
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{handlers, MongoTaskRepository, TaskService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("todoapi");
//!
//! let repository = MongoTaskRepository::new(db);
//! let service = TaskService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use document::{NewTaskDocument, TaskDocument};
pub use error::{StoreError, StoreResult, TaskError, TaskResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryTaskRepository;
pub use models::{CreateTask, DeleteTaskResponse, Task, TaskFilter, TaskPatch, UpdateTask};
pub use self::mongodb::{DEFAULT_COLLECTION, MongoTaskRepository};
pub use repository::{TaskRepository, UpdateOutcome};
pub use service::{DEFAULT_STORE_TIMEOUT, TaskService};
