//! Task Service - the facade over the task store
//!
//! Translates external identifiers, bounds every store call with a timeout and
//! classifies failures into [`TaskError`].

use mongodb::bson::oid::ObjectId;
use observability::{StoreOutcome, StoreTimer};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Span, field, info, instrument, warn};

use crate::document::NewTaskDocument;
use crate::error::{StoreResult, TaskError, TaskResult};
use crate::models::{CreateTask, Task, TaskFilter, TaskPatch, UpdateTask};
use crate::repository::TaskRepository;

/// Bound applied to each store call unless configured otherwise
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Task service providing the five task operations
///
/// Holds no per-request state; clones share the repository.
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
    timeout: Duration,
}

impl<R: TaskRepository> TaskService<R> {
    /// Create a new TaskService with the default store timeout
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Override the per-call store timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// List tasks, optionally restricted by completion state
    #[instrument(
        skip(self),
        fields(filter.completed = ?filter.completed, result.count = field::Empty)
    )]
    pub async fn list_tasks(&self, filter: TaskFilter) -> TaskResult<Vec<Task>> {
        let docs = self.bounded("find", self.repository.find(filter)).await?;
        let tasks: Vec<Task> = docs.into_iter().map(Task::from).collect();

        Span::current().record("result.count", tasks.len());
        info!(count = tasks.len(), "Listed tasks");
        Ok(tasks)
    }

    /// Get a task by its external identifier
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn get_task(&self, id: &str) -> TaskResult<Task> {
        let oid = parse_id(id)?;

        self.bounded("find_one", self.repository.find_one(oid))
            .await?
            .map(Task::from)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))
    }

    /// Create a task; new tasks always start incomplete
    #[instrument(skip(self, input), fields(task_id = field::Empty))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Task> {
        let new_doc = NewTaskDocument::from(input);
        let oid = self
            .bounded("insert_one", self.repository.insert_one(new_doc.clone()))
            .await?;

        let task = Task::from(new_doc.with_id(oid));
        Span::current().record("task_id", task.id.as_str());
        info!(task_id = %task.id, "Task created successfully");
        Ok(task)
    }

    /// Apply a partial update and return the stored result
    ///
    /// Fields absent from `input` are left untouched. An update carrying no
    /// fields is rejected after the existence check and writes nothing.
    #[instrument(skip(self, input), fields(task_id = %id))]
    pub async fn update_task(&self, id: &str, input: UpdateTask) -> TaskResult<Task> {
        let oid = parse_id(id)?;

        self.bounded("find_one", self.repository.find_one(oid))
            .await?
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;

        let patch = TaskPatch::from(input);
        if patch.is_empty() {
            return Err(TaskError::InvalidArgument("No fields to update".to_string()));
        }
        let fields = patch.field_names();

        let outcome = self
            .bounded("update_one", self.repository.update_one(oid, patch))
            .await?;
        if outcome.matched == 0 {
            // deleted between the existence check and the write
            return Err(TaskError::NotFound(id.to_string()));
        }

        let task = self
            .bounded("find_one", self.repository.find_one(oid))
            .await?
            .map(Task::from)
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;

        info!(?fields, modified = outcome.modified, "Task updated successfully");
        Ok(task)
    }

    /// Delete a task, returning its identifier as confirmation
    #[instrument(skip(self), fields(task_id = %id))]
    pub async fn delete_task(&self, id: &str) -> TaskResult<String> {
        let oid = parse_id(id)?;

        let deleted = self
            .bounded("delete_one", self.repository.delete_one(oid))
            .await?;
        if deleted == 0 {
            return Err(TaskError::NotFound(id.to_string()));
        }

        info!("Task deleted successfully");
        Ok(id.to_string())
    }

    /// Run one store call under the timeout and record its outcome
    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> TaskResult<T>
    where
        F: Future<Output = StoreResult<T>>,
    {
        let timer = StoreTimer::start(operation);

        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => {
                timer.finish(StoreOutcome::Ok);
                Ok(value)
            }
            Ok(Err(e)) => {
                timer.finish(StoreOutcome::Error);
                warn!(operation, error = %e, "Task store call failed");
                Err(TaskError::StoreUnavailable(format!("{operation}: {e}")))
            }
            Err(_) => {
                timer.finish(StoreOutcome::Timeout);
                Err(TaskError::StoreUnavailable(format!(
                    "{operation} timed out after {}ms",
                    self.timeout.as_millis()
                )))
            }
        }
    }
}

impl<R: TaskRepository> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            timeout: self.timeout,
        }
    }
}

/// Decode an external identifier, before any store access
fn parse_id(id: &str) -> TaskResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| TaskError::InvalidArgument("Invalid task ID".to_string()))
}
