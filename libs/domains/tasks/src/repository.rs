use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::document::{NewTaskDocument, TaskDocument};
use crate::error::StoreResult;
use crate::models::{TaskFilter, TaskPatch};

/// Result of an `update_one`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Documents the filter selected (0 or 1)
    pub matched: u64,
    /// Documents actually changed; 0 when the values were already equal
    pub modified: u64,
}

/// Task store: single-document operations keyed by native identifiers.
///
/// Implementations hold no per-request state and never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// All tasks matching `filter`, in store order
    async fn find(&self, filter: TaskFilter) -> StoreResult<Vec<TaskDocument>>;

    async fn find_one(&self, id: ObjectId) -> StoreResult<Option<TaskDocument>>;

    /// Insert and return the assigned identifier
    async fn insert_one(&self, task: NewTaskDocument) -> StoreResult<ObjectId>;

    /// Set only the fields in `patch`
    async fn update_one(&self, id: ObjectId, patch: TaskPatch) -> StoreResult<UpdateOutcome>;

    /// Returns the number of documents deleted
    async fn delete_one(&self, id: ObjectId) -> StoreResult<u64>;
}
