//! In-process TaskRepository, for tests and local runs without MongoDB.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::document::{NewTaskDocument, TaskDocument};
use crate::error::StoreResult;
use crate::models::{TaskFilter, TaskPatch};
use crate::repository::{TaskRepository, UpdateOutcome};

/// Keeps documents in insertion order, which is its store order.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<Vec<TaskDocument>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn find(&self, filter: TaskFilter) -> StoreResult<Vec<TaskDocument>> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .filter(|task| filter.matches(task.completed))
            .cloned()
            .collect())
    }

    async fn find_one(&self, id: ObjectId) -> StoreResult<Option<TaskDocument>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().find(|task| task.id == id).cloned())
    }

    async fn insert_one(&self, task: NewTaskDocument) -> StoreResult<ObjectId> {
        let id = ObjectId::new();
        self.tasks.write().await.push(task.with_id(id));
        Ok(id)
    }

    async fn update_one(&self, id: ObjectId, patch: TaskPatch) -> StoreResult<UpdateOutcome> {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(UpdateOutcome::default());
        };

        let before = task.clone();
        task.apply(&patch);

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(*task != before),
        })
    }

    async fn delete_one(&self, id: ObjectId) -> StoreResult<u64> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        Ok((before - tasks.len()) as u64)
    }
}
