//! MongoDB implementation of TaskRepository

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc, oid::ObjectId},
};
use tracing::instrument;

use crate::document::{NewTaskDocument, TaskDocument};
use crate::error::{StoreError, StoreResult};
use crate::models::{FieldChange, TaskFilter, TaskPatch};
use crate::repository::{TaskRepository, UpdateOutcome};

/// Collection used when none is configured
pub const DEFAULT_COLLECTION: &str = "tasks";

/// MongoDB implementation of the TaskRepository
pub struct MongoTaskRepository {
    collection: Collection<TaskDocument>,
}

impl MongoTaskRepository {
    /// Create a repository over the default `tasks` collection
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoTaskRepository::new(client.database("todoapi"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<TaskDocument>(collection_name),
        }
    }

    fn inserts(&self) -> Collection<NewTaskDocument> {
        self.collection.clone_with_type::<NewTaskDocument>()
    }

    /// Build a MongoDB filter document from TaskFilter
    fn build_filter(filter: &TaskFilter) -> Document {
        let mut doc = doc! {};

        if let Some(completed) = filter.completed {
            doc.insert("completed", completed);
        }

        doc
    }

    /// `$set` update holding exactly the patched fields
    fn build_update(patch: &TaskPatch) -> Document {
        let mut set = doc! {};

        for change in patch.changes() {
            match change {
                FieldChange::Title(title) => set.insert("title", title.as_str()),
                FieldChange::Description(description) => {
                    set.insert("description", description.as_str())
                }
                FieldChange::Completed(completed) => set.insert("completed", *completed),
            };
        }

        doc! { "$set": set }
    }
}

#[async_trait]
impl TaskRepository for MongoTaskRepository {
    #[instrument(skip(self), fields(db.system = "mongodb", db.operation = "find"))]
    async fn find(&self, filter: TaskFilter) -> StoreResult<Vec<TaskDocument>> {
        let cursor = self.collection.find(Self::build_filter(&filter)).await?;
        let tasks: Vec<TaskDocument> = cursor.try_collect().await?;
        Ok(tasks)
    }

    #[instrument(skip(self), fields(db.system = "mongodb", db.operation = "findOne"))]
    async fn find_one(&self, id: ObjectId) -> StoreResult<Option<TaskDocument>> {
        let task = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(task)
    }

    #[instrument(skip(self, task), fields(db.system = "mongodb", db.operation = "insertOne"))]
    async fn insert_one(&self, task: NewTaskDocument) -> StoreResult<ObjectId> {
        let result = self.inserts().insert_one(&task).await?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::UnexpectedId(format!("{:?}", result.inserted_id)))
    }

    #[instrument(
        skip(self, patch),
        fields(db.system = "mongodb", db.operation = "updateOne", task.fields = ?patch.field_names())
    )]
    async fn update_one(&self, id: ObjectId, patch: TaskPatch) -> StoreResult<UpdateOutcome> {
        let result = self
            .collection
            .update_one(doc! { "_id": id }, Self::build_update(&patch))
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    #[instrument(skip(self), fields(db.system = "mongodb", db.operation = "deleteOne"))]
    async fn delete_one(&self, id: ObjectId) -> StoreResult<u64> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }
}
