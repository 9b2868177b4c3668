//! Storage shapes of a task in the `tasks` collection.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::{CreateTask, FieldChange, Task, TaskPatch};

/// A stored task as read back from the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl TaskDocument {
    /// Write a patch's fields onto this document
    pub fn apply(&mut self, patch: &TaskPatch) {
        for change in patch.changes() {
            match change {
                FieldChange::Title(title) => self.title = title.clone(),
                FieldChange::Description(description) => self.description = description.clone(),
                FieldChange::Completed(completed) => self.completed = *completed,
            }
        }
    }
}

impl From<TaskDocument> for Task {
    fn from(doc: TaskDocument) -> Self {
        Task {
            id: doc.id.to_hex(),
            title: doc.title,
            description: doc.description,
            completed: doc.completed,
        }
    }
}

/// A task about to be inserted; the store assigns `_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTaskDocument {
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl NewTaskDocument {
    /// Attach the identifier the store assigned
    pub fn with_id(self, id: ObjectId) -> TaskDocument {
        TaskDocument {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
        }
    }
}

impl From<CreateTask> for NewTaskDocument {
    fn from(input: CreateTask) -> Self {
        Self {
            title: input.title,
            description: input.description,
            completed: false,
        }
    }
}
