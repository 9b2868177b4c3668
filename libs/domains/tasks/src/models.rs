use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Task as exposed over the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": "507f1f77bcf86cd799439011",
    "title": "Buy milk",
    "description": "2%",
    "completed": false
}))]
pub struct Task {
    /// 24-character hexadecimal identifier assigned by the store
    pub id: String,
    pub title: String,
    /// Omitted from JSON when empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub completed: bool,
}

/// DTO for creating a new task
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
}

/// DTO for a partial update: only present fields are written
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTask {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Query filter for listing tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct TaskFilter {
    /// `true` or `false` restricts by completion; an empty value means no filter
    #[serde(default, deserialize_with = "completed_flag")]
    #[param(value_type = Option<bool>)]
    pub completed: Option<bool>,
}

impl TaskFilter {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
        }
    }

    /// Whether a task with `completed` passes this filter
    pub fn matches(&self, completed: bool) -> bool {
        self.completed.is_none_or(|wanted| wanted == completed)
    }
}

fn completed_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(other) => Err(D::Error::invalid_value(
            Unexpected::Str(other),
            &"`true` or `false`",
        )),
    }
}

/// Confirmation returned by the delete endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteTaskResponse {
    pub message: String,
    pub id: String,
}

impl DeleteTaskResponse {
    pub fn new(id: String) -> Self {
        Self {
            message: "Task deleted successfully".to_string(),
            id,
        }
    }
}

/// One field assignment in an update set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Title(String),
    Description(String),
    Completed(bool),
}

/// The fields an update writes, values taken verbatim from the request.
///
/// Presence, not emptiness, decides membership: `description: Some("")`
/// clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    changes: Vec<FieldChange>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn changes(&self) -> &[FieldChange] {
        &self.changes
    }

    /// Names of the fields this patch writes, for logging
    pub fn field_names(&self) -> Vec<&'static str> {
        self.changes
            .iter()
            .map(|change| match change {
                FieldChange::Title(_) => "title",
                FieldChange::Description(_) => "description",
                FieldChange::Completed(_) => "completed",
            })
            .collect()
    }
}

impl From<UpdateTask> for TaskPatch {
    fn from(input: UpdateTask) -> Self {
        let mut changes = Vec::with_capacity(3);
        if let Some(title) = input.title {
            changes.push(FieldChange::Title(title));
        }
        if let Some(description) = input.description {
            changes.push(FieldChange::Description(description));
        }
        if let Some(completed) = input.completed {
            changes.push(FieldChange::Completed(completed));
        }
        Self { changes }
    }
}
