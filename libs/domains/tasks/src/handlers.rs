use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    QueryParams, ValidatedJson,
    errors::responses::{
        BadQueryResponse, BadRequestValidationResponse, InvalidArgumentResponse,
        NotFoundResponse, StoreUnavailableResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::TaskResult;
use crate::models::{CreateTask, DeleteTaskResponse, Task, TaskFilter, UpdateTask};
use crate::repository::TaskRepository;
use crate::service::TaskService;

/// OpenAPI documentation for Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(list_tasks, create_task, get_task, update_task, delete_task),
    components(
        schemas(Task, CreateTask, UpdateTask, TaskFilter, DeleteTaskResponse),
        responses(
            BadQueryResponse,
            NotFoundResponse,
            BadRequestValidationResponse,
            InvalidArgumentResponse,
            StoreUnavailableResponse
        )
    ),
    tags(
        (name = "Tasks", description = "Task list endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the tasks router with all HTTP endpoints
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/{id}", get(get_task).put(update_task).delete(delete_task))
        .with_state(shared_service)
}

/// List tasks, optionally filtered by completion
#[utoipa::path(
    get,
    path = "",
    tag = "Tasks",
    params(TaskFilter),
    responses(
        (status = 200, description = "List of tasks", body = Vec<Task>),
        (status = 400, response = BadQueryResponse),
        (status = 500, response = StoreUnavailableResponse)
    )
)]
async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    QueryParams(filter): QueryParams<TaskFilter>,
) -> TaskResult<Json<Vec<Task>>> {
    let tasks = service.list_tasks(filter).await?;
    Ok(Json(tasks))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = "Tasks",
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created successfully", body = Task),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = StoreUnavailableResponse)
    )
)]
async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateTask>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create_task(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Tasks",
    params(
        ("id" = String, Path, description = "Task ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 400, response = InvalidArgumentResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = StoreUnavailableResponse)
    )
)]
async fn get_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
) -> TaskResult<Json<Task>> {
    let task = service.get_task(&id).await?;
    Ok(Json(task))
}

/// Update a task; only the fields present in the body are changed
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Tasks",
    params(
        ("id" = String, Path, description = "Task ID (24 hex characters)")
    ),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated successfully", body = Task),
        (status = 400, response = InvalidArgumentResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = StoreUnavailableResponse)
    )
)]
async fn update_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateTask>,
) -> TaskResult<Json<Task>> {
    let task = service.update_task(&id, input).await?;
    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Tasks",
    params(
        ("id" = String, Path, description = "Task ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Task deleted successfully", body = DeleteTaskResponse),
        (status = 400, response = InvalidArgumentResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = StoreUnavailableResponse)
    )
)]
async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
) -> TaskResult<Json<DeleteTaskResponse>> {
    let id = service.delete_task(&id).await?;
    Ok(Json(DeleteTaskResponse::new(id)))
}
