//! Tasks API routes

use axum::Router;
use domain_tasks::handlers;

use crate::state::AppState;

/// Create tasks router
pub fn router(state: &AppState) -> Router {
    handlers::router(state.task_service())
}
