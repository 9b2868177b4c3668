//! Query string extractor that rejects with a JSON error body.

use crate::errors::AppError;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

/// Like [`Query`], but a query string that does not deserialize into `T`
/// becomes [`AppError::QueryExtractorRejection`] instead of a plain-text 400.
///
/// # Example
/// ```ignore
/// async fn list_tasks(QueryParams(filter): QueryParams<TaskFilter>) -> String {
///     format!("{filter:?}")
/// }
/// ```
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(QueryParams(params))
    }
}
