/**
 * Task Handlers
 *
 * `GET /tasks` - the protected resource. The access gate middleware runs
 * first and leaves the resolved identity in the request extensions; this
 * handler never sees credentials or tokens.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::tasks::db::list_for;
use crate::shared::{Task, TaskListResponse};

/// List the caller's tasks
///
/// # Errors
///
/// * `401 Unauthorized` - no identity was resolved (returned by the gate)
/// * `503 Service Unavailable` - the task query failed
pub async fn list_tasks(
    State(pool): State<SqlitePool>,
    AuthUser(identity): AuthUser,
) -> Result<Json<TaskListResponse>, BackendError> {
    let records = list_for(&pool, &identity).await?;
    tracing::debug!("Listing {} tasks for {}", records.len(), identity.username());

    Ok(Json(TaskListResponse {
        username: identity.username().to_string(),
        tasks: records.into_iter().map(Task::from).collect(),
    }))
}
