//! Handlers for progress entries under `/tasks/{id}/progress`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use stride_core::error::CoreError;
use stride_core::progress::{hours_to_minutes, minutes_to_hours, ProgressStatus};
use stride_core::types::{DbId, Timestamp};
use stride_db::models::task::OwnedTask;
use stride_db::models::task_progress::{CreateTaskProgress, TaskProgress};
use stride_db::repositories::{TaskProgressRepo, TaskRepo};

use crate::engine::hooks::ProgressLogged;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /tasks/{id}/progress`.
#[derive(Debug, Deserialize)]
pub struct LogProgressRequest {
    /// Day being reported on. Defaults to now.
    pub date: Option<Timestamp>,
    pub status: String,
    pub hours_spent: Option<f64>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
}

/// A progress entry with time spent in hours.
#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub id: DbId,
    pub task_id: DbId,
    pub date: Timestamp,
    pub status: ProgressStatus,
    pub hours_spent: Option<f64>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}

impl TryFrom<TaskProgress> for ProgressResponse {
    type Error = CoreError;

    fn try_from(row: TaskProgress) -> Result<Self, Self::Error> {
        Ok(Self {
            status: row.parsed_status()?,
            hours_spent: row.minutes_spent.map(minutes_to_hours),
            id: row.id,
            task_id: row.task_id,
            date: row.progress_date,
            notes: row.notes,
            image_url: row.image_url,
            created_at: row.created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a task whose challenge is owned by `user_id`; anything else is 404.
async fn ensure_owned_task(pool: &PgPool, id: DbId, user_id: DbId) -> AppResult<OwnedTask> {
    TaskRepo::find_owned(pool, id)
        .await?
        .filter(|t| t.owner_id == user_id)
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/tasks/{id}/progress
///
/// Appends an entry, then runs the post-write pipeline (badge evaluation and
/// automatic completion). Pipeline failures are logged and never turn the
/// committed write into an error response.
pub async fn log_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(task_id): Path<DbId>,
    Json(input): Json<LogProgressRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ProgressResponse>>)> {
    let task = ensure_owned_task(&state.pool, task_id, auth.user_id).await?;

    let status = ProgressStatus::from_str_value(&input.status)?;
    let minutes_spent = input.hours_spent.map(hours_to_minutes).transpose()?;
    let now = Utc::now();

    let entry = TaskProgressRepo::log(
        &state.pool,
        &CreateTaskProgress {
            task_id,
            progress_date: input.date.unwrap_or(now),
            status,
            minutes_spent,
            notes: input.notes,
            image_url: input.image_url,
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        challenge_id = task.challenge_id,
        task_id,
        progress_id = entry.id,
        status = status.as_str(),
        "Progress logged",
    );

    state
        .pipeline
        .run(
            &state.pool,
            &ProgressLogged {
                user_id: auth.user_id,
                challenge_id: task.challenge_id,
                task_id,
                progress_id: entry.id,
                logged_at: now,
            },
        )
        .await;

    let data = ProgressResponse::try_from(entry)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// GET /api/v1/tasks/{id}/progress
///
/// Entries in date order, oldest first.
pub async fn list_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ProgressResponse>>>> {
    ensure_owned_task(&state.pool, task_id, auth.user_id).await?;

    let data = TaskProgressRepo::list_by_task(&state.pool, task_id)
        .await?
        .into_iter()
        .map(ProgressResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(DataResponse { data }))
}
