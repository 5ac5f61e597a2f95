//! Handlers for the `/challenges` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use stride_core::challenge::{
    compute_end_date, validate_name, validate_new_challenge, validate_scheduled_time,
    ChallengeTimeline,
};
use stride_core::error::CoreError;
use stride_core::types::{DbId, Timestamp};
use stride_db::models::badge::Badge;
use stride_db::models::challenge::{Challenge, CreateChallenge};
use stride_db::models::task::{CreateTask, Task};
use stride_db::repositories::{BadgeRepo, ChallengeRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Request / response types
-------------------------------------------------------------------------- */

/// Request body for `POST /challenges`.
#[derive(Debug, Deserialize)]
pub struct CreateChallengeRequest {
    pub name: String,
    pub category: String,
    pub duration_days: i32,
    pub tasks: Vec<CreateTask>,
}

/// A challenge with its "day N of M" view.
#[derive(Debug, Serialize)]
pub struct ChallengeView {
    #[serde(flatten)]
    pub challenge: Challenge,
    pub timeline: ChallengeTimeline,
}

/// A challenge with its tasks and "day N of M" view.
#[derive(Debug, Serialize)]
pub struct ChallengeDetail {
    #[serde(flatten)]
    pub challenge: Challenge,
    pub timeline: ChallengeTimeline,
    pub tasks: Vec<Task>,
}

fn view(challenge: Challenge, now: Timestamp) -> ChallengeView {
    let timeline = challenge.snapshot().timeline(now);
    ChallengeView {
        challenge,
        timeline,
    }
}

fn detail(challenge: Challenge, tasks: Vec<Task>, now: Timestamp) -> ChallengeDetail {
    let timeline = challenge.snapshot().timeline(now);
    ChallengeDetail {
        challenge,
        timeline,
        tasks,
    }
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Load a challenge owned by `user_id`.
///
/// Someone else's challenge is reported as not found so ids of other users'
/// challenges are not disclosed.
pub async fn ensure_owned_challenge(
    pool: &PgPool,
    id: DbId,
    user_id: DbId,
) -> AppResult<Challenge> {
    ChallengeRepo::find_by_id(pool, id)
        .await?
        .filter(|c| c.user_id == user_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Challenge",
            id,
        }))
}

fn validate_request(input: &CreateChallengeRequest) -> Result<(), CoreError> {
    validate_new_challenge(
        &input.name,
        &input.category,
        input.duration_days,
        input.tasks.len(),
    )?;
    for task in &input.tasks {
        validate_name("Task", &task.name)?;
        if let Some(time) = &task.scheduled_time {
            validate_scheduled_time(time)?;
        }
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// POST /api/v1/challenges
///
/// The challenge starts now and ends `duration_days` calendar days later.
/// The challenge and its tasks are written in one transaction.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateChallengeRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ChallengeDetail>>)> {
    validate_request(&input)?;

    let now = Utc::now();
    let end_date = compute_end_date(now, input.duration_days)?;

    let (challenge, tasks) = ChallengeRepo::create_with_tasks(
        &state.pool,
        &CreateChallenge {
            user_id: auth.user_id,
            name: input.name,
            category: input.category,
            duration_days: input.duration_days,
            start_date: now,
            end_date,
        },
        &input.tasks,
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        challenge_id = challenge.id,
        duration_days = challenge.duration_days,
        task_count = tasks.len(),
        "Challenge created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: detail(challenge, tasks, now),
        }),
    ))
}

/// GET /api/v1/challenges
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<ChallengeView>>>> {
    let now = Utc::now();
    let challenges = ChallengeRepo::list_by_user(&state.pool, auth.user_id).await?;
    let data = challenges.into_iter().map(|c| view(c, now)).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/challenges/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ChallengeDetail>>> {
    let challenge = ensure_owned_challenge(&state.pool, id, auth.user_id).await?;
    let tasks = TaskRepo::list_by_challenge(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: detail(challenge, tasks, Utc::now()),
    }))
}

/// POST /api/v1/challenges/{id}/complete
///
/// Idempotent: completing an already-completed challenge returns it unchanged.
pub async fn complete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ChallengeView>>> {
    let existing = ensure_owned_challenge(&state.pool, id, auth.user_id).await?;

    let challenge = if existing.is_completed {
        existing
    } else {
        let updated = ChallengeRepo::mark_completed(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Challenge",
                id,
            }))?;
        tracing::info!(user_id = auth.user_id, challenge_id = id, "Challenge completed");
        updated
    };

    Ok(Json(DataResponse {
        data: view(challenge, Utc::now()),
    }))
}

/// GET /api/v1/challenges/{id}/badges
pub async fn list_badges(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Badge>>>> {
    ensure_owned_challenge(&state.pool, id, auth.user_id).await?;
    let badges = BadgeRepo::list_by_challenge(&state.pool, id).await?;
    Ok(Json(DataResponse { data: badges }))
}
