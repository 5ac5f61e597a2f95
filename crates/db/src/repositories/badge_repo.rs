//! Repository for the `badges` table.
//!
//! Badges are only ever inserted. Uniqueness of `(user_id, name,
//! challenge_id)` is enforced by the `uq_badges_user_name_challenge` index,
//! which treats a NULL challenge as its own value.

use sqlx::PgPool;
use stride_core::types::DbId;

use crate::models::badge::{Badge, CreateBadge};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, challenge_id, name, description, earned_at";

/// Provides insert and read operations for badges.
pub struct BadgeRepo;

impl BadgeRepo {
    /// Insert a badge unconditionally.
    ///
    /// Fails with a unique violation if the triple already exists; use
    /// [`BadgeRepo::create_if_not_exists`] for award paths.
    pub async fn create(pool: &PgPool, input: &CreateBadge) -> Result<Badge, sqlx::Error> {
        let query = format!(
            "INSERT INTO badges (user_id, challenge_id, name, description)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Badge>(&query)
            .bind(input.user_id)
            .bind(input.challenge_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Insert a badge unless the `(user, name, challenge)` triple already
    /// exists, returning whichever row ends up stored and whether it was
    /// newly inserted.
    ///
    /// The insert relies on the unique index, so concurrent callers racing on
    /// the same triple still produce exactly one row.
    pub async fn create_if_not_exists(
        pool: &PgPool,
        input: &CreateBadge,
    ) -> Result<(Badge, bool), sqlx::Error> {
        let query = format!(
            "INSERT INTO badges (user_id, challenge_id, name, description)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id, name, (COALESCE(challenge_id, 0))) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Badge>(&query)
            .bind(input.user_id)
            .bind(input.challenge_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await?;

        if let Some(badge) = inserted {
            return Ok((badge, true));
        }

        let existing =
            Self::find_existing(pool, input.user_id, &input.name, input.challenge_id).await?;
        existing
            .map(|badge| (badge, false))
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find the badge matching a `(user, name, challenge)` triple.
    ///
    /// `challenge_id = None` matches only account-level badges.
    pub async fn find_existing(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
        challenge_id: Option<DbId>,
    ) -> Result<Option<Badge>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM badges
             WHERE user_id = $1 AND name = $2 AND challenge_id IS NOT DISTINCT FROM $3"
        );
        sqlx::query_as::<_, Badge>(&query)
            .bind(user_id)
            .bind(name)
            .bind(challenge_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a badge by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Badge>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM badges WHERE id = $1");
        sqlx::query_as::<_, Badge>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's badges, most recently earned first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Badge>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM badges WHERE user_id = $1 ORDER BY earned_at DESC, id DESC"
        );
        sqlx::query_as::<_, Badge>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List the badges scoped to one challenge.
    pub async fn list_by_challenge(
        pool: &PgPool,
        challenge_id: DbId,
    ) -> Result<Vec<Badge>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM badges WHERE challenge_id = $1 ORDER BY earned_at, id"
        );
        sqlx::query_as::<_, Badge>(&query)
            .bind(challenge_id)
            .fetch_all(pool)
            .await
    }

    /// Count every badge a user owns.
    pub async fn count_by_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM badges WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
