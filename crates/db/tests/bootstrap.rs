use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    stride_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "challenges",
        "tasks",
        "task_progress",
        "badges",
        "user_connections",
        "shared_notes",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// The badge uniqueness index must exist for award idempotency.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_badge_unique_index_present(pool: PgPool) {
    let found: Option<(String,)> = sqlx::query_as(
        "SELECT indexname::text FROM pg_indexes
         WHERE tablename = 'badges' AND indexname = 'uq_badges_user_name_challenge'",
    )
    .fetch_optional(&pool)
    .await
    .unwrap();
    assert!(found.is_some(), "uq_badges_user_name_challenge index missing");
}

/// Progress status is constrained to the three known values.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_progress_status_check_constraint(pool: PgPool) {
    let result = sqlx::query(
        "INSERT INTO task_progress (task_id, progress_date, status) VALUES (1, NOW(), 'skipped')",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err());
}
