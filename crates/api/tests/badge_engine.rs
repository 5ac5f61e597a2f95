//! Badge engine and aggregate loaders called directly, with fixed clocks.

use chrono::{Duration, TimeZone, Utc};
use sqlx::PgPool;
use stride_api::engine::badges::check_and_award_badges;
use stride_api::engine::{activity, stats, streaks};
use stride_core::activity::ActivityType;
use stride_core::progress::ProgressStatus;
use stride_core::types::{calendar_date, DbId, Timestamp};
use stride_db::models::challenge::CreateChallenge;
use stride_db::models::task::CreateTask;
use stride_db::models::task_progress::CreateTaskProgress;
use stride_db::models::user::CreateUser;
use stride_db::repositories::{BadgeRepo, ChallengeRepo, TaskProgressRepo, UserRepo};

fn jan(day: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap()
}

async fn new_user(pool: &PgPool, username: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            display_name: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: "unused".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

/// A challenge starting 2024-01-01 with two tasks.
async fn new_challenge(pool: &PgPool, user_id: DbId, duration_days: i32) -> (DbId, Vec<DbId>) {
    let (challenge, tasks) = ChallengeRepo::create_with_tasks(
        pool,
        &CreateChallenge {
            user_id,
            name: "January reset".to_string(),
            category: "health".to_string(),
            duration_days,
            start_date: jan(1),
            end_date: jan(1) + Duration::days(i64::from(duration_days)),
        },
        &[
            CreateTask {
                name: "Walk".to_string(),
                scheduled_time: None,
            },
            CreateTask {
                name: "Read".to_string(),
                scheduled_time: Some("21:00".to_string()),
            },
        ],
    )
    .await
    .unwrap();
    (challenge.id, tasks.into_iter().map(|t| t.id).collect())
}

async fn log(pool: &PgPool, task_id: DbId, date: Timestamp, status: ProgressStatus, minutes: Option<i32>) {
    TaskProgressRepo::log(
        pool,
        &CreateTaskProgress {
            task_id,
            progress_date: date,
            status,
            minutes_spent: minutes,
            notes: None,
            image_url: None,
        },
    )
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Badge engine
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn seven_day_challenge_on_day_eight(pool: PgPool) {
    let user_id = new_user(&pool, "scenario").await;
    let (challenge_id, _) = new_challenge(&pool, user_id, 7).await;

    let badges = check_and_award_badges(&pool, user_id, challenge_id, jan(8))
        .await
        .unwrap();

    let names: Vec<&str> = badges.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["7-Day Streak", "Challenge Completed"]);
    assert_eq!(
        badges[1].description,
        "Completed the \"January reset\" challenge"
    );
    assert!(badges.iter().all(|b| b.challenge_id == Some(challenge_id)));

    let challenge = ChallengeRepo::find_by_id(&pool, challenge_id)
        .await
        .unwrap()
        .unwrap();
    assert!(challenge.is_completed);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeated_checks_are_idempotent(pool: PgPool) {
    let user_id = new_user(&pool, "again").await;
    let (challenge_id, _) = new_challenge(&pool, user_id, 30).await;

    let first = check_and_award_badges(&pool, user_id, challenge_id, jan(31))
        .await
        .unwrap();
    for _ in 0..4 {
        let again = check_and_award_badges(&pool, user_id, challenge_id, jan(31))
            .await
            .unwrap();
        assert_eq!(again, first);
    }

    // 7, 21, 30 day badges plus completion on day 31 of a 30-day challenge.
    assert_eq!(first.len(), 4);
    assert_eq!(BadgeRepo::count_by_user(&pool, user_id).await.unwrap(), 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn thresholds_accumulate_over_time(pool: PgPool) {
    let user_id = new_user(&pool, "patient").await;
    let (challenge_id, _) = new_challenge(&pool, user_id, 60).await;

    for (day, expected) in [(2, 0), (8, 1), (22, 2), (31, 3)] {
        check_and_award_badges(&pool, user_id, challenge_id, jan(day))
            .await
            .unwrap();
        assert_eq!(
            BadgeRepo::count_by_user(&pool, user_id).await.unwrap(),
            expected,
            "badges after day {day}"
        );
    }

    let challenge = ChallengeRepo::find_by_id(&pool, challenge_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!challenge.is_completed);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_challenge_is_a_no_op(pool: PgPool) {
    let user_id = new_user(&pool, "nobody").await;
    let badges = check_and_award_badges(&pool, user_id, 123_456, jan(20))
        .await
        .unwrap();
    assert!(badges.is_empty());
    assert_eq!(BadgeRepo::count_by_user(&pool, user_id).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn foreign_challenge_is_a_no_op(pool: PgPool) {
    let owner = new_user(&pool, "owner").await;
    let other = new_user(&pool, "other").await;
    let (challenge_id, _) = new_challenge(&pool, owner, 7).await;

    let badges = check_and_award_badges(&pool, other, challenge_id, jan(8))
        .await
        .unwrap();
    assert!(badges.is_empty());

    let challenge = ChallengeRepo::find_by_id(&pool, challenge_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!challenge.is_completed);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_checks_award_once(pool: PgPool) {
    let user_id = new_user(&pool, "racer").await;
    let (challenge_id, _) = new_challenge(&pool, user_id, 7).await;

    let mut handles = Vec::new();
    for _ in 0..6 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            check_and_award_badges(&pool, user_id, challenge_id, jan(8)).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(BadgeRepo::count_by_user(&pool, user_id).await.unwrap(), 2);
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_fold_counts_tasks_once(pool: PgPool) {
    let user_id = new_user(&pool, "folder").await;
    let (_, first) = new_challenge(&pool, user_id, 30).await;
    let (_, second) = new_challenge(&pool, user_id, 30).await;

    // First challenge: one task with a completion and a partial, one untouched.
    log(&pool, first[0], jan(2), ProgressStatus::Completed, Some(30)).await;
    log(&pool, first[0], jan(3), ProgressStatus::Partial, Some(90)).await;
    // Second challenge: one completion, one untouched task.
    log(&pool, second[0], jan(3), ProgressStatus::Completed, None).await;

    let stats = stats::get_user_stats(&pool, user_id, jan(4)).await.unwrap();
    assert_eq!(stats.total_tasks, 4);
    assert_eq!(stats.completed_tasks, 2);
    assert_eq!(stats.hours_logged, 2.0);
    assert_eq!(stats.active_challenges, 2);
    assert_eq!(stats.badges_count, 0);
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.longest_streak, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_streaks_follow_loaded_history(pool: PgPool) {
    let user_id = new_user(&pool, "steady").await;
    let other = new_user(&pool, "neighbour").await;
    let (_, tasks) = new_challenge(&pool, user_id, 30).await;
    let (_, other_tasks) = new_challenge(&pool, other, 30).await;

    for day in [2, 3, 4] {
        log(&pool, tasks[0], jan(day), ProgressStatus::Completed, None).await;
    }
    // Another user's completions never feed this user's streaks.
    for day in [1, 5] {
        log(&pool, other_tasks[0], jan(day), ProgressStatus::Completed, None).await;
    }

    let before = stats::get_user_stats(&pool, user_id, jan(5)).await.unwrap();
    assert_eq!(before.completed_tasks, 1);
    assert_eq!(before.current_streak, 3);
    assert_eq!(before.longest_streak, 3);

    let standalone = streaks::compute_streaks(&pool, user_id, calendar_date(jan(5)))
        .await
        .unwrap();
    assert_eq!(standalone.current_streak, before.current_streak);
    assert_eq!(standalone.longest_streak, before.longest_streak);

    // A completion on the second task moves both counters together.
    log(&pool, tasks[1], jan(5), ProgressStatus::Completed, None).await;
    let after = stats::get_user_stats(&pool, user_id, jan(5)).await.unwrap();
    assert_eq!(after.completed_tasks, 2);
    assert_eq!(after.current_streak, 4);
    assert_eq!(after.longest_streak, 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn streaks_collapse_same_day_completions(pool: PgPool) {
    let user_id = new_user(&pool, "daily").await;
    let (_, tasks) = new_challenge(&pool, user_id, 30).await;

    for day in [5, 6, 7] {
        log(&pool, tasks[0], jan(day), ProgressStatus::Completed, None).await;
        log(&pool, tasks[1], jan(day), ProgressStatus::Completed, None).await;
    }
    log(&pool, tasks[0], jan(9), ProgressStatus::NoAction, None).await;

    let summary = streaks::compute_streaks(&pool, user_id, calendar_date(jan(8)))
        .await
        .unwrap();
    assert_eq!(summary.current_streak, 3);
    assert_eq!(summary.longest_streak, 3);

    let later = streaks::compute_streaks(&pool, user_id, calendar_date(jan(10)))
        .await
        .unwrap();
    assert_eq!(later.current_streak, 0);
    assert_eq!(later.longest_streak, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn activity_merges_three_sources(pool: PgPool) {
    let user_id = new_user(&pool, "feed").await;
    let (challenge_id, tasks) = new_challenge(&pool, user_id, 30).await;
    log(&pool, tasks[0], jan(3), ProgressStatus::Completed, Some(60)).await;
    log(&pool, tasks[1], jan(4), ProgressStatus::NoAction, None).await;
    check_and_award_badges(&pool, user_id, challenge_id, jan(9))
        .await
        .unwrap();

    let items = activity::get_user_activity(&pool, user_id).await.unwrap();
    let kinds: Vec<ActivityType> = items.iter().map(|i| i.activity_type).collect();

    // The badge is stamped with the database clock, so it sorts first.
    assert_eq!(
        kinds,
        vec![
            ActivityType::Badge,
            ActivityType::Missed,
            ActivityType::Completed,
            ActivityType::Created,
        ]
    );
    assert!(items.windows(2).all(|w| w[0].date >= w[1].date));
}
