//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod badge_repo;
pub mod challenge_repo;
pub mod task_progress_repo;
pub mod task_repo;
pub mod user_repo;

pub use badge_repo::BadgeRepo;
pub use challenge_repo::ChallengeRepo;
pub use task_progress_repo::TaskProgressRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
