//! Progress aggregation and gamification engine.
//!
//! Loads a user's rows through the repositories and hands them to the pure
//! rules in `stride_core`. The post-write pipeline ([`hooks`]) runs after
//! every progress log; the badge engine is its default stage.

pub mod activity;
pub mod badges;
pub mod history;
pub mod hooks;
pub mod stats;
pub mod streaks;
