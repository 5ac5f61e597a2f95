//! Stride domain core.
//!
//! Pure logic for the progress-aggregation and gamification engine:
//! challenge lifecycle math, streaks, badge rules, user statistics, and
//! activity feed reconstruction. This crate has no database or HTTP
//! dependencies; callers load rows and pass them in.

pub mod activity;
pub mod badge;
pub mod challenge;
pub mod error;
pub mod history;
pub mod progress;
pub mod stats;
pub mod streak;
pub mod types;
