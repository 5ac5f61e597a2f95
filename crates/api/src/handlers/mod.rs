pub mod auth;
pub mod challenge;
pub mod progress;
pub mod public;
pub mod user;
