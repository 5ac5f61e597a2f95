//! Request extractors shared by handlers.
//!
//! - [`auth::AuthUser`] -- the caller identified by a Bearer token.

pub mod auth;
