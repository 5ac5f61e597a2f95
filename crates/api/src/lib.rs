//! Stride API server library.
//!
//! Exposes config, state, error handling, the engine, and routes so the
//! binary entrypoint and integration tests build the same application.

pub mod auth;
pub mod config;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
