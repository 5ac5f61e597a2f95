//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts

pub mod badge;
pub mod challenge;
pub mod task;
pub mod task_progress;
pub mod user;
