//! Post-write pipeline run after every successful progress log.
//!
//! Each stage is a [`ProgressHook`]. Stages run in registration order inside
//! the request that logged the progress. A failing stage is logged and the
//! remaining stages still run; the progress write itself is already
//! committed and is reported as successful.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use stride_core::types::{DbId, Timestamp};

use crate::engine::badges::BadgeEngine;
use crate::error::AppResult;

/// A progress entry that was just persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressLogged {
    pub user_id: DbId,
    pub challenge_id: DbId,
    pub task_id: DbId,
    pub progress_id: DbId,
    /// Clock reading the stages evaluate against.
    pub logged_at: Timestamp,
}

/// One stage of the post-write pipeline.
#[async_trait]
pub trait ProgressHook: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn on_progress_logged(&self, pool: &PgPool, event: &ProgressLogged) -> AppResult<()>;
}

/// Ordered list of [`ProgressHook`] stages.
#[derive(Default, Clone)]
pub struct ProgressPipeline {
    hooks: Vec<Arc<dyn ProgressHook>>,
}

impl ProgressPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The production pipeline: badge evaluation only.
    pub fn with_defaults() -> Self {
        Self::new().with_hook(Arc::new(BadgeEngine))
    }

    pub fn with_hook(mut self, hook: Arc<dyn ProgressHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every stage in order. Returns how many stages failed.
    pub async fn run(&self, pool: &PgPool, event: &ProgressLogged) -> usize {
        let mut failed = 0;
        for hook in &self.hooks {
            if let Err(e) = hook.on_progress_logged(pool, event).await {
                failed += 1;
                tracing::warn!(
                    hook = hook.name(),
                    user_id = event.user_id,
                    challenge_id = event.challenge_id,
                    progress_id = event.progress_id,
                    error = %e,
                    "Post-write stage failed",
                );
            }
        }
        failed
    }
}
