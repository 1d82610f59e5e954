//! Progress service
//!
//! [`ProgressUpdater`] is the only writer of `user_progress`; it runs after
//! a fully-passing submission has been recorded.

use std::sync::Arc;

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;

use crate::{
    db::{repositories::ProgressRepository, GradingStore},
    error::AppResult,
    models::{Difficulty, UserProgress},
};

/// Advances solved counters and the derived skill tier
#[derive(Clone)]
pub struct ProgressUpdater {
    store: Arc<dyn GradingStore>,
}

impl ProgressUpdater {
    pub fn new(store: Arc<dyn GradingStore>) -> Self {
        Self { store }
    }

    /// Count one solved question of the given difficulty
    pub async fn record_solved(
        &self,
        user_id: &str,
        difficulty: Difficulty,
    ) -> AppResult<UserProgress> {
        let now = Utc::now();
        let progress = self.store.record_solved(user_id, difficulty, now).await?;

        info!(
            user_id = %user_id,
            difficulty = %difficulty,
            total_solved = progress.total_solved,
            skill_level = %progress.skill_level,
            "Progress updated"
        );

        Ok(progress)
    }
}

/// Read side of user progress
pub struct ProgressService;

impl ProgressService {
    /// Progress for a user; users who never solved anything get the zero view
    pub async fn get_progress(pool: &PgPool, user_id: &str) -> AppResult<UserProgress> {
        Ok(ProgressRepository::find(pool, user_id)
            .await?
            .unwrap_or_else(|| UserProgress::fresh(user_id, Utc::now())))
    }
}
