//! User progress repository

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use crate::{
    error::AppResult,
    models::{Difficulty, UserProgress},
};

/// Repository for user progress database operations
pub struct ProgressRepository;

impl ProgressRepository {
    /// Find a user's progress row
    pub async fn find(pool: &PgPool, user_id: &str) -> AppResult<Option<UserProgress>> {
        let progress = sqlx::query_as::<_, UserProgress>(
            r#"SELECT * FROM user_progress WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(progress)
    }

    /// Count one solved question for `user_id` in a single transaction
    ///
    /// The row is locked for the read-modify-write. A user without a row
    /// gets one inserted with the already-incremented counters; if another
    /// transaction creates it first, the insert yields nothing and we fall
    /// back to the locked update path.
    pub async fn record_solved(
        pool: &PgPool,
        user_id: &str,
        difficulty: Difficulty,
        at: DateTime<Utc>,
    ) -> AppResult<UserProgress> {
        let mut tx = pool.begin().await?;

        let saved = match Self::lock(&mut tx, user_id).await? {
            Some(mut progress) => {
                progress.record_solved(difficulty, at);
                Self::update(&mut tx, &progress).await?
            }
            None => {
                let mut progress = UserProgress::fresh(user_id, at);
                progress.record_solved(difficulty, at);

                match Self::insert_if_absent(&mut tx, &progress).await? {
                    Some(created) => created,
                    None => {
                        let mut progress = Self::lock(&mut tx, user_id)
                            .await?
                            .unwrap_or_else(|| UserProgress::fresh(user_id, at));
                        progress.record_solved(difficulty, at);
                        Self::update(&mut tx, &progress).await?
                    }
                }
            }
        };

        tx.commit().await?;
        Ok(saved)
    }

    async fn lock(
        tx: &mut Transaction<'_, Postgres>,
        user_id: &str,
    ) -> AppResult<Option<UserProgress>> {
        let progress = sqlx::query_as::<_, UserProgress>(
            r#"SELECT * FROM user_progress WHERE user_id = $1 FOR UPDATE"#,
        )
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(progress)
    }

    async fn insert_if_absent(
        tx: &mut Transaction<'_, Postgres>,
        progress: &UserProgress,
    ) -> AppResult<Option<UserProgress>> {
        let created = sqlx::query_as::<_, UserProgress>(
            r#"
            INSERT INTO user_progress (
                user_id, total_solved, easy_solved, medium_solved, hard_solved,
                skill_level, preferred_categories, weak_categories, last_activity_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(&progress.user_id)
        .bind(progress.total_solved)
        .bind(progress.easy_solved)
        .bind(progress.medium_solved)
        .bind(progress.hard_solved)
        .bind(&progress.skill_level)
        .bind(&progress.preferred_categories)
        .bind(&progress.weak_categories)
        .bind(progress.last_activity_at)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(created)
    }

    async fn update(
        tx: &mut Transaction<'_, Postgres>,
        progress: &UserProgress,
    ) -> AppResult<UserProgress> {
        let updated = sqlx::query_as::<_, UserProgress>(
            r#"
            UPDATE user_progress
            SET
                total_solved = $2,
                easy_solved = $3,
                medium_solved = $4,
                hard_solved = $5,
                skill_level = $6,
                last_activity_at = $7,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(&progress.user_id)
        .bind(progress.total_solved)
        .bind(progress.easy_solved)
        .bind(progress.medium_solved)
        .bind(progress.hard_solved)
        .bind(&progress.skill_level)
        .bind(progress.last_activity_at)
        .fetch_one(&mut **tx)
        .await?;

        Ok(updated)
    }
}
