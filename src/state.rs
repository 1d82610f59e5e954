//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use axum::extract::FromRef;
use redis::aio::ConnectionManager;
use sqlx::PgPool;

use crate::{
    config::Config,
    db::PgGradingStore,
    judge::engine::ExecutionEngine,
    services::SubmissionService,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    db: PgPool,

    /// Redis connection manager
    redis: ConnectionManager,

    /// Grading pipeline over the execution engine
    submissions: SubmissionService,

    /// Application configuration
    config: Config,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        db: PgPool,
        redis: ConnectionManager,
        engine: Arc<dyn ExecutionEngine>,
        config: Config,
    ) -> Self {
        let store = Arc::new(PgGradingStore::new(db.clone()));
        let submissions = SubmissionService::new(store, engine, &config.engine);

        Self {
            inner: Arc::new(AppStateInner {
                db,
                redis,
                submissions,
                config,
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get a clone of the Redis connection manager
    pub fn redis(&self) -> ConnectionManager {
        self.inner.redis.clone()
    }

    /// Get a handle to the grading pipeline
    pub fn submissions(&self) -> SubmissionService {
        self.inner.submissions.clone()
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }
}

impl FromRef<AppState> for SubmissionService {
    fn from_ref(state: &AppState) -> Self {
        state.submissions()
    }
}
