//! Database layer for Studium
//!
//! Provides persistence for users, courses, activities, completion
//! tracking, daily progress, streaks, and checkpoint tests.

pub mod error;
pub mod repos;
pub mod schema;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub use error::{Error, Result};
pub use repos::{
    activities::ActivitiesRepo, checkpoints::CheckpointsRepo, completions::CompletionsRepo,
    courses::CoursesRepo, progress::ProgressRepo, streaks::StreaksRepo, users::UsersRepo,
};
pub use schema::{
    Activity, CalendarDay, CheckpointTest, Course, DailyProgress, DayStatus, ProgressStats, User,
    UserStreak, WeeklyProgress,
};

const SCHEMA_SQL: &str = include_str!("../migrations/001_initial_schema.sql");

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection from a file path
    pub async fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Io(format!("Failed to create database directory: {}", e)))?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Self::apply_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// Create an in-memory database for testing
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        // A single connection keeps every query on the same in-memory db
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Self::apply_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// Apply the embedded schema migration
    async fn apply_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::raw_sql(SCHEMA_SQL)
            .execute(pool)
            .await
            .map_err(|e| Error::Migration(e.to_string()))?;
        tracing::debug!("Applied database schema");
        Ok(())
    }

    /// Get the default database path (~/.local/share/studium/studium.db)
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| Error::Io("Could not determine data directory".to_string()))?;
        Ok(data_dir.join("studium").join("studium.db"))
    }

    /// Create a database connection at the default path
    pub async fn default() -> Result<Self> {
        Self::new(Self::default_path()?).await
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the users repository
    pub fn users(&self) -> UsersRepo {
        UsersRepo::new(self.pool.clone())
    }

    /// Get the courses repository
    pub fn courses(&self) -> CoursesRepo {
        CoursesRepo::new(self.pool.clone())
    }

    /// Get the activities repository
    pub fn activities(&self) -> ActivitiesRepo {
        ActivitiesRepo::new(self.pool.clone())
    }

    /// Get the completions repository
    pub fn completions(&self) -> CompletionsRepo {
        CompletionsRepo::new(self.pool.clone())
    }

    /// Get the daily-progress repository
    pub fn progress(&self) -> ProgressRepo {
        ProgressRepo::new(self.pool.clone())
    }

    /// Get the streaks repository
    pub fn streaks(&self) -> StreaksRepo {
        StreaksRepo::new(self.pool.clone())
    }

    /// Get the checkpoint-tests repository
    pub fn checkpoints(&self) -> CheckpointsRepo {
        CheckpointsRepo::new(self.pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_database_creation() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let _db = Database::new(&db_path).await.unwrap();
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_schema_tables_exist() {
        let db = Database::in_memory().await.unwrap();

        for table in [
            "users",
            "courses",
            "activities",
            "activity_completions",
            "daily_progress",
            "user_streaks",
            "checkpoint_tests",
        ] {
            let (count,): (i64,) = sqlx::query_as(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name = ?1",
            )
            .bind(table)
            .fetch_one(db.pool())
            .await
            .unwrap();
            assert_eq!(count, 1, "missing table {}", table);
        }
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        // Re-applying the schema must not fail
        Database::apply_schema(db.pool()).await.unwrap();
    }
}
