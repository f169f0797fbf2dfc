//! Repository for activity completions

use chrono::Utc;
use sqlx::SqlitePool;

use crate::Result;

/// Repository for marking activities complete and incomplete
pub struct CompletionsRepo {
    pool: SqlitePool,
}

impl CompletionsRepo {
    /// Create a new repository instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Mark an activity complete.
    ///
    /// Returns false when the activity was already completed; the existing
    /// completion (and its notes) is left untouched.
    pub async fn mark_complete(&self, activity_id: i64, notes: Option<&str>) -> Result<bool> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO activity_completions (activity_id, completed_at, notes)
             VALUES (?1, ?2, ?3)",
        )
        .bind(activity_id)
        .bind(Utc::now())
        .bind(notes)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove an activity's completion.
    ///
    /// Returns false when the activity was not completed.
    pub async fn mark_incomplete(&self, activity_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM activity_completions WHERE activity_id = ?1")
            .bind(activity_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Check whether an activity is completed
    pub async fn is_completed(&self, activity_id: i64) -> Result<bool> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM activity_completions WHERE activity_id = ?1",
        )
        .bind(activity_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use chrono::NaiveDate;
    use studium_core::schedule::parse_schedule;

    async fn activity(db: &Database) -> i64 {
        let user_id = db
            .users()
            .create("grace", "grace@example.com", "hash")
            .await
            .unwrap();
        let course_id = db
            .courses()
            .create(user_id, "Rust", "", "", 1, None)
            .await
            .unwrap();
        let parsed = parse_schedule(
            "Week 1 (Day 1-7)\n- Day 1: Intro\n",
            course_id,
            NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
        );
        db.activities().create(&parsed[0]).await.unwrap()
    }

    #[tokio::test]
    async fn test_complete_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.completions();
        let activity_id = activity(&db).await;

        assert!(!repo.is_completed(activity_id).await.unwrap());
        assert!(repo.mark_complete(activity_id, Some("done early")).await.unwrap());
        assert!(repo.is_completed(activity_id).await.unwrap());

        // Second completion is a no-op
        assert!(!repo.mark_complete(activity_id, None).await.unwrap());

        let stored = db.activities().find_by_id(activity_id).await.unwrap().unwrap();
        assert_eq!(stored.notes.as_deref(), Some("done early"));
    }

    #[tokio::test]
    async fn test_uncomplete() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.completions();
        let activity_id = activity(&db).await;

        repo.mark_complete(activity_id, None).await.unwrap();
        assert!(repo.mark_incomplete(activity_id).await.unwrap());
        assert!(!repo.is_completed(activity_id).await.unwrap());

        // Nothing left to remove
        assert!(!repo.mark_incomplete(activity_id).await.unwrap());
    }
}
