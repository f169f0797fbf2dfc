//! Repository for checkpoint tests

use sqlx::SqlitePool;
use studium_core::ParsedCheckpoint;

use crate::schema::CheckpointTest;
use crate::Result;

const INSERT_CHECKPOINT: &str = "INSERT INTO checkpoint_tests
     (course_id, checkpoint_number, week_after, title, questions, solutions)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

/// Repository for managing checkpoint test records
pub struct CheckpointsRepo {
    pool: SqlitePool,
}

impl CheckpointsRepo {
    /// Create a new repository instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a single parsed checkpoint and return its id
    pub async fn create(&self, checkpoint: &ParsedCheckpoint) -> Result<i64> {
        let result = sqlx::query(INSERT_CHECKPOINT)
            .bind(checkpoint.course_id)
            .bind(checkpoint.checkpoint_number)
            .bind(checkpoint.week_after)
            .bind(&checkpoint.title)
            .bind(&checkpoint.questions)
            .bind(&checkpoint.solutions)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Bulk-insert parsed checkpoints in a single transaction
    pub async fn create_many(&self, checkpoints: &[ParsedCheckpoint]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for checkpoint in checkpoints {
            sqlx::query(INSERT_CHECKPOINT)
                .bind(checkpoint.course_id)
                .bind(checkpoint.checkpoint_number)
                .bind(checkpoint.week_after)
                .bind(&checkpoint.title)
                .bind(&checkpoint.questions)
                .bind(&checkpoint.solutions)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// All checkpoints for a course, in checkpoint order
    pub async fn find_by_course(&self, course_id: i64) -> Result<Vec<CheckpointTest>> {
        let checkpoints = sqlx::query_as::<_, CheckpointTest>(
            "SELECT id, course_id, checkpoint_number, week_after, title, questions, solutions
             FROM checkpoint_tests
             WHERE course_id = ?1
             ORDER BY checkpoint_number",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(checkpoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use studium_core::schedule::parse_checkpoints;

    const SAMPLE_SCHEDULE: &str = "Week 2 (Day 8-14)\n\
        - Day 8: Structs\n\
        Checkpoint 1: Fundamentals\n\
        Questions:\n1. What is a variable?\n\
        Solutions:\n1. A named storage location.\n\
        Week 4 (Day 22-28)\n\
        Checkpoint 2: Ownership\n\
        Questions:\n1. What is a move?\n\
        Solutions:\n1. A transfer of ownership.\n";

    async fn course(db: &Database) -> i64 {
        let user_id = db
            .users()
            .create("kate", "kate@example.com", "hash")
            .await
            .unwrap();
        db.courses()
            .create(user_id, "Rust", "", SAMPLE_SCHEDULE, 4, None)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_bulk_insert_and_find() {
        let db = Database::in_memory().await.unwrap();
        let course_id = course(&db).await;
        let repo = db.checkpoints();

        let parsed = parse_checkpoints(SAMPLE_SCHEDULE, course_id);
        assert_eq!(parsed.len(), 2);
        repo.create_many(&parsed).await.unwrap();

        let stored = repo.find_by_course(course_id).await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].title, "Fundamentals");
        assert_eq!(stored[0].week_after, 2);
        assert_eq!(stored[1].title, "Ownership");
        assert_eq!(stored[1].week_after, 4);
        assert!(stored[1].questions.contains("What is a move?"));
    }

    #[tokio::test]
    async fn test_course_without_checkpoints() {
        let db = Database::in_memory().await.unwrap();
        let course_id = course(&db).await;
        assert!(db
            .checkpoints()
            .find_by_course(course_id)
            .await
            .unwrap()
            .is_empty());
    }
}
