//! Repository for scheduled activities

use chrono::NaiveDate;
use sqlx::SqlitePool;
use studium_core::ParsedActivity;

use crate::schema::Activity;
use crate::Result;

const ACTIVITY_COLUMNS: &str = "a.id, a.course_id, a.week_number, a.day_number, a.day_of_week, \
     a.scheduled_date, a.title, a.description, a.duration_minutes, a.activity_type, \
     a.theory_content, a.test_questions, a.test_solutions, a.content_generated, \
     ac.completed_at, ac.notes";

const INSERT_ACTIVITY: &str = "INSERT INTO activities
     (course_id, week_number, day_number, day_of_week, scheduled_date,
      title, description, duration_minutes, activity_type)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

/// Repository for managing activity records
pub struct ActivitiesRepo {
    pool: SqlitePool,
}

impl ActivitiesRepo {
    /// Create a new repository instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a single parsed activity and return its id
    pub async fn create(&self, activity: &ParsedActivity) -> Result<i64> {
        let result = sqlx::query(INSERT_ACTIVITY)
            .bind(activity.course_id)
            .bind(activity.week_number)
            .bind(activity.day_number)
            .bind(activity.day_of_week)
            .bind(activity.scheduled_date)
            .bind(&activity.title)
            .bind(&activity.description)
            .bind(activity.duration_minutes)
            .bind(activity.activity_type.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Bulk-insert parsed activities in a single transaction.
    ///
    /// All rows are inserted or none.
    pub async fn create_many(&self, activities: &[ParsedActivity]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for activity in activities {
            sqlx::query(INSERT_ACTIVITY)
                .bind(activity.course_id)
                .bind(activity.week_number)
                .bind(activity.day_number)
                .bind(activity.day_of_week)
                .bind(activity.scheduled_date)
                .bind(&activity.title)
                .bind(&activity.description)
                .bind(activity.duration_minutes)
                .bind(activity.activity_type.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::debug!(count = activities.len(), "Bulk-inserted activities");
        Ok(())
    }

    /// All activities for a course with completion state, in schedule order
    pub async fn find_by_course(&self, course_id: i64) -> Result<Vec<Activity>> {
        let activities = sqlx::query_as::<_, Activity>(&format!(
            "SELECT {}
             FROM activities a
             LEFT JOIN activity_completions ac ON a.id = ac.activity_id
             WHERE a.course_id = ?1
             ORDER BY a.day_number",
            ACTIVITY_COLUMNS
        ))
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(activities)
    }

    /// Activities scheduled on a specific date
    pub async fn find_for_date(&self, course_id: i64, date: NaiveDate) -> Result<Vec<Activity>> {
        let activities = sqlx::query_as::<_, Activity>(&format!(
            "SELECT {}
             FROM activities a
             LEFT JOIN activity_completions ac ON a.id = ac.activity_id
             WHERE a.course_id = ?1 AND a.scheduled_date = ?2
             ORDER BY a.id",
            ACTIVITY_COLUMNS
        ))
        .bind(course_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(activities)
    }

    /// Find an activity by id with its completion state
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Activity>> {
        let activity = sqlx::query_as::<_, Activity>(&format!(
            "SELECT {}
             FROM activities a
             LEFT JOIN activity_completions ac ON a.id = ac.activity_id
             WHERE a.id = ?1",
            ACTIVITY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(activity)
    }

    /// Store generated theory and test content for an activity
    pub async fn update_content(
        &self,
        id: i64,
        theory_content: &str,
        test_questions: &str,
        test_solutions: &str,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE activities
             SET theory_content = ?1,
                 test_questions = ?2,
                 test_solutions = ?3,
                 content_generated = 1
             WHERE id = ?4",
        )
        .bind(theory_content)
        .bind(test_questions)
        .bind(test_solutions)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Shift every activity of a course by a number of days
    pub async fn shift_dates(&self, course_id: i64, days: i64) -> Result<u64> {
        let modifier = format!("{:+} days", days);
        let result = sqlx::query(
            "UPDATE activities SET scheduled_date = date(scheduled_date, ?1)
             WHERE course_id = ?2",
        )
        .bind(modifier)
        .bind(course_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Count activities for a course
    pub async fn count_by_course(&self, course_id: i64) -> Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM activities WHERE course_id = ?1")
                .bind(course_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
