//! Repository for courses

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::error::map_unique;
use crate::schema::Course;
use crate::Result;

const COURSE_COLUMNS: &str = "id, user_id, name, study_guide, schedule_data, duration_weeks, \
                              start_date, created_at, updated_at";

/// Repository for managing course records
pub struct CoursesRepo {
    pool: SqlitePool,
}

impl CoursesRepo {
    /// Create a new repository instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new course and return the course id.
    ///
    /// Course names are unique per user.
    pub async fn create(
        &self,
        user_id: i64,
        name: &str,
        study_guide: &str,
        schedule_data: &str,
        duration_weeks: i64,
        start_date: Option<NaiveDate>,
    ) -> Result<i64> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO courses
             (user_id, name, study_guide, schedule_data, duration_weeks, start_date,
              created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
        )
        .bind(user_id)
        .bind(name)
        .bind(study_guide)
        .bind(schedule_data)
        .bind(duration_weeks)
        .bind(start_date)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique(e, format!("course '{}' for this user", name)))?;

        Ok(result.last_insert_rowid())
    }

    /// Find a course by id
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses WHERE id = ?1",
            COURSE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    /// Find all courses for a user, newest first
    pub async fn find_by_user(&self, user_id: i64) -> Result<Vec<Course>> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses WHERE user_id = ?1 ORDER BY created_at DESC",
            COURSE_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(courses)
    }

    /// Find a course by user and name
    pub async fn find_by_name(&self, user_id: i64, name: &str) -> Result<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {} FROM courses WHERE user_id = ?1 AND name = ?2",
            COURSE_COLUMNS
        ))
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    /// Update the generated study guide
    pub async fn update_study_guide(&self, id: i64, study_guide: &str) -> Result<()> {
        sqlx::query("UPDATE courses SET study_guide = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(study_guide)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Update the raw schedule text
    pub async fn update_schedule_data(&self, id: i64, schedule_data: &str) -> Result<()> {
        sqlx::query("UPDATE courses SET schedule_data = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(schedule_data)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Set the schedule start date
    pub async fn set_start_date(&self, id: i64, start_date: NaiveDate) -> Result<()> {
        sqlx::query("UPDATE courses SET start_date = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(start_date)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Delete a course; activities, completions, progress, streaks, and
    /// checkpoints cascade
    pub async fn delete(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM courses WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Check that a course belongs to a user
    pub async fn verify_ownership(&self, course_id: i64, user_id: i64) -> Result<bool> {
        let owner: Option<(i64,)> =
            sqlx::query_as("SELECT user_id FROM courses WHERE id = ?1")
                .bind(course_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(owner.map(|(id,)| id == user_id).unwrap_or(false))
    }
}
