//! Repository for study streaks

use chrono::{Duration, NaiveDate};
use sqlx::SqlitePool;

use crate::schema::UserStreak;
use crate::Result;

/// Length of the consecutive run of fully-complete days ending today or
/// yesterday.
///
/// `completed_desc` must be sorted newest first. A run whose most recent
/// day is before yesterday is broken and counts as zero: missing a single
/// day resets the streak once the following day passes.
pub fn streak_from_completed_days(completed_desc: &[NaiveDate], today: NaiveDate) -> i64 {
    let Some(&most_recent) = completed_desc.first() else {
        return 0;
    };

    let yesterday = today - Duration::days(1);
    if most_recent < yesterday {
        return 0;
    }

    let mut expected = if most_recent == today { today } else { yesterday };
    let mut streak = 0;

    for &day in completed_desc {
        if day == expected {
            streak += 1;
            expected -= Duration::days(1);
        } else {
            break;
        }
    }

    streak
}

/// Repository for managing streak records
pub struct StreaksRepo {
    pool: SqlitePool,
}

impl StreaksRepo {
    /// Create a new repository instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Compute the current streak from the daily-progress table
    pub async fn current_streak(
        &self,
        user_id: i64,
        course_id: i64,
        today: NaiveDate,
    ) -> Result<i64> {
        let completed: Vec<(NaiveDate,)> = sqlx::query_as(
            "SELECT date FROM daily_progress
             WHERE user_id = ?1 AND course_id = ?2 AND is_complete = 1
             ORDER BY date DESC",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        let dates: Vec<NaiveDate> = completed.into_iter().map(|(date,)| date).collect();
        Ok(streak_from_completed_days(&dates, today))
    }

    /// Recompute and persist the streak record.
    ///
    /// `longest_streak` never decreases; `total_study_days` counts distinct
    /// days with at least one completed activity.
    pub async fn record(
        &self,
        user_id: i64,
        course_id: i64,
        today: NaiveDate,
    ) -> Result<UserStreak> {
        let current = self.current_streak(user_id, course_id, today).await?;

        let (total_study_days,): (i64,) = sqlx::query_as(
            "SELECT COUNT(DISTINCT date) FROM daily_progress
             WHERE user_id = ?1 AND course_id = ?2 AND activities_completed > 0",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;

        sqlx::query(
            "INSERT INTO user_streaks
             (user_id, course_id, current_streak, longest_streak,
              last_activity_date, total_study_days)
             VALUES (?1, ?2, ?3, ?3, ?4, ?5)
             ON CONFLICT(user_id, course_id) DO UPDATE SET
               current_streak = excluded.current_streak,
               longest_streak = MAX(user_streaks.longest_streak, excluded.current_streak),
               last_activity_date = excluded.last_activity_date,
               total_study_days = excluded.total_study_days",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(current)
        .bind(today)
        .bind(total_study_days)
        .execute(&self.pool)
        .await?;

        self.get(user_id, course_id).await
    }

    /// Streak info for a user and course; zeroed defaults when no record
    /// exists yet
    pub async fn get(&self, user_id: i64, course_id: i64) -> Result<UserStreak> {
        let streak = sqlx::query_as::<_, UserStreak>(
            "SELECT id, user_id, course_id, current_streak, longest_streak,
                    last_activity_date, total_study_days
             FROM user_streaks
             WHERE user_id = ?1 AND course_id = ?2",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(streak.unwrap_or_default())
    }

    /// Create a zeroed streak record for a new course; a no-op when one
    /// already exists
    pub async fn initialize(&self, user_id: i64, course_id: i64) -> Result<()> {
        sqlx::query(
            "INSERT OR IGNORE INTO user_streaks (user_id, course_id) VALUES (?1, ?2)",
        )
        .bind(user_id)
        .bind(course_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
