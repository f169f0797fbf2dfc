//! Repository for daily progress and course statistics

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::schema::{CalendarDay, DailyProgress, DayStatus, ProgressStats, WeeklyProgress};
use crate::Result;

/// Repository for per-day rollups, statistics, and the calendar view
pub struct ProgressRepo {
    pool: SqlitePool,
}

impl ProgressRepo {
    /// Create a new repository instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Recount completions for one date and upsert the daily rollup.
    ///
    /// `completed_at` latches: it is set the first time the day becomes
    /// fully complete and kept afterwards, even if an activity is later
    /// marked incomplete again.
    pub async fn update_daily_progress(
        &self,
        user_id: i64,
        course_id: i64,
        date: NaiveDate,
    ) -> Result<DailyProgress> {
        let (total, completed): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(a.id), COUNT(ac.activity_id)
             FROM activities a
             LEFT JOIN activity_completions ac ON a.id = ac.activity_id
             WHERE a.course_id = ?1 AND a.scheduled_date = ?2",
        )
        .bind(course_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        let is_complete = total > 0 && completed == total;
        let completed_at = if is_complete { Some(Utc::now()) } else { None };

        sqlx::query(
            "INSERT INTO daily_progress
             (user_id, course_id, date, activities_completed, total_activities,
              is_complete, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(user_id, course_id, date) DO UPDATE SET
               activities_completed = excluded.activities_completed,
               total_activities = excluded.total_activities,
               is_complete = excluded.is_complete,
               completed_at = CASE
                 WHEN excluded.is_complete AND daily_progress.completed_at IS NULL
                 THEN excluded.completed_at
                 ELSE daily_progress.completed_at
               END",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(date)
        .bind(completed)
        .bind(total)
        .bind(is_complete)
        .bind(completed_at)
        .execute(&self.pool)
        .await?;

        let progress = self.daily(user_id, course_id, date).await?;
        progress.ok_or_else(|| {
            crate::Error::NotFound(format!("daily progress for {} after upsert", date))
        })
    }

    /// Daily rollup for a specific date
    pub async fn daily(
        &self,
        user_id: i64,
        course_id: i64,
        date: NaiveDate,
    ) -> Result<Option<DailyProgress>> {
        let progress = sqlx::query_as::<_, DailyProgress>(
            "SELECT id, user_id, course_id, date, activities_completed, total_activities,
                    is_complete, completed_at
             FROM daily_progress
             WHERE user_id = ?1 AND course_id = ?2 AND date = ?3",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(progress)
    }

    /// Daily rollups for a month, ordered by date
    pub async fn monthly(
        &self,
        user_id: i64,
        course_id: i64,
        year: i32,
        month: u32,
    ) -> Result<Vec<DailyProgress>> {
        let progress = sqlx::query_as::<_, DailyProgress>(
            "SELECT id, user_id, course_id, date, activities_completed, total_activities,
                    is_complete, completed_at
             FROM daily_progress
             WHERE user_id = ?1 AND course_id = ?2
               AND strftime('%Y', date) = ?3 AND strftime('%m', date) = ?4
             ORDER BY date",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(year.to_string())
        .bind(format!("{:02}", month))
        .fetch_all(&self.pool)
        .await?;

        Ok(progress)
    }

    /// Aggregate statistics for a course: totals, percentage, days studied,
    /// and the per-week completion breakdown
    pub async fn stats(&self, user_id: i64, course_id: i64) -> Result<ProgressStats> {
        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM activities WHERE course_id = ?1")
                .bind(course_id)
                .fetch_one(&self.pool)
                .await?;

        let (completed,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*)
             FROM activity_completions ac
             JOIN activities a ON ac.activity_id = a.id
             WHERE a.course_id = ?1",
        )
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;

        let (days_studied,): (i64,) = sqlx::query_as(
            "SELECT COUNT(DISTINCT date)
             FROM daily_progress
             WHERE user_id = ?1 AND course_id = ?2 AND activities_completed > 0",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;

        let weekly_progress = sqlx::query_as::<_, WeeklyProgress>(
            "SELECT week_number,
                    COUNT(*) as total,
                    SUM(CASE WHEN ac.id IS NOT NULL THEN 1 ELSE 0 END) as completed
             FROM activities a
             LEFT JOIN activity_completions ac ON a.id = ac.activity_id
             WHERE a.course_id = ?1
             GROUP BY week_number
             ORDER BY week_number",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        let progress_percentage = if total > 0 {
            (completed as f64 / total as f64 * 1000.0).round() / 10.0
        } else {
            0.0
        };

        Ok(ProgressStats {
            total_activities: total,
            completed_activities: completed,
            progress_percentage,
            days_studied,
            weekly_progress,
        })
    }

    /// Per-day completion status for a month, for the calendar view
    pub async fn calendar_month(
        &self,
        course_id: i64,
        year: i32,
        month: u32,
    ) -> Result<Vec<CalendarDay>> {
        let rows: Vec<(NaiveDate, i64, i64, i64)> = sqlx::query_as(
            "SELECT a.scheduled_date,
                    COUNT(DISTINCT a.id),
                    COUNT(DISTINCT ac.activity_id),
                    MAX(CASE WHEN a.activity_type IN ('test', 'checkpoint') THEN 1 ELSE 0 END)
             FROM activities a
             LEFT JOIN activity_completions ac ON a.id = ac.activity_id
             WHERE a.course_id = ?1
               AND strftime('%Y', a.scheduled_date) = ?2
               AND strftime('%m', a.scheduled_date) = ?3
             GROUP BY a.scheduled_date
             ORDER BY a.scheduled_date",
        )
        .bind(course_id)
        .bind(year.to_string())
        .bind(format!("{:02}", month))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(date, total, completed, is_test_day)| CalendarDay {
                date,
                status: DayStatus::from_counts(completed, total),
                completed,
                total,
                is_test_day: is_test_day != 0,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use studium_core::schedule::parse_schedule;

    const SAMPLE_SCHEDULE: &str = "Week 1 (Day 1-7)\n\
        - Day 1: Intro (30 min)\n\
        - Day 2: Practice loops (1 hour)\n\
        Week 2 (Day 8-14)\n\
        - Day 3: Quiz yourself on basics\n";

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 2).unwrap()
    }

    async fn setup() -> (Database, i64, i64) {
        let db = Database::in_memory().await.unwrap();
        let user_id = db
            .users()
            .create("henry", "henry@example.com", "hash")
            .await
            .unwrap();
        let course_id = db
            .courses()
            .create(user_id, "Rust", "", SAMPLE_SCHEDULE, 2, Some(start()))
            .await
            .unwrap();
        let parsed = parse_schedule(SAMPLE_SCHEDULE, course_id, start());
        db.activities().create_many(&parsed).await.unwrap();
        (db, user_id, course_id)
    }

    #[tokio::test]
    async fn test_daily_progress_upsert() {
        let (db, user_id, course_id) = setup().await;
        let repo = db.progress();

        // Nothing completed yet
        let progress = repo
            .update_daily_progress(user_id, course_id, start())
            .await
            .unwrap();
        assert_eq!(progress.total_activities, 1);
        assert_eq!(progress.activities_completed, 0);
        assert!(!progress.is_complete);
        assert!(progress.completed_at.is_none());

        // Complete the single activity on day one
        let day_one = db.activities().find_for_date(course_id, start()).await.unwrap();
        db.completions()
            .mark_complete(day_one[0].id, None)
            .await
            .unwrap();

        let progress = repo
            .update_daily_progress(user_id, course_id, start())
            .await
            .unwrap();
        assert!(progress.is_complete);
        assert!(progress.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_completed_at_latches() {
        let (db, user_id, course_id) = setup().await;
        let repo = db.progress();

        let day_one = db.activities().find_for_date(course_id, start()).await.unwrap();
        db.completions().mark_complete(day_one[0].id, None).await.unwrap();
        let first = repo
            .update_daily_progress(user_id, course_id, start())
            .await
            .unwrap();
        let latched = first.completed_at.unwrap();

        // Undo the completion; the timestamp stays
        db.completions().mark_incomplete(day_one[0].id).await.unwrap();
        let second = repo
            .update_daily_progress(user_id, course_id, start())
            .await
            .unwrap();
        assert!(!second.is_complete);
        assert_eq!(second.completed_at, Some(latched));
    }

    #[tokio::test]
    async fn test_empty_date_is_not_complete() {
        let (db, user_id, course_id) = setup().await;

        let off_schedule = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let progress = db
            .progress()
            .update_daily_progress(user_id, course_id, off_schedule)
            .await
            .unwrap();
        assert_eq!(progress.total_activities, 0);
        assert!(!progress.is_complete);
    }

    #[tokio::test]
    async fn test_stats() {
        let (db, user_id, course_id) = setup().await;
        let repo = db.progress();

        let activities = db.activities().find_by_course(course_id).await.unwrap();
        db.completions().mark_complete(activities[0].id, None).await.unwrap();
        repo.update_daily_progress(user_id, course_id, start()).await.unwrap();

        let stats = repo.stats(user_id, course_id).await.unwrap();
        assert_eq!(stats.total_activities, 3);
        assert_eq!(stats.completed_activities, 1);
        assert_eq!(stats.progress_percentage, 33.3);
        assert_eq!(stats.days_studied, 1);

        assert_eq!(stats.weekly_progress.len(), 2);
        assert_eq!(stats.weekly_progress[0].week_number, 1);
        assert_eq!(stats.weekly_progress[0].total, 2);
        assert_eq!(stats.weekly_progress[0].completed, 1);
        assert_eq!(stats.weekly_progress[1].completed, 0);
    }

    #[tokio::test]
    async fn test_stats_on_empty_course() {
        let db = Database::in_memory().await.unwrap();
        let user_id = db
            .users()
            .create("iris", "iris@example.com", "hash")
            .await
            .unwrap();
        let course_id = db
            .courses()
            .create(user_id, "Empty", "", "", 1, None)
            .await
            .unwrap();

        let stats = db.progress().stats(user_id, course_id).await.unwrap();
        assert_eq!(stats.total_activities, 0);
        assert_eq!(stats.progress_percentage, 0.0);
        assert!(stats.weekly_progress.is_empty());
    }

    #[tokio::test]
    async fn test_calendar_month() {
        let (db, _user_id, course_id) = setup().await;
        let repo = db.progress();

        let activities = db.activities().find_by_course(course_id).await.unwrap();
        // Complete day one fully, leave the rest untouched
        db.completions().mark_complete(activities[0].id, None).await.unwrap();

        let days = repo.calendar_month(course_id, 2024, 9).await.unwrap();
        assert_eq!(days.len(), 3);

        assert_eq!(days[0].status, DayStatus::Complete);
        assert_eq!(days[1].status, DayStatus::Inactive);
        assert!(!days[0].is_test_day);
        // Day three is the quiz day
        assert!(days[2].is_test_day);

        // Out-of-range month is empty
        let empty = repo.calendar_month(course_id, 2024, 12).await.unwrap();
        assert!(empty.is_empty());
    }
}
