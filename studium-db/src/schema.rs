//! Database schema types and models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Registered user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// A course: topic, generated study guide, and raw schedule text
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub study_guide: String,
    pub schedule_data: String,
    pub duration_weeks: i64,
    pub start_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A dated activity, joined with its completion state
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Activity {
    pub id: i64,
    pub course_id: i64,
    pub week_number: i64,
    pub day_number: i64,
    pub day_of_week: i64,
    pub scheduled_date: NaiveDate,
    pub title: String,
    pub description: String,
    pub duration_minutes: i64,
    pub activity_type: String,
    pub theory_content: Option<String>,
    pub test_questions: Option<String>,
    pub test_solutions: Option<String>,
    pub content_generated: bool,
    /// From the completions join; None when not completed
    pub completed_at: Option<DateTime<Utc>>,
    /// Completion notes, when completed with notes
    pub notes: Option<String>,
}

impl Activity {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Per-day completion rollup for a user and course
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DailyProgress {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub date: NaiveDate,
    pub activities_completed: i64,
    pub total_activities: i64,
    pub is_complete: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Streak bookkeeping for a user and course
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserStreak {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub last_activity_date: Option<NaiveDate>,
    pub total_study_days: i64,
}

impl Default for UserStreak {
    /// Zeroed streak info, returned when no record exists yet
    fn default() -> Self {
        Self {
            id: 0,
            user_id: 0,
            course_id: 0,
            current_streak: 0,
            longest_streak: 0,
            last_activity_date: None,
            total_study_days: 0,
        }
    }
}

/// A periodic test extracted from the generated schedule
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CheckpointTest {
    pub id: i64,
    pub course_id: i64,
    pub checkpoint_number: i64,
    pub week_after: i64,
    pub title: String,
    pub questions: String,
    pub solutions: String,
}

/// Per-week completion rollup within course statistics
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WeeklyProgress {
    pub week_number: i64,
    pub total: i64,
    pub completed: i64,
}

/// Aggregated course statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressStats {
    pub total_activities: i64,
    pub completed_activities: i64,
    pub progress_percentage: f64,
    pub days_studied: i64,
    pub weekly_progress: Vec<WeeklyProgress>,
}

/// Completion status of one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    /// No activities scheduled
    Empty,
    /// Activities scheduled, none completed
    Inactive,
    /// Some but not all completed
    Partial,
    /// All completed
    Complete,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Empty => "empty",
            DayStatus::Inactive => "inactive",
            DayStatus::Partial => "partial",
            DayStatus::Complete => "complete",
        }
    }

    /// Derive a status from completed/total counts
    pub fn from_counts(completed: i64, total: i64) -> Self {
        if total == 0 {
            DayStatus::Empty
        } else if completed == 0 {
            DayStatus::Inactive
        } else if completed == total {
            DayStatus::Complete
        } else {
            DayStatus::Partial
        }
    }
}

/// One day in the calendar month view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub status: DayStatus,
    pub completed: i64,
    pub total: i64,
    /// True when any activity that day is a test or checkpoint
    pub is_test_day: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_status_from_counts() {
        assert_eq!(DayStatus::from_counts(0, 0), DayStatus::Empty);
        assert_eq!(DayStatus::from_counts(0, 3), DayStatus::Inactive);
        assert_eq!(DayStatus::from_counts(2, 3), DayStatus::Partial);
        assert_eq!(DayStatus::from_counts(3, 3), DayStatus::Complete);
    }

    #[test]
    fn test_day_status_as_str() {
        assert_eq!(DayStatus::Partial.as_str(), "partial");
        assert_eq!(DayStatus::Complete.as_str(), "complete");
    }
}
