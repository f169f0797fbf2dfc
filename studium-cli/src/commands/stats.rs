//! Stats command - progress statistics and streaks

use clap::Args;
use studium_core::Config;

use super::{open_database, require_course, require_user, today};

/// Show progress statistics for a course
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Course name
    pub course: String,

    /// Owning user
    #[arg(short, long)]
    pub user: String,
}

impl StatsArgs {
    /// Execute the stats command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let db = open_database(config).await?;
        let user = require_user(&db, &self.user).await?;
        let course = require_course(&db, user.id, &self.course).await?;

        let stats = db.progress().stats(user.id, course.id).await?;
        let current = db
            .streaks()
            .current_streak(user.id, course.id, today())
            .await?;
        let streak = db.streaks().get(user.id, course.id).await?;

        println!("Progress for '{}'", course.name);
        println!();
        println!(
            "  Activities: {}/{} completed ({:.1}%)",
            stats.completed_activities, stats.total_activities, stats.progress_percentage
        );
        println!("  Days studied: {}", stats.days_studied);
        println!(
            "  Streak: {} day(s) now, {} at best, {} total study days",
            current, streak.longest_streak, streak.total_study_days
        );

        if !stats.weekly_progress.is_empty() {
            println!();
            println!("  Weekly breakdown:");
            for week in &stats.weekly_progress {
                println!(
                    "    Week {:>2}: {}/{} completed",
                    week.week_number, week.completed, week.total
                );
            }
        }

        Ok(())
    }
}
