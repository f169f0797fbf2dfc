//! Complete and uncomplete commands

use clap::Args;
use studium_core::Config;
use studium_db::{Activity, Database};

use super::{open_database, require_user, today};

/// Mark an activity complete
#[derive(Args, Debug)]
pub struct CompleteArgs {
    /// Activity id (shown by the today command)
    pub activity_id: i64,

    /// Owning user
    #[arg(short, long)]
    pub user: String,

    /// Optional completion notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl CompleteArgs {
    /// Execute the complete command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let db = open_database(config).await?;
        let user = require_user(&db, &self.user).await?;
        let activity = require_owned_activity(&db, self.activity_id, user.id).await?;

        let newly = db
            .completions()
            .mark_complete(activity.id, self.notes.as_deref())
            .await?;

        if !newly {
            println!("Activity #{} was already completed", activity.id);
            return Ok(());
        }

        println!("Completed: {}", activity.title);

        let progress = db
            .progress()
            .update_daily_progress(user.id, activity.course_id, activity.scheduled_date)
            .await?;
        let streak = db
            .streaks()
            .record(user.id, activity.course_id, today())
            .await?;

        println!(
            "Day progress: {}/{} activities",
            progress.activities_completed, progress.total_activities
        );
        if progress.is_complete {
            println!("All of the day's activities are done!");
        }
        println!(
            "Streak: {} day(s) (best {})",
            streak.current_streak, streak.longest_streak
        );

        Ok(())
    }
}

/// Mark an activity incomplete
#[derive(Args, Debug)]
pub struct UncompleteArgs {
    /// Activity id (shown by the today command)
    pub activity_id: i64,

    /// Owning user
    #[arg(short, long)]
    pub user: String,
}

impl UncompleteArgs {
    /// Execute the uncomplete command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let db = open_database(config).await?;
        let user = require_user(&db, &self.user).await?;
        let activity = require_owned_activity(&db, self.activity_id, user.id).await?;

        let removed = db.completions().mark_incomplete(activity.id).await?;
        if !removed {
            println!("Activity #{} was not completed", activity.id);
            return Ok(());
        }

        db.progress()
            .update_daily_progress(user.id, activity.course_id, activity.scheduled_date)
            .await?;
        db.streaks()
            .record(user.id, activity.course_id, today())
            .await?;

        println!("Marked incomplete: {}", activity.title);

        Ok(())
    }
}

/// Fetch an activity and check it belongs to the user
pub(crate) async fn require_owned_activity(
    db: &Database,
    activity_id: i64,
    user_id: i64,
) -> anyhow::Result<Activity> {
    let activity = db
        .activities()
        .find_by_id(activity_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("No such activity: #{}", activity_id))?;

    if !db
        .courses()
        .verify_ownership(activity.course_id, user_id)
        .await?
    {
        anyhow::bail!("Activity #{} does not belong to this user", activity_id);
    }

    Ok(activity)
}
