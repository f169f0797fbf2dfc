//! Today command - show activities for a date

use chrono::NaiveDate;
use clap::Args;
use studium_core::Config;
use studium_db::Activity;

use super::{open_database, require_course, require_user, today};

/// Show activities scheduled for a date
#[derive(Args, Debug)]
pub struct TodayArgs {
    /// Owning user
    #[arg(short, long)]
    pub user: String,

    /// Limit to one course; all courses otherwise
    #[arg(short, long)]
    pub course: Option<String>,

    /// Date to show (YYYY-MM-DD); defaults to today
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

impl TodayArgs {
    /// Execute the today command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let db = open_database(config).await?;
        let user = require_user(&db, &self.user).await?;
        let date = self.date.unwrap_or_else(today);

        let courses = match &self.course {
            Some(name) => vec![require_course(&db, user.id, name).await?],
            None => db.courses().find_by_user(user.id).await?,
        };

        if courses.is_empty() {
            println!("No courses yet. Create one with 'studium course new <topic>'.");
            return Ok(());
        }

        println!("Activities for {}", date);
        println!();

        let mut any = false;
        for course in &courses {
            let activities = db.activities().find_for_date(course.id, date).await?;
            if activities.is_empty() {
                continue;
            }
            any = true;

            println!("{}:", course.name);
            for activity in &activities {
                print_activity(activity);
            }
            println!();
        }

        if !any {
            println!("Nothing scheduled. Enjoy the free day!");
        }

        Ok(())
    }
}

fn print_activity(activity: &Activity) {
    let marker = if activity.is_completed() { "x" } else { " " };
    println!(
        "  [{}] #{} {} ({} min, {})",
        marker, activity.id, activity.title, activity.duration_minutes, activity.activity_type
    );
    if let Some(ref notes) = activity.notes {
        println!("        notes: {}", notes);
    }
}
