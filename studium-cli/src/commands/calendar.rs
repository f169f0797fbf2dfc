//! Calendar command - month view of a course

use chrono::Datelike;
use clap::Args;
use studium_core::Config;
use studium_db::DayStatus;

use super::{open_database, require_course, require_user, today};

/// Show the month calendar for a course
#[derive(Args, Debug)]
pub struct CalendarArgs {
    /// Course name
    pub course: String,

    /// Owning user
    #[arg(short, long)]
    pub user: String,

    /// Year; defaults to the current year
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Month (1-12); defaults to the current month
    #[arg(short, long)]
    pub month: Option<u32>,
}

impl CalendarArgs {
    /// Execute the calendar command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                anyhow::bail!("Month must be between 1 and 12");
            }
        }

        let db = open_database(config).await?;
        let user = require_user(&db, &self.user).await?;
        let course = require_course(&db, user.id, &self.course).await?;

        let now = today();
        let year = self.year.unwrap_or_else(|| now.year());
        let month = self.month.unwrap_or_else(|| now.month());

        let days = db.progress().calendar_month(course.id, year, month).await?;

        println!("{} - {:04}-{:02}", course.name, year, month);
        println!();

        if days.is_empty() {
            println!("No activities scheduled this month.");
            return Ok(());
        }

        for day in &days {
            let symbol = status_symbol(day.status);
            let test_marker = if day.is_test_day { " [test]" } else { "" };
            println!(
                "  {} {} {}/{} completed{}",
                day.date, symbol, day.completed, day.total, test_marker
            );
        }

        println!();
        println!("Legend: # complete, + partial, . scheduled");

        Ok(())
    }
}

fn status_symbol(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Complete => "#",
        DayStatus::Partial => "+",
        DayStatus::Inactive => ".",
        DayStatus::Empty => " ",
    }
}
