//! CLI command implementations

pub mod calendar;
pub mod chat;
pub mod complete;
pub mod course;
pub mod generate;
pub mod stats;
pub mod today;
pub mod user;

pub use calendar::CalendarArgs;
pub use chat::ChatArgs;
pub use complete::{CompleteArgs, UncompleteArgs};
pub use course::CourseArgs;
pub use generate::GenerateArgs;
pub use stats::StatsArgs;
pub use today::TodayArgs;
pub use user::UserArgs;

use studium_core::Config;
use studium_db::{Course, Database, User};

/// Open the database from config, falling back to the default path
pub(crate) async fn open_database(config: &Config) -> anyhow::Result<Database> {
    let db = match &config.database.path {
        Some(path) => Database::new(path).await?,
        None => Database::default().await?,
    };
    Ok(db)
}

/// Look up a user by name, failing with a friendly message
pub(crate) async fn require_user(db: &Database, username: &str) -> anyhow::Result<User> {
    db.users()
        .find_by_username(username)
        .await?
        .ok_or_else(|| anyhow::anyhow!("No such user: {}", username))
}

/// Look up a course by user and name, failing with a friendly message
pub(crate) async fn require_course(
    db: &Database,
    user_id: i64,
    name: &str,
) -> anyhow::Result<Course> {
    db.courses()
        .find_by_name(user_id, name)
        .await?
        .ok_or_else(|| anyhow::anyhow!("No such course: {}", name))
}

/// Today's date in the local timezone
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
