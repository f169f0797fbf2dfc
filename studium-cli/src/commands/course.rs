//! Course management commands

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use studium_core::context::Message;
use studium_core::dates::next_monday;
use studium_core::prompts::{self, PromptContext, PromptKind};
use studium_core::schedule::{parse_checkpoints, parse_schedule};
use studium_core::Config;
use studium_llm::{ChatClient, ChatOptions};

use super::{open_database, require_course, require_user, today};

/// Default course length in weeks
const DEFAULT_DURATION_WEEKS: i64 = 20;

/// Course management commands
#[derive(Args, Debug)]
pub struct CourseArgs {
    #[command(subcommand)]
    pub command: CourseCommand,
}

#[derive(Subcommand, Debug)]
pub enum CourseCommand {
    /// Generate and store a new course
    New {
        /// Course topic (also the course name)
        topic: String,

        /// Owning user
        #[arg(short, long)]
        user: String,

        /// Course length in weeks
        #[arg(short, long, default_value_t = DEFAULT_DURATION_WEEKS)]
        weeks: i64,

        /// Schedule start date (YYYY-MM-DD); defaults to next Monday
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Show what would be generated without calling the API
        #[arg(long)]
        dry_run: bool,
    },

    /// List courses for a user
    List {
        /// Owning user
        #[arg(short, long)]
        user: String,
    },

    /// Show course details
    Show {
        /// Course name
        name: String,

        /// Owning user
        #[arg(short, long)]
        user: String,

        /// Print the full study guide
        #[arg(long)]
        guide: bool,

        /// Print the raw schedule text
        #[arg(long)]
        schedule: bool,
    },

    /// Delete a course and everything attached to it
    Delete {
        /// Course name
        name: String,

        /// Owning user
        #[arg(short, long)]
        user: String,
    },

    /// Re-parse schedules for courses that have no activities
    Fix {
        /// Owning user
        #[arg(short, long)]
        user: String,
    },

    /// Re-anchor a course's schedule at the next Monday
    Shift {
        /// Course name
        name: String,

        /// Owning user
        #[arg(short, long)]
        user: String,
    },
}

impl CourseArgs {
    /// Execute the course command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        match &self.command {
            CourseCommand::New {
                topic,
                user,
                weeks,
                start_date,
                dry_run,
            } => new_course(verbose, config, topic, user, *weeks, *start_date, *dry_run).await,
            CourseCommand::List { user } => list_courses(config, user).await,
            CourseCommand::Show {
                name,
                user,
                guide,
                schedule,
            } => show_course(config, name, user, *guide, *schedule).await,
            CourseCommand::Delete { name, user } => delete_course(config, name, user).await,
            CourseCommand::Fix { user } => fix_courses(config, user).await,
            CourseCommand::Shift { name, user } => shift_course(config, name, user).await,
        }
    }
}

async fn new_course(
    verbose: bool,
    config: &Config,
    topic: &str,
    username: &str,
    weeks: i64,
    start_date: Option<NaiveDate>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let db = open_database(config).await?;
    let user = require_user(&db, username).await?;
    let start = start_date.unwrap_or_else(|| next_monday(today()));

    if verbose {
        tracing::info!(topic, weeks, %start, "Creating course");
    }

    if dry_run {
        println!("[Dry run] Would generate a {}-week course on '{}'", weeks, topic);
        println!("[Dry run] Schedule would start {}", start);
        return Ok(());
    }

    let client = ChatClient::from_config(config)?;

    println!("Generating study guide for '{}'...", topic);
    let guide_prompt = prompts::render(
        PromptKind::StudyGuide,
        &PromptContext::new().with_topic(topic).with_weeks(weeks),
    );
    let study_guide = client
        .chat(&[Message::user(guide_prompt)], &ChatOptions::default())
        .await?;

    println!("Generating {}-week schedule...", weeks);
    let schedule_prompt = prompts::render(
        PromptKind::Schedule,
        &PromptContext::new().with_topic(topic).with_weeks(weeks),
    );
    let schedule_text = client
        .chat(&[Message::user(schedule_prompt)], &ChatOptions::default())
        .await?;

    let course_id = db
        .courses()
        .create(user.id, topic, &study_guide, &schedule_text, weeks, Some(start))
        .await?;

    let activities = parse_schedule(&schedule_text, course_id, start);
    if activities.is_empty() {
        // Lenient parsing fails open: a malformed generation produces zero
        // activities rather than an error, so surface it loudly here
        println!("Warning: no tasks were created from the generated schedule.");
        println!(
            "Inspect it with 'studium course show {} --user {} --schedule', \
             then retry with 'studium course fix --user {}'.",
            topic, username, username
        );
    } else {
        db.activities().create_many(&activities).await?;
        println!("Created {} activities starting {}", activities.len(), start);
    }

    let checkpoints = parse_checkpoints(&schedule_text, course_id);
    if !checkpoints.is_empty() {
        db.checkpoints().create_many(&checkpoints).await?;
        println!("Stored {} checkpoint tests", checkpoints.len());
    }

    db.streaks().initialize(user.id, course_id).await?;

    println!("Course '{}' ready (id {})", topic, course_id);
    Ok(())
}

async fn list_courses(config: &Config, username: &str) -> anyhow::Result<()> {
    let db = open_database(config).await?;
    let user = require_user(&db, username).await?;

    let courses = db.courses().find_by_user(user.id).await?;
    if courses.is_empty() {
        println!("No courses yet. Create one with 'studium course new <topic>'.");
        return Ok(());
    }

    println!("Courses for {}:", username);
    println!();
    for course in &courses {
        let activity_count = db.activities().count_by_course(course.id).await?;
        let start = course
            .start_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "not scheduled".to_string());
        println!(
            "  {} ({} weeks, {} activities, starts {})",
            course.name, course.duration_weeks, activity_count, start
        );
    }

    Ok(())
}

async fn show_course(
    config: &Config,
    name: &str,
    username: &str,
    guide: bool,
    schedule: bool,
) -> anyhow::Result<()> {
    let db = open_database(config).await?;
    let user = require_user(&db, username).await?;
    let course = require_course(&db, user.id, name).await?;

    let activities = db.activities().find_by_course(course.id).await?;
    let checkpoints = db.checkpoints().find_by_course(course.id).await?;
    let completed = activities.iter().filter(|a| a.is_completed()).count();

    println!("Course: {}", course.name);
    println!("  Duration: {} weeks", course.duration_weeks);
    match course.start_date {
        Some(start) => println!("  Start date: {}", start),
        None => println!("  Start date: not set"),
    }
    println!("  Activities: {} ({} completed)", activities.len(), completed);
    println!("  Checkpoints: {}", checkpoints.len());

    if let (Some(first), Some(last)) = (activities.first(), activities.last()) {
        println!("  First task: {} - {}", first.scheduled_date, first.title);
        println!("  Last task: {} - {}", last.scheduled_date, last.title);
    }

    if guide {
        println!();
        println!("Study guide");
        println!("-----------");
        println!("{}", course.study_guide);
    }

    if schedule {
        println!();
        println!("Schedule text");
        println!("-------------");
        println!("{}", course.schedule_data);
    }

    Ok(())
}

async fn delete_course(config: &Config, name: &str, username: &str) -> anyhow::Result<()> {
    let db = open_database(config).await?;
    let user = require_user(&db, username).await?;
    let course = require_course(&db, user.id, name).await?;

    db.courses().delete(course.id).await?;
    println!("Deleted course '{}'", name);

    Ok(())
}

/// Add activities to courses that have none, re-parsing their stored
/// schedule text with a fresh start date
async fn fix_courses(config: &Config, username: &str) -> anyhow::Result<()> {
    let db = open_database(config).await?;
    let user = require_user(&db, username).await?;

    let courses = db.courses().find_by_user(user.id).await?;
    if courses.is_empty() {
        println!("No courses to fix.");
        return Ok(());
    }

    for course in &courses {
        let existing = db.activities().count_by_course(course.id).await?;
        if existing > 0 {
            println!(
                "Course '{}' already has {} activities - skipping",
                course.name, existing
            );
            continue;
        }

        println!("Course '{}' has no activities, re-parsing schedule...", course.name);

        let start = next_monday(today());
        db.courses().set_start_date(course.id, start).await?;

        let activities = parse_schedule(&course.schedule_data, course.id, start);
        if activities.is_empty() {
            println!("  No activities could be parsed from the stored schedule");
            continue;
        }

        db.activities().create_many(&activities).await?;
        println!("  Created {} activities starting {}", activities.len(), start);
    }

    Ok(())
}

/// Shift every activity of a course so the first one lands on next Monday
async fn shift_course(config: &Config, name: &str, username: &str) -> anyhow::Result<()> {
    let db = open_database(config).await?;
    let user = require_user(&db, username).await?;
    let course = require_course(&db, user.id, name).await?;

    let activities = db.activities().find_by_course(course.id).await?;
    let Some(first) = activities.first() else {
        anyhow::bail!(
            "Course '{}' has no activities; run 'studium course fix --user {}' first",
            name,
            username
        );
    };

    let target = next_monday(today());
    let shift = (target - first.scheduled_date).num_days();
    if shift == 0 {
        println!("Course '{}' already starts on {}", name, target);
        return Ok(());
    }

    let moved = db.activities().shift_dates(course.id, shift).await?;
    db.courses().set_start_date(course.id, target).await?;

    println!("Shifted {} activities by {} days", moved, shift);
    println!("First task now on {}", target);

    Ok(())
}
