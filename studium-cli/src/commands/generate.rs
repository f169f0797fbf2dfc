//! Generate command - produce theory and test content for an activity

use clap::Args;
use studium_core::context::Message;
use studium_core::prompts::{self, PromptContext, PromptKind};
use studium_core::Config;
use studium_llm::{ChatClient, ChatOptions};

use super::complete::require_owned_activity;
use super::{open_database, require_user};

/// Generate theory and test content for an activity
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Activity id (shown by the today command)
    pub activity_id: i64,

    /// Owning user
    #[arg(short, long)]
    pub user: String,

    /// Regenerate even when content already exists
    #[arg(short, long)]
    pub force: bool,
}

impl GenerateArgs {
    /// Execute the generate command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let db = open_database(config).await?;
        let user = require_user(&db, &self.user).await?;
        let activity = require_owned_activity(&db, self.activity_id, user.id).await?;

        if activity.content_generated && !self.force {
            println!(
                "Activity #{} already has generated content (use --force to regenerate)",
                activity.id
            );
            return Ok(());
        }

        let course = db
            .courses()
            .find_by_id(activity.course_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Course {} vanished", activity.course_id))?;

        println!("Generating content for: {}", activity.title);

        let client = ChatClient::from_config(config)?;
        let prompt = prompts::render(
            PromptKind::ActivityContent,
            &PromptContext::new()
                .with_topic(&course.name)
                .with_activity(&activity.title),
        );
        let response = client
            .chat(&[Message::user(prompt)], &ChatOptions::default())
            .await?;

        let (theory, questions, solutions) = split_sections(&response);
        db.activities()
            .update_content(activity.id, &theory, &questions, &solutions)
            .await?;

        println!("Stored theory ({} chars) and test content", theory.len());
        if questions.is_empty() {
            println!("Note: the generation contained no Questions section");
        }

        Ok(())
    }
}

/// Split a generated response into theory, questions, and solutions.
///
/// Sections are introduced by `Theory:`, `Questions:`, and `Solutions:`
/// header lines; text before the first header counts as theory. Missing
/// sections come back empty, matching the lenient handling of generated
/// text elsewhere.
fn split_sections(text: &str) -> (String, String, String) {
    #[derive(PartialEq)]
    enum Section {
        Theory,
        Questions,
        Solutions,
    }

    let mut theory = String::new();
    let mut questions = String::new();
    let mut solutions = String::new();
    let mut section = Section::Theory;

    for line in text.lines() {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();

        if lower == "theory:" {
            section = Section::Theory;
            continue;
        }
        if lower == "questions:" {
            section = Section::Questions;
            continue;
        }
        if lower == "solutions:" {
            section = Section::Solutions;
            continue;
        }

        let buffer = match section {
            Section::Theory => &mut theory,
            Section::Questions => &mut questions,
            Section::Solutions => &mut solutions,
        };
        if !buffer.is_empty() {
            buffer.push('\n');
        }
        buffer.push_str(line);
    }

    (
        theory.trim().to_string(),
        questions.trim().to_string(),
        solutions.trim().to_string(),
    )
}
