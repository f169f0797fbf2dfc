//! Chat command - interactive course-topic conversation

use std::io::{self, BufRead, Write};

use clap::Args;
use studium_core::context::{ChatContext, Message, Role};
use studium_core::prompts::{self, PromptContext, PromptKind};
use studium_core::Config;
use studium_llm::{ChatClient, ChatOptions};

/// Talk through a course topic with the assistant.
///
/// Type 'done' when the topic is settled; the assistant then extracts the
/// course name and prints the matching 'course new' invocation.
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// User the suggested command should reference
    #[arg(short, long)]
    pub user: Option<String>,
}

impl ChatArgs {
    /// Execute the chat command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let client = ChatClient::from_config(config)?;
        let system = Message::new(
            Role::System,
            prompts::render(PromptKind::Conversation, &PromptContext::new()),
        );
        let mut context = ChatContext::new();
        // Conversation turns are short; no need for streaming budgets here
        let options = ChatOptions::default().with_max_tokens(800);

        println!("Describe what you want to learn. Type 'done' when the topic is settled.");
        println!();

        let stdin = io::stdin();
        loop {
            print!("you> ");
            io::stdout().flush()?;

            let Some(line) = stdin.lock().lines().next() else {
                break;
            };
            let line = line?;
            let input = line.trim();

            if input.is_empty() {
                continue;
            }
            if input.eq_ignore_ascii_case("done") {
                break;
            }

            context.push(Message::user(input));

            // System prompt plus the trimmed reply window
            let mut messages = vec![system.clone()];
            messages.extend_from_slice(context.reply_window());

            let reply = client.chat(&messages, &options).await?;
            println!();
            println!("{}", reply.trim());
            println!();

            context.push(Message::assistant(reply));
            context.set_buttons(vec!["done".to_string(), "continue".to_string()]);
            println!("[quick replies: {}]", context.buttons().join(" | "));
        }

        if context.history().is_empty() {
            println!("No conversation to extract a topic from.");
            return Ok(());
        }

        let topic = extract_topic(&client, &context, &options).await?;
        println!();
        println!("Course topic: {}", topic);
        match &self.user {
            Some(user) => println!("Create it with: studium course new \"{}\" --user {}", topic, user),
            None => println!("Create it with: studium course new \"{}\" --user <name>", topic),
        }

        Ok(())
    }
}

/// Ask the model to name the course from the tail of the conversation
async fn extract_topic(
    client: &ChatClient,
    context: &ChatContext,
    options: &ChatOptions,
) -> anyhow::Result<String> {
    let transcript = context
        .name_window()
        .iter()
        .map(|m| format!("{}: {}", m.role.as_str(), m.content))
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = prompts::render(
        PromptKind::NameExtraction,
        &PromptContext::new().with_conversation(transcript),
    );

    let name = client.chat(&[Message::user(prompt)], options).await?;
    Ok(name.trim().to_string())
}
