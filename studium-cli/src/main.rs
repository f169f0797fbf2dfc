//! Studium CLI - Command line interface for Studium
//!
//! Study planning with LLM-generated courses: define a topic, generate a
//! study guide and schedule, then track daily progress and streaks.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use studium_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{
    CalendarArgs, ChatArgs, CompleteArgs, CourseArgs, GenerateArgs, StatsArgs, TodayArgs,
    UncompleteArgs, UserArgs,
};

/// Studium: study planning with generated courses and progress tracking
#[derive(Parser, Debug)]
#[command(name = "studium")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Chat-completions endpoint URL (overrides config and env)
    #[arg(long, global = true, env = "STUDIUM_API_URL")]
    api_url: Option<String>,

    /// Model to use (overrides config and env)
    #[arg(long, global = true, env = "STUDIUM_MODEL")]
    model: Option<String>,

    /// Database path (overrides config and env)
    #[arg(long, global = true, env = "STUDIUM_DB_PATH")]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Manage user accounts
    User(UserArgs),

    /// Manage courses
    #[command(visible_alias = "c")]
    Course(CourseArgs),

    /// Show activities for a date
    #[command(visible_alias = "t")]
    Today(TodayArgs),

    /// Mark an activity complete
    Complete(CompleteArgs),

    /// Mark an activity incomplete
    Uncomplete(UncompleteArgs),

    /// Show the month calendar for a course
    Calendar(CalendarArgs),

    /// Show progress statistics for a course
    Stats(StatsArgs),

    /// Talk through a course topic with the assistant
    Chat(ChatArgs),

    /// Generate theory and test content for an activity
    Generate(GenerateArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config = Config::load_with_overrides(
        cli.api_url.clone(),
        cli.model.clone(),
        cli.db_path.clone(),
    )?;

    if cli.verbose {
        tracing::info!(
            api_url = %config.llm.api_url,
            model = %config.llm.model,
            db_path = ?config.database.path,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("studium {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::User(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Course(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Today(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Complete(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Uncomplete(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Calendar(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Stats(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Chat(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Generate(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Config) => {
            println!("Studium Configuration");
            println!("=====================");
            println!();
            println!("LLM Settings:");
            println!("  api_url: {}", config.llm.api_url);
            println!("  model: {}", config.llm.model);
            println!();
            println!("Database:");
            match config.database.path {
                Some(ref path) => println!("  path: {}", path.display()),
                None => println!("  path: (default)"),
            }
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("Studium - study planning with generated courses");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
