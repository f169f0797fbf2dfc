//! User account commands

use clap::{Args, Subcommand};
use studium_core::{auth, Config};

use super::{open_database, require_user};

/// User account commands
#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Register a new user
    Register {
        /// Username (3-50 characters, letters, digits, underscores)
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (6-100 characters)
        #[arg(short, long)]
        password: String,
    },

    /// Verify credentials and update the last-login timestamp
    Login {
        /// Username
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
}

impl UserArgs {
    /// Execute the user command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        match &self.command {
            UserCommand::Register {
                username,
                email,
                password,
            } => register(config, username, email, password).await,
            UserCommand::Login { username, password } => login(config, username, password).await,
        }
    }
}

async fn register(
    config: &Config,
    username: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    auth::validate_username(username)?;
    auth::validate_email(email)?;
    auth::validate_password(password)?;

    let db = open_database(config).await?;
    let users = db.users();

    if users.find_by_username(username).await?.is_some() {
        anyhow::bail!("Username already exists");
    }
    if users.find_by_email(email).await?.is_some() {
        anyhow::bail!("Email already registered");
    }

    let password_hash = auth::hash_password(password)?;
    let user_id = users.create(username, email, &password_hash).await?;

    tracing::info!(user_id, username, "Registered user");
    println!("Registered user '{}' (id {})", username, user_id);

    Ok(())
}

async fn login(config: &Config, username: &str, password: &str) -> anyhow::Result<()> {
    let db = open_database(config).await?;

    let Ok(user) = require_user(&db, username).await else {
        anyhow::bail!("Invalid username or password");
    };

    if !auth::verify_password(&user.password_hash, password)? {
        anyhow::bail!("Invalid username or password");
    }

    db.users().update_last_login(user.id).await?;

    println!("Login successful. Welcome back, {}!", user.username);
    if let Some(last_login) = user.last_login {
        println!("Previous login: {}", last_login.format("%Y-%m-%d %H:%M UTC"));
    }

    Ok(())
}
