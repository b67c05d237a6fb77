//! docstore CLI
//!
//! Operator tool for inspecting and editing a store file directly.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Duration;
use clap::{Parser, Subcommand};
use docstore::entity::default_refresh_token_ttl;
use docstore::{Store, StoreConfig, StoreError};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

/// docstore CLI
#[derive(Parser, Debug)]
#[command(name = "docstore-cli")]
#[command(about = "Inspect and edit a docstore snapshot file")]
#[command(version)]
struct Args {
    /// Backing snapshot file
    #[arg(short, long, default_value = "./database.json")]
    db: PathBuf,

    /// Delete the existing file before running the command
    #[arg(long)]
    reset: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Post operations
    #[command(subcommand)]
    Post(PostCommand),

    /// User operations
    #[command(subcommand)]
    User(UserCommand),

    /// Refresh token operations
    #[command(subcommand)]
    Token(TokenCommand),

    /// Print the whole snapshot
    Dump,
}

#[derive(Subcommand, Debug)]
enum PostCommand {
    /// Create a post
    Create {
        /// Author user id
        author_id: u64,

        /// Message body
        body: String,
    },

    /// List posts in id order
    List {
        /// Only posts by this author
        #[arg(short, long)]
        author: Option<u64>,
    },

    /// Get a post by id
    Get { id: u64 },

    /// Delete a post by id
    Delete { id: u64 },
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Register a user
    Create {
        email: String,
        credential_hash: String,
    },

    /// Look a user up by email or id
    Get {
        #[arg(required_unless_present = "id")]
        email: Option<String>,

        /// Look up by id instead of email
        #[arg(long, conflicts_with = "email")]
        id: Option<u64>,
    },

    /// Replace a user's email and credential hash
    Update {
        id: u64,
        email: String,
        credential_hash: String,
    },

    /// Set the promoted flag
    Promote {
        id: u64,

        /// Clear the flag instead of setting it
        #[arg(long)]
        revoke: bool,
    },
}

#[derive(Subcommand, Debug)]
enum TokenCommand {
    /// Issue a refresh token
    Issue {
        user_id: u64,

        /// Lifetime in seconds (defaults to the login lifetime)
        #[arg(long)]
        ttl_secs: Option<i64>,
    },

    /// Resolve a token to its user id
    Check { token: String },

    /// Revoke a token
    Revoke { token: String },
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,docstore=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = StoreConfig::builder()
        .path(&args.db)
        .reset_on_open(args.reset)
        .build();

    let store = match Store::open(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open store {}: {}", args.db.display(), e);
            return ExitCode::FAILURE;
        }
    };

    match run(&store, args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(store: &Store, command: Commands) -> docstore::Result<()> {
    match command {
        Commands::Post(cmd) => match cmd {
            PostCommand::Create { author_id, body } => print_json(&store.create_post(body, author_id)?),
            PostCommand::List { author: Some(author) } => print_json(&store.list_posts_by_author(author)?),
            PostCommand::List { author: None } => print_json(&store.list_posts()?),
            PostCommand::Get { id } => print_json(&store.get_post(id)?),
            PostCommand::Delete { id } => store.delete_post(id),
        },
        Commands::User(cmd) => match cmd {
            UserCommand::Create { email, credential_hash } => {
                print_json(&store.create_user(email, credential_hash)?)
            }
            UserCommand::Get { id: Some(id), .. } => print_json(&store.get_user(id)?),
            UserCommand::Get { email: Some(email), .. } => print_json(&store.get_user_by_email(&email)?),
            UserCommand::Get { .. } => Err(StoreError::InvalidInput("email or --id required".to_string())),
            UserCommand::Update { id, email, credential_hash } => {
                print_json(&store.update_user(id, email, credential_hash)?)
            }
            UserCommand::Promote { id, revoke } => print_json(&store.set_promoted(id, !revoke)?),
        },
        Commands::Token(cmd) => match cmd {
            TokenCommand::Issue { user_id, ttl_secs } => {
                let ttl = match ttl_secs {
                    Some(secs) => Duration::try_seconds(secs).ok_or_else(|| {
                        StoreError::InvalidInput(format!("--ttl-secs out of range: {}", secs))
                    })?,
                    None => default_refresh_token_ttl(),
                };
                print_json(&store.issue_refresh_token_with_ttl(user_id, ttl)?)
            }
            TokenCommand::Check { token } => print_json(&store.check_refresh_token(&token)?),
            TokenCommand::Revoke { token } => store.revoke_refresh_token(&token),
        },
        Commands::Dump => print_json(&store.load()?),
    }
}

fn print_json<T: Serialize>(value: &T) -> docstore::Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| StoreError::Corruption(e.to_string()))?;
    println!("{}", text);
    Ok(())
}
