//! CLI command definitions and dispatch.

pub mod password;
pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

use warden_core::config::AppConfig;
use warden_core::error::AppError;

/// Warden: pluggable authentication and session service
#[derive(Debug, Parser)]
#[command(name = "warden", version, about, long_about = None)]
pub struct Cli {
    /// Environment overlay, read from `config/{env}.toml`
    #[arg(short, long, env = "WARDEN_ENV", default_value = "development")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Hash a password with Argon2id
    HashPassword(password::HashPasswordArgs),
    /// Sign a session or reset token
    IssueToken(token::IssueTokenArgs),
    /// Verify a token and print its claims
    InspectToken(token::InspectTokenArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::HashPassword(args) => password::execute(args, &config),
            Commands::IssueToken(args) => token::issue(args, &config),
            Commands::InspectToken(args) => token::inspect(args, &config),
        }
    }
}
