//! Sign and inspect tokens with the configured secret.

use std::time::Duration;

use clap::{Args, ValueEnum};

use warden_auth::{TokenCodec, TokenPurpose};
use warden_core::config::AppConfig;
use warden_core::error::AppError;

/// Token purpose selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PurposeArg {
    /// Session token
    Session,
    /// Password reset token
    Reset,
}

impl From<PurposeArg> for TokenPurpose {
    fn from(arg: PurposeArg) -> Self {
        match arg {
            PurposeArg::Session => TokenPurpose::Session,
            PurposeArg::Reset => TokenPurpose::Reset,
        }
    }
}

/// Arguments for the issue-token command
#[derive(Debug, Args)]
pub struct IssueTokenArgs {
    /// Subject id to embed
    pub subject_id: String,

    /// Token purpose
    #[arg(long, value_enum, default_value = "session")]
    pub purpose: PurposeArg,

    /// Lifetime in seconds; defaults to the configured TTL for the purpose
    #[arg(long)]
    pub ttl: Option<u64>,
}

/// Arguments for the inspect-token command
#[derive(Debug, Args)]
pub struct InspectTokenArgs {
    /// Token to verify
    pub token: String,

    /// Expected purpose
    #[arg(long, value_enum, default_value = "session")]
    pub purpose: PurposeArg,
}

/// Execute the issue-token command
pub fn issue(args: &IssueTokenArgs, config: &AppConfig) -> Result<(), AppError> {
    if args.subject_id.trim().is_empty() {
        return Err(AppError::missing_subject("Missing user_id"));
    }

    let ttl = args.ttl.unwrap_or(match args.purpose {
        PurposeArg::Session => config.auth.session_ttl_seconds,
        PurposeArg::Reset => config.auth.reset_ttl_seconds,
    });

    let codec = TokenCodec::new(&config.auth);
    let issued = codec.encode(&args.subject_id, args.purpose.into(), Duration::from_secs(ttl))?;

    println!("{}", serde_json::to_string_pretty(&issued)?);
    Ok(())
}

/// Execute the inspect-token command
pub fn inspect(args: &InspectTokenArgs, config: &AppConfig) -> Result<(), AppError> {
    let codec = TokenCodec::new(&config.auth);
    let claims = codec.decode(&args.token, args.purpose.into())?;

    println!("{}", serde_json::to_string_pretty(&claims)?);
    Ok(())
}
