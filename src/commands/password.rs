//! Hash a password for seeding a subjects file.

use clap::Args;

use warden_auth::{PasswordHasher, PasswordValidator};
use warden_core::config::AppConfig;
use warden_core::error::AppError;

/// Arguments for the hash-password command
#[derive(Debug, Args)]
pub struct HashPasswordArgs {
    /// Plaintext password to hash
    pub password: String,

    /// Hash even if the password breaks the configured policy
    #[arg(long)]
    pub skip_policy: bool,
}

/// Execute the hash-password command
pub fn execute(args: &HashPasswordArgs, config: &AppConfig) -> Result<(), AppError> {
    if !args.skip_policy {
        PasswordValidator::new(&config.password).validate(&args.password)?;
    }
    let hash = PasswordHasher::new().hash_password(&args.password)?;
    println!("{hash}");
    Ok(())
}
