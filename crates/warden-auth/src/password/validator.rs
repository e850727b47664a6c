//! Password policy enforcement for new credential secrets.

use zxcvbn::Score;

use warden_core::config::PasswordConfig;
use warden_core::error::AppError;

/// Validates new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters.
    min_length: usize,
    /// Minimum zxcvbn score, if the entropy check is enabled.
    min_score: Option<Score>,
}

impl PasswordValidator {
    /// Creates a new validator from password configuration.
    pub fn new(config: &PasswordConfig) -> Self {
        let min_score = match config.min_score {
            0 => None,
            1 => Some(Score::One),
            2 => Some(Score::Two),
            3 => Some(Score::Three),
            _ => Some(Score::Four),
        };

        Self {
            min_length: config.min_length,
            min_score,
        }
    }

    /// Validates a password against all configured policies.
    ///
    /// Returns `Ok(())` if the password meets every requirement,
    /// or an error describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if let Some(min_score) = &self.min_score {
            let estimate = zxcvbn::zxcvbn(password, &[]);
            if estimate.score() < *min_score {
                return Err(AppError::validation(
                    "Password is too weak. Please use a stronger password with more entropy.",
                ));
            }
        }

        Ok(())
    }
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self::new(&PasswordConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::ErrorKind;

    #[test]
    fn test_min_length() {
        let validator = PasswordValidator::default();
        let err = validator.validate("short").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(validator.validate("long enough").is_ok());
    }

    #[test]
    fn test_entropy_check_when_enabled() {
        let validator = PasswordValidator::new(&PasswordConfig {
            min_length: 1,
            min_score: 3,
        });
        assert!(validator.validate("password").is_err());
        assert!(validator.validate("pale-Orbit-92-tundra-Velvet").is_ok());
    }
}
