//! Password policy configuration.

use serde::{Deserialize, Serialize};

/// Policy applied to new credential secrets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordConfig {
    /// Minimum password length in characters.
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    /// Minimum zxcvbn score (0..=4). `0` disables the entropy check.
    #[serde(default)]
    pub min_score: u8,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            min_score: 0,
        }
    }
}

fn default_min_length() -> usize {
    8
}
