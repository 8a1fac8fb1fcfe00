//! Session management configuration.

use serde::{Deserialize, Serialize};

/// Server-side session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session lifetime in minutes from creation (absolute, activity does
    /// not extend it).
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl_minutes(),
        }
    }
}

fn default_ttl_minutes() -> u64 {
    480
}
