//! Second-factor (TOTP) enrollment configuration.

use serde::{Deserialize, Serialize};

/// TOTP enrollment configuration.
///
/// Step size, digit count, and drift window are protocol constants owned
/// by the MFA engine; only the enrollment label is configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MfaConfig {
    /// Issuer label embedded in enrollment URIs shown to authenticator
    /// apps. Must not contain spaces or `:`.
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

impl Default for MfaConfig {
    fn default() -> Self {
        Self {
            issuer: default_issuer(),
        }
    }
}

fn default_issuer() -> String {
    "MeridianERP".to_string()
}
