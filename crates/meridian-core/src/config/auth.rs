//! Bearer token configuration.
//!
//! The signing secret and issuer are deliberately plain configuration
//! values: they are injected into the credential verifier at construction
//! time and never read from ambient state.

use serde::{Deserialize, Serialize};

/// Bearer token signing and validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    pub token_secret: String,
    /// Token TTL in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Issuer claim stamped into and required from every token.
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

fn default_token_ttl() -> u64 {
    60
}

fn default_issuer() -> String {
    "meridian-erp".to_string()
}
