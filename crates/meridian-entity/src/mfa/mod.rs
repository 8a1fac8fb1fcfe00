//! MFA secret entity.

pub mod model;

pub use model::{MfaSecret, MfaStatus};
