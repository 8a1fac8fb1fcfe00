//! # meridian-auth
//!
//! The access-control core of Meridian ERP: for every incoming request it
//! decides who the caller is, whether their session is still valid, and
//! what they are permitted to do — and records the decision.
//!
//! ## Modules
//!
//! - `token` — bearer token signing and verification
//! - `session` — server-side session store and login/logout lifecycle
//! - `password` — Argon2id password hashing for the login flow
//! - `permission` — override → default → deny capability resolution
//! - `mfa` — TOTP second-factor enrollment and verification
//! - `guard` — the per-request orchestrator composing the above
//! - `audit` — unconditional access-decision logging
//! - `provider` — persistence seams implemented by `meridian-database`
//! - `memory` — in-memory providers for tests and single-node development

pub mod audit;
pub mod error;
pub mod guard;
pub mod memory;
pub mod mfa;
pub mod password;
pub mod permission;
pub mod provider;
pub mod session;
pub mod token;

pub use audit::AuditSink;
pub use error::AuthError;
pub use guard::{AccessContext, AccessGuard, GuardRequest, NetworkOrigin};
pub use mfa::{EnrollmentChallenge, MfaEnrollment};
pub use password::PasswordHasher;
pub use permission::PermissionResolver;
pub use session::{SessionManager, SessionStore};
pub use token::{CredentialVerifier, IdentityClaims, TokenIssuer};
