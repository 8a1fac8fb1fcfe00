//! The per-request orchestrator.

pub mod access;
pub mod context;

pub use access::AccessGuard;
pub use context::{AccessContext, GuardRequest, NetworkOrigin};
