//! Capability resolution: per-user override → role default → deny.

pub mod resolver;

pub use resolver::PermissionResolver;
