//! Unconditional access-decision logging.

pub mod sink;

pub use sink::AuditSink;
