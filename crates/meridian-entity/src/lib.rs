//! # meridian-entity
//!
//! Domain entity models for the Meridian ERP access-control core. Every
//! struct in this crate represents a database table row or a domain value
//! object. All entities derive `Debug`, `Clone`, `Serialize`,
//! `Deserialize`, and table-backed entities additionally derive
//! `sqlx::FromRow`.

pub mod audit;
pub mod mfa;
pub mod permission;
pub mod session;
pub mod user;
