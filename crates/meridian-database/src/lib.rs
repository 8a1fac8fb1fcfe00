//! # meridian-database
//!
//! PostgreSQL connection management and the concrete repository
//! implementations behind the access-control core's provider seams.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
