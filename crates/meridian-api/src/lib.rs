//! # meridian-api
//!
//! Axum surface for the access-control core: the login/logout and MFA
//! endpoints, the guarded admin audit view, and the extractor/middleware
//! glue that feeds the access guard. Business-module routes mount their
//! handlers next to these and call the same guard.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
