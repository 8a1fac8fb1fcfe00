//! Custom Axum extractors.

pub mod meta;

pub use meta::RequestMeta;
