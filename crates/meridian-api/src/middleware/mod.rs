//! Tower-layer middleware.

pub mod logging;
