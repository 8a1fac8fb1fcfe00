//! Argon2id password hashing for the login flow.

pub mod hasher;

pub use hasher::PasswordHasher;
