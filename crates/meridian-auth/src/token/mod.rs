//! Bearer token signing and verification.

pub mod claims;
pub mod issuer;
pub mod verifier;

pub use claims::IdentityClaims;
pub use issuer::TokenIssuer;
pub use verifier::CredentialVerifier;
