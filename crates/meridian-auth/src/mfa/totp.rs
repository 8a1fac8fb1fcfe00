//! RFC 6238 time-based one-time codes over HMAC-SHA-1.
//!
//! Codes are 6 digits on a 30-second step. Verification checks the
//! explicit offset set `{-2, -1, 0, 1, 2}` in that order — a code valid
//! for [now−60s, now+60s] is accepted. The generosity trades a small
//! replay window for resilience to client clock drift; code reuse inside
//! the window is not rejected here (no nonce cache).

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha1::Sha1;

use meridian_core::error::AppError;
use meridian_core::result::AppResult;

type HmacSha1 = Hmac<Sha1>;

/// Time-step length in seconds.
pub const STEP_SECONDS: i64 = 30;

/// Number of digits in a code.
pub const CODE_DIGITS: u32 = 6;

/// Step offsets checked during verification, in order.
pub const DRIFT_OFFSETS: [i64; 5] = [-2, -1, 0, 1, 2];

/// Length of a freshly generated shared secret, in bytes.
const SECRET_BYTES: usize = 20;

/// Generates a cryptographically random shared secret, base32-encoded
/// without padding (the alphabet authenticator apps expect).
pub fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    base32::encode(base32::Alphabet::Rfc4648 { padding: false }, &bytes)
}

/// Decodes a base32 shared secret into raw key bytes.
pub fn decode_secret(secret: &str) -> AppResult<Vec<u8>> {
    base32::decode(base32::Alphabet::Rfc4648 { padding: false }, secret)
        .ok_or_else(|| AppError::validation("Shared secret is not valid base32"))
}

/// Computes the code for the step containing `time`.
pub fn code_at(secret: &str, time: DateTime<Utc>) -> AppResult<String> {
    let key = decode_secret(secret)?;
    let step = time.timestamp() / STEP_SECONDS;
    hotp_code(&key, step as u64)
}

/// Checks `code` against the drift window around `now`.
///
/// Returns `Ok(false)` on any mismatch; errors are reserved for an
/// undecodable secret or HMAC failure.
pub fn verify(secret: &str, code: &str, now: DateTime<Utc>) -> AppResult<bool> {
    let key = decode_secret(secret)?;
    let current_step = now.timestamp() / STEP_SECONDS;

    for offset in DRIFT_OFFSETS {
        let step = current_step + offset;
        if step < 0 {
            continue;
        }
        if hotp_code(&key, step as u64)? == code {
            return Ok(true);
        }
    }

    Ok(false)
}

/// RFC 4226 HOTP: HMAC-SHA-1 over the big-endian counter, dynamically
/// truncated to [`CODE_DIGITS`] decimal digits.
fn hotp_code(key: &[u8], counter: u64) -> AppResult<String> {
    let mut mac = HmacSha1::new_from_slice(key)
        .map_err(|e| AppError::internal(format!("HMAC key rejected: {e}")))?;
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = ((digest[offset] & 0x7f) as u32) << 24
        | (digest[offset + 1] as u32) << 16
        | (digest[offset + 2] as u32) << 8
        | (digest[offset + 3] as u32);

    let code = binary % 10u32.pow(CODE_DIGITS);
    Ok(format!("{code:0width$}", width = CODE_DIGITS as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    // RFC 4226 appendix D reference values for the ASCII key
    // "12345678901234567890", counters 0 through 9.
    const RFC4226_KEY: &[u8] = b"12345678901234567890";
    const RFC4226_CODES: [&str; 10] = [
        "755224", "287082", "359152", "969429", "338314", "254676", "287922", "162583", "399871",
        "520489",
    ];

    #[test]
    fn test_hotp_reference_vectors() {
        for (counter, expected) in RFC4226_CODES.iter().enumerate() {
            assert_eq!(
                hotp_code(RFC4226_KEY, counter as u64).unwrap(),
                *expected,
                "counter {counter}"
            );
        }
    }

    #[test]
    fn test_generated_secret_decodes_to_20_bytes() {
        let secret = generate_secret();
        assert_eq!(decode_secret(&secret).unwrap().len(), 20);
    }

    #[test]
    fn test_invalid_base32_is_rejected() {
        assert!(decode_secret("not base32!!").is_err());
    }

    #[test]
    fn test_verify_accepts_current_step() {
        let secret = generate_secret();
        let now = Utc::now();
        let code = code_at(&secret, now).unwrap();
        assert!(verify(&secret, &code, now).unwrap());
    }

    #[test]
    fn test_verify_accepts_two_steps_of_drift() {
        let secret = generate_secret();
        let now = Utc::now();
        for offset in [-2i64, -1, 1, 2] {
            let drifted = now + Duration::seconds(offset * STEP_SECONDS);
            let code = code_at(&secret, drifted).unwrap();
            assert!(verify(&secret, &code, now).unwrap(), "offset {offset}");
        }
    }

    #[test]
    fn test_verify_rejects_three_steps_of_drift() {
        let secret = generate_secret();
        // Pin `now` to a step boundary so ±3 steps cannot round into the
        // window.
        let now = DateTime::from_timestamp(1_700_000_010, 0).unwrap();
        for offset in [-3i64, 3] {
            let drifted = now + Duration::seconds(offset * STEP_SECONDS);
            let code = code_at(&secret, drifted).unwrap();
            assert!(!verify(&secret, &code, now).unwrap(), "offset {offset}");
        }
    }

    #[test]
    fn test_codes_from_another_secret_fail() {
        let now = Utc::now();
        let code = code_at(&generate_secret(), now).unwrap();
        // Astronomically unlikely to collide with a fresh secret's code
        // at every offset in the window.
        let other = generate_secret();
        let own = code_at(&other, now).unwrap();
        if own != code {
            assert!(!verify(&other, &code, now).unwrap());
        }
    }
}
