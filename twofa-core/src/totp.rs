// File:    totp.rs
//
// Description: TOTP code generation and windowed verification over the stored seed.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The TOTP engine.
//!
//! Parameters are fixed for this service: HMAC-SHA1 (the interoperable TOTP
//! digest, not SHA-256), 6 digits, 30-second period, Unix epoch 0. The
//! engine reads the wall clock but is otherwise pure; the `*_at` variants
//! take an explicit timestamp for deterministic tests.

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::{Choice, ConstantTimeEq};

use crate::error::CoreError;
use crate::seed::{HexSeed, SEED_BYTES};

/// Number of decimal digits in a code.
pub const CODE_DIGITS: usize = 6;

/// Length of a TOTP period in seconds.
pub const PERIOD_SECS: u64 = 30;

/// Default verification window: one period of tolerance on each side.
pub const DEFAULT_WINDOW: u64 = 1;

type HmacSha1 = Hmac<Sha1>;

/// Whether a candidate is exactly six ASCII digits.
#[must_use]
pub fn is_candidate_well_formed(candidate: &str) -> bool {
    candidate.len() == CODE_DIGITS && candidate.bytes().all(|b| b.is_ascii_digit())
}

/// RFC 4226 HOTP: HMAC-SHA1 over the big-endian counter, dynamic
/// truncation, reduced to six left-zero-padded decimal digits.
fn hotp(seed_bytes: &[u8; SEED_BYTES], counter: u64) -> String {
    let mut mac = HmacSha1::new_from_slice(seed_bytes)
        .expect("HMAC-SHA1 accepts keys of any length");
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = (u32::from(digest[offset] & 0x7f) << 24)
        | (u32::from(digest[offset + 1]) << 16)
        | (u32::from(digest[offset + 2]) << 8)
        | u32::from(digest[offset + 3]);

    format!("{:06}", binary % 1_000_000)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// Computes the code for an explicit Unix timestamp.
///
/// # Errors
///
/// Returns [`CoreError::InvalidHex`] if the seed fails to decode.
pub fn code_at(seed: &HexSeed, unix_time: u64) -> Result<String, CoreError> {
    let bytes = seed.to_bytes()?;
    Ok(hotp(&bytes, unix_time / PERIOD_SECS))
}

/// Computes the current code and the seconds left in its period.
///
/// The remaining validity is always in `[1, 30]`: a code generated at the
/// last second of a period is still valid for that one second.
///
/// # Errors
///
/// Returns [`CoreError::InvalidHex`] if the seed fails to decode.
pub fn current_code(seed: &HexSeed) -> Result<(String, u64), CoreError> {
    let now = unix_now();
    let code = code_at(seed, now)?;
    let valid_for = PERIOD_SECS - (now % PERIOD_SECS);
    Ok((code, valid_for))
}

/// Verifies a candidate against the window around an explicit timestamp.
///
/// Every period in `-window..=+window` is computed and compared with a
/// constant-time equality; the per-offset results are OR-ed without
/// short-circuiting, so response timing does not reveal which offset (if
/// any) matched. Offsets that would underflow counter 0 are skipped.
///
/// # Errors
///
/// * [`CoreError::MalformedCandidateCode`] if the candidate is not exactly
///   six ASCII digits. The boundary layer rejects those before calling, but
///   the engine guards on its own since it is callable independently.
/// * [`CoreError::InvalidHex`] if the seed fails to decode.
pub fn verify_at(
    seed: &HexSeed,
    candidate: &str,
    window: u64,
    unix_time: u64,
) -> Result<bool, CoreError> {
    if !is_candidate_well_formed(candidate) {
        return Err(CoreError::MalformedCandidateCode);
    }
    let bytes = seed.to_bytes()?;
    let counter = unix_time / PERIOD_SECS;

    let mut matched = Choice::from(0);
    for c in counter.saturating_sub(window)..=counter.saturating_add(window) {
        let code = hotp(&bytes, c);
        matched |= code.as_bytes().ct_eq(candidate.as_bytes());
    }
    Ok(bool::from(matched))
}

/// Verifies a candidate against the current wall-clock window.
///
/// # Errors
///
/// Same conditions as [`verify_at`].
pub fn verify(seed: &HexSeed, candidate: &str, window: u64) -> Result<bool, CoreError> {
    verify_at(seed, candidate, window, unix_now())
}
