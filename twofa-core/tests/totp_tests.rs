#![allow(missing_docs)]
use twofa_core::error::CoreError;
use twofa_core::seed::HexSeed;
use twofa_core::totp;

const SEED_HEX: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

// RFC 6238 derivation applied to the 32-byte seed 0x00..0x1f.
const CODE_AT_0: &str = "414783";
const CODE_AT_30: &str = "555770";
const CODE_AT_60: &str = "610253";

fn seed() -> HexSeed {
    HexSeed::parse(SEED_HEX).expect("test seed is valid")
}

#[test]
fn test_fixed_vectors() {
    let seed = seed();
    assert_eq!(totp::code_at(&seed, 0).expect("code_at failed"), CODE_AT_0);
    assert_eq!(totp::code_at(&seed, 29).expect("code_at failed"), CODE_AT_0);
    assert_eq!(totp::code_at(&seed, 30).expect("code_at failed"), CODE_AT_30);
    assert_eq!(totp::code_at(&seed, 59).expect("code_at failed"), CODE_AT_30);
    assert_eq!(totp::code_at(&seed, 60).expect("code_at failed"), CODE_AT_60);
}

#[test]
fn test_code_is_stable_within_a_period() {
    let seed = seed();
    let base = totp::code_at(&seed, 90).expect("code_at failed");
    for t in 90..120 {
        assert_eq!(totp::code_at(&seed, t).expect("code_at failed"), base);
    }
    assert_ne!(totp::code_at(&seed, 120).expect("code_at failed"), base);
}

#[test]
fn test_base32_codec_vector() {
    assert_eq!(
        seed().to_base32().expect("base32 encoding failed"),
        "AAAQEAYEAUDAOCAJBIFQYDIOB4IBCEQTCQKRMFYYDENBWHA5DYPQ"
    );
}

#[test]
fn test_base32_is_unpadded() {
    let b32 = seed().to_base32().expect("base32 encoding failed");
    assert!(!b32.contains('='));
    assert_eq!(b32.len(), 52);
}

#[test]
fn test_hex_seed_round_trips_to_bytes() {
    let bytes = seed().to_bytes().expect("to_bytes failed");
    let expected: Vec<u8> = (0..32).collect();
    assert_eq!(bytes.as_slice(), expected.as_slice());
}

#[test]
fn test_hex_seed_normalizes_case() {
    let upper = SEED_HEX.to_ascii_uppercase();
    let seed = HexSeed::parse(&upper).expect("uppercase seed is valid");
    assert_eq!(seed.as_str(), SEED_HEX);
}

#[test]
fn test_hex_seed_rejects_bad_input() {
    let too_long = format!("{SEED_HEX}ab");
    let non_hex = format!("g{}", &SEED_HEX[1..]);
    let with_space = format!("{} ", &SEED_HEX[..63]);
    for input in [
        "",
        "abc123",
        &SEED_HEX[..62],
        too_long.as_str(),
        non_hex.as_str(),
        with_space.as_str(),
    ] {
        let err = HexSeed::parse(input).unwrap_err();
        assert!(matches!(err, CoreError::InvalidSeedFormat), "input {input:?}");
    }
}

#[test]
fn test_verify_exact_period() {
    let seed = seed();
    assert!(totp::verify_at(&seed, CODE_AT_0, 0, 0).expect("verify failed"));
    assert!(totp::verify_at(&seed, CODE_AT_0, 0, 15).expect("verify failed"));
    assert!(!totp::verify_at(&seed, CODE_AT_30, 0, 0).expect("verify failed"));
}

#[test]
fn test_verify_accepts_adjacent_periods_within_window() {
    let seed = seed();
    // At t=30 the previous and next period codes are both inside window 1.
    assert!(totp::verify_at(&seed, CODE_AT_0, 1, 30).expect("verify failed"));
    assert!(totp::verify_at(&seed, CODE_AT_30, 1, 30).expect("verify failed"));
    assert!(totp::verify_at(&seed, CODE_AT_60, 1, 30).expect("verify failed"));
}

#[test]
fn test_verify_rejects_outside_window() {
    let seed = seed();
    // Two periods away: rejected at window 1, accepted at window 2.
    assert!(!totp::verify_at(&seed, CODE_AT_60, 1, 0).expect("verify failed"));
    assert!(totp::verify_at(&seed, CODE_AT_60, 2, 0).expect("verify failed"));
}

#[test]
fn test_verify_window_underflow_near_epoch() {
    let seed = seed();
    // Counter 0 has no previous period; the window simply clamps.
    assert!(totp::verify_at(&seed, CODE_AT_0, 1, 0).expect("verify failed"));
    assert!(!totp::verify_at(&seed, "000000", 1, 0).expect("verify failed"));
}

#[test]
fn test_verify_rejects_malformed_candidates() {
    let seed = seed();
    for candidate in ["", "12345", "1234567", "12a456", "12345 ", "１２３４５６"] {
        let err = totp::verify_at(&seed, candidate, 1, 0).unwrap_err();
        assert!(
            matches!(err, CoreError::MalformedCandidateCode),
            "candidate {candidate:?}"
        );
    }
}

#[test]
fn test_current_code_shape_and_verification() {
    let seed = seed();
    let (code, valid_for) = totp::current_code(&seed).expect("current_code failed");
    assert!(totp::is_candidate_well_formed(&code));
    assert!((1..=30).contains(&valid_for));
    assert!(totp::verify(&seed, &code, totp::DEFAULT_WINDOW).expect("verify failed"));
}

#[test]
fn test_candidate_well_formedness() {
    assert!(totp::is_candidate_well_formed("000000"));
    assert!(totp::is_candidate_well_formed("999999"));
    assert!(!totp::is_candidate_well_formed("00000"));
    assert!(!totp::is_candidate_well_formed("0000000"));
    assert!(!totp::is_candidate_well_formed("12345a"));
    assert!(!totp::is_candidate_well_formed(" 12345"));
}
