// File:    lib.rs
//
// Description: The main library crate for twofa-core, orchestrating seed decryption, encoding and TOTP operations.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! # 2FA Core Library
//!
//! This library provides the cryptographic core of the PKI-backed 2FA
//! service: decrypting an RSA-OAEP encrypted seed, re-encoding it for the
//! TOTP standard, generating and verifying time-based one-time codes, and
//! persisting the single decrypted seed.

/// RSA-OAEP decryption of the encrypted seed.
pub mod crypto;
/// Error kinds shared across the core.
pub mod error;
/// Private key loading and RSA key-pair generation.
pub mod keys;
/// The validated hex seed type and its Base32 representation.
pub mod seed;
/// File-backed persistence for the decrypted seed.
pub mod seed_store;
/// TOTP code generation and windowed verification.
pub mod totp;
