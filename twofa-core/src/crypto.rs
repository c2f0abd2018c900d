// File:    crypto.rs
//
// Description: Handles the core cryptographic operation of the service: RSA-OAEP decryption of the encrypted seed.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! This module contains the RSA-OAEP seed decryptor.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use rsa::{Oaep, RsaPrivateKey};
use sha2::Sha256;

use crate::error::CoreError;
use crate::seed::HexSeed;

/// Decrypts a Base64-encoded RSA-OAEP ciphertext into a validated seed.
///
/// OAEP uses SHA-256 for both the main hash and MGF1, with an empty label.
/// The plaintext must decode as UTF-8 and be exactly 64 hexadecimal
/// characters; anything else is rejected, so a wrong-key decryption can
/// never surface as a valid-looking seed.
///
/// Pure apart from the key input; decrypting the same ciphertext twice
/// yields the same seed.
///
/// # Errors
///
/// * [`CoreError::InvalidEncoding`] if the input is not valid Base64.
/// * [`CoreError::DecryptionFailed`] on any OAEP failure. The variant is
///   uniform across padding, key-mismatch and corruption causes so that no
///   decryption oracle is exposed.
/// * [`CoreError::InvalidPlaintext`] if the plaintext is not UTF-8.
/// * [`CoreError::InvalidSeedFormat`] if it is not a 64-character hex string.
pub fn decrypt_seed(encrypted_b64: &str, key: &RsaPrivateKey) -> Result<HexSeed, CoreError> {
    let ciphertext = BASE64
        .decode(encrypted_b64)
        .map_err(|_| CoreError::InvalidEncoding)?;

    let plaintext = key
        .decrypt(Oaep::new::<Sha256>(), &ciphertext)
        .map_err(|_| CoreError::DecryptionFailed)?;

    let text = String::from_utf8(plaintext).map_err(|_| CoreError::InvalidPlaintext)?;

    HexSeed::parse(&text)
}
