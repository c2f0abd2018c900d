// File:    keys.rs
//
// Description: Provides private key loading and RSA key-pair generation for the 2FA service.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Key provider and key-pair generation.
//!
//! The service holds a single RSA private key, loaded once at startup and
//! used only for decryption. Key-pair generation is a one-time setup step.

use std::fs;
use std::path::Path;

use log::info;
use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePrivateKey, EncodePrivateKey, EncodePublicKey, LineEnding};

pub use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::error::CoreError;

/// Default RSA modulus size in bits. The public exponent is 65537.
pub const DEFAULT_KEY_BITS: usize = 4096;

/// Loads an unencrypted PKCS#8 PEM private key from disk.
///
/// Passphrase-protected keys are not supported; they fail to parse like any
/// other malformed input.
///
/// # Errors
///
/// Returns [`CoreError::KeyLoad`] if the file is missing, unreadable or not
/// a parsable PKCS#8 private key. The message carries the underlying cause
/// for server-side logs.
pub fn load_private_key(path: &Path) -> Result<RsaPrivateKey, CoreError> {
    let pem = fs::read_to_string(path)
        .map_err(|e| CoreError::KeyLoad(format!("cannot read {}: {e}", path.display())))?;
    RsaPrivateKey::from_pkcs8_pem(&pem)
        .map_err(|e| CoreError::KeyLoad(format!("cannot parse {}: {e}", path.display())))
}

/// Generates a fresh RSA key pair of the given modulus size.
///
/// # Errors
///
/// Returns [`CoreError::KeyLoad`] if generation fails.
pub fn generate_keypair(bits: usize) -> Result<(RsaPrivateKey, RsaPublicKey), CoreError> {
    info!("Generating a {bits}-bit RSA key pair. This can take a while.");
    let mut rng = OsRng;
    let private = RsaPrivateKey::new(&mut rng, bits)
        .map_err(|e| CoreError::KeyLoad(format!("key generation failed: {e}")))?;
    let public = private.to_public_key();
    Ok((private, public))
}

/// Serializes a key pair to disk: the private key as unencrypted PKCS#8
/// PEM, the public key as SubjectPublicKeyInfo PEM.
///
/// # Errors
///
/// Returns [`CoreError::KeyLoad`] if PEM encoding fails, or
/// [`CoreError::Storage`] if either file cannot be written.
pub fn write_keypair(
    private: &RsaPrivateKey,
    public: &RsaPublicKey,
    private_path: &Path,
    public_path: &Path,
) -> Result<(), CoreError> {
    let private_pem = private
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| CoreError::KeyLoad(format!("private key encoding failed: {e}")))?;
    fs::write(private_path, private_pem.as_bytes())
        .map_err(|e| CoreError::Storage(format!("cannot write {}: {e}", private_path.display())))?;

    let public_pem = public
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| CoreError::KeyLoad(format!("public key encoding failed: {e}")))?;
    fs::write(public_path, public_pem)
        .map_err(|e| CoreError::Storage(format!("cannot write {}: {e}", public_path.display())))?;

    Ok(())
}
