// File:    seed.rs
//
// Description: The validated hexadecimal seed type and its conversion to the Base32 form required by TOTP.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! This module defines the [`HexSeed`] type and the hex/Base32 codec.

use data_encoding::BASE32_NOPAD;

use crate::error::CoreError;

/// Number of raw entropy bytes in a seed.
pub const SEED_BYTES: usize = 32;

/// Number of hexadecimal characters in a seed string.
pub const SEED_HEX_LEN: usize = 64;

/// A validated 64-character lowercase hexadecimal seed.
///
/// The only way to obtain one is [`HexSeed::parse`], so every value of this
/// type is known to represent exactly 32 bytes of entropy. Immutable once
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexSeed(String);

impl HexSeed {
    /// Validates and normalizes a seed string.
    ///
    /// Accepts mixed case and stores the lowercase form.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSeedFormat`] if the input is not exactly
    /// 64 hexadecimal characters.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if s.len() != SEED_HEX_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidSeedFormat);
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Returns the normalized hexadecimal string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the seed into its 32 raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidHex`] if decoding fails. Parsing already
    /// guarantees well-formed hex, but the codec guards independently since
    /// it is the last gate before key material is used.
    pub fn to_bytes(&self) -> Result<[u8; SEED_BYTES], CoreError> {
        let bytes = hex::decode(&self.0).map_err(|_| CoreError::InvalidHex)?;
        bytes.try_into().map_err(|_| CoreError::InvalidHex)
    }

    /// Encodes the seed as unpadded RFC 4648 Base32, the representation
    /// conventionally fed to TOTP tooling. Recomputed on demand, never
    /// persisted.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidHex`] if the hex decoding fails.
    pub fn to_base32(&self) -> Result<String, CoreError> {
        Ok(BASE32_NOPAD.encode(&self.to_bytes()?))
    }
}
