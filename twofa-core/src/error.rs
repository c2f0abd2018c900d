use thiserror::Error;

/// Errors produced by the cryptographic core.
///
/// The HTTP boundary collapses all decryption-related kinds into a single
/// generic failure so callers cannot tell which stage rejected a
/// ciphertext. The distinct variants exist for server-side logging.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The encrypted seed was not valid Base64.
    #[error("encrypted seed is not valid base64")]
    InvalidEncoding,

    /// RSA-OAEP decryption failed. Carries no cause on purpose.
    #[error("decryption failed")]
    DecryptionFailed,

    /// The decrypted bytes were not valid UTF-8.
    #[error("decrypted data is not valid UTF-8")]
    InvalidPlaintext,

    /// A seed string was not a 64-character hexadecimal string.
    #[error("not a valid 64-character hex seed")]
    InvalidSeedFormat,

    /// A hex seed failed to decode into its 32 raw bytes.
    #[error("invalid hexadecimal seed string")]
    InvalidHex,

    /// The private key file could not be read or parsed.
    #[error("key load error: {0}")]
    KeyLoad(String),

    /// The seed store could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// No seed has been decrypted and stored yet.
    #[error("seed not decrypted yet")]
    SeedNotFound,

    /// A candidate code was not exactly six ASCII digits.
    #[error("invalid code format, must be a 6-digit string")]
    MalformedCandidateCode,
}
