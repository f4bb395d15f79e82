use k256::ecdsa;
use thiserror::Error;

/// Result type alias for [`Error`](enum@Error).
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced while importing, exporting or using key material.
#[derive(Debug, Error)]
pub enum Error {
    /// A legacy private key's version byte is not `0x80`.
    #[error("legacy private key version byte is not 0x80")]
    BadVersion,
    /// A base58check string's embedded checksum does not match its payload.
    #[error("embedded checksum does not match the payload")]
    ChecksumMismatch,
    /// A signing digest is not exactly 32 bytes.
    #[error("signing digest must be 32 bytes, got {0}")]
    BadDigest(usize),
    /// The canonical-signature retry budget was exhausted.
    #[error("no canonical signature found within the retry budget")]
    NoCanonicalSignature,
    /// No recovery parameter reproduces the signing key's public point.
    #[error("no recovery parameter reproduces the signing key")]
    NoRecoveryParam,
    /// A key or signature carries a type tag this signer does not implement.
    #[error("unsupported key type tag `{0}`")]
    UnknownKeyType(String),
    /// Text input is not shaped like any supported key or signature format.
    #[error("unrecognized key or signature format")]
    UnrecognizedFormat,
    /// [`bs58`] decoding error.
    #[error(transparent)]
    Base58(#[from] bs58::decode::Error),
    /// [`ecdsa`] error.
    #[error(transparent)]
    Ecdsa(#[from] ecdsa::Error),
}
