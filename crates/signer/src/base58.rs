//! base58check encoding shared by every key and signature text format.

use crate::{Error, Result};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// The checksum scheme sealing a base58check string.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Checksum<'a> {
    /// First four bytes of `sha256(sha256(payload))`. Used by the legacy
    /// private-key format.
    DoubleSha256,
    /// First four bytes of `ripemd160(payload || tag)`. Used by the tagged
    /// formats (empty tag for public keys).
    Ripemd160 {
        /// ASCII tag mixed into the digest, e.g. `"K1"`.
        tag: &'a str,
    },
}

impl Checksum<'_> {
    fn digest(self, payload: &[u8]) -> [u8; 4] {
        let mut checksum = [0u8; 4];
        match self {
            Self::DoubleSha256 => {
                let first = Sha256::digest(payload);
                checksum.copy_from_slice(&Sha256::digest(first)[..4]);
            }
            Self::Ripemd160 { tag } => {
                let mut hasher = Ripemd160::new();
                hasher.update(payload);
                hasher.update(tag.as_bytes());
                checksum.copy_from_slice(&hasher.finalize()[..4]);
            }
        }
        checksum
    }
}

/// Encodes `payload` with its checksum appended.
pub(crate) fn encode(payload: &[u8], checksum: Checksum<'_>) -> String {
    let mut sealed = payload.to_vec();
    sealed.extend_from_slice(&checksum.digest(payload));
    bs58::encode(sealed).into_string()
}

/// Decodes a base58check string, verifying the embedded checksum in constant
/// time with respect to its bytes.
pub(crate) fn decode(text: &str, checksum: Checksum<'_>) -> Result<Vec<u8>> {
    let sealed = bs58::decode(text).into_vec()?;
    if sealed.len() < 4 {
        return Err(Error::ChecksumMismatch);
    }
    let (payload, embedded) = sealed.split_at(sealed.len() - 4);
    if bool::from(embedded.ct_eq(&checksum.digest(payload))) {
        Ok(payload.to_vec())
    } else {
        Err(Error::ChecksumMismatch)
    }
}
