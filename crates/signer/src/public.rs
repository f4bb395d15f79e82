//! Public keys and their `EOS…` text format.

use crate::{
    base58::{self, Checksum},
    Error, Result, Signature,
};
use antelope_chain::KeyWeight;
use k256::ecdsa::{signature::hazmat::PrehashVerifier, VerifyingKey};
use serde_json::{json, Value};
use std::{fmt, str::FromStr};

/// Text prefix of the legacy public-key format.
const LEGACY_PREFIX: &str = "EOS";

/// Key-type byte prefixed to the compressed point in the wire encoding.
const WIRE_TYPE_K1: u8 = 0x00;

/// A secp256k1 public key, always carried as a 33-byte compressed point.
///
/// This is the `public_only` half of a key pair: it can verify and be
/// compared, but never sign.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    inner: VerifyingKey,
}

impl PublicKey {
    pub(crate) const fn from_verifying_key(inner: VerifyingKey) -> Self {
        Self { inner }
    }

    /// Parses a key from its SEC-1 encoding (compressed or uncompressed).
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self { inner: VerifyingKey::from_sec1_bytes(bytes)? })
    }

    /// Returns the 33-byte compressed point.
    pub fn to_bytes(&self) -> [u8; 33] {
        let point = self.inner.to_encoded_point(true);
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(point.as_bytes());
        bytes
    }

    /// Verifies a signature over a 32-byte digest.
    ///
    /// Returns a plain boolean: `false` means the signature is valid text
    /// but does not bind this key to this digest. Malformed signature text
    /// never reaches here; parsing it is [`Signature::from_str`]'s job and
    /// fails loudly there.
    pub fn verify(&self, signature: &Signature, digest: &[u8]) -> bool {
        self.inner.verify_prehash(digest, signature.as_ecdsa()).is_ok()
    }

    /// Returns this key in its wire encoding (key-type byte plus compressed
    /// point) weighted for use in an authority.
    pub fn to_key_weight(&self, weight: u16) -> KeyWeight {
        let mut wire = Vec::with_capacity(34);
        wire.push(WIRE_TYPE_K1);
        wire.extend_from_slice(&self.to_bytes());
        KeyWeight { key: wire.into(), weight }
    }

    /// Builds the node-JSON authority document satisfied by this key alone,
    /// for account-creation payloads the node translates to binary.
    pub fn to_authority_json(&self, weight: u16) -> Value {
        json!({
            "threshold": 1,
            "keys": [{ "key": self.to_string(), "weight": weight }],
            "accounts": [],
            "waits": [],
        })
    }

    pub(crate) const fn as_verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(LEGACY_PREFIX)?;
        f.write_str(&base58::encode(&self.to_bytes(), Checksum::Ripemd160 { tag: "" }))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({self})")
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let data = s.strip_prefix(LEGACY_PREFIX).ok_or(Error::UnrecognizedFormat)?;
        let payload = base58::decode(data, Checksum::Ripemd160 { tag: "" })?;
        Self::from_sec1_bytes(&payload)
    }
}
