//! Recoverable signatures and their `SIG_K1_…` text format.

use crate::{
    base58::{self, Checksum},
    Error, PublicKey, Result, KEY_TYPE_K1,
};
use k256::ecdsa::{self, RecoveryId, VerifyingKey};
use std::{fmt, str::FromStr};

/// Offset added to the recovery parameter in the transmitted byte: `4` marks
/// a compressed public key, `27` the compact encoding.
const RECOVERY_OFFSET: u8 = 4 + 27;

/// A canonical ECDSA signature plus the recovery parameter that lets a
/// verifier reconstruct the signing key from the digest.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    inner: ecdsa::Signature,
    recid: RecoveryId,
}

impl Signature {
    pub(crate) const fn new(inner: ecdsa::Signature, recid: RecoveryId) -> Self {
        Self { inner, recid }
    }

    /// The canonical-shape test the chain applies: in the DER encoding,
    /// both the `r` and `s` length bytes must read exactly 32.
    pub(crate) fn der_is_canonical(der: &[u8]) -> bool {
        der.get(3) == Some(&32) && der.get(5 + 32) == Some(&32)
    }

    /// Whether this signature satisfies the chain's canonical-shape rule.
    /// Signatures produced by [`PrivateKey::sign`](crate::PrivateKey::sign)
    /// always do; imported ones may not.
    pub fn is_canonical(&self) -> bool {
        Self::der_is_canonical(self.inner.to_der().as_bytes())
    }

    /// The transmitted recovery byte, always in `31..=34`.
    pub const fn recovery_byte(&self) -> u8 {
        self.recid.to_byte() + RECOVERY_OFFSET
    }

    /// The 64-byte compact form: `r || s`, each 32 bytes big-endian.
    pub fn to_compact(&self) -> [u8; 64] {
        let mut compact = [0u8; 64];
        compact.copy_from_slice(&self.inner.to_bytes());
        compact
    }

    /// Reconstructs the signing key from a 32-byte digest, per SEC-1
    /// §4.1.6.
    pub fn recover(&self, digest: &[u8]) -> Result<PublicKey> {
        if digest.len() != 32 {
            return Err(Error::BadDigest(digest.len()));
        }
        let verifying = VerifyingKey::recover_from_prehash(digest, &self.inner, self.recid)
            .map_err(|_| Error::NoRecoveryParam)?;
        Ok(PublicKey::from_verifying_key(verifying))
    }

    pub(crate) const fn as_ecdsa(&self) -> &ecdsa::Signature {
        &self.inner
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut payload = Vec::with_capacity(65);
        payload.push(self.recovery_byte());
        payload.extend_from_slice(&self.to_compact());
        let encoded = base58::encode(&payload, Checksum::Ripemd160 { tag: KEY_TYPE_K1 });
        write!(f, "SIG_{KEY_TYPE_K1}_{encoded}")
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({self})")
    }
}

impl FromStr for Signature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let rest = s.strip_prefix("SIG_").ok_or(Error::UnrecognizedFormat)?;
        let (tag, data) = rest.split_once('_').ok_or(Error::UnrecognizedFormat)?;
        if tag != KEY_TYPE_K1 {
            return Err(Error::UnknownKeyType(tag.to_owned()));
        }
        let payload = base58::decode(data, Checksum::Ripemd160 { tag })?;
        let [recovery, compact @ ..] = payload.as_slice() else {
            return Err(Error::UnrecognizedFormat);
        };
        if compact.len() != 64 {
            return Err(Error::UnrecognizedFormat);
        }
        let recid = recovery
            .checked_sub(RECOVERY_OFFSET)
            .and_then(RecoveryId::from_byte)
            .ok_or(Error::UnrecognizedFormat)?;
        Ok(Self { inner: ecdsa::Signature::from_slice(compact)?, recid })
    }
}
