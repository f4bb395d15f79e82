//! Private keys: generation, the two text formats, and signing.

use crate::{
    base58::{self, Checksum},
    Error, PublicKey, Result, Signature, KEY_TYPE_K1,
};
use k256::{
    ecdsa::{hazmat::SignPrimitive, RecoveryId, SigningKey, VerifyingKey},
    FieldBytes,
};
use rand::{CryptoRng, Rng};
use sha2::{Digest, Sha256};
use std::{fmt, str::FromStr};
use subtle::ConstantTimeEq;

/// Version byte prefixed to the scalar in the legacy text format.
const LEGACY_VERSION: u8 = 0x80;

/// Retry budget for the canonical-signature loop. RFC-6979 re-seeded with a
/// one-byte counter converges in a couple of attempts in practice.
const MAX_SIGNING_ATTEMPTS: usize = 256;

/// A secp256k1 private key.
///
/// The scalar lives in a [`SigningKey`] and is zeroized on drop. It never
/// appears in `Debug` output; export it deliberately with
/// [`to_wif`](Self::to_wif) or [`to_pvt`](Self::to_pvt).
#[derive(Clone)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Generates a new key from the thread-local CSPRNG.
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    /// Generates a new key from the provided RNG.
    pub fn random_with<R: Rng + CryptoRng>(rng: &mut R) -> Self {
        Self { inner: SigningKey::random(rng) }
    }

    /// Creates a key from a raw 32-byte scalar.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(Self { inner: SigningKey::from_slice(bytes)? })
    }

    /// Imports a key from the legacy text format: base58check with a
    /// double-sha256 checksum over `0x80 || scalar`.
    pub fn from_wif(text: &str) -> Result<Self> {
        let payload = base58::decode(text, Checksum::DoubleSha256)?;
        let (&version, scalar) = payload.split_first().ok_or(Error::UnrecognizedFormat)?;
        if version != LEGACY_VERSION {
            return Err(Error::BadVersion);
        }
        Self::from_slice(scalar)
    }

    /// Imports a key from the tagged text format:
    /// `PVT_<tag>_<base58check(scalar)>` with a RIPEMD-160 checksum over
    /// `scalar || tag`.
    pub fn from_pvt(text: &str) -> Result<Self> {
        let rest = text.strip_prefix("PVT_").ok_or(Error::UnrecognizedFormat)?;
        let (tag, data) = rest.split_once('_').ok_or(Error::UnrecognizedFormat)?;
        if tag != KEY_TYPE_K1 {
            return Err(Error::UnknownKeyType(tag.to_owned()));
        }
        let scalar = base58::decode(data, Checksum::Ripemd160 { tag })?;
        Self::from_slice(&scalar)
    }

    /// Exports the key in the legacy text format.
    pub fn to_wif(&self) -> String {
        let mut payload = vec![LEGACY_VERSION];
        payload.extend_from_slice(&self.inner.to_bytes());
        base58::encode(&payload, Checksum::DoubleSha256)
    }

    /// Exports the key in the tagged text format.
    pub fn to_pvt(&self) -> String {
        let encoded =
            base58::encode(&self.inner.to_bytes(), Checksum::Ripemd160 { tag: KEY_TYPE_K1 });
        format!("PVT_{KEY_TYPE_K1}_{encoded}")
    }

    /// Returns the verifying half of this key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_verifying_key(*self.inner.verifying_key())
    }

    /// Signs a 32-byte digest, producing a canonical recoverable signature.
    ///
    /// ECDSA nonces come from RFC-6979 over the digest, re-seeded with a
    /// retry counter as additional entropy until the signature's DER form
    /// gives both scalars exactly 32 bytes, the shape the chain insists on.
    pub fn sign(&self, digest: &[u8]) -> Result<Signature> {
        let digest: &[u8; 32] =
            digest.try_into().map_err(|_| Error::BadDigest(digest.len()))?;
        let z = FieldBytes::from(*digest);
        let scalar = self.inner.as_nonzero_scalar();

        for nonce in 0..MAX_SIGNING_ATTEMPTS {
            let mut extra = Sha256::new();
            extra.update(digest);
            if nonce > 0 {
                extra.update([nonce as u8]);
            }
            let extra = extra.finalize();

            let (sig, _) = scalar.try_sign_prehashed_rfc6979::<Sha256>(&z, &extra)?;
            if !Signature::der_is_canonical(sig.to_der().as_bytes()) {
                continue;
            }

            // Derive the recovery parameter by trial: the transmitted byte
            // must let a verifier reconstruct exactly this key.
            let verifying = self.inner.verifying_key();
            for param in 0..4u8 {
                let Some(recid) = RecoveryId::from_byte(param) else { continue };
                if let Ok(recovered) = VerifyingKey::recover_from_prehash(digest, &sig, recid) {
                    if &recovered == verifying {
                        return Ok(Signature::new(sig, recid));
                    }
                }
            }
            return Err(Error::NoRecoveryParam);
        }
        Err(Error::NoCanonicalSignature)
    }
}

impl FromStr for PrivateKey {
    type Err = Error;

    /// Parses either text format, trying the tagged form first and falling
    /// back to legacy.
    fn from_str(s: &str) -> Result<Self> {
        if s.starts_with("PVT_") {
            Self::from_pvt(s)
        } else {
            Self::from_wif(s)
        }
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.inner
            .to_bytes()
            .as_slice()
            .ct_eq(other.inner.to_bytes().as_slice())
            .into()
    }
}

impl Eq for PrivateKey {}

// Never expose the scalar through logging.
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").finish_non_exhaustive()
    }
}
