//! Length-prefixed byte strings and strings.

use crate::{
    take,
    varuint::{pack_len, unpack_len},
    Pack, Result, Unpack,
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, ops::Deref, str::FromStr};

/// An arbitrary byte string, wire-encoded as a varuint length followed by the
/// raw bytes.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    /// Creates a byte string from anything byte-shaped.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Returns the contained bytes as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Consumes `self`, returning the contained bytes.
    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for Bytes {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Bytes {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Bytes {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes({self})")
    }
}

impl FromStr for Bytes {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex::decode(s).map(Self)
    }
}

impl Pack for Bytes {
    fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
        pack_len(self.0.len(), out)?;
        out.extend_from_slice(&self.0);
        Ok(())
    }
}

impl Unpack for Bytes {
    fn unpack(buf: &mut &[u8]) -> Result<Self> {
        let len = unpack_len(buf)?;
        Ok(Self(take(buf, len)?.to_vec()))
    }
}

impl Serialize for Bytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl Pack for str {
    fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
        pack_len(self.len(), out)?;
        out.extend_from_slice(self.as_bytes());
        Ok(())
    }
}

impl Pack for String {
    fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
        self.as_str().pack(out)
    }
}

impl Unpack for String {
    fn unpack(buf: &mut &[u8]) -> Result<Self> {
        let len = unpack_len(buf)?;
        Ok(Self::from_utf8(take(buf, len)?.to_vec())?)
    }
}
