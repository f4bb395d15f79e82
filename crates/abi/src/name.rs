//! Account, action and table names.

use crate::{Error, Pack, Result, Unpack};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// The base-32 alphabet names are drawn from. A character's position in this
/// string is its wire value.
const ALPHABET: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// A chain identifier of up to 13 characters, packed into 64 bits.
///
/// The first twelve characters occupy five bits each, most significant
/// first; a thirteenth character contributes only its low four bits. Unused
/// trailing positions read back as `.` and are trimmed when formatting, so
/// the text form round-trips for every valid name.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(u64);

impl Name {
    /// Parses a name literal, validating length and alphabet.
    pub fn new(name: &str) -> Result<Self> {
        name.parse()
    }

    /// Wraps an already-packed 64-bit name value.
    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    /// Returns the packed 64-bit value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl FromStr for Name {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() > 13 {
            return Err(Error::NameTooLong);
        }
        let mut value = 0u64;
        for (i, c) in s.chars().enumerate() {
            let index = ALPHABET
                .iter()
                .position(|&a| a == c as u8 && c.is_ascii())
                .ok_or(Error::NameBadChar(c))? as u64;
            if i < 12 {
                value |= (index & 0x1f) << (64 - 5 * (i as u64 + 1));
            } else {
                value |= index & 0x0f;
            }
        }
        Ok(Self(value))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.0;
        let mut chars = [b'.'; 13];
        for i in (0..13).rev() {
            if i == 12 {
                chars[i] = ALPHABET[(value & 0x0f) as usize];
                value >>= 4;
            } else {
                chars[i] = ALPHABET[(value & 0x1f) as usize];
                value >>= 5;
            }
        }
        let len = chars.iter().rposition(|&c| c != b'.').map_or(0, |p| p + 1);
        // The alphabet is ASCII, so the slice is always valid UTF-8.
        f.write_str(std::str::from_utf8(&chars[..len]).unwrap_or_default())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({self})")
    }
}

impl Pack for Name {
    fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
        self.0.pack(out)
    }
}

impl Unpack for Name {
    fn unpack(buf: &mut &[u8]) -> Result<Self> {
        Ok(Self(u64::unpack(buf)?))
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
