//! Variable-length unsigned integers.

use crate::{take, Error, Pack, Result, Unpack};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An unsigned integer encoded as little-endian base-128.
///
/// Each wire byte carries seven bits, least significant group first, with the
/// high bit set on every byte except the last. Zero encodes as a single
/// `0x00` byte.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct VarUint(pub u64);

impl VarUint {
    /// Returns the contained integer.
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for VarUint {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<u32> for VarUint {
    fn from(value: u32) -> Self {
        Self(value.into())
    }
}

impl From<usize> for VarUint {
    fn from(value: usize) -> Self {
        Self(value as u64)
    }
}

impl fmt::Display for VarUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Pack for VarUint {
    fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
        let mut value = self.0;
        loop {
            let mut byte = (value & 0x7f) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            out.push(byte);
            if value == 0 {
                return Ok(());
            }
        }
    }
}

impl Unpack for VarUint {
    fn unpack(buf: &mut &[u8]) -> Result<Self> {
        let mut value = 0u64;
        let mut shift = 0u32;
        loop {
            let byte = take(buf, 1)?[0];
            let group = u64::from(byte & 0x7f);
            if shift >= 64 || (shift > 57 && group >> (64 - shift) != 0) {
                return Err(Error::VarUintOverflow);
            }
            value |= group << shift;
            if byte & 0x80 == 0 {
                return Ok(Self(value));
            }
            shift += 7;
        }
    }
}

/// Writes a sequence/byte-string length prefix.
pub(crate) fn pack_len(len: usize, out: &mut Vec<u8>) -> Result<()> {
    VarUint::from(len).pack(out)
}

/// Reads a sequence/byte-string length prefix.
pub(crate) fn unpack_len(buf: &mut &[u8]) -> Result<usize> {
    let raw = VarUint::unpack(buf)?.value();
    usize::try_from(raw).map_err(|_| Error::VarUintOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pack, unpack};
    use proptest::prelude::*;

    #[test]
    fn zero_is_one_byte() {
        assert_eq!(pack(&VarUint(0)).unwrap(), [0x00]);
    }

    #[test]
    fn multi_byte_groups() {
        assert_eq!(pack(&VarUint(127)).unwrap(), [0x7f]);
        assert_eq!(pack(&VarUint(128)).unwrap(), [0x80, 0x01]);
        assert_eq!(pack(&VarUint(300)).unwrap(), [0xac, 0x02]);
        assert_eq!(unpack::<VarUint>(&[0xac, 0x02]).unwrap(), VarUint(300));
    }

    #[test]
    fn max_value_roundtrips() {
        let encoded = pack(&VarUint(u64::MAX)).unwrap();
        assert_eq!(encoded.len(), 10);
        assert_eq!(unpack::<VarUint>(&encoded).unwrap(), VarUint(u64::MAX));
    }

    #[test]
    fn rejects_overflow() {
        // Eleven continuation groups shift past the 64th bit.
        let too_wide = [0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x01];
        assert_eq!(unpack::<VarUint>(&too_wide), Err(Error::VarUintOverflow));

        // Ten groups fit only if the last carries a single bit.
        let top_bit_set = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x02];
        assert_eq!(unpack::<VarUint>(&top_bit_set), Err(Error::VarUintOverflow));
    }

    #[test]
    fn rejects_truncated_input() {
        assert_eq!(unpack::<VarUint>(&[0x80]), Err(Error::UnexpectedEof));
    }

    proptest! {
        #[test]
        fn roundtrip(value: u64) {
            let encoded = pack(&VarUint(value)).unwrap();
            prop_assert!(encoded.len() <= 10);
            prop_assert_eq!(unpack::<VarUint>(&encoded).unwrap(), VarUint(value));
        }
    }
}
