#![doc = include_str!("../README.md")]
#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod error;
pub use error::{Error, Result};

mod primitives;

mod varuint;
pub use varuint::VarUint;

mod name;
pub use name::Name;

mod bytes;
pub use bytes::Bytes;

mod time;
pub use time::{TimePoint, TimePointSec};

mod sequence;

pub mod dynamic;

/// A value that can be serialized to the ABI wire format.
///
/// Packing is position-dependent: a value's bytes are appended to `out` with
/// no framing of their own beyond what the wire format prescribes. Packing is
/// fallible because some composite values (notably unresolved action
/// payloads) legitimately refuse to serialize.
pub trait Pack {
    /// Appends the wire encoding of `self` to `out`.
    fn pack(&self, out: &mut Vec<u8>) -> Result<()>;

    /// Returns the wire encoding of `self` as a fresh buffer.
    fn packed(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.pack(&mut out)?;
        Ok(out)
    }
}

/// A value that can be deserialized from the ABI wire format.
///
/// `buf` is a cursor: decoding consumes exactly the bytes the value occupies
/// and advances the slice past them, so composite decoders can chain field
/// reads without tracking offsets themselves.
pub trait Unpack: Sized {
    /// Reads one value off the front of `buf`, advancing it.
    fn unpack(buf: &mut &[u8]) -> Result<Self>;
}

/// Packs `value` into a fresh buffer.
pub fn pack<T: Pack + ?Sized>(value: &T) -> Result<Vec<u8>> {
    value.packed()
}

/// Unpacks a value of type `T` from `bytes`, requiring every byte to be
/// consumed.
pub fn unpack<T: Unpack>(mut bytes: &[u8]) -> Result<T> {
    let value = T::unpack(&mut bytes)?;
    if !bytes.is_empty() {
        return Err(Error::TrailingBytes(bytes.len()));
    }
    Ok(value)
}

/// Splits `n` bytes off the front of `buf`.
pub(crate) fn take<'a>(buf: &mut &'a [u8], n: usize) -> Result<&'a [u8]> {
    if buf.len() < n {
        return Err(Error::UnexpectedEof);
    }
    let (head, rest) = buf.split_at(n);
    *buf = rest;
    Ok(head)
}
