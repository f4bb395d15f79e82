//! Fixed-width integer and float codecs.
//!
//! All fixed-width types are laid out little-endian; signed integers are
//! two's complement and floats are IEEE-754.

use crate::{take, Pack, Result, Unpack};

macro_rules! impl_fixed_width {
    ($($ty:ty),* $(,)?) => {$(
        impl Pack for $ty {
            fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
                out.extend_from_slice(&self.to_le_bytes());
                Ok(())
            }
        }

        impl Unpack for $ty {
            fn unpack(buf: &mut &[u8]) -> Result<Self> {
                const WIDTH: usize = std::mem::size_of::<$ty>();
                let raw = take(buf, WIDTH)?;
                let mut le = [0u8; WIDTH];
                le.copy_from_slice(raw);
                Ok(<$ty>::from_le_bytes(le))
            }
        }
    )*};
}

impl_fixed_width!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);
