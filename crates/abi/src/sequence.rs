//! Varuint-counted homogeneous sequences.

use crate::{
    varuint::{pack_len, unpack_len},
    Pack, Result, Unpack,
};

impl<T: Pack> Pack for [T] {
    fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
        pack_len(self.len(), out)?;
        for item in self {
            item.pack(out)?;
        }
        Ok(())
    }
}

impl<T: Pack> Pack for Vec<T> {
    fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
        self.as_slice().pack(out)
    }
}

impl<T: Unpack> Unpack for Vec<T> {
    fn unpack(buf: &mut &[u8]) -> Result<Self> {
        let count = unpack_len(buf)?;
        // Every element consumes at least one byte, so the remaining input
        // bounds a sane preallocation for untrusted counts.
        let mut items = Vec::with_capacity(count.min(buf.len()));
        for _ in 0..count {
            items.push(T::unpack(buf)?);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use crate::{pack, unpack, Error, VarUint};

    #[test]
    fn count_prefix_then_elements() {
        let values = vec![0x0102u16, 0x0304u16];
        assert_eq!(pack(&values).unwrap(), [0x02, 0x02, 0x01, 0x04, 0x03]);
        assert_eq!(unpack::<Vec<u16>>(&[0x02, 0x02, 0x01, 0x04, 0x03]).unwrap(), values);
    }

    #[test]
    fn empty_sequence_is_a_single_zero() {
        assert_eq!(pack(&Vec::<u64>::new()).unwrap(), [0x00]);
        assert_eq!(unpack::<Vec<u64>>(&[0x00]).unwrap(), Vec::<u64>::new());
    }

    #[test]
    fn count_is_binding() {
        // Three elements promised, two present.
        assert_eq!(unpack::<Vec<u8>>(&[0x03, 0x01, 0x02]), Err(Error::UnexpectedEof));
    }

    #[test]
    fn nested_sequences() {
        let values = vec![vec![VarUint(1)], vec![VarUint(300), VarUint(0)]];
        let encoded = pack(&values).unwrap();
        assert_eq!(encoded, [0x02, 0x01, 0x01, 0x02, 0xac, 0x02, 0x00]);
        assert_eq!(unpack::<Vec<Vec<VarUint>>>(&encoded).unwrap(), values);
    }

    #[test]
    fn byte_vectors_match_the_byte_string_shape() {
        // A `Vec<u8>` sequence and a `Bytes` value share one wire form.
        let values = vec![0xdeu8, 0xad];
        assert_eq!(pack(&values).unwrap(), pack(&crate::Bytes::from([0xde, 0xad])).unwrap());
    }
}
