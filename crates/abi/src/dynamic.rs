//! Runtime type dispatch for schema-driven encoding.
//!
//! The [`Pack`]/[`Unpack`] traits resolve types at compile time, which covers
//! every record this library declares itself. Contract schemas, however,
//! arrive as data: an ABI document names field types as strings. This module
//! carries that closed set of names as the [`AbiType`] sum type, with
//! [`AbiValue`] as the matching value universe. Any name outside the set is
//! refused rather than guessed.

use crate::{
    varuint::{pack_len, unpack_len},
    Bytes, Error, Name, Pack, Result, TimePoint, TimePointSec, Unpack, VarUint,
};
use std::{fmt, str::FromStr};

/// A declared wire type, parsed from its schema spelling.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AbiType {
    /// `uint8`
    Uint8,
    /// `uint16`
    Uint16,
    /// `uint32`
    Uint32,
    /// `uint64`
    Uint64,
    /// `int8`
    Int8,
    /// `int16`
    Int16,
    /// `int32`
    Int32,
    /// `int64`
    Int64,
    /// `float32`
    Float32,
    /// `float64`
    Float64,
    /// `varuint32`
    VarUint,
    /// `name`
    Name,
    /// `bytes`
    Bytes,
    /// `string`
    String,
    /// `time_point`
    TimePoint,
    /// `time_point_sec`
    TimePointSec,
    /// `T[]`: a varuint-counted sequence of a fixed element type.
    Array(Box<AbiType>),
}

impl FromStr for AbiType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(element) = s.strip_suffix("[]") {
            return Ok(Self::Array(Box::new(element.parse()?)));
        }
        Ok(match s {
            "uint8" => Self::Uint8,
            "uint16" => Self::Uint16,
            "uint32" => Self::Uint32,
            "uint64" => Self::Uint64,
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "float32" => Self::Float32,
            "float64" => Self::Float64,
            "varuint32" => Self::VarUint,
            "name" => Self::Name,
            "bytes" => Self::Bytes,
            "string" => Self::String,
            "time_point" => Self::TimePoint,
            "time_point_sec" => Self::TimePointSec,
            other => return Err(Error::UnsupportedType(other.to_owned())),
        })
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uint8 => f.write_str("uint8"),
            Self::Uint16 => f.write_str("uint16"),
            Self::Uint32 => f.write_str("uint32"),
            Self::Uint64 => f.write_str("uint64"),
            Self::Int8 => f.write_str("int8"),
            Self::Int16 => f.write_str("int16"),
            Self::Int32 => f.write_str("int32"),
            Self::Int64 => f.write_str("int64"),
            Self::Float32 => f.write_str("float32"),
            Self::Float64 => f.write_str("float64"),
            Self::VarUint => f.write_str("varuint32"),
            Self::Name => f.write_str("name"),
            Self::Bytes => f.write_str("bytes"),
            Self::String => f.write_str("string"),
            Self::TimePoint => f.write_str("time_point"),
            Self::TimePointSec => f.write_str("time_point_sec"),
            Self::Array(element) => write!(f, "{element}[]"),
        }
    }
}

/// A wire value paired with its runtime type.
#[derive(Clone, Debug, PartialEq)]
pub enum AbiValue {
    /// A `uint8` value.
    Uint8(u8),
    /// A `uint16` value.
    Uint16(u16),
    /// A `uint32` value.
    Uint32(u32),
    /// A `uint64` value.
    Uint64(u64),
    /// An `int8` value.
    Int8(i8),
    /// An `int16` value.
    Int16(i16),
    /// An `int32` value.
    Int32(i32),
    /// An `int64` value.
    Int64(i64),
    /// A `float32` value.
    Float32(f32),
    /// A `float64` value.
    Float64(f64),
    /// A `varuint32` value.
    VarUint(VarUint),
    /// A `name` value.
    Name(Name),
    /// A `bytes` value.
    Bytes(Bytes),
    /// A `string` value.
    String(String),
    /// A `time_point` value.
    TimePoint(TimePoint),
    /// A `time_point_sec` value.
    TimePointSec(TimePointSec),
    /// A homogeneous sequence.
    Array(Vec<AbiValue>),
}

impl AbiType {
    /// Packs `value` under this declared type.
    ///
    /// Fails with [`Error::TypeMismatch`] when the value belongs to a
    /// different type, including any array element.
    pub fn pack_value(&self, value: &AbiValue, out: &mut Vec<u8>) -> Result<()> {
        match (self, value) {
            (Self::Uint8, AbiValue::Uint8(v)) => v.pack(out),
            (Self::Uint16, AbiValue::Uint16(v)) => v.pack(out),
            (Self::Uint32, AbiValue::Uint32(v)) => v.pack(out),
            (Self::Uint64, AbiValue::Uint64(v)) => v.pack(out),
            (Self::Int8, AbiValue::Int8(v)) => v.pack(out),
            (Self::Int16, AbiValue::Int16(v)) => v.pack(out),
            (Self::Int32, AbiValue::Int32(v)) => v.pack(out),
            (Self::Int64, AbiValue::Int64(v)) => v.pack(out),
            (Self::Float32, AbiValue::Float32(v)) => v.pack(out),
            (Self::Float64, AbiValue::Float64(v)) => v.pack(out),
            (Self::VarUint, AbiValue::VarUint(v)) => v.pack(out),
            (Self::Name, AbiValue::Name(v)) => v.pack(out),
            (Self::Bytes, AbiValue::Bytes(v)) => v.pack(out),
            (Self::String, AbiValue::String(v)) => v.pack(out),
            (Self::TimePoint, AbiValue::TimePoint(v)) => v.pack(out),
            (Self::TimePointSec, AbiValue::TimePointSec(v)) => v.pack(out),
            (Self::Array(element), AbiValue::Array(items)) => {
                pack_len(items.len(), out)?;
                for item in items {
                    element.pack_value(item, out)?;
                }
                Ok(())
            }
            _ => Err(Error::TypeMismatch { expected: self.to_string() }),
        }
    }

    /// Unpacks one value of this declared type off the front of `buf`.
    pub fn unpack_value(&self, buf: &mut &[u8]) -> Result<AbiValue> {
        Ok(match self {
            Self::Uint8 => AbiValue::Uint8(u8::unpack(buf)?),
            Self::Uint16 => AbiValue::Uint16(u16::unpack(buf)?),
            Self::Uint32 => AbiValue::Uint32(u32::unpack(buf)?),
            Self::Uint64 => AbiValue::Uint64(u64::unpack(buf)?),
            Self::Int8 => AbiValue::Int8(i8::unpack(buf)?),
            Self::Int16 => AbiValue::Int16(i16::unpack(buf)?),
            Self::Int32 => AbiValue::Int32(i32::unpack(buf)?),
            Self::Int64 => AbiValue::Int64(i64::unpack(buf)?),
            Self::Float32 => AbiValue::Float32(f32::unpack(buf)?),
            Self::Float64 => AbiValue::Float64(f64::unpack(buf)?),
            Self::VarUint => AbiValue::VarUint(VarUint::unpack(buf)?),
            Self::Name => AbiValue::Name(Name::unpack(buf)?),
            Self::Bytes => AbiValue::Bytes(Bytes::unpack(buf)?),
            Self::String => AbiValue::String(String::unpack(buf)?),
            Self::TimePoint => AbiValue::TimePoint(TimePoint::unpack(buf)?),
            Self::TimePointSec => AbiValue::TimePointSec(TimePointSec::unpack(buf)?),
            Self::Array(element) => {
                let count = unpack_len(buf)?;
                let mut items = Vec::with_capacity(count.min(buf.len()));
                for _ in 0..count {
                    items.push(element.unpack_value(buf)?);
                }
                AbiValue::Array(items)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack_one(ty: &AbiType, value: &AbiValue) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        ty.pack_value(value, &mut out)?;
        Ok(out)
    }

    #[test]
    fn parses_schema_spellings() {
        assert_eq!("uint64".parse::<AbiType>().unwrap(), AbiType::Uint64);
        assert_eq!("time_point_sec".parse::<AbiType>().unwrap(), AbiType::TimePointSec);
        assert_eq!(
            "name[]".parse::<AbiType>().unwrap(),
            AbiType::Array(Box::new(AbiType::Name))
        );
        assert_eq!("uint8[][]".parse::<AbiType>().unwrap().to_string(), "uint8[][]");
    }

    #[test]
    fn refuses_unknown_and_unimplemented_names() {
        for name in ["bool", "uint128", "float128", "asset", "symbol", "checksum256", "public_key"]
        {
            assert_eq!(
                name.parse::<AbiType>(),
                Err(Error::UnsupportedType(name.to_owned()))
            );
        }
        // The element type of an array is checked too.
        assert!(matches!("asset[]".parse::<AbiType>(), Err(Error::UnsupportedType(_))));
    }

    #[test]
    fn dispatch_matches_static_codecs() {
        let name: Name = "eosio.token".parse().unwrap();
        let encoded = pack_one(&AbiType::Name, &AbiValue::Name(name)).unwrap();
        assert_eq!(encoded, crate::pack(&name).unwrap());

        let mut cursor = encoded.as_slice();
        let decoded = AbiType::Name.unpack_value(&mut cursor).unwrap();
        assert_eq!(decoded, AbiValue::Name(name));
        assert!(cursor.is_empty());
    }

    #[test]
    fn arrays_dispatch_per_element() {
        let ty: AbiType = "uint16[]".parse().unwrap();
        let value = AbiValue::Array(vec![AbiValue::Uint16(1), AbiValue::Uint16(515)]);
        let encoded = pack_one(&ty, &value).unwrap();
        assert_eq!(encoded, [0x02, 0x01, 0x00, 0x03, 0x02]);
        assert_eq!(ty.unpack_value(&mut encoded.as_slice()).unwrap(), value);
    }

    #[test]
    fn mismatched_values_are_refused() {
        let err = pack_one(&AbiType::Uint8, &AbiValue::String("nope".into())).unwrap_err();
        assert_eq!(err, Error::TypeMismatch { expected: "uint8".into() });

        let ty: AbiType = "uint8[]".parse().unwrap();
        let mixed = AbiValue::Array(vec![AbiValue::Uint8(1), AbiValue::Int8(-1)]);
        assert!(matches!(
            pack_one(&ty, &mixed),
            Err(Error::TypeMismatch { .. })
        ));
    }
}
