use std::string::FromUtf8Error;
use thiserror::Error;

/// Result type alias for [`Error`](enum@Error).
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced while packing or unpacking ABI wire data.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A name literal exceeds the 13-character wire limit.
    #[error("name is longer than 13 characters")]
    NameTooLong,
    /// A name literal contains a character outside the base-32 alphabet.
    #[error("character {0:?} is not allowed in a name")]
    NameBadChar(char),
    /// A declared type name is not part of the wire format this codec
    /// implements.
    #[error("unsupported ABI type `{0}`")]
    UnsupportedType(String),
    /// A value was paired with a declared type it does not belong to.
    #[error("value does not match the declared ABI type `{expected}`")]
    TypeMismatch {
        /// The declared type the value was expected to match.
        expected: String,
    },
    /// Action data is still a JSON mapping; it must be converted to binary
    /// (locally or by a node) before it can be packed.
    #[error("action data is an unresolved JSON payload and cannot be packed")]
    UnresolvedActionData,
    /// The input ended before the value was fully decoded.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// A varuint does not fit in 64 bits.
    #[error("varuint overflows 64 bits")]
    VarUintOverflow,
    /// Input remained after the value was fully decoded.
    #[error("{0} trailing bytes after decoded value")]
    TrailingBytes(usize),
    /// A decoded string is not valid UTF-8.
    #[error("string is not valid UTF-8")]
    Utf8(#[from] FromUtf8Error),
}
