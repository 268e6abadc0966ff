/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for the iron8583 ISO 8583 codec.
//!
//! This module provides a unified error hierarchy using `thiserror` for typed,
//! domain-specific errors across all iron8583 operations. The taxonomy is
//! closed: every failure a well-formed program can observe is one of the
//! variants below. Programmer-contract violations (non-hex input to the BCD
//! packer, a schema of the wrong shape) panic instead and are not represented
//! here.

use crate::encoding::Encoding;
use crate::field::{FieldKind, FieldNumber};
use thiserror::Error;

/// Result type alias using [`Iso8583Error`] as the error type.
pub type Result<T> = std::result::Result<T, Iso8583Error>;

/// Top-level error type for all iron8583 operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Iso8583Error {
    /// Error in a single field's encode or decode.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Error while framing or parsing a whole message.
    #[error("message error: {0}")]
    Message(#[from] MessageError),

    /// Error while resolving a schema declaration.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

/// Errors raised by the per-field codec.
///
/// All failures are fatal to the current encode or decode call; no partial
/// field value is ever surfaced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A body encoding not permitted for this field kind.
    #[error("invalid encoder for {kind} body: {encoding}")]
    InvalidEncoder {
        /// The field kind being coded.
        kind: FieldKind,
        /// The rejected body encoding.
        encoding: Encoding,
    },

    /// An encoded length prefix would not fit in its cell.
    #[error("invalid length head: {digits} digits exceed the {width}-position cell")]
    InvalidLengthHead {
        /// Decimal digits the content length needs.
        digits: usize,
        /// Positions the prefix cell offers (2 for LL, 3 for LLL).
        width: usize,
    },

    /// A fixed field lacks a declared length.
    #[error("missing declared length for {kind} field")]
    MissingLength {
        /// The field kind being coded.
        kind: FieldKind,
    },

    /// Value exceeds the declared maximum length.
    #[error("length of value is longer than definition; kind={kind}, declared={declared}, len={len}")]
    ValueTooLong {
        /// The field kind being coded.
        kind: FieldKind,
        /// The declared (maximum) length.
        declared: usize,
        /// The actual value length.
        len: usize,
    },

    /// Input buffer is shorter than the field requires.
    #[error("bad raw data: need {needed} bytes, have {available}")]
    BadRaw {
        /// Bytes the field needs.
        needed: usize,
        /// Bytes remaining in the buffer.
        available: usize,
    },

    /// Length-prefix bytes do not decode to a non-negative integer.
    #[error("parse length head failed: {found:?}")]
    ParseLengthFailed {
        /// The offending prefix, expanded to its character form.
        found: String,
    },
}

/// Errors raised by the message framer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// MTI is empty, not four characters, or contains non-digits.
    #[error("invalid MTI: {reason}")]
    InvalidMti {
        /// Why the MTI was rejected.
        reason: &'static str,
    },

    /// A bit is set in the bitmap for which no descriptor exists.
    #[error("field {number} not defined in schema")]
    UndefinedField {
        /// The field number of the set bit.
        number: FieldNumber,
    },

    /// The message holds a value whose kind disagrees with the schema.
    #[error("field {number}: schema declares {expected}, message holds {found}")]
    FieldKindMismatch {
        /// The offending field number.
        number: FieldNumber,
        /// The kind the schema declares.
        expected: FieldKind,
        /// The kind of the value actually present.
        found: FieldKind,
    },

    /// A field-level failure, with the offending field number attached.
    #[error("field {number}: {source}")]
    Field {
        /// The offending field number.
        number: FieldNumber,
        /// The underlying codec failure.
        source: CodecError,
    },

    /// The raw buffer ends before the MTI or bitmap is complete.
    #[error("message truncated: need {needed} bytes, have {available}")]
    Truncated {
        /// Bytes the framer needs.
        needed: usize,
        /// Bytes remaining in the buffer.
        available: usize,
    },
}

/// Errors raised while resolving field declarations into a schema.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Unknown field kind token.
    #[error("unknown field kind token: {token:?}")]
    UnknownKind {
        /// The rejected token.
        token: String,
    },

    /// Unknown body encoding token.
    #[error("invalid encoder: unknown token {token:?}")]
    UnknownEncoding {
        /// The rejected token.
        token: String,
    },

    /// Unknown length-prefix encoding token.
    #[error("invalid length encoder: unknown token {token:?}")]
    UnknownLengthEncoding {
        /// The rejected token.
        token: String,
    },

    /// Unknown length-format token (must be `""`, `"ll"` or `"lll"`).
    #[error("unknown length format token: {token:?}")]
    UnknownLengthFormat {
        /// The rejected token.
        token: String,
    },

    /// A field number outside 1..=128.
    #[error("field number {number} outside 1..=128")]
    InvalidFieldNumber {
        /// The rejected number.
        number: u8,
    },

    /// A fixed-length kind declared without a length.
    #[error("{kind} field {number} requires a declared length")]
    MissingDeclaredLength {
        /// The offending field number.
        number: FieldNumber,
        /// The fixed kind lacking a length.
        kind: FieldKind,
    },

    /// A kind whose body must be ASCII declared with a BCD body.
    #[error("{kind} field {number} carries its body in ASCII only, got {encoding}")]
    NonAsciiBody {
        /// The offending field number.
        number: FieldNumber,
        /// The kind restricted to ASCII bodies.
        kind: FieldKind,
        /// The rejected body encoding.
        encoding: Encoding,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_error_display() {
        let err = CodecError::ValueTooLong {
            kind: FieldKind::Numeric,
            declared: 6,
            len: 8,
        };
        assert_eq!(
            err.to_string(),
            "length of value is longer than definition; kind=numeric, declared=6, len=8"
        );
    }

    #[test]
    fn test_bad_raw_display() {
        let err = CodecError::BadRaw {
            needed: 4,
            available: 1,
        };
        assert_eq!(err.to_string(), "bad raw data: need 4 bytes, have 1");
    }

    #[test]
    fn test_message_error_attaches_field_number() {
        let err = MessageError::Field {
            number: FieldNumber::new(35).unwrap(),
            source: CodecError::BadRaw {
                needed: 10,
                available: 2,
            },
        };
        assert_eq!(
            err.to_string(),
            "field 35: bad raw data: need 10 bytes, have 2"
        );
    }

    #[test]
    fn test_iso8583_error_from_codec() {
        let codec = CodecError::MissingLength {
            kind: FieldKind::Binary,
        };
        let err: Iso8583Error = codec.into();
        assert!(matches!(
            err,
            Iso8583Error::Codec(CodecError::MissingLength { .. })
        ));
    }

    #[test]
    fn test_schema_error_display() {
        let err = SchemaError::UnknownLengthEncoding {
            token: "ebcdic".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid length encoder: unknown token \"ebcdic\""
        );
    }
}
