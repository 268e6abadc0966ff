/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Field types for ISO 8583 messages.
//!
//! This module provides:
//! - [`FieldNumber`]: Type-safe wrapper for ISO 8583 field numbers (1..=128)
//! - [`FieldKind`]: The seven field disciplines the codec understands
//! - [`FieldValue`]: Tagged value variant, one per kind
//! - [`BinaryValue`]: Fixed-binary payload with its decode-time length

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest field number addressable with a secondary bitmap.
pub const FIELD_NUMBER_MAX: u8 = 128;

/// Highest field number addressable with the primary bitmap alone.
pub const PRIMARY_FIELD_MAX: u8 = 64;

/// ISO 8583 field number.
///
/// Field numbers are 1-indexed bitmap positions. Numbers 1..=64 live in the
/// primary bitmap; 65..=128 require the secondary bitmap. Number 1 is
/// reserved on the wire to signal secondary-bitmap presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct FieldNumber(u8);

impl FieldNumber {
    /// Creates a new field number.
    ///
    /// # Arguments
    /// * `number` - The field number (1..=128)
    ///
    /// # Returns
    /// `Some(FieldNumber)` when the number is in range, `None` otherwise.
    #[inline]
    #[must_use]
    pub const fn new(number: u8) -> Option<Self> {
        if number >= 1 && number <= FIELD_NUMBER_MAX {
            Some(Self(number))
        } else {
            None
        }
    }

    /// Returns the raw field number.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns true if this number only fits an extended (16-byte) bitmap.
    #[inline]
    #[must_use]
    pub const fn requires_secondary_bitmap(self) -> bool {
        self.0 > PRIMARY_FIELD_MAX
    }

    /// Returns true for field number 1, which signals the secondary bitmap
    /// on the wire rather than carrying data.
    #[inline]
    #[must_use]
    pub const fn is_bitmap_indicator(self) -> bool {
        self.0 == 1
    }
}

impl TryFrom<u8> for FieldNumber {
    type Error = ();

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Self::new(value).ok_or(())
    }
}

impl From<FieldNumber> for u8 {
    fn from(number: FieldNumber) -> Self {
        number.0
    }
}

impl fmt::Display for FieldNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The seven field disciplines of the codec.
///
/// Fixed kinds carry no on-wire length; the three variable kinds prepend an
/// LL (two-position) or LLL (three-position) decimal length prefix. The
/// numeric variants hold digit strings, `LlVar`/`LllVar` hold raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Fixed-length digit string.
    Numeric,
    /// Fixed-length ASCII text, left-padded with spaces.
    Alphanumeric,
    /// Fixed-length raw bytes, right-padded with zeroes.
    Binary,
    /// Digit string with a two-position length prefix.
    LlNumeric,
    /// Digit string with a three-position length prefix.
    LllNumeric,
    /// Raw bytes with a two-position length prefix; ASCII body only.
    LlVar,
    /// Raw bytes with a three-position length prefix; ASCII body only.
    LllVar,
}

impl FieldKind {
    /// Returns true for the kinds whose length is fixed by the schema.
    #[inline]
    #[must_use]
    pub const fn is_fixed(self) -> bool {
        matches!(self, Self::Numeric | Self::Alphanumeric | Self::Binary)
    }

    /// Returns true for the kinds that carry an on-wire length prefix.
    #[inline]
    #[must_use]
    pub const fn is_variable(self) -> bool {
        !self.is_fixed()
    }

    /// Returns true for the kinds that hold digit strings.
    #[inline]
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Numeric | Self::LlNumeric | Self::LllNumeric)
    }

    /// Returns the lowercase name used in error displays.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Alphanumeric => "alphanumeric",
            Self::Binary => "binary",
            Self::LlNumeric => "llnumeric",
            Self::LllNumeric => "lllnumeric",
            Self::LlVar => "llvar",
            Self::LllVar => "lllvar",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Fixed-binary payload.
///
/// Decoding a fixed binary field records the length actually consumed in
/// `fix_len`, so the value can be re-encoded even against a schema that no
/// longer declares a length. The schema itself stays immutable; the length
/// attribute travels with the decoded value.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct BinaryValue {
    data: Bytes,
    fix_len: Option<usize>,
}

impl BinaryValue {
    /// Creates a binary value from caller-supplied bytes.
    ///
    /// # Arguments
    /// * `data` - The payload bytes
    #[must_use]
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            fix_len: None,
        }
    }

    /// Creates a binary value carrying the length it was decoded at.
    ///
    /// # Arguments
    /// * `data` - The payload bytes
    /// * `fix_len` - The field length consumed during decode
    #[must_use]
    pub fn with_fix_len(data: impl Into<Bytes>, fix_len: usize) -> Self {
        Self {
            data: data.into(),
            fix_len: Some(fix_len),
        }
    }

    /// Returns the payload bytes.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the payload as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Returns the length this value was decoded at, if it came from a decode.
    #[inline]
    #[must_use]
    pub const fn fix_len(&self) -> Option<usize> {
        self.fix_len
    }

    /// Returns the payload length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the payload is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

// Equality is over the payload only; fix_len is decode bookkeeping.
impl PartialEq for BinaryValue {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl From<Bytes> for BinaryValue {
    fn from(data: Bytes) -> Self {
        Self::new(data)
    }
}

impl From<Vec<u8>> for BinaryValue {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

/// A field value, tagged by the discipline that codes it.
///
/// The variant must agree with the [`FieldKind`] the schema declares for the
/// same field number; the framer rejects mismatches before encoding. An empty
/// value means the field is absent and must not appear in the bitmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldValue {
    /// Fixed-length digit string.
    Numeric(String),
    /// Fixed-length ASCII text.
    Alphanumeric(String),
    /// Fixed-length raw bytes.
    Binary(BinaryValue),
    /// LL-prefixed digit string.
    LlNumeric(String),
    /// LLL-prefixed digit string.
    LllNumeric(String),
    /// LL-prefixed raw bytes.
    LlVar(Bytes),
    /// LLL-prefixed raw bytes.
    LllVar(Bytes),
}

impl FieldValue {
    /// Creates a fixed numeric value.
    #[must_use]
    pub fn numeric(digits: impl Into<String>) -> Self {
        Self::Numeric(digits.into())
    }

    /// Creates a fixed alphanumeric value.
    #[must_use]
    pub fn alphanumeric(text: impl Into<String>) -> Self {
        Self::Alphanumeric(text.into())
    }

    /// Creates a fixed binary value.
    #[must_use]
    pub fn binary(data: impl Into<Bytes>) -> Self {
        Self::Binary(BinaryValue::new(data))
    }

    /// Creates an LL-prefixed numeric value.
    #[must_use]
    pub fn ll_numeric(digits: impl Into<String>) -> Self {
        Self::LlNumeric(digits.into())
    }

    /// Creates an LLL-prefixed numeric value.
    #[must_use]
    pub fn lll_numeric(digits: impl Into<String>) -> Self {
        Self::LllNumeric(digits.into())
    }

    /// Creates an LL-prefixed variable value.
    #[must_use]
    pub fn ll_var(data: impl Into<Bytes>) -> Self {
        Self::LlVar(data.into())
    }

    /// Creates an LLL-prefixed variable value.
    #[must_use]
    pub fn lll_var(data: impl Into<Bytes>) -> Self {
        Self::LllVar(data.into())
    }

    /// Returns the kind this value is coded as.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Numeric(_) => FieldKind::Numeric,
            Self::Alphanumeric(_) => FieldKind::Alphanumeric,
            Self::Binary(_) => FieldKind::Binary,
            Self::LlNumeric(_) => FieldKind::LlNumeric,
            Self::LllNumeric(_) => FieldKind::LllNumeric,
            Self::LlVar(_) => FieldKind::LlVar,
            Self::LllVar(_) => FieldKind::LllVar,
        }
    }

    /// Returns true if the value is empty, i.e. the field is absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Numeric(s) | Self::Alphanumeric(s) | Self::LlNumeric(s) | Self::LllNumeric(s) => {
                s.is_empty()
            }
            Self::Binary(b) => b.is_empty(),
            Self::LlVar(d) | Self::LllVar(d) => d.is_empty(),
        }
    }

    /// Returns the value as a string slice, for the string-backed variants.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Numeric(s) | Self::Alphanumeric(s) | Self::LlNumeric(s) | Self::LllNumeric(s) => {
                Some(s)
            }
            _ => None,
        }
    }

    /// Returns the value as bytes, for the byte-backed variants.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Binary(b) => Some(b.as_slice()),
            Self::LlVar(d) | Self::LllVar(d) => Some(d),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(s) | Self::Alphanumeric(s) | Self::LlNumeric(s) | Self::LllNumeric(s) => {
                write!(f, "{}", s)
            }
            Self::Binary(b) => write!(f, "<{} bytes>", b.len()),
            Self::LlVar(d) | Self::LllVar(d) => write!(f, "<{} bytes>", d.len()),
        }
    }
}
