/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message types for ISO 8583.
//!
//! This module provides:
//! - [`Mti`]: Validated four-digit Message Type Indicator
//! - [`MtiEncoding`]: ASCII (4 bytes) or packed BCD (2 bytes) MTI layout
//! - [`Message`]: MTI plus a sparse, ordered set of numbered field values

use crate::error::MessageError;
use crate::field::{FieldNumber, FieldValue};
use arrayvec::ArrayString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Length of an MTI in characters.
pub const MTI_LEN: usize = 4;

/// Message Type Indicator: exactly four decimal digits.
///
/// The MTI identifies the message class, e.g. `"0200"` for a financial
/// request or `"0210"` for its response. Validation happens at construction;
/// a held `Mti` is always well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Mti(ArrayString<MTI_LEN>);

impl Mti {
    /// Creates a new MTI from a string slice.
    ///
    /// # Arguments
    /// * `s` - The MTI string (exactly four decimal digits)
    ///
    /// # Errors
    /// Returns `MessageError::InvalidMti` when the string is empty, not four
    /// characters long, or contains non-digits.
    pub fn new(s: &str) -> Result<Self, MessageError> {
        if s.is_empty() {
            return Err(MessageError::InvalidMti {
                reason: "MTI is required",
            });
        }
        if s.len() != MTI_LEN {
            return Err(MessageError::InvalidMti {
                reason: "MTI must be exactly four characters",
            });
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MessageError::InvalidMti {
                reason: "MTI must contain only digits",
            });
        }
        let inner = ArrayString::from(s).map_err(|_| MessageError::InvalidMti {
            reason: "MTI must be exactly four characters",
        })?;
        Ok(Self(inner))
    }

    /// Returns the MTI as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the MTI digits as bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl FromStr for Mti {
    type Err = MessageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Mti {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wire layout of the MTI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MtiEncoding {
    /// Four ASCII digit bytes.
    #[default]
    Ascii,
    /// Two packed-BCD bytes.
    Bcd,
}

impl MtiEncoding {
    /// Returns the number of bytes the MTI occupies on the wire.
    #[inline]
    #[must_use]
    pub const fn encoded_len(self) -> usize {
        match self {
            Self::Ascii => MTI_LEN,
            Self::Bcd => MTI_LEN / 2,
        }
    }
}

/// An ISO 8583 message: MTI plus a sparse set of numbered field values.
///
/// Fields are kept ordered by number, so encoded bodies always appear in
/// ascending field-number order regardless of insertion order. Inserting a
/// field numbered above 64 raises `has_secondary_bitmap` automatically; the
/// flag can also be raised explicitly to force a 16-byte bitmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    mti: Mti,
    mti_encoding: MtiEncoding,
    has_secondary_bitmap: bool,
    fields: BTreeMap<FieldNumber, FieldValue>,
}

impl Message {
    /// Creates a new message with an ASCII MTI and no fields.
    ///
    /// # Arguments
    /// * `mti` - The message type indicator
    #[must_use]
    pub fn new(mti: Mti) -> Self {
        Self {
            mti,
            mti_encoding: MtiEncoding::Ascii,
            has_secondary_bitmap: false,
            fields: BTreeMap::new(),
        }
    }

    /// Sets the MTI wire encoding.
    ///
    /// # Arguments
    /// * `encoding` - ASCII or packed BCD
    #[must_use]
    pub fn with_mti_encoding(mut self, encoding: MtiEncoding) -> Self {
        self.mti_encoding = encoding;
        self
    }

    /// Returns the message type indicator.
    #[inline]
    #[must_use]
    pub const fn mti(&self) -> Mti {
        self.mti
    }

    /// Returns the MTI wire encoding.
    #[inline]
    #[must_use]
    pub const fn mti_encoding(&self) -> MtiEncoding {
        self.mti_encoding
    }

    /// Returns true if the message uses a 16-byte bitmap.
    #[inline]
    #[must_use]
    pub const fn has_secondary_bitmap(&self) -> bool {
        self.has_secondary_bitmap
    }

    /// Forces the secondary bitmap on, regardless of field numbers present.
    pub fn set_secondary_bitmap(&mut self) {
        self.has_secondary_bitmap = true;
    }

    /// Sets a field value, replacing any previous value for the number.
    ///
    /// A number above 64 raises `has_secondary_bitmap`.
    ///
    /// # Arguments
    /// * `number` - The field number
    /// * `value` - The field value
    pub fn set(&mut self, number: FieldNumber, value: FieldValue) {
        if number.requires_secondary_bitmap() {
            self.has_secondary_bitmap = true;
        }
        self.fields.insert(number, value);
    }

    /// Gets a field value by number.
    #[must_use]
    pub fn get(&self, number: FieldNumber) -> Option<&FieldValue> {
        self.fields.get(&number)
    }

    /// Removes a field value by number, returning it if present.
    pub fn remove(&mut self, number: FieldNumber) -> Option<FieldValue> {
        self.fields.remove(&number)
    }

    /// Returns true if a value is present for the number.
    #[must_use]
    pub fn contains(&self, number: FieldNumber) -> bool {
        self.fields.contains_key(&number)
    }

    /// Returns an iterator over fields in ascending number order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldNumber, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (*n, v))
    }

    /// Returns the number of fields present.
    #[inline]
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are present.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
