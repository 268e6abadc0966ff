/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Schema definitions for ISO 8583 field layouts.
//!
//! This module defines the structures a resolved schema is made of:
//! - [`FieldCoding`]: The encoding triple a descriptor hands to the codec
//! - [`FieldDescriptor`]: One field's kind and coding, invariant-checked
//! - [`Schema`]: An ordered map from field number to descriptor

use iron8583_core::encoding::Encoding;
use iron8583_core::error::SchemaError;
use iron8583_core::field::{FieldKind, FieldNumber};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The encoding triple the codec needs for one field.
///
/// Some kinds ignore parts of the triple: fixed kinds never read `length`,
/// alphanumeric bodies are always ASCII, and variable kinds treat
/// `declared_len` as an optional maximum rather than an exact length. The
/// triple still travels as one record so call sites never pass positional
/// integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCoding {
    /// Encoding of the field body.
    pub body: Encoding,
    /// Encoding of the length prefix (variable kinds only).
    pub length: Encoding,
    /// Declared length: exact for fixed kinds, maximum for variable kinds.
    pub declared_len: Option<usize>,
}

impl FieldCoding {
    /// Coding for a fixed-length field.
    ///
    /// # Arguments
    /// * `body` - The body encoding
    /// * `declared_len` - The exact field length
    #[must_use]
    pub const fn fixed(body: Encoding, declared_len: usize) -> Self {
        Self {
            body,
            length: Encoding::Ascii,
            declared_len: Some(declared_len),
        }
    }

    /// Coding for a variable-length field.
    ///
    /// # Arguments
    /// * `body` - The body encoding
    /// * `length` - The length-prefix encoding
    /// * `max_len` - Optional maximum content length
    #[must_use]
    pub const fn variable(body: Encoding, length: Encoding, max_len: Option<usize>) -> Self {
        Self {
            body,
            length,
            declared_len: max_len,
        }
    }

}

/// A resolved descriptor for one field number.
///
/// Construction enforces the schema invariants, so a held descriptor is
/// always consistent: alphanumeric and VAR bodies are ASCII, fixed kinds
/// carry a declared length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    number: FieldNumber,
    kind: FieldKind,
    coding: FieldCoding,
}

impl FieldDescriptor {
    /// Creates a descriptor, checking the kind/coding invariants.
    ///
    /// # Arguments
    /// * `number` - The field number
    /// * `kind` - The field kind
    /// * `coding` - The encoding triple
    ///
    /// # Errors
    /// Returns `SchemaError::NonAsciiBody` when an alphanumeric or VAR kind
    /// declares a BCD body, and `SchemaError::MissingDeclaredLength` when a
    /// fixed kind lacks a length.
    pub fn new(
        number: FieldNumber,
        kind: FieldKind,
        coding: FieldCoding,
    ) -> Result<Self, SchemaError> {
        match kind {
            FieldKind::Alphanumeric | FieldKind::LlVar | FieldKind::LllVar => {
                if coding.body != Encoding::Ascii {
                    return Err(SchemaError::NonAsciiBody {
                        number,
                        kind,
                        encoding: coding.body,
                    });
                }
            }
            FieldKind::Numeric | FieldKind::Binary | FieldKind::LlNumeric
            | FieldKind::LllNumeric => {}
        }
        if kind.is_fixed() && coding.declared_len.is_none() {
            return Err(SchemaError::MissingDeclaredLength { number, kind });
        }
        Ok(Self {
            number,
            kind,
            coding,
        })
    }

    /// Returns the field number.
    #[inline]
    #[must_use]
    pub const fn number(&self) -> FieldNumber {
        self.number
    }

    /// Returns the field kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the encoding triple.
    #[inline]
    #[must_use]
    pub const fn coding(&self) -> &FieldCoding {
        &self.coding
    }
}

/// An ordered mapping from field numbers to descriptors.
///
/// Iteration order is ascending field number, which is also the order field
/// bodies appear on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    fields: BTreeMap<FieldNumber, FieldDescriptor>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a descriptor, replacing any previous descriptor for the number.
    pub fn insert(&mut self, descriptor: FieldDescriptor) {
        self.fields.insert(descriptor.number(), descriptor);
    }

    /// Gets a descriptor by field number.
    #[must_use]
    pub fn get(&self, number: FieldNumber) -> Option<&FieldDescriptor> {
        self.fields.get(&number)
    }

    /// Returns true if a descriptor exists for the number.
    #[must_use]
    pub fn contains(&self, number: FieldNumber) -> bool {
        self.fields.contains_key(&number)
    }

    /// Returns an iterator over descriptors in ascending number order.
    pub fn descriptors(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    /// Returns the number of descriptors.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema has no descriptors.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<FieldDescriptor> for Schema {
    fn from_iter<I: IntoIterator<Item = FieldDescriptor>>(iter: I) -> Self {
        let mut schema = Self::new();
        for descriptor in iter {
            schema.insert(descriptor);
        }
        schema
    }
}
