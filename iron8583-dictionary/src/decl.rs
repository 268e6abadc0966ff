/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Token-based field declarations.
//!
//! Applications commonly declare ISO 8583 layouts with short string tokens:
//! a kind (`"numeric"`, `"alphanum"`, `"binary"`), a length format (`""`,
//! `"ll"`, `"lll"`), and encoding names (`"ascii"`, `"bcd"`, `"lbcd"`,
//! `"rbcd"`). [`FieldDecl`] is that surface; [`FieldDecl::resolve`] turns a
//! declaration into an invariant-checked [`FieldDescriptor`].
//!
//! `binary` with `"ll"` resolves to [`FieldKind::LlVar`] and with `"lll"` to
//! [`FieldKind::LllVar`]; the two prefixes are distinct kinds.

use crate::schema::{FieldCoding, FieldDescriptor, Schema};
use iron8583_core::encoding::Encoding;
use iron8583_core::error::SchemaError;
use iron8583_core::field::{FieldKind, FieldNumber};
use serde::{Deserialize, Serialize};

/// One field declaration in token form.
///
/// The serde shape matches what a declaration file would carry, with every
/// token optional except the number and kind:
///
/// ```json
/// { "number": 2, "kind": "numeric", "length": 19,
///   "length_format": "ll", "encoding": "bcd", "length_encoding": "rbcd" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Field number, 1..=128.
    pub number: u8,
    /// Kind token: `"numeric"`, `"alphanum"` or `"binary"`.
    pub kind: String,
    /// Declared length; exact for fixed fields, maximum for variable ones.
    #[serde(default)]
    pub length: Option<usize>,
    /// Length-format token: `""` (fixed), `"ll"` or `"lll"`.
    #[serde(default)]
    pub length_format: String,
    /// Body encoding token; defaults to `"ascii"`.
    #[serde(default = "default_encoding")]
    pub encoding: String,
    /// Length-prefix encoding token; defaults to `"ascii"`.
    #[serde(default = "default_encoding")]
    pub length_encoding: String,
}

fn default_encoding() -> String {
    "ascii".to_string()
}

impl FieldDecl {
    /// Creates a fixed-length declaration with ASCII encodings.
    ///
    /// # Arguments
    /// * `number` - The field number
    /// * `kind` - The kind token
    /// * `length` - The declared length
    #[must_use]
    pub fn fixed(number: u8, kind: &str, length: usize) -> Self {
        Self {
            number,
            kind: kind.to_string(),
            length: Some(length),
            length_format: String::new(),
            encoding: default_encoding(),
            length_encoding: default_encoding(),
        }
    }

    /// Creates a variable-length declaration with ASCII encodings.
    ///
    /// # Arguments
    /// * `number` - The field number
    /// * `kind` - The kind token
    /// * `length_format` - `"ll"` or `"lll"`
    #[must_use]
    pub fn variable(number: u8, kind: &str, length_format: &str) -> Self {
        Self {
            number,
            kind: kind.to_string(),
            length: None,
            length_format: length_format.to_string(),
            encoding: default_encoding(),
            length_encoding: default_encoding(),
        }
    }

    /// Sets the body encoding token.
    #[must_use]
    pub fn with_encoding(mut self, token: &str) -> Self {
        self.encoding = token.to_string();
        self
    }

    /// Sets the length-prefix encoding token.
    #[must_use]
    pub fn with_length_encoding(mut self, token: &str) -> Self {
        self.length_encoding = token.to_string();
        self
    }

    /// Sets the maximum length of a variable declaration.
    #[must_use]
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.length = Some(max);
        self
    }

    /// Resolves this declaration into an invariant-checked descriptor.
    ///
    /// # Errors
    /// Returns a `SchemaError` for an out-of-range number, an unknown kind,
    /// length-format or encoding token, or a kind/coding combination the
    /// schema invariants reject.
    pub fn resolve(&self) -> Result<FieldDescriptor, SchemaError> {
        let number =
            FieldNumber::new(self.number).ok_or(SchemaError::InvalidFieldNumber {
                number: self.number,
            })?;
        let kind = resolve_kind(&self.kind, &self.length_format)?;
        let body = Encoding::from_token(&self.encoding).ok_or_else(|| {
            SchemaError::UnknownEncoding {
                token: self.encoding.clone(),
            }
        })?;
        let length = Encoding::from_token(&self.length_encoding).ok_or_else(|| {
            SchemaError::UnknownLengthEncoding {
                token: self.length_encoding.clone(),
            }
        })?;
        FieldDescriptor::new(
            number,
            kind,
            FieldCoding {
                body,
                length,
                declared_len: self.length,
            },
        )
    }
}

/// Resolves kind and length-format tokens into a [`FieldKind`].
///
/// # Errors
/// Returns `SchemaError::UnknownKind` or `SchemaError::UnknownLengthFormat`
/// for unrecognized tokens; `alphanum` accepts only the fixed format.
pub fn resolve_kind(kind: &str, length_format: &str) -> Result<FieldKind, SchemaError> {
    let unknown_format = || SchemaError::UnknownLengthFormat {
        token: length_format.to_string(),
    };
    match kind {
        "numeric" => match length_format {
            "" => Ok(FieldKind::Numeric),
            "ll" => Ok(FieldKind::LlNumeric),
            "lll" => Ok(FieldKind::LllNumeric),
            _ => Err(unknown_format()),
        },
        "alphanum" => match length_format {
            "" => Ok(FieldKind::Alphanumeric),
            _ => Err(unknown_format()),
        },
        "binary" => match length_format {
            "" => Ok(FieldKind::Binary),
            "ll" => Ok(FieldKind::LlVar),
            "lll" => Ok(FieldKind::LllVar),
            _ => Err(unknown_format()),
        },
        _ => Err(SchemaError::UnknownKind {
            token: kind.to_string(),
        }),
    }
}

/// Resolves a set of declarations into a schema.
///
/// # Errors
/// Returns the first `SchemaError` any declaration produces.
pub fn resolve_schema<'a, I>(decls: I) -> Result<Schema, SchemaError>
where
    I: IntoIterator<Item = &'a FieldDecl>,
{
    let mut schema = Schema::new();
    for decl in decls {
        schema.insert(decl.resolve()?);
    }
    Ok(schema)
}
