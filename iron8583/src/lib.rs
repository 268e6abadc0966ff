/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # iron8583
//!
//! An ISO 8583 financial message codec for Rust.
//!
//! iron8583 encodes an in-memory message (MTI plus a sparse set of numbered
//! fields) into the bitmap-indexed binary wire format card-payment networks
//! exchange, and decodes such byte streams back into the same structure.
//! Encode and decode are exact inverses at the byte level, which is what
//! interoperating with third-party switches requires.
//!
//! ## Features
//!
//! - **Three wire encodings**: ASCII, left-aligned packed BCD, right-aligned
//!   packed BCD, mixed freely per field
//! - **Seven field disciplines**: fixed numeric/alphanumeric/binary plus
//!   LL/LLL-prefixed numeric and binary variants
//! - **Typed schemas**: invariant-checked descriptors, resolved once and
//!   shared freely across threads
//! - **Closed error taxonomy**: every failure carries the offending field
//!   number and enough context to act on
//!
//! ## Quick Start
//!
//! ```rust
//! use iron8583::codec::{Decoder, Encoder};
//! use iron8583::core::{FieldNumber, FieldValue, Message, Mti};
//! use iron8583::dictionary::{resolve_schema, FieldDecl};
//!
//! let decls = vec![
//!     FieldDecl::variable(2, "numeric", "ll").with_max_length(19),
//!     FieldDecl::fixed(3, "numeric", 6),
//!     FieldDecl::fixed(41, "alphanum", 8),
//! ];
//! let schema = resolve_schema(&decls).unwrap();
//!
//! let mut message = Message::new(Mti::new("0200").unwrap());
//! message.set(
//!     FieldNumber::new(2).unwrap(),
//!     FieldValue::ll_numeric("4242424242424242"),
//! );
//! message.set(FieldNumber::new(3).unwrap(), FieldValue::numeric("000000"));
//!
//! let wire = Encoder::new(&schema).encode(&message).unwrap();
//! let decoded = Decoder::new(&schema).decode(&wire).unwrap();
//! assert_eq!(decoded, message);
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`]: Fundamental types and error definitions
//! - [`dictionary`]: Resolved schemas and token-based field declarations
//! - [`codec`]: BCD primitives, the field codec, and message framing

pub mod core {
    //! Fundamental types and error definitions.
    pub use iron8583_core::*;
}

pub mod dictionary {
    //! Resolved schemas and token-based field declarations.
    pub use iron8583_dictionary::*;
}

pub mod codec {
    //! BCD primitives, the field codec, and message framing.
    pub use iron8583_codec::*;
}

pub use iron8583_core::{
    BinaryValue, CodecError, Encoding, FieldKind, FieldNumber, FieldValue, Iso8583Error, Message,
    MessageError, Mti, MtiEncoding, Result, SchemaError,
};
