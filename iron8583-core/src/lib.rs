/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # iron8583 Core
//!
//! Core types, traits, and error definitions for the iron8583 ISO 8583 codec.
//!
//! This crate provides the fundamental building blocks used across all iron8583 crates:
//! - **Error types**: Unified error handling with `thiserror`
//! - **Encoding types**: The three wire encodings (`Ascii`, `BcdLeft`, `BcdRight`)
//! - **Field types**: `FieldNumber`, `FieldKind`, `FieldValue`, `BinaryValue`
//! - **Message types**: `Mti`, `MtiEncoding`, `Message`
//!
//! ## Ownership Model
//!
//! A [`Message`](message::Message) is a plain owned value: it is built by one caller,
//! encoded into an immutable byte string, or populated by the decoder. Nothing in this
//! crate holds shared state, so values may be used concurrently on disjoint inputs
//! without coordination.

pub mod encoding;
pub mod error;
pub mod field;
pub mod message;

pub use encoding::Encoding;
pub use error::{CodecError, Iso8583Error, MessageError, Result, SchemaError};
pub use field::{BinaryValue, FieldKind, FieldNumber, FieldValue};
pub use message::{Message, Mti, MtiEncoding};
