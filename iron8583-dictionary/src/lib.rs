/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # iron8583 Dictionary
//!
//! Resolved field schemas for the iron8583 ISO 8583 codec.
//!
//! A schema maps field numbers to descriptors: the field kind, the declared
//! length, and the body and length-prefix encodings. The codec consumes a
//! resolved [`Schema`]; how an application declares its fields (struct
//! annotations, config files, builders) is a collaborator concern. The
//! [`FieldDecl`] type covers the common token-based declaration surface.
//!
//! Schemas are logically immutable once built and may be shared freely
//! across threads.

pub mod decl;
pub mod schema;

pub use decl::{resolve_kind, resolve_schema, FieldDecl};
pub use schema::{FieldCoding, FieldDescriptor, Schema};
