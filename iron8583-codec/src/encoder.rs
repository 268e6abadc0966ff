/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! ISO 8583 message encoder.
//!
//! The encoder composes the MTI, the field-presence bitmap, and the
//! concatenated field bodies into a single byte string. Field bodies appear
//! in strict ascending field-number order, the wire requirement, regardless
//! of schema or message insertion order.

use crate::bitmap::Bitmap;
use crate::field::encode_field;
use crate::mti::encode_mti;
use bytes::{BufMut, BytesMut};
use iron8583_core::error::{Iso8583Error, MessageError};
use iron8583_core::message::Message;
use iron8583_dictionary::Schema;
use tracing::{debug, trace};

/// ISO 8583 message encoder.
///
/// The encoder borrows a resolved schema; one encoder can serve any number
/// of messages, and schemas may be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    schema: &'a Schema,
}

impl<'a> Encoder<'a> {
    /// Creates an encoder over a resolved schema.
    ///
    /// # Arguments
    /// * `schema` - The field descriptors to encode against
    #[inline]
    #[must_use]
    pub const fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Encodes a message into its wire bytes.
    ///
    /// Fields without a schema descriptor and fields with empty values are
    /// skipped and their bitmap bits stay clear. A field numbered above 64
    /// forces the 16-byte bitmap even if the message flag was never raised.
    ///
    /// # Arguments
    /// * `message` - The message to encode
    ///
    /// # Errors
    /// Returns `MessageError::FieldKindMismatch` when a value's variant
    /// disagrees with its descriptor, or any field-level `CodecError`
    /// wrapped with the offending field number.
    pub fn encode(&self, message: &Message) -> Result<BytesMut, Iso8583Error> {
        let mti_bytes = encode_mti(message.mti(), message.mti_encoding());

        let extended = message.has_secondary_bitmap()
            || message
                .fields()
                .any(|(number, _)| number.requires_secondary_bitmap());
        let mut bitmap = Bitmap::new(extended);
        let mut body = BytesMut::with_capacity(256);

        for (number, value) in message.fields() {
            if value.is_empty() {
                continue;
            }
            let Some(descriptor) = self.schema.get(number) else {
                continue;
            };
            if descriptor.kind() != value.kind() {
                return Err(MessageError::FieldKindMismatch {
                    number,
                    expected: descriptor.kind(),
                    found: value.kind(),
                }
                .into());
            }

            let encoded = encode_field(value, descriptor.coding())
                .map_err(|source| MessageError::Field { number, source })?;
            trace!(field = number.value(), bytes = encoded.len(), "encoded field");
            bitmap.set(number);
            body.put_slice(&encoded);
        }

        let mut out = BytesMut::with_capacity(mti_bytes.len() + bitmap.len() + body.len());
        out.put_slice(&mti_bytes);
        out.put_slice(bitmap.as_bytes());
        out.put_slice(&body);

        debug!(
            mti = %message.mti(),
            fields = message.field_count(),
            len = out.len(),
            "encoded message"
        );
        Ok(out)
    }
}
