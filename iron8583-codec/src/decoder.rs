/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! ISO 8583 message decoder.
//!
//! The decoder walks a raw buffer through the frame stages in order: MTI,
//! bitmap, then one field body per set bit in ascending field-number order.
//! Bit 1 denotes the secondary bitmap, not a field. Any failure aborts the
//! whole decode; no partial message is surfaced.

use crate::bitmap::Bitmap;
use crate::field::decode_field;
use crate::mti::decode_mti;
use iron8583_core::error::{Iso8583Error, MessageError};
use iron8583_core::message::{Message, Mti, MtiEncoding};
use iron8583_dictionary::Schema;
use tracing::{debug, trace};

/// ISO 8583 message decoder.
///
/// The decoder borrows a resolved schema and is configured with the MTI
/// layout of the originating network. When the MTI is already known (some
/// switches strip it into a transport header), [`Decoder::with_mti`]
/// supplies it and the decoder still skips its on-wire width.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    schema: &'a Schema,
    mti_encoding: MtiEncoding,
    mti: Option<Mti>,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder over a resolved schema, expecting an ASCII MTI.
    ///
    /// # Arguments
    /// * `schema` - The field descriptors to decode against
    #[inline]
    #[must_use]
    pub const fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            mti_encoding: MtiEncoding::Ascii,
            mti: None,
        }
    }

    /// Sets the MTI wire encoding.
    ///
    /// # Arguments
    /// * `encoding` - ASCII or packed BCD
    #[inline]
    #[must_use]
    pub const fn with_mti_encoding(mut self, encoding: MtiEncoding) -> Self {
        self.mti_encoding = encoding;
        self
    }

    /// Pre-supplies the MTI instead of parsing it from the buffer.
    ///
    /// The MTI bytes at the head of the buffer are still skipped; they are
    /// just not validated against the supplied value.
    ///
    /// # Arguments
    /// * `mti` - The known message type indicator
    #[inline]
    #[must_use]
    pub const fn with_mti(mut self, mti: Mti) -> Self {
        self.mti = Some(mti);
        self
    }

    /// Decodes a message from its wire bytes.
    ///
    /// # Arguments
    /// * `raw` - The complete message buffer
    ///
    /// # Errors
    /// Returns `MessageError::UndefinedField` for a set bit without a
    /// descriptor, `MessageError::Truncated` for a short MTI or bitmap,
    /// and any field-level `CodecError` wrapped with the offending field
    /// number.
    pub fn decode(&self, raw: &[u8]) -> Result<Message, Iso8583Error> {
        let mut cursor = 0usize;

        let mti = match self.mti {
            Some(mti) => {
                let skip = self.mti_encoding.encoded_len();
                if raw.len() < skip {
                    return Err(MessageError::Truncated {
                        needed: skip,
                        available: raw.len(),
                    }
                    .into());
                }
                cursor += skip;
                mti
            }
            None => {
                let (mti, consumed) = decode_mti(raw, self.mti_encoding)?;
                cursor += consumed;
                mti
            }
        };

        let (bitmap, consumed) = Bitmap::read(&raw[cursor..])?;
        cursor += consumed;

        let mut message = Message::new(mti).with_mti_encoding(self.mti_encoding);
        if bitmap.extended() {
            message.set_secondary_bitmap();
        }

        for number in bitmap.set_numbers() {
            if number.is_bitmap_indicator() {
                continue;
            }
            let descriptor = self
                .schema
                .get(number)
                .ok_or(MessageError::UndefinedField { number })?;
            let (value, read) = decode_field(descriptor.kind(), &raw[cursor..], descriptor.coding())
                .map_err(|source| MessageError::Field { number, source })?;
            trace!(field = number.value(), bytes = read, "decoded field");
            cursor += read;
            message.set(number, value);
        }

        debug!(
            mti = %message.mti(),
            fields = message.field_count(),
            len = cursor,
            "decoded message"
        );
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::Encoder;
    use iron8583_core::encoding::Encoding;
    use iron8583_core::field::{FieldKind, FieldNumber, FieldValue};
    use iron8583_dictionary::{FieldCoding, FieldDescriptor};

    fn number(n: u8) -> FieldNumber {
        FieldNumber::new(n).unwrap()
    }

    fn purchase_schema() -> Schema {
        let mut schema = Schema::new();
        schema.insert(
            FieldDescriptor::new(
                number(2),
                FieldKind::LlNumeric,
                FieldCoding::variable(Encoding::Ascii, Encoding::Ascii, Some(19)),
            )
            .unwrap(),
        );
        schema.insert(
            FieldDescriptor::new(
                number(3),
                FieldKind::Numeric,
                FieldCoding::fixed(Encoding::Ascii, 6),
            )
            .unwrap(),
        );
        schema.insert(
            FieldDescriptor::new(
                number(41),
                FieldKind::Alphanumeric,
                FieldCoding::fixed(Encoding::Ascii, 8),
            )
            .unwrap(),
        );
        schema.insert(
            FieldDescriptor::new(
                number(52),
                FieldKind::Binary,
                FieldCoding::fixed(Encoding::Ascii, 8),
            )
            .unwrap(),
        );
        schema.insert(
            FieldDescriptor::new(
                number(120),
                FieldKind::LllVar,
                FieldCoding::variable(Encoding::Ascii, Encoding::Ascii, Some(999)),
            )
            .unwrap(),
        );
        schema
    }

    #[test]
    fn test_decode_two_fields() {
        let schema = purchase_schema();
        let mut raw = Vec::new();
        raw.extend_from_slice(b"0200");
        raw.push(0x60);
        raw.extend_from_slice(&[0u8; 7]);
        raw.extend_from_slice(b"06123456000000");

        let message = Decoder::new(&schema).decode(&raw).unwrap();
        assert_eq!(message.mti().as_str(), "0200");
        assert_eq!(
            message.get(number(2)),
            Some(&FieldValue::ll_numeric("123456"))
        );
        assert_eq!(message.get(number(3)), Some(&FieldValue::numeric("000000")));
        assert!(!message.has_secondary_bitmap());
    }

    #[test]
    fn test_decode_undefined_field() {
        let schema = purchase_schema();
        let mut raw = Vec::new();
        raw.extend_from_slice(b"0200");
        raw.push(0x50); // bits 2 and 4; field 4 has no descriptor
        raw.extend_from_slice(&[0u8; 7]);
        raw.extend_from_slice(b"0212");

        let err = Decoder::new(&schema).decode(&raw).unwrap_err();
        let Iso8583Error::Message(MessageError::UndefinedField { number }) = err else {
            panic!("expected undefined field error");
        };
        assert_eq!(number.value(), 4);
    }

    #[test]
    fn test_decode_field_error_carries_number() {
        let schema = purchase_schema();
        let mut raw = Vec::new();
        raw.extend_from_slice(b"0200");
        raw.push(0x40);
        raw.extend_from_slice(&[0u8; 7]);
        raw.extend_from_slice(b"06123"); // LL promises six digits, three arrive

        let err = Decoder::new(&schema).decode(&raw).unwrap_err();
        let Iso8583Error::Message(MessageError::Field { number, .. }) = err else {
            panic!("expected field-level error");
        };
        assert_eq!(number.value(), 2);
    }

    #[test]
    fn test_decode_truncated_bitmap() {
        let schema = purchase_schema();
        let err = Decoder::new(&schema).decode(b"0200\x60\x00").unwrap_err();
        assert!(matches!(
            err,
            Iso8583Error::Message(MessageError::Truncated { .. })
        ));
    }

    #[test]
    fn test_decode_with_presupplied_mti_skips_bytes() {
        let schema = purchase_schema();
        let mut raw = Vec::new();
        raw.extend_from_slice(b"XXXX"); // garbage where the MTI would sit
        raw.push(0x20);
        raw.extend_from_slice(&[0u8; 7]);
        raw.extend_from_slice(b"000000");

        let mti = Mti::new("0210").unwrap();
        let message = Decoder::new(&schema).with_mti(mti).decode(&raw).unwrap();
        assert_eq!(message.mti(), mti);
        assert_eq!(message.get(number(3)), Some(&FieldValue::numeric("000000")));
    }

    #[test]
    fn test_roundtrip_ascii_message() {
        let schema = purchase_schema();
        let mut message = Message::new(Mti::new("0200").unwrap());
        message.set(number(2), FieldValue::ll_numeric("4242424242424242"));
        message.set(number(3), FieldValue::numeric("000000"));
        message.set(number(41), FieldValue::alphanumeric("TERM0001"));
        message.set(
            number(52),
            FieldValue::binary(vec![0xDE, 0xAD, 0xBE, 0xEF, 0, 0, 0, 0]),
        );

        let wire = Encoder::new(&schema).encode(&message).unwrap();
        let decoded = Decoder::new(&schema).decode(&wire).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn test_roundtrip_bcd_mti_and_bodies() {
        let mut schema = Schema::new();
        schema.insert(
            FieldDescriptor::new(
                number(2),
                FieldKind::LlNumeric,
                FieldCoding::variable(Encoding::BcdLeft, Encoding::BcdRight, Some(19)),
            )
            .unwrap(),
        );
        schema.insert(
            FieldDescriptor::new(
                number(3),
                FieldKind::Numeric,
                FieldCoding::fixed(Encoding::BcdRight, 5),
            )
            .unwrap(),
        );

        let mut message =
            Message::new(Mti::new("0200").unwrap()).with_mti_encoding(MtiEncoding::Bcd);
        message.set(number(2), FieldValue::ll_numeric("12345"));
        message.set(number(3), FieldValue::numeric("98765"));

        let wire = Encoder::new(&schema).encode(&message).unwrap();
        // MTI (2) + bitmap (8) + prefix (1) + packed pan (3) + packed amount (3).
        assert_eq!(wire.len(), 2 + 8 + 1 + 3 + 3);

        let decoded = Decoder::new(&schema)
            .with_mti_encoding(MtiEncoding::Bcd)
            .decode(&wire)
            .unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn test_roundtrip_extended_bitmap_field_128() {
        let mut schema = purchase_schema();
        schema.insert(
            FieldDescriptor::new(
                number(128),
                FieldKind::Binary,
                FieldCoding::fixed(Encoding::Ascii, 4),
            )
            .unwrap(),
        );

        let mut message = Message::new(Mti::new("0200").unwrap());
        message.set(number(3), FieldValue::numeric("000000"));
        message.set(number(128), FieldValue::binary(vec![1u8, 2, 3, 4]));

        let wire = Encoder::new(&schema).encode(&message).unwrap();
        assert_eq!(wire[4] & 0x80, 0x80);
        assert_eq!(wire[4 + 15], 0x01);

        let decoded = Decoder::new(&schema).decode(&wire).unwrap();
        assert!(decoded.has_secondary_bitmap());
        assert_eq!(decoded, message);
    }

    #[test]
    fn test_roundtrip_lllvar_field() {
        let schema = purchase_schema();
        let mut message = Message::new(Mti::new("0200").unwrap());
        let payload = "A".repeat(257);
        message.set(number(120), FieldValue::lll_var(payload.into_bytes()));

        let wire = Encoder::new(&schema).encode(&message).unwrap();
        let decoded = Decoder::new(&schema).decode(&wire).unwrap();
        assert_eq!(decoded, message);
    }

    #[test]
    fn test_bitmap_bit_count_matches_bodies() {
        let schema = purchase_schema();
        let mut message = Message::new(Mti::new("0200").unwrap());
        message.set(number(2), FieldValue::ll_numeric("123"));
        message.set(number(3), FieldValue::numeric("1"));
        message.set(number(41), FieldValue::alphanumeric("T1"));

        let wire = Encoder::new(&schema).encode(&message).unwrap();
        let (bitmap, _) = Bitmap::read(&wire[4..]).unwrap();
        let data_bits = bitmap
            .set_numbers()
            .filter(|n| !n.is_bitmap_indicator())
            .count();
        assert_eq!(data_bits, 3);

        let decoded = Decoder::new(&schema).decode(&wire).unwrap();
        assert_eq!(decoded.field_count(), data_bits);
    }
}
