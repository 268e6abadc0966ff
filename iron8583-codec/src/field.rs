/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Per-kind field codec.
//!
//! Each of the seven field disciplines has its own encode and decode rules;
//! the two public entry points dispatch exhaustively over them. Encoding
//! consumes a [`FieldValue`] and the descriptor's [`FieldCoding`] triple and
//! yields wire bytes; decoding consumes the schema kind, the remaining raw
//! buffer, and the triple, and yields the value plus the bytes consumed.
//!
//! The two operations are exact inverses at the byte level for well-formed
//! values, which is what third-party switches require.

use crate::bcd;
use crate::length::{self, LengthWidth};
use bytes::{BufMut, Bytes, BytesMut};
use iron8583_core::encoding::Encoding;
use iron8583_core::error::CodecError;
use iron8583_core::field::{BinaryValue, FieldKind, FieldValue};
use iron8583_dictionary::FieldCoding;

/// Encodes a field value into its wire bytes.
///
/// # Arguments
/// * `value` - The field value; its variant selects the discipline
/// * `coding` - The descriptor's encoding triple
///
/// # Errors
/// Returns the [`CodecError`] the discipline's rules produce.
pub fn encode_field(value: &FieldValue, coding: &FieldCoding) -> Result<BytesMut, CodecError> {
    match value {
        FieldValue::Numeric(v) => encode_fixed_numeric(v, coding),
        FieldValue::Alphanumeric(v) => encode_fixed_alphanumeric(v, coding),
        FieldValue::Binary(b) => encode_fixed_binary(b, coding),
        FieldValue::LlNumeric(v) => {
            encode_var_numeric(v, LengthWidth::Ll, FieldKind::LlNumeric, coding)
        }
        FieldValue::LllNumeric(v) => {
            encode_var_numeric(v, LengthWidth::Lll, FieldKind::LllNumeric, coding)
        }
        FieldValue::LlVar(d) => encode_var_bytes(d, LengthWidth::Ll, FieldKind::LlVar, coding),
        FieldValue::LllVar(d) => encode_var_bytes(d, LengthWidth::Lll, FieldKind::LllVar, coding),
    }
}

/// Decodes a field value from the head of `raw`.
///
/// # Arguments
/// * `kind` - The discipline the schema declares for this field
/// * `raw` - The remaining raw buffer, starting at this field
/// * `coding` - The descriptor's encoding triple
///
/// # Returns
/// The decoded value and the number of bytes consumed.
///
/// # Errors
/// Returns the [`CodecError`] the discipline's rules produce.
pub fn decode_field(
    kind: FieldKind,
    raw: &[u8],
    coding: &FieldCoding,
) -> Result<(FieldValue, usize), CodecError> {
    match kind {
        FieldKind::Numeric => decode_fixed_numeric(raw, coding),
        FieldKind::Alphanumeric => decode_fixed_alphanumeric(raw, coding),
        FieldKind::Binary => decode_fixed_binary(raw, coding),
        FieldKind::LlNumeric => {
            let (digits, consumed) = decode_var_numeric(raw, LengthWidth::Ll, coding)?;
            Ok((FieldValue::LlNumeric(digits), consumed))
        }
        FieldKind::LllNumeric => {
            let (digits, consumed) = decode_var_numeric(raw, LengthWidth::Lll, coding)?;
            Ok((FieldValue::LllNumeric(digits), consumed))
        }
        FieldKind::LlVar => {
            let (data, consumed) =
                decode_var_bytes(raw, LengthWidth::Ll, FieldKind::LlVar, coding)?;
            Ok((FieldValue::LlVar(data), consumed))
        }
        FieldKind::LllVar => {
            let (data, consumed) =
                decode_var_bytes(raw, LengthWidth::Lll, FieldKind::LllVar, coding)?;
            Ok((FieldValue::LllVar(data), consumed))
        }
    }
}

fn encode_fixed_numeric(digits: &str, coding: &FieldCoding) -> Result<BytesMut, CodecError> {
    let declared = coding.declared_len.ok_or(CodecError::MissingLength {
        kind: FieldKind::Numeric,
    })?;

    // A right-aligned BCD decode at a wider logical length can hand back the
    // same value with one extra leading zero; accept it and drop the zero so
    // both forms encode to identical bytes.
    let mut val = digits;
    if coding.body == Encoding::BcdRight && val.len() == declared + 1 && val.starts_with('0') {
        val = &val[1..];
    }

    if val.len() > declared {
        return Err(CodecError::ValueTooLong {
            kind: FieldKind::Numeric,
            declared,
            len: val.len(),
        });
    }

    let mut padded = String::with_capacity(declared);
    for _ in val.len()..declared {
        padded.push('0');
    }
    padded.push_str(val);

    let mut out = BytesMut::with_capacity(declared);
    match coding.body {
        Encoding::Ascii => out.put_slice(padded.as_bytes()),
        Encoding::BcdLeft => out.put_slice(&bcd::pack_left(padded.as_bytes())),
        Encoding::BcdRight => out.put_slice(&bcd::pack_right(padded.as_bytes())),
    }
    Ok(out)
}

fn decode_fixed_numeric(
    raw: &[u8],
    coding: &FieldCoding,
) -> Result<(FieldValue, usize), CodecError> {
    let declared = coding.declared_len.ok_or(CodecError::MissingLength {
        kind: FieldKind::Numeric,
    })?;
    let consumed = if coding.body.is_bcd() {
        (declared + 1) / 2
    } else {
        declared
    };
    if raw.len() < consumed {
        return Err(CodecError::BadRaw {
            needed: consumed,
            available: raw.len(),
        });
    }

    let digits = match coding.body {
        Encoding::Ascii => raw[..consumed].to_vec(),
        Encoding::BcdLeft => bcd::unpack_left(&raw[..consumed], declared),
        Encoding::BcdRight => bcd::unpack_right(&raw[..consumed], declared),
    };
    let digits = String::from_utf8_lossy(&digits).into_owned();
    Ok((FieldValue::Numeric(digits), consumed))
}

fn encode_fixed_alphanumeric(text: &str, coding: &FieldCoding) -> Result<BytesMut, CodecError> {
    let declared = coding.declared_len.ok_or(CodecError::MissingLength {
        kind: FieldKind::Alphanumeric,
    })?;
    if text.len() > declared {
        return Err(CodecError::ValueTooLong {
            kind: FieldKind::Alphanumeric,
            declared,
            len: text.len(),
        });
    }

    let mut out = BytesMut::with_capacity(declared);
    out.put_bytes(b' ', declared - text.len());
    out.put_slice(text.as_bytes());
    Ok(out)
}

fn decode_fixed_alphanumeric(
    raw: &[u8],
    coding: &FieldCoding,
) -> Result<(FieldValue, usize), CodecError> {
    let declared = coding.declared_len.ok_or(CodecError::MissingLength {
        kind: FieldKind::Alphanumeric,
    })?;
    if raw.len() < declared {
        return Err(CodecError::BadRaw {
            needed: declared,
            available: raw.len(),
        });
    }
    let text = String::from_utf8_lossy(&raw[..declared]).into_owned();
    Ok((FieldValue::Alphanumeric(text), declared))
}

fn encode_fixed_binary(value: &BinaryValue, coding: &FieldCoding) -> Result<BytesMut, CodecError> {
    // A decoded value carries the length it arrived at; that wins over the
    // schema so re-encoding survives a schema without a declared length.
    let effective = value
        .fix_len()
        .or(coding.declared_len)
        .ok_or(CodecError::MissingLength {
            kind: FieldKind::Binary,
        })?;
    if value.len() > effective {
        return Err(CodecError::ValueTooLong {
            kind: FieldKind::Binary,
            declared: effective,
            len: value.len(),
        });
    }

    let mut out = BytesMut::with_capacity(effective);
    out.put_slice(value.as_slice());
    out.put_bytes(0u8, effective - value.len());
    Ok(out)
}

fn decode_fixed_binary(
    raw: &[u8],
    coding: &FieldCoding,
) -> Result<(FieldValue, usize), CodecError> {
    let declared = coding.declared_len.ok_or(CodecError::MissingLength {
        kind: FieldKind::Binary,
    })?;
    if raw.len() < declared {
        return Err(CodecError::BadRaw {
            needed: declared,
            available: raw.len(),
        });
    }
    let value = BinaryValue::with_fix_len(Bytes::copy_from_slice(&raw[..declared]), declared);
    Ok((FieldValue::Binary(value), declared))
}

fn encode_var_bytes(
    data: &[u8],
    width: LengthWidth,
    kind: FieldKind,
    coding: &FieldCoding,
) -> Result<BytesMut, CodecError> {
    if let Some(max) = coding.declared_len {
        if data.len() > max {
            return Err(CodecError::ValueTooLong {
                kind,
                declared: max,
                len: data.len(),
            });
        }
    }
    if coding.body != Encoding::Ascii {
        return Err(CodecError::InvalidEncoder {
            kind,
            encoding: coding.body,
        });
    }

    let prefix = length::encode_prefix(data.len(), width, coding.length)?;
    let mut out = BytesMut::with_capacity(prefix.len() + data.len());
    out.put_slice(&prefix);
    out.put_slice(data);
    Ok(out)
}

fn decode_var_bytes(
    raw: &[u8],
    width: LengthWidth,
    kind: FieldKind,
    coding: &FieldCoding,
) -> Result<(Bytes, usize), CodecError> {
    let (count, prefix_len) = length::decode_prefix(raw, width, coding.length)?;
    if coding.body != Encoding::Ascii {
        return Err(CodecError::InvalidEncoder {
            kind,
            encoding: coding.body,
        });
    }
    let needed = prefix_len + count;
    if raw.len() < needed {
        return Err(CodecError::BadRaw {
            needed,
            available: raw.len(),
        });
    }
    let data = Bytes::copy_from_slice(&raw[prefix_len..needed]);
    Ok((data, needed))
}

fn encode_var_numeric(
    digits: &str,
    width: LengthWidth,
    kind: FieldKind,
    coding: &FieldCoding,
) -> Result<BytesMut, CodecError> {
    if let Some(max) = coding.declared_len {
        if digits.len() > max {
            return Err(CodecError::ValueTooLong {
                kind,
                declared: max,
                len: digits.len(),
            });
        }
    }

    let body = match coding.body {
        Encoding::Ascii => digits.as_bytes().to_vec(),
        Encoding::BcdLeft => bcd::pack_left(digits.as_bytes()),
        Encoding::BcdRight => bcd::pack_right(digits.as_bytes()),
    };

    // The prefix carries the digit count, not the packed byte count.
    let prefix = length::encode_prefix(digits.len(), width, coding.length)?;
    let mut out = BytesMut::with_capacity(prefix.len() + body.len());
    out.put_slice(&prefix);
    out.put_slice(&body);
    Ok(out)
}

fn decode_var_numeric(
    raw: &[u8],
    width: LengthWidth,
    coding: &FieldCoding,
) -> Result<(String, usize), CodecError> {
    let (count, prefix_len) = length::decode_prefix(raw, width, coding.length)?;

    let (digits, consumed) = match coding.body {
        Encoding::Ascii => {
            let needed = prefix_len + count;
            if raw.len() < needed {
                return Err(CodecError::BadRaw {
                    needed,
                    available: raw.len(),
                });
            }
            (raw[prefix_len..needed].to_vec(), needed)
        }
        Encoding::BcdLeft | Encoding::BcdRight => {
            let body_len = (count + 1) / 2;
            let needed = prefix_len + body_len;
            if raw.len() < needed {
                return Err(CodecError::BadRaw {
                    needed,
                    available: raw.len(),
                });
            }
            let packed = &raw[prefix_len..needed];
            let digits = if coding.body == Encoding::BcdLeft {
                bcd::unpack_left(packed, count)
            } else {
                bcd::unpack_right(packed, count)
            };
            (digits, needed)
        }
    };
    Ok((String::from_utf8_lossy(&digits).into_owned(), consumed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use iron8583_core::encoding::Encoding;

    fn fixed(body: Encoding, len: usize) -> FieldCoding {
        FieldCoding::fixed(body, len)
    }

    fn variable(body: Encoding, length: Encoding) -> FieldCoding {
        FieldCoding::variable(body, length, None)
    }

    #[test]
    fn test_numeric_bcd_left() {
        let coding = fixed(Encoding::BcdLeft, 6);
        let wire = encode_field(&FieldValue::numeric("000123"), &coding).unwrap();
        assert_eq!(&wire[..], &[0x00, 0x01, 0x23]);

        let (value, consumed) = decode_field(FieldKind::Numeric, &wire, &coding).unwrap();
        assert_eq!(value, FieldValue::numeric("000123"));
        assert_eq!(consumed, 3);
    }

    #[test]
    fn test_numeric_ascii_left_pads_zeroes() {
        let coding = fixed(Encoding::Ascii, 6);
        let wire = encode_field(&FieldValue::numeric("123"), &coding).unwrap();
        assert_eq!(&wire[..], b"000123");
    }

    #[test]
    fn test_numeric_exact_length_unpadded() {
        let coding = fixed(Encoding::Ascii, 4);
        let wire = encode_field(&FieldValue::numeric("9540"), &coding).unwrap();
        assert_eq!(&wire[..], b"9540");
    }

    #[test]
    fn test_numeric_rbcd_odd_length() {
        let coding = fixed(Encoding::BcdRight, 3);
        let wire = encode_field(&FieldValue::numeric("954"), &coding).unwrap();
        assert_eq!(&wire[..], &[0x09, 0x54]);

        let (value, consumed) = decode_field(FieldKind::Numeric, &wire, &coding).unwrap();
        assert_eq!(value, FieldValue::numeric("954"));
        assert_eq!(consumed, 2);
    }

    #[test]
    fn test_numeric_rbcd_accepts_zero_led_extra_digit() {
        // Both the 3-digit value and its zero-led 4-digit form produce
        // identical bytes for a declared length of 3.
        let coding = fixed(Encoding::BcdRight, 3);
        let short = encode_field(&FieldValue::numeric("954"), &coding).unwrap();
        let long = encode_field(&FieldValue::numeric("0954"), &coding).unwrap();
        assert_eq!(short, long);
    }

    #[test]
    fn test_numeric_rbcd_rejects_nonzero_extra_digit() {
        let coding = fixed(Encoding::BcdRight, 3);
        let err = encode_field(&FieldValue::numeric("1954"), &coding).unwrap_err();
        assert!(matches!(err, CodecError::ValueTooLong { declared: 3, len: 4, .. }));
    }

    #[test]
    fn test_numeric_missing_length() {
        let coding = variable(Encoding::Ascii, Encoding::Ascii);
        assert!(matches!(
            encode_field(&FieldValue::numeric("12"), &coding),
            Err(CodecError::MissingLength { .. })
        ));
        assert!(matches!(
            decode_field(FieldKind::Numeric, b"12", &coding),
            Err(CodecError::MissingLength { .. })
        ));
    }

    #[test]
    fn test_numeric_too_long() {
        let coding = fixed(Encoding::Ascii, 2);
        assert!(matches!(
            encode_field(&FieldValue::numeric("123"), &coding),
            Err(CodecError::ValueTooLong {
                declared: 2,
                len: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_numeric_decode_short_raw() {
        let coding = fixed(Encoding::BcdLeft, 6);
        assert!(matches!(
            decode_field(FieldKind::Numeric, &[0x00, 0x01], &coding),
            Err(CodecError::BadRaw {
                needed: 3,
                available: 2
            })
        ));
    }

    #[test]
    fn test_alphanumeric_pads_left_with_spaces() {
        let coding = fixed(Encoding::Ascii, 10);
        let wire = encode_field(&FieldValue::alphanumeric("HI"), &coding).unwrap();
        assert_eq!(&wire[..], b"        HI");

        let (value, consumed) = decode_field(FieldKind::Alphanumeric, &wire, &coding).unwrap();
        assert_eq!(value, FieldValue::alphanumeric("        HI"));
        assert_eq!(consumed, 10);
    }

    #[test]
    fn test_alphanumeric_too_long() {
        let coding = fixed(Encoding::Ascii, 2);
        assert!(matches!(
            encode_field(&FieldValue::alphanumeric("ABC"), &coding),
            Err(CodecError::ValueTooLong { .. })
        ));
    }

    #[test]
    fn test_binary_pads_right_with_zeroes() {
        let coding = fixed(Encoding::Ascii, 4);
        let wire = encode_field(&FieldValue::binary(vec![0xDE, 0xAD]), &coding).unwrap();
        assert_eq!(&wire[..], &[0xDE, 0xAD, 0x00, 0x00]);
    }

    #[test]
    fn test_binary_decode_records_fix_len() {
        let coding = fixed(Encoding::Ascii, 4);
        let (value, consumed) =
            decode_field(FieldKind::Binary, &[1, 2, 3, 4, 5], &coding).unwrap();
        assert_eq!(consumed, 4);
        let FieldValue::Binary(binary) = &value else {
            panic!("expected binary value");
        };
        assert_eq!(binary.fix_len(), Some(4));

        // Re-encode without a declared length: the decoded length applies.
        let bare = FieldCoding::variable(Encoding::Ascii, Encoding::Ascii, None);
        let wire = encode_field(&value, &bare).unwrap();
        assert_eq!(&wire[..], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_binary_missing_length() {
        let bare = FieldCoding::variable(Encoding::Ascii, Encoding::Ascii, None);
        assert!(matches!(
            encode_field(&FieldValue::binary(vec![1u8]), &bare),
            Err(CodecError::MissingLength { .. })
        ));
    }

    #[test]
    fn test_llvar_ascii_prefix() {
        let coding = variable(Encoding::Ascii, Encoding::Ascii);
        let wire = encode_field(&FieldValue::ll_var(&b"4242424242424242"[..]), &coding).unwrap();
        assert_eq!(&wire[..2], b"16");
        assert_eq!(&wire[2..], b"4242424242424242");

        let (value, consumed) = decode_field(FieldKind::LlVar, &wire, &coding).unwrap();
        assert_eq!(value, FieldValue::ll_var(&b"4242424242424242"[..]));
        assert_eq!(consumed, 18);
    }

    #[test]
    fn test_llvar_bcd_prefix() {
        let coding = variable(Encoding::Ascii, Encoding::BcdRight);
        let wire = encode_field(&FieldValue::ll_var(&b"HELLO"[..]), &coding).unwrap();
        assert_eq!(&wire[..], &[0x05, b'H', b'E', b'L', b'L', b'O']);
    }

    #[test]
    fn test_lllvar_empty_value_prefix_only() {
        let coding = variable(Encoding::Ascii, Encoding::Ascii);
        let wire = encode_field(&FieldValue::lll_var(Vec::new()), &coding).unwrap();
        assert_eq!(&wire[..], b"000");

        let ll = encode_field(&FieldValue::ll_var(Vec::new()), &coding).unwrap();
        assert_eq!(&ll[..], b"00");
    }

    #[test]
    fn test_var_binary_rejects_bcd_body() {
        let coding = variable(Encoding::BcdLeft, Encoding::Ascii);
        assert!(matches!(
            encode_field(&FieldValue::ll_var(&b"AB"[..]), &coding),
            Err(CodecError::InvalidEncoder { .. })
        ));
        assert!(matches!(
            decode_field(FieldKind::LlVar, b"02AB", &coding),
            Err(CodecError::InvalidEncoder { .. })
        ));
    }

    #[test]
    fn test_var_too_long_against_declared_max() {
        let coding = FieldCoding::variable(Encoding::Ascii, Encoding::Ascii, Some(3));
        assert!(matches!(
            encode_field(&FieldValue::ll_var(&b"ABCD"[..]), &coding),
            Err(CodecError::ValueTooLong {
                declared: 3,
                len: 4,
                ..
            })
        ));
        // Without a declared maximum the check is skipped.
        let unbounded = variable(Encoding::Ascii, Encoding::Ascii);
        assert!(encode_field(&FieldValue::ll_var(&b"ABCD"[..]), &unbounded).is_ok());
    }

    #[test]
    fn test_llnumeric_bcd_body_and_prefix() {
        let coding = variable(Encoding::BcdLeft, Encoding::BcdRight);
        let wire = encode_field(&FieldValue::ll_numeric("12345"), &coding).unwrap();
        assert_eq!(&wire[..], &[0x05, 0x12, 0x34, 0x50]);

        let (value, consumed) = decode_field(FieldKind::LlNumeric, &wire, &coding).unwrap();
        assert_eq!(value, FieldValue::ll_numeric("12345"));
        assert_eq!(consumed, 4);
    }

    #[test]
    fn test_llnumeric_prefix_counts_digits_not_bytes() {
        let coding = variable(Encoding::BcdLeft, Encoding::Ascii);
        let wire = encode_field(&FieldValue::ll_numeric("123456"), &coding).unwrap();
        // Six digits pack into three bytes, but the prefix reads 06.
        assert_eq!(&wire[..2], b"06");
        assert_eq!(&wire[2..], &[0x12, 0x34, 0x56]);
    }

    #[test]
    fn test_llnumeric_rbcd_odd_roundtrip() {
        let coding = variable(Encoding::BcdRight, Encoding::BcdRight);
        let wire = encode_field(&FieldValue::ll_numeric("12345"), &coding).unwrap();
        assert_eq!(&wire[..], &[0x05, 0x01, 0x23, 0x45]);

        let (value, _) = decode_field(FieldKind::LlNumeric, &wire, &coding).unwrap();
        assert_eq!(value, FieldValue::ll_numeric("12345"));
    }

    #[test]
    fn test_lllnumeric_ascii_roundtrip() {
        let coding = variable(Encoding::Ascii, Encoding::Ascii);
        let digits = "123456789012";
        let wire = encode_field(&FieldValue::lll_numeric(digits), &coding).unwrap();
        assert_eq!(&wire[..3], b"012");

        let (value, consumed) = decode_field(FieldKind::LllNumeric, &wire, &coding).unwrap();
        assert_eq!(value, FieldValue::lll_numeric(digits));
        assert_eq!(consumed, 15);
    }

    #[test]
    fn test_lllnumeric_bcd_prefix_width() {
        // The LLL prefix packs into two bytes and unpacks at width three.
        let coding = variable(Encoding::BcdLeft, Encoding::BcdLeft);
        let digits = "1".repeat(120);
        let wire = encode_field(&FieldValue::lll_numeric(digits.clone()), &coding).unwrap();
        assert_eq!(&wire[..2], &[0x01, 0x20]);

        let (value, consumed) = decode_field(FieldKind::LllNumeric, &wire, &coding).unwrap();
        assert_eq!(value, FieldValue::lll_numeric(digits));
        assert_eq!(consumed, 2 + 60);
    }

    #[test]
    fn test_var_decode_body_short_raw() {
        let coding = variable(Encoding::Ascii, Encoding::Ascii);
        assert!(matches!(
            decode_field(FieldKind::LlVar, b"05AB", &coding),
            Err(CodecError::BadRaw {
                needed: 7,
                available: 4
            })
        ));
    }

    #[test]
    fn test_var_encode_overflowing_prefix() {
        let coding = variable(Encoding::Ascii, Encoding::Ascii);
        let long = "9".repeat(100);
        assert!(matches!(
            encode_field(&FieldValue::ll_numeric(long), &coding),
            Err(CodecError::InvalidLengthHead { .. })
        ));
    }
}
