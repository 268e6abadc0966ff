/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Length-prefix codec for variable fields.
//!
//! Variable fields carry a decimal content length ahead of the body: two
//! positions for LL kinds, three for LLL kinds. In ASCII the prefix occupies
//! one byte per position; in either BCD variant the positions are
//! right-packed into one byte (LL) or two bytes (LLL).

use crate::bcd;
use iron8583_core::encoding::Encoding;
use iron8583_core::error::CodecError;
use smallvec::SmallVec;

/// Width of a length prefix, in decimal positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthWidth {
    /// Two positions, content length 0..=99.
    Ll,
    /// Three positions, content length 0..=999.
    Lll,
}

impl LengthWidth {
    /// Returns the number of decimal positions in the prefix.
    #[inline]
    #[must_use]
    pub const fn digits(self) -> usize {
        match self {
            Self::Ll => 2,
            Self::Lll => 3,
        }
    }

    /// Returns the number of bytes a packed-BCD prefix occupies.
    #[inline]
    #[must_use]
    pub const fn packed_len(self) -> usize {
        match self {
            Self::Ll => 1,
            Self::Lll => 2,
        }
    }

    /// Returns the on-wire prefix length for the given encoding.
    #[inline]
    #[must_use]
    pub const fn encoded_len(self, encoding: Encoding) -> usize {
        if encoding.is_bcd() {
            self.packed_len()
        } else {
            self.digits()
        }
    }
}

/// Encodes a content length into its prefix bytes.
///
/// # Arguments
/// * `count` - The content length (bytes for VAR kinds, digits for numeric)
/// * `width` - LL or LLL
/// * `encoding` - The prefix encoding
///
/// # Errors
/// Returns `CodecError::InvalidLengthHead` when the decimal representation
/// of `count` does not fit the prefix cell.
pub fn encode_prefix(
    count: usize,
    width: LengthWidth,
    encoding: Encoding,
) -> Result<SmallVec<[u8; 3]>, CodecError> {
    let mut itoa_buf = itoa::Buffer::new();
    let digits = itoa_buf.format(count).as_bytes();
    if digits.len() > width.digits() {
        return Err(CodecError::InvalidLengthHead {
            digits: digits.len(),
            width: width.digits(),
        });
    }

    let mut cell: SmallVec<[u8; 3]> = SmallVec::new();
    cell.extend(std::iter::repeat(b'0').take(width.digits() - digits.len()));
    cell.extend_from_slice(digits);

    if encoding.is_bcd() {
        Ok(SmallVec::from_slice(&bcd::pack_right(&cell)))
    } else {
        Ok(cell)
    }
}

/// Decodes a length prefix from the head of `raw`.
///
/// BCD prefixes unpack right-aligned at the logical width of the cell: two
/// positions for LL, three for LLL.
///
/// # Arguments
/// * `raw` - The buffer starting at the prefix
/// * `width` - LL or LLL
/// * `encoding` - The prefix encoding
///
/// # Returns
/// The content length and the number of prefix bytes consumed.
///
/// # Errors
/// Returns `CodecError::BadRaw` when the buffer is shorter than the prefix
/// and `CodecError::ParseLengthFailed` when the prefix is not decimal.
pub fn decode_prefix(
    raw: &[u8],
    width: LengthWidth,
    encoding: Encoding,
) -> Result<(usize, usize), CodecError> {
    let consumed = width.encoded_len(encoding);
    if raw.len() < consumed {
        return Err(CodecError::BadRaw {
            needed: consumed,
            available: raw.len(),
        });
    }

    let digits = if encoding.is_bcd() {
        bcd::unpack_right(&raw[..consumed], width.digits())
    } else {
        raw[..consumed].to_vec()
    };

    let count = parse_decimal(&digits).ok_or_else(|| CodecError::ParseLengthFailed {
        found: String::from_utf8_lossy(&digits).into_owned(),
    })?;
    Ok((count, consumed))
}

/// Parses an unsigned decimal from ASCII bytes.
///
/// # Returns
/// The parsed value, or `None` when a byte is not a decimal digit.
#[inline]
fn parse_decimal(bytes: &[u8]) -> Option<usize> {
    if bytes.is_empty() {
        return None;
    }
    let mut result: usize = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        result = result.checked_mul(10)?.checked_add((b - b'0') as usize)?;
    }
    Some(result)
}
