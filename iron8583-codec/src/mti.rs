/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! MTI wire codec.
//!
//! The Message Type Indicator is four decimal digits, carried either as four
//! ASCII bytes or packed into exactly two BCD bytes.

use crate::bcd;
use iron8583_core::error::MessageError;
use iron8583_core::message::{Mti, MtiEncoding};
use smallvec::SmallVec;

/// Encodes an MTI into its wire bytes.
///
/// # Arguments
/// * `mti` - The validated MTI
/// * `encoding` - ASCII (4 bytes) or BCD (2 bytes)
#[must_use]
pub fn encode_mti(mti: Mti, encoding: MtiEncoding) -> SmallVec<[u8; 4]> {
    match encoding {
        MtiEncoding::Ascii => SmallVec::from_slice(mti.as_bytes()),
        MtiEncoding::Bcd => SmallVec::from_slice(&bcd::pack(mti.as_bytes())),
    }
}

/// Decodes an MTI from the head of `raw`.
///
/// # Arguments
/// * `raw` - The buffer starting at the MTI
/// * `encoding` - ASCII or BCD
///
/// # Returns
/// The MTI and the number of bytes consumed.
///
/// # Errors
/// Returns `MessageError::Truncated` when the buffer is too short and
/// `MessageError::InvalidMti` when the bytes are not four decimal digits.
pub fn decode_mti(raw: &[u8], encoding: MtiEncoding) -> Result<(Mti, usize), MessageError> {
    let consumed = encoding.encoded_len();
    if raw.len() < consumed {
        return Err(MessageError::Truncated {
            needed: consumed,
            available: raw.len(),
        });
    }
    let digits = match encoding {
        MtiEncoding::Ascii => raw[..consumed].to_vec(),
        MtiEncoding::Bcd => bcd::unpack(&raw[..consumed]),
    };
    let text = std::str::from_utf8(&digits).map_err(|_| MessageError::InvalidMti {
        reason: "MTI must contain only digits",
    })?;
    Ok((Mti::new(text)?, consumed))
}
