/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Field-presence bitmaps.
//!
//! An ISO 8583 message carries an 8-byte primary bitmap, optionally followed
//! by an 8-byte secondary bitmap. Bit `i` (1-indexed) lives at byte
//! `(i-1)/8` under mask `0x80 >> ((i-1) % 8)`; bit 1 does not mark a field
//! but signals that the secondary bitmap is present.

use iron8583_core::error::MessageError;
use iron8583_core::field::FieldNumber;

/// Size of the primary bitmap in bytes.
pub const PRIMARY_BITMAP_LEN: usize = 8;

/// Size of primary plus secondary bitmaps in bytes.
pub const EXTENDED_BITMAP_LEN: usize = 16;

/// An 8- or 16-byte field-presence bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bitmap {
    bytes: [u8; EXTENDED_BITMAP_LEN],
    extended: bool,
}

impl Bitmap {
    /// Creates an empty bitmap.
    ///
    /// An extended bitmap starts with bit 1 set, since that bit is the
    /// on-wire signal for the secondary half.
    ///
    /// # Arguments
    /// * `extended` - Whether the bitmap spans 16 bytes
    #[must_use]
    pub fn new(extended: bool) -> Self {
        let mut bitmap = Self {
            bytes: [0u8; EXTENDED_BITMAP_LEN],
            extended,
        };
        if extended {
            bitmap.bytes[0] |= 0x80;
        }
        bitmap
    }

    /// Reads a bitmap from the head of `raw`, peeking the high bit of the
    /// first byte to pick the width.
    ///
    /// # Arguments
    /// * `raw` - The buffer starting at the bitmap
    ///
    /// # Returns
    /// The bitmap and the number of bytes consumed.
    ///
    /// # Errors
    /// Returns `MessageError::Truncated` when the buffer ends early.
    pub fn read(raw: &[u8]) -> Result<(Self, usize), MessageError> {
        if raw.is_empty() {
            return Err(MessageError::Truncated {
                needed: PRIMARY_BITMAP_LEN,
                available: 0,
            });
        }
        let extended = raw[0] & 0x80 == 0x80;
        let len = if extended {
            EXTENDED_BITMAP_LEN
        } else {
            PRIMARY_BITMAP_LEN
        };
        if raw.len() < len {
            return Err(MessageError::Truncated {
                needed: len,
                available: raw.len(),
            });
        }
        let mut bytes = [0u8; EXTENDED_BITMAP_LEN];
        bytes[..len].copy_from_slice(&raw[..len]);
        Ok((Self { bytes, extended }, len))
    }

    /// Returns true if this bitmap spans 16 bytes.
    #[inline]
    #[must_use]
    pub const fn extended(&self) -> bool {
        self.extended
    }

    /// Returns the highest field number this bitmap can mark.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> u8 {
        if self.extended {
            128
        } else {
            64
        }
    }

    /// Sets the bit for a field number.
    ///
    /// # Panics
    /// Panics when the number does not fit the bitmap width; the framer
    /// sizes the bitmap before marking bits, so this is a programmer error.
    pub fn set(&mut self, number: FieldNumber) {
        assert!(
            number.value() <= self.capacity(),
            "field {} does not fit a {}-byte bitmap",
            number,
            self.len()
        );
        let index = (number.value() - 1) as usize;
        self.bytes[index / 8] |= 0x80 >> (index % 8);
    }

    /// Returns true if the bit for a field number is set.
    #[must_use]
    pub fn is_set(&self, number: FieldNumber) -> bool {
        if number.value() > self.capacity() {
            return false;
        }
        let index = (number.value() - 1) as usize;
        self.bytes[index / 8] & (0x80 >> (index % 8)) != 0
    }

    /// Returns the wire bytes, 8 or 16 of them.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len()]
    }

    /// Returns the wire length in bytes.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        if self.extended {
            EXTENDED_BITMAP_LEN
        } else {
            PRIMARY_BITMAP_LEN
        }
    }

    /// Returns true if no bits are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes[..self.len()].iter().all(|&b| b == 0)
    }

    /// Returns an iterator over set field numbers in ascending order,
    /// including bit 1 when set. Callers walking data fields skip bit 1.
    pub fn set_numbers(&self) -> impl Iterator<Item = FieldNumber> + '_ {
        (1..=self.capacity()).filter_map(move |n| {
            let number = FieldNumber::new(n)?;
            self.is_set(number).then_some(number)
        })
    }
}
