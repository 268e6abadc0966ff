/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Wire encodings for ISO 8583 field bodies and length prefixes.
//!
//! ISO 8583 deployments mix three encodings, often within a single message:
//! plain ASCII, left-aligned packed BCD, and right-aligned packed BCD. The
//! alignment matters only for odd-length values: left-aligned BCD pads the
//! trailing low nibble, right-aligned BCD pads the leading high nibble.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A wire encoding for a field body or a length prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// One byte per character, as-is.
    Ascii,
    /// Packed BCD, high nibble first; odd-length input pads the trailing low
    /// nibble with `0` (`"954"` packs to `0x95 0x40`).
    BcdLeft,
    /// Packed BCD, low nibble last; odd-length input pads the leading high
    /// nibble with `0` (`"954"` packs to `0x09 0x54`).
    BcdRight,
}

impl Encoding {
    /// Returns true for either packed-BCD variant.
    #[inline]
    #[must_use]
    pub const fn is_bcd(self) -> bool {
        matches!(self, Self::BcdLeft | Self::BcdRight)
    }

    /// Parses a declaration token into an encoding.
    ///
    /// Accepted tokens are `"ascii"`, `"bcd"` and its alias `"lbcd"` for
    /// left-aligned BCD, and `"rbcd"` for right-aligned BCD.
    ///
    /// # Returns
    /// The encoding, or `None` for an unknown token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "ascii" => Some(Self::Ascii),
            "bcd" | "lbcd" => Some(Self::BcdLeft),
            "rbcd" => Some(Self::BcdRight),
            _ => None,
        }
    }

    /// Returns the canonical declaration token for this encoding.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::BcdLeft => "bcd",
            Self::BcdRight => "rbcd",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token() {
        assert_eq!(Encoding::from_token("ascii"), Some(Encoding::Ascii));
        assert_eq!(Encoding::from_token("bcd"), Some(Encoding::BcdLeft));
        assert_eq!(Encoding::from_token("lbcd"), Some(Encoding::BcdLeft));
        assert_eq!(Encoding::from_token("rbcd"), Some(Encoding::BcdRight));
        assert_eq!(Encoding::from_token("ebcdic"), None);
        assert_eq!(Encoding::from_token(""), None);
    }

    #[test]
    fn test_is_bcd() {
        assert!(!Encoding::Ascii.is_bcd());
        assert!(Encoding::BcdLeft.is_bcd());
        assert!(Encoding::BcdRight.is_bcd());
    }

    #[test]
    fn test_display_matches_token() {
        assert_eq!(Encoding::Ascii.to_string(), "ascii");
        assert_eq!(Encoding::BcdLeft.to_string(), "bcd");
        assert_eq!(Encoding::BcdRight.to_string(), "rbcd");
    }
}
