//! Memory address validation and padding.
//!
//! Cimon frames carry the start address as exactly 6 hexadecimal characters.
//! Callers may pass 1 to 6 characters; [`Address`] validates the format and
//! left-pads with zeros. Word-oriented operations additionally require the
//! address to be word-aligned, which on the wire means the last character
//! must be `'0'`.
//!
//! # Example
//!
//! ```
//! use cimon_plc::Address;
//!
//! let addr = Address::word("F0").unwrap();
//! assert_eq!(addr.as_str(), "0000F0");
//!
//! let addr = Address::bit("A1").unwrap();
//! assert_eq!(addr.as_str(), "0000A1");
//!
//! assert!(Address::word("F1").is_err()); // not word-aligned
//! assert!(Address::bit("000x5").is_err()); // not hex
//! ```

use crate::error::{PlcError, Result};

/// Number of address characters carried on the wire.
pub const ADDRESS_LEN: usize = 6;

/// A validated, zero-padded 6-character hexadecimal PLC address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// Creates a word-aligned address.
    ///
    /// Accepts 1-6 hex characters whose last character is `'0'` (word
    /// devices address in units of 16 bits, so the low nibble is always
    /// zero) and pads to 6 characters.
    ///
    /// # Errors
    ///
    /// Returns [`PlcError::InvalidAddress`] if the input is empty, longer
    /// than 6 characters, contains non-hex characters, or does not end in
    /// `'0'`.
    pub fn word(address: &str) -> Result<Self> {
        let padded = Self::validate(address)?;
        if padded[ADDRESS_LEN - 1] != b'0' {
            return Err(PlcError::invalid_address(
                address,
                "word addresses must end in '0'",
            ));
        }
        Ok(Self(padded))
    }

    /// Creates a bit address.
    ///
    /// Accepts any 1-6 hex characters and pads to 6.
    ///
    /// # Errors
    ///
    /// Returns [`PlcError::InvalidAddress`] if the input is empty, longer
    /// than 6 characters, or contains non-hex characters.
    pub fn bit(address: &str) -> Result<Self> {
        Ok(Self(Self::validate(address)?))
    }

    fn validate(address: &str) -> Result<[u8; ADDRESS_LEN]> {
        if address.is_empty() || address.len() > ADDRESS_LEN {
            return Err(PlcError::invalid_address(
                address,
                "must be 1 to 6 characters",
            ));
        }
        if !address.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(PlcError::invalid_address(
                address,
                "contains non-hex characters",
            ));
        }

        let mut padded = [b'0'; ADDRESS_LEN];
        padded[ADDRESS_LEN - address.len()..].copy_from_slice(address.as_bytes());
        Ok(padded)
    }

    /// Returns the padded address as ASCII bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Returns the padded address as a string slice.
    pub fn as_str(&self) -> &str {
        // Validated to be ASCII hex at construction.
        std::str::from_utf8(&self.0).unwrap_or("000000")
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
