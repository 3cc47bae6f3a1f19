//! Error types for the Cimon protocol client.
//!
//! Only caller mistakes surface as [`PlcError`]: bad addresses, out-of-range
//! lengths or data values, and out-of-range timeouts. They are raised before
//! any frame is built or any byte is sent. Everything the device or the link
//! reports comes back as a [`ResponseCode`](crate::ResponseCode) instead.

use thiserror::Error;

/// Result type alias for Cimon PLC operations.
pub type Result<T> = std::result::Result<T, PlcError>;

/// Validation errors raised before any I/O occurs.
#[derive(Debug, Error)]
pub enum PlcError {
    /// A parameter was out of range or otherwise unusable.
    #[error("invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: String,
        /// Description of why it was rejected.
        reason: String,
    },

    /// A memory address string did not match the required format.
    #[error("invalid address '{address}': {reason}")]
    InvalidAddress {
        /// The address as supplied by the caller.
        address: String,
        /// Description of the format violation.
        reason: String,
    },
}

impl PlcError {
    /// Creates a new `InvalidParameter` error.
    ///
    /// # Example
    ///
    /// ```
    /// use cimon_plc::PlcError;
    ///
    /// let err = PlcError::invalid_parameter("length", "must be between 1 and 512");
    /// ```
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new `InvalidAddress` error.
    ///
    /// # Example
    ///
    /// ```
    /// use cimon_plc::PlcError;
    ///
    /// let err = PlcError::invalid_address("000x5", "contains non-hex characters");
    /// ```
    pub fn invalid_address(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.into(),
            reason: reason.into(),
        }
    }
}
