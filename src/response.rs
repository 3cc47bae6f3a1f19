//! Device response codes.
//!
//! Every operation outcome funnels into [`ResponseCode`]. Most values come
//! straight off the wire from the PLC; [`ResponseCode::SystemError`] and
//! [`ResponseCode::WritingError`] are also produced locally when the device
//! cannot be reached or a received frame fails validation.

/// Result codes reported by a Cimon PLC, plus the two transport-level
/// synthetic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ResponseCode {
    /// Command processed successfully.
    Success = 0,
    /// Error in system (no link with CPU). Also produced locally when the
    /// transport is unavailable or no response arrives.
    SystemError = 1,
    /// Invalid device prefix.
    InvalidDevicePrefix = 2,
    /// Invalid device address.
    InvalidDeviceAddress = 3,
    /// Error in requested data size.
    ReadDataSizeError = 4,
    /// Over 16 requested blocks.
    BlockSizeError = 5,
    /// Buffer memory reported an error in data or size.
    BufferError = 6,
    /// Receive buffer capacity exceeded.
    OverBufferCapacity = 7,
    /// Sending time exceeded.
    OverSendingTime = 8,
    /// Invalid frame header.
    InvalidHeader = 9,
    /// Checksum mismatch in the data the device received.
    ChecksumError = 10,
    /// Frame length field disagrees with the received frame size.
    FrameSizeError = 11,
    /// Error in the size of data to write.
    WriteDataSizeError = 12,
    /// Unknown bit value in bit-write data.
    UnknownBitValue = 13,
    /// Unknown command.
    UnknownCommand = 14,
    /// Device is disabled from writing. Also produced locally when a frame
    /// fails validation or a send is rejected.
    WritingError = 15,
    /// Error in CPU processing.
    CpuError = 16,
}

impl ResponseCode {
    /// Decodes a wire value into a response code.
    ///
    /// Returns `None` for values outside the documented range; callers treat
    /// that as an untrustworthy frame.
    ///
    /// # Example
    ///
    /// ```
    /// use cimon_plc::ResponseCode;
    ///
    /// assert_eq!(ResponseCode::from_wire(0), Some(ResponseCode::Success));
    /// assert_eq!(ResponseCode::from_wire(10), Some(ResponseCode::ChecksumError));
    /// assert_eq!(ResponseCode::from_wire(400), None);
    /// ```
    pub fn from_wire(value: u16) -> Option<Self> {
        Some(match value {
            0 => ResponseCode::Success,
            1 => ResponseCode::SystemError,
            2 => ResponseCode::InvalidDevicePrefix,
            3 => ResponseCode::InvalidDeviceAddress,
            4 => ResponseCode::ReadDataSizeError,
            5 => ResponseCode::BlockSizeError,
            6 => ResponseCode::BufferError,
            7 => ResponseCode::OverBufferCapacity,
            8 => ResponseCode::OverSendingTime,
            9 => ResponseCode::InvalidHeader,
            10 => ResponseCode::ChecksumError,
            11 => ResponseCode::FrameSizeError,
            12 => ResponseCode::WriteDataSizeError,
            13 => ResponseCode::UnknownBitValue,
            14 => ResponseCode::UnknownCommand,
            15 => ResponseCode::WritingError,
            16 => ResponseCode::CpuError,
            _ => return None,
        })
    }

    /// Returns whether this code confirms success.
    pub fn is_success(self) -> bool {
        self == ResponseCode::Success
    }

    /// Returns a short human-readable description of the code.
    pub fn description(self) -> &'static str {
        match self {
            ResponseCode::Success => "command processed successfully",
            ResponseCode::SystemError => "system error (no link with CPU)",
            ResponseCode::InvalidDevicePrefix => "invalid device prefix",
            ResponseCode::InvalidDeviceAddress => "invalid device address",
            ResponseCode::ReadDataSizeError => "error in requested data size",
            ResponseCode::BlockSizeError => "over 16 requested blocks",
            ResponseCode::BufferError => "buffer memory error in data or size",
            ResponseCode::OverBufferCapacity => "receive buffer capacity exceeded",
            ResponseCode::OverSendingTime => "sending time exceeded",
            ResponseCode::InvalidHeader => "invalid frame header",
            ResponseCode::ChecksumError => "checksum error in received data",
            ResponseCode::FrameSizeError => "frame length information error",
            ResponseCode::WriteDataSizeError => "error in write data size",
            ResponseCode::UnknownBitValue => "unknown bit value in write data",
            ResponseCode::UnknownCommand => "unknown command",
            ResponseCode::WritingError => "device disabled from writing or frame invalid",
            ResponseCode::CpuError => "error in CPU processing",
        }
    }
}

impl std::fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
