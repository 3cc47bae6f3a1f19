//! Protocol command codes.
//!
//! Both transports share the same four logical operations. Write opcodes are
//! identical on the wire; the serial link carries every opcode as its ASCII
//! character (`'R'`, `'r'`, `'W'`, `'w'`).

/// The four block operations a Cimon PLC accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Read a block of 16-bit words.
    ReadWord,
    /// Read a block of bits.
    ReadBit,
    /// Write a block of 16-bit words.
    WriteWord,
    /// Write a block of bits.
    WriteBit,
}

impl Command {
    /// Returns the wire opcode for this command.
    ///
    /// The serial protocol transmits the same value as an ASCII character.
    pub(crate) fn opcode(self) -> u8 {
        match self {
            Command::ReadWord => 0x52,  // 'R'
            Command::ReadBit => 0x72,   // 'r'
            Command::WriteWord => 0x57, // 'W'
            Command::WriteBit => 0x77,  // 'w'
        }
    }
}

/// Opcode echoed by the Ethernet slave when acknowledging a write or
/// reporting a read error.
pub(crate) const ACK_OPCODE: u8 = 0x41;

/// Marker character at index 3 of a serial error response.
pub(crate) const SERIAL_ERROR_MARKER: u8 = b'E';

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcodes() {
        assert_eq!(Command::ReadWord.opcode(), 0x52);
        assert_eq!(Command::ReadBit.opcode(), 0x72);
        assert_eq!(Command::WriteWord.opcode(), 0x57);
        assert_eq!(Command::WriteBit.opcode(), 0x77);
    }

    #[test]
    fn test_opcodes_are_ascii() {
        assert_eq!(Command::ReadWord.opcode(), b'R');
        assert_eq!(Command::ReadBit.opcode(), b'r');
        assert_eq!(Command::WriteWord.opcode(), b'W');
        assert_eq!(Command::WriteBit.opcode(), b'w');
    }
}
