//! Frame integrity codes and hex field encoding.
//!
//! The Ethernet protocol closes every frame with a 2-byte binary checksum:
//! the byte sum of the whole frame, modulo 65536, big-endian. The serial
//! protocol uses a block check character (BCC): the byte sum of everything
//! after the 3-byte header (ENQ plus the 2-digit station number), modulo 256,
//! rendered as two uppercase hex characters.
//!
//! The field encoders mirror the fixed widths of the wire formats: 2-byte
//! big-endian binary, 2-char hex, and 4-char hex.

/// Computes the Ethernet frame checksum: byte sum mod 65536 as a big-endian
/// pair.
///
/// # Example
///
/// ```
/// use cimon_plc::checksum::frame_checksum;
///
/// assert_eq!(frame_checksum(&[0x01, 0x02, 0x03]), [0x00, 0x06]);
/// assert_eq!(frame_checksum(&[0xFF; 257]), [0xFF, 0xFF]);
/// ```
pub fn frame_checksum(frame: &[u8]) -> [u8; 2] {
    let sum: u32 = frame.iter().map(|&b| u32::from(b)).sum();
    to_dual_byte((sum & 0xFFFF) as u16)
}

/// Number of leading serial frame bytes excluded from the BCC (ENQ plus the
/// 2-character station number).
pub const BCC_SKIP: usize = 3;

/// Computes the serial block check character over a frame.
///
/// Sums the byte values of everything from index 3 onward, takes the
/// remainder mod 256, and encodes it as two uppercase hex characters.
/// Frames shorter than the skipped header yield `"00"`.
///
/// # Example
///
/// ```
/// use cimon_plc::checksum::bcc;
///
/// assert_eq!(bcc(b"X00R0AD000000101"), [b'B', b'9']);
/// ```
pub fn bcc(frame: &[u8]) -> [u8; 2] {
    let sum: u32 = frame
        .iter()
        .skip(BCC_SKIP)
        .map(|&b| u32::from(b))
        .sum();
    to_dual_char((sum % 256) as u8)
}

/// Encodes a value as 2 big-endian bytes.
pub fn to_dual_byte(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

/// Decodes 2 big-endian bytes into a value.
pub fn from_dual_byte(high: u8, low: u8) -> u16 {
    u16::from_be_bytes([high, low])
}

/// Encodes a byte as 2 uppercase hex characters.
///
/// # Example
///
/// ```
/// use cimon_plc::checksum::to_dual_char;
///
/// assert_eq!(to_dual_char(0xA1), [b'A', b'1']);
/// assert_eq!(to_dual_char(188), [b'B', b'C']);
/// ```
pub fn to_dual_char(value: u8) -> [u8; 2] {
    [HEX[(value >> 4) as usize], HEX[(value & 0x0F) as usize]]
}

/// Encodes a word as 4 uppercase hex characters.
///
/// # Example
///
/// ```
/// use cimon_plc::checksum::to_quad_char;
///
/// assert_eq!(to_quad_char(0x00A1), [b'0', b'0', b'A', b'1']);
/// assert_eq!(to_quad_char(18841), [b'4', b'9', b'9', b'9']);
/// ```
pub fn to_quad_char(value: u16) -> [u8; 4] {
    let [high, low] = value.to_be_bytes();
    let [h1, h2] = to_dual_char(high);
    let [l1, l2] = to_dual_char(low);
    [h1, h2, l1, l2]
}

/// Decodes 2 hex characters into a byte. Returns `None` on non-hex input.
pub fn from_dual_char(high: u8, low: u8) -> Option<u8> {
    let h = (high as char).to_digit(16)?;
    let l = (low as char).to_digit(16)?;
    Some(((h << 4) | l) as u8)
}

const HEX: &[u8; 16] = b"0123456789ABCDEF";
