//! ASCII frame codec for the serial protocol.
//!
//! # Request Frame Layout
//!
//! | Chars | Field | Notes |
//! |-------|-------|-------|
//! | 0 | ENQ | 0x05 |
//! | 1-2 | Station number | fixed `"00"` |
//! | 3 | Command | the opcode as an ASCII character |
//! | 4-5 | Length | data-section size in chars, 2 hex chars |
//! | 6 | Region tag | `'M'`, `'X'`, ... |
//! | 7 | Filler | `'0'` |
//! | 8-13 | Address | 6 hex chars |
//! | 14-15 | Count | 2 hex chars |
//! | 16.. | Data | write payloads only |
//! | tail | BCC + EOT | byte sum from index 3, mod 256, 2 hex chars; 0x04 |
//!
//! Responses are framed by STX (0x02) and ETX (0x03). An `'E'` at index 3
//! marks an error frame whose code sits at chars 6-7; write acknowledgments
//! carry their result code at chars 4-5.

use crate::address::Address;
use crate::checksum::{bcc, from_dual_char, to_dual_char, to_quad_char};
use crate::codec::ProtocolCodec;
use crate::command::{Command, SERIAL_ERROR_MARKER};
use crate::error::{PlcError, Result};
use crate::memory::MemoryRegion;
use crate::response::ResponseCode;

/// Enquiry control character opening every request.
pub const ENQ: u8 = 0x05;

/// End-of-transmission control character closing every request.
pub const EOT: u8 = 0x04;

/// Start-of-text control character opening every response.
pub const STX: u8 = 0x02;

/// End-of-text control character closing every response.
pub const ETX: u8 = 0x03;

/// Station number carried in every request. Multi-drop addressing is not
/// supported; the station is fixed.
const STATION: &[u8; 2] = b"00";

/// Data-section length of a read request: 8 address chars plus the
/// 2-char count, rendered `"0A"`.
const READ_DATA_LEN: u8 = 10;

/// Offset of the first payload char in a read response.
const DATA_START: usize = 6;

/// Shortest response that still carries an error code at chars 6-7 and a
/// trailing ETX.
const MIN_RESPONSE_LEN: usize = 8;

/// Codec for the serial protocol. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialCodec;

impl SerialCodec {
    /// Appends ENQ, the station number, the command character, and the
    /// 2-char data-section length.
    fn push_header(frame: &mut Vec<u8>, command: Command, data_len: u8) {
        frame.push(ENQ);
        frame.extend_from_slice(STATION);
        frame.push(command.opcode());
        frame.extend_from_slice(&to_dual_char(data_len));
    }

    /// Appends the region tag, the filler, and the 6 address characters.
    fn push_address(frame: &mut Vec<u8>, region: MemoryRegion, address: &Address) {
        frame.push(region.tag() as u8);
        frame.push(b'0');
        frame.extend_from_slice(address.as_bytes());
    }

    /// Appends the BCC over everything pushed so far, then EOT.
    fn push_trailer(frame: &mut Vec<u8>) {
        let check = bcc(frame);
        frame.extend_from_slice(&check);
        frame.push(EOT);
    }

    fn encode_read(
        command: Command,
        region: MemoryRegion,
        address: &Address,
        length: u16,
    ) -> Vec<u8> {
        let mut frame = Vec::with_capacity(19);
        Self::push_header(&mut frame, command, READ_DATA_LEN);
        Self::push_address(&mut frame, region, address);
        frame.extend_from_slice(&to_dual_char(length as u8));
        Self::push_trailer(&mut frame);
        frame
    }

    /// Checks STX/ETX framing and the echoed command character.
    fn is_valid_response(frame: &[u8], command: Command) -> bool {
        frame.len() >= MIN_RESPONSE_LEN
            && frame[0] == STX
            && frame[frame.len() - 1] == ETX
            && frame[3] == command.opcode()
    }

    /// Parses the 2-char hex code at the given offset into a response code.
    fn code_at(frame: &[u8], offset: usize) -> ResponseCode {
        from_dual_char(frame[offset], frame[offset + 1])
            .and_then(|value| ResponseCode::from_wire(u16::from(value)))
            .unwrap_or(ResponseCode::WritingError)
    }

    /// Returns the declared payload (chars 6 onward, `declared` of them) if
    /// the frame is long enough to hold it plus the BCC and ETX trailer.
    fn payload(frame: &[u8], declared: usize) -> Option<&[u8]> {
        if DATA_START + declared + 3 > frame.len() {
            return None;
        }
        Some(&frame[DATA_START..DATA_START + declared])
    }
}

impl ProtocolCodec for SerialCodec {
    fn read_word_limit(&self) -> u16 {
        63
    }

    fn read_bit_limit(&self) -> u16 {
        126
    }

    fn write_word_limit(&self) -> usize {
        63
    }

    fn write_bit_limit(&self) -> usize {
        126
    }

    fn validate_bit_values(&self, data: &[u8]) -> Result<()> {
        if data.iter().any(|&bit| bit > 1) {
            return Err(PlcError::invalid_parameter(
                "data",
                "bit values must be 0 or 1",
            ));
        }
        Ok(())
    }

    fn encode_read_word(
        &self,
        _frame_no: u8,
        region: MemoryRegion,
        address: &Address,
        length: u16,
    ) -> Vec<u8> {
        Self::encode_read(Command::ReadWord, region, address, length)
    }

    fn encode_read_bit(
        &self,
        _frame_no: u8,
        region: MemoryRegion,
        address: &Address,
        length: u16,
    ) -> Vec<u8> {
        Self::encode_read(Command::ReadBit, region, address, length)
    }

    fn encode_write_word(
        &self,
        _frame_no: u8,
        region: MemoryRegion,
        address: &Address,
        data: &[u16],
    ) -> Vec<u8> {
        let mut frame = Vec::with_capacity(19 + data.len() * 4);
        let data_len = (10 + data.len() * 4) as u8;
        Self::push_header(&mut frame, Command::WriteWord, data_len);
        Self::push_address(&mut frame, region, address);
        frame.extend_from_slice(&to_dual_char(data.len() as u8));
        for word in data {
            frame.extend_from_slice(&to_quad_char(*word));
        }
        Self::push_trailer(&mut frame);
        frame
    }

    fn encode_write_bit(
        &self,
        _frame_no: u8,
        region: MemoryRegion,
        address: &Address,
        data: &[u8],
    ) -> Vec<u8> {
        let mut frame = Vec::with_capacity(19 + data.len());
        let data_len = (10 + data.len()) as u8;
        Self::push_header(&mut frame, Command::WriteBit, data_len);
        Self::push_address(&mut frame, region, address);
        frame.extend_from_slice(&to_dual_char(data.len() as u8));
        // Bit values travel as raw 0/1 bytes, not ASCII digits.
        frame.extend_from_slice(data);
        Self::push_trailer(&mut frame);
        frame
    }

    fn decode_read_word(&self, frame: &[u8], _frame_no: u8) -> (ResponseCode, Option<Vec<u16>>) {
        if frame.len() < MIN_RESPONSE_LEN {
            return (ResponseCode::WritingError, None);
        }

        if frame[3] == SERIAL_ERROR_MARKER {
            return (Self::code_at(frame, 6), None);
        }

        if !Self::is_valid_response(frame, Command::ReadWord) {
            return (ResponseCode::WritingError, None);
        }

        let Some(declared) = from_dual_char(frame[4], frame[5]) else {
            return (ResponseCode::WritingError, None);
        };
        let Some(payload) = Self::payload(frame, usize::from(declared)) else {
            return (ResponseCode::WritingError, None);
        };

        // One word per 4 hex chars: two hex-byte halves, big-endian.
        let mut words = Vec::with_capacity(payload.len() / 4);
        for quad in payload.chunks_exact(4) {
            let (Some(high), Some(low)) = (
                from_dual_char(quad[0], quad[1]),
                from_dual_char(quad[2], quad[3]),
            ) else {
                return (ResponseCode::WritingError, None);
            };
            words.push(u16::from_be_bytes([high, low]));
        }
        (ResponseCode::Success, Some(words))
    }

    fn decode_read_bit(&self, frame: &[u8], _frame_no: u8) -> (ResponseCode, Option<Vec<u8>>) {
        if frame.len() < MIN_RESPONSE_LEN {
            return (ResponseCode::WritingError, None);
        }

        if frame[3] == SERIAL_ERROR_MARKER {
            return (Self::code_at(frame, 6), None);
        }

        if !Self::is_valid_response(frame, Command::ReadBit) {
            return (ResponseCode::WritingError, None);
        }

        let Some(declared) = from_dual_char(frame[4], frame[5]) else {
            return (ResponseCode::WritingError, None);
        };
        let Some(payload) = Self::payload(frame, usize::from(declared)) else {
            return (ResponseCode::WritingError, None);
        };

        // One value per 2 hex chars.
        let mut bits = Vec::with_capacity(payload.len() / 2);
        for pair in payload.chunks_exact(2) {
            let Some(value) = from_dual_char(pair[0], pair[1]) else {
                return (ResponseCode::WritingError, None);
            };
            bits.push(value);
        }
        (ResponseCode::Success, Some(bits))
    }

    fn decode_write(&self, frame: &[u8], _frame_no: u8, command: Command) -> ResponseCode {
        if frame.len() < MIN_RESPONSE_LEN {
            return ResponseCode::WritingError;
        }

        if frame[3] == SERIAL_ERROR_MARKER {
            return Self::code_at(frame, 6);
        }

        if !Self::is_valid_response(frame, command) {
            return ResponseCode::WritingError;
        }

        // Success acknowledgments carry the result code at chars 4-5.
        Self::code_at(frame, 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_address(s: &str) -> Address {
        Address::word(s).unwrap()
    }

    fn bit_address(s: &str) -> Address {
        Address::bit(s).unwrap()
    }

    /// Builds a success response the way the slave does: STX, station,
    /// command echo, payload, BCC, ETX.
    fn response(command: Command, body: &[u8]) -> Vec<u8> {
        let mut frame = vec![STX, b'0', b'0', command.opcode()];
        frame.extend_from_slice(body);
        let check = bcc(&frame);
        frame.extend_from_slice(&check);
        frame.push(ETX);
        frame
    }

    fn error_response(code: u8) -> Vec<u8> {
        let mut frame = vec![STX, b'0', b'0', b'E', b'0', b'2'];
        frame.extend_from_slice(&to_dual_char(code));
        let check = bcc(&frame);
        frame.extend_from_slice(&check);
        frame.push(ETX);
        frame
    }

    #[test]
    fn test_encode_read_word_layout() {
        let frame =
            SerialCodec.encode_read_word(0, MemoryRegion::D, &word_address("000F0"), 10);

        assert_eq!(frame[0], ENQ);
        assert_eq!(&frame[1..3], b"00");
        assert_eq!(frame[3], b'R');
        assert_eq!(&frame[4..6], b"0A");
        assert_eq!(frame[6], b'D');
        assert_eq!(frame[7], b'0');
        assert_eq!(&frame[8..14], b"0000F0");
        assert_eq!(&frame[14..16], b"0A");
        assert_eq!(*frame.last().unwrap(), EOT);
        assert_eq!(frame.len(), 19);

        // Trailing BCC matches a recomputation over chars 3..len-3.
        let check = bcc(&frame[..frame.len() - 3]);
        assert_eq!(&frame[frame.len() - 3..frame.len() - 1], &check);
    }

    #[test]
    fn test_encode_read_word_golden_frame() {
        let frame =
            SerialCodec.encode_read_word(0, MemoryRegion::D, &word_address("000F0"), 10);
        let expected = hex::decode("05303052304144303030303046303041444504").unwrap();
        assert_eq!(frame, expected);
    }

    #[test]
    fn test_encode_read_bit_uses_bit_opcode() {
        let frame = SerialCodec.encode_read_bit(0, MemoryRegion::X, &bit_address("A1"), 126);
        assert_eq!(frame[3], b'r');
        assert_eq!(&frame[8..14], b"0000A1");
        assert_eq!(&frame[14..16], b"7E");
    }

    #[test]
    fn test_encode_write_word_layout() {
        let frame = SerialCodec.encode_write_word(
            0,
            MemoryRegion::M,
            &word_address("0F010"),
            &[0x1234, 0x00A1],
        );

        assert_eq!(frame[3], b'W');
        // Data-section length: 10 + 2 words * 4 = 18 = 0x12.
        assert_eq!(&frame[4..6], b"12");
        assert_eq!(frame[6], b'M');
        assert_eq!(&frame[8..14], b"00F010");
        assert_eq!(&frame[14..16], b"02");
        assert_eq!(&frame[16..24], b"123400A1");
        assert_eq!(*frame.last().unwrap(), EOT);
    }

    #[test]
    fn test_encode_write_word_length_field_truncates_to_byte() {
        // 63 words: data-section length 10 + 63 * 4 = 262, carried mod 256
        // on the wire, matching the device's byte-wide length field.
        let frame = SerialCodec.encode_write_word(
            0,
            MemoryRegion::D,
            &word_address("000F0"),
            &[0u16; 63],
        );

        assert_eq!(&frame[4..6], b"06");
        assert_eq!(frame.len(), 16 + 63 * 4 + 3);
        assert_eq!(*frame.last().unwrap(), EOT);
    }

    #[test]
    fn test_encode_write_bit_raw_values() {
        let frame = SerialCodec.encode_write_bit(
            0,
            MemoryRegion::Y,
            &bit_address("0000D1"),
            &[1, 0, 1, 1],
        );

        assert_eq!(frame[3], b'w');
        // Data-section length: 10 + 4 bits = 14 = 0x0E.
        assert_eq!(&frame[4..6], b"0E");
        assert_eq!(&frame[14..16], b"04");
        assert_eq!(&frame[16..20], &[1, 0, 1, 1]);
    }

    #[test]
    fn test_decode_read_word_success() {
        // 3 words, 12 payload chars.
        let mut body = to_dual_char(12).to_vec();
        body.extend_from_slice(b"00010203FFFF");
        let frame = response(Command::ReadWord, &body);

        let (code, data) = SerialCodec.decode_read_word(&frame, 0);
        assert_eq!(code, ResponseCode::Success);
        assert_eq!(data.unwrap(), vec![0x0001, 0x0203, 0xFFFF]);
    }

    #[test]
    fn test_decode_read_word_device_error() {
        let frame = error_response(4);
        let (code, data) = SerialCodec.decode_read_word(&frame, 0);
        assert_eq!(code, ResponseCode::ReadDataSizeError);
        assert!(data.is_none());
    }

    #[test]
    fn test_decode_read_word_opcode_mismatch() {
        let mut body = to_dual_char(4).to_vec();
        body.extend_from_slice(b"0001");
        let frame = response(Command::ReadBit, &body);
        let (code, data) = SerialCodec.decode_read_word(&frame, 0);
        assert_eq!(code, ResponseCode::WritingError);
        assert!(data.is_none());
    }

    #[test]
    fn test_decode_read_word_missing_etx() {
        let mut body = to_dual_char(4).to_vec();
        body.extend_from_slice(b"0001");
        let mut frame = response(Command::ReadWord, &body);
        frame.pop();
        let (code, _) = SerialCodec.decode_read_word(&frame, 0);
        assert_eq!(code, ResponseCode::WritingError);
    }

    #[test]
    fn test_decode_read_word_bad_hex_payload() {
        let mut body = to_dual_char(4).to_vec();
        body.extend_from_slice(b"00x1");
        let frame = response(Command::ReadWord, &body);
        let (code, _) = SerialCodec.decode_read_word(&frame, 0);
        assert_eq!(code, ResponseCode::WritingError);
    }

    #[test]
    fn test_decode_read_word_declared_length_too_long() {
        let mut body = to_dual_char(200).to_vec();
        body.extend_from_slice(b"0001");
        let frame = response(Command::ReadWord, &body);
        let (code, _) = SerialCodec.decode_read_word(&frame, 0);
        assert_eq!(code, ResponseCode::WritingError);
    }

    #[test]
    fn test_decode_read_bit_success() {
        let mut body = to_dual_char(8).to_vec();
        body.extend_from_slice(b"01000101");
        let frame = response(Command::ReadBit, &body);

        let (code, data) = SerialCodec.decode_read_bit(&frame, 0);
        assert_eq!(code, ResponseCode::Success);
        assert_eq!(data.unwrap(), vec![1, 0, 1, 1]);
    }

    #[test]
    fn test_decode_write_success() {
        let frame = response(Command::WriteBit, b"00");
        let code = SerialCodec.decode_write(&frame, 0, Command::WriteBit);
        assert_eq!(code, ResponseCode::Success);
    }

    #[test]
    fn test_decode_write_device_error() {
        let frame = error_response(15);
        let code = SerialCodec.decode_write(&frame, 0, Command::WriteWord);
        assert_eq!(code, ResponseCode::WritingError);

        let frame = error_response(16);
        let code = SerialCodec.decode_write(&frame, 0, Command::WriteWord);
        assert_eq!(code, ResponseCode::CpuError);
    }

    #[test]
    fn test_decode_write_truncated() {
        let frame = response(Command::WriteWord, b"00");
        for cut in [0, 2, 5] {
            let code = SerialCodec.decode_write(&frame[..cut], 0, Command::WriteWord);
            assert_eq!(code, ResponseCode::WritingError);
        }
    }

    #[test]
    fn test_validate_bit_values() {
        assert!(SerialCodec.validate_bit_values(&[0, 1, 1, 0]).is_ok());
        assert!(SerialCodec.validate_bit_values(&[0, 2]).is_err());
    }
}
