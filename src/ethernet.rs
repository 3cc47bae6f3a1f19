//! Binary frame codec for the Ethernet (TCP) protocol.
//!
//! # Request Frame Layout
//!
//! | Bytes | Field | Notes |
//! |-------|-------|-------|
//! | 0-8 | Identifier | ASCII `"KDT_PLC_M"` |
//! | 9 | Frame number | 0-127, echoed +128 in the response |
//! | 10 | Command | 0x52/0x72 read, 0x57/0x77 write |
//! | 11 | Reserved | 0x00 |
//! | 12.. | Length | 1 byte (=10) for reads, 2 big-endian bytes for writes |
//! | .. | Memory address | region byte, 0x00, 6 ASCII hex chars |
//! | .. | Count | 2 big-endian bytes |
//! | .. | Data | write payloads only |
//! | tail | Checksum | byte sum of the frame so far, mod 65536, big-endian |
//!
//! Responses open with `"KDT_PLC_S"`. A response whose command byte is 0x41
//! carries a result code at bytes 14-15 instead of data; this is how the
//! slave acknowledges every write and reports read failures.

use crate::address::Address;
use crate::checksum::{frame_checksum, from_dual_byte, to_dual_byte};
use crate::codec::ProtocolCodec;
use crate::command::{Command, ACK_OPCODE};
use crate::error::Result;
use crate::memory::MemoryRegion;
use crate::response::ResponseCode;

/// Identifier opening every master (request) frame.
pub const MASTER_ID: &[u8; 9] = b"KDT_PLC_M";

/// Identifier opening every slave (response) frame.
pub const SLAVE_ID: &[u8; 9] = b"KDT_PLC_S";

/// Fixed data-section length of a read request: 8 address bytes plus the
/// 2-byte read count.
const READ_DATA_LEN: u8 = 10;

/// Offset of the first payload byte in a read response.
const DATA_START: usize = 23;

/// Length of the address echo preceding read-response payloads.
const ADDRESS_ECHO_LEN: u16 = 9;

/// Shortest response that still carries a result code at bytes 14-15.
const MIN_RESPONSE_LEN: usize = 16;

/// Codec for the Ethernet protocol. Stateless; the connector owns the frame
/// sequence counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct EthernetCodec;

impl EthernetCodec {
    /// Appends the common header: identifier, frame number, command, and the
    /// reserved byte.
    fn push_header(frame: &mut Vec<u8>, frame_no: u8, command: Command) {
        frame.extend_from_slice(MASTER_ID);
        frame.push(frame_no);
        frame.push(command.opcode());
        frame.push(0);
    }

    /// Appends the memory address block: region code, reserved byte, and the
    /// 6 ASCII address characters.
    fn push_address(frame: &mut Vec<u8>, region: MemoryRegion, address: &Address) {
        frame.push(region.wire_code());
        frame.push(0);
        frame.extend_from_slice(address.as_bytes());
    }

    /// Appends the trailing checksum over everything pushed so far.
    fn push_checksum(frame: &mut Vec<u8>) {
        let checksum = frame_checksum(frame);
        frame.extend_from_slice(&checksum);
    }

    fn encode_read(
        frame_no: u8,
        command: Command,
        region: MemoryRegion,
        address: &Address,
        length: u16,
    ) -> Vec<u8> {
        let mut frame = Vec::with_capacity(25);
        Self::push_header(&mut frame, frame_no, command);
        frame.push(READ_DATA_LEN);
        Self::push_address(&mut frame, region, address);
        frame.extend_from_slice(&to_dual_byte(length));
        Self::push_checksum(&mut frame);
        frame
    }

    /// Validates identifier, sequence pairing, echoed command, and checksum.
    fn is_valid_response(frame: &[u8], frame_no: u8, expected_opcode: u8) -> bool {
        if frame.len() < MIN_RESPONSE_LEN {
            return false;
        }
        if &frame[..SLAVE_ID.len()] != SLAVE_ID {
            return false;
        }
        // The slave pairs its response by echoing the frame number plus 128.
        if frame[9] != frame_no.wrapping_add(128) {
            return false;
        }
        if frame[10] != expected_opcode {
            return false;
        }

        let (body, tail) = frame.split_at(frame.len() - 2);
        frame_checksum(body) == [tail[0], tail[1]]
    }

    /// Reads the result code carried at bytes 14-15.
    fn result_code(frame: &[u8]) -> ResponseCode {
        ResponseCode::from_wire(from_dual_byte(frame[14], frame[15]))
            .unwrap_or(ResponseCode::WritingError)
    }
}

impl ProtocolCodec for EthernetCodec {
    fn read_word_limit(&self) -> u16 {
        512
    }

    fn read_bit_limit(&self) -> u16 {
        1024
    }

    fn write_word_limit(&self) -> usize {
        64
    }

    fn write_bit_limit(&self) -> usize {
        256
    }

    fn validate_bit_values(&self, _data: &[u8]) -> Result<()> {
        // The Ethernet protocol accepts any byte value per bit position.
        Ok(())
    }

    fn encode_read_word(
        &self,
        frame_no: u8,
        region: MemoryRegion,
        address: &Address,
        length: u16,
    ) -> Vec<u8> {
        Self::encode_read(frame_no, Command::ReadWord, region, address, length)
    }

    fn encode_read_bit(
        &self,
        frame_no: u8,
        region: MemoryRegion,
        address: &Address,
        length: u16,
    ) -> Vec<u8> {
        Self::encode_read(frame_no, Command::ReadBit, region, address, length)
    }

    fn encode_write_word(
        &self,
        frame_no: u8,
        region: MemoryRegion,
        address: &Address,
        data: &[u16],
    ) -> Vec<u8> {
        let mut frame = Vec::with_capacity(26 + data.len() * 2);
        Self::push_header(&mut frame, frame_no, Command::WriteWord);
        frame.extend_from_slice(&to_dual_byte((data.len() * 2 + 10) as u16));
        Self::push_address(&mut frame, region, address);
        frame.extend_from_slice(&to_dual_byte(data.len() as u16));
        for word in data {
            frame.extend_from_slice(&to_dual_byte(*word));
        }
        Self::push_checksum(&mut frame);
        frame
    }

    fn encode_write_bit(
        &self,
        frame_no: u8,
        region: MemoryRegion,
        address: &Address,
        data: &[u8],
    ) -> Vec<u8> {
        let mut frame = Vec::with_capacity(26 + data.len());
        Self::push_header(&mut frame, frame_no, Command::WriteBit);
        frame.extend_from_slice(&to_dual_byte((data.len() + 10) as u16));
        Self::push_address(&mut frame, region, address);
        frame.extend_from_slice(&to_dual_byte(data.len() as u16));
        frame.extend_from_slice(data);
        Self::push_checksum(&mut frame);
        frame
    }

    fn decode_read_word(&self, frame: &[u8], frame_no: u8) -> (ResponseCode, Option<Vec<u16>>) {
        if frame.len() < MIN_RESPONSE_LEN {
            return (ResponseCode::WritingError, None);
        }

        // An error acknowledgment replaces the data section with a code.
        if frame[10] == ACK_OPCODE {
            return (Self::result_code(frame), None);
        }

        if !Self::is_valid_response(frame, frame_no, Command::ReadWord.opcode()) {
            return (ResponseCode::WritingError, None);
        }
        if frame.len() < DATA_START + 2 {
            return (ResponseCode::WritingError, None);
        }

        let words = frame[DATA_START..frame.len() - 2]
            .chunks_exact(2)
            .map(|pair| from_dual_byte(pair[0], pair[1]))
            .collect();
        (ResponseCode::Success, Some(words))
    }

    fn decode_read_bit(&self, frame: &[u8], frame_no: u8) -> (ResponseCode, Option<Vec<u8>>) {
        if frame.len() < MIN_RESPONSE_LEN {
            return (ResponseCode::WritingError, None);
        }

        if frame[10] == ACK_OPCODE {
            return (Self::result_code(frame), None);
        }

        if !Self::is_valid_response(frame, frame_no, Command::ReadBit.opcode()) {
            return (ResponseCode::WritingError, None);
        }

        // The declared length covers the 9-byte address echo plus payload.
        let declared = from_dual_byte(frame[12], frame[13]);
        if declared < ADDRESS_ECHO_LEN {
            return (ResponseCode::WritingError, None);
        }
        let payload_len = usize::from(declared - ADDRESS_ECHO_LEN);
        if DATA_START + payload_len + 2 > frame.len() {
            return (ResponseCode::WritingError, None);
        }

        let bits = frame[DATA_START..DATA_START + payload_len].to_vec();
        (ResponseCode::Success, Some(bits))
    }

    fn decode_write(&self, frame: &[u8], frame_no: u8, _command: Command) -> ResponseCode {
        // Writes are always acknowledged with the 0x41 opcode, success and
        // failure alike.
        if !Self::is_valid_response(frame, frame_no, ACK_OPCODE) {
            return ResponseCode::WritingError;
        }
        Self::result_code(frame)
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

    /// Builds a well-formed read response the way the slave does.
    fn read_response(frame_no: u8, opcode: u8, payload: &[u8]) -> Vec<u8> {
        let mut frame = Vec::new();
        frame.extend_from_slice(SLAVE_ID);
        frame.push(frame_no.wrapping_add(128));
        frame.push(opcode);
        frame.push(0);
        frame.extend_from_slice(&to_dual_byte(9 + payload.len() as u16));
        frame.extend_from_slice(&[0; 9]); // address echo
        frame.extend_from_slice(payload);
        let checksum = frame_checksum(&frame);
        frame.extend_from_slice(&checksum);
        frame
    }

    /// Builds a write/error acknowledgment carrying the given result code.
    fn ack_response(frame_no: u8, code: u16) -> Vec<u8> {
        let mut frame = Vec::new();
        frame.extend_from_slice(SLAVE_ID);
        frame.push(frame_no.wrapping_add(128));
        frame.push(ACK_OPCODE);
        frame.push(0);
        frame.extend_from_slice(&[0, 2]);
        frame.extend_from_slice(&to_dual_byte(code));
        let checksum = frame_checksum(&frame);
        frame.extend_from_slice(&checksum);
        frame
    }

    #[test]
    fn test_encode_read_word_layout() {
        let frame =
            EthernetCodec.encode_read_word(3, MemoryRegion::D, &word_address("000F0"), 10);

        assert_eq!(&frame[..9], MASTER_ID);
        assert_eq!(frame[9], 3);
        assert_eq!(frame[10], 0x52);
        assert_eq!(frame[11], 0);
        assert_eq!(frame[12], 10);
        assert_eq!(frame[13], 9); // D region code
        assert_eq!(frame[14], 0);
        assert_eq!(&frame[15..21], b"0000F0");
        assert_eq!(&frame[21..23], &[0x00, 0x0A]);
        assert_eq!(frame.len(), 25);

        let (body, tail) = frame.split_at(frame.len() - 2);
        assert_eq!(frame_checksum(body), [tail[0], tail[1]]);
    }

    #[test]
    fn test_encode_read_word_golden_frame() {
        let frame =
            EthernetCodec.encode_read_word(3, MemoryRegion::D, &word_address("000F0"), 10);
        let expected =
            hex::decode("4b44545f504c435f4d0352000a0900303030304630000a0475").unwrap();
        assert_eq!(frame, expected);
    }

    #[test]
    fn test_encode_read_bit_uses_bit_opcode() {
        let frame =
            EthernetCodec.encode_read_bit(0, MemoryRegion::X, &bit_address("000F1"), 1024);
        assert_eq!(frame[10], 0x72);
        assert_eq!(&frame[21..23], &[0x04, 0x00]);
    }

    #[test]
    fn test_encode_write_word_layout() {
        let frame = EthernetCodec.encode_write_word(
            7,
            MemoryRegion::M,
            &word_address("0F010"),
            &[0x1234, 0xABCD],
        );

        assert_eq!(frame[10], 0x57);
        // Data-section length: 2 words * 2 + 10.
        assert_eq!(&frame[12..14], &[0x00, 0x0E]);
        assert_eq!(frame[14], 0); // M region code
        assert_eq!(frame[15], 0);
        assert_eq!(&frame[16..22], b"00F010");
        assert_eq!(&frame[22..24], &[0x00, 0x02]);
        assert_eq!(&frame[24..28], &[0x12, 0x34, 0xAB, 0xCD]);

        let (body, tail) = frame.split_at(frame.len() - 2);
        assert_eq!(frame_checksum(body), [tail[0], tail[1]]);
    }

    #[test]
    fn test_encode_write_bit_layout() {
        let frame = EthernetCodec.encode_write_bit(
            1,
            MemoryRegion::Y,
            &bit_address("000F1"),
            &[1, 0, 1, 1],
        );

        assert_eq!(frame[10], 0x77);
        // Data-section length: 4 bits + 10.
        assert_eq!(&frame[12..14], &[0x00, 0x0E]);
        assert_eq!(&frame[22..24], &[0x00, 0x04]);
        assert_eq!(&frame[24..28], &[1, 0, 1, 1]);
    }

    #[test]
    fn test_decode_read_word_success() {
        let payload: Vec<u8> = (0..10).flat_map(|i| [0, i as u8]).collect();
        let response = read_response(5, 0x52, &payload);

        let (code, data) = EthernetCodec.decode_read_word(&response, 5);
        assert_eq!(code, ResponseCode::Success);
        let words = data.unwrap();
        assert_eq!(words.len(), 10);
        assert_eq!(words[3], 3);
    }

    #[test]
    fn test_decode_read_word_error_ack() {
        let response = ack_response(5, 3);
        let (code, data) = EthernetCodec.decode_read_word(&response, 5);
        assert_eq!(code, ResponseCode::InvalidDeviceAddress);
        assert!(data.is_none());
    }

    #[test]
    fn test_decode_read_word_sequence_mismatch() {
        let response = read_response(5, 0x52, &[0, 1]);
        let (code, data) = EthernetCodec.decode_read_word(&response, 6);
        assert_eq!(code, ResponseCode::WritingError);
        assert!(data.is_none());
    }

    #[test]
    fn test_decode_read_word_bad_identifier() {
        let mut response = read_response(5, 0x52, &[0, 1]);
        response[0] = b'X';
        let (code, _) = EthernetCodec.decode_read_word(&response, 5);
        assert_eq!(code, ResponseCode::WritingError);
    }

    #[test]
    fn test_decode_read_word_bad_checksum() {
        let mut response = read_response(5, 0x52, &[0, 1]);
        let last = response.len() - 1;
        response[last] ^= 0xFF;
        let (code, _) = EthernetCodec.decode_read_word(&response, 5);
        assert_eq!(code, ResponseCode::WritingError);
    }

    #[test]
    fn test_decode_read_word_truncated() {
        let response = read_response(5, 0x52, &[0, 1]);
        for cut in [0, 3, 12, 20] {
            let (code, data) = EthernetCodec.decode_read_word(&response[..cut], 5);
            assert_eq!(code, ResponseCode::WritingError);
            assert!(data.is_none());
        }
    }

    #[test]
    fn test_decode_read_bit_success() {
        let payload = vec![1u8; 12];
        let response = read_response(9, 0x72, &payload);

        let (code, data) = EthernetCodec.decode_read_bit(&response, 9);
        assert_eq!(code, ResponseCode::Success);
        assert_eq!(data.unwrap(), payload);
    }

    #[test]
    fn test_decode_read_bit_declared_length_too_long() {
        let mut response = read_response(9, 0x72, &[1, 1]);
        // Claim more payload than the frame carries and fix the checksum.
        response[13] = 200;
        response.truncate(response.len() - 2);
        let checksum = frame_checksum(&response);
        response.extend_from_slice(&checksum);

        let (code, data) = EthernetCodec.decode_read_bit(&response, 9);
        assert_eq!(code, ResponseCode::WritingError);
        assert!(data.is_none());
    }

    #[test]
    fn test_decode_write_success() {
        let response = ack_response(2, 0);
        let code = EthernetCodec.decode_write(&response, 2, Command::WriteWord);
        assert_eq!(code, ResponseCode::Success);
    }

    #[test]
    fn test_decode_write_device_error() {
        let response = ack_response(2, 16);
        let code = EthernetCodec.decode_write(&response, 2, Command::WriteBit);
        assert_eq!(code, ResponseCode::CpuError);
    }

    #[test]
    fn test_decode_write_wrong_sequence() {
        let response = ack_response(2, 0);
        let code = EthernetCodec.decode_write(&response, 3, Command::WriteWord);
        assert_eq!(code, ResponseCode::WritingError);
    }

    #[test]
    fn test_decode_write_unknown_code() {
        let response = ack_response(2, 400);
        let code = EthernetCodec.decode_write(&response, 2, Command::WriteWord);
        assert_eq!(code, ResponseCode::WritingError);
    }
}
