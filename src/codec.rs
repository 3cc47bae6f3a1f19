//! The codec seam between the connector and the two wire protocols.
//!
//! A [`ProtocolCodec`] turns logical operations into complete request frames
//! and raw response buffers back into typed results. Encoding is pure and
//! infallible once inputs have passed validation; decoding never fails with
//! an error, it degrades to a [`ResponseCode`] so that corrupt or partial
//! buffers are indistinguishable (to the caller) from a device that refused
//! the operation.
//!
//! The two implementations are [`EthernetCodec`](crate::EthernetCodec)
//! (binary frames over TCP) and [`SerialCodec`](crate::SerialCodec) (ASCII
//! frames with control characters).

use crate::address::Address;
use crate::command::Command;
use crate::error::Result;
use crate::memory::MemoryRegion;
use crate::response::ResponseCode;

/// Request framing and response parsing for one transport kind.
///
/// The `frame_no` argument is the rolling sequence number allocated by the
/// connector; the Ethernet protocol embeds and verifies it, the serial
/// protocol ignores it.
pub trait ProtocolCodec {
    /// Largest word count a single read request may carry.
    fn read_word_limit(&self) -> u16;

    /// Largest bit count a single read request may carry.
    fn read_bit_limit(&self) -> u16;

    /// Largest word count a single write request may carry.
    fn write_word_limit(&self) -> usize;

    /// Largest bit count a single write request may carry.
    fn write_bit_limit(&self) -> usize;

    /// Checks the individual values of a bit-write payload against this
    /// protocol's rules.
    fn validate_bit_values(&self, data: &[u8]) -> Result<()>;

    /// Builds a read-words request frame.
    fn encode_read_word(
        &self,
        frame_no: u8,
        region: MemoryRegion,
        address: &Address,
        length: u16,
    ) -> Vec<u8>;

    /// Builds a read-bits request frame.
    fn encode_read_bit(
        &self,
        frame_no: u8,
        region: MemoryRegion,
        address: &Address,
        length: u16,
    ) -> Vec<u8>;

    /// Builds a write-words request frame.
    fn encode_write_word(
        &self,
        frame_no: u8,
        region: MemoryRegion,
        address: &Address,
        data: &[u16],
    ) -> Vec<u8>;

    /// Builds a write-bits request frame.
    fn encode_write_bit(
        &self,
        frame_no: u8,
        region: MemoryRegion,
        address: &Address,
        data: &[u8],
    ) -> Vec<u8>;

    /// Parses a read-words response. Data is present only on
    /// [`ResponseCode::Success`].
    fn decode_read_word(&self, frame: &[u8], frame_no: u8) -> (ResponseCode, Option<Vec<u16>>);

    /// Parses a read-bits response. Data is present only on
    /// [`ResponseCode::Success`].
    fn decode_read_bit(&self, frame: &[u8], frame_no: u8) -> (ResponseCode, Option<Vec<u8>>);

    /// Parses a write acknowledgment for the given command.
    fn decode_write(&self, frame: &[u8], frame_no: u8, command: Command) -> ResponseCode;
}
