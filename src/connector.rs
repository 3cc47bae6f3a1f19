//! Transport-agnostic connector for the four block operations.
//!
//! A [`Connector`] binds one [`PlcTransport`] to one [`ProtocolCodec`] and
//! drives the request/response cycle: validate, ensure a live connection,
//! encode, send, wait, receive, decode. Each call is one exchange; there are
//! no retries, and a connection the connector opened for a call is closed
//! again before that call returns.
//!
//! # Example
//!
//! ```no_run
//! use cimon_plc::{EthernetConnector, MemoryRegion, TcpTransport};
//!
//! let transport = TcpTransport::new("192.168.1.10:10620".parse().unwrap());
//! let mut plc = EthernetConnector::ethernet(transport);
//!
//! // Auto-connect is on by default; this opens, reads, and closes.
//! let (code, data) = plc.read_word(MemoryRegion::D, "F0", 10)?;
//! println!("{}: {:?}", code, data);
//! # Ok::<(), cimon_plc::PlcError>(())
//! ```
//!
//! # Concurrency
//!
//! A connector must not carry two in-flight operations: the frame sequence
//! counter and the auto-connect scope both assume one exchange at a time.
//! Use one connector (and one physical connection) per concurrent stream.

use std::thread;
use std::time::Duration;

use crate::address::Address;
use crate::codec::ProtocolCodec;
use crate::command::Command;
use crate::error::{PlcError, Result};
use crate::ethernet::EthernetCodec;
use crate::memory::MemoryRegion;
use crate::response::ResponseCode;
use crate::serial::SerialCodec;
use crate::transport::{ConnectionStatus, PlcTransport};

/// Lowest accepted timeout, in milliseconds.
pub const MIN_TIMEOUT_MS: u64 = 100;

/// Highest accepted timeout, in milliseconds.
pub const MAX_TIMEOUT_MS: u64 = 10_000;

/// Default read/write timeout used by auto-connect when [`Connector::connect`]
/// was never called explicitly.
pub const DEFAULT_IO_TIMEOUT_MS: u64 = 1_000;

/// Default reachability-probe timeout.
pub const DEFAULT_PING_TIMEOUT_MS: u64 = 3_000;

/// Frame sequence numbers wrap back to zero after this many allocations.
const FRAME_NO_MODULUS: u8 = 128;

/// Connector for a Cimon PLC over one transport.
///
/// Generic over the transport and the protocol codec; use the
/// [`EthernetConnector`] and [`SerialConnector`] aliases.
pub struct Connector<T: PlcTransport, C: ProtocolCodec> {
    transport: T,
    codec: C,
    auto_connect: bool,
    read_timeout_ms: u64,
    write_timeout_ms: u64,
    ping_timeout_ms: u64,
    frame_no: u8,
}

/// Connector speaking the Ethernet (TCP) frame protocol.
pub type EthernetConnector<T> = Connector<T, EthernetCodec>;

/// Connector speaking the serial ASCII frame protocol.
pub type SerialConnector<T> = Connector<T, SerialCodec>;

impl<T: PlcTransport> Connector<T, EthernetCodec> {
    /// Creates an Ethernet connector with auto-connect enabled.
    pub fn ethernet(transport: T) -> Self {
        Self::new(transport, EthernetCodec)
    }
}

impl<T: PlcTransport> Connector<T, SerialCodec> {
    /// Creates a serial connector with auto-connect enabled.
    pub fn serial(transport: T) -> Self {
        Self::new(transport, SerialCodec)
    }
}

impl<T: PlcTransport, C: ProtocolCodec> Connector<T, C> {
    /// Creates a connector from a transport and a codec, with auto-connect
    /// enabled and default timeouts.
    pub fn new(transport: T, codec: C) -> Self {
        Self {
            transport,
            codec,
            auto_connect: true,
            read_timeout_ms: DEFAULT_IO_TIMEOUT_MS,
            write_timeout_ms: DEFAULT_IO_TIMEOUT_MS,
            ping_timeout_ms: DEFAULT_PING_TIMEOUT_MS,
            frame_no: 0,
        }
    }

    /// Sets the auto-connect policy. When disabled, operations on a closed
    /// connection fail with [`ResponseCode::SystemError`] instead of opening
    /// one.
    pub fn with_auto_connect(mut self, auto_connect: bool) -> Self {
        self.auto_connect = auto_connect;
        self
    }

    /// Returns whether the underlying transport is currently connected.
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Opens the connection with the given timeouts, all in milliseconds and
    /// each within `[100, 10000]`.
    ///
    /// The read timeout is also the duration the connector waits between
    /// sending a request and reading the response.
    ///
    /// # Errors
    ///
    /// Returns [`PlcError::InvalidParameter`] if any timeout is out of range;
    /// no connection attempt is made in that case.
    pub fn connect(
        &mut self,
        read_timeout_ms: u64,
        write_timeout_ms: u64,
        ping_timeout_ms: u64,
    ) -> Result<ConnectionStatus> {
        check_timeout("read_timeout", read_timeout_ms)?;
        check_timeout("write_timeout", write_timeout_ms)?;
        check_timeout("ping_timeout", ping_timeout_ms)?;

        self.read_timeout_ms = read_timeout_ms;
        self.write_timeout_ms = write_timeout_ms;
        self.ping_timeout_ms = ping_timeout_ms;
        Ok(self
            .transport
            .connect(read_timeout_ms, write_timeout_ms, ping_timeout_ms))
    }

    /// Closes the connection. Safe to call when already closed.
    pub fn disconnect(&mut self) -> ConnectionStatus {
        self.transport.disconnect()
    }

    /// Reads `length` words starting at `address`.
    ///
    /// `address` is 1-6 hex characters and must be word-aligned (end in
    /// `'0'`). `length` is bounded by the protocol: 1-512 over Ethernet,
    /// 1-63 over serial. Data is present only on
    /// [`ResponseCode::Success`].
    ///
    /// # Errors
    ///
    /// Returns [`PlcError`] for malformed addresses or out-of-range lengths,
    /// before any I/O.
    pub fn read_word(
        &mut self,
        region: MemoryRegion,
        address: &str,
        length: u16,
    ) -> Result<(ResponseCode, Option<Vec<u16>>)> {
        let address = Address::word(address)?;
        check_length("length", length as usize, self.codec.read_word_limit() as usize)?;

        let frame_no = self.next_frame_no();
        let frame = self
            .codec
            .encode_read_word(frame_no, region, &address, length);
        match self.exchange(&frame) {
            Ok(response) => Ok(self.codec.decode_read_word(&response, frame_no)),
            Err(code) => Ok((code, None)),
        }
    }

    /// Reads `length` bit values starting at `address`.
    ///
    /// `address` is 1-6 hex characters. `length` is bounded by the protocol:
    /// 1-1024 over Ethernet, 1-126 over serial.
    ///
    /// # Errors
    ///
    /// Returns [`PlcError`] for malformed addresses or out-of-range lengths,
    /// before any I/O.
    pub fn read_bit(
        &mut self,
        region: MemoryRegion,
        address: &str,
        length: u16,
    ) -> Result<(ResponseCode, Option<Vec<u8>>)> {
        let address = Address::bit(address)?;
        check_length("length", length as usize, self.codec.read_bit_limit() as usize)?;

        let frame_no = self.next_frame_no();
        let frame = self
            .codec
            .encode_read_bit(frame_no, region, &address, length);
        match self.exchange(&frame) {
            Ok(response) => Ok(self.codec.decode_read_bit(&response, frame_no)),
            Err(code) => Ok((code, None)),
        }
    }

    /// Writes `data` words starting at the word-aligned `address`.
    ///
    /// The word count is bounded by the protocol: 1-64 over Ethernet, 1-63
    /// over serial.
    ///
    /// # Errors
    ///
    /// Returns [`PlcError`] for malformed addresses or out-of-range data,
    /// before any I/O.
    pub fn write_word(
        &mut self,
        region: MemoryRegion,
        address: &str,
        data: &[u16],
    ) -> Result<ResponseCode> {
        let address = Address::word(address)?;
        check_length("data", data.len(), self.codec.write_word_limit())?;

        let frame_no = self.next_frame_no();
        let frame = self
            .codec
            .encode_write_word(frame_no, region, &address, data);
        match self.exchange(&frame) {
            Ok(response) => Ok(self
                .codec
                .decode_write(&response, frame_no, Command::WriteWord)),
            Err(code) => Ok(code),
        }
    }

    /// Writes `data` bit values starting at `address`.
    ///
    /// The bit count is bounded by the protocol: 1-256 over Ethernet, 1-126
    /// over serial. Over serial each value must be 0 or 1.
    ///
    /// # Errors
    ///
    /// Returns [`PlcError`] for malformed addresses or out-of-range data,
    /// before any I/O.
    pub fn write_bit(
        &mut self,
        region: MemoryRegion,
        address: &str,
        data: &[u8],
    ) -> Result<ResponseCode> {
        let address = Address::bit(address)?;
        check_length("data", data.len(), self.codec.write_bit_limit())?;
        self.codec.validate_bit_values(data)?;

        let frame_no = self.next_frame_no();
        let frame = self
            .codec
            .encode_write_bit(frame_no, region, &address, data);
        match self.exchange(&frame) {
            Ok(response) => Ok(self
                .codec
                .decode_write(&response, frame_no, Command::WriteBit)),
            Err(code) => Ok(code),
        }
    }

    /// Allocates the next frame sequence number; values cycle through
    /// 0..=127.
    fn next_frame_no(&mut self) -> u8 {
        let frame_no = self.frame_no;
        self.frame_no = (frame_no + 1) % FRAME_NO_MODULUS;
        frame_no
    }

    /// Runs one request/response exchange: connect if needed, send, wait the
    /// configured read timeout, receive, and close any connection this call
    /// opened.
    fn exchange(&mut self, frame: &[u8]) -> std::result::Result<Vec<u8>, ResponseCode> {
        let auto_opened = self.ensure_connected()?;

        if !self.transport.send(frame) {
            if auto_opened {
                self.transport.disconnect();
            }
            return Err(ResponseCode::WritingError);
        }

        // The device has no response framing the transport could block on;
        // wait the full read timeout, then take whatever arrived.
        thread::sleep(Duration::from_millis(self.read_timeout_ms));
        let received = self.transport.receive();

        // The auto-opened connection is closed exactly once per call, before
        // any decode outcome can short-circuit.
        if auto_opened {
            self.transport.disconnect();
        }

        match received {
            Some(buffer) if !buffer.is_empty() => Ok(buffer),
            _ => Err(ResponseCode::SystemError),
        }
    }

    /// Ensures a live connection, opening one when auto-connect allows it.
    /// Returns whether this call opened the connection.
    fn ensure_connected(&mut self) -> std::result::Result<bool, ResponseCode> {
        if self.transport.is_connected() {
            return Ok(false);
        }
        if !self.auto_connect {
            return Err(ResponseCode::SystemError);
        }

        let status = self.transport.connect(
            self.read_timeout_ms,
            self.write_timeout_ms,
            self.ping_timeout_ms,
        );
        if status != ConnectionStatus::Connected {
            return Err(ResponseCode::SystemError);
        }
        Ok(true)
    }
}

fn check_timeout(name: &str, value_ms: u64) -> Result<()> {
    if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&value_ms) {
        return Err(PlcError::invalid_parameter(
            name,
            format!("must be between {} and {} ms", MIN_TIMEOUT_MS, MAX_TIMEOUT_MS),
        ));
    }
    Ok(())
}

fn check_length(name: &str, value: usize, limit: usize) -> Result<()> {
    if value == 0 || value > limit {
        return Err(PlcError::invalid_parameter(
            name,
            format!("must be between 1 and {}", limit),
        ));
    }
    Ok(())
}
