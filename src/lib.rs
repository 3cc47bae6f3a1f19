//! # Cimon PLC Protocol Library
//!
//! A Rust library for exchanging typed memory blocks with Cimon PLCs over
//! TCP/IP or an asynchronous serial link.
//!
//! This is a **protocol-only** library—no polling, schedulers, or
//! application-level features. Each call produces exactly 1 request and
//! 1 response. No automatic retries, caching, or reconnection.
//!
//! ## Features
//!
//! - **Two transports, one API** — Ethernet (binary frames) and serial
//!   (ASCII frames) connectors expose the same four operations
//! - **Exact wire formats** — field offsets, widths, and checksums are
//!   reproduced bit-for-bit for interoperability with real devices
//! - **Validation first** — bad addresses, lengths, and timeouts are
//!   rejected before any byte is sent
//! - **No panics on bad frames** — corrupt, partial, or empty responses
//!   degrade to a [`ResponseCode`], never an unwind
//!
//! ## Quick Start
//!
//! ```no_run
//! use cimon_plc::{EthernetConnector, MemoryRegion, TcpTransport};
//!
//! fn main() -> cimon_plc::Result<()> {
//!     let transport = TcpTransport::new("192.168.1.10:10620".parse().unwrap());
//!     let mut plc = EthernetConnector::ethernet(transport);
//!
//!     // Read 10 words from data register 0x0F0
//!     let (code, data) = plc.read_word(MemoryRegion::D, "F0", 10)?;
//!     println!("{}: {:?}", code, data);
//!
//!     // Write two words
//!     let code = plc.write_word(MemoryRegion::D, "100", &[0x1234, 0x5678])?;
//!     println!("write: {}", code);
//!
//!     // Read 16 bits from the input region
//!     let (code, bits) = plc.read_bit(MemoryRegion::X, "A1", 16)?;
//!     println!("{}: {:?}", code, bits);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Memory Regions
//!
//! The library supports the 10 Cimon memory regions:
//!
//! | Region | Description |
//! |--------|-------------|
//! | [`MemoryRegion::M`] | Internal relay |
//! | [`MemoryRegion::X`] | Input |
//! | [`MemoryRegion::Y`] | Output |
//! | [`MemoryRegion::K`] | Keep (retentive) |
//! | [`MemoryRegion::L`] | Link |
//! | [`MemoryRegion::F`] | Flag |
//! | [`MemoryRegion::T`] | Timer |
//! | [`MemoryRegion::C`] | Counter |
//! | [`MemoryRegion::S`] | Step |
//! | [`MemoryRegion::D`] | Data register |
//!
//! ## Connection Policy
//!
//! With auto-connect (the default), every operation on a closed connection
//! opens one, runs the exchange, and closes it again. For long sessions,
//! call [`Connector::connect`] once and [`Connector::disconnect`] when done:
//!
//! ```no_run
//! # use cimon_plc::{EthernetConnector, MemoryRegion, TcpTransport};
//! # let transport = TcpTransport::new("192.168.1.10:10620".parse().unwrap());
//! let mut plc = EthernetConnector::ethernet(transport).with_auto_connect(false);
//! plc.connect(1000, 1000, 3000)?;
//! let (code, data) = plc.read_word(MemoryRegion::D, "F0", 10)?;
//! plc.disconnect();
//! # Ok::<(), cimon_plc::PlcError>(())
//! ```
//!
//! ## Error Handling
//!
//! Caller mistakes (bad address format, out-of-range length or timeout) are
//! [`PlcError`] values returned before any I/O. Everything else—device
//! errors, unreachable transports, corrupt frames—comes back as a
//! [`ResponseCode`] paired with optional data:
//!
//! - [`ResponseCode::SystemError`] — the device could not be reached or did
//!   not answer
//! - [`ResponseCode::WritingError`] — the send was rejected or the response
//!   failed validation (identifier, sequence, opcode, or checksum mismatch)
//! - any other non-success code — reported by the device itself, returned
//!   verbatim
//!
//! Retry policy is deliberately left to the application.

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod address;
pub mod checksum;
mod codec;
mod command;
mod connector;
mod error;
mod ethernet;
mod memory;
mod response;
mod serial;
mod transport;

// Public re-exports
pub use address::{Address, ADDRESS_LEN};
pub use codec::ProtocolCodec;
pub use command::Command;
pub use connector::{
    Connector, EthernetConnector, SerialConnector, DEFAULT_IO_TIMEOUT_MS, DEFAULT_PING_TIMEOUT_MS,
    MAX_TIMEOUT_MS, MIN_TIMEOUT_MS,
};
pub use error::{PlcError, Result};
pub use ethernet::{EthernetCodec, MASTER_ID, SLAVE_ID};
pub use memory::MemoryRegion;
pub use response::ResponseCode;
pub use serial::{SerialCodec, ENQ, EOT, ETX, STX};
pub use transport::{
    ConnectionStatus, PlcTransport, TcpTransport, DEFAULT_TCP_PORT, MAX_FRAME_SIZE,
};
