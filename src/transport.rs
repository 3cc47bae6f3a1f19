//! Transport abstraction and the stock TCP implementation.
//!
//! The codec core only ever talks to a [`PlcTransport`]: raw connect,
//! disconnect, send, and receive. The transport knows nothing about frames;
//! the codecs know nothing about sockets. A serial-port implementation is
//! supplied by the application (any type implementing the trait works); a
//! ready-to-use [`TcpTransport`] over `std::net::TcpStream` is provided for
//! the Ethernet protocol's default port.
//!
//! # Example
//!
//! ```no_run
//! use cimon_plc::{PlcTransport, TcpTransport};
//!
//! let mut transport = TcpTransport::new("192.168.1.10:10620".parse().unwrap());
//! let status = transport.connect(1000, 1000, 3000);
//! println!("{:?}", status);
//! ```

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

/// Default TCP port of the Cimon Ethernet module.
pub const DEFAULT_TCP_PORT: u16 = 10620;

/// Maximum response buffer size read in one receive call.
pub const MAX_FRAME_SIZE: usize = 2048;

/// Connection state reported by a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// The link is up.
    Connected,
    /// The link is down.
    DisConnected,
    /// The device did not answer the reachability probe.
    NoRouteToDestination,
}

/// Raw byte transport to a PLC.
///
/// Implementations own the physical link. All timeouts are in milliseconds.
pub trait PlcTransport {
    /// Opens the link. Returns the resulting status; anything other than
    /// [`ConnectionStatus::Connected`] means the link is unusable.
    fn connect(
        &mut self,
        read_timeout_ms: u64,
        write_timeout_ms: u64,
        ping_timeout_ms: u64,
    ) -> ConnectionStatus;

    /// Closes the link. Idempotent.
    fn disconnect(&mut self) -> ConnectionStatus;

    /// Sends one request frame. Returns `true` iff the full buffer was
    /// accepted by the link.
    fn send(&mut self, frame: &[u8]) -> bool;

    /// Receives whatever response bytes are currently available.
    /// `None` signals that nothing could be read.
    fn receive(&mut self) -> Option<Vec<u8>>;

    /// Returns whether the link is currently up.
    fn is_connected(&self) -> bool;
}

/// TCP transport for the Cimon Ethernet module.
///
/// Reachability is probed with a bounded connect attempt (the `ping_timeout`
/// argument); an unprivileged library cannot send ICMP echoes, so the TCP
/// handshake doubles as the probe.
pub struct TcpTransport {
    addr: SocketAddr,
    stream: Option<TcpStream>,
}

impl TcpTransport {
    /// Creates a transport bound to the given PLC address. No connection is
    /// attempted until [`PlcTransport::connect`] is called.
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr, stream: None }
    }

    /// Returns the remote PLC address.
    pub fn remote_addr(&self) -> SocketAddr {
        self.addr
    }
}

impl PlcTransport for TcpTransport {
    fn connect(
        &mut self,
        read_timeout_ms: u64,
        write_timeout_ms: u64,
        ping_timeout_ms: u64,
    ) -> ConnectionStatus {
        let probe = Duration::from_millis(ping_timeout_ms);
        let stream = match TcpStream::connect_timeout(&self.addr, probe) {
            Ok(stream) => stream,
            Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {
                return ConnectionStatus::NoRouteToDestination;
            }
            Err(_) => return ConnectionStatus::DisConnected,
        };

        let read = Duration::from_millis(read_timeout_ms);
        let write = Duration::from_millis(write_timeout_ms);
        if stream.set_read_timeout(Some(read)).is_err()
            || stream.set_write_timeout(Some(write)).is_err()
        {
            return ConnectionStatus::DisConnected;
        }

        self.stream = Some(stream);
        ConnectionStatus::Connected
    }

    fn disconnect(&mut self) -> ConnectionStatus {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
        }
        ConnectionStatus::DisConnected
    }

    fn send(&mut self, frame: &[u8]) -> bool {
        match self.stream.as_mut() {
            Some(stream) => stream.write_all(frame).is_ok(),
            None => false,
        }
    }

    fn receive(&mut self) -> Option<Vec<u8>> {
        let stream = self.stream.as_mut()?;
        let mut buffer = vec![0u8; MAX_FRAME_SIZE];
        match stream.read(&mut buffer) {
            Ok(0) => None,
            Ok(size) => {
                buffer.truncate(size);
                Some(buffer)
            }
            Err(_) => None,
        }
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }
}

impl std::fmt::Debug for TcpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TcpTransport")
            .field("remote_addr", &self.addr)
            .field("connected", &self.is_connected())
            .finish()
    }
}
