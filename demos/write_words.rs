//! Example: Writing words and bits to PLC memory
//!
//! Run with: cargo run --example write_words
//!
//! This example demonstrates:
//! - Auto-connect: each call opens and closes its own connection
//! - Writing word blocks
//! - Writing bit blocks and verifying with a read-back

use cimon_plc::{EthernetConnector, MemoryRegion, ResponseCode, TcpTransport, DEFAULT_TCP_PORT};

fn main() -> cimon_plc::Result<()> {
    let address = format!("192.168.1.10:{}", DEFAULT_TCP_PORT);
    let transport = TcpTransport::new(address.parse().unwrap());

    // Auto-connect is on by default: no explicit connect() needed, each
    // operation below runs on its own short-lived connection.
    let mut plc = EthernetConnector::ethernet(transport);

    // =========================================================================
    // Writing Words
    // =========================================================================

    println!("=== Writing Words ===\n");

    let code = plc.write_word(MemoryRegion::D, "100", &[0x1234, 0x5678, 0x9ABC])?;
    println!("write D100 x3: {}", code);

    if code != ResponseCode::Success {
        println!("device reported: {}", code.description());
    }

    // Read back what was written
    let (code, data) = plc.read_word(MemoryRegion::D, "100", 3)?;
    println!("read back ({}): {:?}", code, data);

    // =========================================================================
    // Writing Bits
    // =========================================================================

    println!("\n=== Writing Bits ===\n");

    let code = plc.write_bit(MemoryRegion::M, "F011", &[1, 1, 0, 1])?;
    println!("write M0F011 x4: {}", code);

    let (code, bits) = plc.read_bit(MemoryRegion::M, "F011", 4)?;
    println!("read back ({}): {:?}", code, bits);

    Ok(())
}
