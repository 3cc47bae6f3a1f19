//! Example: Reading words and bits from PLC memory
//!
//! Run with: cargo run --example read_words
//!
//! This example demonstrates:
//! - Connecting to a PLC over TCP
//! - Reading words from different memory regions
//! - Reading bit blocks
//! - Inspecting the response code on failure

use cimon_plc::{EthernetConnector, MemoryRegion, TcpTransport, DEFAULT_TCP_PORT};

fn main() -> cimon_plc::Result<()> {
    // =========================================================================
    // Connect to PLC
    // =========================================================================

    let address = format!("192.168.1.10:{}", DEFAULT_TCP_PORT);
    let transport = TcpTransport::new(address.parse().unwrap());
    let mut plc = EthernetConnector::ethernet(transport).with_auto_connect(false);

    let status = plc.connect(1000, 1000, 3000)?;
    println!("connect: {:?}", status);

    // =========================================================================
    // Reading Words (16-bit values)
    // =========================================================================

    println!("\n=== Reading Words ===\n");

    // Read 10 words from data register D0x0F0
    let (code, data) = plc.read_word(MemoryRegion::D, "F0", 10)?;
    match data {
        Some(words) => println!("D0F0..D103: {:?}", words),
        None => println!("read failed: {}", code),
    }

    // Read from other regions; word addresses must end in '0'
    let (code, data) = plc.read_word(MemoryRegion::M, "100", 4)?;
    println!("M100 ({}): {:?}", code, data);

    let (code, data) = plc.read_word(MemoryRegion::Y, "0", 1)?;
    if let Some(words) = data {
        println!("Y0 = 0x{:04X}", words[0]);
    } else {
        println!("Y0 read failed: {}", code);
    }

    // =========================================================================
    // Reading Bits
    // =========================================================================

    println!("\n=== Reading Bits ===\n");

    // Bit addresses take any hex offset, no alignment requirement
    let (code, bits) = plc.read_bit(MemoryRegion::X, "A1", 16)?;
    match bits {
        Some(values) => {
            for (i, value) in values.iter().enumerate() {
                if *value != 0 {
                    println!("X0A1+{} is ON", i);
                }
            }
        }
        None => println!("bit read failed: {}", code),
    }

    plc.disconnect();
    Ok(())
}
