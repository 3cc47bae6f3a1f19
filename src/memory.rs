//! Memory region definitions for Cimon PLCs.
//!
//! This module defines the [`MemoryRegion`] enum which represents the
//! addressable memory classes of a Cimon PLC. Each region has a numeric wire
//! code used by the Ethernet protocol and a single-letter tag used by the
//! serial protocol.
//!
//! # Regions Overview
//!
//! | Region | Description |
//! |--------|-------------|
//! | M | Internal relay - logic circuits without physical output |
//! | X | Input - data received directly from field devices |
//! | Y | Output - operation results driven to field devices |
//! | K | Keep - retains values across power cycles |
//! | L | Link - data exchange with upper/lower devices |
//! | F | Flag - system state, clocks, card numbers |
//! | T | Timer - set/current values up to 0xFFFF |
//! | C | Counter - edge-counting relays |
//! | S | Step - step-control relays |
//! | D | Data register - general numeric storage |

/// Memory regions addressable in Cimon PLCs.
///
/// Each region maps to a numeric code carried as a single byte in Ethernet
/// frames and to its letter tag carried as a single ASCII character in serial
/// frames. Both mappings are explicit tables; they never rely on the display
/// name of the variant.
///
/// # Example
///
/// ```
/// use cimon_plc::MemoryRegion;
///
/// assert_eq!(MemoryRegion::D.tag(), 'D');
/// println!("{}", MemoryRegion::X); // "X"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryRegion {
    /// M (internal relay) - configures logic circuits, no direct output.
    M,
    /// X (input) - receives data directly.
    X,
    /// Y (output) - transfers operation results outward.
    Y,
    /// K (keep) - like M but retentive across power-off.
    K,
    /// L (link) - data link with upper and lower devices.
    L,
    /// F (flag) - operation state, card numbers, and clock contacts.
    F,
    /// T (timer) - on/off-delay and accumulating timers.
    T,
    /// C (counter) - up/down/ring counters.
    C,
    /// S (step) - step-control relays.
    S,
    /// D (data register) - internal data storage.
    D,
}

impl MemoryRegion {
    /// Returns the numeric code carried in Ethernet request frames.
    pub(crate) fn wire_code(self) -> u8 {
        match self {
            MemoryRegion::M => 0,
            MemoryRegion::X => 1,
            MemoryRegion::Y => 2,
            MemoryRegion::K => 3,
            MemoryRegion::L => 4,
            MemoryRegion::F => 5,
            MemoryRegion::T => 6,
            MemoryRegion::C => 7,
            MemoryRegion::S => 8,
            MemoryRegion::D => 9,
        }
    }

    /// Returns the letter tag carried in serial request frames.
    ///
    /// # Example
    ///
    /// ```
    /// use cimon_plc::MemoryRegion;
    ///
    /// assert_eq!(MemoryRegion::M.tag(), 'M');
    /// assert_eq!(MemoryRegion::D.tag(), 'D');
    /// ```
    pub fn tag(self) -> char {
        match self {
            MemoryRegion::M => 'M',
            MemoryRegion::X => 'X',
            MemoryRegion::Y => 'Y',
            MemoryRegion::K => 'K',
            MemoryRegion::L => 'L',
            MemoryRegion::F => 'F',
            MemoryRegion::T => 'T',
            MemoryRegion::C => 'C',
            MemoryRegion::S => 'S',
            MemoryRegion::D => 'D',
        }
    }
}

impl std::fmt::Display for MemoryRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [MemoryRegion; 10] = [
        MemoryRegion::M,
        MemoryRegion::X,
        MemoryRegion::Y,
        MemoryRegion::K,
        MemoryRegion::L,
        MemoryRegion::F,
        MemoryRegion::T,
        MemoryRegion::C,
        MemoryRegion::S,
        MemoryRegion::D,
    ];

    #[test]
    fn test_wire_codes_are_sequential() {
        for (i, region) in ALL.iter().enumerate() {
            assert_eq!(region.wire_code(), i as u8);
        }
    }

    #[test]
    fn test_tags() {
        let tags: Vec<char> = ALL.iter().map(|r| r.tag()).collect();
        assert_eq!(tags, vec!['M', 'X', 'Y', 'K', 'L', 'F', 'T', 'C', 'S', 'D']);
    }

    #[test]
    fn test_display_matches_tag() {
        for region in ALL {
            assert_eq!(region.to_string(), region.tag().to_string());
        }
    }
}
