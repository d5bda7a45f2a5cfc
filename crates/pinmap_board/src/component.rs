//! A single typed I/O resource on the board.

use crate::rect::BoardRectangle;
use crate::types::{BusDirection, IoResourceType, PinActivity};
use serde::{Deserialize, Serialize};

/// One physical I/O resource: its location, type, live pin count, polarity,
/// and package pin locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoComponent {
    /// The board-area rectangle identifying this resource.
    pub rect: BoardRectangle,
    /// The resource's type tag.
    pub io_type: IoResourceType,
    /// The live pin count. Fixed-width types carry their nominal count here
    /// (1 for a pin or LED, 8 for a seven-segment display); the variable
    /// width types carry whatever the board actually wires up.
    pub pin_count: u32,
    /// The electrical activity polarity of this resource.
    pub activity: PinActivity,
    /// Package pin locations, one per live pin (e.g. `"PIN_AB12"`).
    pub pin_locations: Vec<String>,
    /// Optional silkscreen label.
    pub label: Option<String>,
}

impl IoComponent {
    /// FPGA input pins this resource claims.
    pub fn input_pins(&self) -> u32 {
        self.io_type.input_pins(self.pin_count)
    }

    /// FPGA output pins this resource claims.
    pub fn output_pins(&self) -> u32 {
        self.io_type.output_pins(self.pin_count)
    }

    /// FPGA bidirectional pins this resource claims.
    pub fn inout_pins(&self) -> u32 {
        self.io_type.inout_pins(self.pin_count)
    }

    /// Total FPGA pins claimed across all directions.
    pub fn total_pins(&self) -> u32 {
        self.io_type.total_pins(self.pin_count)
    }

    /// Vendor-neutral constraint lines tying this resource's package pins to
    /// sequential positions of a top-level bus.
    ///
    /// `start_index` is the first bus index this resource occupies; one line
    /// is produced per pin the resource claims in `direction`. A bare pin
    /// claims nothing in the type tables — its direction comes from the
    /// design port it is mapped under, so the requested direction decides.
    pub fn pin_location_strings(&self, direction: BusDirection, start_index: u32) -> Vec<String> {
        let count = if self.io_type == IoResourceType::Pin {
            self.pin_count
        } else {
            match direction {
                BusDirection::Input => self.input_pins(),
                BusDirection::Output => self.output_pins(),
                BusDirection::InOut => self.inout_pins(),
            }
        };
        let mut lines = Vec::with_capacity(count as usize);
        for i in 0..count {
            let loc = self
                .pin_locations
                .get(i as usize)
                .map(String::as_str)
                .unwrap_or("UNASSIGNED");
            lines.push(format!(
                "FPGA_{}_{} => {}",
                direction.prefix(),
                start_index + i,
                loc
            ));
        }
        lines
    }
}
