//! Resource type tags, pin requirements, and alternate mapping families.
//!
//! Every physical resource on a board carries an [`IoResourceType`] tag. The
//! same tags describe what a design port *requires*: its primary type plus an
//! ordered family of single-pin fallback types used when the primary type is
//! unavailable or the user decomposes a multi-pin port into individual pins.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The type tag of a physical I/O resource or of a port's requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IoResourceType {
    /// A single discrete FPGA pin routed to a header or test point.
    Pin,
    /// A single LED driven by one FPGA output pin.
    Led,
    /// A single push button feeding one FPGA input pin.
    Button,
    /// A seven-segment display (7 segments + decimal point, 8 output pins).
    SevenSegment,
    /// A bank of switches with a board-specific live pin count.
    DipSwitch,
    /// An RGB LED driven by three FPGA output pins.
    RgbLed,
    /// A bidirectional port header with a board-specific live pin count.
    PortIo,
    /// A constant-valued pseudo resource (not drawn from the catalog).
    Constant,
    /// An intentionally unconnected pseudo resource (not drawn from the catalog).
    Open,
    /// The terminator/unrecognized type.
    Unknown,
}

/// Segment labels of a seven-segment display, decimal point last.
const SEGMENT_LABELS: [&str; 8] = [
    "Segment_A",
    "Segment_B",
    "Segment_C",
    "Segment_D",
    "Segment_E",
    "Segment_F",
    "Segment_G",
    "DecimalPoint",
];

/// Channel labels of an RGB LED.
const RGB_LABELS: [&str; 3] = ["RED", "GREEN", "BLUE"];

impl IoResourceType {
    /// Number of FPGA *input* pins a resource of this type claims.
    ///
    /// `live` is the resource's live pin count; only the variable-width
    /// types consult it.
    pub fn input_pins(self, live: u32) -> u32 {
        match self {
            IoResourceType::Button => 1,
            IoResourceType::DipSwitch => live,
            _ => 0,
        }
    }

    /// Number of FPGA *output* pins a resource of this type claims.
    pub fn output_pins(self, _live: u32) -> u32 {
        match self {
            IoResourceType::Led => 1,
            IoResourceType::SevenSegment => 8,
            IoResourceType::RgbLed => 3,
            _ => 0,
        }
    }

    /// Number of FPGA *bidirectional* pins a resource of this type claims.
    pub fn inout_pins(self, live: u32) -> u32 {
        match self {
            IoResourceType::PortIo => live,
            _ => 0,
        }
    }

    /// Total FPGA pins claimed across all three directions.
    pub fn total_pins(self, live: u32) -> u32 {
        self.input_pins(live) + self.output_pins(live) + self.inout_pins(live)
    }

    /// Whether resources of this type expose a run-time pin count.
    ///
    /// These are the two kinds that go through the best-fit width search
    /// during feasibility checking instead of plain one-for-one consumption.
    pub fn has_variable_width(self) -> bool {
        matches!(self, IoResourceType::DipSwitch | IoResourceType::PortIo)
    }

    /// The ordered alternate mapping family for this type.
    ///
    /// When a port cannot be (or is chosen not to be) mapped onto its
    /// primary type, it decomposes into individually named single pins drawn
    /// from these types, tried in order. The list replaces the legacy
    /// `Unknown`-terminated walk.
    pub fn alternates(self) -> &'static [IoResourceType] {
        match self {
            IoResourceType::Led => &[IoResourceType::Pin],
            IoResourceType::Button => &[IoResourceType::Pin],
            IoResourceType::SevenSegment => &[IoResourceType::Pin, IoResourceType::Led],
            IoResourceType::RgbLed => &[IoResourceType::Pin, IoResourceType::Led],
            IoResourceType::DipSwitch => &[IoResourceType::Pin, IoResourceType::Button],
            IoResourceType::PortIo => &[IoResourceType::Pin],
            _ => &[],
        }
    }

    /// The label of input sub-pin `index` when a port of this type is
    /// decomposed for alternate mapping.
    pub fn input_pin_label(self, index: u32) -> String {
        match self {
            IoResourceType::Button => "Pin".to_string(),
            IoResourceType::DipSwitch => format!("sw_{}", index + 1),
            _ => format!("in_{}", index + 1),
        }
    }

    /// The label of output sub-pin `index` for alternate mapping.
    pub fn output_pin_label(self, index: u32) -> String {
        match self {
            IoResourceType::Led => "Pin".to_string(),
            IoResourceType::SevenSegment => {
                SEGMENT_LABELS[index as usize % SEGMENT_LABELS.len()].to_string()
            }
            IoResourceType::RgbLed => RGB_LABELS[index as usize % RGB_LABELS.len()].to_string(),
            _ => format!("out_{}", index + 1),
        }
    }

    /// The label of bidirectional sub-pin `index` for alternate mapping.
    pub fn inout_pin_label(self, index: u32) -> String {
        format!("pin_{}", index + 1)
    }
}

impl fmt::Display for IoResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IoResourceType::Pin => "Pin",
            IoResourceType::Led => "LED",
            IoResourceType::Button => "Button",
            IoResourceType::SevenSegment => "SevenSegment",
            IoResourceType::DipSwitch => "DIPSwitch",
            IoResourceType::RgbLed => "RGBLED",
            IoResourceType::PortIo => "PortIO",
            IoResourceType::Constant => "Constant",
            IoResourceType::Open => "Open",
            IoResourceType::Unknown => "Unknown",
        };
        write!(f, "{name}")
    }
}

/// The electrical activity polarity of a physical resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinActivity {
    /// The resource is asserted by driving the pin high.
    ActiveHigh,
    /// The resource is asserted by driving the pin low.
    ActiveLow,
}

/// The direction of a top-level FPGA bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusDirection {
    /// The top-level input bus.
    Input,
    /// The top-level output bus.
    Output,
    /// The top-level bidirectional bus.
    InOut,
}

impl BusDirection {
    /// The bus name prefix used in generated constraint lines.
    pub fn prefix(self) -> &'static str {
        match self {
            BusDirection::Input => "in",
            BusDirection::Output => "out",
            BusDirection::InOut => "inout",
        }
    }
}
