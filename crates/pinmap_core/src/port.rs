//! Mappable design ports and their per-port mapping state.
//!
//! A [`MappablePort`] is one registry entry: the design element's type
//! requirement, its direction and live pin count, the primary/alternate
//! mapping family state machine, and the assignments recorded under its map
//! names. A port's set of valid map names is fully determined by its kind
//! and its active family: the primary family has the single whole-port
//! name, the alternate family one name per sub-pin. Toggling the family
//! atomically swaps the whole name set; toggling back restores it exactly.

use crate::key::{HierKey, MapKey};
use crate::target::MapTarget;
use pinmap_board::IoResourceType;
use std::collections::BTreeMap;

/// The direction of a design port at the top level, seen from the design:
/// an `Input` port reads a value the board supplies, an `Output` port
/// drives a value toward the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortDirection {
    /// The design reads this port; it consumes FPGA input pins.
    Input,
    /// The design drives this port; it consumes FPGA output pins.
    Output,
    /// Bidirectional; it consumes FPGA inout pins.
    InOut,
}

/// What kind of design element a port originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortKind {
    /// A bundled top-level signal wider than one bit. It has no primary
    /// resource type (no single board resource matches a bus), so the
    /// feasibility checker skips its primary-type test and it maps through
    /// the alternate family only.
    TopLevelBus {
        /// The bus width in bits.
        width: u32,
    },
    /// An I/O element with a primary resource-type requirement.
    Io(IoResourceType),
}

/// Which map-name family is currently active for a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapFamily {
    /// The whole port maps onto one (possibly multi-pin) resource.
    Primary,
    /// The port is decomposed into individually mapped single pins.
    Alternate,
}

impl MapFamily {
    /// The opposite family.
    pub fn other(self) -> Self {
        match self {
            MapFamily::Primary => MapFamily::Alternate,
            MapFamily::Alternate => MapFamily::Primary,
        }
    }
}

/// One recorded assignment: the target and the resource type it was made
/// under (which may be an alternate type, not the port's primary type).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// The assigned target.
    pub target: MapTarget,
    /// The textual resource type used for this assignment.
    pub resource_type: IoResourceType,
}

/// One mappable design port.
#[derive(Debug, Clone)]
pub struct MappablePort {
    /// The registry key identifying this port.
    pub key: HierKey,
    /// The originating element's kind and primary type requirement.
    pub kind: PortKind,
    /// The port's direction at the design's top level.
    pub direction: PortDirection,
    /// The originating element's live pin count (bus width, switch count).
    pub pin_count: u32,
    /// Whether the originating element is asserted by a high level.
    pub active_high: bool,
    family: MapFamily,
    locked: bool,
    assignments: BTreeMap<MapKey, Assignment>,
}

impl MappablePort {
    /// Creates an unmapped port in primary mode.
    pub fn new(
        key: HierKey,
        kind: PortKind,
        direction: PortDirection,
        pin_count: u32,
        active_high: bool,
    ) -> Self {
        Self {
            key,
            kind,
            direction,
            pin_count,
            active_high,
            family: MapFamily::Primary,
            locked: false,
            assignments: BTreeMap::new(),
        }
    }

    /// The primary resource-type requirement, `None` for a bundled bus.
    pub fn primary_type(&self) -> Option<IoResourceType> {
        match self.kind {
            PortKind::TopLevelBus { .. } => None,
            PortKind::Io(ty) => Some(ty),
        }
    }

    /// The ordered alternate-type family this port may fall back to.
    pub fn alternate_types(&self) -> &'static [IoResourceType] {
        match self.kind {
            PortKind::TopLevelBus { .. } => &[IoResourceType::Pin],
            PortKind::Io(IoResourceType::Pin) => &[IoResourceType::Pin],
            PortKind::Io(ty) => ty.alternates(),
        }
    }

    /// FPGA input pins this port requires.
    pub fn required_inputs(&self) -> u32 {
        match self.kind {
            PortKind::TopLevelBus { width } => match self.direction {
                PortDirection::Input => width,
                _ => 0,
            },
            PortKind::Io(IoResourceType::Pin) => match self.direction {
                PortDirection::Input => 1,
                _ => 0,
            },
            PortKind::Io(ty) => ty.input_pins(self.pin_count),
        }
    }

    /// FPGA output pins this port requires.
    pub fn required_outputs(&self) -> u32 {
        match self.kind {
            PortKind::TopLevelBus { width } => match self.direction {
                PortDirection::Output => width,
                _ => 0,
            },
            PortKind::Io(IoResourceType::Pin) => match self.direction {
                PortDirection::Output => 1,
                _ => 0,
            },
            PortKind::Io(ty) => ty.output_pins(self.pin_count),
        }
    }

    /// FPGA bidirectional pins this port requires.
    pub fn required_inouts(&self) -> u32 {
        match self.kind {
            PortKind::TopLevelBus { width } => match self.direction {
                PortDirection::InOut => width,
                _ => 0,
            },
            PortKind::Io(IoResourceType::Pin) => match self.direction {
                PortDirection::InOut => 1,
                _ => 0,
            },
            PortKind::Io(ty) => ty.inout_pins(self.pin_count),
        }
    }

    /// Total FPGA pins this port requires across all directions.
    pub fn total_required(&self) -> u32 {
        self.required_inputs() + self.required_outputs() + self.required_inouts()
    }

    /// The currently active map-name family.
    pub fn family(&self) -> MapFamily {
        self.family
    }

    /// Whether the family is locked against user toggling.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    fn subpin_label(&self, direction: PortDirection, index: u32) -> String {
        match self.kind {
            PortKind::TopLevelBus { .. } => format!("pin_{}", index + 1),
            PortKind::Io(ty) => match direction {
                PortDirection::Input => ty.input_pin_label(index),
                PortDirection::Output => ty.output_pin_label(index),
                PortDirection::InOut => ty.inout_pin_label(index),
            },
        }
    }

    /// The map names of a given family, in input, inout, output order for
    /// the decomposed alternate family.
    pub fn map_names_for(&self, family: MapFamily) -> Vec<MapKey> {
        match family {
            MapFamily::Primary => vec![MapKey::whole(&self.key)],
            MapFamily::Alternate => {
                let mut names = Vec::new();
                for i in 0..self.required_inputs() {
                    names.push(MapKey::subpin(
                        &self.key,
                        self.subpin_label(PortDirection::Input, i),
                    ));
                }
                for i in 0..self.required_inouts() {
                    names.push(MapKey::subpin(
                        &self.key,
                        self.subpin_label(PortDirection::InOut, i),
                    ));
                }
                for i in 0..self.required_outputs() {
                    names.push(MapKey::subpin(
                        &self.key,
                        self.subpin_label(PortDirection::Output, i),
                    ));
                }
                names
            }
        }
    }

    /// The map names of the currently active family.
    pub fn map_names(&self) -> Vec<MapKey> {
        self.map_names_for(self.family)
    }

    /// Whether `name` belongs to either of this port's map-name families.
    pub fn has_map_name(&self, name: &MapKey) -> bool {
        self.map_names_for(MapFamily::Primary).contains(name)
            || self.map_names_for(MapFamily::Alternate).contains(name)
    }

    /// Whether a family holds at least one recorded assignment.
    pub fn family_has_data(&self, family: MapFamily) -> bool {
        self.map_names_for(family)
            .iter()
            .any(|name| self.assignments.contains_key(name))
    }

    /// Toggles the active family.
    ///
    /// Refused (returning `false`) while the family is locked or while the
    /// active family holds at least one assignment; a port already mapped
    /// under one family must be unassigned before switching to the other.
    pub fn toggle(&mut self) -> bool {
        if self.locked || self.family_has_data(self.family) {
            return false;
        }
        self.family = self.family.other();
        true
    }

    /// Forces the port into alternate mode and locks it there, bypassing
    /// the guard once. Used by the feasibility checker when the primary
    /// type is wholly absent from the board.
    pub fn force_alternate_locked(&mut self) {
        self.family = MapFamily::Alternate;
        self.locked = true;
    }

    /// Clears the feasibility checker's lock.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Sets the active family directly. Reconciliation uses this after
    /// deciding which family actually holds data; it bypasses the guard.
    pub(crate) fn set_family(&mut self, family: MapFamily) {
        self.family = family;
    }

    /// The assignment recorded under a map name, if any.
    pub fn assignment(&self, name: &MapKey) -> Option<&Assignment> {
        self.assignments.get(name)
    }

    /// Records an assignment under a map name.
    pub fn set_assignment(&mut self, name: MapKey, assignment: Assignment) {
        self.assignments.insert(name, assignment);
    }

    /// Removes the assignment under a map name, returning it.
    pub fn clear_assignment(&mut self, name: &MapKey) -> Option<Assignment> {
        self.assignments.remove(name)
    }

    /// Removes every assignment in both families.
    pub fn clear_all_assignments(&mut self) {
        self.assignments.clear();
    }

    /// All recorded assignments, both families, in key order.
    pub fn assignments(&self) -> impl Iterator<Item = (&MapKey, &Assignment)> {
        self.assignments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinmap_board::BoardRectangle;

    fn led_port() -> MappablePort {
        MappablePort::new(
            HierKey::new("demo", ["LED1"]),
            PortKind::Io(IoResourceType::Led),
            PortDirection::Output,
            1,
            true,
        )
    }

    fn seven_segment_port() -> MappablePort {
        MappablePort::new(
            HierKey::new("demo", ["DS1"]),
            PortKind::Io(IoResourceType::SevenSegment),
            PortDirection::Output,
            1,
            true,
        )
    }

    fn input_bus(width: u32) -> MappablePort {
        MappablePort::new(
            HierKey::new("demo", ["data_in"]),
            PortKind::TopLevelBus { width },
            PortDirection::Input,
            width,
            true,
        )
    }

    #[test]
    fn requirements_follow_kind_and_direction() {
        assert_eq!(led_port().required_outputs(), 1);
        assert_eq!(led_port().total_required(), 1);
        assert_eq!(seven_segment_port().required_outputs(), 8);
        let bus = input_bus(4);
        assert_eq!(bus.required_inputs(), 4);
        assert_eq!(bus.required_outputs(), 0);
        assert!(bus.primary_type().is_none());
    }

    #[test]
    fn primary_family_has_single_whole_name() {
        let port = seven_segment_port();
        let names = port.map_names_for(MapFamily::Primary);
        assert_eq!(names, vec![MapKey::whole(&port.key)]);
    }

    #[test]
    fn alternate_family_decomposes_into_subpins() {
        let port = seven_segment_port();
        let names = port.map_names_for(MapFamily::Alternate);
        assert_eq!(names.len(), 8);
        assert_eq!(names[0].subpin.as_deref(), Some("Segment_A"));
        assert_eq!(names[7].subpin.as_deref(), Some("DecimalPoint"));
    }

    #[test]
    fn families_are_disjoint() {
        let port = seven_segment_port();
        let primary = port.map_names_for(MapFamily::Primary);
        let alternate = port.map_names_for(MapFamily::Alternate);
        for name in &primary {
            assert!(!alternate.contains(name));
        }
    }

    #[test]
    fn map_name_membership_spans_both_families() {
        let port = seven_segment_port();
        assert!(port.has_map_name(&MapKey::whole(&port.key)));
        assert!(port.has_map_name(&MapKey::subpin(&port.key, "Segment_C")));
        assert!(!port.has_map_name(&MapKey::subpin(&port.key, "Bogus")));
        assert!(!port.has_map_name(&MapKey::whole(&HierKey::new("demo", ["other"]))));
    }

    #[test]
    fn toggle_twice_restores_names_and_assignments() {
        let mut port = seven_segment_port();
        let before_names = port.map_names();
        port.set_assignment(
            MapKey::whole(&port.key),
            Assignment {
                target: MapTarget::Board(BoardRectangle::new(0, 0, 1, 1)),
                resource_type: IoResourceType::SevenSegment,
            },
        );
        let before_assignment = *port.assignment(&MapKey::whole(&port.key)).unwrap();

        // Mapped under primary: the first toggle is refused, so toggling
        // "twice" trivially restores. Unmap first to exercise a real flip.
        assert!(!port.toggle());
        port.clear_assignment(&MapKey::whole(&port.key));
        assert!(port.toggle());
        assert_eq!(port.family(), MapFamily::Alternate);
        assert_ne!(port.map_names(), before_names);
        assert!(port.toggle());
        assert_eq!(port.map_names(), before_names);

        port.set_assignment(
            MapKey::whole(&port.key),
            Assignment {
                target: before_assignment.target,
                resource_type: before_assignment.resource_type,
            },
        );
        assert_eq!(*port.assignment(&MapKey::whole(&port.key)).unwrap(), before_assignment);
    }

    #[test]
    fn toggle_refused_while_active_family_mapped() {
        let mut port = led_port();
        port.set_assignment(
            MapKey::whole(&port.key),
            Assignment {
                target: MapTarget::Unconnected,
                resource_type: IoResourceType::Open,
            },
        );
        assert!(!port.toggle());
        assert_eq!(port.family(), MapFamily::Primary);
    }

    #[test]
    fn force_and_lock_bypasses_guard_once() {
        let mut port = led_port();
        port.set_assignment(
            MapKey::whole(&port.key),
            Assignment {
                target: MapTarget::Zero,
                resource_type: IoResourceType::Constant,
            },
        );
        port.force_alternate_locked();
        assert_eq!(port.family(), MapFamily::Alternate);
        assert!(port.is_locked());
        // Locked: user toggling is refused even though the alternate
        // family holds nothing.
        assert!(!port.toggle());
        port.unlock();
        assert!(port.toggle());
        assert_eq!(port.family(), MapFamily::Primary);
    }

    #[test]
    fn bus_subpin_labels() {
        let bus = input_bus(2);
        let names = bus.map_names_for(MapFamily::Alternate);
        assert_eq!(names[0].subpin.as_deref(), Some("pin_1"));
        assert_eq!(names[1].subpin.as_deref(), Some("pin_2"));
    }
}
