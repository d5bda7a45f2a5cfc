//! Sequential pin indices within the top-level FPGA buses.

use crate::key::MapKey;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Three disjoint map-name to index tables, one per top-level bus
/// direction, plus their running counts.
///
/// The tables are transient: they are rebuilt wholesale before each code
/// generation request and never persisted or partially updated. A mapped
/// port's entry records the *starting* index it occupies; a multi-pin
/// resource advances the count by its full pin claim. The final counts are
/// the top-level bus widths.
#[derive(Debug, Clone, Default)]
pub struct PinIdTables {
    inputs: BTreeMap<MapKey, u32>,
    outputs: BTreeMap<MapKey, u32>,
    inouts: BTreeMap<MapKey, u32>,
    input_count: u32,
    output_count: u32,
    inout_count: u32,
}

impl PinIdTables {
    /// Creates empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all three tables and counters.
    pub fn clear(&mut self) {
        self.inputs.clear();
        self.outputs.clear();
        self.inouts.clear();
        self.input_count = 0;
        self.output_count = 0;
        self.inout_count = 0;
    }

    /// Appends `count` input positions for a map name, returning the
    /// starting index.
    pub fn claim_inputs(&mut self, name: MapKey, count: u32) -> u32 {
        let start = self.input_count;
        self.inputs.insert(name, start);
        self.input_count += count;
        start
    }

    /// Appends `count` output positions for a map name, returning the
    /// starting index.
    pub fn claim_outputs(&mut self, name: MapKey, count: u32) -> u32 {
        let start = self.output_count;
        self.outputs.insert(name, start);
        self.output_count += count;
        start
    }

    /// Appends `count` bidirectional positions for a map name, returning
    /// the starting index.
    pub fn claim_inouts(&mut self, name: MapKey, count: u32) -> u32 {
        let start = self.inout_count;
        self.inouts.insert(name, start);
        self.inout_count += count;
        start
    }

    /// The starting input index of a map name, if it claims inputs.
    pub fn input_id(&self, name: &MapKey) -> Option<u32> {
        self.inputs.get(name).copied()
    }

    /// The starting output index of a map name, if it claims outputs.
    pub fn output_id(&self, name: &MapKey) -> Option<u32> {
        self.outputs.get(name).copied()
    }

    /// The starting inout index of a map name, if it claims inouts.
    pub fn inout_id(&self, name: &MapKey) -> Option<u32> {
        self.inouts.get(name).copied()
    }

    /// Iterates the input table in key order.
    pub fn iter_inputs(&self) -> btree_map::Iter<'_, MapKey, u32> {
        self.inputs.iter()
    }

    /// Iterates the output table in key order.
    pub fn iter_outputs(&self) -> btree_map::Iter<'_, MapKey, u32> {
        self.outputs.iter()
    }

    /// Iterates the inout table in key order.
    pub fn iter_inouts(&self) -> btree_map::Iter<'_, MapKey, u32> {
        self.inouts.iter()
    }

    /// The three final counts: the top-level (input, output, inout) bus
    /// widths exposed to code generation.
    pub fn bus_widths(&self) -> (u32, u32, u32) {
        (self.input_count, self.output_count, self.inout_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(path: &str) -> MapKey {
        MapKey::parse(&format!("demo:/{path}")).unwrap()
    }

    #[test]
    fn sequential_single_pin_claims() {
        let mut tables = PinIdTables::new();
        assert_eq!(tables.claim_inputs(name("a"), 1), 0);
        assert_eq!(tables.claim_inputs(name("b"), 1), 1);
        assert_eq!(tables.input_id(&name("a")), Some(0));
        assert_eq!(tables.input_id(&name("b")), Some(1));
        assert_eq!(tables.bus_widths(), (2, 0, 0));
    }

    #[test]
    fn multi_pin_claims_advance_by_count() {
        let mut tables = PinIdTables::new();
        assert_eq!(tables.claim_inputs(name("switches"), 8), 0);
        assert_eq!(tables.claim_inputs(name("btn"), 1), 8);
        assert_eq!(tables.claim_outputs(name("display"), 8), 0);
        assert_eq!(tables.claim_inouts(name("port"), 4), 0);
        assert_eq!(tables.bus_widths(), (9, 8, 4));
    }

    #[test]
    fn clear_resets_everything() {
        let mut tables = PinIdTables::new();
        tables.claim_outputs(name("LED1"), 1);
        tables.clear();
        assert_eq!(tables.output_id(&name("LED1")), None);
        assert_eq!(tables.bus_widths(), (0, 0, 0));
    }

    #[test]
    fn tables_are_disjoint() {
        let mut tables = PinIdTables::new();
        tables.claim_inputs(name("a"), 1);
        assert_eq!(tables.output_id(&name("a")), None);
        assert_eq!(tables.inout_id(&name("a")), None);
    }
}
