//! The mapping store: the map-name to target view plus the constants table.

use crate::key::MapKey;
use crate::target::{ConstantValue, MapTarget};
use pinmap_board::{Board, IoResourceType};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// The partial function from map names to assigned targets, with a side
/// table of literals for constant assignments.
///
/// The `mapped` view is derived: reconciliation rebuilds it from the
/// registry's per-port assignments after every change. The constants table
/// is authoritative and every mutator keeps it in lockstep: a map name has
/// a constants entry exactly when its target records a literal (zero, one,
/// or an arbitrary constant); unconnected records none.
#[derive(Debug, Clone, Default)]
pub struct MappingStore {
    mapped: BTreeMap<MapKey, MapTarget>,
    constants: BTreeMap<MapKey, ConstantValue>,
}

impl MappingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the derived mapped view (the constants table is untouched).
    pub fn clear_mapped(&mut self) {
        self.mapped.clear();
    }

    /// Records a map name's target in the derived view.
    pub fn insert_mapped(&mut self, name: MapKey, target: MapTarget) {
        self.mapped.insert(name, target);
    }

    /// The target assigned to a map name, if any.
    pub fn target(&self, name: &MapKey) -> Option<&MapTarget> {
        self.mapped.get(name)
    }

    /// Whether the map name currently has an assigned target.
    pub fn is_mapped(&self, name: &MapKey) -> bool {
        self.mapped.contains_key(name)
    }

    /// Whether any map name is assigned at all.
    pub fn has_any_mapped(&self) -> bool {
        !self.mapped.is_empty()
    }

    /// Whether a physical rectangle is already used by some assignment.
    pub fn uses_rect(&self, rect: &pinmap_board::BoardRectangle) -> bool {
        self.mapped
            .values()
            .any(|target| matches!(target, MapTarget::Board(r) if r == rect))
    }

    /// Iterates the mapped view in key order.
    pub fn iter_mapped(&self) -> btree_map::Iter<'_, MapKey, MapTarget> {
        self.mapped.iter()
    }

    /// Records a constant literal for a map name.
    pub fn set_constant(&mut self, name: MapKey, value: ConstantValue) {
        self.constants.insert(name, value);
    }

    /// Removes any constant literal for a map name.
    pub fn clear_constant(&mut self, name: &MapKey) {
        self.constants.remove(name);
    }

    /// The constant literal recorded for a map name, if any.
    pub fn constant(&self, name: &MapKey) -> Option<ConstantValue> {
        self.constants.get(name).copied()
    }

    /// Retains only the constant entries whose map name the predicate
    /// accepts. Reconciliation uses this to drop literals of vanished
    /// ports.
    pub fn retain_constants(&mut self, mut keep: impl FnMut(&MapKey) -> bool) {
        self.constants.retain(|name, _| keep(name));
    }

    /// The number of FPGA pins behind a mapped name: the constant's width
    /// for constant assignments, otherwise the resolved resource's pin
    /// claim. Unmapped or unresolvable names count zero.
    pub fn pin_count_of(&self, name: &MapKey, board: &Board) -> u32 {
        if !self.is_mapped(name) {
            return 0;
        }
        if let Some(constant) = self.constant(name) {
            return constant.width;
        }
        match self.target(name) {
            Some(MapTarget::Board(rect)) => match board.component_at(rect) {
                Some(component) if component.io_type == IoResourceType::Pin => component.pin_count,
                Some(component) => component.total_pins(),
                None => 0,
            },
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinmap_board::{BoardRectangle, IoComponent, PinActivity};

    fn name(path: &str) -> MapKey {
        MapKey::parse(&format!("demo:/{path}")).unwrap()
    }

    fn board_with_dip() -> Board {
        Board {
            name: "demo".to_string(),
            components: vec![IoComponent {
                rect: BoardRectangle::new(0, 0, 10, 10),
                io_type: IoResourceType::DipSwitch,
                pin_count: 6,
                activity: PinActivity::ActiveHigh,
                pin_locations: vec![],
                label: None,
            }],
        }
    }

    #[test]
    fn mapped_view_basics() {
        let mut store = MappingStore::new();
        assert!(!store.has_any_mapped());
        store.insert_mapped(name("LED1"), MapTarget::Unconnected);
        assert!(store.is_mapped(&name("LED1")));
        assert!(!store.is_mapped(&name("LED2")));
        store.clear_mapped();
        assert!(!store.has_any_mapped());
    }

    #[test]
    fn rect_usage() {
        let mut store = MappingStore::new();
        let rect = BoardRectangle::new(0, 0, 10, 10);
        store.insert_mapped(name("LED1"), MapTarget::Board(rect));
        assert!(store.uses_rect(&rect));
        assert!(!store.uses_rect(&BoardRectangle::new(1, 0, 10, 10)));
    }

    #[test]
    fn constants_in_lockstep() {
        let mut store = MappingStore::new();
        store.insert_mapped(name("bus"), MapTarget::One);
        store.set_constant(name("bus"), ConstantValue { value: -1, width: 4 });
        assert_eq!(
            store.constant(&name("bus")),
            Some(ConstantValue { value: -1, width: 4 })
        );
        store.clear_constant(&name("bus"));
        assert_eq!(store.constant(&name("bus")), None);
    }

    #[test]
    fn pin_count_prefers_constant_width() {
        let board = board_with_dip();
        let mut store = MappingStore::new();
        store.insert_mapped(name("bus"), MapTarget::Constant(5));
        store.set_constant(name("bus"), ConstantValue { value: 5, width: 8 });
        assert_eq!(store.pin_count_of(&name("bus"), &board), 8);
    }

    #[test]
    fn pin_count_resolves_live_width() {
        let board = board_with_dip();
        let mut store = MappingStore::new();
        store.insert_mapped(
            name("switches"),
            MapTarget::Board(BoardRectangle::new(0, 0, 10, 10)),
        );
        assert_eq!(store.pin_count_of(&name("switches"), &board), 6);
        assert_eq!(store.pin_count_of(&name("absent"), &board), 0);
    }
}
