//! The registry of mappable design ports and its extraction seam.

use crate::key::HierKey;
use crate::port::MappablePort;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// The set of design ports eligible for mapping, keyed hierarchically.
///
/// The registry is replaced wholesale on every reconciliation pass; mapping
/// state survives replacement only through explicit transplant. Iteration is
/// in key order, so "the first port" is well defined everywhere.
#[derive(Debug, Clone, Default)]
pub struct PortRegistry {
    ports: BTreeMap<HierKey, MappablePort>,
}

impl PortRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a port under its own key, replacing any previous entry.
    pub fn insert(&mut self, port: MappablePort) {
        self.ports.insert(port.key.clone(), port);
    }

    /// Looks up a port by key.
    pub fn get(&self, key: &HierKey) -> Option<&MappablePort> {
        self.ports.get(key)
    }

    /// Looks up a port by key, mutably.
    pub fn get_mut(&mut self, key: &HierKey) -> Option<&mut MappablePort> {
        self.ports.get_mut(key)
    }

    /// Whether the registry holds a port under this key.
    pub fn contains_key(&self, key: &HierKey) -> bool {
        self.ports.contains_key(key)
    }

    /// Iterates ports in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, HierKey, MappablePort> {
        self.ports.iter()
    }

    /// Iterates ports in key order, mutably.
    pub fn iter_mut(&mut self) -> btree_map::IterMut<'_, HierKey, MappablePort> {
        self.ports.iter_mut()
    }

    /// The registry keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = &HierKey> {
        self.ports.keys()
    }

    /// Number of registered ports.
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

/// The netlist-side extraction seam.
///
/// Implementations walk the current design and return a fresh registry of
/// its mappable top-level ports for the given board. The call must be
/// repeatable, and key identity must be stable across calls as long as the
/// underlying design element is unchanged; the reconciler relies on both to
/// transplant surviving assignments.
pub trait PortExtractor {
    /// Extracts the mappable ports of the current design.
    fn extract_mappable_ports(&self, board_id: &str) -> PortRegistry;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::{PortDirection, PortKind};
    use pinmap_board::IoResourceType;

    fn port(name: &str) -> MappablePort {
        MappablePort::new(
            HierKey::new("demo", [name]),
            PortKind::Io(IoResourceType::Led),
            PortDirection::Output,
            1,
            true,
        )
    }

    #[test]
    fn insert_and_lookup() {
        let mut registry = PortRegistry::new();
        registry.insert(port("LED1"));
        registry.insert(port("LED2"));
        assert_eq!(registry.len(), 2);
        assert!(registry.contains_key(&HierKey::new("demo", ["LED1"])));
        assert!(registry.get(&HierKey::new("demo", ["LED3"])).is_none());
    }

    #[test]
    fn iteration_is_key_ordered() {
        let mut registry = PortRegistry::new();
        registry.insert(port("b"));
        registry.insert(port("a"));
        registry.insert(port("c"));
        let keys: Vec<_> = registry.keys().map(|k| k.path()[0].clone()).collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn reinsert_replaces() {
        let mut registry = PortRegistry::new();
        registry.insert(port("LED1"));
        let mut replacement = port("LED1");
        replacement.pin_count = 3;
        registry.insert(replacement);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get(&HierKey::new("demo", ["LED1"])).unwrap().pin_count,
            3
        );
    }
}
