//! Disposable per-type availability snapshots for feasibility checking.

use crate::types::IoResourceType;
use std::collections::BTreeMap;

/// A mutable per-type multiset of available live pin counts.
///
/// The feasibility checker consumes entries from a snapshot of the board's
/// catalog, so a failed or exploratory check never mutates board state. The
/// snapshot is meant to be built fresh per check ([`Board::inventory`]) and
/// thrown away afterwards.
///
/// Consumption deliberately removes from the *back* of each list (LIFO):
/// the snapshot is built in catalog order and the most recently listed
/// resource of a type is taken first.
///
/// [`Board::inventory`]: crate::board::Board::inventory
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    entries: BTreeMap<IoResourceType, Vec<u32>>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one resource's live pin count under its type.
    pub fn add(&mut self, io_type: IoResourceType, pins: u32) {
        self.entries.entry(io_type).or_default().push(pins);
    }

    /// Whether the snapshot carries the type at all.
    ///
    /// A type whose entries were all consumed is still *carried*; a board
    /// that never had the type is not. The feasibility checker distinguishes
    /// the two: a wholly absent primary type forces a port into alternate
    /// mapping mode.
    pub fn has_type(&self, io_type: IoResourceType) -> bool {
        self.entries.contains_key(&io_type)
    }

    /// Number of entries still available for the type.
    pub fn available(&self, io_type: IoResourceType) -> usize {
        self.entries.get(&io_type).map_or(0, Vec::len)
    }

    /// Removes and returns the last entry of the type.
    pub fn take_last(&mut self, io_type: IoResourceType) -> Option<u32> {
        self.entries.get_mut(&io_type)?.pop()
    }

    /// Removes `count` entries of the type from the back, or none at all if
    /// fewer than `count` remain. Returns whether the removal happened.
    pub fn take_last_n(&mut self, io_type: IoResourceType, count: usize) -> bool {
        match self.entries.get_mut(&io_type) {
            Some(list) if list.len() >= count => {
                list.truncate(list.len() - count);
                true
            }
            _ => false,
        }
    }

    /// Removes and returns the best-fitting entry of the type for a
    /// required width: an exact match wins immediately, otherwise the
    /// smallest entry that is at least `width` wide, ties broken by the
    /// first such entry in list order.
    pub fn take_best_fit(&mut self, io_type: IoResourceType, width: u32) -> Option<u32> {
        let list = self.entries.get_mut(&io_type)?;
        let mut best: Option<(usize, u32)> = None;
        for (i, &pins) in list.iter().enumerate() {
            if pins == width {
                list.remove(i);
                return Some(pins);
            }
            if pins > width && best.map_or(true, |(_, b)| pins < b) {
                best = Some((i, pins));
            }
        }
        best.map(|(i, pins)| {
            list.remove(i);
            pins
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inv(pairs: &[(IoResourceType, u32)]) -> Inventory {
        let mut inv = Inventory::new();
        for &(ty, pins) in pairs {
            inv.add(ty, pins);
        }
        inv
    }

    #[test]
    fn take_last_is_lifo() {
        let mut inv = inv(&[
            (IoResourceType::Led, 1),
            (IoResourceType::Led, 1),
            (IoResourceType::Pin, 1),
        ]);
        assert_eq!(inv.available(IoResourceType::Led), 2);
        assert_eq!(inv.take_last(IoResourceType::Led), Some(1));
        assert_eq!(inv.available(IoResourceType::Led), 1);
        assert!(inv.has_type(IoResourceType::Led));
    }

    #[test]
    fn exhausted_type_is_still_carried() {
        let mut inv = inv(&[(IoResourceType::Pin, 1)]);
        assert_eq!(inv.take_last(IoResourceType::Pin), Some(1));
        assert!(inv.has_type(IoResourceType::Pin));
        assert_eq!(inv.available(IoResourceType::Pin), 0);
        assert_eq!(inv.take_last(IoResourceType::Pin), None);
        assert!(!inv.has_type(IoResourceType::Button));
    }

    #[test]
    fn take_last_n_is_all_or_nothing() {
        let mut inv = inv(&[
            (IoResourceType::Pin, 1),
            (IoResourceType::Pin, 1),
            (IoResourceType::Pin, 1),
        ]);
        assert!(!inv.take_last_n(IoResourceType::Pin, 4));
        assert_eq!(inv.available(IoResourceType::Pin), 3);
        assert!(inv.take_last_n(IoResourceType::Pin, 2));
        assert_eq!(inv.available(IoResourceType::Pin), 1);
    }

    #[test]
    fn best_fit_prefers_exact_match() {
        let mut inv = inv(&[
            (IoResourceType::DipSwitch, 8),
            (IoResourceType::DipSwitch, 4),
            (IoResourceType::DipSwitch, 16),
        ]);
        assert_eq!(inv.take_best_fit(IoResourceType::DipSwitch, 4), Some(4));
        assert_eq!(inv.available(IoResourceType::DipSwitch), 2);
    }

    #[test]
    fn best_fit_takes_smallest_sufficient() {
        let mut inv = inv(&[
            (IoResourceType::DipSwitch, 16),
            (IoResourceType::DipSwitch, 8),
        ]);
        assert_eq!(inv.take_best_fit(IoResourceType::DipSwitch, 5), Some(8));
        assert_eq!(inv.take_best_fit(IoResourceType::DipSwitch, 5), Some(16));
        assert_eq!(inv.take_best_fit(IoResourceType::DipSwitch, 5), None);
    }

    #[test]
    fn best_fit_tie_breaks_on_first() {
        let mut inv = inv(&[
            (IoResourceType::PortIo, 8),
            (IoResourceType::PortIo, 8),
        ]);
        assert_eq!(inv.take_best_fit(IoResourceType::PortIo, 4), Some(8));
        assert_eq!(inv.available(IoResourceType::PortIo), 1);
    }

    #[test]
    fn best_fit_rejects_too_narrow() {
        let mut inv = inv(&[(IoResourceType::DipSwitch, 4)]);
        assert_eq!(inv.take_best_fit(IoResourceType::DipSwitch, 8), None);
        assert_eq!(inv.available(IoResourceType::DipSwitch), 1);
    }
}
