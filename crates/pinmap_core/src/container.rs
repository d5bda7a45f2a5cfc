//! The mapping container: one board, one design, one mutable assignment.
//!
//! [`MappableResources`] owns the registry of mappable design ports for the
//! active board together with the mapping store, and exposes every mutating
//! operation: assigning and unassigning targets, toggling a port's mapping
//! family, reconciling against design edits, feasibility checking, and the
//! pin-ID allocation pass that feeds code generation.
//!
//! All operations run to completion before the next begins; the engine is
//! single-threaded and cooperative with the interactive editor. The only
//! whole-registry simulation, [`is_mappable`](MappableResources::is_mappable),
//! works on a disposable inventory snapshot so an exploratory check never
//! touches board or store state.

use crate::key::{HierKey, MapKey};
use crate::pin_ids::PinIdTables;
use crate::port::{Assignment, MapFamily, MappablePort, PortDirection, PortKind};
use crate::registry::{PortExtractor, PortRegistry};
use crate::store::MappingStore;
use crate::target::{
    parse_constant_literal, ConstantSource, ConstantValue, MapInfo, MapTarget, SelectableTarget,
};
use pinmap_board::{Board, BusDirection, Inventory, IoResourceType, PinActivity};
use pinmap_common::{natural_cmp, InternalError, PinmapResult};
use pinmap_diagnostics::{Diagnostic, DiagnosticSink, INSUFFICIENT_RESOURCES, PORT_NOT_PLACEABLE};

/// The authoritative mapping state for one design on one board.
pub struct MappableResources {
    board: Board,
    extractor: Box<dyn PortExtractor>,
    registry: PortRegistry,
    store: MappingStore,
    pin_ids: PinIdTables,
}

impl MappableResources {
    /// Creates a container for a board and design, extracting the initial
    /// registry.
    pub fn new(board: Board, extractor: Box<dyn PortExtractor>) -> Self {
        let mut container = Self {
            board,
            extractor,
            registry: PortRegistry::new(),
            store: MappingStore::new(),
            pin_ids: PinIdTables::new(),
        };
        container.rebuild_mapped_index();
        container
    }

    /// The active board catalog.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The current port registry.
    pub fn ports(&self) -> &PortRegistry {
        &self.registry
    }

    /// Looks up one port by registry key.
    pub fn port(&self, key: &HierKey) -> Option<&MappablePort> {
        self.registry.get(key)
    }

    /// The mapping store.
    pub fn store(&self) -> &MappingStore {
        &self.store
    }

    /// The pin-ID tables from the last allocation pass.
    pub fn pin_ids(&self) -> &PinIdTables {
        &self.pin_ids
    }

    /// Mutable port lookup for the public mutators. A miss is an
    /// internal-consistency error: the caller let its keys drift from the
    /// registry.
    fn port_mut(&mut self, key: &HierKey, op: &str) -> PinmapResult<&mut MappablePort> {
        self.registry
            .get_mut(key)
            .ok_or_else(|| InternalError::new(format!("{op}: no mappable port for '{key}'")))
    }

    fn type_label(port: &MappablePort) -> String {
        match port.kind {
            PortKind::TopLevelBus { .. } => "PIN".to_string(),
            PortKind::Io(ty) => ty.to_string().to_uppercase(),
        }
    }

    /// The user-facing display name of a map name: the port's primary type
    /// in upper case, a colon, then the path with any subpin label.
    pub fn display_name(&self, name: &MapKey) -> String {
        match self.registry.get(&name.hier_key()) {
            Some(port) => format!("{}: {}", Self::type_label(port), name.path_display()),
            None => {
                let err = InternalError::new(format!("display name for unknown map name '{name}'"));
                tracing::error!("{err}");
                String::new()
            }
        }
    }

    /// Assigns a target to a map name.
    ///
    /// Sentinel targets route to constant/unconnected handling: zero and
    /// one record a literal at the port's required width (all-ones is `-1`
    /// in sign-extension convention), an arbitrary constant records the
    /// carried value, unconnected records no literal. A non-sentinel target
    /// clears any stale constant entry. The store is rebuilt afterwards.
    /// A map name that does not belong to either family of its port is
    /// logged and the operation is a no-op.
    pub fn assign(&mut self, name: &MapKey, target: MapTarget, resource_type: IoResourceType) {
        let port = match self.port_mut(&name.hier_key(), "assign") {
            Ok(port) => port,
            Err(err) => {
                tracing::error!("{err}");
                return;
            }
        };
        if !port.has_map_name(name) {
            let err = InternalError::new(format!("assign: '{name}' is not a map name of its port"));
            tracing::error!("{err}");
            return;
        }
        // A decomposed sub-pin is always one bit wide; a whole-port
        // constant covers the full pin requirement. The name decides, not
        // the port's currently active family.
        let width = if name.subpin.is_some() {
            1
        } else {
            port.total_required().max(1)
        };
        let (resource_type, constant) = match target {
            MapTarget::Unconnected => (IoResourceType::Open, None),
            MapTarget::Zero => (IoResourceType::Constant, Some(ConstantValue { value: 0, width })),
            MapTarget::One => (IoResourceType::Constant, Some(ConstantValue { value: -1, width })),
            MapTarget::Constant(value) => {
                (IoResourceType::Constant, Some(ConstantValue { value, width }))
            }
            MapTarget::Board(_) => (resource_type, None),
        };
        port.set_assignment(name.clone(), Assignment { target, resource_type });
        match constant {
            Some(value) => self.store.set_constant(name.clone(), value),
            None => self.store.clear_constant(name),
        }
        self.rebuild_mapped_index();
    }

    /// Assigns an arbitrary constant whose value comes from the external
    /// value-entry collaborator.
    ///
    /// The collaborator is polled until it supplies a well-formed decimal
    /// or `0x`-hexadecimal literal; a withheld entry (`None`) cancels the
    /// assignment with no state change, and malformed entries are bounced
    /// back for re-prompting.
    pub fn assign_constant(&mut self, name: &MapKey, source: &dyn ConstantSource) {
        match self.registry.get(&name.hier_key()) {
            Some(port) if port.has_map_name(name) => {}
            _ => {
                let err =
                    InternalError::new(format!("assign constant: no mappable port behind '{name}'"));
                tracing::error!("{err}");
                return;
            }
        }
        let prompt = self.display_name(name);
        loop {
            let Some(text) = source.request_literal(&prompt) else {
                return;
            };
            match parse_constant_literal(&text) {
                Ok(value) => {
                    self.assign(name, MapTarget::Constant(value), IoResourceType::Constant);
                    return;
                }
                Err(_) => source.reject_literal(&text),
            }
        }
    }

    /// Removes the assignment and any constant entry for a map name, then
    /// rebuilds the store. An unrecognized name is logged and ignored.
    pub fn unassign(&mut self, name: &MapKey) {
        let port = match self.port_mut(&name.hier_key(), "unassign") {
            Ok(port) => port,
            Err(err) => {
                tracing::error!("{err}");
                return;
            }
        };
        if !port.has_map_name(name) {
            let err =
                InternalError::new(format!("unassign: '{name}' is not a map name of its port"));
            tracing::error!("{err}");
            return;
        }
        port.clear_assignment(name);
        self.store.clear_constant(name);
        self.rebuild_mapped_index();
    }

    /// Clears every assignment belonging to the active board, then
    /// rebuilds.
    pub fn unassign_all(&mut self) {
        let board_name = self.board.name.clone();
        for (key, port) in self.registry.iter_mut() {
            if key.board() != board_name {
                continue;
            }
            let names: Vec<MapKey> = port.assignments().map(|(name, _)| name.clone()).collect();
            port.clear_all_assignments();
            for name in &names {
                self.store.clear_constant(name);
            }
        }
        self.rebuild_mapped_index();
    }

    /// Toggles a port between its primary and alternate mapping family.
    ///
    /// Refused while the active family holds at least one assignment or
    /// while the feasibility checker has locked the port; the caller must
    /// unassign first.
    pub fn toggle_alternate(&mut self, key: &HierKey) {
        let port = match self.port_mut(key, "toggle") {
            Ok(port) => port,
            Err(err) => {
                tracing::error!("{err}");
                return;
            }
        };
        if port.toggle() {
            self.refresh_mapped();
        }
    }

    /// Reconciles mapping state against the current design.
    ///
    /// Re-extracts the registry, transplants every surviving port's
    /// assignments from the old registry, replaces it, prunes constant
    /// entries whose ports vanished, and repopulates the mapped view. Each
    /// port's family is set to whichever name family actually holds data,
    /// so display mode stays consistent whether a port was mapped whole or
    /// decomposed per sub-pin.
    pub fn rebuild_mapped_index(&mut self) {
        let board_name = self.board.name.clone();
        let mut new_registry = self.extractor.extract_mappable_ports(&board_name);
        for (key, old_port) in self.registry.iter() {
            if key.board() != board_name {
                continue;
            }
            let Some(new_port) = new_registry.get_mut(key) else {
                continue;
            };
            for (name, assignment) in old_port.assignments() {
                new_port.set_assignment(name.clone(), *assignment);
            }
        }
        self.registry = new_registry;
        let registry = &self.registry;
        self.store.retain_constants(|name| {
            registry
                .get(&name.hier_key())
                .is_some_and(|port| port.assignment(name).is_some())
        });
        self.refresh_mapped();
    }

    /// Rebuilds the derived mapped view from the registry and settles each
    /// port's active family on whichever side holds data.
    fn refresh_mapped(&mut self) {
        self.store.clear_mapped();
        let board_name = self.board.name.clone();
        for (key, port) in self.registry.iter_mut() {
            if key.board() != board_name {
                continue;
            }
            let current = port.family();
            if !port.family_has_data(current) && port.family_has_data(current.other()) {
                port.set_family(current.other());
            }
            for name in port.map_names() {
                if let Some(assignment) = port.assignment(&name) {
                    self.store.insert_mapped(name, assignment.target);
                }
            }
        }
    }

    /// Decides whether the board can host the whole design.
    ///
    /// Simulates allocation against the given inventory snapshot, mutating
    /// it as it goes; the caller passes a disposable copy so the real
    /// catalog is never touched. Ports are visited in registry order. A
    /// port whose primary type is wholly absent from the board is forced
    /// into alternate mapping mode and locked there. On the first port that
    /// no alternate type can satisfy, a board-level and a port-level
    /// diagnostic are emitted, any forced mode is reverted, and the check
    /// short-circuits to `false`; remaining ports are not examined.
    pub fn is_mappable(&mut self, inventory: &mut Inventory, sink: &DiagnosticSink) -> bool {
        let board_name = self.board.name.clone();
        for (_, port) in self.registry.iter_mut() {
            let mut satisfied = false;
            match port.primary_type() {
                // A bundled top-level bus has no primary type to check.
                None => {}
                Some(ty) => {
                    if inventory.has_type(ty) {
                        if inventory.available(ty) > 0 {
                            if ty.has_variable_width() {
                                satisfied =
                                    inventory.take_best_fit(ty, port.total_required()).is_some();
                            } else {
                                inventory.take_last(ty);
                                satisfied = true;
                            }
                        }
                    } else {
                        port.force_alternate_locked();
                    }
                }
            }
            if !satisfied {
                let required = port.total_required() as usize;
                for &alt in port.alternate_types() {
                    if inventory.take_last_n(alt, required) {
                        satisfied = true;
                        break;
                    }
                }
            }
            if !satisfied {
                if port.family() == MapFamily::Alternate {
                    port.unlock();
                    port.set_family(MapFamily::Primary);
                }
                let display = port
                    .map_names()
                    .first()
                    .map(|name| format!("{}: {}", Self::type_label(port), name.path_display()))
                    .unwrap_or_default();
                sink.emit(Diagnostic::error(
                    INSUFFICIENT_RESOURCES,
                    format!(
                        "the target board '{board_name}' does not have enough IO resources to map the design"
                    ),
                ));
                sink.emit(
                    Diagnostic::error(
                        PORT_NOT_PLACEABLE,
                        format!("the component \"{display}\" cannot be placed"),
                    )
                    .with_subject(display.clone()),
                );
                return false;
            }
        }
        true
    }

    /// Rebuilds the three pin-ID tables and their counters from scratch.
    ///
    /// For every active map name backed by a bare pin, the port's own
    /// direction picks the bucket: a port the design reads claims the next
    /// FPGA input index, a port the design drives claims the next output
    /// index. Composite peripherals claim their declared pin requirements
    /// per direction, advancing counters by the full live pin count. Map
    /// names the catalog cannot resolve are silently skipped.
    pub fn build_io_mapping_information(&mut self) {
        self.pin_ids.clear();
        for (_, port) in self.registry.iter() {
            for name in port.map_names() {
                let Some(MapTarget::Board(rect)) = self.store.target(&name) else {
                    continue;
                };
                let Some(component) = self.board.component_at(rect) else {
                    continue;
                };
                if component.io_type == IoResourceType::Pin {
                    match port.direction {
                        PortDirection::Input => {
                            self.pin_ids.claim_inputs(name.clone(), 1);
                        }
                        PortDirection::Output => {
                            self.pin_ids.claim_outputs(name.clone(), 1);
                        }
                        PortDirection::InOut => {
                            self.pin_ids.claim_inouts(name.clone(), 1);
                        }
                    }
                } else {
                    let inputs = component.input_pins();
                    if inputs != 0 {
                        self.pin_ids.claim_inputs(name.clone(), inputs);
                    }
                    let outputs = component.output_pins();
                    if outputs != 0 {
                        self.pin_ids.claim_outputs(name.clone(), outputs);
                    }
                    let inouts = component.inout_pins();
                    if inouts != 0 {
                        self.pin_ids.claim_inouts(name.clone(), inouts);
                    }
                }
            }
        }
    }

    /// The starting input-bus index of a mapped name.
    pub fn input_pin_id(&self, name: &MapKey) -> Option<u32> {
        self.pin_ids.input_id(name)
    }

    /// The starting output-bus index of a mapped name.
    pub fn output_pin_id(&self, name: &MapKey) -> Option<u32> {
        self.pin_ids.output_id(name)
    }

    /// The starting inout-bus index of a mapped name.
    pub fn inout_pin_id(&self, name: &MapKey) -> Option<u32> {
        self.pin_ids.inout_id(name)
    }

    /// The top-level (input, output, inout) bus widths from the last
    /// allocation pass.
    pub fn toplevel_bus_widths(&self) -> (u32, u32, u32) {
        self.pin_ids.bus_widths()
    }

    /// Constraint lines for every allocated bus position, in input, inout,
    /// output order. A pin-ID entry whose mapping can no longer be
    /// resolved is logged and terminates the walk with the lines gathered
    /// so far.
    pub fn pin_location_strings(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let walks = [
            (BusDirection::Input, self.pin_ids.iter_inputs()),
            (BusDirection::InOut, self.pin_ids.iter_inouts()),
            (BusDirection::Output, self.pin_ids.iter_outputs()),
        ];
        for (direction, walk) in walks {
            for (name, &start) in walk {
                let Some(MapTarget::Board(rect)) = self.store.target(name) else {
                    tracing::warn!(name = %name, "no mapping found behind pin id entry");
                    return lines;
                };
                let Some(component) = self.board.component_at(rect) else {
                    tracing::warn!(name = %name, "no board resource behind pin id entry");
                    return lines;
                };
                lines.extend(component.pin_location_strings(direction, start));
            }
        }
        lines
    }

    /// Display names of all mapped ports, in natural-sort order.
    pub fn mapped_port_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .store
            .iter_mapped()
            .map(|(name, _)| self.display_name(name))
            .collect();
        names.sort_by(|a, b| natural_cmp(a, b));
        names.dedup();
        names
    }

    /// Display names of every active map name that has no assignment, in
    /// natural-sort order.
    pub fn unmapped_port_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for (_, port) in self.registry.iter() {
            for name in port.map_names() {
                if !self.store.is_mapped(&name) {
                    names.push(self.display_name(&name));
                }
            }
        }
        names.sort_by(|a, b| natural_cmp(a, b));
        names.dedup();
        names
    }

    /// The constant literal recorded for a map name.
    pub fn constant(&self, name: &MapKey) -> Option<ConstantValue> {
        self.store.constant(name)
    }

    /// The constant value recorded for a map name.
    pub fn constant_value(&self, name: &MapKey) -> Option<i64> {
        self.store.constant(name).map(|c| c.value)
    }

    /// Whether anything is mapped at all.
    pub fn has_mapped_components(&self) -> bool {
        self.store.has_any_mapped()
    }

    /// The number of FPGA pins behind a mapped name.
    pub fn pin_count_of(&self, name: &MapKey) -> u32 {
        self.store.pin_count_of(name, &self.board)
    }

    /// Whether code generation must invert the signal behind a mapped
    /// name: true when the board resource's activity polarity disagrees
    /// with the design element's.
    pub fn requires_toplevel_inversion(&self, name: &MapKey) -> bool {
        let Some(MapTarget::Board(rect)) = self.store.target(name) else {
            return false;
        };
        let Some(component) = self.board.component_at(rect) else {
            return false;
        };
        let Some(port) = self.registry.get(&name.hier_key()) else {
            return false;
        };
        let board_active_high = component.activity == PinActivity::ActiveHigh;
        board_active_high ^ port.active_high
    }

    fn add_fixed_targets(
        list: &mut Vec<SelectableTarget>,
        constants: bool,
        open: bool,
        arbitrary: bool,
    ) {
        if constants {
            list.push(SelectableTarget::Zero);
            list.push(SelectableTarget::One);
            if arbitrary {
                list.push(SelectableTarget::ConstantValue);
            }
        }
        if open {
            list.push(SelectableTarget::Unconnected);
        }
    }

    fn remove_used(&self, mut list: Vec<SelectableTarget>) -> Vec<SelectableTarget> {
        list.retain(|candidate| match candidate {
            SelectableTarget::Resource(rect) => !self.store.uses_rect(rect),
            _ => true,
        });
        list
    }

    /// The mapping candidates for one port: primary-type resources of
    /// sufficient width plus the applicable sentinels, or, when the
    /// primary family yields nothing, single-pin resources across the
    /// port's alternate types. Resources already used by another mapping
    /// are removed.
    ///
    /// Constants are offered for ports that consume a value from the
    /// board; unconnected is offered for ports that drive one toward it.
    /// The arbitrary-constant entry appears only for multi-bit whole-port
    /// mappings.
    pub fn selectable_resources(&self, key: &HierKey) -> Vec<SelectableTarget> {
        let Some(port) = self.registry.get(key) else {
            let err = InternalError::new(format!("selectable resources: no port for '{key}'"));
            tracing::error!("{err}");
            return Vec::new();
        };
        let required = port.total_required();
        let constants = port.required_inputs() + port.required_inouts() > 0;
        let open = port.required_outputs() + port.required_inouts() > 0;
        if port.family() == MapFamily::Primary {
            if let Some(ty) = port.primary_type() {
                let components = self.board.components_of_type(ty, required);
                if !components.is_empty() {
                    let mut list: Vec<SelectableTarget> = components
                        .iter()
                        .map(|c| SelectableTarget::Resource(c.rect))
                        .collect();
                    Self::add_fixed_targets(&mut list, constants, open, required > 1);
                    return self.remove_used(list);
                }
            }
        }
        let mut list = Vec::new();
        for &alt in port.alternate_types() {
            list.extend(
                self.board
                    .components_of_type(alt, 1)
                    .iter()
                    .map(|c| SelectableTarget::Resource(c.rect)),
            );
        }
        Self::add_fixed_targets(&mut list, constants, open, false);
        self.remove_used(list)
    }

    /// The serializable mapping record for a map name, if it is mapped.
    pub fn map_info(&self, name: &MapKey) -> Option<MapInfo> {
        match self.store.target(name)? {
            MapTarget::Unconnected => Some(MapInfo::Unconnected),
            MapTarget::Zero | MapTarget::One | MapTarget::Constant(_) => {
                self.store.constant(name).map(|c| MapInfo::Constant(c.value))
            }
            MapTarget::Board(rect) => Some(MapInfo::Rect(*rect)),
        }
    }

    /// Applies a persisted mapping record during project load.
    ///
    /// Constant records resolve `0` to the zero sentinel and `-1` to the
    /// all-ones sentinel; rectangle records are classified through the
    /// catalog. Unresolvable records are dropped silently.
    pub fn try_map(&mut self, name: &MapKey, info: MapInfo) {
        match info {
            MapInfo::Unconnected => {
                self.try_map_target(name, MapTarget::Unconnected, IoResourceType::Open);
            }
            MapInfo::Constant(value) => {
                let target = match value {
                    0 => MapTarget::Zero,
                    -1 => MapTarget::One,
                    value => MapTarget::Constant(value),
                };
                self.try_map_target(name, target, IoResourceType::Constant);
            }
            MapInfo::Rect(rect) => {
                let resource_type = self.board.type_at(&rect);
                self.try_map_target(name, MapTarget::Board(rect), resource_type);
            }
        }
    }

    /// Applies one target to a map name if the name's family can be made
    /// active and the name is still unmapped; otherwise does nothing.
    pub fn try_map_target(
        &mut self,
        name: &MapKey,
        target: MapTarget,
        resource_type: IoResourceType,
    ) {
        if resource_type == IoResourceType::Unknown {
            return;
        }
        let Some(port) = self.registry.get_mut(&name.hier_key()) else {
            return;
        };
        let wanted = if name.subpin.is_some() {
            MapFamily::Alternate
        } else {
            MapFamily::Primary
        };
        let toggled = if port.family() != wanted {
            if !port.toggle() {
                return;
            }
            true
        } else {
            false
        };
        if port.assignment(name).is_some() {
            if toggled {
                port.set_family(wanted.other());
            }
            return;
        }
        self.assign(name, target, resource_type);
    }
}
